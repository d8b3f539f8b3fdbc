//! Adapters for the managed backend-as-a-service.
//!
//! One shared [`SupabaseClient`] carries the base URL, the project keys and a
//! pooled reqwest client. The adapters built on it implement the domain's
//! driven ports:
//!
//! - table repositories for recipes, steps and users (REST interface);
//! - image storage (object interface);
//! - the identity provider, which doubles as a remote token verifier.

mod client;
mod dto;
mod identity;
mod repositories;
mod rest;
mod storage;

pub use client::{SupabaseClient, SupabaseClientError, SupabaseConfig};
pub use identity::SupabaseIdentityProvider;
pub use repositories::{SupabaseRecipeRepository, SupabaseStepRepository, SupabaseUserRepository};
pub use storage::SupabaseImageStorage;
