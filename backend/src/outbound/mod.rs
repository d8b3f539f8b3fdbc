//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **supabase**: reqwest adapters for the hosted tables, object storage and
//!   identity provider.
//! - **jwt**: local verification of access tokens signed with the project
//!   secret.
//!
//! Adapters translate between domain types and wire representations and hold
//! no business logic.

pub mod jwt;
pub mod supabase;
