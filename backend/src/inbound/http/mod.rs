//! HTTP inbound adapter exposing the recipe, user and account endpoints.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod health;
pub mod recipe_creation;
pub mod recipes;
pub mod routes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
