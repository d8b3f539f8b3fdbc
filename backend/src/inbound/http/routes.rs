//! Route table for the HTTP adapter.
//!
//! Kept separate from server construction so tests and the binary mount the
//! same surface.

use actix_web::web;

use super::accounts::{create_user, protected, sign_in, sign_out};
use super::recipe_creation::create_recipe;
use super::recipes::{
    delete_recipe, get_recipe, get_recipe_by_name, list_recipe_steps, list_recipes,
    update_recipe,
};
use super::users::{delete_user, list_user_recipes, list_users, update_user};

/// Register every API handler.
///
/// `/recipes/name/{name}` is registered before `/recipes/{id}/steps` so a
/// recipe literally named `steps` is still looked up by name.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use recipes_backend::inbound::http::routes;
///
/// let _app = App::new().configure(routes::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_recipes)
        .service(get_recipe_by_name)
        .service(get_recipe)
        .service(list_recipe_steps)
        .service(create_recipe)
        .service(update_recipe)
        .service(delete_recipe)
        .service(list_users)
        .service(list_user_recipes)
        .service(update_user)
        .service(delete_user)
        .service(create_user)
        .service(sign_in)
        .service(sign_out)
        .service(protected);
}
