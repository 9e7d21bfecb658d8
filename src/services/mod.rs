pub mod recipe_service;
pub use recipe_service::{RecipeError, RecipeService};

pub mod recipe_service_impl;
pub use recipe_service_impl::SeaOrmRecipeService;

pub mod auth_service;
pub use auth_service::{AuthError, AuthService, LoginResult, UserInfo};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;
