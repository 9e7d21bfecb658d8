pub mod prelude;

pub mod ingredients;
pub mod recipes;
pub mod users;
