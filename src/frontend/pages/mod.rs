pub mod auth_callback;
pub mod categories;
pub mod create_category;
pub mod create_post;
pub mod home;
pub mod post;
