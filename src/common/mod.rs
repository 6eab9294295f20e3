pub mod category;
pub mod comment;
pub mod newtypes;
pub mod post;
pub mod user;
pub mod validation;
pub mod vote;

/// Cookie holding the access token of the signed in user.
pub static SESSION_COOKIE: &str = "resep_session";

/// Storage bucket for recipe images, unless overridden in the config.
pub static DEFAULT_IMAGE_BUCKET: &str = "post-images";
