pub mod auth_prompt;
pub mod comment;
pub mod comment_editor;
pub mod comment_section;
pub mod confirm_dialog;
pub mod error_popup;
pub mod like_button;
pub mod nav;
pub mod post_card;
pub mod suspense_error;
