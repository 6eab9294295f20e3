pub mod api;
pub mod app;
pub mod components;
pub mod pages;
pub mod query;
pub mod session;
pub mod thread;
pub mod utils;
