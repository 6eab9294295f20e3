use crate::frontend::{api::GatewayClient, session::Session};
use leptos::prelude::*;

pub fn client() -> GatewayClient {
    expect_context::<GatewayClient>()
}

pub fn session() -> Session {
    expect_context::<Session>()
}

pub fn is_logged_in() -> bool {
    session().is_logged_in()
}

/// Shows a message in the global error popup.
pub fn show_error(message: impl Into<String>) {
    if let Some(error_popup) = use_context::<WriteSignal<Option<String>>>() {
        error_popup.set(Some(message.into()));
    }
}
