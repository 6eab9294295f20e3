use crate::{
    common::{user::SessionUser, SESSION_COOKIE},
    frontend::{
        api::GatewayClient,
        utils::{errors::FrontendResultExt, use_cookie},
    },
};
use leptos::{prelude::*, task::spawn_local};
use log::{info, warn};

/// Page the auth service sends the browser back to after signing in.
pub const AUTH_CALLBACK_PATH: &str = "/auth/callback";

/// Who is signed in, shared with every page through context.
///
/// The access token lives in a cookie. Whenever it changes the matching user is loaded
/// from the auth service, and an invalid or expired token is dropped again.
#[derive(Clone, Copy)]
pub struct Session {
    user: RwSignal<Option<SessionUser>>,
    token: Signal<Option<String>>,
    set_token: WriteSignal<Option<String>>,
    auth_prompt: RwSignal<bool>,
    client: StoredValue<GatewayClient>,
}

impl Session {
    pub fn init(client: GatewayClient) -> Self {
        let (token, set_token) = use_cookie::<String>(SESSION_COOKIE);
        let session = Self {
            user: RwSignal::new(None),
            token,
            set_token,
            auth_prompt: RwSignal::new(false),
            client: StoredValue::new(client),
        };
        Effect::new(move |_| session.load_user(session.token.get()));
        session
    }

    fn load_user(&self, token: Option<String>) {
        let Some(token) = token else {
            self.user.set(None);
            return;
        };
        let user = self.user;
        let set_token = self.set_token;
        let client = self.client.get_value();
        spawn_local(async move {
            match client.current_user(&token).await {
                Ok(u) => user.set(Some(u)),
                Err(e) => {
                    info!("Dropping session token: {e}");
                    user.set(None);
                    set_token.set(None);
                }
            }
        });
    }

    /// Tracked.
    pub fn user(&self) -> Option<SessionUser> {
        self.user.get()
    }

    pub fn user_untracked(&self) -> Option<SessionUser> {
        self.user.get_untracked()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.with(Option::is_some)
    }

    /// Send the browser to the OAuth provider. It returns to [AUTH_CALLBACK_PATH].
    pub fn sign_in(&self) {
        let origin = location().origin().unwrap_or_default();
        let redirect_to = format!("{origin}{AUTH_CALLBACK_PATH}");
        self.client
            .with_value(|c| c.sign_in_url(&redirect_to))
            .error_popup(|url| {
                if let Err(e) = window().location().set_href(&url) {
                    warn!("Failed to open sign in page: {e:?}");
                }
            });
    }

    /// Store the token handed back by the auth service.
    pub fn complete_sign_in(&self, access_token: String) {
        self.set_token.set(Some(access_token));
    }

    pub fn sign_out(&self) {
        let user = self.user.get_untracked();
        self.set_token.set(None);
        self.user.set(None);
        let Some(user) = user else {
            return;
        };
        let client = self.client.get_value();
        spawn_local(async move {
            // the local session is gone either way
            if let Err(e) = client.sign_out(&user).await {
                warn!("Failed to revoke session: {e}");
            }
        });
    }

    /// Ask the user to sign in before continuing.
    pub fn prompt_sign_in(&self) {
        self.auth_prompt.set(true);
    }

    pub fn is_prompt_open(&self) -> bool {
        self.auth_prompt.get()
    }

    pub fn dismiss_prompt(&self) {
        self.auth_prompt.set(false);
    }
}
