use super::{GatewayClient, GatewayRequest};
use crate::{
    common::user::{AuthUserResponse, SessionUser},
    frontend::utils::errors::FrontendResult,
};
use http::Method;

/// Only sign in provider offered in the UI.
pub const OAUTH_PROVIDER: &str = "google";

impl GatewayClient {
    /// Where to send the browser to start the OAuth flow. The auth service redirects back
    /// to `redirect_to` with the tokens in the url fragment.
    pub fn sign_in_url(&self, redirect_to: &str) -> FrontendResult<String> {
        let req = GatewayRequest::new(Method::GET, &["auth", "v1", "authorize"])
            .query("provider", OAUTH_PROVIDER)
            .query("redirect_to", redirect_to);
        Ok(self.request_url(&req.segments, &req.query)?.to_string())
    }

    /// The account behind an access token. Fails if the token expired or was revoked.
    pub async fn current_user(&self, access_token: &str) -> FrontendResult<SessionUser> {
        let req = GatewayRequest::new(Method::GET, &["auth", "v1", "user"]).token(access_token);
        let res: AuthUserResponse = self.get(req).await?;
        Ok(res.into_session(access_token.to_string()))
    }

    pub async fn sign_out(&self, user: &SessionUser) -> FrontendResult<()> {
        let req = GatewayRequest::new(Method::POST, &["auth", "v1", "logout"]).user(user);
        self.execute(req).await
    }
}

/// Extract the access token from the fragment of the OAuth callback url, e.g.
/// `#access_token=...&expires_in=3600&refresh_token=...&token_type=bearer`.
pub fn access_token_from_fragment(fragment: &str) -> Option<String> {
    let fragment = fragment.trim_start_matches('#');
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frontend::{api::test::client, utils::errors::FrontendResult};

    #[test]
    fn test_sign_in_url() -> FrontendResult<()> {
        assert_eq!(
            "https://resep.supabase.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback",
            client().sign_in_url("http://localhost:3000/auth/callback")?
        );
        Ok(())
    }

    #[test]
    fn test_access_token_from_fragment() {
        assert_eq!(
            Some("abc.def".to_string()),
            access_token_from_fragment("#access_token=abc.def&expires_in=3600&token_type=bearer")
        );
        assert_eq!(None, access_token_from_fragment("#error=access_denied"));
        assert_eq!(None, access_token_from_fragment("access_token="));
        assert_eq!(None, access_token_from_fragment(""));
    }
}
