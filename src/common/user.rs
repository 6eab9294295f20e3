use super::newtypes::UserId;
use serde::{Deserialize, Serialize};

/// The signed in account, as reported by the auth service for the current access token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub avatar_url: Option<String>,
    #[serde(skip)]
    pub access_token: String,
}

impl SessionUser {
    /// Name stored with comments written by this user.
    pub fn display_name(&self) -> &str {
        &self.email
    }
}

/// Response body of `GET /auth/v1/user`.
#[derive(Deserialize, Debug)]
pub struct AuthUserResponse {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Deserialize, Debug, Default)]
pub struct UserMetadata {
    pub avatar_url: Option<String>,
    pub full_name: Option<String>,
}

impl AuthUserResponse {
    pub fn into_session(self, access_token: String) -> SessionUser {
        let email = self
            .email
            .or(self.user_metadata.full_name)
            .unwrap_or_else(|| self.id.to_string());
        SessionUser {
            id: self.id,
            email,
            avatar_url: self.user_metadata.avatar_url,
            access_token,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_session_from_auth_response() -> Result<(), serde_json::Error> {
        let json = r#"{
            "id": "6f1c2f9e-1a52-4d2e-9d0a-0d6f6b3f7c11",
            "email": "chef@example.com",
            "user_metadata": {"avatar_url": "https://example.com/a.png", "full_name": "Chef"}
        }"#;
        let res: AuthUserResponse = serde_json::from_str(json)?;
        let user = res.into_session("token".to_string());
        assert_eq!("chef@example.com", user.display_name());
        assert_eq!(Some("https://example.com/a.png"), user.avatar_url.as_deref());
        assert_eq!("token", user.access_token);

        let json = r#"{"id": "6f1c2f9e-1a52-4d2e-9d0a-0d6f6b3f7c11", "user_metadata": {}}"#;
        let res: AuthUserResponse = serde_json::from_str(json)?;
        let user = res.into_session(String::new());
        assert_eq!("6f1c2f9e-1a52-4d2e-9d0a-0d6f6b3f7c11", user.email);
        Ok(())
    }
}
