use serde_json::Value;

/// The authenticated session: bearer token plus user profile.
///
/// Both fields are set together on login and cleared together on logout.
/// The token is what authorizes outbound requests; the user profile is
/// display-only.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Opaque bearer token, absent when anonymous.
    pub token: Option<String>,
    /// The authenticated user's profile record, absent when anonymous.
    pub user: Option<Value>,
}

impl Session {
    /// An authenticated session from a login response.
    pub fn authenticated(token: impl Into<String>, user: Value) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// True when a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_session_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user.is_none());
    }

    #[test]
    fn test_authenticated_iff_token_present() {
        let session = Session::authenticated("T1", json!({"id": 1}));
        assert!(session.is_authenticated());

        let token_only = Session {
            token: Some("T1".to_string()),
            user: None,
        };
        assert!(token_only.is_authenticated());

        let user_only = Session {
            token: None,
            user: Some(json!({"id": 1})),
        };
        assert!(!user_only.is_authenticated());
    }
}
