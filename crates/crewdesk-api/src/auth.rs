use crate::client::ApiClient;
use crewdesk_core::{Credentials, CrewdeskError, CrewdeskResult};
use serde_json::Value;

/// Message raised when a 2xx login response carries no token.
pub const INVALID_LOGIN_RESPONSE: &str = "invalid login response received from server";

/// A successful login: the bearer token and the user profile record.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user's profile, as the server shapes it.
    pub user: Value,
}

/// Authentication endpoints.
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Creates the auth façade over `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST `/login`.
    ///
    /// A response that parses but lacks a token is a contract violation, not
    /// a transport failure: the call fails with [`INVALID_LOGIN_RESPONSE`]
    /// even though the HTTP exchange itself succeeded.
    pub async fn login(&self, credentials: &Credentials) -> CrewdeskResult<LoginSuccess> {
        let body = serde_json::to_value(credentials)?;
        let data: Option<Value> = self.client.post("/login", Some(&body)).await?;
        let data = data.unwrap_or(Value::Null);

        let token = data
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty());

        match token {
            Some(token) => Ok(LoginSuccess {
                token: token.to_string(),
                user: data.get("user").cloned().unwrap_or(Value::Null),
            }),
            None => Err(CrewdeskError::Contract(INVALID_LOGIN_RESPONSE.to_string())),
        }
    }

    /// POST `/logout`. Token revocation on the server side; the caller owns
    /// local teardown.
    pub async fn logout(&self) -> CrewdeskResult<()> {
        self.client.post::<Value>("/logout", None).await?;
        Ok(())
    }
}
