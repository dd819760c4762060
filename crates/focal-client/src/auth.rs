use reqwest::Method;

use focal_types::api::{AuthSession, LoginRequest, LoginToken, RegisterRequest};
use focal_types::error::ApiError;

use crate::ApiClient;

impl ApiClient {
    /// `POST /api/auth/register`. Stores the returned token on success so the
    /// new account is immediately authenticated.
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthSession, ApiError> {
        let session: AuthSession = self
            .send(self.request(Method::POST, "/api/auth/register").json(req))
            .await?;
        self.set_token(session.token.clone());
        Ok(session)
    }

    /// `POST /api/auth/login`. Stores the returned token on success.
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginToken, ApiError> {
        let token: LoginToken = self
            .send(self.request(Method::POST, "/api/auth/login").json(req))
            .await?;
        self.set_token(token.token.clone());
        Ok(token)
    }

    /// Local logout: the server keeps no session state beyond the token.
    pub fn logout(&self) {
        self.clear_token();
    }
}
