/// Client for the managed auth service.
///
/// The API never owns sessions. Handlers receive the browser's access token
/// and this client asks the auth service who it belongs to
/// (`GET /auth/v1/user`). An invalid or expired token surfaces as an `Api`
/// error carrying the upstream status; the service layer maps that to 401.
use serde::Deserialize;

use crate::error::{api_error, CommonError};

/// The authenticated user behind an access token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct AuthClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl AuthClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("wardrobe-api")
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    /// Resolve an access token to the user it belongs to.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, CommonError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(resp.json::<AuthUser>().await?)
    }
}
