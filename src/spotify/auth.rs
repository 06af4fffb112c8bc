use crate::{
    config::Credentials,
    error::{Error, Result},
    types::{AccessToken, TokenResponse},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Exchanges a refresh token for a new access token.
    ///
    /// Sends a `refresh_token` grant to the token endpoint, authenticating the
    /// application with HTTP basic auth built from the client id and secret.
    /// Only the access token is kept; a rotated refresh token in the response
    /// is ignored because nothing is persisted between runs.
    ///
    /// # Error Conditions
    ///
    /// Every failure is reported as [`Error::Auth`]:
    /// - Network connectivity issues
    /// - Non-success status (invalid client or revoked refresh token)
    /// - Malformed response data
    /// - Response without an `access_token`
    ///
    /// # Example
    ///
    /// ```
    /// let token = client.refresh_token(&config.credentials).await?;
    /// ```
    pub async fn refresh_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        let response = self
            .client
            .post(&self.endpoints.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Auth(format!(
                "token endpoint returned {}: {}",
                status,
                body.trim()
            )));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Auth(e.to_string()))?;

        match token.access_token {
            Some(access_token) if !access_token.is_empty() => Ok(AccessToken::new(access_token)),
            _ => Err(Error::Auth("response has no access_token".to_string())),
        }
    }
}
