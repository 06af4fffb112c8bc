//! Error types shared by the Spotify client, configuration and the sync driver.
//!
//! Every remote call fails with one of three kinds: a transport failure
//! (network error or non-success HTTP status), a decode failure (the body does
//! not have the expected shape) or an authentication failure (anything that
//! goes wrong during the refresh-token exchange). Configuration problems are
//! reported before any request is made.

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable {var}")]
    Config { var: &'static str },

    /// The local `.env.local` file exists but could not be loaded.
    #[error("cannot load environment file: {0}")]
    Env(String),

    /// The refresh-token exchange failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Connection failure or non-success status on an API call.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("unexpected response for {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn decode(context: &'static str, source: serde_json::Error) -> Self {
        Error::Decode { context, source }
    }
}
