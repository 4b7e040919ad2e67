//! Error types
//!
//! Only contract violations surface as errors. Missing or malformed page data
//! is handled inside the resolvers and turns into `None` fields.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unknown site {0:?}")]
    UnknownSite(String),

    #[error("malformed JSON-LD block: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("invalid extraction request: {0}")]
    InvalidRequest(String),
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
