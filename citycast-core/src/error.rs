use thiserror::Error;

/// Why a call to the weather provider produced nothing usable.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to reach {endpoint}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status { endpoint: &'static str, status: reqwest::StatusCode, body: String },

    #[error("failed to parse {endpoint} JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
