use reqwest::StatusCode;

/// Errors returned by the [`RelayClient`].
///
/// [`RelayClient`]: crate::RelayClient
#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    /// The relay answered with a non-200 status.
    #[error("relay returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },
    /// The relay answered with a JSON-RPC error object.
    #[error("relay error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },
    /// A successful response lacked a required field.
    #[error("relay response missing {0}")]
    MissingField(&'static str),
    /// A numeric field could not be parsed.
    #[error("relay returned invalid quantity for {field}: {value}")]
    InvalidQuantity {
        /// The offending field.
        field: &'static str,
        /// The raw value.
        value: String,
    },
    /// The response body was not the expected JSON.
    #[error("failed to parse relay response: {0}")]
    Json(#[from] serde_json::Error),
    /// An error occurred while parsing the URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),
    /// Failed to sign the request body.
    #[error("failed to sign relay request: {0}")]
    Signing(#[from] alloy::signers::Error),
    /// An error occurred while contacting the relay.
    #[error("error contacting relay: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RelayError::Status { status, body: err.to_string() },
            None => RelayError::Transport(err),
        }
    }
}

impl RelayError {
    /// True for failures to reach the relay or non-200 answers. Everything
    /// else is a protocol error: the relay answered, but not usefully.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// True if the error came from signing the request.
    pub const fn is_signing(&self) -> bool {
        matches!(self, Self::Signing(_))
    }
}
