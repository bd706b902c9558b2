use thiserror::Error;

/// Errors raised while talking to the partner ordering API
///
/// Status-classified variants keep the raw upstream body for diagnostics; it is
/// never part of the `Display` message shown to end users.
#[derive(Error, Debug)]
pub enum PartnerError {
    /// Every ingredient was filtered out before the request was built
    #[error("No valid ingredients to send: every line had an empty name, empty unit or non-positive amount")]
    EmptyIngredientList,

    /// 401 from the partner
    #[error("Not authorized with the grocery partner: API key invalid")]
    Auth { body: String },

    /// 400 from the partner
    #[error("The grocery partner rejected the request: malformed ingredient payload")]
    BadRequest { body: String },

    /// 404 from the partner
    #[error("Grocery partner endpoint not found: integration misconfigured")]
    Endpoint { body: String },

    /// 422 from the partner
    #[error("The grocery partner could not match these ingredients")]
    Unprocessable { body: String },

    /// 5xx from the partner, or the request timed out
    #[error("The grocery partner is unavailable, try again later")]
    Upstream { status: Option<u16>, body: String },

    /// Any other non-2xx status
    #[error("Grocery partner returned unexpected status {status}")]
    Status { status: u16, body: String },

    /// Connection-level failure before a status was received
    #[error("Failed to reach the grocery partner: {0}")]
    Transport(#[source] reqwest::Error),

    /// 2xx response without a usable link
    #[error("Grocery partner response was not understood: {0}")]
    InvalidResponse(String),

    /// No API key in configuration or environment
    #[error("Grocery partner API key not found in config or INSTACART_API_KEY")]
    MissingApiKey,
}

impl PartnerError {
    /// Raw upstream response text, when the partner sent one
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            PartnerError::Auth { body }
            | PartnerError::BadRequest { body }
            | PartnerError::Endpoint { body }
            | PartnerError::Unprocessable { body }
            | PartnerError::Upstream { body, .. }
            | PartnerError::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// HTTP status behind this error, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            PartnerError::Auth { .. } => Some(401),
            PartnerError::BadRequest { .. } => Some(400),
            PartnerError::Endpoint { .. } => Some(404),
            PartnerError::Unprocessable { .. } => Some(422),
            PartnerError::Upstream { status, .. } => *status,
            PartnerError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a later, caller-driven retry could succeed. The client never retries itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PartnerError::Upstream { .. } | PartnerError::Transport(_))
    }
}

impl From<reqwest::Error> for PartnerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PartnerError::Upstream {
                status: None,
                body: err.to_string(),
            }
        } else {
            PartnerError::Transport(err)
        }
    }
}

/// Errors surfaced by the shopping list builder and the CLI
#[derive(Error, Debug)]
pub enum GroceryError {
    /// Partner call failed
    #[error(transparent)]
    Partner(#[from] PartnerError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read a meal plan file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Meal plan JSON could not be parsed
    #[error("Invalid meal plan JSON: {0}")]
    Json(#[from] serde_json::Error),
}
