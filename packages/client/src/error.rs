use lsw_address::AddressError;
use lsw_app::TransportError;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

impl From<ClientError> for TransportError {
    fn from(error: ClientError) -> Self {
        TransportError::new(error.to_string())
    }
}
