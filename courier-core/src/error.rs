use thiserror::Error;

/// A request omitted a required field or carried unusable parameters.
///
/// The `Display` text is what clients see in the `error` field of a 400 response.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Recipient is required")]
    MissingRecipient,

    #[error("Sender username is required")]
    MissingSender,

    #[error("Invalid pagination parameters")]
    InvalidPagination,
}

pub type Result<T> = std::result::Result<T, ValidationError>;
