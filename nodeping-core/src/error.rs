//! Codec error types.
//!
//! Decoding failures are always surfaced to the caller as a typed error;
//! nothing in this crate panics on malformed remote input.

use thiserror::Error;

/// Errors raised while turning a remote payload into a domain value.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("{entity}: required field '{field}' is missing")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity}: field '{field}' has the wrong type, expected {expected}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Customer: response reports no default location")]
    NoLocation,

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while serializing a domain value.
///
/// Every model is statically typed, so this only fires when an upstream
/// invariant was broken (e.g. a non-string map key slipped into a free-form
/// parameter map).
#[derive(Error, Debug)]
#[error("Failed to encode {entity}: {source}")]
pub struct EncodeError {
    pub entity: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Umbrella error for the codec entry points.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

pub type CodecResult<T> = Result<T, CodecError>;
