//! Wire codec for NodePing entities.
//!
//! Every model has a general representation (its `Serialize` impl, used for
//! reads and updates). Contacts, schedules, groups and customers additionally
//! have a narrower create representation, produced by a separate view type so
//! the two shapes never share field-suppression logic.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::{DecodeError, EncodeError};

/// Which endpoint a payload is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    /// POST to the creation endpoint.
    Create,
    /// PUT to the update endpoint, or the shape returned by reads.
    #[default]
    General,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::General => write!(f, "general"),
        }
    }
}

/// A value exchanged with the NodePing API.
pub trait WireModel: Serialize + DeserializeOwned {
    /// Name used in error messages.
    const ENTITY: &'static str;

    /// Decode a remote payload.
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Entities whose creation endpoint accepts a different shape.
pub trait CreateForm: WireModel {
    type Create<'a>: Serialize
    where
        Self: 'a;

    fn create_form(&self) -> Self::Create<'_>;
}

/// General representation as a JSON value.
pub fn general_payload<T: WireModel>(entity: &T) -> Result<Value, EncodeError> {
    serde_json::to_value(entity).map_err(|source| EncodeError {
        entity: T::ENTITY,
        source,
    })
}

/// Create representation as a JSON value.
pub fn create_payload<T: CreateForm>(entity: &T) -> Result<Value, EncodeError> {
    serde_json::to_value(entity.create_form()).map_err(|source| EncodeError {
        entity: T::ENTITY,
        source,
    })
}

/// Payload for the given operation.
pub fn payload<T: CreateForm>(entity: &T, op: Operation) -> Result<Value, EncodeError> {
    match op {
        Operation::Create => create_payload(entity),
        Operation::General => general_payload(entity),
    }
}

/// Serialized request body for the given operation.
pub fn encode<T: CreateForm>(entity: &T, op: Operation) -> Result<Vec<u8>, EncodeError> {
    let value = payload(entity, op)?;
    serde_json::to_vec(&value).map_err(|source| EncodeError {
        entity: T::ENTITY,
        source,
    })
}

/// Decode a response body into a model.
pub fn decode<T: WireModel>(bytes: &[u8]) -> Result<T, DecodeError> {
    let entity = T::decode(bytes)?;
    tracing::trace!(entity = T::ENTITY, len = bytes.len(), "decoded payload");
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "create");
        assert_eq!(Operation::General.to_string(), "general");
    }
}
