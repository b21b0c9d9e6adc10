use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::codec::WireModel;
use crate::error::DecodeError;

const ENTITY: &str = "Notification";

/// Alert routing for one contact or group on a check.
///
/// The API hands these back as loosely typed maps. Decoding insists on a
/// numeric `delay` and a textual `schedule`; anything else is a
/// [`DecodeError`], never a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub delay: i64,
    #[serde(skip_serializing_if = "super::is_blank")]
    pub schedule: Option<String>,
}

impl Notification {
    pub fn new(delay: i64) -> Self {
        Self {
            delay,
            schedule: None,
        }
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }

    /// Decode from an untyped JSON value.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let map = value.as_object().ok_or(DecodeError::InvalidField {
            entity: ENTITY,
            field: "(root)",
            expected: "object",
        })?;

        let delay = map.get("delay").ok_or(DecodeError::MissingField {
            entity: ENTITY,
            field: "delay",
        })?;
        // JSON numbers arrive as floats from some endpoints; fractions are truncated.
        // Values outside the i64 range are rejected rather than saturated.
        let delay = delay
            .as_i64()
            .or_else(|| {
                delay
                    .as_f64()
                    .filter(|d| d.is_finite() && *d >= i64::MIN as f64 && *d < i64::MAX as f64)
                    .map(|d| d.trunc() as i64)
            })
            .ok_or(DecodeError::InvalidField {
                entity: ENTITY,
                field: "delay",
                expected: "number",
            })?;

        let schedule = map.get("schedule").ok_or(DecodeError::MissingField {
            entity: ENTITY,
            field: "schedule",
        })?;
        let schedule = schedule.as_str().ok_or(DecodeError::InvalidField {
            entity: ENTITY,
            field: "schedule",
            expected: "string",
        })?;

        Ok(Self {
            delay,
            schedule: Some(schedule.to_string()),
        })
    }
}

impl<'de> Deserialize<'de> for Notification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl WireModel for Notification {
    const ENTITY: &'static str = ENTITY;

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }
}
