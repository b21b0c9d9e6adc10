//! Closed types for check fields the API reports with varying JSON shapes.
//!
//! `homeloc`, `runlocations`, `queue` and `state` change type depending on the
//! check and the endpoint. Each is decoded into a small union; any other shape
//! becomes a [`DecodeError::InvalidField`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

fn invalid(field: &'static str, expected: &'static str) -> DecodeError {
    DecodeError::InvalidField {
        entity: "Check",
        field,
        expected,
    }
}

/// Preferred probe location: `false` (none), or a region/location name such
/// as `"nam"` or `"roam"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HomeLoc {
    Flag(bool),
    Location(String),
}

impl HomeLoc {
    pub fn location(&self) -> Option<&str> {
        match self {
            HomeLoc::Location(loc) => Some(loc),
            HomeLoc::Flag(_) => None,
        }
    }
}

impl TryFrom<Value> for HomeLoc {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(flag) => Ok(HomeLoc::Flag(flag)),
            Value::String(loc) => Ok(HomeLoc::Location(loc)),
            _ => Err(invalid("homeloc", "boolean or string")),
        }
    }
}

impl<'de> Deserialize<'de> for HomeLoc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::try_from(Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

/// Where a check runs: one region or an explicit list of locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RunLocations {
    Region(String),
    List(Vec<String>),
}

impl RunLocations {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            RunLocations::Region(region) => vec![region.clone()],
            RunLocations::List(list) => list.clone(),
        }
    }
}

impl TryFrom<Value> for RunLocations {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(region) => Ok(RunLocations::Region(region)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(loc) => Ok(loc),
                    _ => Err(invalid("runlocations", "string or list of strings")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RunLocations::List),
            _ => Err(invalid("runlocations", "string or list of strings")),
        }
    }
}

impl<'de> Deserialize<'de> for RunLocations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::try_from(Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

/// Scheduler queue the check currently sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Queue {
    Id(String),
    Position(i64),
}

impl TryFrom<Value> for Queue {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(id) => Ok(Queue::Id(id)),
            Value::Number(n) => n
                .as_i64()
                .map(Queue::Position)
                .ok_or_else(|| invalid("queue", "string or integer")),
            _ => Err(invalid("queue", "string or integer")),
        }
    }
}

impl<'de> Deserialize<'de> for Queue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::try_from(Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

/// Last observed check state: a numeric code (1 up, 0 down) or a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CheckState {
    Code(i64),
    Label(String),
}

impl CheckState {
    pub fn is_up(&self) -> bool {
        match self {
            CheckState::Code(code) => *code == 1,
            CheckState::Label(label) => label.eq_ignore_ascii_case("up"),
        }
    }
}

impl TryFrom<Value> for CheckState {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(CheckState::Code)
                .ok_or_else(|| invalid("state", "integer or string")),
            Value::String(label) => Ok(CheckState::Label(label)),
            _ => Err(invalid("state", "integer or string")),
        }
    }
}

impl<'de> Deserialize<'de> for CheckState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::try_from(Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}
