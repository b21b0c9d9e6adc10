use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single notification destination attached to a contact.
///
/// `id` is assigned by NodePing once the address exists remotely. An address
/// without one (or with an empty one) is newly declared and has to be sent
/// through `newaddresses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub id: Option<String>,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub suppressup: bool,
    #[serde(default)]
    pub suppressdown: bool,
    #[serde(default)]
    pub suppressfirst: bool,
    #[serde(default)]
    pub suppressall: bool,

    // webhook destinations
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub querystrings: BTreeMap<String, String>,

    // pushover destinations; always sent, zero when irrelevant
    #[serde(default)]
    pub priority: i64,
}

impl Address {
    pub fn new(address: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_querystring(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.querystrings.insert(key.into(), value.into());
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// The remote identifier, if the address already exists on NodePing.
    ///
    /// An empty string counts as "no identifier": hosts commonly hand over
    /// computed-but-unknown ids that way.
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_identified(&self) -> bool {
        self.identifier().is_some()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.kind)?;
        if let Some(id) = self.identifier() {
            write!(f, " [{}]", id)?;
        }
        Ok(())
    }
}
