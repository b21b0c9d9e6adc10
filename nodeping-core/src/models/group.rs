use serde::{Deserialize, Serialize};

use crate::codec::{CreateForm, WireModel};

/// A contact group. `name` and `members` are always sent, even when empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    #[serde(rename = "_id", default, skip_serializing_if = "super::is_blank")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GroupCreate<'a> {
    #[serde(rename = "customerid", skip_serializing_if = "super::is_blank_str")]
    pub customer_id: Option<&'a str>,
    pub name: &'a str,
    pub members: &'a [String],
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }
}

impl WireModel for Group {
    const ENTITY: &'static str = "Group";
}

impl CreateForm for Group {
    type Create<'a> = GroupCreate<'a>;

    fn create_form(&self) -> GroupCreate<'_> {
        GroupCreate {
            customer_id: self.customer_id.as_deref(),
            name: &self.name,
            members: &self.members,
        }
    }
}
