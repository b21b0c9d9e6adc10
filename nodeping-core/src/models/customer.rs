use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::millis_to_datetime;
use crate::codec::{CreateForm, WireModel};
use crate::error::DecodeError;

/// A NodePing customer (account or sub-account).
///
/// Reads report a list of default probe locations under `defaultlocations`;
/// this model keeps only the first one as `location`. The mapping is lossy on
/// purpose: the creation endpoint takes a single location, and there is no
/// way to tell which of several the caller would want.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Customer {
    #[serde(rename = "_id", skip_serializing_if = "super::is_blank")]
    pub id: Option<String>,
    #[serde(rename = "customer_name", skip_serializing_if = "super::is_blank")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "super::is_blank")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "super::is_blank")]
    pub parent: Option<String>,
    pub contact_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<i64>,
    pub status: String,
    pub emailme: bool,
    pub timezone: String,
    pub location: String,
}

/// Customer as the read endpoints report it.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CustomerRecord {
    #[serde(rename = "_id")]
    id: Option<String>,
    customer_name: Option<String>,
    email: Option<String>,
    parent: Option<String>,
    contact_name: String,
    creation_date: Option<i64>,
    status: String,
    emailme: bool,
    timezone: String,
    defaultlocations: Vec<String>,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = DecodeError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        let location = record
            .defaultlocations
            .into_iter()
            .next()
            .ok_or(DecodeError::NoLocation)?;

        Ok(Self {
            id: record.id,
            name: record.customer_name,
            email: record.email,
            parent: record.parent,
            contact_name: record.contact_name,
            creation_date: record.creation_date,
            status: record.status,
            emailme: record.emailme,
            timezone: record.timezone,
            location,
        })
    }
}

impl<'de> Deserialize<'de> for Customer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = CustomerRecord::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}

/// Body accepted by the customer creation endpoint.
///
/// `emailme` is a `"yes"`/`"no"` token here, while reads report a boolean.
#[derive(Debug, Serialize)]
pub struct CustomerCreate<'a> {
    pub name: &'a str,
    #[serde(rename = "contactname")]
    pub contact_name: &'a str,
    pub email: &'a str,
    pub timezone: &'a str,
    pub location: &'a str,
    pub emailme: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub status: &'a str,
}

impl Customer {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.creation_date.and_then(millis_to_datetime)
    }

    fn emailme_token(&self) -> &'static str {
        if self.emailme {
            "yes"
        } else {
            "no"
        }
    }
}

impl WireModel for Customer {
    const ENTITY: &'static str = "Customer";

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let record: CustomerRecord = serde_json::from_slice(bytes)?;
        Self::try_from(record)
    }
}

impl CreateForm for Customer {
    type Create<'a> = CustomerCreate<'a>;

    fn create_form(&self) -> CustomerCreate<'_> {
        CustomerCreate {
            name: self.name.as_deref().unwrap_or_default(),
            contact_name: &self.contact_name,
            email: self.email.as_deref().unwrap_or_default(),
            timezone: &self.timezone,
            location: &self.location,
            emailme: self.emailme_token(),
            status: &self.status,
        }
    }
}
