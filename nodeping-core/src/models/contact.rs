use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::address::Address;
use super::is_empty_slice;
use crate::codec::{CreateForm, WireModel};

/// A NodePing contact and its notification addresses.
///
/// Addresses that already exist remotely live in `addresses`, keyed by their
/// remote id; newly declared ones live in `new_addresses`. The keyed map is
/// always serialized: an empty map tells the API to drop every address that
/// is not being resent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    #[serde(rename = "_id", default, skip_serializing_if = "super::is_blank")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "super::is_blank")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub custrole: Option<String>,
    #[serde(default)]
    pub addresses: BTreeMap<String, Address>,
    #[serde(
        rename = "newaddresses",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub new_addresses: Vec<Address>,
}

/// Body accepted by the contact creation endpoint.
///
/// The endpoint rejects `addresses` outright and has no use for the id.
#[derive(Debug, Serialize)]
pub struct ContactCreate<'a> {
    #[serde(rename = "customerid", skip_serializing_if = "super::is_blank_str")]
    pub customer_id: Option<&'a str>,
    #[serde(skip_serializing_if = "super::is_blank_str")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "super::is_blank_str")]
    pub custrole: Option<&'a str>,
    #[serde(rename = "newaddresses", skip_serializing_if = "is_empty_slice")]
    pub new_addresses: &'a [Address],
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_custrole(mut self, custrole: impl Into<String>) -> Self {
        self.custrole = Some(custrole.into());
        self
    }

    /// Total number of addresses, keyed and new.
    pub fn address_count(&self) -> usize {
        self.addresses.len() + self.new_addresses.len()
    }
}

impl WireModel for Contact {
    const ENTITY: &'static str = "Contact";
}

impl CreateForm for Contact {
    type Create<'a> = ContactCreate<'a>;

    fn create_form(&self) -> ContactCreate<'_> {
        ContactCreate {
            customer_id: self.customer_id.as_deref(),
            name: self.name.as_deref(),
            custrole: self.custrole.as_deref(),
            new_addresses: &self.new_addresses,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("(unnamed)");
        writeln!(f, "{}", name)?;
        writeln!(f, "{}", "=".repeat(name.len()))?;

        if let Some(id) = &self.id {
            writeln!(f, "ID: {}", id)?;
        }
        if let Some(role) = &self.custrole {
            writeln!(f, "Role: {}", role)?;
        }

        if self.address_count() > 0 {
            writeln!(f, "\nAddresses:")?;
            for address in self.addresses.values() {
                writeln!(f, "  - {}", address)?;
            }
            for address in &self.new_addresses {
                writeln!(f, "  + {}", address)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{create_payload, decode, encode, general_payload, Operation};
    use serde_json::json;

    fn sample_contact() -> Contact {
        let mut contact = Contact::new("On-call")
            .with_id("201205050153W2Q4C-BKI")
            .with_customer_id("201205050153W2Q4C")
            .with_custrole("notify");
        contact.addresses.insert(
            "K5Z3D".to_string(),
            Address::new("ops@example.com", "email").with_id("K5Z3D"),
        );
        contact
            .new_addresses
            .push(Address::new("+15551234", "sms"));
        contact
    }

    #[test]
    fn test_create_form_never_has_keyed_addresses() {
        let contact = sample_contact();
        let value = create_payload(&contact).unwrap();

        assert!(value.get("addresses").is_none());
        assert!(value.get("_id").is_none());
        assert!(value.get("customer_id").is_none());
        assert_eq!(value["customerid"], "201205050153W2Q4C");
        assert_eq!(value["name"], "On-call");
        assert_eq!(value["custrole"], "notify");
        assert_eq!(value["newaddresses"][0]["address"], "+15551234");
    }

    #[test]
    fn test_create_form_omits_empty_new_addresses() {
        let contact = Contact::new("Nobody");
        let value = create_payload(&contact).unwrap();

        assert_eq!(value, json!({"name": "Nobody"}));
    }

    #[test]
    fn test_general_form_always_has_addresses() {
        let contact = Contact::new("Empty").with_id("C1");
        let value = general_payload(&contact).unwrap();

        assert_eq!(value["addresses"], json!({}));
        assert!(value.get("newaddresses").is_none());
        assert_eq!(value["_id"], "C1");
    }

    #[test]
    fn test_general_form_uses_read_side_names() {
        let value = general_payload(&sample_contact()).unwrap();

        assert_eq!(value["customer_id"], "201205050153W2Q4C");
        assert!(value.get("customerid").is_none());
        assert_eq!(value["addresses"]["K5Z3D"]["address"], "ops@example.com");
        assert_eq!(value["newaddresses"][0]["type"], "sms");
    }

    #[test]
    fn test_general_roundtrip() {
        let contact = sample_contact();
        let bytes = encode(&contact, Operation::General).unwrap();
        let parsed: Contact = decode(&bytes).unwrap();

        assert_eq!(parsed, contact);
    }

    #[test]
    fn test_decode_read_response() {
        let body = json!({
            "_id": "201205050153W2Q4C-BKI",
            "type": "contact",
            "customer_id": "201205050153W2Q4C",
            "name": "On-call",
            "custrole": "owner",
            "addresses": {
                "K5Z3D": {"address": "ops@example.com", "type": "email", "suppressall": true}
            }
        });
        let contact: Contact = decode(body.to_string().as_bytes()).unwrap();

        assert_eq!(contact.kind.as_deref(), Some("contact"));
        assert!(contact.addresses["K5Z3D"].suppressall);
        assert!(contact.new_addresses.is_empty());
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let result = decode::<Contact>(br#"{"name": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_contact_display() {
        let output = format!("{}", sample_contact());
        assert!(output.contains("On-call"));
        assert!(output.contains("Role: notify"));
        assert!(output.contains("  - ops@example.com (email) [K5Z3D]"));
        assert!(output.contains("  + +15551234 (sms)"));
    }
}
