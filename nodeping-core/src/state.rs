//! Flat, host-facing representations of entities.
//!
//! A configuration host declares a contact with a single list of addresses
//! and a customer with a plain `location`. These types are that shape; the
//! conversions to and from the domain models run the reconciler and the
//! flattener.

use serde::{Deserialize, Serialize};

use crate::models::{non_blank, Address, Contact, Customer};
use crate::reconcile::{flatten_addresses, reconcile_addresses};

/// Desired or observed state of a contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custrole: Option<String>,
    pub addresses: Vec<Address>,
}

impl ContactState {
    /// Build the contact to send, splitting addresses by remote identity.
    pub fn to_contact(&self) -> Contact {
        let split = reconcile_addresses(self.addresses.iter().cloned());
        Contact {
            id: non_blank(self.id.clone()),
            kind: None,
            customer_id: non_blank(self.customer_id.clone()),
            name: non_blank(self.name.clone()),
            custrole: non_blank(self.custrole.clone()),
            addresses: split.existing,
            new_addresses: split.new,
        }
    }

    /// Flatten a contact read back from the API.
    ///
    /// Keyed addresses come first, sorted by id, followed by any still
    /// unidentified ones in their original order.
    pub fn from_contact(contact: &Contact) -> Self {
        let mut addresses = flatten_addresses(&contact.addresses);
        addresses.extend(contact.new_addresses.iter().cloned());
        Self {
            id: contact.id.clone(),
            customer_id: contact.customer_id.clone(),
            name: contact.name.clone(),
            custrole: contact.custrole.clone(),
            addresses,
        }
    }
}

impl From<ContactState> for Contact {
    fn from(state: ContactState) -> Self {
        state.to_contact()
    }
}

impl From<&Contact> for ContactState {
    fn from(contact: &Contact) -> Self {
        Self::from_contact(contact)
    }
}

/// Desired or observed state of a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub contact_name: String,
    pub status: String,
    pub emailme: bool,
    pub timezone: String,
    pub location: String,
}

impl From<CustomerState> for Customer {
    fn from(state: CustomerState) -> Self {
        Self {
            id: non_blank(state.id),
            name: non_blank(state.name),
            email: non_blank(state.email),
            parent: non_blank(state.parent),
            contact_name: state.contact_name,
            creation_date: None,
            status: state.status,
            emailme: state.emailme,
            timezone: state.timezone,
            location: state.location,
        }
    }
}

impl From<&Customer> for CustomerState {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            parent: customer.parent.clone(),
            contact_name: customer.contact_name.clone(),
            status: customer.status.clone(),
            emailme: customer.emailme,
            timezone: customer.timezone.clone(),
            location: customer.location.clone(),
        }
    }
}
