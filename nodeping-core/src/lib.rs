//! NodePing Core Library
//!
//! Typed models for NodePing entities, the create/general wire codec, and
//! reconciliation of contact addresses between a flat declared state and the
//! keyed shape the API uses. Everything here is pure data transformation; no
//! I/O happens in this crate.

pub mod codec;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod state;

pub use codec::{
    create_payload, decode, encode, general_payload, payload, CreateForm, Operation, WireModel,
};
pub use error::{CodecError, CodecResult, DecodeError, EncodeError};
pub use models::{
    Address, Check, CheckField, CheckState, CheckUpdate, Contact, Customer, DaySettings, Group,
    HomeLoc, Notification, Queue, RunLocations, Schedule,
};
pub use reconcile::{flatten_addresses, reconcile_addresses, AddressSplit};
pub use state::{ContactState, CustomerState};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
