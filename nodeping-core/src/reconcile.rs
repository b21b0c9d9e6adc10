//! Address reconciliation.
//!
//! Hosts declare a contact's addresses as one flat list. The API wants the
//! ones it already knows keyed by id under `addresses` and the rest as a list
//! under `newaddresses`. [`reconcile_addresses`] does that split for the write
//! path and [`flatten_addresses`] undoes it for the read path.

use std::collections::BTreeMap;

use crate::models::Address;

/// Result of splitting a flat address list by remote identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSplit {
    /// Addresses that carry a remote id, keyed by it.
    pub existing: BTreeMap<String, Address>,
    /// Addresses without a remote id, in input order.
    pub new: Vec<Address>,
}

impl AddressSplit {
    pub fn len(&self) -> usize {
        self.existing.len() + self.new.len()
    }

    pub fn is_empty(&self) -> bool {
        self.existing.is_empty() && self.new.is_empty()
    }
}

/// Split addresses into identified and unidentified sets.
///
/// Duplicate ids are a caller error but do not fail: the later address
/// silently replaces the earlier one. Addresses are otherwise passed through
/// untouched, including fields that make no sense for their type.
pub fn reconcile_addresses<I>(addresses: I) -> AddressSplit
where
    I: IntoIterator<Item = Address>,
{
    let mut split = AddressSplit::default();

    for mut address in addresses {
        match address.identifier().map(str::to_string) {
            Some(id) => {
                if split.existing.insert(id.clone(), address).is_some() {
                    tracing::debug!(address_id = %id, "duplicate address id, keeping the later entry");
                }
            }
            None => {
                // normalise a blank id so it is omitted on the wire
                address.id = None;
                split.new.push(address);
            }
        }
    }

    tracing::debug!(
        existing = split.existing.len(),
        new = split.new.len(),
        "reconciled addresses"
    );
    split
}

/// Turn a keyed address map back into a flat list, sorted by id.
///
/// Each address takes its map key as its id, so feeding the result back
/// through [`reconcile_addresses`] routes it to the same key.
pub fn flatten_addresses<'a, I, K>(addresses: I) -> Vec<Address>
where
    I: IntoIterator<Item = (K, &'a Address)>,
    K: AsRef<str>,
{
    let mut flat: Vec<Address> = addresses
        .into_iter()
        .map(|(key, address)| {
            let mut address = address.clone();
            address.id = Some(key.as_ref().to_string());
            address
        })
        .collect();
    flat.sort_by(|a, b| a.id.cmp(&b.id));
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn email(addr: &str) -> Address {
        Address::new(addr, "email")
    }

    #[test]
    fn test_split_by_identity() {
        let split = reconcile_addresses(vec![
            email("a@example.com").with_id("A1"),
            email("b@example.com"),
            email("c@example.com").with_id(""),
            email("d@example.com").with_id("D4"),
        ]);

        assert_eq!(split.existing.len(), 2);
        assert_eq!(split.existing["A1"].address, "a@example.com");
        assert_eq!(split.existing["D4"].address, "d@example.com");

        let new: Vec<&str> = split.new.iter().map(|a| a.address.as_str()).collect();
        assert_eq!(new, vec!["b@example.com", "c@example.com"]);
        assert!(split.new.iter().all(|a| a.id.is_none()));
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let split = reconcile_addresses(vec![
            email("first@example.com").with_id("A1"),
            email("second@example.com").with_id("A1"),
        ]);

        assert_eq!(split.len(), 1);
        assert_eq!(split.existing["A1"].address, "second@example.com");
    }

    #[test]
    fn test_mismatched_type_fields_pass_through() {
        let split = reconcile_addresses(vec![email("a@example.com")
            .with_header("X-Token", "t")
            .with_priority(2)]);

        assert_eq!(split.new[0].headers["X-Token"], "t");
        assert_eq!(split.new[0].priority, 2);
    }

    #[test]
    fn test_empty_input() {
        let split = reconcile_addresses(Vec::new());
        assert!(split.is_empty());
    }

    #[test]
    fn test_flatten_is_sorted_and_stable() {
        let mut keyed = HashMap::new();
        keyed.insert("a2".to_string(), email("two@example.com"));
        keyed.insert("a1".to_string(), email("one@example.com"));
        keyed.insert("a3".to_string(), email("three@example.com"));

        let first = flatten_addresses(&keyed);
        let second = flatten_addresses(&keyed);

        assert_eq!(first, second);
        let ids: Vec<_> = first.iter().map(|a| a.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_flatten_uses_map_key_as_id() {
        let mut keyed = BTreeMap::new();
        keyed.insert("K5Z3D".to_string(), email("ops@example.com"));

        let flat = flatten_addresses(&keyed);
        assert_eq!(flat[0].identifier(), Some("K5Z3D"));

        let split = reconcile_addresses(flat);
        assert_eq!(split.existing.keys().collect::<Vec<_>>(), vec!["K5Z3D"]);
    }

    fn arb_address() -> impl Strategy<Value = Address> {
        (
            prop::option::of(prop_oneof!["", "[A-Z0-9]{1,3}"]),
            "[a-z]{1,8}@example\\.com",
        )
            .prop_map(|(id, addr)| {
                let address = Address::new(addr, "email");
                match id {
                    Some(id) => address.with_id(id),
                    None => address,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_every_address_lands_in_exactly_one_side(
            input in prop::collection::vec(arb_address(), 0..24)
        ) {
            let split = reconcile_addresses(input.clone());

            let unidentified: Vec<&Address> =
                input.iter().filter(|a| !a.is_identified()).collect();
            prop_assert_eq!(split.new.len(), unidentified.len());
            for (got, want) in split.new.iter().zip(unidentified) {
                prop_assert_eq!(&got.address, &want.address);
                prop_assert!(got.id.is_none());
            }

            // keyed side holds the last address seen for every distinct id
            let mut expected: BTreeMap<String, Address> = BTreeMap::new();
            for address in input.iter().filter(|a| a.is_identified()) {
                expected.insert(address.identifier().unwrap().to_string(), address.clone());
            }
            prop_assert_eq!(&split.existing, &expected);
            for (key, address) in &split.existing {
                prop_assert_eq!(address.identifier(), Some(key.as_str()));
            }
        }
    }
}
