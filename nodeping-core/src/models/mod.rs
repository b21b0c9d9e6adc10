mod address;
mod check;
mod check_values;
mod contact;
mod customer;
mod group;
mod notification;
mod schedule;

pub use address::Address;
pub use check::{Check, CheckField, CheckUpdate, NotificationList};
pub use check_values::{CheckState, HomeLoc, Queue, RunLocations};
pub use contact::{Contact, ContactCreate};
pub use customer::{Customer, CustomerCreate};
pub use group::{Group, GroupCreate};
pub use notification::Notification;
pub use schedule::{DaySettings, Schedule, ScheduleCreate};

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// NodePing timestamps are milliseconds since the Unix epoch.
pub(crate) fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    if millis == 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
}

pub(crate) fn is_empty_slice<T>(items: &&[T]) -> bool {
    items.is_empty()
}

pub(crate) fn is_empty_map<K, V>(map: &&BTreeMap<K, V>) -> bool {
    map.is_empty()
}

/// Unset and empty strings are both left off the wire.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

pub(crate) fn is_blank_str(value: &Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Treat `Some("")` as unset.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
