use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::check_values::{CheckState, HomeLoc, Queue, RunLocations};
use super::notification::Notification;
use super::millis_to_datetime;
use crate::codec::WireModel;

/// Notifications keyed by contact address or group id, one map per entry.
pub type NotificationList = Vec<BTreeMap<String, Notification>>;

/// A check as returned by reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Check {
    #[serde(rename = "_id", default, skip_serializing_if = "super::is_blank")]
    pub id: Option<String>,
    #[serde(rename = "_rev", default, skip_serializing_if = "super::is_blank")]
    pub rev: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "super::is_blank")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub description: Option<String>,
    #[serde(default)]
    pub homeloc: Option<HomeLoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub enable: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: NotificationList,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runlocations: Option<RunLocations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<Queue>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CheckState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstdown: Option<i64>,
}

impl Check {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(millis_to_datetime)
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified.and_then(millis_to_datetime)
    }

    pub fn is_enabled(&self) -> bool {
        self.enable.as_deref() == Some("active")
    }

    /// Probe target, which reads carry inside `parameters`.
    pub fn target(&self) -> Option<&str> {
        self.parameters.get("target").and_then(Value::as_str)
    }
}

impl WireModel for Check {
    const ENTITY: &'static str = "Check";
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.label.as_deref().unwrap_or("(unlabelled)");
        writeln!(f, "{}", label)?;
        writeln!(f, "{}", "=".repeat(label.len()))?;

        if let Some(kind) = &self.kind {
            writeln!(f, "Type: {}", kind)?;
        }
        if let Some(target) = self.target() {
            writeln!(f, "Target: {}", target)?;
        }
        if let Some(interval) = self.interval {
            writeln!(f, "Interval: {} min", interval)?;
        }
        writeln!(f, "Enabled: {}", if self.is_enabled() { "yes" } else { "no" })?;
        if let Some(state) = &self.state {
            writeln!(f, "State: {}", if state.is_up() { "up" } else { "down" })?;
        }
        if let Some(loc) = self.homeloc.as_ref().and_then(HomeLoc::location) {
            writeln!(f, "Home location: {}", loc)?;
        }
        if let Some(runlocations) = &self.runlocations {
            writeln!(f, "Run locations: {}", runlocations.to_vec().join(", "))?;
        }
        if let Some(created) = self.created_at() {
            writeln!(f, "Created: {}", created.to_rfc3339())?;
        }
        if let Some(modified) = self.modified_at() {
            writeln!(f, "Modified: {}", modified.to_rfc3339())?;
        }

        let count: usize = self.notifications.iter().map(BTreeMap::len).sum();
        if count > 0 {
            writeln!(f, "Notifications: {}", count)?;
        }

        Ok(())
    }
}

/// Threshold for one named field of a push or HTTP-parse check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckField {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

impl CheckField {
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }
}

/// Body for both check creation and check updates.
///
/// Reads and writes disagree on several names: the customer is `customerid`
/// here, `enable` becomes `enabled`, `public` is a string and `runlocations`
/// is always a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckUpdate {
    #[serde(rename = "_id", default, skip_serializing_if = "super::is_blank")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub label: Option<String>,
    #[serde(rename = "customerid", default, skip_serializing_if = "super::is_blank")]
    pub customer_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "super::is_blank")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub enabled: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub public: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runlocations: Vec<String>,
    #[serde(default)]
    pub homeloc: Option<HomeLoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: NotificationList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sens: Option<i64>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub dep: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub description: Option<String>,

    // type specific
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub checktoken: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub clientcert: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub contentstring: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub dohdot: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub dnstype: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub dnstoresolve: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub dnssection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnsrd: Option<bool>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub transport: Option<String>,
    #[serde(default)]
    pub follow: bool,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub secure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub ignore: Option<String>,
    #[serde(default)]
    pub invert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warningdays: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, CheckField>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub postdata: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub receiveheaders: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub sendheaders: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub edns: Map<String, Value>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuscode: Option<i64>,
    #[serde(default)]
    pub ipv6: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<bool>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub servername: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub snmpv: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub snmpcom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifyvolume: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumemin: Option<i64>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub whoisserver: Option<String>,
}

impl CheckUpdate {
    pub fn new(kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_interval(mut self, minutes: i64) -> Self {
        self.interval = Some(minutes);
        self
    }

    pub fn with_notification(mut self, contact: impl Into<String>, notification: Notification) -> Self {
        let mut entry = BTreeMap::new();
        entry.insert(contact.into(), notification);
        self.notifications.push(entry);
        self
    }

    /// Seed an update body from a check read back from the API.
    ///
    /// Only the fields common to every check type are carried over; the
    /// type-specific ones live in `parameters` on reads and stay unset.
    pub fn from_check(check: &Check) -> Self {
        Self {
            id: check.id.clone(),
            label: check.label.clone(),
            customer_id: check.customer_id.clone(),
            kind: check.kind.clone(),
            target: check.target().map(str::to_string),
            interval: check.interval,
            enabled: check.enable.clone(),
            public: Some(check.public.to_string()),
            runlocations: check
                .runlocations
                .as_ref()
                .map(RunLocations::to_vec)
                .unwrap_or_default(),
            homeloc: check.homeloc.clone(),
            notifications: check.notifications.clone(),
            description: check.description.clone(),
            ..Self::default()
        }
    }
}

impl WireModel for CheckUpdate {
    const ENTITY: &'static str = "CheckUpdate";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, general_payload};
    use crate::error::DecodeError;
    use serde_json::json;

    fn check_response() -> Value {
        json!({
            "_id": "201205050153W2Q4C-0J2HSIRF",
            "_rev": "2-e6e4b8b4e5c1",
            "customer_id": "201205050153W2Q4C",
            "label": "Site",
            "interval": 5,
            "notifications": [
                {"K5Z3D": {"delay": 0, "schedule": "All"}},
                {"GROUP1": {"delay": 5, "schedule": "Weekdays"}}
            ],
            "type": "HTTP",
            "status": "assigned",
            "modified": 1700000100000i64,
            "enable": "active",
            "public": false,
            "parameters": {"target": "https://example.com", "threshold": 5, "sens": 2},
            "runlocations": ["nam"],
            "homeloc": "roam",
            "created": 1700000000000i64,
            "queue": "bINKBa8tT2",
            "uuid": "4ka9b3n1-1a2b-4c3d",
            "state": 1,
            "firstdown": 0
        })
    }

    #[test]
    fn test_decode_check_response() {
        let check: Check = decode(check_response().to_string().as_bytes()).unwrap();

        assert_eq!(check.rev.as_deref(), Some("2-e6e4b8b4e5c1"));
        assert_eq!(check.target(), Some("https://example.com"));
        assert_eq!(check.homeloc, Some(HomeLoc::Location("roam".into())));
        assert_eq!(check.runlocations, Some(RunLocations::List(vec!["nam".into()])));
        assert_eq!(check.queue, Some(Queue::Id("bINKBa8tT2".into())));
        assert!(check.state.as_ref().unwrap().is_up());
        assert!(check.is_enabled());
        assert_eq!(check.notifications.len(), 2);
        assert_eq!(check.notifications[1]["GROUP1"].delay, 5);
        assert_eq!(
            check.created_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn test_decode_check_with_bad_homeloc_fails() {
        let mut body = check_response();
        body["homeloc"] = json!(42);

        let err = decode::<Check>(body.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.to_string().contains("homeloc"));
    }

    #[test]
    fn test_decode_check_with_bad_notification_fails() {
        let mut body = check_response();
        body["notifications"] = json!([{"K5Z3D": {"schedule": "All"}}]);

        let err = decode::<Check>(body.to_string().as_bytes()).unwrap_err();
        assert!(err.to_string().contains("delay"));
    }

    #[test]
    fn test_check_homeloc_is_always_serialized() {
        let value = general_payload(&Check::default()).unwrap();
        assert_eq!(value, json!({"homeloc": null, "public": false}));
    }

    #[test]
    fn test_check_update_wire_names() {
        let mut update = CheckUpdate::new("HTTP", "https://example.com")
            .with_label("Site")
            .with_interval(5)
            .with_notification("K5Z3D", Notification::new(0).with_schedule("All"));
        update.customer_id = Some("201205050153W2Q4C".into());
        update.enabled = Some("active".into());
        update.fields.insert("cpu".into(), CheckField::new("cpu", 0, 90));

        let value = general_payload(&update).unwrap();

        assert_eq!(value["customerid"], "201205050153W2Q4C");
        assert!(value.get("customer_id").is_none());
        assert_eq!(value["enabled"], "active");
        assert!(value.get("enable").is_none());
        assert_eq!(value["homeloc"], Value::Null);
        assert_eq!(value["follow"], false);
        assert_eq!(value["invert"], false);
        assert_eq!(value["ipv6"], false);
        assert!(value.get("dnsrd").is_none());
        assert!(value.get("port").is_none());
        assert_eq!(value["fields"]["cpu"], json!({"name": "cpu", "min": 0, "max": 90}));
        assert_eq!(
            value["notifications"],
            json!([{"K5Z3D": {"delay": 0, "schedule": "All"}}])
        );
    }

    #[test]
    fn test_check_update_from_check() {
        let check: Check = serde_json::from_value(check_response()).unwrap();
        let update = CheckUpdate::from_check(&check);

        assert_eq!(update.customer_id.as_deref(), Some("201205050153W2Q4C"));
        assert_eq!(update.enabled.as_deref(), Some("active"));
        assert_eq!(update.public.as_deref(), Some("false"));
        assert_eq!(update.runlocations, vec!["nam".to_string()]);
        assert_eq!(update.target.as_deref(), Some("https://example.com"));
        assert_eq!(update.notifications, check.notifications);
    }

    #[test]
    fn test_check_display() {
        let check: Check = serde_json::from_value(check_response()).unwrap();
        let output = format!("{}", check);

        assert!(output.contains("Site"));
        assert!(output.contains("Type: HTTP"));
        assert!(output.contains("State: up"));
        assert!(output.contains("Home location: roam"));
        assert!(output.contains("Modified: 2023-11-14T22:15:00+00:00"));
        assert!(output.contains("Notifications: 2"));
    }
}
