use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::is_empty_map;
use crate::codec::{CreateForm, WireModel};

/// Per-day settings, e.g. `{"time": "08:00-17:00", "exclude": false}`.
pub type DaySettings = Map<String, Value>;

/// A notification schedule. Its name doubles as its identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    #[serde(rename = "id", default, skip_serializing_if = "super::is_blank")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "super::is_blank")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, DaySettings>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleCreate<'a> {
    #[serde(rename = "id", skip_serializing_if = "super::is_blank_str")]
    pub name: Option<&'a str>,
    #[serde(rename = "customerid", skip_serializing_if = "super::is_blank_str")]
    pub customer_id: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_map")]
    pub data: &'a BTreeMap<String, DaySettings>,
}

impl Schedule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_day(mut self, day: impl Into<String>, settings: DaySettings) -> Self {
        self.data.insert(day.into(), settings);
        self
    }
}

impl WireModel for Schedule {
    const ENTITY: &'static str = "Schedule";
}

impl CreateForm for Schedule {
    type Create<'a> = ScheduleCreate<'a>;

    fn create_form(&self) -> ScheduleCreate<'_> {
        ScheduleCreate {
            name: self.name.as_deref(),
            customer_id: self.customer_id.as_deref(),
            data: &self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{create_payload, general_payload};
    use serde_json::json;

    fn weekdays() -> Schedule {
        let mut schedule = Schedule::new("Weekdays").with_day(
            "monday",
            json!({"time": "08:00-17:00", "exclude": false})
                .as_object()
                .cloned()
                .unwrap(),
        );
        schedule.customer_id = Some("201205050153W2Q4C".into());
        schedule
    }

    #[test]
    fn test_create_renames_customer() {
        let value = create_payload(&weekdays()).unwrap();

        assert_eq!(value["id"], "Weekdays");
        assert_eq!(value["customerid"], "201205050153W2Q4C");
        assert!(value.get("customer_id").is_none());
        assert_eq!(value["data"]["monday"]["time"], "08:00-17:00");
    }

    #[test]
    fn test_general_uses_customer_id() {
        let value = general_payload(&weekdays()).unwrap();

        assert_eq!(value["customer_id"], "201205050153W2Q4C");
        assert!(value.get("customerid").is_none());
    }

    #[test]
    fn test_empty_schedule_serializes_to_empty_object() {
        assert_eq!(create_payload(&Schedule::default()).unwrap(), json!({}));
        assert_eq!(general_payload(&Schedule::default()).unwrap(), json!({}));
    }
}
