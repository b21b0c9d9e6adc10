mod check;
mod config_cmd;
mod contact;
mod customer;
mod group;
mod schedule;

pub use check::CheckCommand;
pub use config_cmd::ConfigCommand;
pub use contact::ContactCommand;
pub use customer::CustomerCommand;
pub use group::GroupCommand;
pub use schedule::ScheduleCommand;

use clap::ValueEnum;
use nodeping_core::Operation;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use crate::config::{Config, PayloadFormat};

/// Target endpoint for a planned payload
#[derive(Clone, Copy, ValueEnum, Default)]
pub enum PlanOp {
    Create,
    #[default]
    Update,
}

impl From<PlanOp> for Operation {
    fn from(op: PlanOp) -> Self {
        match op {
            PlanOp::Create => Operation::Create,
            PlanOp::Update => Operation::General,
        }
    }
}

/// Output format for decoded entities
#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Read a declared state file. YAML is a superset of JSON, so both work.
pub(crate) fn read_declared<T: DeserializeOwned>(
    path: &Path,
) -> Result<T, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let declared = serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded declared state");
    Ok(declared)
}

/// Read a saved API response body.
pub(crate) fn read_response(path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "loaded response body");
    Ok(bytes)
}

pub(crate) fn print_payload(
    payload: &Value,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match config.format.value {
        PayloadFormat::Json => println!("{}", serde_json::to_string(payload)?),
        PayloadFormat::Pretty => println!("{}", serde_json::to_string_pretty(payload)?),
    }
    Ok(())
}

/// Fall back to the configured customer when the declared state has none.
/// An empty id counts as none.
pub(crate) fn default_customer(customer_id: &mut Option<String>, config: &Config) {
    if customer_id.as_deref().map_or(true, str::is_empty) {
        if let Some(id) = &config.customer_id.value {
            tracing::debug!(customer_id = %id, "using configured customer");
            *customer_id = Some(id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeping_core::{payload, ContactState};
    use std::io::Write;
    use tempfile::tempdir;

    fn config_with_customer(dir: &Path, customer_id: &str) -> Config {
        let path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "customer_id: {}", customer_id).unwrap();
        Config::load(Some(path)).unwrap()
    }

    #[test]
    fn test_plan_op_maps_to_operation() {
        assert_eq!(Operation::from(PlanOp::Create), Operation::Create);
        assert_eq!(Operation::from(PlanOp::Update), Operation::General);
    }

    #[test]
    fn test_read_declared_yaml_contact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contact.yaml");
        std::fs::write(
            &path,
            "name: On-call\naddresses:\n  - id: K5Z3D\n    address: ops@example.com\n    type: email\n  - address: \"+15551234\"\n    type: sms\n",
        )
        .unwrap();

        let state: ContactState = read_declared(&path).unwrap();
        let contact = state.to_contact();
        assert_eq!(contact.addresses.len(), 1);
        assert_eq!(contact.new_addresses[0].address, "+15551234");

        let body = payload(&contact, PlanOp::Create.into()).unwrap();
        assert!(body.get("addresses").is_none());
    }

    #[test]
    fn test_read_declared_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = read_declared::<ContactState>(&path).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_default_customer_only_fills_gaps() {
        let dir = tempdir().unwrap();
        let config = config_with_customer(dir.path(), "CFG1");

        let mut missing = None;
        default_customer(&mut missing, &config);
        assert_eq!(missing.as_deref(), Some("CFG1"));

        let mut declared = Some("OWN1".to_string());
        default_customer(&mut declared, &config);
        assert_eq!(declared.as_deref(), Some("OWN1"));

        let mut blank = Some(String::new());
        default_customer(&mut blank, &config);
        assert_eq!(blank.as_deref(), Some("CFG1"));
    }
}
