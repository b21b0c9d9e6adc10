use clap::{Args, Subcommand};
use nodeping_core::{decode, payload, Contact, ContactState, Operation};
use std::path::PathBuf;

use super::{
    default_customer, print_payload, read_declared, read_response, OutputFormat, PlanOp,
};
use crate::config::Config;

#[derive(Args)]
pub struct ContactCommand {
    #[command(subcommand)]
    pub command: ContactSubcommand,
}

#[derive(Subcommand)]
pub enum ContactSubcommand {
    /// Build the request body for a declared contact
    Plan {
        /// Declared contact state (YAML or JSON)
        file: PathBuf,

        /// Target endpoint
        #[arg(long, value_enum, default_value = "update")]
        op: PlanOp,
    },

    /// Flatten a contact returned by the API into declared-state form
    Flatten {
        /// Saved API response (JSON)
        file: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },
}

impl ContactCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ContactSubcommand::Plan { file, op } => {
                let mut state: ContactState = read_declared(file)?;
                default_customer(&mut state.customer_id, config);

                let op = Operation::from(*op);
                let contact = state.to_contact();
                tracing::info!(
                    %op,
                    existing = contact.addresses.len(),
                    new = contact.new_addresses.len(),
                    "planned contact"
                );
                print_payload(&payload(&contact, op)?, config)
            }

            ContactSubcommand::Flatten { file, format } => {
                let contact: Contact = decode(&read_response(file)?)?;
                let state = ContactState::from(&contact);

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
                    OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&state)?),
                    OutputFormat::Text => print!("{}", contact),
                }
                Ok(())
            }
        }
    }
}
