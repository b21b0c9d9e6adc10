use clap::{Args, Subcommand};
use nodeping_core::{decode, payload, Customer, CustomerState};
use std::path::PathBuf;

use super::{print_payload, read_declared, read_response, OutputFormat, PlanOp};
use crate::config::Config;

#[derive(Args)]
pub struct CustomerCommand {
    #[command(subcommand)]
    pub command: CustomerSubcommand,
}

#[derive(Subcommand)]
pub enum CustomerSubcommand {
    /// Build the request body for a declared customer
    Plan {
        /// Declared customer state (YAML or JSON)
        file: PathBuf,

        /// Target endpoint
        #[arg(long, value_enum, default_value = "update")]
        op: PlanOp,
    },

    /// Decode a customer returned by the API
    Decode {
        /// Saved API response (JSON)
        file: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl CustomerCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CustomerSubcommand::Plan { file, op } => {
                let state: CustomerState = read_declared(file)?;
                let customer = Customer::from(state);
                print_payload(&payload(&customer, (*op).into())?, config)
            }

            CustomerSubcommand::Decode { file, format } => {
                let customer: Customer = decode(&read_response(file)?)?;
                let state = CustomerState::from(&customer);

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
                    OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&state)?),
                    OutputFormat::Text => {
                        println!("{}", customer.name.as_deref().unwrap_or("(unnamed)"));
                        if let Some(id) = &customer.id {
                            println!("ID: {}", id);
                        }
                        println!("Location: {}", customer.location);
                        println!("Timezone: {}", customer.timezone);
                        println!("Status: {}", customer.status);
                        if let Some(created) = customer.created_at() {
                            println!("Created: {}", created.to_rfc3339());
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
