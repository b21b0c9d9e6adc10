use clap::{Args, Subcommand};
use nodeping_core::{decode, general_payload, Check, CheckUpdate};
use std::path::PathBuf;

use super::{default_customer, print_payload, read_declared, read_response, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct CheckCommand {
    #[command(subcommand)]
    pub command: CheckSubcommand,
}

#[derive(Subcommand)]
pub enum CheckSubcommand {
    /// Build the request body for a declared check (same shape for create and update)
    Plan {
        /// Declared check (YAML or JSON)
        file: PathBuf,
    },

    /// Decode a check returned by the API
    Decode {
        /// Saved API response (JSON)
        file: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Print the update body that would reproduce this check
        #[arg(long)]
        as_update: bool,
    },
}

impl CheckCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CheckSubcommand::Plan { file } => {
                let mut check: CheckUpdate = read_declared(file)?;
                default_customer(&mut check.customer_id, config);
                print_payload(&general_payload(&check)?, config)
            }

            CheckSubcommand::Decode {
                file,
                format,
                as_update,
            } => {
                let check: Check = decode(&read_response(file)?)?;

                if *as_update {
                    return print_payload(&general_payload(&CheckUpdate::from_check(&check))?, config);
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&check)?)
                    }
                    OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&check)?),
                    OutputFormat::Text => print!("{}", check),
                }
                Ok(())
            }
        }
    }
}
