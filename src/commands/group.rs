use clap::{Args, Subcommand};
use nodeping_core::{payload, Group};
use std::path::PathBuf;

use super::{default_customer, print_payload, read_declared, PlanOp};
use crate::config::Config;

#[derive(Args)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand)]
pub enum GroupSubcommand {
    /// Build the request body for a declared contact group
    Plan {
        /// Declared group (YAML or JSON)
        file: PathBuf,

        /// Target endpoint
        #[arg(long, value_enum, default_value = "update")]
        op: PlanOp,
    },
}

impl GroupCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GroupSubcommand::Plan { file, op } => {
                let mut group: Group = read_declared(file)?;
                default_customer(&mut group.customer_id, config);
                if group.members.is_empty() {
                    tracing::warn!(group = %group.name, "group has no members");
                }
                print_payload(&payload(&group, (*op).into())?, config)
            }
        }
    }
}
