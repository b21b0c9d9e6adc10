use clap::{Args, Subcommand};
use nodeping_core::{payload, Schedule};
use std::path::PathBuf;

use super::{default_customer, print_payload, read_declared, PlanOp};
use crate::config::Config;

#[derive(Args)]
pub struct ScheduleCommand {
    #[command(subcommand)]
    pub command: ScheduleSubcommand,
}

#[derive(Subcommand)]
pub enum ScheduleSubcommand {
    /// Build the request body for a declared schedule
    Plan {
        /// Declared schedule (YAML or JSON)
        file: PathBuf,

        /// Target endpoint
        #[arg(long, value_enum, default_value = "update")]
        op: PlanOp,
    },
}

impl ScheduleCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ScheduleSubcommand::Plan { file, op } => {
                let mut schedule: Schedule = read_declared(file)?;
                default_customer(&mut schedule.customer_id, config);
                print_payload(&payload(&schedule, (*op).into())?, config)
            }
        }
    }
}
