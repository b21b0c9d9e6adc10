use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show resolved settings and where each came from
    Show {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a starter config file
    Init,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
                    OutputFormat::Yaml => print!("{}", serde_yaml::to_string(config)?),
                    OutputFormat::Text => print!("{}", render_text(config)),
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let path = config
                    .config_file
                    .clone()
                    .unwrap_or_else(Config::default_config_path);

                if Config::init_file(&path)? {
                    println!("Created config file: {}", path.display());
                } else {
                    println!("Config file already exists: {}", path.display());
                    println!("Use 'npplan config show' to view current configuration.");
                }
                Ok(())
            }
        }
    }
}

fn render_text(config: &Config) -> String {
    let mut out = String::new();
    match &config.config_file {
        Some(path) => out.push_str(&format!("Config file: {}\n", path.display())),
        None => out.push_str(&format!(
            "Config file: {} (not found)\n",
            Config::default_config_path().display()
        )),
    }

    let width = config
        .entries()
        .iter()
        .map(|e| e.key.len())
        .max()
        .unwrap_or(0);
    for entry in config.entries() {
        out.push_str(&format!(
            "{:width$}  {}  [{}]\n",
            entry.key,
            entry.value,
            entry.source,
            width = width
        ));
    }
    out
}
