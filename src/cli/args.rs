// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for tmplgate

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tmplgate")]
#[command(about = "Render commit message and PR templates against an allowlisted context")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a template file
    Render {
        #[arg(help = "Path to the template file")]
        template: PathBuf,

        #[arg(long, help = "JSON or YAML file holding the template context")]
        context: Option<PathBuf>,

        #[arg(
            short = 'V',
            long = "var",
            help = "Set a string context field (key=value)"
        )]
        vars: Vec<String>,

        #[arg(long, help = "Render the full context without allowlist filtering")]
        no_filter: bool,
    },

    /// Check template syntax and report disallowed variable names
    Check {
        #[arg(help = "Path to the template file")]
        template: PathBuf,
    },

    /// List the field names templates may use
    Fields {
        #[arg(long, help = "List exposed config options instead of documented fields")]
        options: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(
        vars: &[String],
    ) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
        let mut variables = serde_json::Map::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(
                    key.to_string(),
                    serde_json::Value::String(value.to_string()),
                );
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
