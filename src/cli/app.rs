// ABOUTME: Main application orchestration for the tmplgate CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Rendered output goes to stdout, so logs go to stderr
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub async fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting tmplgate v{}", crate::VERSION);
        debug!("Configuration loaded from: {:?}", args.config);

        match args.command {
            Commands::Render {
                template,
                context,
                vars,
                no_filter,
            } => {
                let rendered =
                    commands::render_template(template, context, vars, no_filter, &self.config)
                        .await?;
                print!("{}", rendered);
                Ok(())
            }

            Commands::Check { template } => {
                let findings = commands::check_template(template.clone(), &self.config).await?;
                if findings.is_empty() {
                    println!("✓ Template '{}' is valid", template.display());
                } else {
                    warn!(
                        "Template '{}' references {} disallowed variable(s)",
                        template.display(),
                        findings.len()
                    );
                    for name in &findings {
                        println!("disallowed: {}", name);
                    }
                }
                Ok(())
            }

            Commands::Fields { options } => {
                for line in commands::list_fields(options) {
                    println!("{}", line);
                }
                Ok(())
            }
        }
    }

    /// Create application from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
