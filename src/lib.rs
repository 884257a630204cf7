// ABOUTME: Main library module for the tmplgate template renderer
// ABOUTME: Exports the allowlist catalog, template compiler and CLI components

pub mod allowlist;
pub mod cli;
pub mod template;

// Re-export commonly used types
pub use allowlist::Allowlist;
pub use cli::{App, Args, Config};
pub use template::{
    project, CompilerOptions, ConfigProjector, ConfigSnapshot, Context, GlobalConfigProvider,
    HelperTable, TemplateCompiler, TemplateError, VariableAuditor,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
