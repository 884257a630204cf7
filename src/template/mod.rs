// ABOUTME: Template module for allowlist-guarded rendering
// ABOUTME: Provides context merging, projection, auditing, helpers and the compiler

pub mod auditor;
pub mod context;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod projector;

pub use auditor::VariableAuditor;
pub use context::{merge_context, ConfigSnapshot, Context, GlobalConfigProvider};
pub use engine::{CompilerOptions, TemplateCompiler};
pub use error::{Result, TemplateError};
pub use helpers::HelperTable;
pub use projector::{project, ConfigProjector};
