// ABOUTME: Command implementations for the tmplgate CLI
// ABOUTME: Handles execution of the render, check and fields commands

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::args::Args;
use super::config::Config;
use crate::allowlist::{Allowlist, ALLOWED_FIELDS, EXPOSED_CONFIG_OPTIONS};
use crate::template::{Context, HelperTable, TemplateCompiler};

/// Build a compiler from the loaded configuration
pub fn build_compiler(config: &Config) -> TemplateCompiler {
    TemplateCompiler::with_options(
        Arc::new(config.snapshot()),
        HelperTable::builtin(),
        config.compiler_options(),
    )
}

/// Render a template file and return the output
pub async fn render_template(
    template_path: PathBuf,
    context_path: Option<PathBuf>,
    vars: Vec<String>,
    no_filter: bool,
    config: &Config,
) -> Result<String> {
    info!("Rendering template: {}", template_path.display());

    let template = tokio::fs::read_to_string(&template_path).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to read template '{}': {}",
            template_path.display(),
            e
        )
    })?;

    let mut context = match context_path {
        Some(path) => load_context(&path).await?,
        None => Context::new(),
    };

    let variables = Args::parse_variables(&vars)?;
    debug!("Parsed {} context variables", variables.len());
    context.extend(variables);

    let compiler = build_compiler(config);
    let rendered = compiler
        .compile(&template, &context, !no_filter)
        .map_err(|e| anyhow::anyhow!("Failed to render template: {}", e))?;

    Ok(rendered)
}

/// Validate a template and collect disallowed variable names
pub async fn check_template(template_path: PathBuf, config: &Config) -> Result<Vec<String>> {
    info!("Checking template: {}", template_path.display());

    let template = tokio::fs::read_to_string(&template_path).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to read template '{}': {}",
            template_path.display(),
            e
        )
    })?;

    let compiler = build_compiler(config);
    compiler
        .validate_template(&template)
        .map_err(|e| anyhow::anyhow!("Template validation failed: {}", e))?;

    Ok(compiler.audit(&template))
}

/// Format the field listing printed by `tmplgate fields`
pub fn list_fields(options: bool) -> Vec<String> {
    if options {
        return EXPOSED_CONFIG_OPTIONS
            .iter()
            .map(|name| name.to_string())
            .collect();
    }

    let allowlist = Allowlist::builtin();
    let width = ALLOWED_FIELDS
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    ALLOWED_FIELDS
        .iter()
        .map(|(name, _)| {
            let description = allowlist.description(name).unwrap_or_default();
            format!("{:width$}  {}", name, description, width = width)
        })
        .collect()
}

/// Load a template context from a JSON or YAML file
pub async fn load_context(path: &Path) -> Result<Context> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read context '{}': {}", path.display(), e))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let value: serde_json::Value = if is_json {
        serde_json::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };

    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(Context::new()),
        _ => Err(anyhow::anyhow!(
            "Context file '{}' must contain a mapping",
            path.display()
        )),
    }
}
