// ABOUTME: Template compiler built on Handlebars
// ABOUTME: Merges global config with caller data, filters and audits it, then renders templates

use handlebars::{Handlebars, RenderContext, Renderable, StringOutput, Template};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::trace;

use super::auditor::VariableAuditor;
use super::context::{json_kind, merge_context, ConfigSnapshot, Context, GlobalConfigProvider};
use super::error::{Result, TemplateError};
use super::helpers::HelperTable;
use super::projector::ConfigProjector;
use crate::allowlist::Allowlist;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    /// HTML-escape `{{value}}` output; `{{{value}}}` is never escaped
    pub escape_html: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self { escape_html: true }
    }
}

/// Renders templates against an allowlist-filtered view of the global
/// configuration merged with caller data.
///
/// The Handlebars registry and its helpers are set up once in the constructor
/// and only read afterwards, so a compiler can be shared between threads.
/// Templates are compiled on every call; nothing is cached.
#[derive(Clone)]
pub struct TemplateCompiler {
    handlebars: Handlebars<'static>,
    provider: Arc<dyn GlobalConfigProvider>,
    allowlist: &'static Allowlist,
}

impl TemplateCompiler {
    /// Create a compiler reading global config from `provider` and rendering
    /// with the helpers in `helpers`
    pub fn new(provider: Arc<dyn GlobalConfigProvider>, helpers: HelperTable) -> Self {
        Self::with_options(provider, helpers, CompilerOptions::default())
    }

    pub fn with_options(
        provider: Arc<dyn GlobalConfigProvider>,
        helpers: HelperTable,
        options: CompilerOptions,
    ) -> Self {
        let mut handlebars = Handlebars::new();

        // Missing variables render as empty strings
        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        if !options.escape_html {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        helpers.install(&mut handlebars);

        Self {
            handlebars,
            provider,
            allowlist: Allowlist::builtin(),
        }
    }

    /// Compiler over a fixed snapshot with the built-in helpers
    pub fn with_snapshot(snapshot: ConfigSnapshot) -> Self {
        Self::new(Arc::new(snapshot), HelperTable::builtin())
    }

    /// Render `template` against the global snapshot merged with `input`.
    ///
    /// With `filter_fields` the merged context is projected onto the allowlist
    /// and the template text is audited for disallowed variable names. Audit
    /// findings are logged and never stop rendering.
    pub fn compile(&self, template: &str, input: &Context, filter_fields: bool) -> Result<String> {
        let merged = merge_context(&self.provider.get(), input);
        let filtered_input = if filter_fields {
            ConfigProjector::new(self.allowlist).project(&merged)
        } else {
            merged
        };

        trace!(
            template,
            filtered_input = %JsonValue::Object(filtered_input.clone()),
            "Compiling template"
        );

        if filter_fields {
            self.audit(template);
        }

        let compiled = parse_template(template)?;
        self.render_compiled(&compiled, filtered_input)
    }

    /// Render with field filtering enabled
    pub fn compile_default(&self, template: &str, input: &Context) -> Result<String> {
        self.compile(template, input, true)
    }

    /// Render against any serializable input. The input must serialize to a
    /// JSON object.
    pub fn compile_serialized<T: Serialize>(
        &self,
        template: &str,
        input: &T,
        filter_fields: bool,
    ) -> Result<String> {
        match serde_json::to_value(input)? {
            JsonValue::Object(map) => self.compile(template, &map, filter_fields),
            other => Err(TemplateError::InvalidContext(format!(
                "template input must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Report variable names in `template` that are not allowlisted
    pub fn audit(&self, template: &str) -> Vec<String> {
        VariableAuditor::new(self.allowlist).audit(template)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        parse_template(template).map(|_| ())
    }

    fn render_compiled(&self, compiled: &Template, data: Context) -> Result<String> {
        let data = handlebars::Context::from(JsonValue::Object(data));
        let mut render_context = RenderContext::new(None);
        let mut output = StringOutput::new();

        compiled.render(&self.handlebars, &data, &mut render_context, &mut output)?;

        output
            .into_string()
            .map_err(|e| TemplateError::HandlebarsError(e.into()))
    }

    /// The global snapshot this compiler would merge right now
    pub fn snapshot(&self) -> ConfigSnapshot {
        self.provider.get()
    }
}

fn parse_template(template: &str) -> Result<Template> {
    Template::compile(template).map_err(|e| TemplateError::SyntaxError(e.to_string()))
}

impl Default for TemplateCompiler {
    fn default() -> Self {
        Self::with_snapshot(ConfigSnapshot::empty())
    }
}
