// ABOUTME: Best-effort scan of template text for variables outside the allowlist
// ABOUTME: Reports findings through tracing and never blocks rendering

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::allowlist::Allowlist;

// Bare single-word references only: `{{name}}`, `{{#if name}}`, `{{#unless name}}`.
// Dotted paths, helper calls and literals are not matched.
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(#(if|unless) )?([a-zA-Z]+)\}\}").expect("variable pattern is valid")
});

#[derive(Debug, Clone, Copy)]
pub struct VariableAuditor<'a> {
    allowlist: &'a Allowlist,
}

impl<'a> VariableAuditor<'a> {
    pub fn new(allowlist: &'a Allowlist) -> Self {
        Self { allowlist }
    }

    /// Return every bare variable reference that is not allowlisted, in order
    /// of appearance. Each finding is also logged at info level.
    pub fn audit(&self, template: &str) -> Vec<String> {
        let mut disallowed = Vec::new();

        for captures in VARIABLE_PATTERN.captures_iter(template) {
            let Some(var_name) = captures.get(3).map(|m| m.as_str()) else {
                continue;
            };
            if !self.allowlist.contains(var_name) {
                info!(var_name, template, "Disallowed variable name in template");
                disallowed.push(var_name.to_string());
            }
        }

        disallowed
    }
}

impl Default for VariableAuditor<'static> {
    fn default() -> Self {
        Self::new(Allowlist::builtin())
    }
}
