// ABOUTME: Handlebars helper functions available to every template
// ABOUTME: Implements URI encoding, JSON pretty-printing, regex replace, substring and boolean helpers

use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperDef, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::{Captures, Regex};
use serde_json::Value as JsonValue;
use std::fmt;

/// Characters left alone by URI component encoding: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// JavaScript-style truthiness: `false`, `0`, `""` and `null` are falsy
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

fn scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

handlebars_helper!(encode_uri_component_helper: |value: Json| {
    utf8_percent_encode(&scalar_to_string(value), URI_COMPONENT).to_string()
});

handlebars_helper!(contains_string_helper: |haystack: Json, needle: Json| {
    match (haystack.as_str(), needle.as_str()) {
        (Some(haystack), Some(needle)) => haystack.contains(needle),
        _ => false,
    }
});

// Handlebars passes no trailing options argument, so every parameter counts.
handlebars_helper!(and_helper: |*args| args.iter().all(|v| is_truthy(v)));
handlebars_helper!(or_helper: |*args| args.iter().any(|v| is_truthy(v)));

/// Pretty-print helper - parses a JSON string and writes it indented
pub fn string_to_pretty_json_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h.param(0).and_then(|v| v.value().as_str()).ok_or_else(|| {
        RenderErrorReason::Other("stringToPrettyJSON helper requires a string parameter".into())
    })?;

    let parsed: JsonValue = serde_json::from_str(input).map_err(|e| {
        RenderErrorReason::Other(format!("stringToPrettyJSON received invalid JSON: {}", e))
    })?;

    let pretty = serde_json::to_string_pretty(&parsed)
        .map_err(|e| RenderErrorReason::Other(format!("JSON serialization error: {}", e)))?;

    out.write(&pretty)?;
    Ok(())
}

/// Replace helper - `{{replace pattern replacement subject}}`, all matches
pub fn replace_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let find = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderErrorReason::Other("replace helper requires a pattern parameter".into()))?;

    let replacement = h
        .param(1)
        .map(|v| scalar_to_string(v.value()))
        .unwrap_or_default();

    let subject = h
        .param(2)
        .map(|v| v.value())
        .filter(|v| is_truthy(v))
        .map(scalar_to_string)
        .unwrap_or_default();

    let pattern = Regex::new(find).map_err(|e| {
        RenderErrorReason::Other(format!("replace helper received an invalid pattern: {}", e))
    })?;
    let named_groups = pattern.capture_names().flatten().next().is_some();

    let replaced = pattern.replace_all(&subject, |caps: &Captures<'_>| {
        let mut expanded = String::new();
        expand_replacement(&replacement, caps, &subject, named_groups, &mut expanded);
        expanded
    });

    out.write(&replaced)?;
    Ok(())
}

/// Expand a replacement string for one match using the `String.prototype.replace`
/// rules: `$$`, `$&`, `` $` ``, `$'`, `$1`..`$99` and `$<name>`. Anything else,
/// including references to groups the pattern does not have, is kept literally.
fn expand_replacement(
    replacement: &str,
    caps: &Captures<'_>,
    subject: &str,
    named_groups: bool,
    dst: &mut String,
) {
    let Some(whole) = caps.get(0) else {
        return;
    };
    let bytes = replacement.as_bytes();
    let group_count = caps.len() - 1;
    let mut literal_start = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        dst.push_str(&replacement[literal_start..i]);

        let consumed = match bytes[i + 1] {
            b'$' => {
                dst.push('$');
                2
            }
            b'&' => {
                dst.push_str(whole.as_str());
                2
            }
            b'`' => {
                dst.push_str(&subject[..whole.start()]);
                2
            }
            b'\'' => {
                dst.push_str(&subject[whole.end()..]);
                2
            }
            b'0'..=b'9' => match group_reference(&bytes[i + 1..], group_count) {
                Some((index, digits)) => {
                    dst.push_str(caps.get(index).map_or("", |m| m.as_str()));
                    1 + digits
                }
                None => {
                    dst.push('$');
                    1
                }
            },
            b'<' if named_groups => match replacement[i + 2..].find('>') {
                Some(len) => {
                    let name = &replacement[i + 2..i + 2 + len];
                    dst.push_str(caps.name(name).map_or("", |m| m.as_str()));
                    3 + len
                }
                None => {
                    dst.push('$');
                    1
                }
            },
            _ => {
                dst.push('$');
                1
            }
        };

        i += consumed;
        literal_start = i;
    }

    dst.push_str(&replacement[literal_start..]);
}

// Two-digit references win when that group exists, otherwise fall back to one digit.
fn group_reference(digits: &[u8], group_count: usize) -> Option<(usize, usize)> {
    let first = usize::from(digits[0] - b'0');
    if let Some(second) = digits.get(1).copied().filter(u8::is_ascii_digit) {
        let index = first * 10 + usize::from(second - b'0');
        if (1..=group_count).contains(&index) {
            return Some((index, 2));
        }
    }
    (1..=group_count).contains(&first).then_some((first, 1))
}

/// Fixed table of helpers installed into a compiler's registry.
///
/// The table is consumed when the compiler is built; registries are never
/// modified after that.
pub struct HelperTable {
    entries: Vec<(&'static str, Box<dyn HelperDef + Send + Sync>)>,
}

impl HelperTable {
    /// A table with no helpers
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The built-in helpers
    pub fn builtin() -> Self {
        Self::empty()
            .with("encodeURIComponent", encode_uri_component_helper)
            .with("stringToPrettyJSON", string_to_pretty_json_helper)
            .with("replace", replace_helper)
            .with("containsString", contains_string_helper)
            .with("and", and_helper)
            .with("or", or_helper)
    }

    /// Add a helper; a later entry with the same name replaces an earlier one
    pub fn with<H>(mut self, name: &'static str, helper: H) -> Self
    where
        H: HelperDef + Send + Sync + 'static,
    {
        self.entries.retain(|(existing, _)| *existing != name);
        self.entries.push((name, Box::new(helper)));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register every helper with a Handlebars instance
    pub fn install(self, handlebars: &mut Handlebars<'static>) {
        for (name, helper) in self.entries {
            handlebars.register_helper(name, helper);
        }
    }
}

impl Default for HelperTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for HelperTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
