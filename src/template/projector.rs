// ABOUTME: Recursive allowlist projection of template contexts
// ABOUTME: Strips every non-allowlisted key at every nesting level without touching the input

use serde_json::Value as JsonValue;

use super::context::Context;
use crate::allowlist::Allowlist;

/// Filters a context down to allowlisted keys.
///
/// Nested objects (including objects inside arrays) are filtered against the
/// same allowlist as the top level. Array elements that are not objects are
/// copied as-is. A key that is absent from the input stays absent; an explicit
/// `null` is kept.
#[derive(Debug, Clone, Copy)]
pub struct ConfigProjector<'a> {
    allowlist: &'a Allowlist,
}

impl<'a> ConfigProjector<'a> {
    pub fn new(allowlist: &'a Allowlist) -> Self {
        Self { allowlist }
    }

    /// Project `input` onto the allowlist, returning an independent copy
    pub fn project(&self, input: &Context) -> Context {
        let mut projected = Context::new();

        for field in self.allowlist.projection_fields() {
            let Some(value) = input.get(*field) else {
                continue;
            };
            projected.insert((*field).to_string(), self.project_value(value));
        }

        projected
    }

    fn project_value(&self, value: &JsonValue) -> JsonValue {
        match value {
            JsonValue::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .map(|item| match item {
                        JsonValue::Object(map) => JsonValue::Object(self.project(map)),
                        other => other.clone(),
                    })
                    .collect(),
            ),
            JsonValue::Object(map) => JsonValue::Object(self.project(map)),
            other => other.clone(),
        }
    }
}

impl Default for ConfigProjector<'static> {
    fn default() -> Self {
        Self::new(Allowlist::builtin())
    }
}

/// Project `input` with the built-in allowlist
pub fn project(input: &Context) -> Context {
    ConfigProjector::default().project(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> Context {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_drops_unknown_top_level_keys() {
        let input = object(json!({
            "depName": "lodash",
            "newVersion": "4.17.21",
            "token": "ghp_secret"
        }));

        let projected = project(&input);

        assert_eq!(
            JsonValue::Object(projected),
            json!({ "depName": "lodash", "newVersion": "4.17.21" })
        );
    }

    #[test]
    fn test_filters_nested_objects() {
        let input = object(json!({
            "releaseNotes": {
                "body": "Fixed things",
                "url": "https://example.com/notes",
                "apiKey": "hidden"
            }
        }));

        let projected = project(&input);

        assert_eq!(
            projected["releaseNotes"],
            json!({ "body": "Fixed things", "url": "https://example.com/notes" })
        );
    }

    #[test]
    fn test_arrays_keep_scalars_and_filter_objects() {
        let input = object(json!({
            "labels": ["dependencies", 3, null],
            "upgrades": [
                { "depName": "a", "password": "x" },
                "plain",
                { "depName": "b", "releases": [{ "version": "1.0.0", "secret": 1 }] }
            ]
        }));

        let projected = project(&input);

        assert_eq!(projected["labels"], json!(["dependencies", 3, null]));
        assert_eq!(
            projected["upgrades"],
            json!([
                { "depName": "a" },
                "plain",
                { "depName": "b", "releases": [{ "version": "1.0.0" }] }
            ])
        );
    }

    #[test]
    fn test_null_kept_absent_skipped() {
        let input = object(json!({ "depType": null }));

        let projected = project(&input);

        assert_eq!(projected.get("depType"), Some(&JsonValue::Null));
        assert!(!projected.contains_key("depName"));
        assert_eq!(projected.len(), 1);
    }

    #[test]
    fn test_sections_and_keywords_are_not_projected() {
        let input = object(json!({ "header": "h", "else": "e", "footer": "f" }));
        assert!(project(&input).is_empty());
    }

    #[test]
    fn test_nested_objects_use_global_allowlist() {
        // A nested object may carry any top-level allowlisted key.
        let input = object(json!({
            "project": { "branchName": "deps/x", "repository": "a/b", "host": "h" }
        }));

        let projected = project(&input);

        assert_eq!(
            projected["project"],
            json!({ "branchName": "deps/x", "repository": "a/b" })
        );
    }

    #[test]
    fn test_input_untouched_and_idempotent() {
        let input = object(json!({
            "depName": "serde",
            "gitAuthor": "Bot <bot@example.com>",
            "hostRules": [{ "token": "abc" }],
            "upgrades": [{ "depName": "x", "npmToken": "y" }]
        }));
        let before = input.clone();

        let once = project(&input);
        let twice = project(&once);

        assert_eq!(input, before);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_ordered_by_field_name() {
        let input = object(json!({ "newVersion": "2", "depName": "a", "branchName": "b" }));

        let projected = project(&input);
        let keys: Vec<&str> = projected.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["branchName", "depName", "newVersion"]);
    }
}
