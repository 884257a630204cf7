// ABOUTME: Allowlist catalog for template rendering
// ABOUTME: Combines the static field tables into lookup sets used for projection and auditing

pub mod fields;

use once_cell::sync::Lazy;
use std::collections::BTreeSet;

pub use fields::{ALLOWED_FIELDS, ENGINE_KEYWORDS, EXPOSED_CONFIG_OPTIONS, PR_BODY_SECTIONS};

static BUILTIN: Lazy<Allowlist> = Lazy::new(Allowlist::from_tables);

/// The set of names a template may see.
///
/// Two views are kept:
/// - `projection_fields`: documented fields plus exposed config options, sorted
///   and de-duplicated. These are the only keys a projected context can hold.
/// - the composite set: the projection fields plus PR body section names and
///   engine keywords. The variable auditor checks template references against it.
#[derive(Debug, Clone)]
pub struct Allowlist {
    composite: BTreeSet<&'static str>,
    projection: Vec<&'static str>,
}

impl Allowlist {
    /// The process-wide allowlist built from the static tables
    pub fn builtin() -> &'static Allowlist {
        &BUILTIN
    }

    fn from_tables() -> Self {
        let projection: BTreeSet<&'static str> = ALLOWED_FIELDS
            .iter()
            .map(|(name, _)| *name)
            .chain(EXPOSED_CONFIG_OPTIONS.iter().copied())
            .collect();

        let composite = projection
            .iter()
            .copied()
            .chain(PR_BODY_SECTIONS.iter().copied())
            .chain(ENGINE_KEYWORDS.iter().copied())
            .collect();

        Self {
            composite,
            projection: projection.into_iter().collect(),
        }
    }

    /// Check whether a template may reference `name`
    pub fn contains(&self, name: &str) -> bool {
        self.composite.contains(name)
    }

    /// Sorted field names that survive projection
    pub fn projection_fields(&self) -> &[&'static str] {
        &self.projection
    }

    /// Iterate over every allowed name, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.composite.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.composite.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composite.is_empty()
    }

    /// Human description of a documented field
    pub fn description(&self, name: &str) -> Option<&'static str> {
        ALLOWED_FIELDS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, description)| *description)
    }
}
