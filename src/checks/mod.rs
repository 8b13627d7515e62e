pub mod c;
pub mod cpp;

use console::style;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Placeholder inside a query template that gets replaced with the
/// user-supplied function name.
pub const FUNCTION_PLACEHOLDER: &str = "$FUNC";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Severity::High => style("HIGH").red().bold().to_string(),
            Severity::Medium => style("MEDIUM").yellow().bold().to_string(),
            Severity::Low => style("LOW").cyan().bold().to_string(),
        };
        f.write_str(&s)
    }
}

/// One weggli check: a query template plus meta-data and the fixed
/// arguments its invocation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Unique identifier, matching the CLI command name.
    pub id: &'static str,
    /// Human-readable explanation.
    pub description: &'static str,
    /// weggli query string, possibly containing [`FUNCTION_PLACEHOLDER`].
    pub query: &'static str,
    /// Rough severity bucket.
    pub severity: Severity,
    /// Extra weggli flags this query needs (e.g. `--cpp`).
    pub extra_args: &'static [&'static str],
}

impl Check {
    /// Whether the query template needs a function name substituted in.
    pub fn needs_function(&self) -> bool {
        self.query.contains(FUNCTION_PLACEHOLDER)
    }
}

/// Global, lazily-initialised registry: check id → check
static REGISTRY: Lazy<HashMap<&'static str, &'static Check>> = Lazy::new(|| {
    let mut m = HashMap::new();

    for check in c::CHECKS.iter().chain(cpp::CHECKS) {
        m.insert(check.id, check);
    }

    tracing::debug!("check registry initialised ({} checks)", m.len());

    m
});

/// Look up a single check by id (case-insensitive).
pub fn find(id: &str) -> Option<&'static Check> {
    let key = id.to_ascii_lowercase();
    REGISTRY.get(key.as_str()).copied()
}

/// Ids in the order the catalog documents them; `all` runs in this order.
const CATALOG_ORDER: &[&str] = &[
    "memcpy",
    "no-return-check",
    "wild",
    "weak",
    "snprintf",
    "iter",
    "stack",
];

/// Every check, in catalog order.
pub fn all() -> Vec<&'static Check> {
    CATALOG_ORDER.iter().filter_map(|id| find(id)).collect()
}

#[test]
fn registry_holds_every_catalog_entry() {
    let checks = all();
    assert_eq!(checks.len(), 7);

    for check in &checks {
        assert_eq!(find(check.id), Some(*check));
        assert_eq!(find(&check.id.to_uppercase()), Some(*check));
    }

    assert!(find("strcpy").is_none());
}

#[test]
fn ids_are_unique_and_queries_nonempty() {
    let checks = all();
    let mut seen = std::collections::HashSet::new();
    for check in checks {
        assert!(seen.insert(check.id), "duplicate id: {}", check.id);
        assert!(!check.query.is_empty());
        assert!(!check.description.is_empty());
    }
}

#[test]
fn only_no_return_check_needs_a_function() {
    for check in all() {
        assert_eq!(
            check.needs_function(),
            check.id == "no-return-check",
            "check: {}",
            check.id
        );
    }
}

#[test]
fn severity_ordering_puts_high_on_top() {
    assert!(Severity::Low < Severity::Medium);
    assert!(Severity::Medium < Severity::High);
}

#[test]
fn severity_display_contains_uppercase_name() {
    assert!(Severity::High.to_string().contains("HIGH"));
    assert!(Severity::Medium.to_string().contains("MEDIUM"));
    assert!(Severity::Low.to_string().contains("LOW"));
}

#[test]
fn all_follows_the_documented_catalog_order() {
    let ids: Vec<&str> = all().iter().map(|c| c.id).collect();
    assert_eq!(ids, CATALOG_ORDER);
}
