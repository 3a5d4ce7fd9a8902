//! Per-family rule set definition.

use indexmap::IndexMap;

use super::family::Family;
use super::rule::Rule;
use super::CheckKind;

/// All compliance rules authored for one device family.
///
/// A check missing from `rules` is not supported on this family; devices
/// of the family are skipped by that check.
#[derive(Debug, Clone)]
pub struct PlatformRules {
    /// Family these rules apply to.
    pub family: Family,

    /// Rule per compliance check.
    pub rules: IndexMap<CheckKind, Rule>,
}

impl PlatformRules {
    /// Create an empty rule set for a family.
    pub fn new(family: Family) -> Self {
        Self {
            family,
            rules: IndexMap::new(),
        }
    }

    /// Add the rule for a check.
    pub fn with_rule(mut self, check: CheckKind, rule: Rule) -> Self {
        self.rules.insert(check, rule);
        self
    }

    /// Get the rule for a check.
    pub fn get(&self, check: CheckKind) -> Option<&Rule> {
        self.rules.get(&check)
    }
}
