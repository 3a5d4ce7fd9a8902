//! Global rule registry for looking up rules by check and family.

use indexmap::IndexMap;
use log::warn;
use once_cell::sync::Lazy;

use super::definition::PlatformRules;
use super::family::Family;
use super::rule::Rule;
use super::{CheckKind, vendors};
use crate::error::{Result, RuleError};

/// Global registry with the built-in vendor rules.
static REGISTRY: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::builtin);

/// Registry of rules, one table per compliance check.
///
/// Adding support for a family is a table insertion; dispatch never
/// branches on the family.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    tables: IndexMap<CheckKind, IndexMap<Family, Rule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in vendor rules.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for platform in vendors::all() {
            if let Err(e) = registry.register_platform(platform) {
                warn!("Skipping built-in rule: {}", e);
            }
        }
        registry
    }

    /// Get the global registry.
    pub fn global() -> &'static RuleRegistry {
        &REGISTRY
    }

    /// Register a rule for a check and family.
    pub fn register(&mut self, check: CheckKind, family: Family, rule: Rule) -> Result<()> {
        let table = self.tables.entry(check).or_default();
        if table.contains_key(&family) {
            return Err(RuleError::AlreadyRegistered {
                check: check.to_string(),
                family: family.to_string(),
            }
            .into());
        }
        table.insert(family, rule);
        Ok(())
    }

    /// Register every rule of a family's rule set.
    pub fn register_platform(&mut self, platform: PlatformRules) -> Result<()> {
        let PlatformRules { family, rules } = platform;
        for (check, rule) in rules {
            self.register(check, family.clone(), rule)?;
        }
        Ok(())
    }

    /// Get the rule for a check and family.
    pub fn get(&self, check: CheckKind, family: &Family) -> Option<&Rule> {
        self.tables.get(&check)?.get(family)
    }

    /// Check if a check has a rule for a family.
    pub fn supports(&self, check: CheckKind, family: &Family) -> bool {
        self.get(check, family).is_some()
    }

    /// List the families a check has rules for, in registration order.
    pub fn families(&self, check: CheckKind) -> impl Iterator<Item = &Family> {
        self.tables.get(&check).into_iter().flat_map(|table| table.keys())
    }
}
