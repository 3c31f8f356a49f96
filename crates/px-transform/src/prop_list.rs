//! Property-list matching.
//!
//! A property list is an ordered list of rules deciding which declarations
//! are converted:
//! - `width` matches exactly `width`
//! - `font*` matches every property starting with `font`
//! - `*radius` matches every property ending with `radius`
//! - `*position*` matches every property containing `position`
//! - `*` matches everything
//! - a leading `!` negates any of the above
//!
//! Negation always wins over a positive match, whatever the rule order.

use heck::ToKebabCase;
use rustc_hash::FxHashSet;

/// Normalizes a property name as written in a template to kebab case.
///
/// `fontSize` and `font-size` both become `font-size`.
pub fn normalize_property(name: &str) -> String {
    name.to_kebab_case()
}

/// One bucket of compiled rules, either all positive or all negated.
#[derive(Debug, Clone, Default)]
struct RuleSet {
    any: bool,
    exact: FxHashSet<String>,
    prefix: Vec<String>,
    suffix: Vec<String>,
    contains: Vec<String>,
}

impl RuleSet {
    fn insert(&mut self, rule: &str) {
        let starts = rule.starts_with('*');
        let ends = rule.len() > 1 && rule.ends_with('*');

        match (starts, ends) {
            _ if rule == "*" => self.any = true,
            (true, true) => {
                let inner = &rule[1..rule.len() - 1];
                if inner.is_empty() {
                    self.any = true;
                } else {
                    self.contains.push(inner.to_string());
                }
            }
            (true, false) => self.suffix.push(rule[1..].to_string()),
            (false, true) => self.prefix.push(rule[..rule.len() - 1].to_string()),
            (false, false) => {
                self.exact.insert(rule.to_string());
            }
        }
    }

    fn matches(&self, prop: &str) -> bool {
        self.any
            || self.exact.contains(prop)
            || self.prefix.iter().any(|p| prop.starts_with(p.as_str()))
            || self.suffix.iter().any(|s| prop.ends_with(s.as_str()))
            || self.contains.iter().any(|c| prop.contains(c.as_str()))
    }
}

/// A compiled property list.
#[derive(Debug, Clone, Default)]
pub struct PropListMatcher {
    positive: RuleSet,
    negative: RuleSet,
    accept_all: bool,
}

impl PropListMatcher {
    /// Compiles a rule list. An empty list accepts every property.
    pub fn new<S: AsRef<str>>(rules: &[S]) -> Self {
        let mut matcher = Self {
            accept_all: rules.is_empty(),
            ..Self::default()
        };

        for rule in rules {
            let rule = rule.as_ref().trim();
            match rule.strip_prefix('!') {
                Some(negated) => matcher.negative.insert(negated),
                None => matcher.positive.insert(rule),
            }
        }

        matcher
    }

    /// Returns whether a normalized property name should be converted.
    pub fn matches(&self, prop: &str) -> bool {
        if self.negative.matches(prop) {
            return false;
        }
        self.accept_all || self.positive.matches(prop)
    }
}
