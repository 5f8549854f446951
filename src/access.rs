// The get/set protocol over a resolved rule set
use rustc_hash::FxHashMap;

use crate::resolve::{RuleSet, SelectorInput};
use crate::sheet::{Document, RuleHandle};

/// Property argument shapes, one variant per call form.
#[derive(Debug, Clone)]
pub enum PropertyArg {
    /// A single hyphenated (or camelCased) property name.
    Name(String),
    /// Several names, batch-read or batch-written with one value.
    Names(Vec<String>),
    /// Name/value pairs, always a batch write.
    Map(Vec<(String, String)>),
}

/// Outcome of `RuleSetStyles::apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// Single-name read.
    Value(Option<String>),
    /// Batch read, one entry per requested name.
    Values(FxHashMap<String, Option<String>>),
    /// Any write form; the accessor stays usable for chaining.
    Chained,
}

/// Reads and writes style properties across the rules of a resolved set.
///
/// Reads return the first non-empty value in rule order; writes land on the
/// first rule already carrying the property, or on the first rule of the set
/// when none does. All writes go straight into the live host rules.
pub struct RuleSetStyles<'a> {
    doc: &'a mut Document,
    handles: Vec<RuleHandle>,
}

impl Document {
    /// Borrow an accessor over a previously resolved rule set.
    pub fn styles(&mut self, rules: &RuleSet) -> RuleSetStyles<'_> {
        RuleSetStyles {
            handles: rules.handles().to_vec(),
            doc: self,
        }
    }

    /// Resolve and immediately borrow an accessor, the common call shape.
    pub fn css(&mut self, input: impl Into<SelectorInput>) -> RuleSetStyles<'_> {
        let rules = self.select(input);
        RuleSetStyles {
            handles: rules.into_handles(),
            doc: self,
        }
    }
}

impl RuleSetStyles<'_> {
    pub fn handles(&self) -> &[RuleHandle] {
        &self.handles
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// First non-empty value for the property across the set, in rule order.
    /// `None` when every rule leaves it unset or the set is empty.
    pub fn get(&self, name: &str) -> Option<String> {
        let resolved = self.doc.resolver().resolve(name);
        if resolved.is_empty() {
            return None;
        }
        for handle in &self.handles {
            let Some(rule) = self.doc.rule(*handle) else {
                continue;
            };
            let value = rule.value(&resolved);
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
        None
    }

    /// Write a value to the first rule that already carries the property,
    /// or to the first rule in the set when none does. A write against an
    /// empty set is silently dropped.
    pub fn set(&mut self, name: &str, value: &str) -> &mut Self {
        let resolved = self.doc.resolver().resolve(name);
        if resolved.is_empty() {
            return self;
        }
        let target = self
            .handles
            .iter()
            .copied()
            .find(|handle| {
                self.doc
                    .rule(*handle)
                    .is_some_and(|rule| rule.has_value(&resolved))
            })
            .or_else(|| self.handles.first().copied());
        match target {
            Some(handle) => {
                if let Some(rule) = self.doc.rule_mut(handle) {
                    rule.set_value(&resolved, value);
                }
            }
            None => log::debug!("No rules matched; dropping write of {}", resolved),
        }
        self
    }

    /// Batch read, keyed by each name as given.
    pub fn get_all(&self, names: &[&str]) -> FxHashMap<String, Option<String>> {
        names
            .iter()
            .map(|name| (name.to_string(), self.get(name)))
            .collect()
    }

    /// Apply one value to every listed property.
    pub fn set_all(&mut self, names: &[&str], value: &str) -> &mut Self {
        for name in names {
            self.set(name, value);
        }
        self
    }

    /// Apply each entry's value to its property.
    pub fn set_map(&mut self, entries: &[(&str, &str)]) -> &mut Self {
        for (name, value) in entries {
            self.set(name, value);
        }
        self
    }

    /// Shape-dispatched entry point mirroring the one-argument call forms:
    /// a name or name list without a value reads, everything else writes.
    pub fn apply(&mut self, arg: PropertyArg, value: Option<&str>) -> Applied {
        match (arg, value) {
            (PropertyArg::Name(name), None) => Applied::Value(self.get(&name)),
            (PropertyArg::Name(name), Some(value)) => {
                self.set(&name, value);
                Applied::Chained
            }
            (PropertyArg::Names(names), None) => Applied::Values(
                names
                    .iter()
                    .map(|name| (name.clone(), self.get(name)))
                    .collect(),
            ),
            (PropertyArg::Names(names), Some(value)) => {
                for name in &names {
                    self.set(name, value);
                }
                Applied::Chained
            }
            // Maps carry their own values; a separate value argument is
            // ignored.
            (PropertyArg::Map(entries), _) => {
                for (name, value) in &entries {
                    self.set(name, value);
                }
                Applied::Chained
            }
        }
    }
}
