use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exactly one physical line in one file, relative to the scan base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub path: String,
    pub filename: String,
    pub line: usize,
}

/// A resolved variable name and every call site that references it, in
/// discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariable {
    pub name: String,
    pub sources: Vec<SourceLocation>,
}

/// A reference the resolver could not reduce to a literal; kept aside for
/// manual inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub path: String,
    pub filename: String,
    pub line: usize,
    pub token: String,
}

/// Resolved name → call sites. Built incrementally, exposed sorted.
#[derive(Debug, Default)]
pub struct VariableIndex {
    entries: HashMap<String, ResolvedVariable>,
    insertion_order: Vec<String>,
}

impl VariableIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call site for `name`, creating the entry on first sight.
    /// Identical (name, location) pairs accumulate: a repeated call is a
    /// genuine repeated source reference, not a duplicate to collapse.
    pub fn add_source(&mut self, name: &str, location: SourceLocation) {
        if !self.entries.contains_key(name) {
            self.insertion_order.push(name.to_string());
            self.entries.insert(
                name.to_string(),
                ResolvedVariable {
                    name: name.to_string(),
                    sources: Vec::new(),
                },
            );
        }

        if let Some(variable) = self.entries.get_mut(name) {
            variable.sources.push(location);
        }
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedVariable> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted case-insensitively by name. Names equal under case
    /// folding keep their first-insertion order; repeated exports from the
    /// same state produce identical sequences.
    pub fn sorted_entries(&self) -> Vec<&ResolvedVariable> {
        let mut names: Vec<&String> = self.insertion_order.iter().collect();
        names.sort_by_key(|name| name.to_lowercase());
        names.iter().map(|name| &self.entries[name.as_str()]).collect()
    }
}
