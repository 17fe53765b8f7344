use crate::extractor::ConstantDef;
use std::collections::HashMap;

/// Symbolic name to literal value, built once per run from every
/// definition-candidate file and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    entries: HashMap<String, String>,
}

impl ConstantTable {
    /// Materialize the captured definition sequence into a lookup table.
    /// Later definitions of a name overwrite earlier ones; with the
    /// discovery order fixed, the overwrite is reproducible across runs.
    pub fn from_definitions(definitions: &[ConstantDef]) -> Self {
        let mut entries = HashMap::new();
        for def in definitions {
            entries.insert(def.name.clone(), def.value.clone());
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A quoted value is a final, non-symbolic variable name.
pub fn is_literal(value: &str) -> bool {
    value.contains('"')
}

/// Remove every quote character, not just a leading/trailing pair.
pub fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

/// The outcome of resolving one captured token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The (possibly substituted) value was a quoted literal; quotes stripped.
    Literal(String),
    /// Still symbolic after lookup; carries the post-substitution value.
    NeedsReview(String),
}

/// Substitute the token with its table value when one exists, then test the
/// result for a quote character. Substitution is single-level: a constant
/// whose value is itself a symbolic name is not looked up again.
pub fn resolve(token: &str, table: &ConstantTable) -> Resolution {
    let value = table.get(token).unwrap_or(token);

    if is_literal(value) {
        Resolution::Literal(strip_quotes(value))
    } else {
        Resolution::NeedsReview(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> ConstantTable {
        let defs: Vec<ConstantDef> = pairs
            .iter()
            .map(|(name, value)| ConstantDef {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect();
        ConstantTable::from_definitions(&defs)
    }

    #[test]
    fn literal_token_passes_through_unquoted() {
        let resolution = resolve("\"foo\"", &ConstantTable::default());
        assert_eq!(resolution, Resolution::Literal("foo".to_string()));
    }

    #[test]
    fn symbolic_token_substitutes_from_table() {
        let table = table(&[("MY_VAR", "\"bar\"")]);
        assert_eq!(
            resolve("MY_VAR", &table),
            Resolution::Literal("bar".to_string())
        );
    }

    #[test]
    fn unknown_token_routes_to_review() {
        let resolution = resolve("UNKNOWN_SYM", &ConstantTable::default());
        assert_eq!(
            resolution,
            Resolution::NeedsReview("UNKNOWN_SYM".to_string())
        );
    }

    #[test]
    fn substitution_is_single_level() {
        // A constant chained to another constant stays unresolved.
        let table = table(&[("OUTER", "INNER"), ("INNER", "\"deep\"")]);
        assert_eq!(
            resolve("OUTER", &table),
            Resolution::NeedsReview("INNER".to_string())
        );
    }

    #[test]
    fn later_definition_wins() {
        let table = table(&[("NAME", "\"first\""), ("NAME", "\"second\"")]);
        assert_eq!(table.get("NAME"), Some("\"second\""));
    }

    #[test]
    fn strips_every_quote_character() {
        assert_eq!(strip_quotes("\"a\"b\""), "ab");
        assert_eq!(strip_quotes("plain"), "plain");
    }
}
