use crate::file_discovery::SourceFile;
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Matches `#define <name> <value>`: the name is the first space-free token,
/// the value is the greedy remainder of the line and may contain spaces.
const DEFINE_PATTERN: &str = r"#define (?P<name>\S+) (?P<value>.+)";

/// Matches the variable call families: the boolean setters
/// (`switch_channel_var_true` / `..._false`) and the get/set families with
/// arbitrary suffix. Captures the second call argument, which is either a
/// quoted literal or a symbolic name resolved later. The pattern only bounds
/// the token; deciding whether it is literal happens in the resolver.
const REFERENCE_PATTERN: &str = r#"(switch_channel_var_(true|false)|switch_channel_(get|set)_variable\w*)\(\w+[\w*>-]*,\s*(?P<token>"*\w+"*)"#;

/// A `#define` pair captured from a definition-candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDef {
    pub name: String,
    pub value: String,
}

/// An unresolved variable reference captured at a call site, prior to
/// constant substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReference {
    pub path: String,
    pub filename: String,
    pub line: usize,
    pub token: String,
}

/// Drop everything from the first closing parenthesis onward. A greedy
/// capture can pick up trailing call syntax like `"foo")`.
pub fn truncate_at_paren(token: &str) -> &str {
    token.split(')').next().unwrap_or(token)
}

/// Keep only the first word-like unit of the token.
pub fn truncate_at_whitespace(token: &str) -> &str {
    token.split_whitespace().next().unwrap_or("")
}

/// Strip the base-directory prefix and any leading separator, producing a
/// root-relative directory string.
fn relative_directory(directory: &Path, base: &Path) -> String {
    let relative = directory.strip_prefix(base).unwrap_or(directory);
    relative
        .to_string_lossy()
        .trim_start_matches(['/', '\\'])
        .to_string()
}

/// Read a file as text, substituting replacement characters for undecodable
/// byte sequences rather than failing the file. An unopenable file is fatal.
fn read_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub struct ConstantExtractor {
    pattern: Regex,
}

impl ConstantExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(DEFINE_PATTERN)?,
        })
    }

    /// Capture every `#define` pair in the file, in line order. Duplicate
    /// names are all kept here; overwrite happens when the sequence is
    /// materialized into the constant table.
    pub fn extract_file(&self, file: &SourceFile) -> Result<Vec<ConstantDef>> {
        let content = read_lossy(&file.full_path())?;
        let mut found = Vec::new();

        for line in content.lines() {
            if let Some(captures) = self.pattern.captures(line) {
                found.push(ConstantDef {
                    name: captures["name"].to_string(),
                    value: captures["value"].to_string(),
                });
            }
        }

        Ok(found)
    }
}

pub struct ReferenceExtractor {
    pattern: Regex,
}

impl ReferenceExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(REFERENCE_PATTERN)?,
        })
    }

    /// Capture every variable call site in the file with its 1-based line
    /// number and the file's directory relative to `base`.
    pub fn extract_file(&self, file: &SourceFile, base: &Path) -> Result<Vec<RawReference>> {
        let content = read_lossy(&file.full_path())?;
        let path = relative_directory(&file.directory, base);
        let mut found = Vec::new();

        for (line_idx, line) in content.lines().enumerate() {
            if let Some(captures) = self.pattern.captures(line) {
                let token = captures.name("token").map(|m| m.as_str()).unwrap_or("");
                let token = truncate_at_whitespace(truncate_at_paren(token));

                found.push(RawReference {
                    path: path.clone(),
                    filename: file.filename.clone(),
                    line: line_idx + 1,
                    token: token.to_string(),
                });
            }
        }

        Ok(found)
    }
}
