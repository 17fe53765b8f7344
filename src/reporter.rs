use crate::{
    analyzer::ScanAnalysis,
    index::{ResolvedVariable, ReviewEntry},
    resolver::is_literal,
};
use anyhow::Result;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// The exported document: the sorted index plus the tree's version tag.
#[derive(Debug, Serialize)]
struct VariablesDocument<'a> {
    variables: Vec<&'a ResolvedVariable>,
    version: &'a str,
}

pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Write `{"variables": [...], "version": ...}` to `out`, with the
    /// variables array sorted case-insensitively by name.
    pub fn export_json(
        &self,
        analysis: &ScanAnalysis,
        version: &str,
        out: &Path,
    ) -> Result<PathBuf> {
        let document = VariablesDocument {
            variables: analysis.index.sorted_entries(),
            version,
        };

        let content = serde_json::to_string_pretty(&document)?;
        fs::write(out, content)?;

        Ok(out.to_path_buf())
    }

    /// One line per entry: `<path>/<filename>:<line> <token>`.
    pub fn needs_review_report(&self, entries: &[ReviewEntry]) {
        for entry in entries {
            let full_path = Path::new(&entry.path).join(&entry.filename);
            println!("{}:{} {}", full_path.display(), entry.line, entry.token);
        }
    }

    /// Diagnostic trace of how each captured token expanded. Symbolic tokens
    /// print their table value or a warning when no expansion exists; tokens
    /// that were already literal print as-is.
    pub fn replacements_report(&self, analysis: &ScanAnalysis) {
        for reference in &analysis.references {
            if !is_literal(&reference.token) {
                match analysis.constants.get(&reference.token) {
                    Some(value) => println!("\n{} -> {}", reference.token, value),
                    None => println!("\nwarning: {} has no expansion\n", reference.token),
                }
            } else {
                println!("{}", reference.token);
            }
        }
    }

    /// Summary counts: the review backlog (when any) and the indexed
    /// variable count with the output path.
    pub fn print_summary(&self, analysis: &ScanAnalysis, out: &Path) {
        if !analysis.needs_review.is_empty() {
            let count = analysis.needs_review.len();
            let word = if count == 1 { "variable" } else { "variables" };
            println!(
                "{} {} must be manually checked. Rerun with --needs-review to check.",
                count, word
            );
        }

        let count = analysis.index.len();
        let word = if count == 1 { "variable" } else { "variables" };
        let output = std::path::absolute(out).unwrap_or_else(|_| out.to_path_buf());
        println!("{} {} processed and output to {}", count, word, output.display());
    }
}
