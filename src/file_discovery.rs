use crate::config::Config;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One file found during traversal: its containing directory and its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub directory: PathBuf,
    pub filename: String,
}

impl SourceFile {
    pub fn full_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Everything the walk produced: the files, plus one diagnostic per subtree
/// that could not be read.
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    pub files: Vec<SourceFile>,
    pub diagnostics: Vec<String>,
}

pub struct FileDiscovery {
    config: Config,
}

impl FileDiscovery {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Collect every (directory, filename) pair under the configured roots.
    ///
    /// Roots are visited in configuration order. Within each root the pairs
    /// are sorted by (directory, filename) so that later passes process files
    /// in a reproducible order regardless of how the filesystem enumerates
    /// them. Overlapping roots may contribute duplicate pairs; nothing at
    /// this layer deduplicates them.
    pub fn discover_files(&self) -> DiscoveredFiles {
        let mut discovered = DiscoveredFiles::default();

        for root in self.config.scan_roots() {
            let mut files = Vec::new();

            let walker = WalkBuilder::new(&root)
                .standard_filters(self.config.respect_gitignore)
                .follow_links(false)
                .build();

            for result in walker {
                match result {
                    Ok(entry) => {
                        let path = entry.path();

                        if !path.is_file() {
                            continue;
                        }

                        if let Some(file) = self.to_source_file(path) {
                            files.push(file);
                        }
                    }
                    // An unreadable subtree ends quietly: record it and keep
                    // walking the rest of the root.
                    Err(err) => discovered.diagnostics.push(err.to_string()),
                }
            }

            files.sort_by(|a, b| (&a.directory, &a.filename).cmp(&(&b.directory, &b.filename)));
            discovered.files.append(&mut files);
        }

        discovered
    }

    fn to_source_file(&self, path: &Path) -> Option<SourceFile> {
        let directory = path.parent()?.to_path_buf();
        let filename = path.file_name()?.to_str()?.to_string();
        Some(SourceFile {
            directory,
            filename,
        })
    }

    /// Files whose extension marks them as a source of constant definitions.
    pub fn definition_candidates<'a>(&self, files: &'a [SourceFile]) -> Vec<&'a SourceFile> {
        files
            .iter()
            .filter(|f| self.config.is_definition_candidate(Path::new(&f.filename)))
            .collect()
    }

    /// Files whose extension marks them as a source of variable call sites.
    pub fn reference_candidates<'a>(&self, files: &'a [SourceFile]) -> Vec<&'a SourceFile> {
        files
            .iter()
            .filter(|f| self.config.is_reference_candidate(Path::new(&f.filename)))
            .collect()
    }
}
