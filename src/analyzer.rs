use crate::{
    config::Config,
    extractor::{ConstantExtractor, RawReference, ReferenceExtractor},
    file_discovery::FileDiscovery,
    index::{ReviewEntry, SourceLocation, VariableIndex},
    resolver::{self, ConstantTable, Resolution},
};
use anyhow::Result;

/// The result of one scan. The index and the review list are disjoint and
/// exhaustive over the raw references; the references and the constant table
/// are retained so diagnostic reports can be produced without re-scanning.
pub struct ScanAnalysis {
    pub index: VariableIndex,
    pub needs_review: Vec<ReviewEntry>,
    pub references: Vec<RawReference>,
    pub constants: ConstantTable,
    pub diagnostics: Vec<String>,
}

pub struct Analyzer {
    config: Config,
    file_discovery: FileDiscovery,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        let file_discovery = FileDiscovery::new(config.clone());
        Self {
            config,
            file_discovery,
        }
    }

    /// Run the pipeline phases strictly in order: locate files, extract all
    /// constants, extract all references, then resolve and index. The
    /// constant table is complete and read-only before resolution begins.
    pub fn analyze(&self) -> Result<ScanAnalysis> {
        let discovered = self.file_discovery.discover_files();
        for diagnostic in &discovered.diagnostics {
            eprintln!("⚠️  {}", diagnostic);
        }

        let constant_extractor = ConstantExtractor::new()?;
        let mut definitions = Vec::new();
        for file in self.file_discovery.definition_candidates(&discovered.files) {
            definitions.extend(constant_extractor.extract_file(file)?);
        }
        let constants = ConstantTable::from_definitions(&definitions);

        let reference_extractor = ReferenceExtractor::new()?;
        let mut references = Vec::new();
        for file in self.file_discovery.reference_candidates(&discovered.files) {
            references
                .extend(reference_extractor.extract_file(file, &self.config.base_directory)?);
        }

        let (index, needs_review) = Self::build_index(&references, &constants);

        Ok(ScanAnalysis {
            index,
            needs_review,
            references,
            constants,
            diagnostics: discovered.diagnostics,
        })
    }

    /// Every raw reference lands in exactly one of the two accumulators.
    fn build_index(
        references: &[RawReference],
        constants: &ConstantTable,
    ) -> (VariableIndex, Vec<ReviewEntry>) {
        let mut index = VariableIndex::new();
        let mut needs_review = Vec::new();

        for reference in references {
            match resolver::resolve(&reference.token, constants) {
                Resolution::Literal(name) => {
                    index.add_source(
                        &name,
                        SourceLocation {
                            path: reference.path.clone(),
                            filename: reference.filename.clone(),
                            line: reference.line,
                        },
                    );
                }
                Resolution::NeedsReview(token) => {
                    needs_review.push(ReviewEntry {
                        path: reference.path.clone(),
                        filename: reference.filename.clone(),
                        line: reference.line,
                        token,
                    });
                }
            }
        }

        (index, needs_review)
    }
}
