pub mod analyzer;
pub mod config;
pub mod extractor;
pub mod file_discovery;
pub mod index;
pub mod reporter;
pub mod resolver;
pub mod version;

pub use analyzer::Analyzer;
pub use config::Config;
pub use file_discovery::FileDiscovery;
pub use index::VariableIndex;
pub use reporter::Reporter;
pub use resolver::ConstantTable;

pub type Result<T> = anyhow::Result<T>;
