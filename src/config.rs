use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_directory: PathBuf,
    pub scan_directories: Vec<String>,
    pub definition_extensions: Vec<String>,
    pub reference_extensions: Vec<String>,
    pub output_file: PathBuf,
    pub respect_gitignore: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
            scan_directories: vec!["src".to_string()],
            definition_extensions: vec![
                "c".to_string(),
                "h".to_string(),
                "cpp".to_string(),
                "hpp".to_string(),
            ],
            reference_extensions: vec!["c".to_string(), "cpp".to_string()],
            output_file: PathBuf::from("variables.json"),
            respect_gitignore: false,
        }
    }
}

impl Config {
    /// Get the default config file path (~/.varscan.toml)
    pub fn default_config_path() -> crate::Result<PathBuf> {
        let home_dir = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(PathBuf::from(home_dir).join(".varscan.toml"))
    }

    /// Load config from file, falling back to defaults if file doesn't exist
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            println!("📝 Loading configuration from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific file path
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a file
    pub fn to_file(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The roots to traverse: each scan directory joined to the base.
    pub fn scan_roots(&self) -> Vec<PathBuf> {
        self.scan_directories
            .iter()
            .map(|dir| self.base_directory.join(dir))
            .collect()
    }

    /// Whether a file may contain `#define` constant definitions.
    pub fn is_definition_candidate(&self, path: &Path) -> bool {
        self.has_extension(path, &self.definition_extensions)
    }

    /// Whether a file may contain variable-reference call sites.
    pub fn is_reference_candidate(&self, path: &Path) -> bool {
        self.has_extension(path, &self.reference_extensions)
    }

    fn has_extension(&self, path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    /// Create a config file with all available options documented
    pub fn create_documented_config() -> String {
        r#"# varscan Configuration File
# This file configures how varscan scans a source tree for variable references

# Base path of the project tree (overridden by --base)
base_directory = "."

# Directories relative to the base to traverse
scan_directories = ["src"]

# File extensions that may contain #define constant definitions
definition_extensions = ["c", "h", "cpp", "hpp"]

# File extensions that may contain variable-reference call sites
reference_extensions = ["c", "cpp"]

# Where to write the variable index (overridden by --out)
output_file = "variables.json"

# Skip files matched by .gitignore during traversal
respect_gitignore = false
"#
        .to_string()
    }
}
