use clap::{Parser, Subcommand};
use std::path::PathBuf;
use varscan::{version, Analyzer, Config, Reporter};

#[derive(Parser)]
#[command(name = "varscan")]
#[command(about = "Index runtime channel variable references across a source tree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a source tree and write the variable index
    Scan {
        /// Base path of the project tree
        #[arg(short, long)]
        base: PathBuf,

        /// Directories relative to the base to traverse, alongside `src`
        #[arg(short, long = "dir", value_name = "DIR")]
        dirs: Vec<String>,

        /// Exclude the conventional `src` directory from traversal
        #[arg(long)]
        exclude_src: bool,

        /// The file in which to save the output
        #[arg(short, long, default_value = "variables.json")]
        out: PathBuf,

        /// Print a report of variables that need manual review
        #[arg(long)]
        needs_review: bool,

        /// Print a report of how symbolic references were expanded
        #[arg(long)]
        show_replacements: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the config file (defaults to ~/.varscan.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            base,
            dirs,
            exclude_src,
            out,
            needs_review,
            show_replacements,
            config,
        } => {
            scan_tree(base, dirs, exclude_src, out, needs_review, show_replacements, config)?;
        }
        Commands::Config { output } => {
            generate_config(output)?;
        }
    }

    Ok(())
}

fn scan_tree(
    base: PathBuf,
    dirs: Vec<String>,
    exclude_src: bool,
    out: PathBuf,
    needs_review: bool,
    show_replacements: bool,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = if let Some(config_path) = config_path {
        Config::from_file(&config_path)?
    } else {
        Config::load()?
    };

    config.base_directory = base;
    config.output_file = out;

    // The configured set (conventionally just `src`) stays in play alongside
    // any --dir additions unless explicitly excluded.
    let mut scan_dirs = config.scan_directories.clone();
    scan_dirs.extend(dirs);
    if exclude_src {
        scan_dirs.retain(|dir| dir != "src");
    }
    config.scan_directories = scan_dirs;

    let analyzer = Analyzer::new(config.clone());
    let analysis = analyzer.analyze()?;

    let reporter = Reporter::new();

    if show_replacements {
        reporter.replacements_report(&analysis);
    }

    if needs_review {
        reporter.needs_review_report(&analysis.needs_review);
    }

    reporter.print_summary(&analysis, &config.output_file);

    let current_version = version::describe(&config.base_directory)?;
    reporter.export_json(&analysis, &current_version, &config.output_file)?;

    Ok(())
}

fn generate_config(output_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = output_path.unwrap_or_else(|| {
        Config::default_config_path().unwrap_or_else(|_| PathBuf::from("varscan.toml"))
    });

    println!("📝 Generating configuration file: {}", config_path.display());
    std::fs::write(&config_path, Config::create_documented_config())?;
    println!("✅ Configuration file created successfully!");
    println!("💡 Edit the file to customize scan directories and extensions.");

    Ok(())
}
