//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nblint::config::{CellRenderingMode, Settings};
use nblint::output::OutputMode;

use crate::commands;

/// nblint - static linting for Jupyter notebooks
#[derive(Parser, Debug)]
#[command(
    name = "nblint",
    version,
    about = "Static linting for Jupyter notebooks",
    long_about = "Assess the quality of Jupyter notebooks without executing them.\n\n\
                  nblint checks single notebooks and whole repositories for\n\
                  reproducibility, structure and hygiene problems."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a configuration file (default: ./nblint.toml, then the
    /// user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comma-separated slugs of the only rules to enable
    #[arg(long, global = true, value_delimiter = ',', value_name = "SLUGS")]
    pub include: Vec<String>,

    /// Comma-separated slugs of rules to disable
    #[arg(long, global = true, value_delimiter = ',', value_name = "SLUGS")]
    pub exclude: Vec<String>,

    /// Size of the initial-cells window
    #[arg(long, global = true, value_name = "N")]
    pub initial_cells: Option<usize>,

    /// Size of the final-cells window
    #[arg(long, global = true, value_name = "N")]
    pub final_cells: Option<usize>,

    /// Minimum markdown/code cell ratio
    #[arg(long, global = true, value_name = "RATIO")]
    pub min_md_code_ratio: Option<f64>,

    /// Maximum number of cells per notebook
    #[arg(long, global = true, value_name = "N")]
    pub max_cells: Option<usize>,

    /// Maximum number of lines per code cell
    #[arg(long, global = true, value_name = "N")]
    pub max_cell_lines: Option<usize>,

    /// Maximum notebook filename length
    #[arg(long, global = true, value_name = "N")]
    pub max_filename_length: Option<usize>,

    /// Size in bytes above which a data file counts as large
    #[arg(long, global = true, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Cell rendering verbosity: full or compact
    #[arg(long, global = true, value_name = "MODE")]
    pub render_mode: Option<String>,

    /// Print the cell index next to rendered cells
    #[arg(long, global = true)]
    pub show_cell_index: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to lint
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lint a single notebook file
    Notebook {
        /// Path to the `.ipynb` file
        path: PathBuf,
    },

    /// Lint a local repository (a directory or a zip archive)
    Repo {
        /// Path to the repository directory or `.zip` archive
        path: PathBuf,
    },

    /// Clone a remote repository and lint it
    Github {
        /// URL of the remote repository
        url: String,
    },

    /// List the rules active under the current configuration
    Rules,
}

/// Build the run's settings: configuration file first, then CLI overrides
fn settings_from(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    if !cli.include.is_empty() {
        settings.include = Some(cli.include.iter().cloned().collect());
    }
    if !cli.exclude.is_empty() {
        settings.exclude = Some(cli.exclude.iter().cloned().collect());
    }
    if let Some(n) = cli.initial_cells {
        settings.initial_cells = n;
    }
    if let Some(n) = cli.final_cells {
        settings.final_cells = n;
    }
    if let Some(ratio) = cli.min_md_code_ratio {
        settings.min_md_code_ratio = ratio;
    }
    if let Some(n) = cli.max_cells {
        settings.max_cells_in_notebook = n;
    }
    if let Some(n) = cli.max_cell_lines {
        settings.max_lines_in_code_cell = n;
    }
    if let Some(n) = cli.max_filename_length {
        settings.max_filename_length = Some(n);
    }
    if let Some(bytes) = cli.max_file_size {
        settings.max_data_file_size = bytes;
    }
    if let Some(mode) = &cli.render_mode {
        settings.cell_rendering_mode = match mode.as_str() {
            "full" => CellRenderingMode::Full,
            "compact" => CellRenderingMode::Compact,
            other => anyhow::bail!("invalid render mode: {other}. Use: full, compact"),
        };
    }
    if cli.show_cell_index {
        settings.display_cell_index = true;
    }

    settings.validate()?;
    Ok(settings)
}

/// Run the CLI, returning the process exit code
pub fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let settings = settings_from(&cli)?;

    match &cli.command {
        Command::Notebook { path } => commands::notebook(path, &settings, output_mode),
        Command::Repo { path } => commands::repo(path, &settings, output_mode),
        Command::Github { url } => commands::github(url, &settings, output_mode),
        Command::Rules => commands::rules(&settings, output_mode),
    }
}
