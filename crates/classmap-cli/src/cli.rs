//! Command-line interface for the classmap utility
//!
//! Collects Java and C# sources from files and directories, assembles the
//! class model and writes a draw.io document, a JSON layout payload or a
//! plain-text relationship summary.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ignore::WalkBuilder;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use classmap::core::logging::init_logging;
use classmap::{
    generate, Assembler, AssemblerConfig, Assembly, ExtractMode, LayoutConfig, OutputFormat,
    SourceFile, Variant,
};

/// Classmap - Generate class diagrams from Java and C# sources
#[derive(Parser)]
#[command(name = "classmap")]
#[command(about = "Recover class diagrams from Java and C# sources as draw.io documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Error, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a class diagram
    Generate {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file or directory (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatChoice::Drawio)]
        format: FormatChoice,

        /// Number of grid columns
        #[arg(long)]
        columns: Option<usize>,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Print the structural model as JSON
    Model {
        #[command(flatten)]
        sources: SourceArgs,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// List the relationships found between classes
    Relationships {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Show supported output formats
    Formats {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Source selection shared by the batch commands
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Source files or directories (defaults to the current directory)
    pub paths: Vec<PathBuf>,

    /// Member extraction strategy
    #[arg(short, long, value_enum, default_value_t = ModeChoice::FullSignature)]
    pub mode: ModeChoice,

    /// Skip files larger than this many bytes
    #[arg(long)]
    pub max_bytes: Option<usize>,
}

impl SourceArgs {
    fn assembler_config(&self) -> AssemblerConfig {
        let config = AssemblerConfig::new(self.mode.into());
        match self.max_bytes {
            Some(limit) => config.with_max_source_bytes(limit),
            None => config,
        }
    }
}

/// Supported output formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatChoice {
    /// draw.io XML document
    #[default]
    Drawio,
    /// JSON layout payload
    Json,
    /// Relationship summary text
    Summary,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Drawio => OutputFormat::Drawio,
            FormatChoice::Json => OutputFormat::Json,
            FormatChoice::Summary => OutputFormat::Summary,
        }
    }
}

/// Member extraction strategies
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ModeChoice {
    /// Type and name only
    NameOnly,
    /// Whole declarations with visibility markers
    #[default]
    FullSignature,
}

impl From<ModeChoice> for ExtractMode {
    fn from(value: ModeChoice) -> Self {
        match value {
            ModeChoice::NameOnly => ExtractMode::NameOnly,
            ModeChoice::FullSignature => ExtractMode::FullSignature,
        }
    }
}

/// Main CLI application
pub struct ClassmapApp {
    layout: LayoutConfig,
}

impl ClassmapApp {
    /// Create a new application instance with the default grid
    pub fn new() -> Self {
        Self::with_layout(LayoutConfig::default())
    }

    /// Create a new application instance with a layout config
    pub fn with_layout(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("CLASSMAP_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("CLASSMAP_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Classmap v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                sources,
                output,
                format,
                columns,
                compact,
            } => {
                if let Some(columns) = columns {
                    self.layout = self.layout.with_columns(columns);
                }
                self.generate_command(&sources, output, format.into(), compact, cli.verbose)
            }
            Commands::Model { sources, compact } => {
                self.model_command(&sources, compact, cli.verbose)
            }
            Commands::Relationships { sources } => {
                self.relationships_command(&sources, cli.verbose)
            }
            Commands::Formats { json } => self.formats_command(json, cli.verbose),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        sources: &SourceArgs,
        output: Option<PathBuf>,
        format: OutputFormat,
        compact: bool,
        verbose: bool,
    ) -> Result<()> {
        let assembly = self.assemble(sources, verbose)?;
        let rendered = generate(&assembly.model, format, &self.layout, compact)?;
        let target = output_target(output, &assembly, format);

        if verbose {
            match &target {
                Some(path) => eprintln!("Writing {} output to {}", format, path.display()),
                None => eprintln!("Writing {} output to stdout", format),
            }
        }

        self.write_output(target, &rendered)
    }

    /// Handle the model command
    fn model_command(&self, sources: &SourceArgs, compact: bool, verbose: bool) -> Result<()> {
        let assembly = self.assemble(sources, verbose)?;
        let json = if compact {
            serde_json::to_string(&assembly.model)?
        } else {
            serde_json::to_string_pretty(&assembly.model)?
        };
        self.write_output(None, &json)
    }

    /// Handle the relationships command
    fn relationships_command(&self, sources: &SourceArgs, verbose: bool) -> Result<()> {
        let assembly = self.assemble(sources, verbose)?;
        let summary = generate(&assembly.model, OutputFormat::Summary, &self.layout, false)?;
        self.write_output(None, &summary)
    }

    /// Handle the formats command
    fn formats_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported output formats");
        }

        if json {
            let formats: Vec<_> = OutputFormat::all()
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "name": f.to_string(),
                        "extension": f.extension(),
                        "description": f.description(),
                    })
                })
                .collect();
            let total = formats.len();
            let listing = serde_json::json!({
                "formats": formats,
                "total": total,
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported output formats:");
            for format in OutputFormat::all() {
                println!("  {:<8} - {}", format.to_string(), format.description());
            }
            println!();
            println!("Total: {} output formats supported", OutputFormat::all().len());
        }

        Ok(())
    }

    /// Read the selected sources and assemble them, reporting warnings on stderr
    fn assemble(&self, sources: &SourceArgs, verbose: bool) -> Result<Assembly> {
        let files = self.read_sources(&sources.paths)?;

        if verbose {
            eprintln!("Read {} source file(s)", files.len());
        }

        let assembly = Assembler::with_config(sources.assembler_config()).assemble(&files)?;
        for warning in &assembly.warnings {
            eprintln!("Warning: {}", warning);
        }

        if verbose {
            eprintln!(
                "Recognized {} class(es) and {} relationship(s)",
                assembly.model.class_count(),
                assembly.model.relationship_count()
            );
        }
        Ok(assembly)
    }

    /// Collect source files from paths
    ///
    /// Directories are walked recursively, honoring ignore files, and only
    /// `.java` and `.cs` files are kept. Files named explicitly are always
    /// included so that unsupported ones show up as warnings. A file that
    /// cannot be read becomes an unavailable source instead of an error.
    pub fn read_sources(&self, paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
        let roots = if paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            paths.to_vec()
        };

        let mut selected = Vec::new();
        for root in &roots {
            if root.is_dir() {
                let mut found = walk_sources(root);
                found.sort();
                selected.extend(found);
            } else {
                selected.push(root.clone());
            }
        }

        Ok(selected.iter().map(|path| load_source(path)).collect())
    }

    /// Write output to a file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ClassmapApp {
    fn default() -> Self {
        Self::new()
    }
}

fn walk_sources(root: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder.hidden(true).require_git(false);

    let mut found = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = %root.display(), error = %err, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        if Variant::from_path(entry.path()).is_some() {
            found.push(entry.into_path());
        }
    }
    debug!(root = %root.display(), files = found.len(), "Walked source directory");
    found
}

fn load_source(path: &Path) -> SourceFile {
    let id = path.display().to_string();
    match fs::read(path) {
        Ok(bytes) => SourceFile::loaded(id, String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => SourceFile::unavailable(id, e.to_string()),
    }
}

/// Resolve where output goes; `None` means stdout
///
/// An existing directory receives `<FirstClass>_diagram.<ext>`, or
/// `class_diagram.<ext>` when nothing was recognized.
pub fn output_target(
    output: Option<PathBuf>,
    assembly: &Assembly,
    format: OutputFormat,
) -> Option<PathBuf> {
    let path = output?;
    if path.to_string_lossy() == "-" {
        return None;
    }
    if path.is_dir() {
        let stem = assembly.first_class().unwrap_or("class");
        return Some(path.join(format!("{}_diagram.{}", stem, format.extension())));
    }
    Some(path)
}
