//! Command-line interface for the linter.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::checker::LanguageToolClient;
use crate::config::{
    validate_extension, validate_server_url, validate_timeout, DEFAULT_EXTENSION,
    DEFAULT_SERVER_URL, HTTP_TIMEOUT_SECS,
};
use crate::error::{LintError, Result};
use crate::http::create_client;
use crate::linter::Linter;
use crate::output::CsvIssueWriter;
use crate::profile::{create_cnxml_profile, load_profile, profile_to_yaml, LintProfile};

/// CNXML Linter - Grammar-check CNXML documents against a LanguageTool server.
#[derive(Parser)]
#[command(name = "cnxml-linter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check all documents below a directory and write issues as CSV.
    Check {
        /// Directory to walk (or a single document)
        directory: PathBuf,

        /// Base URL of the LanguageTool server
        #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Request timeout in seconds
        #[arg(short, long, default_value_t = HTTP_TIMEOUT_SECS)]
        timeout: u64,

        /// Extension of the documents to check
        #[arg(short, long, default_value = DEFAULT_EXTENSION)]
        extension: String,

        /// YAML lint profile replacing the built-in CNXML profile
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Write CSV to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the built-in CNXML lint profile as YAML.
    Profile,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            directory,
            server,
            timeout,
            extension,
            profile,
            output,
        } => check_command(
            &directory,
            &server,
            timeout,
            &extension,
            profile.as_deref(),
            output.as_deref(),
        ),
        Commands::Profile => profile_command(),
    }
}

/// Execute the check command.
fn check_command(
    directory: &Path,
    server: &str,
    timeout: u64,
    extension: &str,
    profile: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    // Validate inputs before contacting the server
    let server_url = validate_server_url(server)?;
    validate_extension(extension)?;
    validate_timeout(timeout)?;

    if !directory.exists() {
        return Err(LintError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Input path does not exist: {}", directory.display()),
        )));
    }

    let profile: LintProfile = match profile {
        Some(path) => load_profile(path)?,
        None => create_cnxml_profile(),
    };

    let client = create_client(Duration::from_secs(timeout))?;
    let checker = LanguageToolClient::new(client, &server_url);

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = CsvIssueWriter::new(sink)?;

    eprintln!(
        "{} {} using {}",
        style("Checking").bold(),
        style(directory.display()).cyan(),
        style(checker.url()).green()
    );

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let linter = Linter::new(&profile, &checker);
    let result = linter.lint_tree(directory, extension, &mut writer, |path| {
        pb.set_message(path.display().to_string());
    });

    pb.finish_and_clear();
    let summary = result?;
    writer.into_inner()?.flush()?;

    eprintln!(
        "  Documents: {}  Blocks: {}  Issues: {}",
        summary.files,
        summary.stats.blocks,
        style(summary.stats.issues).yellow().bold()
    );
    if summary.stats.suppressed > 0 {
        eprintln!("  Suppressed by node rules: {}", summary.stats.suppressed);
    }
    if summary.failed > 0 {
        eprintln!("  Skipped: {}", style(summary.failed).red().bold());
    }

    Ok(())
}

/// Execute the profile command.
fn profile_command() -> Result<()> {
    let yaml = profile_to_yaml(&create_cnxml_profile())?;
    print!("{yaml}");
    Ok(())
}
