//! CLI binary for viajes.
//!
//! A thin shim over the library crate: parse flags, load the configuration
//! once, dispatch exactly one command, and turn any failure into a message on
//! stderr plus a non-zero exit status.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use viajes::pipeline::input::validate_pdf_path;
use viajes::{config, convert_external, convert_native, greeting, AppConfig, ExternalTool, PdfiumExtractor};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Check which services are configured
  viajes hello --name Ana

  # Convert with the built-in extractor into ./out/trip.md
  viajes convert-pdf-pymu trip.pdf --output-dir out

  # Convert with docetl into a fresh temporary directory
  viajes convert-pdf-docetl trip.pdf

ENVIRONMENT VARIABLES (read from .env when present):
  OPENAI_API_KEY          OpenAI API key                     (required)
  SUPABASE_URL            Supabase project URL               (required)
  SUPABASE_KEY            Supabase API key                   (required)
  LANGFUSE_PUBLIC_KEY     Langfuse public key                (required)
  LANGFUSE_SECRET_KEY     Langfuse secret key                (required)
  LANGFUSE_HOST           Langfuse host (default: https://cloud.langfuse.com)
  PDFIUM_LIB_PATH         Path to libpdfium for convert-pdf-pymu
  VIAJES_DOCETL_BIN       docetl executable for convert-pdf-docetl
"#;

/// RAG Chatbot CLI - Manage and interact with the chatbot.
#[derive(Parser, Debug)]
#[command(
    name = "viajes",
    version,
    about = "RAG Chatbot CLI - Manage and interact with the chatbot",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "VIAJES_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "VIAJES_QUIET")]
    quiet: bool,

    /// Disable the progress spinner.
    #[arg(long, global = true, env = "VIAJES_NO_PROGRESS")]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simple command to test the CLI is working.
    Hello {
        /// The name to greet.
        #[arg(long, default_value = viajes::diagnostic::DEFAULT_NAME)]
        name: String,
    },

    /// Convert a PDF file to Markdown with the built-in page extractor.
    ///
    /// Every non-blank page is wrapped in PAGE START/END markers that keep
    /// its original page number.
    #[command(name = "convert-pdf-pymu")]
    ConvertPdfPymu {
        /// Path to the PDF file to convert.
        #[arg(value_parser = existing_file)]
        pdf_path: PathBuf,

        /// Directory to save the Markdown file. If not provided, a temporary directory will be used.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Path to an existing libpdfium. Defaults to the system library.
        #[arg(long, env = "PDFIUM_LIB_PATH")]
        pdfium_lib: Option<PathBuf>,
    },

    /// Convert a PDF file to Markdown using the docetl CLI.
    #[command(name = "convert-pdf-docetl")]
    ConvertPdfDocetl {
        /// Path to the PDF file to convert.
        #[arg(value_parser = existing_file)]
        pdf_path: PathBuf,

        /// Directory to save the Markdown file. If not provided, a temporary directory will be used.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// docetl executable name or path.
        #[arg(long, env = "VIAJES_DOCETL_BIN", default_value = viajes::pipeline::external::DEFAULT_PROGRAM)]
        docetl_bin: PathBuf,
    },
}

/// clap value parser: the path must name an existing, readable, regular file.
fn existing_file(s: &str) -> std::result::Result<PathBuf, String> {
    validate_pdf_path(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be merged before parsing so its values feed clap's `env =`
    // fallbacks and RUST_LOG.
    config::load_env_file();
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Configuration (fail fast) ────────────────────────────────────────
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} Configuration error: {e}", red("✘"));
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Configuration loaded: {:?}", config);

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    match &cli.command {
        Command::Hello { name } => {
            print!("{}", greeting(config, name));
            Ok(())
        }

        Command::ConvertPdfPymu {
            pdf_path,
            output_dir,
            pdfium_lib,
        } => {
            let extractor = match pdfium_lib {
                Some(lib) => PdfiumExtractor::with_library(lib),
                None => PdfiumExtractor::new(),
            };

            let spinner = spinner(cli, pdf_path);
            let result = convert_native(extractor, pdf_path, output_dir.as_deref()).await;
            spinner.finish_and_clear();

            let output = result.map_err(|e| anyhow!("Error converting PDF: {e}"))?;
            report_success(cli, "Successfully converted PDF to Markdown!", &output);
            Ok(())
        }

        Command::ConvertPdfDocetl {
            pdf_path,
            output_dir,
            docetl_bin,
        } => {
            let tool = ExternalTool::new(docetl_bin.as_os_str());

            let spinner = spinner(cli, pdf_path);
            let result = convert_external(tool, pdf_path, output_dir.as_deref()).await;
            spinner.finish_and_clear();

            let output = result.map_err(|e| {
                if e.is_tool_error() {
                    anyhow!("{e}")
                } else {
                    anyhow!("Error converting PDF with docetl: {e}")
                }
            })?;
            report_success(
                cli,
                "Successfully converted PDF to Markdown with docetl!",
                &output,
            );
            Ok(())
        }
    }
}

/// Spinner on stderr while a conversion runs; hidden when quiet or disabled.
fn spinner(cli: &Cli, pdf_path: &Path) -> ProgressBar {
    if cli.quiet || cli.no_progress {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Converting");
    bar.set_message(pdf_path.display().to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn report_success(cli: &Cli, headline: &str, output: &Path) {
    if cli.quiet {
        return;
    }
    println!("{} {headline}", green("✔"));
    println!("Output file: {}", output.display());
}
