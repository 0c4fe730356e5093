//! CLI binary for pdftables-client.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ClientConfig` and writes the converted output.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use pdftables_client::{Client, ClientConfig, ExtractMode, Extractor, OutputFormat, Timeout};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Excel workbook, one sheet per page
  pdftables statement.pdf -o statement.xlsx

  # Format guessed from the extension
  pdftables statement.pdf -o statement.csv

  # Explicit format; ".csv" is appended to the output name
  pdftables --format csv statement.pdf -o statement

  # CSV to stdout
  pdftables --format csv statement.pdf

  # AI extractor with surrounding paragraphs
  pdftables --extractor ai-2 --extract tables-paragraphs report.pdf -o report.xlsx

  # Pages left on the account
  pdftables --remaining

FORMATS:
  xlsx, xlsx-multiple   Excel, one sheet per page
  xlsx-single           Excel, all pages on one sheet
  csv, xml, html        Text formats

ENVIRONMENT VARIABLES:
  PDFTABLES_API_KEY       API key (required)
  PDFTABLES_API_URL       Override the API base URL
"#;

/// Convert PDF tables to Excel, CSV, XML or HTML with PDFTables.com.
#[derive(Parser, Debug)]
#[command(
    name = "pdftables",
    version,
    about = "Convert PDF tables to Excel, CSV, XML or HTML with PDFTables.com",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP,
    // Without -o the converted body owns stdout; JSON needs a file or --remaining.
    group(ArgGroup::new("json_target").args(["output", "remaining"]).multiple(true))
)]
struct Cli {
    /// Local PDF file path.
    #[arg(required_unless_present = "remaining")]
    input: Option<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(short, long, env = "PDFTABLES_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format: xlsx, xlsx-single, xlsx-multiple, csv, xml, html.
    /// Guessed from the output extension when omitted.
    #[arg(short, long, env = "PDFTABLES_FORMAT")]
    format: Option<OutputFormat>,

    /// API key.
    #[arg(long, env = "PDFTABLES_API_KEY", hide_env_values = true)]
    api_key: String,

    /// API base URL.
    #[arg(long, env = "PDFTABLES_API_URL", default_value = pdftables_client::DEFAULT_API_URL)]
    api_url: String,

    /// Extraction engine: standard, ai-1, ai-2.
    #[arg(long, env = "PDFTABLES_EXTRACTOR", default_value = "standard")]
    extractor: Extractor,

    /// AI extractor output: tables, tables-paragraphs.
    #[arg(long, env = "PDFTABLES_EXTRACT", default_value = "tables")]
    extract: ExtractMode,

    /// Connect timeout in seconds.
    #[arg(long, env = "PDFTABLES_CONNECT_TIMEOUT", default_value_t = 10)]
    connect_timeout: u64,

    /// Read timeout in seconds.
    #[arg(long, env = "PDFTABLES_READ_TIMEOUT", default_value_t = 300)]
    read_timeout: u64,

    /// Print the number of pages left on the account and exit.
    #[arg(long)]
    remaining: bool,

    /// Print a JSON summary on stdout instead of human output.
    /// Requires --output or --remaining.
    #[arg(long, requires = "json_target")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "PDFTABLES_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFTABLES_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFTABLES_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers the only long wait; INFO logs would tear it.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && cli.output.is_some();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let client = Client::with_config(build_config(&cli)?).context("Invalid configuration")?;

    // ── Remaining-pages mode ─────────────────────────────────────────────
    if cli.remaining {
        let pages = client
            .remaining()
            .await
            .context("Failed to query remaining pages")?;
        if cli.json {
            println!("{}", serde_json::json!({ "remaining": pages }));
        } else {
            println!("{pages}");
        }
        return Ok(());
    }

    let Some(input) = cli.input.clone() else {
        anyhow::bail!("an input PDF is required");
    };

    let spinner = show_progress.then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.set_message(input.display().to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let start = Instant::now();

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref output) = cli.output {
        let result = client.convert_auto(&input, output, cli.format).await;
        if let Some(ref bar) = spinner {
            bar.finish_and_clear();
        }
        let written = result.context("Conversion failed")?;
        let size = tokio::fs::metadata(&written)
            .await
            .map(|m| m.len())
            .unwrap_or(0);

        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "input": input.display().to_string(),
                    "output": written.display().to_string(),
                    "bytes": size,
                    "duration_ms": start.elapsed().as_millis() as u64,
                })
            );
        } else if !cli.quiet {
            eprintln!(
                "{}  {}  {}  →  {}",
                green("✔"),
                dim(&format!("{size} bytes")),
                dim(&format!("{:.1}s", start.elapsed().as_secs_f64())),
                bold(&written.display().to_string()),
            );
        }
    } else {
        let format = cli.format.unwrap_or_default();
        let bytes = client
            .convert(&input, format)
            .await
            .context("Conversion failed")?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(&bytes)
            .context("Failed to write to stdout")?;
        handle.flush().ok();

        if !cli.quiet {
            eprintln!(
                "Converted {} to {} ({} bytes) in {}ms",
                input.display(),
                format,
                bytes.len(),
                start.elapsed().as_millis()
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let timeout = Timeout::new(
        Duration::from_secs(cli.connect_timeout),
        Duration::from_secs(cli.read_timeout),
    );

    let mut builder = ClientConfig::builder()
        .api_key(cli.api_key.clone())
        .api_url(cli.api_url.clone())
        .extractor(cli.extractor)
        .timeout(timeout);

    // The extract mode only travels with an AI extractor.
    if cli.extractor.is_ai() {
        builder = builder.extract(cli.extract);
    } else if cli.extract != ExtractMode::Tables {
        anyhow::bail!(
            "--extract {} requires --extractor ai-1 or ai-2",
            cli.extract
        );
    }

    builder.build().context("Invalid configuration")
}
