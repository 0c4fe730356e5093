//! # pdftables-client
//!
//! Client for the [PDFTables](https://pdftables.com) conversion API: upload a
//! PDF, get its tables back as Excel, CSV, XML or HTML.
//!
//! All table extraction happens on the remote service. This crate only turns a
//! call like "convert `report.pdf` to CSV" into one HTTP request and the
//! response into a file or a buffer.
//!
//! ## Request Shape
//!
//! ```text
//! POST <api_url>/<format>?key=<api key>[&extractor=ai-1&extract=tables]
//! Content-Type: multipart/form-data   (field "f": the PDF)
//!
//! format ∈ csv | html | xml | xlsx-single | xlsx-multiple
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdftables_client::{Client, ClientConfig, Extractor, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::with_config(
//!         ClientConfig::builder()
//!             .api_key(std::env::var("PDFTABLES_API_KEY")?)
//!             .extractor(Extractor::Ai2)
//!             .build()?,
//!     )?;
//!
//!     client.xlsx_single("invoice.pdf", "invoice.xlsx").await?;
//!     let csv = client.convert_text("invoice.pdf", OutputFormat::Csv).await?;
//!     println!("{csv}");
//!     eprintln!("{} pages left", client.remaining().await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdftables` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod output;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use blocking::BlockingClient;
pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, ExtractMode, Extractor, Timeout, DEFAULT_API_URL};
pub use error::PdfTablesError;
pub use format::{resolve_output, OutputFormat};
pub use input::ConversionInput;
pub use stream::{collect_bytes, ByteStream};
