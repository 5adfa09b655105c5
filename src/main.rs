use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use receipt_generator::pdf::Rgb;
use receipt_generator::templates::TemplateRegistry;
use receipt_generator::{Donation, ReceiptConfig, Settings, ThemeId};

/// Receipt generator - donation receipts as PDF
#[derive(Parser, Debug)]
#[command(name = "receipt-generator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ./receipt.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a single donation receipt
    Render {
        /// Donation record (JSON)
        #[arg(long, value_name = "FILE")]
        donation: PathBuf,

        /// Receipt configuration (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output directory, overrides the settings
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Layout override: standard or table
        #[arg(long)]
        layout: Option<String>,

        /// Theme override: saffron, blue, green or rose
        #[arg(long)]
        theme: Option<String>,

        /// Also write the Typst source next to the PDF
        #[arg(long)]
        typst: bool,
    },

    /// Render receipts for a JSON array of donations
    Batch {
        /// Donation records (JSON array)
        #[arg(long, value_name = "FILE")]
        donations: PathBuf,

        /// Receipt configuration (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output directory, overrides the settings
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// List the available layouts
    Layouts,

    /// List the available colour themes
    Themes,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.settings.as_deref()).context("failed to load settings")?;
    settings.install_fonts().context("failed to load unicode font")?;

    match cli.command {
        Commands::Render { donation, config, out, layout, theme, typst } => {
            if let Some(out) = out {
                settings.output_dir = out;
            }
            let donation: Donation = read_json(&donation)?;
            let mut config = read_config(config.as_deref())?;
            if layout.is_some() {
                config.layout = layout;
            }
            if theme.is_some() {
                config.theme = theme;
            }

            let generator = settings.generator();
            let receipt = generator.render(&donation, &config);
            let path = receipt.save_to(generator.output_dir())?;

            if typst {
                let typst_path = path.with_extension("typ");
                fs::write(&typst_path, receipt.to_typst())
                    .with_context(|| format!("failed to write {}", typst_path.display()))?;
                tracing::info!(path = %typst_path.display(), "typst source written");
            }

            println!("{}", path.display());
        }
        Commands::Batch { donations, config, out } => {
            if let Some(out) = out {
                settings.output_dir = out;
            }
            let donations: Vec<Donation> = read_json(&donations)?;
            let config = read_config(config.as_deref())?;

            let results = settings.generator().generate_batch(&donations, &config);
            let mut failed = 0;
            for item in &results {
                match &item.result {
                    Ok(path) => println!("{}", path.display()),
                    Err(e) => {
                        failed += 1;
                        tracing::error!(donation_id = %item.donation_id, error = %e, "receipt failed");
                    }
                }
            }

            tracing::info!(total = results.len(), failed, "batch complete");
            if failed > 0 {
                bail!("{} of {} receipts failed", failed, results.len());
            }
        }
        Commands::Layouts => {
            for (layout, description) in TemplateRegistry::new().list() {
                println!("  {:<10} {}", layout.as_str(), description);
            }
        }
        Commands::Themes => {
            for id in ThemeId::ALL {
                let Rgb(r, g, b) = id.theme().primary;
                println!("  {:<10} #{:02x}{:02x}{:02x}", id.as_str(), r, g, b);
            }
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn read_config(path: Option<&Path>) -> Result<ReceiptConfig> {
    match path {
        Some(path) => read_json(path),
        None => Ok(ReceiptConfig::default()),
    }
}
