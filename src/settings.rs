use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::{install_unicode_font, DocumentResult, PageSize, PdfConfig, UnicodeFont};
use crate::generators::ReceiptGenerator;
use crate::models::Layout;
use crate::templates::ThemeId;

/// Process-wide defaults for the receipt binary.
///
/// Read from an optional `receipt.toml` (or the file passed explicitly), then
/// overridden by `RECEIPT_*` environment variables, e.g.
/// `RECEIPT_OUTPUT_DIR=/srv/receipts` or `RECEIPT_DEFAULT_LAYOUT=table`.
///
/// `unicode_font` (`RECEIPT_UNICODE_FONT`) names a TrueType file used for donor
/// names outside Latin-1; without it the usual system locations are searched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub page_size: PageSize,
    pub default_layout: Layout,
    pub default_theme: ThemeId,
    pub unicode_font: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: PathBuf::from("receipts"),
            page_size: PageSize::default(),
            default_layout: Layout::default(),
            default_theme: ThemeId::default(),
            unicode_font: None,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> DocumentResult<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("receipt").required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("RECEIPT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize::<Settings>()?)
    }

    /// Installs the configured Unicode font. Call once, before rendering.
    pub fn install_fonts(&self) -> DocumentResult<()> {
        let Some(path) = &self.unicode_font else {
            return Ok(());
        };
        let font = UnicodeFont::load(path)?;
        if install_unicode_font(font) {
            tracing::info!(font = %path.display(), "unicode font installed");
        } else {
            tracing::warn!(font = %path.display(), "unicode font already set, ignoring");
        }
        Ok(())
    }

    pub fn pdf_config(&self) -> PdfConfig {
        PdfConfig::builder().page_size(self.page_size).build()
    }

    pub fn generator(&self) -> ReceiptGenerator {
        ReceiptGenerator::new(self.output_dir.clone())
            .with_pdf_config(self.pdf_config())
            .with_defaults(self.default_layout, self.default_theme)
    }
}
