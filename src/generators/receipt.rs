use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rayon::prelude::*;

use crate::core::{DocumentResult, PdfConfig};
use crate::models::{Donation, Layout, ReceiptConfig};
use crate::pdf::{to_typst, Page, PdfGenerator};
use crate::templates::helpers::receipt_file_name;
use crate::templates::{RenderContext, TemplateRegistry, ThemeId};

/// A receipt laid out in memory, ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedReceipt {
    pub file_name: String,
    pub layout: Layout,
    pub page: Page,
    pdf_config: PdfConfig,
}

impl RenderedReceipt {
    pub fn to_pdf_bytes(&self) -> DocumentResult<Vec<u8>> {
        PdfGenerator::new().render_bytes(&self.page)
    }

    /// Writes `<dir>/<file_name>` and returns the path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> DocumentResult<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        let written = PdfGenerator::new().render(&self.page, &path)?;
        tracing::info!(path = %path.display(), bytes = written, "receipt written");
        Ok(path)
    }

    /// `data:application/pdf;base64,...` for a browser-side download.
    pub fn to_data_uri(&self) -> DocumentResult<String> {
        let bytes = self.to_pdf_bytes()?;
        Ok(format!("data:application/pdf;base64,{}", BASE64.encode(bytes)))
    }

    pub fn to_typst(&self) -> String {
        to_typst(&self.page, &self.pdf_config)
    }
}

/// Outcome of one item in a batch run.
#[derive(Debug)]
pub struct BatchItem {
    pub donation_id: String,
    pub result: DocumentResult<PathBuf>,
}

pub struct ReceiptGenerator {
    registry: Arc<TemplateRegistry>,
    pdf_config: PdfConfig,
    output_dir: PathBuf,
    default_layout: Layout,
    default_theme: ThemeId,
}

impl ReceiptGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        ReceiptGenerator {
            registry: Arc::new(TemplateRegistry::new()),
            pdf_config: PdfConfig::default(),
            output_dir: output_dir.into(),
            default_layout: Layout::default(),
            default_theme: ThemeId::default(),
        }
    }

    pub fn with_pdf_config(mut self, config: PdfConfig) -> Self {
        self.pdf_config = config;
        self
    }

    /// Layout and theme used when a `ReceiptConfig` leaves them unset.
    pub fn with_defaults(mut self, layout: Layout, theme: ThemeId) -> Self {
        self.default_layout = layout;
        self.default_theme = theme;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Lays out the receipt without touching the filesystem.
    pub fn render(&self, donation: &Donation, config: &ReceiptConfig) -> RenderedReceipt {
        let resolved = config.resolve_with(self.default_layout, self.default_theme);
        let template = self.registry.get(resolved.layout);
        let ctx = RenderContext::new(donation, &resolved, &self.pdf_config);

        RenderedReceipt {
            file_name: receipt_file_name(donation),
            layout: template.layout(),
            page: template.render(&ctx),
            pdf_config: self.pdf_config.clone(),
        }
    }

    #[tracing::instrument(skip_all, fields(donation_id = %donation.id, layout = tracing::field::Empty))]
    pub fn generate(&self, donation: &Donation, config: &ReceiptConfig) -> DocumentResult<PathBuf> {
        let receipt = self.render(donation, config);
        tracing::Span::current().record("layout", receipt.layout.as_str());
        tracing::debug!(file = %receipt.file_name, ops = receipt.page.ops().len(), "receipt laid out");
        receipt.save_to(&self.output_dir)
    }

    /// Renders and writes every donation in parallel. A failure is reported
    /// against its donation and does not stop the others.
    pub fn generate_batch(&self, donations: &[Donation], config: &ReceiptConfig) -> Vec<BatchItem> {
        donations
            .par_iter()
            .map(|donation| BatchItem {
                donation_id: donation.id.clone(),
                result: self.generate(donation, config),
            })
            .collect()
    }
}

/// Lays out one receipt on A4 with the built-in defaults.
pub fn render_receipt(donation: &Donation, config: &ReceiptConfig) -> RenderedReceipt {
    ReceiptGenerator::new(PathBuf::new()).render(donation, config)
}

/// Lays out one receipt and writes `Receipt_{donor}_{id}.pdf` into
/// `output_dir`, returning the written path.
pub fn generate_receipt(
    donation: &Donation,
    config: &ReceiptConfig,
    output_dir: impl Into<PathBuf>,
) -> DocumentResult<PathBuf> {
    ReceiptGenerator::new(output_dir).generate(donation, config)
}
