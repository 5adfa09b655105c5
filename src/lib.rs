pub mod core;
pub mod generators;
pub mod models;
pub mod pdf;
pub mod settings;
pub mod templates;

// Re-export commonly used types
pub use core::{DocumentError, DocumentResult, PageSize, PdfConfig, UnicodeFont};
pub use generators::{generate_receipt, render_receipt, BatchItem, ReceiptGenerator, RenderedReceipt};
pub use models::{Donation, DonationCategory, DonationMode, Layout, PaymentState, ReceiptConfig};
pub use settings::Settings;
pub use templates::{Theme, ThemeId};
