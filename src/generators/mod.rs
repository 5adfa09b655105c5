pub mod receipt;

pub use receipt::{generate_receipt, render_receipt, BatchItem, ReceiptGenerator, RenderedReceipt};
