pub mod common;
mod standard;
mod table;

pub use standard::StandardLayout;
pub use table::{Columns, TableLayout, LEDGER_ROWS};
