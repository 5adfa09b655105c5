pub mod donation;
pub mod payment;
pub mod receipt_config;

pub use donation::*;
pub use payment::*;
pub use receipt_config::*;
