pub mod config;
pub mod error;
pub mod fonts;
pub mod metrics;

pub use config::*;
pub use error::*;
pub use fonts::{install_unicode_font, unicode_font, UnicodeFont};
pub use metrics::*;
