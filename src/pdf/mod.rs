pub mod builder;
pub mod generator;
pub mod typst;

pub use builder::*;
pub use generator::PdfGenerator;
pub use typst::to_typst;
