pub mod helpers;
pub mod layouts;
pub mod template_trait;
pub mod theme;

pub use template_trait::{ReceiptTemplate, RenderContext, TemplateRegistry};
pub use theme::{resolve_theme, Theme, ThemeId};
