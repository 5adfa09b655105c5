use std::collections::HashMap;
use std::sync::Arc;

use crate::core::PdfConfig;
use crate::models::{Donation, Layout, PaymentState, ResolvedConfig};
use crate::pdf::Page;
use crate::templates::theme::Theme;

/// Everything a layout needs to draw one receipt. Built once per call; the
/// layouts never mutate the donation or the configuration.
pub struct RenderContext<'a> {
    pub donation: &'a Donation,
    pub config: &'a ResolvedConfig,
    pub state: PaymentState,
    pub pdf: &'a PdfConfig,
}

impl<'a> RenderContext<'a> {
    pub fn new(donation: &'a Donation, config: &'a ResolvedConfig, pdf: &'a PdfConfig) -> Self {
        RenderContext {
            donation,
            config,
            state: PaymentState::derive(donation),
            pdf,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }
}

/// Base trait for the receipt layouts.
pub trait ReceiptTemplate: Send + Sync {
    /// Draws the complete receipt onto a fresh page.
    fn render(&self, ctx: &RenderContext<'_>) -> Page;

    fn layout(&self) -> Layout;

    /// Title used when neither a title nor an organisation name is configured.
    fn default_title(&self) -> &str;

    fn description(&self) -> &str {
        "Receipt layout"
    }
}

/// Registry of the available layouts.
pub struct TemplateRegistry {
    templates: HashMap<Layout, Arc<dyn ReceiptTemplate>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        use crate::templates::layouts::{StandardLayout, TableLayout};

        let mut templates: HashMap<Layout, Arc<dyn ReceiptTemplate>> = HashMap::new();

        let standard = Arc::new(StandardLayout::new());
        templates.insert(standard.layout(), standard);

        let table = Arc::new(TableLayout::new());
        templates.insert(table.layout(), table);

        Self { templates }
    }

    /// Template for `layout`, falling back to the standard layout.
    pub fn get(&self, layout: Layout) -> Arc<dyn ReceiptTemplate> {
        self.templates
            .get(&layout)
            .or_else(|| self.templates.get(&Layout::Standard))
            .cloned()
            .unwrap_or_else(|| Arc::new(crate::templates::layouts::StandardLayout::new()))
    }

    pub fn list(&self) -> Vec<(Layout, String)> {
        let mut list: Vec<_> = self
            .templates
            .iter()
            .map(|(layout, template)| (*layout, template.description().to_string()))
            .collect();
        list.sort_by_key(|(layout, _)| layout.as_str());
        list
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_both_layouts() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.get(Layout::Table).layout(), Layout::Table);
        assert_eq!(
            registry.list().iter().map(|(l, _)| *l).collect::<Vec<_>>(),
            vec![Layout::Standard, Layout::Table]
        );
    }

    #[test]
    fn default_titles_differ_per_layout() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.get(Layout::Standard).default_title(), "Festival Receipt");
        assert_eq!(registry.get(Layout::Table).default_title(), "Charitable Donation Receipt");
    }
}
