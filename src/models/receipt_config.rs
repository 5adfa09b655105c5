use serde::{Deserialize, Deserializer, Serialize};

use crate::templates::theme::{Theme, ThemeId};

/// Which of the two receipt designs to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Flowing "received with thanks" receipt.
    #[default]
    Standard,
    /// Formal ledger receipt with Goods/Services/Cash rows.
    Table,
}

impl Layout {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "standard" | "list" => Some(Layout::Standard),
            "table" | "box" => Some(Layout::Table),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Standard => "standard",
            Layout::Table => "table",
        }
    }
}

/// Per-organisation / per-festival receipt settings as supplied by the caller.
///
/// Every field is optional. Boolean flags are tri-state: only an explicit
/// `false` turns a block off, anything else (absent, `null`, `0`, `""`)
/// leaves it on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub footer_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub show_logo: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub show_date: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub show_receipt_no: Option<bool>,
    /// Kept as free text so a malformed value falls back instead of failing.
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

pub const DEFAULT_FOOTER: &str = "Thank you for your generous contribution. May God bless you!";

/// `ReceiptConfig` with every fallback applied, computed once per receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Explicit title or organisation name; each layout has its own default.
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub footer_text: String,
    pub show_logo: bool,
    pub show_date: bool,
    pub show_receipt_no: bool,
    pub layout: Layout,
    pub theme_id: ThemeId,
    pub theme: Theme,
}

impl ResolvedConfig {
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(default)
    }
}

impl ReceiptConfig {
    pub fn resolve(&self) -> ResolvedConfig {
        self.resolve_with(Layout::default(), ThemeId::default())
    }

    /// Resolves against caller-level defaults for the layout and theme.
    pub fn resolve_with(&self, default_layout: Layout, default_theme: ThemeId) -> ResolvedConfig {
        let layout = match self.layout.as_deref().map(str::trim) {
            None | Some("") => default_layout,
            Some(raw) => Layout::parse(raw).unwrap_or_else(|| {
                tracing::debug!(layout = raw, "unknown receipt layout, using standard");
                Layout::Standard
            }),
        };

        let theme_id = match self.theme.as_deref().map(str::trim) {
            None | Some("") => default_theme,
            Some(raw) => ThemeId::from_name(raw).unwrap_or_else(|| {
                tracing::debug!(theme = raw, "unknown receipt theme, using saffron");
                ThemeId::default()
            }),
        };

        ResolvedConfig {
            title: non_blank(&self.title).or_else(|| non_blank(&self.organization_name)),
            sub_title: non_blank(&self.sub_title),
            footer_text: non_blank(&self.footer_text).unwrap_or_else(|| DEFAULT_FOOTER.to_string()),
            show_logo: self.show_logo != Some(false),
            show_date: self.show_date != Some(false),
            show_receipt_no: self.show_receipt_no != Some(false),
            layout,
            theme_id,
            theme: theme_id.theme(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
