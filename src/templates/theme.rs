use serde::{Deserialize, Serialize};

use crate::pdf::Rgb;

/// Colour pair used by both layouts: `primary` for borders, headings and
/// accents, `light` for the header band and highlighted cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Rgb,
    pub light: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Saffron,
    Blue,
    Green,
    Rose,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [ThemeId::Saffron, ThemeId::Blue, ThemeId::Green, ThemeId::Rose];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "saffron" => Some(ThemeId::Saffron),
            "blue" => Some(ThemeId::Blue),
            "green" => Some(ThemeId::Green),
            "rose" => Some(ThemeId::Rose),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Saffron => "saffron",
            ThemeId::Blue => "blue",
            ThemeId::Green => "green",
            ThemeId::Rose => "rose",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeId::Saffron => Theme { primary: Rgb(255, 153, 51), light: Rgb(255, 245, 230) },
            ThemeId::Blue => Theme { primary: Rgb(37, 99, 235), light: Rgb(239, 246, 255) },
            ThemeId::Green => Theme { primary: Rgb(5, 150, 105), light: Rgb(236, 253, 245) },
            ThemeId::Rose => Theme { primary: Rgb(225, 29, 72), light: Rgb(255, 241, 242) },
        }
    }
}

/// Never fails: absent or unrecognised names resolve to saffron.
pub fn resolve_theme(name: Option<&str>) -> Theme {
    name.and_then(ThemeId::from_name).unwrap_or_default().theme()
}
