use serde::{Deserialize, Serialize};

/// Physical paper size. All page coordinates are millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    A5,
    Letter,
    Custom { width: f32, height: f32 },
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

impl PageSize {
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone)]
pub struct PdfConfig {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub font_family: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        PdfConfig {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            font_family: "Helvetica".to_string(),
        }
    }
}

impl PdfConfig {
    pub fn builder() -> PdfConfigBuilder {
        PdfConfigBuilder::default()
    }

    /// Page width and height after applying the orientation.
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.page_size.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn to_typst_header(&self) -> String {
        let (w, h) = self.page_dimensions();
        format!(
            r#"#set page(
  width: {}mm,
  height: {}mm,
  margin: 0pt
)
#set text(
  font: "{}"
)"#,
            w, h, self.font_family
        )
    }
}

#[derive(Default)]
pub struct PdfConfigBuilder {
    page_size: Option<PageSize>,
    orientation: Option<Orientation>,
}

impl PdfConfigBuilder {
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn build(self) -> PdfConfig {
        let default = PdfConfig::default();
        PdfConfig {
            page_size: self.page_size.unwrap_or(default.page_size),
            orientation: self.orientation.unwrap_or(default.orientation),
            font_family: default.font_family,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_swaps_dimensions() {
        let config = PdfConfig::builder()
            .page_size(PageSize::A4)
            .orientation(Orientation::Landscape)
            .build();
        assert_eq!(config.page_dimensions(), (297.0, 210.0));
    }

    #[test]
    fn builder_keeps_defaults_for_unset_fields() {
        let config = PdfConfig::builder().page_size(PageSize::A5).build();
        assert_eq!(config.page_dimensions(), (148.0, 210.0));
        assert_eq!(config.font_family, "Helvetica");
    }

    #[test]
    fn page_size_deserializes_from_snake_case() {
        let size: PageSize = serde_json::from_str("\"letter\"").unwrap();
        assert_eq!(size, PageSize::Letter);
    }
}
