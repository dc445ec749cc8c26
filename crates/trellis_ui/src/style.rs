//! Visual style: named nine-patches, a font and text colors.
//!
//! A style is loaded once from a JSON sheet:
//!
//! ```json
//! {
//!   "image": "skin.png",
//!   "font": "ui.ttf",
//!   "text_color": [0.0, 0.0, 0.0],
//!   "disabled_text_color": [0.5, 0.5, 0.5],
//!   "regions": {
//!     "Button_normal": [[0.0, 0.0, 0.25, 0.25], [4, 4, 4, 4]]
//!   }
//! }
//! ```
//!
//! Region entries are `[[u, v, w, h], [left, right, bottom, top]]` with the
//! UV rect normalized and the borders in texture pixels. When a name repeats,
//! the first entry wins.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, info};
use trellis_render::{Color, FontId, NinePatch, Renderer, TextureLoader};

use crate::error::{UiError, UiResult};

/// Region names the built-in widgets look up.
pub mod regions {
    /// Panel and color picker background.
    pub const PANEL: &str = "Panel";
    /// Button at rest.
    pub const BUTTON_NORMAL: &str = "Button_normal";
    /// Button under the pointer.
    pub const BUTTON_HOVER: &str = "Button_hover";
    /// Button held down.
    pub const BUTTON_CLICK: &str = "Button_click";
    /// Disabled button.
    pub const BUTTON_DISABLED: &str = "Button_disabled";
    /// Check box frame.
    pub const CHECKBOX_NORMAL: &str = "CheckBox_normal";
    /// Disabled check box frame.
    pub const CHECKBOX_DISABLED: &str = "CheckBox_disabled";
    /// Check mark.
    pub const CHECKBOX_MARK_NORMAL: &str = "CheckBox_Mark_normal";
    /// Disabled check mark.
    pub const CHECKBOX_MARK_DISABLED: &str = "CheckBox_Mark_disabled";
    /// Slider track.
    pub const SLIDER_TRACK_NORMAL: &str = "Slider_Track_normal";
    /// Disabled slider track.
    pub const SLIDER_TRACK_DISABLED: &str = "Slider_Track_disabled";
    /// Slider thumb at rest.
    pub const SLIDER_THUMB_NORMAL: &str = "Slider_Thumb_normal";
    /// Slider thumb under the pointer.
    pub const SLIDER_THUMB_HOVER: &str = "Slider_Thumb_hover";
    /// Slider thumb being dragged.
    pub const SLIDER_THUMB_CLICK: &str = "Slider_Thumb_click";
    /// Disabled slider thumb.
    pub const SLIDER_THUMB_DISABLED: &str = "Slider_Thumb_disabled";
    /// Text box at rest.
    pub const TEXTBOX_NORMAL: &str = "TextBox_normal";
    /// Text box under the pointer.
    pub const TEXTBOX_HOVER: &str = "TextBox_hover";
    /// Focused text box.
    pub const TEXTBOX_CLICK: &str = "TextBox_click";
    /// Disabled text box.
    pub const TEXTBOX_DISABLED: &str = "TextBox_disabled";
    /// Text selection highlight.
    pub const TEXTBOX_SELECT: &str = "TextBox_select";
    /// Color picker cursor.
    pub const DOT: &str = "Dot";
}

/// One `regions` entry: normalized UV rect, then left/right/bottom/top borders.
pub type RegionSpec = ([f32; 4], [f32; 4]);

/// Parsed style sheet, before any GPU resource exists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyleSheet {
    /// Atlas image path.
    pub image: Option<PathBuf>,
    /// Font path; the rasterizer's default font when absent.
    pub font: Option<PathBuf>,
    /// Text color of enabled widgets.
    pub text_color: Option<[f32; 3]>,
    /// Text color of disabled widgets.
    pub disabled_text_color: Option<[f32; 3]>,
    /// Regions in document order, duplicates included.
    #[serde(default, deserialize_with = "ordered_regions")]
    pub regions: Option<Vec<(String, RegionSpec)>>,
}

fn ordered_regions<'de, D>(deserializer: D) -> Result<Option<Vec<(String, RegionSpec)>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Ordered;

    impl<'de> Visitor<'de> for Ordered {
        type Value = Vec<(String, RegionSpec)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of region names to [[u, v, w, h], [l, r, b, t]]")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, spec)) = map.next_entry::<String, RegionSpec>()? {
                out.push((name, spec));
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(Ordered).map(Some)
}

impl StyleSheet {
    /// Parses a JSON style sheet.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::StyleJson`] on malformed JSON and
    /// [`UiError::InvalidStyle`] when `image` or `regions` is missing.
    pub fn parse(json: &str) -> UiResult<Self> {
        let sheet: Self = serde_json::from_str(json)?;
        if sheet.regions.is_none() || sheet.image.is_none() {
            return Err(UiError::InvalidStyle(
                "style needs both `image` and `regions`".to_owned(),
            ));
        }
        Ok(sheet)
    }
}

/// Immutable style shared by every widget of a [`Tui`](crate::Tui).
#[derive(Debug, Clone)]
pub struct Style {
    textures: HashMap<String, NinePatch>,
    font: FontId,
    text_color: Color,
    disabled_text_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            textures: HashMap::new(),
            font: FontId::DEFAULT,
            text_color: Color::BLACK,
            disabled_text_color: Color::GREY,
        }
    }
}

impl Style {
    /// An empty style with default colors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads, parses and uploads a style file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or if the atlas or font
    /// cannot be loaded.
    pub fn load(
        path: impl AsRef<Path>,
        loader: &mut dyn TextureLoader,
        renderer: &mut Renderer,
    ) -> UiResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| UiError::StyleIo {
            path: path.to_path_buf(),
            source,
        })?;
        let sheet = StyleSheet::parse(&json)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_sheet(&sheet, base, loader, renderer)
    }

    /// Builds a style from a parsed sheet. Relative paths resolve against `base`.
    ///
    /// # Errors
    ///
    /// Fails if the sheet lacks `image` or `regions`, or if the atlas or font
    /// cannot be loaded.
    pub fn from_sheet(
        sheet: &StyleSheet,
        base: &Path,
        loader: &mut dyn TextureLoader,
        renderer: &mut Renderer,
    ) -> UiResult<Self> {
        let (Some(image), Some(regions)) = (&sheet.image, &sheet.regions) else {
            return Err(UiError::InvalidStyle(
                "style needs both `image` and `regions`".to_owned(),
            ));
        };

        let pixels = loader.load(&base.join(image))?;
        let atlas = renderer.upload(&pixels)?;
        let font = match &sheet.font {
            Some(font) => renderer.load_font(&base.join(font))?,
            None => FontId::DEFAULT,
        };

        let mut style = Self {
            font,
            ..Self::default()
        };
        if let Some(c) = sheet.text_color {
            style.text_color = Color::from(c);
        }
        if let Some(c) = sheet.disabled_text_color {
            style.disabled_text_color = Color::from(c);
        }

        for (name, (uv, [left, right, bottom, top])) in regions {
            if style.textures.contains_key(name) {
                debug!("Ignoring duplicate style region {}", name);
                continue;
            }
            style.textures.insert(
                name.clone(),
                NinePatch::new(atlas, *uv, *left, *right, *bottom, *top),
            );
        }

        info!(
            "Loaded style with {} regions from {}",
            style.textures.len(),
            image.display()
        );
        Ok(style)
    }

    /// Adds or replaces a region.
    #[must_use]
    pub fn with_region(mut self, name: impl Into<String>, patch: NinePatch) -> Self {
        self.textures.insert(name.into(), patch);
        self
    }

    /// Sets the default font.
    #[must_use]
    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    /// Sets both text colors.
    #[must_use]
    pub fn with_text_colors(mut self, enabled: Color, disabled: Color) -> Self {
        self.text_color = enabled;
        self.disabled_text_color = disabled;
        self
    }

    /// Looks up a region by name.
    #[must_use]
    pub fn texture(&self, name: &str) -> Option<&NinePatch> {
        self.textures.get(name)
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True if the style has no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// The default font.
    #[must_use]
    pub fn font(&self) -> FontId {
        self.font
    }

    /// Text color for the given enabled state.
    #[must_use]
    pub fn text_color(&self, enabled: bool) -> Color {
        if enabled {
            self.text_color
        } else {
            self.disabled_text_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_render::{ImageData, MemoryImages, MonospaceGlyphs, RecordingBackend};

    const SHEET: &str = r#"{
        "image": "skin.png",
        "text_color": [1.0, 0.0, 0.0],
        "regions": {
            "Panel": [[0.0, 0.0, 0.5, 0.5], [2, 2, 2, 2]],
            "Dot": [[0.5, 0.5, 0.25, 0.25], [0, 0, 0, 0]],
            "Panel": [[0.5, 0.0, 0.5, 0.5], [9, 9, 9, 9]]
        }
    }"#;

    fn renderer() -> Renderer {
        let (backend, _log) = RecordingBackend::create();
        Renderer::new(Box::new(backend), Box::new(MonospaceGlyphs::new())).unwrap()
    }

    #[test]
    fn test_parse_keeps_document_order_and_duplicates() {
        let sheet = StyleSheet::parse(SHEET).unwrap();
        let names: Vec<&str> = sheet
            .regions
            .as_ref()
            .unwrap()
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, vec!["Panel", "Dot", "Panel"]);
    }

    #[test]
    fn test_first_duplicate_region_wins() {
        let sheet = StyleSheet::parse(SHEET).unwrap();
        let mut images = MemoryImages::new();
        images.insert("assets/skin.png", ImageData::new(4, 4, vec![0; 64]).unwrap());
        let mut renderer = renderer();

        let style =
            Style::from_sheet(&sheet, Path::new("assets"), &mut images, &mut renderer).unwrap();
        assert_eq!(style.len(), 2);
        let panel = style.texture(regions::PANEL).unwrap();
        assert_eq!(panel.left, 2.0);
        assert_eq!(panel.uv, [0.0, 0.0, 0.5, 0.5]);
        assert_eq!(style.text_color(true), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(style.text_color(false), Color::GREY);
        assert_eq!(style.font(), FontId::DEFAULT);
    }

    #[test]
    fn test_missing_image_or_regions_is_invalid() {
        let no_image = r#"{ "regions": {} }"#;
        assert!(matches!(
            StyleSheet::parse(no_image),
            Err(UiError::InvalidStyle(_))
        ));
        let no_regions = r#"{ "image": "a.png" }"#;
        assert!(matches!(
            StyleSheet::parse(no_regions),
            Err(UiError::InvalidStyle(_))
        ));
        assert!(matches!(
            StyleSheet::parse("{ nope"),
            Err(UiError::StyleJson(_))
        ));
    }

    #[test]
    fn test_missing_atlas_is_a_render_error() {
        let sheet = StyleSheet::parse(SHEET).unwrap();
        let mut images = MemoryImages::new();
        let mut renderer = renderer();
        let err = Style::from_sheet(&sheet, Path::new("."), &mut images, &mut renderer).unwrap_err();
        assert!(matches!(err, UiError::Render(_)));
    }

    #[test]
    fn test_load_reports_io_errors() {
        let mut images = MemoryImages::new();
        let mut renderer = renderer();
        let err = Style::load("/definitely/not/here.json", &mut images, &mut renderer).unwrap_err();
        assert!(matches!(err, UiError::StyleIo { .. }));
    }
}
