//! Document model for SlowWord
//!
//! A plain text buffer, the font it is shown and exported in, and at most
//! one inserted image.

use egui::FontFamily;
use printpdf::BuiltinFont;
use serde::{Deserialize, Serialize};
use slowcore::theme::SERIF_FAMILY;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The fonts offered in the toolbar. All three are PDF base-14 fonts, so
/// nothing needs embedding on export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontName {
    #[default]
    Helvetica,
    Courier,
    #[serde(rename = "Times-Roman")]
    TimesRoman,
}

impl FontName {
    pub const ALL: [FontName; 3] = [FontName::Helvetica, FontName::Courier, FontName::TimesRoman];

    pub fn label(self) -> &'static str {
        match self {
            FontName::Helvetica => "Helvetica",
            FontName::Courier => "Courier",
            FontName::TimesRoman => "Times-Roman",
        }
    }

    /// Font family used to draw the editor text.
    pub fn family(self) -> FontFamily {
        match self {
            FontName::Helvetica => FontFamily::Proportional,
            FontName::Courier => FontFamily::Monospace,
            FontName::TimesRoman => FontFamily::Name(SERIF_FAMILY.into()),
        }
    }

    pub fn builtin(self) -> BuiltinFont {
        match self {
            FontName::Helvetica => BuiltinFont::Helvetica,
            FontName::Courier => BuiltinFont::Courier,
            FontName::TimesRoman => BuiltinFont::TimesRoman,
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FontName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontName::ALL
            .into_iter()
            .find(|f| f.label() == s)
            .ok_or_else(|| format!("unknown font: {}", s))
    }
}

/// Point sizes offered in the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FontSize(u32);

impl FontSize {
    pub const ALL: [FontSize; 6] = [
        FontSize(10),
        FontSize(12),
        FontSize(14),
        FontSize(18),
        FontSize(24),
        FontSize(32),
    ];

    pub fn new(points: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.0 == points)
    }

    pub fn points(self) -> u32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize(12)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

impl TryFrom<u32> for FontSize {
    type Error = String;

    fn try_from(points: u32) -> Result<Self, Self::Error> {
        FontSize::new(points).ok_or_else(|| format!("unsupported font size: {}", points))
    }
}

impl From<FontSize> for u32 {
    fn from(size: FontSize) -> u32 {
        size.0
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let points: u32 = s.trim().parse().map_err(|_| format!("not a size: {}", s))?;
        FontSize::try_from(points)
    }
}

/// The document being edited
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Buffer shown in the text area
    pub text: String,
    pub font: FontName,
    pub size: FontSize,
    image: Option<PathBuf>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn set_font(&mut self, font: FontName) {
        self.font = font;
    }

    pub fn set_size(&mut self, size: FontSize) {
        self.size = size;
    }

    /// Store `path` as the document's image. Returns the image it replaced.
    pub fn insert_image(&mut self, path: PathBuf) -> Option<PathBuf> {
        self.image.replace(path)
    }

    pub fn clear_image(&mut self) -> Option<PathBuf> {
        self.image.take()
    }

    pub fn image(&self) -> Option<&Path> {
        self.image.as_deref()
    }

    /// Newline-delimited lines. An empty buffer is one empty line.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Font used by the text area.
    pub fn font_id(&self) -> egui::FontId {
        egui::FontId::new(self.size.as_f32(), self.font.family())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert_eq!(doc.font, FontName::Helvetica);
        assert_eq!(doc.size.points(), 12);
        assert!(doc.image().is_none());
        assert_eq!(doc.lines(), vec![""]);
    }

    #[test]
    fn test_set_font_changes_editor_family() {
        let mut doc = Document::new();
        doc.set_font(FontName::Courier);
        assert_eq!(doc.font, FontName::Courier);
        assert_eq!(doc.font_id().family, FontFamily::Monospace);

        doc.set_font(FontName::TimesRoman);
        assert_eq!(doc.font_id().family, FontFamily::Name(SERIF_FAMILY.into()));
    }

    #[test]
    fn test_set_size_changes_editor_size() {
        let mut doc = Document::new();
        doc.set_size(FontSize::new(24).unwrap());
        assert_eq!(doc.font_id().size, 24.0);
    }

    #[test]
    fn test_insert_image_replaces_previous() {
        let mut doc = Document::new();
        assert_eq!(doc.insert_image(PathBuf::from("/tmp/a.png")), None);
        let old = doc.insert_image(PathBuf::from("/tmp/b.png"));
        assert_eq!(old, Some(PathBuf::from("/tmp/a.png")));
        assert_eq!(doc.image(), Some(Path::new("/tmp/b.png")));

        assert_eq!(doc.clear_image(), Some(PathBuf::from("/tmp/b.png")));
        assert!(doc.image().is_none());
    }

    #[test]
    fn test_lines_keep_empty_lines() {
        let doc = Document::from_string("one\n\nthree\n");
        assert_eq!(doc.lines(), vec!["one", "", "three", ""]);
    }

    #[test]
    fn test_counts() {
        let doc = Document::from_string("héllo  wide\nworld");
        assert_eq!(doc.word_count(), 3);
        assert_eq!(doc.char_count(), 17);
    }

    #[test]
    fn test_font_name_parsing() {
        assert_eq!("Times-Roman".parse::<FontName>(), Ok(FontName::TimesRoman));
        assert_eq!("Courier".parse::<FontName>(), Ok(FontName::Courier));
        assert!("Font".parse::<FontName>().is_err());
        for font in FontName::ALL {
            assert_eq!(font.to_string().parse::<FontName>(), Ok(font));
        }
    }

    #[test]
    fn test_font_size_parsing() {
        let sizes: Vec<u32> = FontSize::ALL.iter().map(|s| s.points()).collect();
        assert_eq!(sizes, vec![10, 12, 14, 18, 24, 32]);
        assert_eq!("18".parse::<FontSize>().map(|s| s.points()), Ok(18));
        assert!("13".parse::<FontSize>().is_err());
        assert!("big".parse::<FontSize>().is_err());
        assert!(FontSize::new(0).is_none());
    }

    #[test]
    fn test_font_serde_uses_labels() {
        let json = serde_json::to_string(&FontName::TimesRoman).unwrap();
        assert_eq!(json, "\"Times-Roman\"");
        let size: FontSize = serde_json::from_str("32").unwrap();
        assert_eq!(size.points(), 32);
        assert!(serde_json::from_str::<FontSize>("33").is_err());
    }
}
