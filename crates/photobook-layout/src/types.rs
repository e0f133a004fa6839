use crate::constants::SQUARE_TOLERANCE;
use crate::options::LayoutOptions;
use crate::templates::TemplateId;
use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unknown page size: {0}")]
    UnknownPageSize(String),
    #[error("Unknown layout style: {0}")]
    UnknownStyle(String),
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Orientation of a photo, derived from its pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PhotoOrientation {
    Portrait,
    Landscape,
    Square,
    /// Dimensions were not reported by the upload pipeline
    #[default]
    Unknown,
}

impl PhotoOrientation {
    /// Classify an aspect ratio (width / height)
    pub fn from_aspect_ratio(aspect_ratio: f64) -> Self {
        if (aspect_ratio - 1.0).abs() <= SQUARE_TOLERANCE {
            PhotoOrientation::Square
        } else if aspect_ratio > 1.0 {
            PhotoOrientation::Landscape
        } else {
            PhotoOrientation::Portrait
        }
    }
}

/// Layout-relevant facts about one uploaded photo.
///
/// Built by the ingestion side; the engine only reads it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PhotoMetadata {
    pub id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub aspect_ratio: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub orientation: PhotoOrientation,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sort_order: i64,
    #[cfg_attr(feature = "serde", serde(default = "default_print_safe"))]
    pub print_safe: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quality_warnings: Vec<String>,
    /// Capture time, used for date grouping
    #[cfg_attr(feature = "serde", serde(default))]
    pub taken_at: Option<NaiveDateTime>,
}

#[cfg(feature = "serde")]
fn default_print_safe() -> bool {
    true
}

impl PhotoMetadata {
    /// Create metadata from pixel dimensions, deriving aspect ratio and orientation.
    /// Zero-sized dimensions are treated as unknown.
    pub fn new(id: impl Into<String>, width: Option<u32>, height: Option<u32>) -> Self {
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (Some(w), Some(h)),
            _ => (None, None),
        };
        let aspect_ratio = match (width, height) {
            (Some(w), Some(h)) => Some(w as f64 / h as f64),
            _ => None,
        };
        let orientation = aspect_ratio
            .map(PhotoOrientation::from_aspect_ratio)
            .unwrap_or(PhotoOrientation::Unknown);

        Self {
            id: id.into(),
            width,
            height,
            aspect_ratio,
            orientation,
            sort_order: 0,
            print_safe: true,
            quality_warnings: Vec::new(),
            taken_at: None,
        }
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_taken_at(mut self, taken_at: NaiveDateTime) -> Self {
        self.taken_at = Some(taken_at);
        self
    }

    pub fn with_print_safe(mut self, print_safe: bool) -> Self {
        self.print_safe = print_safe;
        self
    }

    /// Whether both pixel dimensions are known
    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Fill in aspect ratio and orientation from the pixel dimensions when
    /// a manifest left them out.
    pub fn with_derived_fields(mut self) -> Self {
        if let (Some(w), Some(h)) = (self.width, self.height) {
            if w > 0 && h > 0 {
                let ratio = *self.aspect_ratio.get_or_insert(w as f64 / h as f64);
                if self.orientation == PhotoOrientation::Unknown {
                    self.orientation = PhotoOrientation::from_aspect_ratio(ratio);
                }
            }
        }
        self
    }
}

/// How a photo fills its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObjectFit {
    /// Fill the slot, cropping overflow
    #[default]
    Cover,
    /// Fit inside the slot, letterboxing
    Contain,
}

/// A photo placed on a page, in normalized page coordinates
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PhotoPosition {
    pub photo_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, clockwise
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
    pub object_fit: Option<ObjectFit>,
}

impl PhotoPosition {
    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (y grows downward)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageType {
    Cover,
    Content,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// A text block placed on a page, in normalized page coordinates
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TextElement {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Font size in points
    pub font_size: f64,
    pub align: TextAlign,
}

/// Page background fill
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")
)]
pub enum PageBackground {
    /// Solid color, as a CSS hex string
    Color { color: String },
    /// Linear gradient between two CSS hex colors
    Gradient {
        from: String,
        to: String,
        angle_degrees: f64,
    },
}

/// One generated page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PageLayout {
    /// 1-based position in the book
    pub page_number: usize,
    pub page_type: PageType,
    pub template_id: TemplateId,
    pub photos: Vec<PhotoPosition>,
    pub text_elements: Vec<TextElement>,
    pub background: Option<PageBackground>,
    /// Set when no template in the active bounds could hold the photos and
    /// the page degraded to the single-photo template
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback: bool,
}

/// Run details recorded alongside the generated pages
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LayoutMetadata {
    pub generated_at: DateTime<Utc>,
    /// Wall-clock time spent in `generate_layout`, in milliseconds
    pub generation_time_ms: f64,
    pub algorithm: String,
    pub options: LayoutOptions,
}

/// Complete output of one layout run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LayoutResult {
    pub pages: Vec<PageLayout>,
    pub total_pages: usize,
    pub photos_used: usize,
    pub photos_unused: Vec<String>,
    pub warnings: Vec<String>,
    pub metadata: LayoutMetadata,
}

impl LayoutResult {
    /// Pages holding book content (neither cover nor back)
    pub fn content_pages(&self) -> impl Iterator<Item = &PageLayout> {
        self.pages
            .iter()
            .filter(|page| page.page_type == PageType::Content)
    }

    /// Every placed photo id, in page then slot order
    pub fn placed_photo_ids(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.photos.iter().map(|p| p.photo_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_dimensions() {
        assert_eq!(
            PhotoMetadata::new("a", Some(3000), Some(2000)).orientation,
            PhotoOrientation::Landscape
        );
        assert_eq!(
            PhotoMetadata::new("b", Some(2000), Some(3000)).orientation,
            PhotoOrientation::Portrait
        );
        assert_eq!(
            PhotoMetadata::new("c", Some(2000), Some(2040)).orientation,
            PhotoOrientation::Square
        );
    }

    #[test]
    fn test_unknown_dimensions() {
        let photo = PhotoMetadata::new("a", None, Some(2000));
        assert_eq!(photo.orientation, PhotoOrientation::Unknown);
        assert_eq!(photo.aspect_ratio, None);
        assert!(!photo.has_dimensions());

        let zero = PhotoMetadata::new("z", Some(0), Some(100));
        assert_eq!(zero.orientation, PhotoOrientation::Unknown);
        assert_eq!(zero.width, None);
    }
}
