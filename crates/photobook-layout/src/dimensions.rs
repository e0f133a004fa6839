//! Physical page sizes and unit conversion
//!
//! Every supported book format is a fixed entry in a static table. All
//! lookups are total over [`PageSize`], so nothing here can fail.

use crate::constants::{BLEED_IN, SAFE_ZONE_IN};
use crate::types::LayoutError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Supported book formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PageSize {
    /// 8" × 8" square
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "8x8"))]
    Square8,
    /// 10" × 10" square
    #[cfg_attr(feature = "serde", serde(rename = "10x10"))]
    Square10,
    /// 12" × 12" square
    #[cfg_attr(feature = "serde", serde(rename = "12x12"))]
    Square12,
    /// 8" × 11" portrait
    #[cfg_attr(feature = "serde", serde(rename = "8x11"))]
    Portrait8x11,
    /// ISO A4 (210mm × 297mm)
    #[cfg_attr(feature = "serde", serde(rename = "A4"))]
    A4,
    /// US Letter (8.5" × 11")
    #[cfg_attr(feature = "serde", serde(rename = "letter"))]
    Letter,
}

impl PageSize {
    pub const ALL: [PageSize; 6] = [
        PageSize::Square8,
        PageSize::Square10,
        PageSize::Square12,
        PageSize::Portrait8x11,
        PageSize::A4,
        PageSize::Letter,
    ];

    /// Catalog id, as exchanged with the web application
    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::Square8 => "8x8",
            PageSize::Square10 => "10x10",
            PageSize::Square12 => "12x12",
            PageSize::Portrait8x11 => "8x11",
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
        }
    }

    /// Trim size in inches (width, height)
    fn trim_inches(self) -> (f64, f64) {
        match self {
            PageSize::Square8 => (8.0, 8.0),
            PageSize::Square10 => (10.0, 10.0),
            PageSize::Square12 => (12.0, 12.0),
            PageSize::Portrait8x11 => (8.0, 11.0),
            PageSize::A4 => (8.27, 11.69),
            PageSize::Letter => (8.5, 11.0),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageSize {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LayoutError::UnknownPageSize(s.to_string()))
    }
}

/// Physical dimensions of a page, in inches
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
    pub bleed: f64,
    pub safe_zone: f64,
}

/// A width/height pair in inches
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Area {
    pub width: f64,
    pub height: f64,
}

/// A width/height pair in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelArea {
    pub width: u32,
    pub height: u32,
}

/// Orientation of a page format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageOrientation {
    Portrait,
    Landscape,
    Square,
}

pub fn get_dimensions(page_size: PageSize) -> PageDimensions {
    let (width, height) = page_size.trim_inches();
    PageDimensions {
        width,
        height,
        bleed: BLEED_IN,
        safe_zone: SAFE_ZONE_IN,
    }
}

/// Area guaranteed to survive trimming: bleed and safe zone removed on every side.
pub fn get_printable_area(page_size: PageSize) -> Area {
    let dims = get_dimensions(page_size);
    let inset = 2.0 * (dims.bleed + dims.safe_zone);
    Area {
        width: dims.width - inset,
        height: dims.height - inset,
    }
}

/// Area inside the bleed on every side.
pub fn get_content_area(page_size: PageSize) -> Area {
    let dims = get_dimensions(page_size);
    Area {
        width: dims.width - 2.0 * dims.bleed,
        height: dims.height - 2.0 * dims.bleed,
    }
}

#[inline]
pub fn inches_to_pixels(inches: f64, dpi: u32) -> u32 {
    (inches * dpi as f64).round().max(0.0) as u32
}

/// Inches spanned by `pixels` at `dpi`.
///
/// Returns `f64::INFINITY` when `dpi` is zero.
#[inline]
pub fn pixels_to_inches(pixels: u32, dpi: u32) -> f64 {
    if dpi == 0 {
        return f64::INFINITY;
    }
    pixels as f64 / dpi as f64
}

pub fn get_dimensions_in_pixels(page_size: PageSize, dpi: u32) -> PixelArea {
    let dims = get_dimensions(page_size);
    PixelArea {
        width: inches_to_pixels(dims.width, dpi),
        height: inches_to_pixels(dims.height, dpi),
    }
}

/// Width divided by height
pub fn get_aspect_ratio(page_size: PageSize) -> f64 {
    let dims = get_dimensions(page_size);
    dims.width / dims.height
}

pub fn is_square(page_size: PageSize) -> bool {
    let dims = get_dimensions(page_size);
    dims.width == dims.height
}

pub fn get_page_orientation(page_size: PageSize) -> PageOrientation {
    let dims = get_dimensions(page_size);
    if dims.width == dims.height {
        PageOrientation::Square
    } else if dims.width > dims.height {
        PageOrientation::Landscape
    } else {
        PageOrientation::Portrait
    }
}

/// Resolution a photo ends up printed at when `pixels` span `inches`.
///
/// Returns `f64::INFINITY` for a zero-length span.
pub fn effective_dpi(pixels: u32, inches: f64) -> f64 {
    if inches <= 0.0 {
        return f64::INFINITY;
    }
    pixels as f64 / inches
}

// =============================================================================
// Tests
// =============================================================================
