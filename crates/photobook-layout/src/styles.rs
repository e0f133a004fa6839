//! Per-style layout policy
//!
//! The style table is the only place that relates styles to templates;
//! [`crate::get_templates_for_style`] reads from it.

use crate::templates::TemplateId;
use crate::types::LayoutError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named layout policy applied across a whole book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LayoutStyle {
    #[default]
    Classic,
    Collage,
    Magazine,
    Minimalist,
}

impl LayoutStyle {
    pub const ALL: [LayoutStyle; 4] = [
        LayoutStyle::Classic,
        LayoutStyle::Collage,
        LayoutStyle::Magazine,
        LayoutStyle::Minimalist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutStyle::Classic => "classic",
            LayoutStyle::Collage => "collage",
            LayoutStyle::Magazine => "magazine",
            LayoutStyle::Minimalist => "minimalist",
        }
    }
}

impl fmt::Display for LayoutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutStyle {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LayoutError::UnknownStyle(s.to_string()))
    }
}

/// Inclusive photos-per-page bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhotoRange {
    pub min: usize,
    pub max: usize,
}

impl PhotoRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }

    /// Midpoint of the range, used for page estimates
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) as f64 / 2.0
    }
}

/// Margin and gutter in inches
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StyleSpacing {
    pub margin: f64,
    pub gutter: f64,
}

/// Static policy for one style
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStyleRules {
    pub style: LayoutStyle,
    /// Templates this style may use, in preference order
    pub templates: &'static [TemplateId],
    pub photos_per_page_range: PhotoRange,
    pub spacing: StyleSpacing,
    pub allow_rotation: bool,
    pub allow_asymmetry: bool,
    /// Photo aspect ratios (width / height) the style is designed around
    pub preferred_aspect_ratios: &'static [f64],
}

static STYLE_RULES: [LayoutStyleRules; 4] = [
    LayoutStyleRules {
        style: LayoutStyle::Classic,
        templates: &[TemplateId::Single, TemplateId::Double, TemplateId::Grid2x2],
        photos_per_page_range: PhotoRange::new(1, 4),
        spacing: StyleSpacing {
            margin: 0.5,
            gutter: 0.25,
        },
        allow_rotation: false,
        allow_asymmetry: false,
        preferred_aspect_ratios: &[1.5, 0.667],
    },
    LayoutStyleRules {
        style: LayoutStyle::Collage,
        templates: &[
            TemplateId::Asymmetric,
            TemplateId::Grid2x2,
            TemplateId::Grid2x3,
            TemplateId::Grid3x3,
        ],
        photos_per_page_range: PhotoRange::new(3, 9),
        spacing: StyleSpacing {
            margin: 0.25,
            gutter: 0.125,
        },
        allow_rotation: true,
        allow_asymmetry: true,
        preferred_aspect_ratios: &[],
    },
    LayoutStyleRules {
        style: LayoutStyle::Magazine,
        templates: &[
            TemplateId::Double,
            TemplateId::Asymmetric,
            TemplateId::Grid2x2,
            TemplateId::Grid2x3,
        ],
        photos_per_page_range: PhotoRange::new(2, 6),
        spacing: StyleSpacing {
            margin: 0.375,
            gutter: 0.2,
        },
        allow_rotation: false,
        allow_asymmetry: true,
        preferred_aspect_ratios: &[1.5, 0.8],
    },
    LayoutStyleRules {
        style: LayoutStyle::Minimalist,
        templates: &[TemplateId::Single, TemplateId::Double],
        photos_per_page_range: PhotoRange::new(1, 2),
        spacing: StyleSpacing {
            margin: 1.0,
            gutter: 0.5,
        },
        allow_rotation: false,
        allow_asymmetry: false,
        preferred_aspect_ratios: &[1.0],
    },
];

pub fn get_style_rules(style: LayoutStyle) -> &'static LayoutStyleRules {
    match style {
        LayoutStyle::Classic => &STYLE_RULES[0],
        LayoutStyle::Collage => &STYLE_RULES[1],
        LayoutStyle::Magazine => &STYLE_RULES[2],
        LayoutStyle::Minimalist => &STYLE_RULES[3],
    }
}

pub fn get_all_styles() -> &'static [LayoutStyleRules] {
    &STYLE_RULES
}

/// True iff `count` photos per page lies within the style's range
pub fn style_supports_photo_count(style: LayoutStyle, count: usize) -> bool {
    get_style_rules(style).photos_per_page_range.contains(count)
}
