//! Template catalog
//!
//! A template is a fixed list of photo slots in normalized page coordinates.
//! The catalog is built once per process and never changes:
//! - Hand-authored layouts (single, double, asymmetric)
//! - Grid layouts generated by [`grid_slots`]
//! - The `custom` sentinel, which has no slots and matches any count

mod catalog;
mod grid;

pub use catalog::{get_all_templates, get_template};
pub use grid::grid_slots;

use crate::styles::{LayoutStyle, get_style_rules};
use crate::types::{LayoutError, ObjectFit};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Catalog template identifiers, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemplateId {
    #[cfg_attr(feature = "serde", serde(rename = "single"))]
    Single,
    #[cfg_attr(feature = "serde", serde(rename = "double"))]
    Double,
    #[cfg_attr(feature = "serde", serde(rename = "grid-2x2"))]
    Grid2x2,
    #[cfg_attr(feature = "serde", serde(rename = "grid-3x3"))]
    Grid3x3,
    #[cfg_attr(feature = "serde", serde(rename = "grid-2x3"))]
    Grid2x3,
    #[cfg_attr(feature = "serde", serde(rename = "asymmetric"))]
    Asymmetric,
    #[cfg_attr(feature = "serde", serde(rename = "custom"))]
    Custom,
}

impl TemplateId {
    pub const ALL: [TemplateId; 7] = [
        TemplateId::Single,
        TemplateId::Double,
        TemplateId::Grid2x2,
        TemplateId::Grid3x3,
        TemplateId::Grid2x3,
        TemplateId::Asymmetric,
        TemplateId::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Single => "single",
            TemplateId::Double => "double",
            TemplateId::Grid2x2 => "grid-2x2",
            TemplateId::Grid3x3 => "grid-3x3",
            TemplateId::Grid2x3 => "grid-2x3",
            TemplateId::Asymmetric => "asymmetric",
            TemplateId::Custom => "custom",
        }
    }

    /// (columns, rows) for grid templates
    pub fn grid_dimensions(self) -> Option<(usize, usize)> {
        match self {
            TemplateId::Grid2x2 => Some((2, 2)),
            TemplateId::Grid3x3 => Some((3, 3)),
            TemplateId::Grid2x3 => Some((2, 3)),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LayoutError::UnknownTemplate(s.to_string()))
    }
}

/// A rectangle destined to hold exactly one photo
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TemplateSlot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub object_fit: Option<ObjectFit>,
    pub z_index: Option<i32>,
}

impl TemplateSlot {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            object_fit: None,
            z_index: None,
        }
    }

    pub const fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

/// A named, fixed catalog entry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LayoutTemplateDefinition {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    /// Number of slots; 0 for the `custom` sentinel
    pub photos_per_page: usize,
    pub slots: Vec<TemplateSlot>,
}

/// Templates whose slot count equals `count`, in declaration order,
/// followed by the always-eligible `custom` sentinel.
pub fn get_templates_for_photo_count(count: usize) -> Vec<&'static LayoutTemplateDefinition> {
    get_all_templates()
        .iter()
        .filter(|t| t.id == TemplateId::Custom || t.photos_per_page == count)
        .collect()
}

/// Templates a style may use, in the style's preference order
pub fn get_templates_for_style(style: LayoutStyle) -> Vec<&'static LayoutTemplateDefinition> {
    get_style_rules(style)
        .templates
        .iter()
        .map(|id| get_template(*id))
        .collect()
}
