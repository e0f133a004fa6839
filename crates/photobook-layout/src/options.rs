use crate::dimensions::{PageSize, get_dimensions};
use crate::styles::{LayoutStyle, LayoutStyleRules, PhotoRange, StyleSpacing, get_style_rules};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Spacing overrides in inches; unset fields keep the style's value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpacingOverride {
    pub margin: Option<f64>,
    pub gutter: Option<f64>,
}

impl SpacingOverride {
    /// True when neither field is set
    pub fn is_empty(&self) -> bool {
        self.margin.is_none() && self.gutter.is_none()
    }
}

/// Per-run layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LayoutOptions {
    // Book format
    pub page_size: PageSize,
    pub layout_style: LayoutStyle,

    // Overrides of the style's policy
    pub photos_per_page: Option<PhotoRange>,
    pub spacing: Option<SpacingOverride>,

    // Placement behaviour
    pub allow_cropping: bool,
    pub allow_rotation: bool,
    pub preserve_order: bool,
    pub group_by_date: bool,

    // Cover and back pages
    pub include_cover: bool,
    pub cover_photo_id: Option<String>,
    pub title: Option<String>,
    pub include_back_page: bool,

    // Decoration
    pub background: Option<PageBackground>,

    // Capacity of the print product, counting cover and back pages
    pub max_pages: Option<usize>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::Square8,
            layout_style: LayoutStyle::Classic,
            photos_per_page: None,
            spacing: None,
            allow_cropping: true,
            allow_rotation: false,
            preserve_order: true,
            group_by_date: false,
            include_cover: false,
            cover_photo_id: None,
            title: None,
            include_back_page: false,
            background: None,
            max_pages: None,
        }
    }
}

impl LayoutOptions {
    pub fn new(page_size: PageSize, layout_style: LayoutStyle) -> Self {
        Self {
            page_size,
            layout_style,
            ..Default::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn style_rules(&self) -> &'static LayoutStyleRules {
        get_style_rules(self.layout_style)
    }

    /// Whether explicit bounds replace the style's range
    pub fn bounds_overridden(&self) -> bool {
        self.photos_per_page.is_some()
    }

    /// Photos-per-page bounds in force for this run
    pub fn effective_bounds(&self) -> PhotoRange {
        self.photos_per_page
            .unwrap_or(self.style_rules().photos_per_page_range)
    }

    /// Whether the caller set at least one spacing field
    pub fn spacing_overridden(&self) -> bool {
        self.spacing.is_some_and(|over| !over.is_empty())
    }

    /// Margin and gutter in force for this run, in inches
    pub fn effective_spacing(&self) -> StyleSpacing {
        let base = self.style_rules().spacing;
        match self.spacing {
            Some(over) => StyleSpacing {
                margin: over.margin.unwrap_or(base.margin),
                gutter: over.gutter.unwrap_or(base.gutter),
            },
            None => base,
        }
    }

    /// Rotation is applied only when both the caller and the style allow it
    pub fn rotation_enabled(&self) -> bool {
        self.allow_rotation && self.style_rules().allow_rotation
    }

    /// Whether a cover page will be emitted
    pub fn wants_cover(&self) -> bool {
        self.include_cover || self.cover_photo_id.is_some()
    }

    /// Number of pages that hold no content photos (cover and back)
    pub fn reserved_pages(&self) -> usize {
        usize::from(self.wants_cover()) + usize::from(self.include_back_page)
    }

    /// Pages left for content once cover and back are accounted for
    pub fn content_page_capacity(&self) -> Option<usize> {
        self.max_pages
            .map(|max| max.saturating_sub(self.reserved_pages()))
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if let Some(range) = self.photos_per_page {
            if range.min == 0 {
                return Err(LayoutError::Config(
                    "Photos per page minimum must be at least 1".to_string(),
                ));
            }
            if range.min > range.max {
                return Err(LayoutError::Config(format!(
                    "Photos per page minimum ({}) exceeds maximum ({})",
                    range.min, range.max
                )));
            }
        }

        if let Some(spacing) = self.spacing {
            for (name, value) in [("margin", spacing.margin), ("gutter", spacing.gutter)] {
                if let Some(v) = value {
                    if !v.is_finite() || v < 0.0 {
                        return Err(LayoutError::Config(format!(
                            "Spacing {} must be a non-negative number of inches, got {}",
                            name, v
                        )));
                    }
                }
            }

            // The widest grid has three cells per side: two margins and two gutters
            let spacing = self.effective_spacing();
            let dims = get_dimensions(self.page_size);
            let shortest_side = dims.width.min(dims.height);
            if 2.0 * spacing.margin + 2.0 * spacing.gutter >= shortest_side {
                return Err(LayoutError::Config(format!(
                    "Spacing leaves no room for photos on a {} page",
                    self.page_size
                )));
            }
        }

        if let Some(max_pages) = self.max_pages {
            let reserved = self.reserved_pages();
            if max_pages == 0 || max_pages < reserved {
                return Err(LayoutError::Config(format!(
                    "Maximum page count ({}) cannot hold the {} cover/back page(s) requested",
                    max_pages, reserved
                )));
            }
        }

        Ok(())
    }
}

/// Load a photo manifest (JSON array of [`PhotoMetadata`])
#[cfg(feature = "serde")]
pub async fn load_photos(path: impl AsRef<std::path::Path>) -> Result<Vec<PhotoMetadata>> {
    let bytes = tokio::fs::read(path).await?;
    let photos: Vec<PhotoMetadata> = serde_json::from_slice(&bytes)?;
    Ok(photos
        .into_iter()
        .map(PhotoMetadata::with_derived_fields)
        .collect())
}
