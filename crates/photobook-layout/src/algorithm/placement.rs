//! Photo-to-slot assignment
//!
//! Photos fill a template's slots in declaration order. This module also
//! handles:
//! - Grid regeneration when the caller overrides spacing
//! - Fit mode and collage tilt
//! - The print-resolution check for each placed photo

use std::borrow::Cow;

use crate::constants::{LAYOUT_EPSILON, MIN_PRINT_DPI, TILT_PATTERN_DEGREES};
use crate::dimensions::{PageDimensions, effective_dpi, get_dimensions};
use crate::options::LayoutOptions;
use crate::templates::{LayoutTemplateDefinition, TemplateSlot, grid_slots};
use crate::types::{ObjectFit, PhotoMetadata, PhotoPosition};
use crate::validate::overflow_warning;

/// Slots for `template` under `options`.
///
/// Catalog slots are used as-is unless the caller sets at least one spacing
/// field, in which case grid templates are rebuilt from the effective inch
/// spacing (unset fields take the style's value) converted to each axis.
pub fn template_slots<'t>(
    template: &'t LayoutTemplateDefinition,
    options: &LayoutOptions,
) -> Cow<'t, [TemplateSlot]> {
    let Some((cols, rows)) = template.id.grid_dimensions() else {
        return Cow::Borrowed(&template.slots);
    };
    if !options.spacing_overridden() {
        return Cow::Borrowed(&template.slots);
    }

    let spacing = options.effective_spacing();
    let dims = get_dimensions(options.page_size);

    let horizontal = grid_slots(
        cols,
        rows,
        spacing.margin / dims.width,
        spacing.gutter / dims.width,
    );
    let vertical = grid_slots(
        cols,
        rows,
        spacing.margin / dims.height,
        spacing.gutter / dims.height,
    );

    Cow::Owned(
        horizontal
            .into_iter()
            .zip(vertical)
            .map(|(h, v)| TemplateSlot {
                x: h.x,
                width: h.width,
                y: v.y,
                height: v.height,
                object_fit: h.object_fit,
                z_index: h.z_index,
            })
            .collect(),
    )
}

/// Place one photo into one slot
pub fn place_photo(
    photo: &PhotoMetadata,
    slot: &TemplateSlot,
    slot_index: usize,
    options: &LayoutOptions,
) -> PhotoPosition {
    let object_fit = slot.object_fit.unwrap_or_else(|| {
        if options.allow_cropping && photo.has_dimensions() {
            ObjectFit::Cover
        } else {
            ObjectFit::Contain
        }
    });

    let rotation = options
        .rotation_enabled()
        .then(|| TILT_PATTERN_DEGREES[slot_index % TILT_PATTERN_DEGREES.len()]);

    PhotoPosition {
        photo_id: photo.id.clone(),
        x: slot.x,
        y: slot.y,
        width: slot.width,
        height: slot.height,
        rotation,
        z_index: slot.z_index,
        object_fit: Some(object_fit),
    }
}

/// Resolution `photo` prints at in `position`, if its pixel size is known.
///
/// Cover fit scales by the larger factor (the photo is cropped), contain by
/// the smaller one.
pub fn placed_dpi(
    photo: &PhotoMetadata,
    position: &PhotoPosition,
    page: &PageDimensions,
) -> Option<f64> {
    let (width_px, height_px) = (photo.width?, photo.height?);
    let dpi_x = effective_dpi(width_px, position.width * page.width);
    let dpi_y = effective_dpi(height_px, position.height * page.height);

    Some(match position.object_fit {
        Some(ObjectFit::Contain) => dpi_x.max(dpi_y),
        _ => dpi_x.min(dpi_y),
    })
}

/// Quality warnings for a placed photo
pub fn print_warnings(
    photo: &PhotoMetadata,
    position: &PhotoPosition,
    page: &PageDimensions,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if !photo.print_safe {
        warnings.push(format!("Photo {} is not marked print-safe", photo.id));
    }

    if let Some(dpi) = placed_dpi(photo, position, page) {
        if dpi < MIN_PRINT_DPI {
            warnings.push(format!(
                "Photo {} prints at {:.0} DPI, below the {:.0} DPI minimum",
                photo.id, dpi, MIN_PRINT_DPI
            ));
        }
    }

    if overflows_page(position) {
        warnings.push(overflow_warning(&photo.id));
    }

    warnings.extend(
        photo
            .quality_warnings
            .iter()
            .map(|w| format!("Photo {}: {}", photo.id, w)),
    );

    warnings
}

fn overflows_page(position: &PhotoPosition) -> bool {
    position.x < -LAYOUT_EPSILON
        || position.y < -LAYOUT_EPSILON
        || position.right() > 1.0 + LAYOUT_EPSILON
        || position.bottom() > 1.0 + LAYOUT_EPSILON
}

// =============================================================================
// Tests
// =============================================================================
