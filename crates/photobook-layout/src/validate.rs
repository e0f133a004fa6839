//! Post-hoc checks over a finished layout
//!
//! Nothing here repairs a layout; violations are reported for tests and for
//! callers that want a sanity check before rendering.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::constants::LAYOUT_EPSILON;
use crate::templates::{TemplateId, get_template};
use crate::types::{LayoutResult, PageType, PhotoMetadata};

/// A broken layout invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutViolation {
    #[error("photo {photo_id} is placed {count} times")]
    DuplicatePlacement { photo_id: String, count: usize },
    #[error("photo {photo_id} on page {page} overflows the page ({edge} edge at {value:.3})")]
    SlotOverflow {
        page: usize,
        photo_id: String,
        edge: &'static str,
        value: f64,
    },
    #[error("page {page} uses {template} ({photos_per_page} photos) outside the {min}-{max} range")]
    TemplateOutOfBounds {
        page: usize,
        template: TemplateId,
        photos_per_page: usize,
        min: usize,
        max: usize,
    },
    #[error("page {page} holds {placed} photos but {template} has {slots} slots")]
    TooManyPhotos {
        page: usize,
        template: TemplateId,
        placed: usize,
        slots: usize,
    },
    #[error("page at index {index} is numbered {found}")]
    PageNumbering { index: usize, found: usize },
    #[error("total page count is {reported} but {actual} pages were emitted")]
    PageCountMismatch { reported: usize, actual: usize },
    #[error("photos used is {reported} but {actual} photos were placed")]
    UsedCountMismatch { reported: usize, actual: usize },
    #[error("photo {photo_id} is not in the input set")]
    PhantomPhoto { photo_id: String },
    #[error("{placed} placed + {unused} unused photos does not equal {supplied} supplied")]
    Conservation {
        placed: usize,
        unused: usize,
        supplied: usize,
    },
}

/// Check a layout's internal invariants
pub fn validate_layout(result: &LayoutResult) -> Vec<LayoutViolation> {
    let mut violations = Vec::new();
    let options = &result.metadata.options;
    let bounds = options.effective_bounds();

    // Placement counts
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in result.placed_photo_ids() {
        *counts.entry(id).or_default() += 1;
    }
    let mut duplicates: Vec<_> = counts.iter().filter(|(_, count)| **count > 1).collect();
    duplicates.sort();
    for (id, count) in duplicates {
        violations.push(LayoutViolation::DuplicatePlacement {
            photo_id: id.to_string(),
            count: *count,
        });
    }

    for (index, page) in result.pages.iter().enumerate() {
        if page.page_number != index + 1 {
            violations.push(LayoutViolation::PageNumbering {
                index,
                found: page.page_number,
            });
        }

        let template = get_template(page.template_id);
        if page.template_id != TemplateId::Custom && page.photos.len() > template.photos_per_page
        {
            violations.push(LayoutViolation::TooManyPhotos {
                page: page.page_number,
                template: page.template_id,
                placed: page.photos.len(),
                slots: template.photos_per_page,
            });
        }

        if page.page_type == PageType::Content
            && !page.fallback
            && !bounds.contains(template.photos_per_page)
        {
            violations.push(LayoutViolation::TemplateOutOfBounds {
                page: page.page_number,
                template: page.template_id,
                photos_per_page: template.photos_per_page,
                min: bounds.min,
                max: bounds.max,
            });
        }

        for position in &page.photos {
            let edges = [
                ("left", position.x, position.x < -LAYOUT_EPSILON),
                ("top", position.y, position.y < -LAYOUT_EPSILON),
                ("right", position.right(), position.right() > 1.0 + LAYOUT_EPSILON),
                ("bottom", position.bottom(), position.bottom() > 1.0 + LAYOUT_EPSILON),
            ];
            for (edge, value, overflows) in edges {
                if overflows && !overflow_permitted(result, &position.photo_id) {
                    violations.push(LayoutViolation::SlotOverflow {
                        page: page.page_number,
                        photo_id: position.photo_id.clone(),
                        edge,
                        value,
                    });
                }
            }
        }
    }

    if result.total_pages != result.pages.len() {
        violations.push(LayoutViolation::PageCountMismatch {
            reported: result.total_pages,
            actual: result.pages.len(),
        });
    }

    let placed = result.placed_photo_ids().count();
    if result.photos_used != placed {
        violations.push(LayoutViolation::UsedCountMismatch {
            reported: result.photos_used,
            actual: placed,
        });
    }

    violations
}

/// [`validate_layout`] plus checks against the photos the run was given
pub fn validate_layout_against(
    result: &LayoutResult,
    photos: &[PhotoMetadata],
) -> Vec<LayoutViolation> {
    let mut violations = validate_layout(result);

    let known: HashSet<&str> = photos.iter().map(|p| p.id.as_str()).collect();
    let mut reported = HashSet::new();
    for id in result
        .placed_photo_ids()
        .chain(result.photos_unused.iter().map(String::as_str))
    {
        if !known.contains(id) && reported.insert(id) {
            violations.push(LayoutViolation::PhantomPhoto {
                photo_id: id.to_string(),
            });
        }
    }

    let placed = result.placed_photo_ids().count();
    if placed + result.photos_unused.len() != photos.len() {
        violations.push(LayoutViolation::Conservation {
            placed,
            unused: result.photos_unused.len(),
            supplied: photos.len(),
        });
    }

    violations
}

/// Warning recorded for a photo whose placement extends past the page edge
pub fn overflow_warning(photo_id: &str) -> String {
    format!("Photo {} extends past the page", photo_id)
}

/// Overflow is tolerated only when cropping is allowed and the run recorded
/// the overflow warning for exactly this photo
fn overflow_permitted(result: &LayoutResult, photo_id: &str) -> bool {
    if !result.metadata.options.allow_cropping {
        return false;
    }
    let expected = overflow_warning(photo_id);
    result.warnings.iter().any(|w| *w == expected)
}
