//! Recommendation helpers for previews
//!
//! Cheap estimates the editor shows before committing to a full
//! [`crate::generate_layout`] run. The page-filling rule here is the same
//! one the layout algorithm follows, so estimates and real runs agree.

use crate::styles::{LayoutStyle, get_style_rules};
use crate::templates::{TemplateId, get_template, get_templates_for_photo_count};
use crate::types::{PhotoMetadata, PhotoOrientation};

/// Estimated page count for `photo_count` photos.
///
/// Divides by `average_per_page` when given (and positive), otherwise by the
/// midpoint of the style's photos-per-page range, rounding up. An average
/// below one photo per page counts as one.
pub fn estimate_page_count(
    photo_count: usize,
    style: LayoutStyle,
    average_per_page: Option<f64>,
) -> usize {
    if photo_count == 0 {
        return 0;
    }
    let average = average_per_page
        .filter(|avg| avg.is_finite() && *avg > 0.0)
        .map(|avg| avg.max(1.0))
        .unwrap_or_else(|| get_style_rules(style).photos_per_page_range.midpoint());
    (photo_count as f64 / average).ceil() as usize
}

/// Distinct slot counts of a style's templates, ascending
pub fn style_template_sizes(style: LayoutStyle) -> Vec<usize> {
    let mut sizes: Vec<usize> = get_style_rules(style)
        .templates
        .iter()
        .map(|id| get_template(*id).photos_per_page)
        .filter(|&n| n > 0)
        .collect();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// Page size to use for the next page when `take` photos are wanted:
/// an exact match if one exists, else the largest size below `take`.
pub(crate) fn fill_size(take: usize, sizes: &[usize]) -> Option<usize> {
    if sizes.contains(&take) {
        return Some(take);
    }
    sizes.iter().copied().filter(|&s| s > 0 && s < take).max()
}

/// `reachable[n]` is true when `n` photos split exactly into pages of `sizes`
fn reachable_counts(limit: usize, sizes: &[usize]) -> Vec<bool> {
    let mut reachable = vec![false; limit + 1];
    reachable[0] = true;
    for n in 1..=limit {
        reachable[n] = sizes.iter().any(|&s| s > 0 && s <= n && reachable[n - s]);
    }
    reachable
}

/// Split `photo_count` photos into pages aiming for `per_page` per page.
///
/// Each page takes the largest size up to `min(remaining, per_page)` that
/// leaves an exactly splittable remainder; when no size does, it falls back
/// to [`fill_size`]. `None` entries are single photos no size can hold.
pub(crate) fn plan_pages(
    photo_count: usize,
    per_page: usize,
    sizes: &[usize],
) -> Vec<Option<usize>> {
    let reachable = reachable_counts(photo_count, sizes);
    let mut pages = Vec::new();
    let mut remaining = photo_count;

    while remaining > 0 {
        let cap = remaining.min(per_page);
        let size = sizes
            .iter()
            .copied()
            .filter(|&s| s > 0 && s <= cap && reachable[remaining - s])
            .max()
            .or_else(|| fill_size(cap, sizes));

        remaining -= size.unwrap_or(1);
        pages.push(size);
    }
    pages
}

/// Photos left without a page when `photo_count` photos are paginated at
/// `per_page` per page using `sizes`.
fn stranded_photos(photo_count: usize, per_page: usize, sizes: &[usize]) -> usize {
    plan_pages(photo_count, per_page, sizes)
        .iter()
        .filter(|size| size.is_none())
        .count()
}

/// Pick the photos-per-page target that leaves the fewest photos without a
/// fitting page, preferring larger pages on ties.
///
/// Only sizes up to `photo_count` are considered; when none qualify the
/// smallest size is returned. Returns 0 when `sizes` holds no usable size.
pub fn calculate_optimal_photos_per_page(photo_count: usize, sizes: &[usize]) -> usize {
    let usable: Vec<usize> = sizes.iter().copied().filter(|&s| s > 0).collect();
    let Some(&smallest) = usable.iter().min() else {
        return 0;
    };

    let mut best: Option<(usize, usize)> = None;
    for &size in usable.iter().filter(|&&s| s <= photo_count) {
        let stranded = stranded_photos(photo_count, size, &usable);
        best = match best {
            Some((best_stranded, best_size))
                if stranded > best_stranded
                    || (stranded == best_stranded && size <= best_size) =>
            {
                Some((best_stranded, best_size))
            }
            _ => Some((stranded, size)),
        };
    }

    best.map(|(_, size)| size).unwrap_or(smallest)
}

/// [`calculate_optimal_photos_per_page`] over a style's own templates
pub fn optimal_photos_per_page_for_style(photo_count: usize, style: LayoutStyle) -> usize {
    calculate_optimal_photos_per_page(photo_count, &style_template_sizes(style))
}

/// Photos partitioned by orientation, each list in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrientationGroups<'a> {
    pub landscape: Vec<&'a PhotoMetadata>,
    pub portrait: Vec<&'a PhotoMetadata>,
    pub square: Vec<&'a PhotoMetadata>,
    pub unknown: Vec<&'a PhotoMetadata>,
}

impl<'a> OrientationGroups<'a> {
    /// Concatenate the groups: landscape, portrait, square, unknown
    pub fn into_ordered(self) -> Vec<&'a PhotoMetadata> {
        let mut ordered = self.landscape;
        ordered.extend(self.portrait);
        ordered.extend(self.square);
        ordered.extend(self.unknown);
        ordered
    }

    pub fn len(&self) -> usize {
        self.landscape.len() + self.portrait.len() + self.square.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn group_photos_by_orientation<'a, I>(photos: I) -> OrientationGroups<'a>
where
    I: IntoIterator<Item = &'a PhotoMetadata>,
{
    let mut groups = OrientationGroups::default();
    for photo in photos {
        match photo.orientation {
            PhotoOrientation::Landscape => groups.landscape.push(photo),
            PhotoOrientation::Portrait => groups.portrait.push(photo),
            PhotoOrientation::Square => groups.square.push(photo),
            PhotoOrientation::Unknown => groups.unknown.push(photo),
        }
    }
    groups
}

/// Style suggested for a book of `photo_count` photos
pub fn recommend_style(photo_count: usize) -> LayoutStyle {
    match photo_count {
        0..=30 => LayoutStyle::Minimalist,
        31..=60 => LayoutStyle::Magazine,
        61..=100 => LayoutStyle::Classic,
        _ => LayoutStyle::Collage,
    }
}

/// First template of `style` (catalog order) holding exactly `photos_on_page` photos
pub fn recommend_template(photos_on_page: usize, style: LayoutStyle) -> Option<TemplateId> {
    let allowed = get_style_rules(style).templates;
    get_templates_for_photo_count(photos_on_page)
        .into_iter()
        .map(|t| t.id)
        .find(|id| *id != TemplateId::Custom && allowed.contains(id))
}

// =============================================================================
// Tests
// =============================================================================
