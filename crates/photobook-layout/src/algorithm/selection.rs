//! Template selection
//!
//! Works out which templates a run may use and picks one per page.

use log::debug;

use crate::options::LayoutOptions;
use crate::recommend::{calculate_optimal_photos_per_page, fill_size, plan_pages};
use crate::styles::PhotoRange;
use crate::templates::{LayoutTemplateDefinition, TemplateId, get_all_templates, get_template};

/// Templates eligible for one run, in catalog declaration order
#[derive(Debug)]
pub struct TemplatePlan {
    bounds: PhotoRange,
    templates: Vec<&'static LayoutTemplateDefinition>,
    sizes: Vec<usize>,
}

impl TemplatePlan {
    /// Build the plan for `options`, pushing a warning whenever the style's
    /// own templates cannot serve the active bounds.
    pub fn new(options: &LayoutOptions, warnings: &mut Vec<String>) -> Self {
        let bounds = options.effective_bounds();
        let rules = options.style_rules();

        let in_bounds = |t: &&'static LayoutTemplateDefinition| {
            t.id != TemplateId::Custom && bounds.contains(t.photos_per_page)
        };

        let mut templates: Vec<_> = get_all_templates()
            .iter()
            .filter(|t| rules.templates.contains(&t.id))
            .filter(in_bounds)
            .collect();

        if templates.is_empty() {
            templates = get_all_templates().iter().filter(in_bounds).collect();
            if templates.is_empty() {
                warnings.push(format!(
                    "No template holds between {} and {} photos; placing one photo per page",
                    bounds.min, bounds.max
                ));
            } else {
                warnings.push(format!(
                    "No {} template holds between {} and {} photos; using catalog templates",
                    rules.style, bounds.min, bounds.max
                ));
            }
        }

        let mut sizes: Vec<usize> = templates.iter().map(|t| t.photos_per_page).collect();
        sizes.sort_unstable();
        sizes.dedup();

        debug!(
            "Template plan for {}: bounds {}-{}, templates {:?}",
            rules.style,
            bounds.min,
            bounds.max,
            templates.iter().map(|t| t.id).collect::<Vec<_>>()
        );

        Self {
            bounds,
            templates,
            sizes,
        }
    }

    pub fn bounds(&self) -> PhotoRange {
        self.bounds
    }

    /// Photos-per-page target for a run of `run_len` photos (never 0)
    pub fn per_page_for(&self, run_len: usize) -> usize {
        calculate_optimal_photos_per_page(run_len, &self.sizes).max(1)
    }

    /// Photo count of each page for a run of `run_len` photos.
    ///
    /// `None` marks a single photo that no planned template can hold.
    pub fn page_sizes(&self, run_len: usize) -> Vec<Option<usize>> {
        plan_pages(run_len, self.per_page_for(run_len), &self.sizes)
    }

    /// Template for a page that should hold `take` photos.
    ///
    /// Exact matches win; otherwise the largest template below `take`, and
    /// the caller carries the surplus. Ties go to catalog declaration order.
    pub fn select(&self, take: usize) -> Option<&'static LayoutTemplateDefinition> {
        let size = fill_size(take, &self.sizes)?;
        self.templates
            .iter()
            .copied()
            .find(|t| t.photos_per_page == size)
    }
}

/// Template used when nothing in the plan fits
pub fn fallback_template() -> &'static LayoutTemplateDefinition {
    get_template(TemplateId::Single)
}
