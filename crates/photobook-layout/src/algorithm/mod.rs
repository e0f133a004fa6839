//! Photo-book layout generation
//!
//! This module orchestrates a layout run:
//! 1. Validate options and order the photos
//! 2. Emit the cover page (when requested)
//! 3. Paginate each run of photos with the style's templates
//! 4. Emit the back page and collect metadata
//!
//! A run is a pure function of its inputs. Problems with the photos become
//! warnings and unused ids, never errors.

mod ordering;
mod placement;
mod selection;

pub use ordering::{group_runs, order_photos};
pub use placement::{place_photo, placed_dpi, template_slots};

use std::time::Instant;

use chrono::Utc;
use log::{debug, info, warn};

use crate::constants::COVER_TITLE_FONT_SIZE;
use crate::dimensions::{PageDimensions, get_dimensions};
use crate::options::LayoutOptions;
use crate::templates::{LayoutTemplateDefinition, TemplateId, get_template};
use crate::types::*;
use placement::print_warnings;
use selection::{TemplatePlan, fallback_template};

/// Name recorded in `LayoutMetadata::algorithm`
pub const ALGORITHM_NAME: &str = "sequential-fill";

/// Main layout function
pub fn generate_layout(photos: &[PhotoMetadata], options: &LayoutOptions) -> Result<LayoutResult> {
    options.validate()?;

    let started = Instant::now();
    let generated_at = Utc::now();

    let mut book = BookBuilder::new(options);

    let ordered = order_photos(photos, options.preserve_order);
    let content = if options.wants_cover() {
        book.push_cover(&ordered)
    } else {
        ordered
    };

    let plan = book.plan();
    for run in group_runs(&content, options.group_by_date) {
        book.paginate_run(run, &plan);
    }

    if options.include_back_page {
        book.push_back();
    }

    let result = book.finish(generated_at, started);
    info!(
        "Generated {} page(s) for {} photo(s): {} placed, {} unused, {} warning(s) in {:.2}ms",
        result.total_pages,
        photos.len(),
        result.photos_used,
        result.photos_unused.len(),
        result.warnings.len(),
        result.metadata.generation_time_ms
    );
    Ok(result)
}

/// Accumulates pages, unused ids and warnings during one run
struct BookBuilder<'o> {
    options: &'o LayoutOptions,
    page_dims: PageDimensions,
    pages: Vec<PageLayout>,
    photos_used: usize,
    unused: Vec<String>,
    warnings: Vec<String>,
    content_pages: usize,
}

impl<'o> BookBuilder<'o> {
    fn new(options: &'o LayoutOptions) -> Self {
        Self {
            options,
            page_dims: get_dimensions(options.page_size),
            pages: Vec::new(),
            photos_used: 0,
            unused: Vec::new(),
            warnings: Vec::new(),
            content_pages: 0,
        }
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    fn plan(&mut self) -> TemplatePlan {
        let mut warnings = Vec::new();
        let plan = TemplatePlan::new(self.options, &mut warnings);
        for message in warnings {
            self.warn(message);
        }
        plan
    }

    fn content_full(&self) -> bool {
        self.options
            .content_page_capacity()
            .is_some_and(|capacity| self.content_pages >= capacity)
    }

    /// Emit the cover page and return the photos left for content pages
    fn push_cover<'p>(&mut self, ordered: &[&'p PhotoMetadata]) -> Vec<&'p PhotoMetadata> {
        let options = self.options;
        let forced = options.cover_photo_id.as_deref();
        let mut cover_index = None;

        if let Some(id) = forced {
            cover_index = ordered.iter().position(|p| p.id == id);
            if cover_index.is_none() {
                self.warn(format!(
                    "Cover photo {} is not in the photo set; using the first photo",
                    id
                ));
            }
        }
        if cover_index.is_none() && !ordered.is_empty() {
            cover_index = Some(0);
        }

        let cover_photo = cover_index.map(|i| ordered[i]);
        let template = match cover_photo {
            Some(_) => get_template(TemplateId::Single),
            None => get_template(TemplateId::Custom),
        };

        let mut text_elements = Vec::new();
        if let Some(title) = options.title.as_deref() {
            text_elements.push(cover_title(title, cover_photo.is_some()));
        }

        self.push_page(
            PageType::Cover,
            template,
            cover_photo.as_slice(),
            text_elements,
            false,
        );

        ordered
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != cover_index)
            .map(|(_, p)| *p)
            .collect()
    }

    fn push_back(&mut self) {
        self.push_page(
            PageType::Back,
            get_template(TemplateId::Custom),
            &[],
            Vec::new(),
            false,
        );
    }

    /// Paginate one contiguous run of photos
    fn paginate_run(&mut self, run: &[&PhotoMetadata], plan: &TemplatePlan) {
        let page_sizes = plan.page_sizes(run.len());
        debug!(
            "Paginating run of {} photo(s) at {} per page",
            run.len(),
            plan.per_page_for(run.len())
        );

        let mut rest = run;
        for size in page_sizes {
            if self.content_full() {
                self.mark_unused(rest);
                return;
            }

            let (template, fallback) = match size.and_then(|size| plan.select(size)) {
                Some(template) => (template, false),
                None => {
                    let bounds = plan.bounds();
                    self.warn(format!(
                        "Photo {} has no template between {} and {} photos; placed on a single-photo page",
                        rest[0].id, bounds.min, bounds.max
                    ));
                    (fallback_template(), true)
                }
            };

            let (page_photos, tail) = rest.split_at(template.photos_per_page.min(rest.len()));
            debug!(
                "Page {}: {} with {} photo(s)",
                self.pages.len() + 1,
                template.id,
                page_photos.len()
            );
            self.push_page(PageType::Content, template, page_photos, Vec::new(), fallback);
            self.content_pages += 1;
            rest = tail;
        }
    }

    fn mark_unused(&mut self, photos: &[&PhotoMetadata]) {
        for photo in photos {
            self.warn(format!(
                "Photo {} not placed: book is limited to {} page(s)",
                photo.id,
                self.options.max_pages.unwrap_or_default()
            ));
            self.unused.push(photo.id.clone());
        }
    }

    fn push_page(
        &mut self,
        page_type: PageType,
        template: &LayoutTemplateDefinition,
        photos: &[&PhotoMetadata],
        text_elements: Vec<TextElement>,
        fallback: bool,
    ) {
        let slots = template_slots(template, self.options);
        let mut positions = Vec::with_capacity(photos.len());

        for (index, (photo, slot)) in photos.iter().zip(slots.iter()).enumerate() {
            let position = place_photo(photo, slot, index, self.options);
            for message in print_warnings(photo, &position, &self.page_dims) {
                self.warn(message);
            }
            positions.push(position);
        }
        self.photos_used += positions.len();

        self.pages.push(PageLayout {
            page_number: self.pages.len() + 1,
            page_type,
            template_id: template.id,
            photos: positions,
            text_elements,
            background: self.options.background.clone(),
            fallback,
        });
    }

    fn finish(self, generated_at: chrono::DateTime<Utc>, started: Instant) -> LayoutResult {
        LayoutResult {
            total_pages: self.pages.len(),
            pages: self.pages,
            photos_used: self.photos_used,
            photos_unused: self.unused,
            warnings: self.warnings,
            metadata: LayoutMetadata {
                generated_at,
                generation_time_ms: started.elapsed().as_secs_f64() * 1000.0,
                algorithm: ALGORITHM_NAME.to_string(),
                options: self.options.clone(),
            },
        }
    }
}

/// Title block: under the photo when there is one, centered otherwise
fn cover_title(title: &str, has_photo: bool) -> TextElement {
    let y = if has_photo { 0.905 } else { 0.45 };
    TextElement {
        text: title.to_string(),
        x: 0.1,
        y,
        width: 0.8,
        height: 0.08,
        font_size: COVER_TITLE_FONT_SIZE,
        align: TextAlign::Center,
    }
}
