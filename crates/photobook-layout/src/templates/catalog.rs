use std::sync::LazyLock;

use super::{LayoutTemplateDefinition, TemplateId, TemplateSlot, grid_slots};
use crate::constants::{GRID_GUTTER, GRID_MARGIN};

static CATALOG: LazyLock<Vec<LayoutTemplateDefinition>> = LazyLock::new(build_catalog);

/// Entries are declared in `TemplateId` order; lookups index by discriminant.
fn build_catalog() -> Vec<LayoutTemplateDefinition> {
    TemplateId::ALL.into_iter().map(define).collect()
}

fn define(id: TemplateId) -> LayoutTemplateDefinition {
    let (name, description, slots) = match id {
        TemplateId::Single => (
            "Single",
            "One photo centered on the page",
            vec![TemplateSlot::new(0.1, 0.1, 0.8, 0.8)],
        ),
        TemplateId::Double => (
            "Double",
            "Two photos side by side",
            vec![
                TemplateSlot::new(0.05, 0.1, 0.44, 0.8),
                TemplateSlot::new(0.51, 0.1, 0.44, 0.8),
            ],
        ),
        TemplateId::Grid2x2 => (
            "2×2 Grid",
            "Four photos in an even grid",
            grid_slots(2, 2, GRID_MARGIN, GRID_GUTTER),
        ),
        TemplateId::Grid3x3 => (
            "3×3 Grid",
            "Nine photos in an even grid",
            grid_slots(3, 3, GRID_MARGIN, GRID_GUTTER),
        ),
        TemplateId::Grid2x3 => (
            "2×3 Grid",
            "Six photos in two columns of three",
            grid_slots(2, 3, GRID_MARGIN, GRID_GUTTER),
        ),
        TemplateId::Asymmetric => (
            "Asymmetric",
            "One dominant photo with two stacked companions",
            vec![
                TemplateSlot::new(0.05, 0.05, 0.55, 0.9).with_z_index(1),
                TemplateSlot::new(0.62, 0.05, 0.33, 0.44),
                TemplateSlot::new(0.62, 0.51, 0.33, 0.44),
            ],
        ),
        TemplateId::Custom => ("Custom", "Free-form placement by the editor", Vec::new()),
    };

    LayoutTemplateDefinition {
        id,
        name,
        description,
        photos_per_page: slots.len(),
        slots,
    }
}

pub fn get_template(id: TemplateId) -> &'static LayoutTemplateDefinition {
    &CATALOG[id as usize]
}

/// The whole catalog in declaration order
pub fn get_all_templates() -> &'static [LayoutTemplateDefinition] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_id() {
        for id in TemplateId::ALL {
            assert_eq!(get_template(id).id, id);
        }
    }

    #[test]
    fn test_slot_counts() {
        assert_eq!(get_template(TemplateId::Single).photos_per_page, 1);
        assert_eq!(get_template(TemplateId::Double).photos_per_page, 2);
        assert_eq!(get_template(TemplateId::Asymmetric).photos_per_page, 3);
        assert_eq!(get_template(TemplateId::Grid2x2).photos_per_page, 4);
        assert_eq!(get_template(TemplateId::Grid2x3).photos_per_page, 6);
        assert_eq!(get_template(TemplateId::Grid3x3).photos_per_page, 9);
        assert_eq!(get_template(TemplateId::Custom).photos_per_page, 0);
    }

    #[test]
    fn test_every_slot_stays_on_page() {
        for template in get_all_templates() {
            for slot in &template.slots {
                assert!(slot.x >= 0.0 && slot.y >= 0.0);
                assert!(slot.x + slot.width <= 1.0 + 1e-9, "{}", template.id);
                assert!(slot.y + slot.height <= 1.0 + 1e-9, "{}", template.id);
            }
        }
    }
}
