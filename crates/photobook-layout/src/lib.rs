pub mod algorithm;
pub mod constants;
mod dimensions;
mod options;
mod recommend;
mod styles;
pub mod templates;
mod types;
mod validate;

pub use algorithm::{ALGORITHM_NAME, generate_layout};
pub use dimensions::*;
pub use options::*;
pub use recommend::*;
pub use styles::*;
pub use templates::{
    LayoutTemplateDefinition, TemplateId, TemplateSlot, get_all_templates, get_template,
    get_templates_for_photo_count, get_templates_for_style, grid_slots,
};
pub use types::*;
pub use validate::{LayoutViolation, overflow_warning, validate_layout, validate_layout_against};
