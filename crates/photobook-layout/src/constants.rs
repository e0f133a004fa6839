//! Shared constants for photo-book layout
//!
//! This module centralizes the print-production numbers and layout tuning
//! values used throughout the engine.

// =============================================================================
// Print Production
// =============================================================================

/// Resolution print-ready files are rendered at
pub const DEFAULT_DPI: u32 = 300;

/// Lowest effective resolution a photo can be printed at without a warning
pub const MIN_PRINT_DPI: f64 = 150.0;

/// Bleed beyond the trim edge, in inches (same for every page size)
pub const BLEED_IN: f64 = 0.125;

/// Safe-zone inset from the trim edge, in inches
pub const SAFE_ZONE_IN: f64 = 0.25;

// =============================================================================
// Geometry
// =============================================================================

/// Tolerance for slot containment checks on normalized coordinates
pub const LAYOUT_EPSILON: f64 = 1e-6;

/// Aspect ratios within this distance of 1.0 count as square
pub const SQUARE_TOLERANCE: f64 = 0.05;

/// Outer margin used by the catalog's grid templates (normalized)
pub const GRID_MARGIN: f64 = 0.05;

/// Gap between grid cells used by the catalog's grid templates (normalized)
pub const GRID_GUTTER: f64 = 0.02;

// =============================================================================
// Collage Tilt
// =============================================================================

/// Rotation applied to successive slots when a style allows rotation (degrees).
/// Indexed by slot position modulo the table length, so placement stays
/// deterministic.
pub const TILT_PATTERN_DEGREES: [f64; 5] = [-3.0, 2.0, -1.5, 3.0, -2.0];

// =============================================================================
// Cover Text
// =============================================================================

/// Font size for the cover title (points)
pub const COVER_TITLE_FONT_SIZE: f64 = 36.0;
