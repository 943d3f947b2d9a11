//! Shared numeric and style constants for the canvas crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize and rotate handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Element defaults ────────────────────────────────────────────

/// Placeholder content for freshly placed text elements.
pub const TEXT_PLACEHOLDER: &str = "Double-click to edit";

/// Fixed content label carried by every finalized path element.
pub const PATH_LABEL: &str = "Path";

/// Fallback content for image elements placed without a reference.
pub const IMAGE_PLACEHOLDER: &str = "Image";

/// Default project name before the user renames it.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled project";

// ── Raster export ───────────────────────────────────────────────

pub const EXPORT_BACKGROUND: &str = "#ffffff";
pub const EXPORT_TEXT_COLOR: &str = "#000000";
pub const EXPORT_TEXT_FONT: &str = "16px Arial";
/// Accent used for every shape proxy and path stroke in exports.
pub const EXPORT_ACCENT: &str = "#3b82f6";
pub const EXPORT_PATH_WIDTH: f64 = 2.0;

// ── On-screen palette ───────────────────────────────────────────

pub const RECT_FILL: &str = "#3b82f6";
pub const RECT_STROKE: &str = "#2563eb";
pub const CIRCLE_FILL: &str = "#22c55e";
pub const CIRCLE_STROKE: &str = "#16a34a";
pub const TRIANGLE_FILL: &str = "#ef4444";
pub const IMAGE_FILL: &str = "#e5e7eb";
pub const IMAGE_LABEL: &str = "#6b7280";
pub const PATH_STROKE: &str = "#3b82f6";
pub const ANCHOR_FILL: &str = "#ef4444";
pub const SELECTION_STROKE: &str = "#6366f1";
pub const ROTATE_HANDLE_FILL: &str = "#22c55e";
pub const GRID_STROKE: &str = "rgba(148, 163, 184, 0.25)";
pub const GUIDE_STROKE: &str = "rgba(147, 197, 253, 0.5)";
pub const OUTLINE_STROKE: &str = "#d1d5db";

/// Opacity applied to locked elements on screen.
pub const LOCKED_ALPHA: f64 = 0.75;

/// Inset of the dashed template outline from the page edge.
pub const TEMPLATE_OUTLINE_INSET: f64 = 16.0;
