//! Input model: tools, mouse buttons, keys, and the gesture state machine.
//!
//! `Tool` captures the user's intent at the time of a pointer event. `UiState` is the transient view state (selection, in-progress pen
//! path, text edit, view toggles). `InputState` is the active gesture tracked
//! between pointer-down and pointer-up: while it is anything but `Idle` the
//! engine routes every move and up event to it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::consts::DEFAULT_PROJECT_NAME;
use crate::doc::{DesignElement, ElementId, ShapeKind};
use crate::hit::ResizeAnchor;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Click-to-place polyline authoring.
    Pen,
    /// Rubber-band a rectangle.
    Rectangle,
    /// Rubber-band a circle.
    Circle,
    /// Rubber-band a triangle.
    Triangle,
    /// Drop a text element.
    Text,
    /// Drop an image placeholder.
    Image,
}

impl Tool {
    /// Parse a toolbar identifier (`"select"`, `"pen"`, ...).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "select" => Some(Self::Select),
            "pen" => Some(Self::Pen),
            "rectangle" => Some(Self::Rectangle),
            "circle" => Some(Self::Circle),
            "triangle" => Some(Self::Triangle),
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    /// The shape sub-kind this tool rubber-bands, if any.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
            Self::Triangle => Some(ShapeKind::Triangle),
            _ => None,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// In-progress project rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    /// Name shown when the rename began; restored on cancel.
    pub original: String,
}

/// Persistent UI state visible to the renderer.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active drawing tool.
    pub tool: Tool,
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// The text element currently open in the host's editor, if any.
    pub editing_id: Option<ElementId>,
    /// Anchors of the pen path being authored, empty when none.
    pub pen_path: Vec<Point>,
    /// Draw the background grid.
    pub show_grid: bool,
    /// Draw the center guides.
    pub show_guides: bool,
    /// Display name of the design.
    pub project_name: String,
    /// Active project rename, if any.
    pub rename: Option<Rename>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            selected_id: None,
            editing_id: None,
            pen_path: Vec::new(),
            show_grid: true,
            show_guides: true,
            project_name: DEFAULT_PROJECT_NAME.to_owned(),
            rename: None,
        }
    }
}

impl UiState {
    /// Whether a pen path is being authored.
    #[must_use]
    pub fn drawing_path(&self) -> bool {
        !self.pen_path.is_empty()
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an existing element across the page.
    DraggingElement {
        /// Id of the element being dragged.
        id: ElementId,
        /// Canvas-space pointer position when the drag began.
        start_world: Point,
        /// Element x at the start of the drag.
        orig_x: f64,
        /// Element y at the start of the drag.
        orig_y: f64,
        /// Path anchors at the start of the drag (path elements only).
        orig_path: Option<Vec<Point>>,
    },
    /// The user is rubber-banding a new shape from an anchor corner.
    DrawingShape {
        /// Provisional element; not yet in the store.
        provisional: DesignElement,
        /// The canvas-space corner where the drag started.
        anchor_world: Point,
    },
    /// The user is resizing an element by dragging one of its corner handles.
    ResizingElement {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner handle is being dragged.
        anchor: ResizeAnchor,
        /// Canvas-space pointer position at the start of the resize.
        start_world: Point,
        /// Element x at the start of the resize.
        orig_x: f64,
        /// Element y at the start of the resize.
        orig_y: f64,
        /// Element width at the start of the resize.
        orig_w: f64,
        /// Element height at the start of the resize.
        orig_h: f64,
        /// Path anchors at the start of the resize (path elements only).
        orig_path: Option<Vec<Point>>,
    },
    /// The user is rotating an element by dragging the rotate handle.
    RotatingElement {
        /// Id of the element being rotated.
        id: ElementId,
        /// Canvas-space center of the element; the rotation pivot.
        center: Point,
        /// Rotation in degrees at the start of the gesture.
        orig_rotation: f64,
        /// Pointer angle around `center` at the start, in degrees.
        start_angle: f64,
    },
}

impl InputState {
    /// Whether a gesture is consuming move/up events.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
