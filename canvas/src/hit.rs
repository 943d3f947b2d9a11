#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{DesignElement, DocStore, ElementId};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    RotateHandle,
}

/// Corner resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    Ne,
    Se,
    Sw,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [Self; 4] = [Self::Ne, Self::Se, Self::Sw, Self::Nw];

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Sw | Self::Nw)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Ne | Self::Nw)
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Rotate `p` by `degrees` (clockwise on screen) around `center`.
#[must_use]
pub fn rotate_about(p: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// Canvas-space position of a corner handle, rotation applied.
#[must_use]
pub fn corner_position(el: &DesignElement, anchor: ResizeAnchor) -> Point {
    let x = if anchor.moves_left() { el.x } else { el.x + el.width };
    let y = if anchor.moves_top() { el.y } else { el.y + el.height };
    rotate_about(Point::new(x, y), el.center(), el.rotation)
}

/// Canvas-space position of the rotate handle above the top edge.
#[must_use]
pub fn rotate_handle_position(el: &DesignElement, camera: &Camera) -> Point {
    let offset = camera.screen_dist_to_world(ROTATE_HANDLE_OFFSET_PX);
    let local = Point::new(el.x + el.width / 2.0, el.y - offset);
    rotate_about(local, el.center(), el.rotation)
}

/// Whether `world_pt` falls inside the element's rotated bounding box.
#[must_use]
pub fn contains(el: &DesignElement, world_pt: Point) -> bool {
    let local = rotate_about(world_pt, el.center(), -el.rotation);
    local.x >= el.x && local.x <= el.x + el.width && local.y >= el.y && local.y <= el.y + el.height
}

fn near(a: Point, b: Point, radius: f64) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy <= radius * radius
}

/// Test which element (if any) is under `world_pt`.
///
/// Handles of the selected element are checked first, and only when it is
/// unlocked. Bodies are then checked topmost first: the selected element is
/// drawn above the rest, the others in reverse insertion order.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &DocStore, camera: &Camera, selected_id: Option<ElementId>) -> Option<Hit> {
    let selected = selected_id.and_then(|id| doc.get(&id));

    if let Some(el) = selected.filter(|el| !el.locked) {
        let radius = camera.screen_dist_to_world(HANDLE_RADIUS_PX);
        if near(world_pt, rotate_handle_position(el, camera), radius) {
            return Some(Hit { element_id: el.id, part: HitPart::RotateHandle });
        }
        for anchor in ResizeAnchor::ALL {
            if near(world_pt, corner_position(el, anchor), radius) {
                return Some(Hit { element_id: el.id, part: HitPart::ResizeHandle(anchor) });
            }
        }
    }

    if let Some(el) = selected.filter(|el| contains(el, world_pt)) {
        return Some(Hit { element_id: el.id, part: HitPart::Body });
    }

    doc.ordered()
        .into_iter()
        .rev()
        .filter(|el| Some(el.id) != selected_id)
        .find(|el| contains(el, world_pt))
        .map(|el| Hit { element_id: el.id, part: HitPart::Body })
}
