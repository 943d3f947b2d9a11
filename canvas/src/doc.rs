//! Document model: design elements, sparse updates, and the in-memory store.
//!
//! This module defines what is placed on the design page (`DesignElement`,
//! `ElementKind`), a sparse-update type for incremental edits
//! (`PartialElement`), typed access to the kind-dependent `content` payload
//! (`ShapeKind`), and the store that owns all live elements (`DocStore`).
//!
//! The store is the only owner of elements. Elements never reference the
//! store or each other; every mutation goes through a `DocStore` method keyed
//! by id. Iteration order is insertion order, which is also draw and export
//! order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique, creation-ordered identifier for a design element.
pub type ElementId = Uuid;

/// Mint a fresh time-ordered element id.
#[must_use]
pub fn new_element_id() -> ElementId {
    Uuid::now_v7()
}

/// The kind of a design element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Raster image; `content` is an opaque reference such as a URL.
    Image,
    /// Text label; `content` is the display text.
    Text,
    /// Geometric shape; `content` is a [`ShapeKind`] tag.
    Shape,
    /// Open polyline; anchors live in `path`.
    Path,
}

/// Sub-kind of a `shape` element, stored as its tag in `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeKind {
    /// The tag stored in `DesignElement::content`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }

    /// Parse a content tag. Unknown tags yield `None`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "rectangle" => Some(Self::Rectangle),
            "circle" => Some(Self::Circle),
            "triangle" => Some(Self::Triangle),
            _ => None,
        }
    }
}

/// A placed design element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Rendering and content semantics.
    pub kind: ElementKind,
    /// Kind-dependent payload (text, shape tag, image reference, path label).
    pub content: String,
    /// Left edge of the bounding box in canvas units.
    pub x: f64,
    /// Top edge of the bounding box in canvas units.
    pub y: f64,
    /// Width of the bounding box in canvas units.
    pub width: f64,
    /// Height of the bounding box in canvas units.
    pub height: f64,
    /// Clockwise rotation in degrees around the bounding-box center.
    pub rotation: f64,
    /// Locked elements reject move, resize, rotate, delete and edit.
    pub locked: bool,
    /// Polyline anchors; present only for `ElementKind::Path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Point>>,
}

impl DesignElement {
    /// Build an unlocked, unrotated element with a fresh id.
    #[must_use]
    pub fn new(kind: ElementKind, content: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: new_element_id(),
            kind,
            content: content.into(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            locked: false,
            path: None,
        }
    }

    /// Shape sub-kind, when this is a shape with a known tag.
    #[must_use]
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        if self.kind == ElementKind::Shape {
            ShapeKind::parse(&self.content)
        } else {
            None
        }
    }

    /// Center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Sparse update for a design element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Replacement anchor list for path elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Point>>,
}

impl PartialElement {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Tight bounding box `(min, max)` of a non-empty anchor list.
#[must_use]
pub fn path_bounds(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

fn sanitize(mut el: DesignElement) -> Option<DesignElement> {
    let geometry = [el.x, el.y, el.width, el.height, el.rotation];
    if geometry.iter().any(|v| !v.is_finite()) {
        return None;
    }
    el.width = el.width.max(0.0);
    el.height = el.height.max(0.0);
    if el.kind == ElementKind::Path {
        let points = el.path.as_ref()?;
        if points.len() < 2 || points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return None;
        }
    } else {
        el.path = None;
    }
    Some(el)
}

/// In-memory store of design elements, preserving insertion order.
pub struct DocStore {
    elements: HashMap<ElementId, DesignElement>,
    order: Vec<ElementId>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: HashMap::new(), order: Vec::new() }
    }

    /// Insert or replace an element. New ids are appended to the draw order;
    /// replacing keeps the existing position.
    pub fn insert(&mut self, element: DesignElement) {
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            self.order.push(id);
        }
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<DesignElement> {
        let removed = self.elements.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&DesignElement> {
        self.elements.get(id)
    }

    /// Apply a partial update to an existing element. Returns false if the element doesn't exist.
    pub fn apply_partial(&mut self, id: &ElementId, partial: &PartialElement) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            el.x = x;
        }
        if let Some(y) = partial.y {
            el.y = y;
        }
        if let Some(w) = partial.width {
            el.width = w.max(0.0);
        }
        if let Some(h) = partial.height {
            el.height = h.max(0.0);
        }
        if let Some(r) = partial.rotation {
            el.rotation = r;
        }
        if let Some(locked) = partial.locked {
            el.locked = locked;
        }
        if let Some(ref content) = partial.content {
            el.content.clone_from(content);
        }
        if let Some(ref path) = partial.path {
            if el.kind == ElementKind::Path && !path.is_empty() {
                el.path = Some(path.clone());
            }
        }
        true
    }

    /// Replace all elements with a snapshot, keeping the snapshot's order.
    ///
    /// Sizes are clamped to zero and `path` is kept only on path elements.
    /// Elements with non-finite geometry, and path elements with fewer than
    /// two anchors, are dropped. Returns the number of dropped elements.
    pub fn load_snapshot(&mut self, elements: Vec<DesignElement>) -> usize {
        self.elements.clear();
        self.order.clear();
        let mut dropped = 0;
        for el in elements {
            match sanitize(el) {
                Some(el) => self.insert(el),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            log::warn!("snapshot: dropped {dropped} degenerate elements");
        }
        dropped
    }

    /// All elements in insertion (draw) order.
    #[must_use]
    pub fn ordered(&self) -> Vec<&DesignElement> {
        self.order.iter().filter_map(|id| self.elements.get(id)).collect()
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        &self.order
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
