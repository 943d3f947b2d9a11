use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::config::EditorConfig;
use crate::consts::{IMAGE_PLACEHOLDER, PATH_LABEL, TEXT_PLACEHOLDER};
use crate::doc::{DesignElement, DocStore, ElementId, ElementKind, PartialElement, path_bounds};
use crate::hit::{self, HitPart, ResizeAnchor};
use crate::input::{Button, InputState, Key, Rename, Tool, UiState};
use crate::{raster, render};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(DesignElement),
    ElementUpdated { id: ElementId, fields: PartialElement },
    ElementDeleted { id: ElementId },
    /// The selection changed; `None` means it was cleared.
    SelectionChanged(Option<ElementId>),
    /// The host should open its text editor bound to this element.
    EditTextRequested { id: ElementId, text: String },
    ProjectRenamed(String),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: EditorConfig,
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    /// Reference used by the image tool for the next placement.
    pub pending_image: Option<String>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

fn cursor_for(tool: Tool) -> &'static str {
    match tool {
        Tool::Select => "default",
        Tool::Text => "text",
        Tool::Pen | Tool::Rectangle | Tool::Circle | Tool::Triangle | Tool::Image => "crosshair",
    }
}

fn angle_deg(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x).to_degrees()
}

fn translate_path(path: Option<&Vec<Point>>, dx: f64, dy: f64) -> Option<Vec<Point>> {
    path.map(|points| points.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect())
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from `config`, falling back to the defaults when it
    /// fails validation.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config: config.or_default(),
            doc: DocStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            pending_image: None,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Data inputs ---

    /// Replace the document with a set of elements. Clears all transient state.
    pub fn load_snapshot(&mut self, elements: Vec<DesignElement>) -> Vec<Action> {
        self.doc.load_snapshot(elements);
        let mut actions = Vec::new();
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }
        self.ui.editing_id = None;
        self.ui.pen_path.clear();
        self.input = InputState::Idle;
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Tool / view ---

    /// Set the active tool.
    ///
    /// Leaving the pen tool discards any path in progress; any rubber-band
    /// drag is abandoned.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let mut actions = Vec::new();
        if tool != Tool::Pen && self.ui.drawing_path() {
            log::debug!("discarding pen path with {} anchors on tool change", self.ui.pen_path.len());
            self.ui.pen_path.clear();
            actions.push(Action::RenderNeeded);
        }
        if matches!(self.input, InputState::DrawingShape { .. }) {
            self.input = InputState::Idle;
            actions.push(Action::RenderNeeded);
        }
        if self.ui.tool != tool {
            self.ui.tool = tool;
            actions.push(Action::SetCursor(cursor_for(tool).to_owned()));
        }
        actions
    }

    /// Set the reference placed by the next image-tool click.
    pub fn set_pending_image(&mut self, reference: Option<String>) {
        self.pending_image = reference;
    }

    /// Record where the page's top-left corner sits in the viewport.
    pub fn set_page_origin(&mut self, pan_x: f64, pan_y: f64) {
        self.camera.pan_x = pan_x;
        self.camera.pan_y = pan_y;
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let step = i64::from(self.config.zoom_step_percent);
        self.zoom_by(step)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let step = i64::from(self.config.zoom_step_percent);
        self.zoom_by(-step)
    }

    pub fn zoom_reset(&mut self) -> Vec<Action> {
        if self.camera.reset_zoom(self.config.zoom_min_percent, self.config.zoom_max_percent) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    fn zoom_by(&mut self, delta: i64) -> Vec<Action> {
        if self.camera.step_zoom(delta, self.config.zoom_min_percent, self.config.zoom_max_percent) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn toggle_grid(&mut self) -> Vec<Action> {
        self.ui.show_grid = !self.ui.show_grid;
        vec![Action::RenderNeeded]
    }

    pub fn toggle_guides(&mut self) -> Vec<Action> {
        self.ui.show_guides = !self.ui.show_guides;
        vec![Action::RenderNeeded]
    }

    // --- Selection ---

    /// Select an element (locked ones included) or clear the selection.
    ///
    /// Unknown ids are ignored.
    pub fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(id) = id {
            if self.doc.get(&id).is_none() {
                return actions;
            }
        }
        self.set_selection(id, &mut actions);
        actions
    }

    fn set_selection(&mut self, id: Option<ElementId>, actions: &mut Vec<Action>) {
        if self.ui.selected_id == id {
            return;
        }
        self.ui.selected_id = id;
        actions.push(Action::SelectionChanged(id));
        actions.push(Action::RenderNeeded);
    }

    // --- Element operations ---

    /// The element, if it exists and accepts mutation.
    fn mutable(&self, id: &ElementId, op: &str) -> Option<&DesignElement> {
        let el = self.doc.get(id)?;
        if el.locked {
            log::debug!("{op} rejected: element {id} is locked");
            return None;
        }
        Some(el)
    }

    fn update(&mut self, id: ElementId, fields: PartialElement, actions: &mut Vec<Action>) {
        if fields.is_empty() || !self.doc.apply_partial(&id, &fields) {
            return;
        }
        actions.push(Action::ElementUpdated { id, fields });
        actions.push(Action::RenderNeeded);
    }

    fn insert_selected(&mut self, element: DesignElement, actions: &mut Vec<Action>) {
        let id = element.id;
        actions.push(Action::ElementCreated(element.clone()));
        self.doc.insert(element);
        self.set_selection(Some(id), actions);
        actions.push(Action::RenderNeeded);
    }

    /// Move an unlocked element so its top-left corner is at `(x, y)`.
    pub fn move_element(&mut self, id: &ElementId, x: f64, y: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(el) = self.mutable(id, "move") else {
            return actions;
        };
        let path = translate_path(el.path.as_ref(), x - el.x, y - el.y);
        let fields = PartialElement { x: Some(x), y: Some(y), path, ..Default::default() };
        self.update(*id, fields, &mut actions);
        actions
    }

    /// Resize an unlocked element, keeping its top-left corner.
    ///
    /// Negative or non-finite sizes are clamped to zero.
    pub fn resize_element(&mut self, id: &ElementId, width: f64, height: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(el) = self.mutable(id, "resize") else {
            return actions;
        };
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        let path = scale_path(el, el.x, el.y, width, height);
        let fields = PartialElement { width: Some(width), height: Some(height), path, ..Default::default() };
        self.update(*id, fields, &mut actions);
        actions
    }

    /// Set an unlocked element's rotation in degrees.
    pub fn rotate_element(&mut self, id: &ElementId, rotation: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.mutable(id, "rotate").is_none() || !rotation.is_finite() {
            return actions;
        }
        let fields = PartialElement { rotation: Some(rotation), ..Default::default() };
        self.update(*id, fields, &mut actions);
        actions
    }

    /// Toolbar rotate: add the configured step to the current rotation.
    pub fn rotate_step(&mut self, id: &ElementId) -> Vec<Action> {
        let Some(el) = self.doc.get(id) else {
            return Vec::new();
        };
        let rotation = el.rotation + self.config.rotate_step_deg;
        self.rotate_element(id, rotation)
    }

    /// Lock or unlock an element. Locking ends any edit or gesture on it.
    pub fn set_locked(&mut self, id: &ElementId, locked: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(el) = self.doc.get(id) else {
            return actions;
        };
        if el.locked == locked {
            return actions;
        }
        if locked {
            if self.ui.editing_id == Some(*id) {
                self.ui.editing_id = None;
            }
            if self.gesture_target() == Some(*id) {
                self.input = InputState::Idle;
            }
        }
        let fields = PartialElement { locked: Some(locked), ..Default::default() };
        self.update(*id, fields, &mut actions);
        actions
    }

    pub fn toggle_lock(&mut self, id: &ElementId) -> Vec<Action> {
        let Some(el) = self.doc.get(id) else {
            return Vec::new();
        };
        let locked = !el.locked;
        self.set_locked(id, locked)
    }

    /// Remove an unlocked element; clears the selection if it was selected.
    pub fn delete_element(&mut self, id: &ElementId) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.mutable(id, "delete").is_none() {
            return actions;
        }
        self.doc.remove(id);
        if self.ui.editing_id == Some(*id) {
            self.ui.editing_id = None;
        }
        if self.gesture_target() == Some(*id) {
            self.input = InputState::Idle;
        }
        actions.push(Action::ElementDeleted { id: *id });
        if self.ui.selected_id == Some(*id) {
            self.set_selection(None, &mut actions);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Insert an unlocked copy of an element, offset diagonally, and select it.
    pub fn duplicate_element(&mut self, id: &ElementId) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(el) = self.mutable(id, "duplicate") else {
            return actions;
        };
        let offset = self.config.duplicate_offset;
        let mut copy = DesignElement::new(el.kind, el.content.clone(), el.x + offset, el.y + offset, el.width, el.height);
        copy.rotation = el.rotation;
        copy.path = translate_path(el.path.as_ref(), offset, offset);
        self.insert_selected(copy, &mut actions);
        actions
    }

    /// Add an image element for `reference` at the configured origin and select it.
    pub fn insert_image(&mut self, reference: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        let (x, y) = self.config.image_origin;
        let size = self.config.image_size;
        let el = DesignElement::new(ElementKind::Image, reference, x, y, size, size);
        self.insert_selected(el, &mut actions);
        actions
    }

    // --- Text editing ---

    /// Open the host editor for an unlocked text element.
    pub fn begin_text_edit(&mut self, id: &ElementId) -> Vec<Action> {
        let Some(el) = self.mutable(id, "edit") else {
            return Vec::new();
        };
        if el.kind != ElementKind::Text {
            return Vec::new();
        }
        let text = el.content.clone();
        self.ui.editing_id = Some(*id);
        vec![Action::EditTextRequested { id: *id, text }]
    }

    /// Commit text from the host editor back into the element.
    ///
    /// Always clears the edit flag for `id`, even when the write is rejected.
    pub fn commit_text(&mut self, id: &ElementId, text: String) -> Vec<Action> {
        if self.ui.editing_id == Some(*id) {
            self.ui.editing_id = None;
        }
        let mut actions = Vec::new();
        let Some(el) = self.mutable(id, "edit") else {
            return actions;
        };
        if el.kind != ElementKind::Text || el.content == text {
            return actions;
        }
        let fields = PartialElement { content: Some(text), ..Default::default() };
        self.update(*id, fields, &mut actions);
        actions
    }

    /// Close the host editor without writing.
    pub fn cancel_text_edit(&mut self) -> Vec<Action> {
        if self.ui.editing_id.take().is_some() {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Project name ---

    pub fn begin_rename(&mut self) {
        self.ui.rename = Some(Rename { original: self.ui.project_name.clone() });
    }

    /// Apply a trimmed, non-empty name and close the rename.
    pub fn commit_rename(&mut self, name: &str) -> Vec<Action> {
        self.ui.rename = None;
        let name = name.trim();
        if name.is_empty() || name == self.ui.project_name {
            return Vec::new();
        }
        self.ui.project_name = name.to_owned();
        vec![Action::ProjectRenamed(self.ui.project_name.clone())]
    }

    /// Close the rename, keeping the name it started with.
    pub fn cancel_rename(&mut self) {
        if let Some(rename) = self.ui.rename.take() {
            self.ui.project_name = rename.original;
        }
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let mut actions = Vec::new();
        if button != Button::Primary {
            return actions;
        }
        let world = self.camera.screen_to_world(screen_pt);

        if self.ui.editing_id.take().is_some() {
            actions.push(Action::RenderNeeded);
        }

        // An open pen path owns every click until it is finalized.
        if self.ui.tool == Tool::Pen && self.ui.drawing_path() {
            self.push_pen_anchor(world, &mut actions);
            return actions;
        }

        if let Some(hit) = hit::hit_test(world, &self.doc, &self.camera, self.ui.selected_id) {
            self.set_selection(Some(hit.element_id), &mut actions);
            self.begin_gesture(hit.element_id, hit.part, world, &mut actions);
            return actions;
        }

        match self.ui.tool {
            Tool::Select => self.set_selection(None, &mut actions),
            Tool::Text => {
                let el = DesignElement::new(
                    ElementKind::Text,
                    TEXT_PLACEHOLDER,
                    world.x,
                    world.y,
                    self.config.text_width,
                    self.config.text_height,
                );
                self.insert_selected(el, &mut actions);
            }
            Tool::Image => {
                let reference = self.pending_image.clone().unwrap_or_else(|| IMAGE_PLACEHOLDER.to_owned());
                let size = self.config.image_size;
                let el = DesignElement::new(ElementKind::Image, reference, world.x, world.y, size, size);
                self.insert_selected(el, &mut actions);
            }
            Tool::Rectangle | Tool::Circle | Tool::Triangle => {
                if let Some(shape) = self.ui.tool.shape_kind() {
                    let provisional = DesignElement::new(ElementKind::Shape, shape.as_str(), world.x, world.y, 0.0, 0.0);
                    self.input = InputState::DrawingShape { provisional, anchor_world: world };
                    actions.push(Action::RenderNeeded);
                }
            }
            Tool::Pen => self.push_pen_anchor(world, &mut actions),
        }
        actions
    }

    fn begin_gesture(&mut self, id: ElementId, part: HitPart, world: Point, actions: &mut Vec<Action>) {
        let Some(el) = self.doc.get(&id) else {
            return;
        };
        if el.locked {
            actions.push(Action::SetCursor("not-allowed".to_owned()));
            return;
        }
        self.input = match part {
            HitPart::Body => InputState::DraggingElement {
                id,
                start_world: world,
                orig_x: el.x,
                orig_y: el.y,
                orig_path: el.path.clone(),
            },
            HitPart::ResizeHandle(anchor) => InputState::ResizingElement {
                id,
                anchor,
                start_world: world,
                orig_x: el.x,
                orig_y: el.y,
                orig_w: el.width,
                orig_h: el.height,
                orig_path: el.path.clone(),
            },
            HitPart::RotateHandle => {
                let center = el.center();
                InputState::RotatingElement {
                    id,
                    center,
                    orig_rotation: el.rotation,
                    start_angle: angle_deg(center, world),
                }
            }
        };
    }

    fn push_pen_anchor(&mut self, world: Point, actions: &mut Vec<Action>) {
        // Double-clicks deliver two downs at the same spot before the dblclick.
        if self.ui.pen_path.last() == Some(&world) {
            return;
        }
        self.ui.pen_path.push(world);
        actions.push(Action::RenderNeeded);
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        let mut actions = Vec::new();
        match self.input.clone() {
            InputState::Idle => {}
            InputState::DrawingShape { mut provisional, anchor_world } => {
                let floor = self.config.min_shape_size;
                provisional.x = anchor_world.x.min(world.x);
                provisional.y = anchor_world.y.min(world.y);
                provisional.width = (world.x - anchor_world.x).abs().max(floor);
                provisional.height = (world.y - anchor_world.y).abs().max(floor);
                self.input = InputState::DrawingShape { provisional, anchor_world };
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingElement { id, start_world, orig_x, orig_y, orig_path } => {
                if self.mutable(&id, "move").is_none() {
                    return actions;
                }
                let dx = world.x - start_world.x;
                let dy = world.y - start_world.y;
                let fields = PartialElement {
                    x: Some(orig_x + dx),
                    y: Some(orig_y + dy),
                    path: translate_path(orig_path.as_ref(), dx, dy),
                    ..Default::default()
                };
                self.doc.apply_partial(&id, &fields);
                actions.push(Action::RenderNeeded);
            }
            InputState::ResizingElement { id, anchor, start_world, orig_x, orig_y, orig_w, orig_h, orig_path } => {
                let Some(el) = self.mutable(&id, "resize") else {
                    return actions;
                };
                let mut orig = el.clone();
                orig.x = orig_x;
                orig.y = orig_y;
                orig.width = orig_w;
                orig.height = orig_h;
                orig.path = orig_path;
                let fields = resize_from_handle(&orig, anchor, start_world, world, self.config.min_shape_size);
                self.doc.apply_partial(&id, &fields);
                actions.push(Action::RenderNeeded);
            }
            InputState::RotatingElement { id, center, orig_rotation, start_angle } => {
                if self.mutable(&id, "rotate").is_none() {
                    return actions;
                }
                let fields = PartialElement {
                    rotation: Some(orig_rotation + angle_deg(center, world) - start_angle),
                    ..Default::default()
                };
                self.doc.apply_partial(&id, &fields);
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_active() {
            return Vec::new();
        }
        let mut actions = self.on_pointer_move(screen_pt);
        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::DrawingShape { provisional, .. } => {
                let floor = self.config.min_shape_size;
                if provisional.width > floor && provisional.height > floor {
                    self.insert_selected(provisional, &mut actions);
                } else {
                    log::debug!("discarding {}x{} shape below the {floor} floor", provisional.width, provisional.height);
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::DraggingElement { id, orig_x, orig_y, .. } => {
                if let Some(el) = self.doc.get(&id) {
                    if Point::new(el.x, el.y) != Point::new(orig_x, orig_y) {
                        let fields =
                            PartialElement { x: Some(el.x), y: Some(el.y), path: el.path.clone(), ..Default::default() };
                        actions.push(Action::ElementUpdated { id, fields });
                    }
                }
            }
            InputState::ResizingElement { id, .. } => {
                if let Some(el) = self.doc.get(&id) {
                    let fields = PartialElement {
                        x: Some(el.x),
                        y: Some(el.y),
                        width: Some(el.width),
                        height: Some(el.height),
                        path: el.path.clone(),
                        ..Default::default()
                    };
                    actions.push(Action::ElementUpdated { id, fields });
                }
            }
            InputState::RotatingElement { id, .. } => {
                if let Some(el) = self.doc.get(&id) {
                    let fields = PartialElement { rotation: Some(el.rotation), ..Default::default() };
                    actions.push(Action::ElementUpdated { id, fields });
                }
            }
        }
        actions
    }

    /// Double-click finalizes a pen path, or opens the editor on a text element.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.ui.tool == Tool::Pen && self.ui.drawing_path() {
            return self.finish_pen_path();
        }
        let world = self.camera.screen_to_world(screen_pt);
        let Some(hit) = hit::hit_test(world, &self.doc, &self.camera, self.ui.selected_id) else {
            return Vec::new();
        };
        if hit.part != HitPart::Body {
            return Vec::new();
        }
        self.begin_text_edit(&hit.element_id)
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        let key = key.0.as_str();
        if self.ui.drawing_path() && matches!(key, "Enter" | "Escape") {
            return self.finish_pen_path();
        }
        if key == "Escape" {
            if self.ui.rename.is_some() {
                self.cancel_rename();
                return Vec::new();
            }
            if self.ui.editing_id.is_some() {
                return self.cancel_text_edit();
            }
            return Vec::new();
        }
        if matches!(key, "Delete" | "Backspace") && self.ui.editing_id.is_none() && self.ui.rename.is_none() {
            if let Some(id) = self.ui.selected_id {
                return self.delete_element(&id);
            }
        }
        Vec::new()
    }

    /// Turn the in-progress pen path into a `path` element.
    ///
    /// Fewer than two anchors are discarded.
    pub fn finish_pen_path(&mut self) -> Vec<Action> {
        let points = std::mem::take(&mut self.ui.pen_path);
        let mut actions = vec![Action::RenderNeeded];
        if points.len() < 2 {
            log::debug!("discarding pen path with {} anchors", points.len());
            return actions;
        }
        let Some((min, max)) = path_bounds(&points) else {
            return actions;
        };
        let pad = self.config.path_padding;
        let mut el =
            DesignElement::new(ElementKind::Path, PATH_LABEL, min.x, min.y, max.x - min.x + pad, max.y - min.y + pad);
        el.path = Some(points);
        self.insert_selected(el, &mut actions);
        actions
    }

    fn gesture_target(&self) -> Option<ElementId> {
        match &self.input {
            InputState::Idle | InputState::DrawingShape { .. } => None,
            InputState::DraggingElement { id, .. }
            | InputState::ResizingElement { id, .. }
            | InputState::RotatingElement { id, .. } => Some(*id),
        }
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    /// The current canvas view.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up an element by ID.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&DesignElement> {
        self.doc.get(id)
    }

    /// The rubber-band shape being drawn, if any.
    #[must_use]
    pub fn provisional(&self) -> Option<&DesignElement> {
        match &self.input {
            InputState::DrawingShape { provisional, .. } => Some(provisional),
            _ => None,
        }
    }

    /// Anchors of the pen path being authored.
    #[must_use]
    pub fn pen_path(&self) -> &[Point] {
        &self.ui.pen_path
    }
}

/// Rescale path anchors from `el`'s box into the box at `(x, y, width, height)`.
fn scale_path(el: &DesignElement, x: f64, y: f64, width: f64, height: f64) -> Option<Vec<Point>> {
    let points = el.path.as_ref()?;
    let sx = if el.width > 0.0 { width / el.width } else { 1.0 };
    let sy = if el.height > 0.0 { height / el.height } else { 1.0 };
    Some(
        points
            .iter()
            .map(|p| Point::new(x + (p.x - el.x) * sx, y + (p.y - el.y) * sy))
            .collect(),
    )
}

fn opposite(anchor: ResizeAnchor) -> ResizeAnchor {
    match anchor {
        ResizeAnchor::Ne => ResizeAnchor::Sw,
        ResizeAnchor::Se => ResizeAnchor::Nw,
        ResizeAnchor::Sw => ResizeAnchor::Ne,
        ResizeAnchor::Nw => ResizeAnchor::Se,
    }
}

/// New geometry for a corner-handle drag; the opposite corner stays put.
fn resize_from_handle(orig: &DesignElement, anchor: ResizeAnchor, start: Point, now: Point, floor: f64) -> PartialElement {
    // Pointer delta in the element's unrotated frame.
    let delta = hit::rotate_about(Point::new(now.x - start.x, now.y - start.y), Point::new(0.0, 0.0), -orig.rotation);
    let width = (if anchor.moves_left() { orig.width - delta.x } else { orig.width + delta.x }).max(floor);
    let height = (if anchor.moves_top() { orig.height - delta.y } else { orig.height + delta.y }).max(floor);

    let fixed = opposite(anchor);
    let fixed_world = hit::corner_position(orig, fixed);
    let half_x = if fixed.moves_left() { -width / 2.0 } else { width / 2.0 };
    let half_y = if fixed.moves_top() { -height / 2.0 } else { height / 2.0 };
    let offset = hit::rotate_about(Point::new(half_x, half_y), Point::new(0.0, 0.0), orig.rotation);
    let x = fixed_world.x - offset.x - width / 2.0;
    let y = fixed_world.y - offset.y - height / 2.0;

    PartialElement {
        x: Some(x),
        y: Some(y),
        width: Some(width),
        height: Some(height),
        path: scale_path(orig, x, y, width, height),
        ..Default::default()
    }
}

/// Fetch the 2D context of a canvas element.
fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: EditorConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    // --- Delegated data inputs ---

    pub fn load_snapshot(&mut self, elements: Vec<DesignElement>) -> Vec<Action> {
        self.core.load_snapshot(elements)
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn commit_text(&mut self, id: &ElementId, text: String) -> Vec<Action> {
        self.core.commit_text(id, text)
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the backing store.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.viewport_width = width_css.max(0.0);
        self.core.viewport_height = height_css.max(0.0);
        self.core.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.canvas.set_width((self.core.viewport_width * self.core.dpr).round() as u32);
        self.canvas.set_height((self.core.viewport_height * self.core.dpr).round() as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_double_click(screen_pt)
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = context_2d(&self.canvas)?;
        render::draw(&ctx, &self.core)
    }

    /// Rasterize the document to a PNG data URL at the fixed export size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no document is available, the off-screen canvas
    /// cannot be created, or encoding fails.
    pub fn export_png(&self) -> Result<String, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)?;
        let (width, height) = raster::export_size(&self.core.config);
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = context_2d(&canvas)?;
        let ops = raster::build(&self.core.doc, &self.core.config);
        raster::paint(&ctx, &ops)?;
        let url = canvas.to_data_url_with_type("image/png")?;
        log::info!("exported {} elements as {width}x{height} png", self.core.doc.len());
        Ok(url)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&DesignElement> {
        self.core.element(id)
    }
}
