//! Rendering: draws the design page and editing overlays to a 2D context.
//!
//! This module, together with [`crate::raster::paint`], is the only place that
//! touches [`web_sys::CanvasRenderingContext2d`]. It receives a read-only view
//! of the engine and produces pixels; it never mutates application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Point;
use crate::consts::{
    ANCHOR_FILL, CIRCLE_FILL, CIRCLE_STROKE, GRID_STROKE, GUIDE_STROKE, HANDLE_RADIUS_PX, IMAGE_FILL, IMAGE_LABEL,
    IMAGE_PLACEHOLDER, LOCKED_ALPHA, OUTLINE_STROKE, PATH_STROKE, RECT_FILL, RECT_STROKE, ROTATE_HANDLE_FILL,
    SELECTION_STROKE, TEMPLATE_OUTLINE_INSET, TRIANGLE_FILL,
};
use crate::doc::{DesignElement, ElementKind, ShapeKind};
use crate::engine::EngineCore;
use crate::hit::{self, ResizeAnchor};

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Pen anchor marker radius in screen pixels.
const ANCHOR_RADIUS_PX: f64 = 4.0;

/// Draw the full scene: page, elements, and editing overlays.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let camera = &core.camera;
    let zoom = camera.zoom();
    let page_w = core.config.canvas_width;
    let page_h = core.config.canvas_height;

    // Layer 1: clear and set up transforms.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(zoom, zoom)?;

    // Layer 2: page furniture.
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, page_w, page_h);
    if core.ui.show_grid {
        draw_grid(ctx, page_w, page_h, core.config.grid_spacing, zoom);
    }
    draw_template_outline(ctx, page_w, page_h, zoom)?;
    if core.ui.show_guides {
        draw_guides(ctx, page_w, page_h, zoom);
    }

    // Layer 3: elements in insertion order, the selection last so it sits on top.
    let selected = core.ui.selected_id;
    for el in core.doc.ordered() {
        if Some(el.id) != selected {
            draw_element(ctx, el)?;
        }
    }
    if let Some(el) = selected.and_then(|id| core.doc.get(&id)) {
        draw_element(ctx, el)?;
        draw_selection(ctx, el, core, zoom)?;
    }

    // Layer 4: gestures in progress.
    if let Some(provisional) = core.provisional() {
        draw_provisional(ctx, provisional, zoom)?;
    }
    if !core.pen_path().is_empty() {
        draw_pen_path(ctx, core.pen_path(), zoom)?;
    }

    Ok(())
}

// =============================================================
// Page furniture
// =============================================================

fn draw_grid(ctx: &CanvasRenderingContext2d, page_w: f64, page_h: f64, spacing: f64, zoom: f64) {
    if spacing.is_nan() || spacing <= 0.0 {
        return;
    }
    ctx.save();
    ctx.set_stroke_style_str(GRID_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.begin_path();
    let mut x = spacing;
    while x < page_w {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, page_h);
        x += spacing;
    }
    let mut y = spacing;
    while y < page_h {
        ctx.move_to(0.0, y);
        ctx.line_to(page_w, y);
        y += spacing;
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_template_outline(ctx: &CanvasRenderingContext2d, page_w: f64, page_h: f64, zoom: f64) -> Result<(), JsValue> {
    let inset = TEMPLATE_OUTLINE_INSET;
    ctx.save();
    set_dash(ctx, 6.0 / zoom)?;
    ctx.set_stroke_style_str(OUTLINE_STROKE);
    ctx.set_line_width(2.0 / zoom);
    ctx.stroke_rect(inset, inset, (page_w - inset * 2.0).max(0.0), (page_h - inset * 2.0).max(0.0));
    ctx.restore();
    Ok(())
}

fn draw_guides(ctx: &CanvasRenderingContext2d, page_w: f64, page_h: f64, zoom: f64) {
    ctx.save();
    ctx.set_stroke_style_str(GUIDE_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.begin_path();
    ctx.move_to(page_w / 2.0, 0.0);
    ctx.line_to(page_w / 2.0, page_h);
    ctx.move_to(0.0, page_h / 2.0);
    ctx.line_to(page_w, page_h / 2.0);
    ctx.stroke();
    ctx.restore();
}

// =============================================================
// Element dispatch
// =============================================================

fn draw_element(ctx: &CanvasRenderingContext2d, el: &DesignElement) -> Result<(), JsValue> {
    if el.width <= 0.0 || el.height <= 0.0 {
        return Ok(());
    }
    ctx.save();
    if el.locked {
        ctx.set_global_alpha(LOCKED_ALPHA);
    }
    translate_and_rotate(ctx, el)?;

    match el.kind {
        ElementKind::Shape => draw_shape(ctx, el)?,
        ElementKind::Text => draw_label(ctx, el, &el.content, "#111827", "500 14px sans-serif")?,
        ElementKind::Image => {
            ctx.set_fill_style_str(IMAGE_FILL);
            ctx.fill_rect(-el.width / 2.0, -el.height / 2.0, el.width, el.height);
            draw_label(ctx, el, IMAGE_PLACEHOLDER, IMAGE_LABEL, "14px sans-serif")?;
        }
        ElementKind::Path => draw_path(ctx, el),
    }

    ctx.restore();
    Ok(())
}

// =============================================================
// Kind renderers
// =============================================================

fn draw_shape(ctx: &CanvasRenderingContext2d, el: &DesignElement) -> Result<(), JsValue> {
    let hw = el.width / 2.0;
    let hh = el.height / 2.0;
    match el.shape_kind() {
        Some(ShapeKind::Circle) => {
            ctx.begin_path();
            ctx.ellipse(0.0, 0.0, hw, hh, 0.0, 0.0, 2.0 * PI)?;
            ctx.set_fill_style_str(CIRCLE_FILL);
            ctx.fill();
            ctx.set_stroke_style_str(CIRCLE_STROKE);
            ctx.set_line_width(2.0);
            ctx.stroke();
        }
        Some(ShapeKind::Triangle) => {
            ctx.begin_path();
            ctx.move_to(0.0, -hh); // apex
            ctx.line_to(hw, hh);
            ctx.line_to(-hw, hh);
            ctx.close_path();
            ctx.set_fill_style_str(TRIANGLE_FILL);
            ctx.fill();
        }
        Some(ShapeKind::Rectangle) | None => {
            ctx.set_fill_style_str(RECT_FILL);
            ctx.fill_rect(-hw, -hh, el.width, el.height);
            ctx.set_stroke_style_str(RECT_STROKE);
            ctx.set_line_width(2.0);
            ctx.stroke_rect(-hw, -hh, el.width, el.height);
        }
    }
    Ok(())
}

fn draw_label(ctx: &CanvasRenderingContext2d, el: &DesignElement, text: &str, color: &str, font: &str) -> Result<(), JsValue> {
    if text.is_empty() {
        return Ok(());
    }
    ctx.set_fill_style_str(color);
    ctx.set_font(font);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text_with_max_width(text, 0.0, 0.0, (el.width - 8.0).max(1.0))?;
    Ok(())
}

fn draw_path(ctx: &CanvasRenderingContext2d, el: &DesignElement) {
    let Some(points) = el.path.as_deref() else {
        return;
    };
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    // Anchors are page coordinates; undo the center translation.
    let c = el.center();
    ctx.begin_path();
    ctx.move_to(first.x - c.x, first.y - c.y);
    for p in rest {
        ctx.line_to(p.x - c.x, p.y - c.y);
    }
    ctx.set_stroke_style_str(PATH_STROKE);
    ctx.set_line_width(2.0);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.stroke();
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, el: &DesignElement, core: &EngineCore, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    translate_and_rotate(ctx, el)?;
    let hw = el.width / 2.0;
    let hh = el.height / 2.0;
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(2.0 / zoom);
    if el.locked {
        set_dash(ctx, SELECTION_DASH_PX / zoom)?;
    }
    ctx.stroke_rect(-hw, -hh, el.width, el.height);
    ctx.restore();

    if let Some(points) = el.path.as_deref() {
        for p in points {
            draw_anchor(ctx, *p, 3.0 / zoom)?;
        }
    }

    if el.locked {
        return Ok(());
    }

    let handle = HANDLE_RADIUS_PX / zoom / 2.0;
    ctx.save();
    ctx.set_fill_style_str(SELECTION_STROKE);
    for anchor in ResizeAnchor::ALL {
        let pos = hit::corner_position(el, anchor);
        ctx.begin_path();
        ctx.arc(pos.x, pos.y, handle, 0.0, 2.0 * PI)?;
        ctx.fill();
    }

    let rh = hit::rotate_handle_position(el, &core.camera);
    ctx.begin_path();
    ctx.arc(rh.x, rh.y, handle, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(ROTATE_HANDLE_FILL);
    ctx.fill();
    ctx.restore();
    Ok(())
}

// =============================================================
// Gesture overlays
// =============================================================

fn draw_provisional(ctx: &CanvasRenderingContext2d, el: &DesignElement, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(0.5);
    ctx.set_fill_style_str("#dbeafe");
    ctx.fill_rect(el.x, el.y, el.width, el.height);
    set_dash(ctx, SELECTION_DASH_PX / zoom)?;
    ctx.set_stroke_style_str(RECT_FILL);
    ctx.set_line_width(2.0 / zoom);
    ctx.stroke_rect(el.x, el.y, el.width, el.height);
    ctx.restore();
    Ok(())
}

fn draw_pen_path(ctx: &CanvasRenderingContext2d, points: &[Point], zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    if let Some((first, rest)) = points.split_first() {
        if !rest.is_empty() {
            set_dash(ctx, 5.0 / zoom)?;
            ctx.begin_path();
            ctx.move_to(first.x, first.y);
            for p in rest {
                ctx.line_to(p.x, p.y);
            }
            ctx.set_stroke_style_str(PATH_STROKE);
            ctx.set_line_width(2.0 / zoom);
            ctx.stroke();
            ctx.set_line_dash(&js_sys::Array::new())?;
        }
    }
    for p in points {
        draw_anchor(ctx, *p, ANCHOR_RADIUS_PX / zoom)?;
    }
    ctx.restore();
    Ok(())
}

fn draw_anchor(ctx: &CanvasRenderingContext2d, p: Point, radius: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(ANCHOR_FILL);
    ctx.fill();
    ctx.set_stroke_style_str("#ffffff");
    ctx.set_line_width(radius / 2.0);
    ctx.stroke();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the element's center and rotate by its rotation angle.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, el: &DesignElement) -> Result<(), JsValue> {
    let c = el.center();
    ctx.translate(c.x, c.y)?;
    ctx.rotate(el.rotation.to_radians())?;
    Ok(())
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: f64) -> Result<(), JsValue> {
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash.into());
    dash_array.push(&dash.into());
    ctx.set_line_dash(&dash_array)
}
