//! Raster export: flattens the document into a fixed-size bitmap.
//!
//! Export is split in two. [`build`] turns the store into a display list of
//! [`RasterOp`]s using nothing but element geometry, so it is independent of
//! the on-screen zoom and testable off the browser. [`paint`] replays that
//! list onto a `CanvasRenderingContext2d`.
//!
//! The export is a simplified proxy of the on-screen look: every shape is a
//! filled rectangle in the accent colour regardless of its sub-kind, and
//! images are skipped since their references are not loaded here.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Point;
use crate::config::EditorConfig;
use crate::consts::{EXPORT_ACCENT, EXPORT_BACKGROUND, EXPORT_PATH_WIDTH, EXPORT_TEXT_COLOR, EXPORT_TEXT_FONT};
use crate::doc::{DesignElement, DocStore, ElementKind};

/// One drawing command in an export display list.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterOp {
    /// Fill the whole bitmap.
    Background { color: &'static str, width: f64, height: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    /// Clockwise rotation in radians.
    Rotate { radians: f64 },
    /// Centered label with its baseline at `(x, y)`.
    FillText { text: String, x: f64, y: f64, color: &'static str, font: &'static str },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: &'static str },
    /// Open polyline through `points`.
    StrokePolyline { points: Vec<Point>, color: &'static str, width: f64 },
}

/// Bitmap dimensions in pixels for the configured page size.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn export_size(config: &EditorConfig) -> (u32, u32) {
    (config.canvas_width.round().max(1.0) as u32, config.canvas_height.round().max(1.0) as u32)
}

/// Build the export display list for every element, in draw order.
#[must_use]
pub fn build(doc: &DocStore, config: &EditorConfig) -> Vec<RasterOp> {
    let mut ops = vec![RasterOp::Background {
        color: EXPORT_BACKGROUND,
        width: config.canvas_width,
        height: config.canvas_height,
    }];
    for el in doc.ordered() {
        push_element(&mut ops, el);
    }
    ops
}

fn push_element(ops: &mut Vec<RasterOp>, el: &DesignElement) {
    let half_w = el.width / 2.0;
    let half_h = el.height / 2.0;
    ops.push(RasterOp::Save);
    ops.push(RasterOp::Translate { x: el.x + half_w, y: el.y + half_h });
    ops.push(RasterOp::Rotate { radians: el.rotation.to_radians() });
    ops.push(RasterOp::Translate { x: -half_w, y: -half_h });

    match el.kind {
        ElementKind::Text => ops.push(RasterOp::FillText {
            text: el.content.clone(),
            x: half_w,
            y: half_h,
            color: EXPORT_TEXT_COLOR,
            font: EXPORT_TEXT_FONT,
        }),
        ElementKind::Shape => ops.push(RasterOp::FillRect {
            x: 0.0,
            y: 0.0,
            width: el.width,
            height: el.height,
            color: EXPORT_ACCENT,
        }),
        ElementKind::Path => {
            // Anchors are page coordinates; the context origin is now the box corner.
            if let Some(points) = el.path.as_ref().filter(|p| p.len() > 1) {
                let local = points.iter().map(|p| Point::new(p.x - el.x, p.y - el.y)).collect();
                ops.push(RasterOp::StrokePolyline { points: local, color: EXPORT_ACCENT, width: EXPORT_PATH_WIDTH });
            }
        }
        ElementKind::Image => {}
    }

    ops.push(RasterOp::Restore);
}

/// Replay a display list onto a 2D context.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn paint(ctx: &CanvasRenderingContext2d, ops: &[RasterOp]) -> Result<(), JsValue> {
    for op in ops {
        match op {
            RasterOp::Background { color, width, height } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(0.0, 0.0, *width, *height);
            }
            RasterOp::Save => ctx.save(),
            RasterOp::Restore => ctx.restore(),
            RasterOp::Translate { x, y } => ctx.translate(*x, *y)?,
            RasterOp::Rotate { radians } => ctx.rotate(*radians)?,
            RasterOp::FillText { text, x, y, color, font } => {
                ctx.set_fill_style_str(color);
                ctx.set_font(font);
                ctx.set_text_align("center");
                ctx.fill_text(text, *x, *y)?;
            }
            RasterOp::FillRect { x, y, width, height, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(*x, *y, *width, *height);
            }
            RasterOp::StrokePolyline { points, color, width } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width);
                ctx.set_line_cap("round");
                ctx.set_line_join("round");
                ctx.stroke();
            }
        }
    }
    Ok(())
}
