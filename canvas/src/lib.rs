//! Canvas interaction engine for the packaging-design editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! design page: translating raw DOM input events into element mutations,
//! tracking selection and in-progress gestures, hit-testing elements, drawing
//! the page, and flattening it into the still image that the 3D preview uses
//! as a surface texture. The host JavaScript layer only wires DOM events to
//! the engine and reacts to the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Design elements and the in-memory element store |
//! | [`camera`] | Page origin, zoom, and coordinate conversions |
//! | [`input`] | Tools, input event types, and the gesture state machine |
//! | [`hit`] | Hit-testing against elements and their handles |
//! | [`render`] | On-screen page rendering |
//! | [`raster`] | Fixed-size raster export |
//! | [`config`] | Tunable editor parameters |
//! | [`consts`] | Shared constants (handle sizes, labels, palette) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod raster;
pub mod render;
