//! Interactive canvas for flowchart diagrams.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It turns a
//! compiled [`flowchart::Diagram`] into positioned shapes, resolves connector
//! geometry on every frame, translates raw DOM input into drag, pan and zoom
//! gestures, and renders to a 2D canvas or a standalone SVG document. The host
//! JavaScript layer wires DOM events to the engine and reacts to the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shape/connection arena and snapshot types |
//! | [`scene`] | Diagram-to-arena conversion and palette restyling |
//! | [`camera`] | Points, bounds, and the pan/zoom viewport |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Topmost-shape hit testing |
//! | [`shape`] | Geometric outline per shape kind |
//! | [`anchor`] | Connector endpoint selection |
//! | [`route`] | Connector paths and arrowheads |
//! | [`render`] | Canvas2D drawing |
//! | [`svg`] | SVG export |
//! | [`theme`] | Named color palettes |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (zoom limits, arrow size, etc.) |

pub mod anchor;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod render;
pub mod route;
pub mod scene;
pub mod shape;
pub mod svg;
pub mod theme;

pub use error::CanvasError;
