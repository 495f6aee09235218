//! Errors surfaced by the canvas engine.

use flowchart::{DiagramError, ErrorCode};
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error(transparent)]
    Diagram(#[from] DiagramError),
    /// The 2D context could not be acquired for this render attempt.
    #[error("render surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error("export failed: {0}")]
    Export(String),
}

impl ErrorCode for CanvasError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Diagram(e) => e.error_code(),
            Self::RenderSurfaceUnavailable(_) => "E_RENDER_SURFACE_UNAVAILABLE",
            Self::Render(_) => "E_RENDER_FAILED",
            Self::Export(_) => "E_EXPORT_FAILED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::RenderSurfaceUnavailable(_))
    }
}

/// Best-effort text for a JavaScript exception value.
#[must_use]
pub fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
