use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::anchor::AnchorMode;
use crate::camera::{Point, Viewport, is_valid_extent};
use crate::consts::{
    BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, FIT_PADDING_PX, WHEEL_ZOOM_IN,
    WHEEL_ZOOM_OUT,
};
use crate::doc::{ConnectionInstance, ShapeId, ShapeInstance, ShapeStore, Snapshot};
use crate::error::{CanvasError, js_message};
use crate::hit::hit_test;
use crate::input::{Button, InputState, Modifiers, UiState, WheelDelta};
use crate::render;
use crate::route::{ConnectionStyle, Route, route};
use crate::scene::{apply_theme, build_scene};
use crate::svg::to_svg;
use crate::theme::Theme;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    SetCursor(String),
    SelectionChanged(Option<ShapeId>),
    /// A drag finished; hosts that persist layouts can record the new origin.
    ShapeMoved { id: ShapeId, x: f64, y: f64 },
}

/// Controller state and logic that never touches the canvas element.
///
/// Every handler returns the [`Action`]s the host should perform.
pub struct EngineCore {
    pub store: ShapeStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    /// Canvas size in CSS pixels.
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Message shown in place of the diagram after a failed load.
    pub error: Option<String>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            store: ShapeStore::new(),
            viewport: Viewport::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: DEFAULT_CANVAS_WIDTH,
            viewport_height: DEFAULT_CANVAS_HEIGHT,
            dpr: 1.0,
            error: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Compile `text` and replace the arena with the result.
    ///
    /// Any gesture in progress is abandoned first. On failure the arena is
    /// emptied and the error message is kept for the inline error display.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Diagram`] for an unsupported engine or a source
    /// with no nodes.
    pub fn load_source(&mut self, text: &str, engine: &str) -> Result<Vec<Action>, CanvasError> {
        self.input = InputState::Idle;
        self.ui.selected_id = None;

        match flowchart::compile(text, engine) {
            Ok(diagram) => {
                self.store.load_snapshot(build_scene(&diagram, self.ui.theme));
                self.error = None;
                self.reset_view();
                log::info!("loaded diagram: {} shapes, {} connections", self.store.len(), self.store.connections().len());
                Ok(vec![Action::SelectionChanged(None), Action::RenderNeeded])
            }
            Err(err) => {
                log::warn!("diagram load failed: {err}");
                self.store.clear();
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Replace the arena with host-provided shapes, e.g. a saved layout.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Vec<Action> {
        self.input = InputState::Idle;
        self.ui.selected_id = None;
        self.store.load_snapshot(snapshot);
        self.error = None;
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    // --- View options ---

    /// Switch palettes; shape geometry is untouched.
    pub fn set_theme(&mut self, theme: Theme) -> Vec<Action> {
        self.ui.theme = theme;
        apply_theme(&mut self.store, theme);
        vec![Action::RenderNeeded]
    }

    pub fn set_connection_style(&mut self, style: ConnectionStyle) -> Vec<Action> {
        self.ui.connection_style = style;
        vec![Action::RenderNeeded]
    }

    pub fn set_anchor_mode(&mut self, mode: AnchorMode) -> Vec<Action> {
        self.ui.anchor_mode = mode;
        vec![Action::RenderNeeded]
    }

    /// Update canvas dimensions (CSS pixels) and device pixel ratio.
    ///
    /// A non-positive or non-finite size keeps the previous one; such a
    /// ratio falls back to 1.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        if is_valid_extent(width_css) && is_valid_extent(height_css) {
            self.viewport_width = width_css;
            self.viewport_height = height_css;
        } else {
            log::debug!("ignoring invalid canvas size {width_css}x{height_css}");
        }
        self.dpr = if is_valid_extent(dpr) { dpr } else { 1.0 };
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button == Button::Secondary {
            return Vec::new();
        }
        let mut actions = Vec::new();

        if !modifiers.forces_pan() && button == Button::Primary {
            let world = self.viewport.screen_to_world(screen_pt);
            if let Some(shape) = hit_test(&self.store, world).and_then(|id| self.store.get(&id)) {
                let id = shape.id.clone();
                let grab_offset = Point::new(world.x - shape.x, world.y - shape.y);
                self.select(Some(id.clone()), &mut actions);
                self.input = InputState::DraggingNode { id, grab_offset };
                actions.push(Action::SetCursor(self.input.cursor().to_owned()));
                actions.push(Action::RenderNeeded);
                return actions;
            }
            self.select(None, &mut actions);
        }

        self.input = InputState::Panning {
            origin: Point::new(screen_pt.x - self.viewport.x, screen_pt.y - self.viewport.y),
        };
        actions.push(Action::SetCursor(self.input.cursor().to_owned()));
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &self.input {
            InputState::Idle => Vec::new(),
            InputState::DraggingNode { id, grab_offset } => {
                let world = self.viewport.screen_to_world(screen_pt);
                if self.store.move_to(id, world.x - grab_offset.x, world.y - grab_offset.y) {
                    vec![Action::RenderNeeded]
                } else {
                    log::debug!("dragged shape {id} no longer exists");
                    self.input = InputState::Idle;
                    vec![Action::SetCursor(self.input.cursor().to_owned())]
                }
            }
            InputState::Panning { origin } => {
                self.viewport.x = screen_pt.x - origin.x;
                self.viewport.y = screen_pt.y - origin.y;
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.end_gesture()
    }

    /// Pointer left the canvas: treated like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// Zoom one notch around the cursor.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        let factor = if delta.dy > 0.0 {
            WHEEL_ZOOM_OUT
        } else if delta.dy < 0.0 {
            WHEEL_ZOOM_IN
        } else {
            return Vec::new();
        };
        self.viewport.zoom_at(screen_pt, factor);
        vec![Action::RenderNeeded]
    }

    // --- Toolbar ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_centered(BUTTON_ZOOM_IN)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_centered(BUTTON_ZOOM_OUT)
    }

    /// Fit every shape on screen (never magnifying), or return to the
    /// identity view when the diagram is empty.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.viewport =
            Viewport::fit(self.store.bounds(), self.viewport_width, self.viewport_height, FIT_PADDING_PX);
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn shape(&self, id: &str) -> Option<&ShapeInstance> {
        self.store.get(id)
    }

    /// Current geometry of every connection, in list order.
    #[must_use]
    pub fn routes(&self) -> Vec<(&ConnectionInstance, Route)> {
        self.store
            .connections()
            .iter()
            .filter_map(|conn| {
                let (from, to) = self.store.endpoints(conn)?;
                let r = route(&from.bounds(), &to.bounds(), self.ui.anchor_mode, self.ui.connection_style, conn.arrowed);
                Some((conn, r))
            })
            .collect()
    }

    /// The diagram as a standalone SVG document.
    #[must_use]
    pub fn svg(&self) -> String {
        to_svg(&self.store, &self.ui)
    }

    // --- Internals ---

    fn select(&mut self, id: Option<ShapeId>, actions: &mut Vec<Action>) {
        if self.ui.selected_id != id {
            self.ui.selected_id.clone_from(&id);
            actions.push(Action::SelectionChanged(id));
            actions.push(Action::RenderNeeded);
        }
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        let previous = std::mem::take(&mut self.input);
        let mut actions = Vec::new();
        match previous {
            InputState::Idle => return actions,
            InputState::DraggingNode { id, .. } => {
                if let Some(shape) = self.store.get(&id) {
                    actions.push(Action::ShapeMoved { x: shape.x, y: shape.y, id });
                }
            }
            InputState::Panning { .. } => {}
        }
        actions.push(Action::SetCursor(self.input.cursor().to_owned()));
        actions
    }

    fn zoom_centered(&mut self, factor: f64) -> Vec<Action> {
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        self.viewport.zoom_at(center, factor);
        vec![Action::RenderNeeded]
    }
}

/// `EngineCore` bound to a browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    /// # Errors
    ///
    /// See [`EngineCore::load_source`].
    pub fn load_source(&mut self, text: &str, engine: &str) -> Result<Vec<Action>, CanvasError> {
        self.core.load_source(text, engine)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Vec<Action> {
        self.core.set_theme(theme)
    }

    pub fn set_connection_style(&mut self, style: ConnectionStyle) -> Vec<Action> {
        self.core.set_connection_style(style)
    }

    pub fn set_anchor_mode(&mut self, mode: AnchorMode) -> Vec<Action> {
        self.core.set_anchor_mode(mode)
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the backing store to match.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (w, h) = (
            (width_css * self.core.dpr).round().max(0.0) as u32,
            (height_css * self.core.dpr).round().max(0.0) as u32,
        );
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.core.reset_view()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// [`CanvasError::RenderSurfaceUnavailable`] when no 2D context can be
    /// obtained (the next call tries again), [`CanvasError::Render`] when a
    /// drawing call fails.
    pub fn render(&self) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        render::draw(&ctx, &self.core).map_err(|e| CanvasError::Render(js_message(&e)))
    }

    fn context(&self) -> Result<CanvasRenderingContext2d, CanvasError> {
        let unavailable = |msg: String| {
            log::error!("2d context unavailable: {msg}");
            CanvasError::RenderSurfaceUnavailable(msg)
        };
        self.canvas
            .get_context("2d")
            .map_err(|e| unavailable(js_message(&e)))?
            .ok_or_else(|| unavailable("canvas has no 2d context".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| unavailable("unexpected context type".to_owned()))
    }

    // --- Export ---

    /// PNG data URL of the current canvas pixels.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Export`] if the browser refuses (e.g. a tainted canvas).
    pub fn to_png(&self) -> Result<String, CanvasError> {
        self.canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| CanvasError::Export(js_message(&e)))
    }

    /// Ask the browser for a PNG blob; `callback` receives it asynchronously.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Export`] if the request is rejected.
    pub fn to_blob(&self, callback: &js_sys::Function) -> Result<(), CanvasError> {
        self.canvas.to_blob(callback).map_err(|e| CanvasError::Export(js_message(&e)))
    }

    #[must_use]
    pub fn svg(&self) -> String {
        self.core.svg()
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.core.selection()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }

    #[must_use]
    pub fn shape(&self, id: &str) -> Option<&ShapeInstance> {
        self.core.shape(id)
    }
}
