//! The editor session: single owner of the working document, its history,
//! selection and gesture state.
//!
//! Every document change goes through [`EditorSession::apply`] or a gesture
//! handler that ends in the same commit path, so one user gesture is always
//! one history entry. Handlers return [`Action`]s for the host to act on.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::camera::{CanvasTransform, Point, Size, Viewport};
use crate::config::EditorConfig;
use crate::doc::{Element, ElementId, ElementKind, TemplateDocument};
use crate::gesture;
use crate::history::History;
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, EditorMode, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::intent::{self, Intent};
use crate::placeholder::{PlaceholderValues, SubstitutionContext};
use crate::properties::{self, Property, PropertyValue};
use crate::render::{self, Scene};
use crate::store::{StoreError, TemplateStore};

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    SelectionChanged(Option<ElementId>),
    /// A history entry was recorded; `index` is the new current position.
    Committed { index: usize, len: usize },
    /// Open the inline text editor seeded with `content`.
    EditTextRequested { id: ElementId, content: String },
    EditTextEnded { id: ElementId },
    SetCursor(String),
}

/// Editing state for one template document.
pub struct EditorSession {
    doc: TemplateDocument,
    history: History,
    pub ui: UiState,
    pub input: InputState,
    viewport: Size,
    pan: Point,
    user_zoom: f64,
    config: EditorConfig,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(TemplateDocument::new(), EditorConfig::default())
    }
}

impl EditorSession {
    #[must_use]
    pub fn new(doc: TemplateDocument, config: EditorConfig) -> Self {
        let viewport = doc.page_size();
        Self {
            history: History::new(doc.clone()),
            doc,
            ui: UiState::default(),
            input: InputState::default(),
            viewport,
            pan: Point::new(0.0, 0.0),
            user_zoom: 1.0,
            config,
        }
    }

    // --- Queries ---

    /// The working document, including any in-progress gesture.
    #[must_use]
    pub fn document(&self) -> &TemplateDocument {
        &self.doc
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection().and_then(|id| self.doc.element(id))
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn user_zoom(&self) -> f64 {
        self.user_zoom
    }

    /// Current screen/canvas mapping for the viewport, page, zoom and pan.
    #[must_use]
    pub fn transform(&self) -> CanvasTransform {
        CanvasTransform::fit(self.viewport, self.doc.page_size(), self.user_zoom, self.pan, &self.config)
    }

    /// Scene description for the current state. Preview mode substitutes
    /// placeholders using `values` and `ctx`.
    #[must_use]
    pub fn scene(&self, values: &PlaceholderValues, ctx: &SubstitutionContext) -> Scene {
        render::scene(&self.doc, &self.ui, &self.transform(), values, ctx)
    }

    // --- Viewport ---

    pub fn set_viewport(&mut self, size: Size) -> Vec<Action> {
        if self.viewport == size {
            return Vec::new();
        }
        self.viewport = size;
        vec![Action::RenderNeeded]
    }

    /// Re-read the container size from the host.
    pub fn sync_viewport(&mut self, viewport: &impl Viewport) -> Vec<Action> {
        self.set_viewport(viewport.container_size())
    }

    /// Drop any user zoom and pan.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.user_zoom = 1.0;
        self.pan = Point::new(0.0, 0.0);
        vec![Action::RenderNeeded]
    }

    // --- Mutation ---

    /// Apply one intent. No-op in preview mode; records exactly one history
    /// entry when the document changed.
    ///
    /// Live state from a gesture or an open inline editor is committed first
    /// as its own entry. The inline editor stays open.
    pub fn apply(&mut self, intent: Intent) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.is_preview() {
            return actions;
        }
        if self.input.is_element_gesture() {
            self.finish_gesture(&mut actions);
        }
        if self.ui.is_editing() {
            self.commit_if_changed(&mut actions);
        }
        let reduced = intent::reduce(&self.doc, &intent, true);
        self.doc = reduced.document;
        self.commit_if_changed(&mut actions);
        match reduced.select {
            Some(id) => self.select_into(Some(id), &mut actions),
            None => self.drop_stale_selection(&mut actions),
        }
        actions
    }

    /// Select an existing element, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<&str>) -> Vec<Action> {
        let mut actions = Vec::new();
        let id = id.filter(|id| self.doc.element(id).is_some()).map(str::to_owned);
        self.select_into(id, &mut actions);
        actions
    }

    /// Write one property of the selected element.
    pub fn set_property(&mut self, property: Property, value: &PropertyValue) -> Vec<Action> {
        let Some(intent) = self.selected_element().and_then(|el| properties::write(el, property, value)) else {
            return Vec::new();
        };
        self.apply(intent)
    }

    pub fn undo(&mut self) -> Vec<Action> {
        if self.ui.is_preview() {
            return Vec::new();
        }
        let Some(doc) = self.history.undo() else {
            return Vec::new();
        };
        self.doc = doc.clone();
        tracing::debug!(index = self.history.index(), "undo");
        self.after_history_jump()
    }

    pub fn redo(&mut self) -> Vec<Action> {
        if self.ui.is_preview() {
            return Vec::new();
        }
        let Some(doc) = self.history.redo() else {
            return Vec::new();
        };
        self.doc = doc.clone();
        tracing::debug!(index = self.history.index(), "redo");
        self.after_history_jump()
    }

    /// Switch between design and read-only preview. Entering preview ends
    /// any inline edit and clears the selection.
    pub fn set_preview(&mut self, preview: bool) -> Vec<Action> {
        let mode = if preview { EditorMode::Preview } else { EditorMode::Design };
        if self.ui.mode == mode {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if preview {
            self.end_edit(&mut actions);
            self.finish_gesture(&mut actions);
            self.select_into(None, &mut actions);
        }
        self.ui.mode = mode;
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Storage ---

    /// Replace the document wholesale and reset history to it.
    pub fn replace_document(&mut self, doc: TemplateDocument) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(id) = self.ui.editing_id.take() {
            actions.push(Action::EditTextEnded { id });
        }
        self.input = InputState::Idle;
        self.select_into(None, &mut actions);
        tracing::debug!(elements = doc.elements.len(), "document replaced");
        self.history.reset(doc.clone());
        self.doc = doc;
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Load `key` from `store`, replacing the document on success.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged; the session keeps its current
    /// document and history.
    pub fn load_from(&mut self, store: &dyn TemplateStore, key: &str) -> Result<Vec<Action>, StoreError> {
        match store.read(key) {
            Ok(doc) => Ok(self.replace_document(doc)),
            Err(err) => {
                tracing::warn!(key, error = %err, "template load failed, keeping current document");
                Err(err)
            }
        }
    }

    /// Save the last committed document under `key`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Any store error other than a missing key on update.
    pub fn save_to(&self, store: &mut dyn TemplateStore, key: &str) -> Result<(), StoreError> {
        let doc = self.history.current();
        match store.update(key, doc) {
            Err(StoreError::NotFound(_)) => store.create(key, doc),
            other => other,
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let preview = self.ui.is_preview();
        if button == Button::Middle || (preview && button == Button::Primary) {
            self.input = InputState::Panning { last_screen: screen_pt };
            actions.push(Action::SetCursor("grabbing".into()));
            return actions;
        }
        if preview || button != Button::Primary {
            return actions;
        }

        self.end_edit(&mut actions);
        let t = self.transform();
        let canvas = t.screen_to_canvas(screen_pt);
        let Some(Hit { element_id, part }) = hit::hit_test(canvas, &self.doc, t.scale, self.selection()) else {
            self.input = InputState::Idle;
            self.select_into(None, &mut actions);
            return actions;
        };

        self.select_into(Some(element_id.clone()), &mut actions);
        let Some(el) = self.doc.element(&element_id) else {
            return actions;
        };
        self.input = match part {
            HitPart::Body => InputState::DraggingElement {
                offset: Point::new(canvas.x - el.position.x, canvas.y - el.position.y),
                id: element_id,
            },
            HitPart::ResizeHandle(corner) => {
                InputState::ResizingElement { id: element_id, corner, start_canvas: canvas, orig: el.position }
            }
            HitPart::RotateHandle => {
                let center = el.position.center();
                InputState::RotatingElement {
                    start_angle_deg: gesture::pointer_angle_deg(center, canvas),
                    orig_rotation: el.style.rotation(),
                    center,
                    id: element_id,
                }
            }
        };
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let t = self.transform();
        let canvas = t.screen_to_canvas(screen_pt);
        let page = self.doc.page_size();

        match self.input.clone() {
            InputState::Idle => {
                actions.push(Action::SetCursor(self.hover_cursor(canvas, t.scale).into()));
            }
            InputState::Panning { last_screen } => {
                self.pan.x += screen_pt.x - last_screen.x;
                self.pan.y += screen_pt.y - last_screen.y;
                self.input = InputState::Panning { last_screen: screen_pt };
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingElement { id, offset } => {
                let Some(el) = self.doc.element(&id) else {
                    return actions;
                };
                let next = gesture::drag_position(canvas, offset, &el.position, page);
                if self.update_live(&id, |el| el.position = next) {
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::ResizingElement { id, corner, start_canvas, orig } => {
                let delta = Point::new(canvas.x - start_canvas.x, canvas.y - start_canvas.y);
                let next = gesture::resize(&orig, corner, delta, page);
                if self.update_live(&id, |el| el.position = next) {
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::RotatingElement { id, center, start_angle_deg, orig_rotation } => {
                let angle = gesture::pointer_angle_deg(center, canvas);
                let snap = modifiers.shift.then_some(self.config.rotation_snap_deg);
                let rotation = gesture::rotation(orig_rotation, start_angle_deg, angle, snap);
                if self.update_live(&id, |el| el.style.rotation = Some(rotation)) {
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        actions
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if matches!(self.input, InputState::Panning { .. }) {
            let cursor = if self.ui.is_preview() { "grab" } else { "default" };
            actions.push(Action::SetCursor(cursor.into()));
        }
        self.finish_gesture(&mut actions);
        actions
    }

    /// Open the inline editor on a text element.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.is_preview() {
            return actions;
        }
        self.finish_gesture(&mut actions);
        let t = self.transform();
        let canvas = t.screen_to_canvas(screen_pt);
        let Some(hit) = hit::hit_test(canvas, &self.doc, t.scale, self.selection()) else {
            return actions;
        };
        let Some(el) = self.doc.element(&hit.element_id).filter(|el| el.kind == ElementKind::Text) else {
            return actions;
        };
        let content = el.content.clone();
        self.end_edit(&mut actions);
        self.select_into(Some(hit.element_id.clone()), &mut actions);
        self.ui.editing_id = Some(hit.element_id.clone());
        actions.push(Action::EditTextRequested { id: hit.element_id, content });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Live content update from the inline editor. Not committed until blur.
    pub fn on_text_input(&mut self, content: &str) -> Vec<Action> {
        let Some(id) = self.ui.editing_id.clone() else {
            return Vec::new();
        };
        if self.update_live(&id, |el| el.content = content.to_owned()) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// The inline editor lost focus: commit and leave edit mode.
    pub fn on_edit_blur(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.end_edit(&mut actions);
        actions
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.ui.is_preview() || self.ui.is_editing() {
            return Vec::new();
        }
        if modifiers.command() {
            if key.is_letter('z') {
                return if modifiers.shift { self.redo() } else { self.undo() };
            }
            if key.is_letter('y') {
                return self.redo();
            }
            if key.is_letter('d') {
                return match self.ui.selected_id.clone() {
                    Some(id) => self.apply(Intent::DuplicateElement { id }),
                    None => Vec::new(),
                };
            }
            return Vec::new();
        }

        match key.0.as_str() {
            "Delete" | "Backspace" => match self.ui.selected_id.clone() {
                Some(id) => self.apply(Intent::DeleteElement { id }),
                None => Vec::new(),
            },
            "Escape" => self.select(None),
            _ => key.arrow_direction().map_or_else(Vec::new, |(dx, dy)| self.nudge(dx, dy, modifiers.shift)),
        }
    }

    /// Ctrl/Meta+wheel zooms about the pointer; a plain wheel pans.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.command() {
            if delta.dx.abs() < f64::EPSILON && delta.dy.abs() < f64::EPSILON {
                return Vec::new();
            }
            self.pan.x -= delta.dx;
            self.pan.y -= delta.dy;
            return vec![Action::RenderNeeded];
        }
        if delta.dy.abs() < f64::EPSILON {
            return Vec::new();
        }

        let anchor = self.transform().screen_to_canvas(screen_pt);
        let step = self.config.wheel_zoom_step;
        let factor = if delta.dy < 0.0 { step } else { 1.0 / step };
        let zoom = (self.user_zoom * factor).max(self.config.min_user_zoom).min(self.config.max_user_zoom);
        if (zoom - self.user_zoom).abs() < f64::EPSILON {
            return Vec::new();
        }
        self.user_zoom = zoom;

        let centred =
            CanvasTransform::fit(self.viewport, self.doc.page_size(), zoom, Point::new(0.0, 0.0), &self.config);
        let landed = centred.canvas_to_screen(anchor);
        self.pan = Point::new(screen_pt.x - landed.x, screen_pt.y - landed.y);
        vec![Action::RenderNeeded]
    }

    // --- Internals ---

    fn nudge(&mut self, dx: f64, dy: f64, large: bool) -> Vec<Action> {
        let Some(el) = self.selected_element() else {
            return Vec::new();
        };
        let step = if large { self.config.nudge_step_large } else { self.config.nudge_step };
        let next = gesture::nudge(&el.position, dx * step, dy * step, self.doc.page_size());
        let intent = Intent::Move { id: el.id.clone(), x: next.x, y: next.y };
        self.apply(intent)
    }

    /// Mutate an element in the working document without committing.
    fn update_live(&mut self, id: &str, f: impl FnOnce(&mut Element)) -> bool {
        let Some(slot) = self.doc.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        let before = slot.clone();
        f(slot);
        *slot != before
    }

    fn commit_if_changed(&mut self, actions: &mut Vec<Action>) {
        if self.doc == *self.history.current() {
            return;
        }
        self.history.commit(self.doc.clone());
        let (index, len) = (self.history.index(), self.history.len());
        tracing::debug!(index, len, "committed");
        actions.push(Action::Committed { index, len });
        actions.push(Action::RenderNeeded);
    }

    fn finish_gesture(&mut self, actions: &mut Vec<Action>) {
        if self.input.is_element_gesture() {
            self.commit_if_changed(actions);
        }
        self.input = InputState::Idle;
    }

    fn end_edit(&mut self, actions: &mut Vec<Action>) {
        let Some(id) = self.ui.editing_id.take() else {
            return;
        };
        self.commit_if_changed(actions);
        actions.push(Action::EditTextEnded { id });
        actions.push(Action::RenderNeeded);
    }

    fn select_into(&mut self, id: Option<ElementId>, actions: &mut Vec<Action>) {
        if self.ui.selected_id == id {
            return;
        }
        self.ui.selected_id = id.clone();
        actions.push(Action::SelectionChanged(id));
        actions.push(Action::RenderNeeded);
    }

    fn drop_stale_selection(&mut self, actions: &mut Vec<Action>) {
        let stale = self.selection().is_some_and(|id| self.doc.element(id).is_none());
        if stale {
            self.select_into(None, actions);
        }
        if self.ui.editing_id.as_deref().is_some_and(|id| self.doc.element(id).is_none()) {
            if let Some(id) = self.ui.editing_id.take() {
                actions.push(Action::EditTextEnded { id });
            }
        }
    }

    fn after_history_jump(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(id) = self.ui.editing_id.take() {
            actions.push(Action::EditTextEnded { id });
        }
        self.input = InputState::Idle;
        self.select_into(None, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn hover_cursor(&self, canvas: Point, scale: f64) -> &'static str {
        if self.ui.is_preview() {
            return "grab";
        }
        match hit::hit_test(canvas, &self.doc, scale, self.selection()) {
            Some(Hit { part: HitPart::ResizeHandle(corner), .. }) => corner.cursor(),
            Some(Hit { part: HitPart::RotateHandle, .. }) => "grab",
            Some(Hit { part: HitPart::Body, .. }) => "move",
            None => "default",
        }
    }
}
