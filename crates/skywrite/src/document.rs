//! Drawing document
//!
//! [`DrawingDocument`] is the per-frame entry point. It owns both hands'
//! drawing sources, the history, the scene nodes and the current brush, and
//! routes input and UI commands between them.

use std::time::Instant;

use tracing::{debug, info};

use skywrite_config::DrawingConfig;

use crate::canvas::{BoxCanvas, CanvasBounds};
use crate::commands::DrawingCommand;
use crate::history::{History, HistoryEntry};
use crate::scene::{NodeId, SceneNodes};
use crate::source::{DrawingSource, FinishedStroke};
use crate::style::BrushSettings;
use crate::types::{Chirality, InputData, InteractionMode};

/// All strokes and imported content of one drawing session
pub struct DrawingDocument {
    config: DrawingConfig,
    canvas: Box<dyn CanvasBounds>,
    left: DrawingSource,
    right: DrawingSource,
    history: History,
    scene: SceneNodes,
    brush: BrushSettings,
    mode: InteractionMode,
    paused: bool,
    started: Instant,
}

impl Default for DrawingDocument {
    fn default() -> Self {
        Self::new(DrawingConfig::default())
    }
}

impl DrawingDocument {
    /// Create a document bounded by the configured box canvas
    pub fn new(config: DrawingConfig) -> Self {
        let canvas = BoxCanvas::from(&config.canvas);
        Self::with_canvas(config, canvas)
    }

    /// Create a document with custom canvas bounds
    pub fn with_canvas(config: DrawingConfig, canvas: impl CanvasBounds + 'static) -> Self {
        Self {
            left: DrawingSource::new(Chirality::Left, config.clone()),
            right: DrawingSource::new(Chirality::Right, config.clone()),
            history: History::new(),
            scene: SceneNodes::new(),
            brush: BrushSettings::default(),
            mode: InteractionMode::default(),
            paused: false,
            started: Instant::now(),
            canvas: Box::new(canvas),
            config,
        }
    }

    /// Per-frame input for one hand, timestamped with the wall clock
    pub fn receive(&mut self, input: Option<InputData>, chirality: Chirality) -> Option<NodeId> {
        let time = self.started.elapsed().as_secs_f32();
        self.receive_at(input, chirality, time)
    }

    /// Per-frame input for one hand at `time` seconds since the document
    /// started. Returns the node of a stroke finished by this frame.
    pub fn receive_at(
        &mut self,
        input: Option<InputData>,
        chirality: Chirality,
        time: f32,
    ) -> Option<NodeId> {
        let input = input
            .filter(|_| !self.paused && self.mode == InteractionMode::Drawing)
            .filter(|input| self.canvas.contains(input.brush_tip()));

        let source = match chirality {
            Chirality::Left => &mut self.left,
            Chirality::Right => &mut self.right,
        };
        let finished = source.receive(input, time, &self.brush, &mut self.scene)?;
        self.record_stroke(finished);
        Some(finished.node)
    }

    fn record_stroke(&mut self, stroke: FinishedStroke) {
        self.history.record(
            HistoryEntry::Stroke {
                node: stroke.node,
                chirality: stroke.chirality,
            },
            &mut self.scene,
        );
    }

    /// Finish both hands' open strokes and record them
    fn finish_open_strokes(&mut self) {
        let finished = [
            self.left.force_finish(&mut self.scene),
            self.right.force_finish(&mut self.scene),
        ];
        for stroke in finished.into_iter().flatten() {
            self.record_stroke(stroke);
        }
    }

    pub fn undo(&mut self) -> Option<HistoryEntry> {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> Option<HistoryEntry> {
        self.history.redo(&mut self.scene)
    }

    /// Destroy every stroke, open or finished, and every import
    pub fn clear(&mut self) {
        self.left.reset(&mut self.scene);
        self.right.reset(&mut self.scene);
        self.history.clear(&mut self.scene);
        self.scene.clear();
        info!("DrawingDocument::clear: all strokes removed");
    }

    /// Switch what hand input does. Leaving drawing mode finishes open
    /// strokes.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        if self.mode == mode {
            return;
        }
        if mode != InteractionMode::Drawing {
            self.finish_open_strokes();
        }
        debug!(
            "DrawingDocument::set_interaction_mode: {:?} -> {:?}",
            self.mode, mode
        );
        self.mode = mode;
    }

    /// Suspend drawing and finish open strokes
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.finish_open_strokes();
        self.paused = true;
        debug!("DrawingDocument::pause");
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        debug!("DrawingDocument::resume");
    }

    /// Add imported content as an undoable node
    pub fn insert_imported(&mut self, label: impl Into<String>) -> NodeId {
        let node = self.scene.spawn_imported(label);
        self.history
            .record(HistoryEntry::Imported { node }, &mut self.scene);
        node
    }

    /// Brush for strokes started from now on
    pub fn set_brush_settings(&mut self, settings: BrushSettings) {
        self.brush = settings;
    }

    /// Apply a command from the UI
    pub fn apply(&mut self, command: DrawingCommand) {
        debug!("DrawingDocument::apply: {:?}", command);
        match command {
            DrawingCommand::Undo => {
                self.undo();
            }
            DrawingCommand::Redo => {
                self.redo();
            }
            DrawingCommand::Clear => self.clear(),
            DrawingCommand::Pause => self.pause(),
            DrawingCommand::Resume => self.resume(),
            DrawingCommand::SetInteractionMode { mode } => self.set_interaction_mode(mode),
            DrawingCommand::SetBrushKind { kind } => self.brush.kind = kind,
            DrawingCommand::SetSolidBrush(settings) => self.brush.solid = settings,
            DrawingCommand::SetSparkleBrush(settings) => self.brush.sparkle = settings,
            DrawingCommand::InsertImported { label } => {
                self.insert_imported(label);
            }
        }
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneNodes {
        &self.scene
    }

    /// Mutable scene access for the renderer to drain changes
    pub fn scene_mut(&mut self) -> &mut SceneNodes {
        &mut self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn source(&self, chirality: Chirality) -> &DrawingSource {
        match chirality {
            Chirality::Left => &self.left,
            Chirality::Right => &self.right,
        }
    }

    /// Mutable source access for uploading the open stroke's mesh
    pub fn source_mut(&mut self, chirality: Chirality) -> &mut DrawingSource {
        match chirality {
            Chirality::Left => &mut self.left,
            Chirality::Right => &mut self.right,
        }
    }

    pub fn brush_settings(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Unbounded;
    use glam::Vec3;

    fn pinch(z: f32) -> Option<InputData> {
        let p = Vec3::new(0.0, 0.0, z);
        Some(InputData::new(p, p))
    }

    fn draw(document: &mut DrawingDocument, chirality: Chirality, t0: f32) -> NodeId {
        for i in 0..3 {
            document.receive_at(pinch(i as f32 * 0.01), chirality, t0 + i as f32 * 0.1);
        }
        document.receive_at(None, chirality, t0 + 1.0).unwrap()
    }

    #[test]
    fn test_stroke_recorded_on_release() {
        let mut document = DrawingDocument::default();
        let node = draw(&mut document, Chirality::Left, 0.0);
        assert_eq!(
            document.history().done(),
            &[HistoryEntry::Stroke {
                node,
                chirality: Chirality::Left
            }]
        );
    }

    #[test]
    fn test_paused_input_is_ignored() {
        let mut document = DrawingDocument::default();
        document.pause();
        assert!(document.receive_at(pinch(0.0), Chirality::Right, 0.0).is_none());
        assert!(!document.source(Chirality::Right).is_active());
        assert!(document.scene().is_empty());

        document.resume();
        document.receive_at(pinch(0.0), Chirality::Right, 0.1);
        assert!(document.source(Chirality::Right).is_active());
    }

    #[test]
    fn test_pause_finishes_open_stroke() {
        let mut document = DrawingDocument::default();
        document.receive_at(pinch(0.0), Chirality::Right, 0.0);
        document.receive_at(pinch(0.01), Chirality::Right, 0.1);
        document.apply(DrawingCommand::Pause);

        assert!(document.is_paused());
        assert!(!document.source(Chirality::Right).is_active());
        assert_eq!(document.history().undo_count(), 1);
    }

    #[test]
    fn test_placement_mode_ignores_input() {
        let mut document = DrawingDocument::with_canvas(DrawingConfig::default(), Unbounded);
        document.set_interaction_mode(InteractionMode::Placement);
        document.receive_at(pinch(0.0), Chirality::Left, 0.0);
        assert!(!document.source(Chirality::Left).is_active());
    }

    #[test]
    fn test_imported_content_is_undoable() {
        let mut document = DrawingDocument::default();
        let node = document.insert_imported("photo.png");
        assert!(document.scene().is_visible(node));

        document.apply(DrawingCommand::Undo);
        assert!(!document.scene().is_visible(node));
        document.apply(DrawingCommand::Redo);
        assert!(document.scene().is_visible(node));
    }

    #[test]
    fn test_brush_commands() {
        let mut document = DrawingDocument::default();
        document.apply(DrawingCommand::SetBrushKind {
            kind: crate::style::BrushKind::Sparkle,
        });
        assert_eq!(
            document.brush_settings().kind,
            crate::style::BrushKind::Sparkle
        );
    }
}
