//! Per-hand stroke capture
//!
//! A [`DrawingSource`] turns one hand's per-frame input into a stroke. It
//! starts a stroke on the first pinched frame, appends a styled sample for
//! every pinched frame after that, and finishes the stroke on release.

use glam::Vec3;
use tracing::{debug, trace, warn};

use skywrite_config::DrawingConfig;

use crate::brush::{BrushGenerator, MeshUpdate, StrokeGenerator};
use crate::scene::{NodeId, SceneNodes};
use crate::style::{BrushKind, BrushSettings, StrokeStyle};
use crate::types::{Chirality, CurveSample, InputData};

/// A stroke that has just been finished and is ready for history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedStroke {
    pub node: NodeId,
    pub chirality: Chirality,
    pub sample_count: usize,
}

/// Unstyled brush tip position for one frame
#[derive(Debug, Clone, Copy)]
struct RawPoint {
    position: Vec3,
    time: f32,
    speed: f32,
}

#[derive(Debug)]
struct ActiveStroke {
    node: NodeId,
    generator: BrushGenerator,
    style: StrokeStyle,
    /// Raw point of the newest frame
    last: Option<RawPoint>,
    /// Raw point of the frame before `last`
    prior: Option<RawPoint>,
    frames: usize,
}

impl ActiveStroke {
    fn capture(&mut self, position: Vec3, time: f32, tail_smoothing: bool) {
        let speed = match self.last {
            Some(last) if time > last.time => last.position.distance(position) / (time - last.time),
            Some(last) => last.speed,
            None => 0.0,
        };
        let point = RawPoint {
            position,
            time,
            speed,
        };

        let sample = self.style_point(&point);
        match (self.prior, self.last) {
            (Some(prior), Some(last)) if tail_smoothing => {
                // The previous tail was provisional; replace it with its smoothed version
                let smoothed = RawPoint {
                    position: (prior.position + last.position + point.position) / 3.0,
                    ..last
                };
                let smoothed = self.style_point(&smoothed);
                self.generator.remove_last(1);
                self.generator.append(&[smoothed, sample]);
            }
            _ => self.generator.append(&[sample]),
        }

        self.prior = self.last;
        self.last = Some(point);
        self.frames += 1;
    }

    fn style_point(&self, point: &RawPoint) -> CurveSample {
        self.style
            .style_input(point.position, point.speed, point.time)
    }
}

#[derive(Debug, Default)]
enum StrokeState {
    #[default]
    Idle,
    Active(ActiveStroke),
}

/// Stroke state machine for one hand
#[derive(Debug)]
pub struct DrawingSource {
    chirality: Chirality,
    config: DrawingConfig,
    state: StrokeState,
}

impl DrawingSource {
    pub fn new(chirality: Chirality, config: DrawingConfig) -> Self {
        Self {
            chirality,
            config,
            state: StrokeState::Idle,
        }
    }

    pub fn chirality(&self) -> Chirality {
        self.chirality
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, StrokeState::Active(_))
    }

    /// Node of the stroke being drawn
    pub fn active_node(&self) -> Option<NodeId> {
        match &self.state {
            StrokeState::Active(stroke) => Some(stroke.node),
            StrokeState::Idle => None,
        }
    }

    /// Brush kind frozen for the stroke being drawn
    pub fn active_brush(&self) -> Option<BrushKind> {
        match &self.state {
            StrokeState::Active(stroke) => Some(stroke.style.kind()),
            StrokeState::Idle => None,
        }
    }

    /// Samples of the stroke being drawn, empty when idle
    pub fn active_samples(&self) -> &[CurveSample] {
        match &self.state {
            StrokeState::Active(stroke) => stroke.generator.samples(),
            StrokeState::Idle => &[],
        }
    }

    /// Mesh of the stroke being drawn for upload
    pub fn active_update(&mut self) -> Option<MeshUpdate<'_>> {
        match &mut self.state {
            StrokeState::Active(stroke) => stroke.generator.update(),
            StrokeState::Idle => None,
        }
    }

    /// Process one frame of input for this hand.
    ///
    /// `None` input means the hand is not tracked (or input is suppressed)
    /// and ends any open stroke. Returns the stroke finished by this frame.
    pub fn receive(
        &mut self,
        input: Option<InputData>,
        time: f32,
        settings: &BrushSettings,
        scene: &mut SceneNodes,
    ) -> Option<FinishedStroke> {
        let tip = input
            .filter(|input| input.is_drawing(self.config.pinch_threshold))
            .map(|input| input.brush_tip());

        let Some(tip) = tip else {
            return self.finish_active(scene);
        };

        if let StrokeState::Idle = self.state {
            self.state = StrokeState::Active(self.begin_stroke(settings, scene));
        }
        if let StrokeState::Active(stroke) = &mut self.state {
            stroke.capture(tip, time, self.config.tail_smoothing);
            trace!(
                "DrawingSource::receive: {:?} sample {} at {:?}",
                self.chirality, stroke.frames, tip
            );
        }
        None
    }

    fn begin_stroke(&self, settings: &BrushSettings, scene: &mut SceneNodes) -> ActiveStroke {
        let style = StrokeStyle::from_settings(settings);
        let mut generator = BrushGenerator::for_style(&style, &self.config);
        generator.begin_new_stroke();
        let node = scene.spawn_stroke(self.chirality, style.kind());
        debug!(
            "DrawingSource::begin_stroke: {:?} hand, {:?} brush, node {:?}",
            self.chirality,
            style.kind(),
            node
        );
        ActiveStroke {
            node,
            generator,
            style,
            last: None,
            prior: None,
            frames: 0,
        }
    }

    /// Finish the open stroke as if the hand had released, without adding
    /// samples.
    pub fn force_finish(&mut self, scene: &mut SceneNodes) -> Option<FinishedStroke> {
        self.finish_active(scene)
    }

    fn finish_active(&mut self, scene: &mut SceneNodes) -> Option<FinishedStroke> {
        let StrokeState::Active(mut stroke) = std::mem::take(&mut self.state) else {
            return None;
        };
        stroke.generator.finish();
        let sample_count = stroke.generator.sample_count();
        if !scene.attach_stroke(stroke.node, stroke.generator) {
            warn!(
                "DrawingSource::finish: node {:?} no longer exists, dropping stroke",
                stroke.node
            );
            return None;
        }
        debug!(
            "DrawingSource::finish: {:?} hand, node {:?}, {} samples",
            self.chirality, stroke.node, sample_count
        );
        Some(FinishedStroke {
            node: stroke.node,
            chirality: self.chirality,
            sample_count,
        })
    }

    /// Drop the open stroke without finishing it and destroy its node
    pub fn reset(&mut self, scene: &mut SceneNodes) {
        if let StrokeState::Active(stroke) = std::mem::take(&mut self.state) {
            scene.remove(stroke.node);
            debug!(
                "DrawingSource::reset: {:?} hand, discarded node {:?}",
                self.chirality, stroke.node
            );
        }
    }
}
