//! End-to-end drawing scenarios through the document API

use glam::Vec3;
use skywrite::{
    BrushKind, BrushSettings, Chirality, Container, DrawingCommand, DrawingConfig,
    DrawingDocument, HistoryEntry, InputData, InteractionMode, MeshUpdate, NodeId,
    SceneChange, StrokeGenerator, validate_closed, validate_triangle_mesh,
};

fn pinch_at(position: Vec3) -> Option<InputData> {
    Some(InputData::new(position, position))
}

fn pinch(z: f32) -> Option<InputData> {
    pinch_at(Vec3::new(0.0, 0.0, z))
}

fn released(z: f32) -> Option<InputData> {
    let p = Vec3::new(0.0, 0.0, z);
    Some(InputData::new(p, p + Vec3::new(0.05, 0.0, 0.0)))
}

fn sample_count(document: &DrawingDocument, node: NodeId) -> usize {
    document
        .scene()
        .get(node)
        .and_then(|node| node.stroke())
        .map(|stroke| stroke.sample_count())
        .unwrap_or(0)
}

fn solid_positions(update: &MeshUpdate<'_>) -> Vec<Vec3> {
    match update {
        MeshUpdate::Solid(mesh) => mesh
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .collect(),
        MeshUpdate::Sparkle(_) => panic!("expected a solid mesh"),
    }
}

#[test]
fn test_five_frame_pinch_makes_one_stroke() {
    let mut document = DrawingDocument::default();
    assert!(document.receive_at(released(0.0), Chirality::Right, 0.0).is_none());
    for i in 1..=5 {
        assert!(
            document
                .receive_at(pinch(i as f32 * 0.01), Chirality::Right, i as f32 * 0.016)
                .is_none()
        );
    }
    let node = document
        .receive_at(released(0.06), Chirality::Right, 0.1)
        .unwrap();

    assert_eq!(document.history().undo_count(), 1);
    assert_eq!(sample_count(&document, node), 5);
    assert!(document.scene().get(node).unwrap().finished);
}

#[test]
fn test_mode_switch_finishes_stroke() {
    let mut document = DrawingDocument::default();
    for i in 0..3 {
        document.receive_at(pinch(i as f32 * 0.01), Chirality::Left, i as f32 * 0.1);
    }
    let node = document.source(Chirality::Left).active_node().unwrap();

    document.apply(DrawingCommand::SetInteractionMode {
        mode: InteractionMode::Placement,
    });
    assert!(!document.source(Chirality::Left).is_active());
    assert_eq!(
        document.history().done(),
        &[HistoryEntry::Stroke {
            node,
            chirality: Chirality::Left
        }]
    );
    assert_eq!(sample_count(&document, node), 3);

    // Input in placement mode never starts a stroke
    document.receive_at(pinch(0.1), Chirality::Left, 1.0);
    assert!(!document.source(Chirality::Left).is_active());
}

#[test]
fn test_brush_change_mid_stroke() {
    let mut document = DrawingDocument::default();
    document.receive_at(pinch(0.0), Chirality::Right, 0.0);
    document.apply(DrawingCommand::SetBrushKind {
        kind: BrushKind::Sparkle,
    });
    document.receive_at(pinch(0.01), Chirality::Right, 0.1);
    let first = document.receive_at(None, Chirality::Right, 0.2).unwrap();

    document.receive_at(pinch(0.0), Chirality::Right, 0.3);
    let second = document.receive_at(None, Chirality::Right, 0.4).unwrap();

    let kind = |node| {
        document
            .scene()
            .get(node)
            .and_then(|node| node.stroke())
            .map(|stroke| stroke.kind())
    };
    assert_eq!(kind(first), Some(BrushKind::Solid));
    assert_eq!(kind(second), Some(BrushKind::Sparkle));
}

#[test]
fn test_two_hands_draw_independently() {
    let mut document = DrawingDocument::default();
    for i in 0..4 {
        let t = i as f32 * 0.1;
        document.receive_at(pinch_at(Vec3::new(-0.2, 0.0, i as f32 * 0.01)), Chirality::Left, t);
        document.receive_at(pinch_at(Vec3::new(0.2, 0.0, i as f32 * 0.01)), Chirality::Right, t);
    }
    let left = document.receive_at(None, Chirality::Left, 1.0).unwrap();
    assert!(document.source(Chirality::Right).is_active());

    document.receive_at(pinch_at(Vec3::new(0.2, 0.0, 0.05)), Chirality::Right, 1.0);
    let right = document.receive_at(None, Chirality::Right, 1.1).unwrap();

    assert_eq!(sample_count(&document, left), 4);
    assert_eq!(sample_count(&document, right), 5);
    assert_eq!(document.scene().get(left).unwrap().container, Container::Left);
    assert_eq!(document.scene().get(right).unwrap().container, Container::Right);
    assert_eq!(document.history().undo_count(), 2);
}

#[test]
fn test_outside_canvas() {
    let mut document = DrawingDocument::default();
    let outside = Vec3::new(0.0, 0.0, 2.0);

    document.receive_at(pinch_at(outside), Chirality::Right, 0.0);
    assert!(!document.source(Chirality::Right).is_active());
    assert!(document.scene().is_empty());

    document.receive_at(pinch(0.9), Chirality::Right, 0.1);
    document.receive_at(pinch(0.95), Chirality::Right, 0.2);
    let node = document.receive_at(pinch_at(outside), Chirality::Right, 0.3);
    assert!(node.is_some());
    assert!(!document.source(Chirality::Right).is_active());
}

#[test]
fn test_undo_redo_through_document() {
    let mut document = DrawingDocument::default();
    let mut nodes = Vec::new();
    for stroke in 0..3 {
        let t0 = stroke as f32;
        document.receive_at(pinch(0.0), Chirality::Right, t0);
        document.receive_at(pinch(0.02), Chirality::Right, t0 + 0.1);
        nodes.push(document.receive_at(None, Chirality::Right, t0 + 0.2).unwrap());
    }
    document.scene_mut().take_changes();

    assert!(document.undo().is_some());
    assert!(document.undo().is_some());
    assert!(!document.scene().is_visible(nodes[2]));
    assert!(!document.scene().is_visible(nodes[1]));
    assert!(document.scene().is_visible(nodes[0]));
    assert_eq!(
        document.scene_mut().take_changes(),
        vec![
            SceneChange::VisibilityChanged {
                id: nodes[2],
                visible: false
            },
            SceneChange::VisibilityChanged {
                id: nodes[1],
                visible: false
            },
        ]
    );

    document.redo();
    assert!(document.scene().is_visible(nodes[1]));

    // A new stroke discards the remaining redo entry for good
    document.receive_at(pinch(0.0), Chirality::Left, 5.0);
    document.receive_at(pinch(0.02), Chirality::Left, 5.1);
    let latest = document.receive_at(None, Chirality::Left, 5.2).unwrap();
    assert!(document.redo().is_none());
    assert!(!document.scene().contains(nodes[2]));
    let done: Vec<NodeId> = document.history().done().iter().map(|e| e.node()).collect();
    assert_eq!(done, vec![nodes[0], nodes[1], latest]);
}

#[test]
fn test_every_stroke_stays_undoable() {
    let mut document = DrawingDocument::default();
    let mut nodes = Vec::new();
    for stroke in 0..200 {
        let t0 = stroke as f32;
        document.receive_at(pinch(0.0), Chirality::Right, t0);
        document.receive_at(pinch(0.02), Chirality::Right, t0 + 0.1);
        nodes.push(document.receive_at(None, Chirality::Right, t0 + 0.2).unwrap());
    }

    for _ in 0..nodes.len() {
        assert!(document.undo().is_some());
    }
    assert!(document.undo().is_none());
    assert!(nodes.iter().all(|&node| !document.scene().is_visible(node)));

    let redone: Vec<NodeId> = (0..nodes.len())
        .filter_map(|_| document.redo())
        .map(|entry| entry.node())
        .collect();
    assert_eq!(redone, nodes);
    assert!(nodes.iter().all(|&node| document.scene().is_visible(node)));
}

#[test]
fn test_clear_removes_everything() {
    let mut document = DrawingDocument::default();
    document.receive_at(pinch(0.0), Chirality::Right, 0.0);
    document.receive_at(pinch(0.02), Chirality::Right, 0.1);
    document.receive_at(None, Chirality::Right, 0.2);
    document.insert_imported("scan.usdz");
    document.undo();
    document.receive_at(pinch(0.0), Chirality::Left, 0.3);

    document.apply(DrawingCommand::Clear);
    assert!(document.scene().is_empty());
    assert!(!document.history().can_undo());
    assert!(!document.history().can_redo());
    assert!(!document.source(Chirality::Left).is_active());
}

#[test]
fn test_commands_from_json() {
    let mut document = DrawingDocument::default();
    let messages = [
        r#"{"type":"SetBrushKind","data":{"kind":"Sparkle"}}"#,
        r#"{"type":"SetSparkleBrush","data":{"size":0.001,"color":[1.0,0.5,0.0]}}"#,
        r#"{"type":"InsertImported","data":{"label":"reference.png"}}"#,
        r#"{"type":"Pause"}"#,
    ];
    for message in messages {
        document.apply(DrawingCommand::from_json(message).unwrap());
    }

    let settings: &BrushSettings = document.brush_settings();
    assert_eq!(settings.kind, BrushKind::Sparkle);
    assert_eq!(settings.sparkle.size, 0.001);
    assert_eq!(settings.sparkle.color, [1.0, 0.5, 0.0]);
    assert!(document.is_paused());
    assert_eq!(document.scene().children(Container::Imported).count(), 1);

    document.apply(DrawingCommand::from_json(r#"{"type":"Resume"}"#).unwrap());
    assert!(!document.is_paused());
}

#[test]
fn test_duplicate_samples_make_no_degenerate_triangles() {
    let config = DrawingConfig {
        tail_smoothing: false,
        ..Default::default()
    };
    let mut document = DrawingDocument::new(config);
    document.receive_at(pinch(0.0), Chirality::Right, 0.0);
    document.receive_at(pinch(0.0), Chirality::Right, 0.1);
    document.receive_at(pinch(0.01), Chirality::Right, 0.2);

    let source = document.source_mut(Chirality::Right);
    let update = source.active_update().unwrap();
    let positions = solid_positions(&update);
    assert!(validate_triangle_mesh(&positions, update.indices(), 1.0e-12).is_ok());
    drop(update);
    assert_eq!(source.active_samples().len(), 3);

    let node = document.receive_at(None, Chirality::Right, 0.3).unwrap();
    let update = document.scene_mut().get_mut(node).unwrap().update().unwrap();
    let positions = solid_positions(&update);
    assert!(validate_closed(&positions, update.indices(), 1.0e-12).is_ok());
}
