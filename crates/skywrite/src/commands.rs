//! Commands sent from the UI to the drawing document
//!
//! The UI process serializes these as JSON; [`DrawingCommand::from_json`]
//! decodes one message.

use serde::{Deserialize, Serialize};

use crate::style::{BrushKind, SolidBrushSettings, SparkleBrushSettings};
use crate::types::InteractionMode;

/// Explicit control channel into a [`crate::document::DrawingDocument`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DrawingCommand {
    /// Hide the most recent stroke or import
    Undo,
    /// Show the most recently undone stroke or import
    Redo,
    /// Destroy every stroke and import, and the history
    Clear,
    /// Suspend drawing; open strokes are finished
    Pause,
    Resume,
    SetInteractionMode { mode: InteractionMode },
    /// Brush used by the next stroke
    SetBrushKind { kind: BrushKind },
    SetSolidBrush(SolidBrushSettings),
    SetSparkleBrush(SparkleBrushSettings),
    /// Add imported content under the imported container
    InsertImported { label: String },
}

impl DrawingCommand {
    pub fn from_json(json: &str) -> Result<Self, CommandError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CommandError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Failed to decode command: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_command_json() {
        assert_eq!(
            DrawingCommand::from_json(r#"{"type":"Undo"}"#).unwrap(),
            DrawingCommand::Undo
        );
        assert_eq!(DrawingCommand::Redo.to_json().unwrap(), r#"{"type":"Redo"}"#);
    }

    #[test]
    fn test_struct_command_json() {
        let command = DrawingCommand::from_json(
            r#"{"type":"SetInteractionMode","data":{"mode":"Placement"}}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            DrawingCommand::SetInteractionMode {
                mode: InteractionMode::Placement
            }
        );
    }

    #[test]
    fn test_settings_command_uses_defaults() {
        let command =
            DrawingCommand::from_json(r#"{"type":"SetSparkleBrush","data":{"size":0.001}}"#)
                .unwrap();
        let DrawingCommand::SetSparkleBrush(settings) = command else {
            panic!("unexpected command {:?}", command);
        };
        assert_eq!(settings.size, 0.001);
        assert_eq!(settings.initial_speed, 0.012);
    }

    #[test]
    fn test_malformed_command() {
        assert!(matches!(
            DrawingCommand::from_json(r#"{"type":"Explode"}"#),
            Err(CommandError::Decode(_))
        ));
    }
}
