//! WebSocket protocol message definitions
//!
//! Inbound: `{ "type": "config" | "state", "data": ... }`.
//! Outbound: `{ "type": "player", "data": { "pos": { "x", "y" } } }`.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, TransportError};
use crate::field::FieldConfig;
use crate::input::LocalInputState;
use crate::world::Snapshot;

/// Raw envelope before the payload is typed
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Messages sent from server to client
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Config(FieldConfig),
    State(Snapshot),
    /// Any other `type`; ignored by the session
    Unknown(String),
}

impl Inbound {
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let envelope: Envelope = serde_json::from_str(text).map_err(DecodeError::Envelope)?;
        match envelope.kind.as_str() {
            "config" => FieldConfig::from_value(envelope.data).map(Inbound::Config),
            "state" => Snapshot::from_value(envelope.data).map(Inbound::State),
            _ => Ok(Inbound::Unknown(envelope.kind)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    pub x: f32,
    pub y: f32,
}

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    /// Where the local player wants to be, in simulation units
    Player { pos: WirePoint },
}

impl Outbound {
    pub fn from_input(input: LocalInputState) -> Self {
        Outbound::Player {
            pos: WirePoint {
                x: input.pos.x,
                y: input.pos.y,
            },
        }
    }

    pub fn encode(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use serde_json::{Value, json};

    #[test]
    fn test_decode_config() {
        let msg = Inbound::decode(
            r#"{"type":"config","data":{"FieldWidth":100,"FieldHeight":60,"GoalSize":20,
                "BallRadius":2,"PlayerRadius":3,"EdgeRadius":1,"Id":"p1"}}"#,
        )
        .unwrap();
        match msg {
            Inbound::Config(config) => assert_eq!(config.id.as_str(), "p1"),
            other => panic!("expected config, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_state() {
        let msg = Inbound::decode(
            r#"{"type":"state","data":{"Players":{"1":{"Team":0,"Pos":{"X":1,"Y":2}}},
                "Ball":{"Pos":{"X":0,"Y":0}},"Score":[2,1]}}"#,
        )
        .unwrap();
        match msg {
            Inbound::State(snapshot) => {
                assert_eq!(snapshot.players.len(), 1);
                assert_eq!(snapshot.score.0, [2, 1]);
            }
            other => panic!("expected state, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let msg = Inbound::decode(r#"{"type":"chat","data":{"text":"hi"}}"#).unwrap();
        assert_eq!(msg, Inbound::Unknown("chat".to_string()));
    }

    #[test]
    fn test_malformed_envelope() {
        assert!(matches!(
            Inbound::decode("not json"),
            Err(DecodeError::Envelope(_))
        ));
        assert!(matches!(
            Inbound::decode(r#"{"data":{}}"#),
            Err(DecodeError::Envelope(_))
        ));
    }

    #[test]
    fn test_state_without_data_is_a_state_error() {
        assert!(matches!(
            Inbound::decode(r#"{"type":"state"}"#),
            Err(DecodeError::State(_))
        ));
    }

    #[test]
    fn test_outbound_shape() {
        let msg = Outbound::from_input(LocalInputState {
            pos: Vec2::new(12.5, -3.0),
        });
        let value: Value = serde_json::from_str(&msg.encode().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({ "type": "player", "data": { "pos": { "x": 12.5, "y": -3.0 } } })
        );
    }
}
