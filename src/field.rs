//! Session configuration sent by the server
//!
//! Field geometry and the local identity arrive once, before any state
//! message. Everything here is in simulation units.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Opaque participant identity
///
/// The server keys the player map with strings but may send the local `Id`
/// as a number, so both forms normalize to the same string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "IdRepr")]
pub struct PlayerId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Int(i64),
}

impl From<IdRepr> for PlayerId {
    fn from(repr: IdRepr) -> Self {
        match repr {
            IdRepr::Text(s) => PlayerId(s),
            IdRepr::Int(n) => PlayerId(n.to_string()),
        }
    }
}

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Field geometry and local identity for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub goal_size: f32,
    pub ball_radius: f32,
    pub player_radius: f32,
    /// Boundary padding around the playable rectangle (older servers omit it)
    #[serde(default)]
    pub edge_radius: f32,
    pub id: PlayerId,
}

impl FieldConfig {
    /// Decode and validate a `config` payload
    pub fn from_value(data: serde_json::Value) -> Result<Self, DecodeError> {
        let config: FieldConfig = serde_json::from_value(data).map_err(DecodeError::Config)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry the transform and renderer cannot work with
    pub fn validate(&self) -> Result<(), DecodeError> {
        let positive = [
            ("FieldWidth", self.field_width),
            ("FieldHeight", self.field_height),
            ("GoalSize", self.goal_size),
            ("BallRadius", self.ball_radius),
            ("PlayerRadius", self.player_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(DecodeError::InvalidConfig { field, value });
            }
        }
        if !self.edge_radius.is_finite() || self.edge_radius < 0.0 {
            return Err(DecodeError::InvalidConfig {
                field: "EdgeRadius",
                value: self.edge_radius,
            });
        }
        Ok(())
    }

    /// Half extents of the playable rectangle
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height) * 0.5
    }

    /// Full extents including the edge padding on every side
    pub fn padded_extents(&self) -> Vec2 {
        Vec2::new(
            self.field_width + 2.0 * self.edge_radius,
            self.field_height + 2.0 * self.edge_radius,
        )
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.field_width / self.field_height
    }

    /// Width of the painted field lines
    pub fn line_width(&self) -> f32 {
        if self.edge_radius > 0.0 {
            2.0 * self.edge_radius
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_config() {
        let config = FieldConfig::from_value(json!({
            "FieldWidth": 100, "FieldHeight": 60, "GoalSize": 20,
            "BallRadius": 2, "PlayerRadius": 3, "EdgeRadius": 1, "Id": "p1"
        }))
        .unwrap();
        assert_eq!(config.field_width, 100.0);
        assert_eq!(config.edge_radius, 1.0);
        assert_eq!(config.id, PlayerId::new("p1"));
        assert_eq!(config.half_extents(), Vec2::new(50.0, 30.0));
        assert_eq!(config.padded_extents(), Vec2::new(102.0, 62.0));
    }

    #[test]
    fn test_numeric_id_and_missing_edge_radius() {
        let config = FieldConfig::from_value(json!({
            "FieldWidth": 1000, "FieldHeight": 500, "GoalSize": 200,
            "BallRadius": 10, "PlayerRadius": 10, "Id": 7
        }))
        .unwrap();
        assert_eq!(config.id.as_str(), "7");
        assert_eq!(config.edge_radius, 0.0);
        assert_eq!(config.line_width(), 1.0);
    }

    #[test]
    fn test_rejects_non_positive_geometry() {
        let err = FieldConfig::from_value(json!({
            "FieldWidth": 0, "FieldHeight": 60, "GoalSize": 20,
            "BallRadius": 2, "PlayerRadius": 3, "EdgeRadius": 1, "Id": "p1"
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidConfig { field: "FieldWidth", .. }
        ));
    }

    #[test]
    fn test_rejects_missing_field() {
        let err = FieldConfig::from_value(json!({ "FieldWidth": 10, "Id": "p1" })).unwrap_err();
        assert!(matches!(err, DecodeError::Config(_)));
    }
}
