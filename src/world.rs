//! Local mirror of the authoritative world
//!
//! Every state message is a complete snapshot. Applying one replaces the
//! ball and score and reconciles the player set by identity. No
//! interpolation happens here: what gets drawn is the last received position.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::field::{FieldConfig, PlayerId};

/// One of the two sides
///
/// Red defends the left goal, Blue the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Red, Team::Blue];

    pub fn index(self) -> usize {
        match self {
            Team::Red => 0,
            Team::Blue => 1,
        }
    }

    /// -1 for the left half, +1 for the right half
    pub fn side(self) -> f32 {
        match self {
            Team::Red => -1.0,
            Team::Blue => 1.0,
        }
    }
}

impl TryFrom<u8> for Team {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Team::Red),
            1 => Ok(Team::Blue),
            other => Err(format!("unknown team {other}")),
        }
    }
}

impl From<Team> for u8 {
    fn from(team: Team) -> Self {
        team.index() as u8
    }
}

/// Wire position `{X, Y}`, finite in f32
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawPos")]
struct WirePos {
    x: f32,
    y: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPos {
    x: f64,
    y: f64,
}

impl TryFrom<RawPos> for WirePos {
    type Error = String;

    fn try_from(raw: RawPos) -> Result<Self, Self::Error> {
        let (x, y) = (raw.x as f32, raw.y as f32);
        if !(x.is_finite() && y.is_finite()) {
            return Err(format!("non-finite position ({}, {})", raw.x, raw.y));
        }
        Ok(WirePos { x, y })
    }
}

impl From<WirePos> for Vec2 {
    fn from(p: WirePos) -> Self {
        Vec2::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WirePlayer {
    team: Team,
    pos: WirePos,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireBall {
    pos: WirePos,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSnapshot {
    players: BTreeMap<PlayerId, WirePlayer>,
    ball: WireBall,
    score: [u32; 2],
}

/// A player as last seen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub team: Team,
    pub pos: Vec2,
}

/// Goals per team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score(pub [u32; 2]);

impl Score {
    pub fn for_team(&self, team: Team) -> u32 {
        self.0[team.index()]
    }
}

/// One decoded state message
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub players: BTreeMap<PlayerId, Player>,
    pub ball: Vec2,
    pub score: Score,
}

impl Snapshot {
    /// Decode a `state` payload; any unknown team or malformed field rejects the whole snapshot
    pub fn from_value(data: serde_json::Value) -> Result<Self, DecodeError> {
        let wire: WireSnapshot = serde_json::from_value(data).map_err(DecodeError::State)?;
        Ok(Self {
            players: wire
                .players
                .into_iter()
                .map(|(id, p)| {
                    (
                        id,
                        Player {
                            team: p.team,
                            pos: p.pos.into(),
                        },
                    )
                })
                .collect(),
            ball: wire.ball.pos.into(),
            score: Score(wire.score),
        })
    }
}

/// Player set changes caused by one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub joined: Vec<PlayerId>,
    pub left: Vec<PlayerId>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty()
    }
}

/// Latest authoritative picture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldModel {
    players: BTreeMap<PlayerId, Player>,
    ball: Option<Vec2>,
    score: Score,
}

impl WorldModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror a snapshot, returning who joined and who left
    pub fn apply(&mut self, snapshot: Snapshot) -> Reconciliation {
        let mut report = Reconciliation::default();

        let stale: Vec<PlayerId> = self
            .players
            .keys()
            .filter(|id| !snapshot.players.contains_key(*id))
            .cloned()
            .collect();
        for id in stale {
            self.players.remove(&id);
            log::info!("Player {} left", id);
            report.left.push(id);
        }

        for (id, player) in snapshot.players {
            match self.players.get_mut(&id) {
                Some(existing) => *existing = player,
                None => {
                    log::info!("Player {} joined team {:?}", id, player.team);
                    self.players.insert(id.clone(), player);
                    report.joined.push(id);
                }
            }
        }

        self.ball = Some(snapshot.ball);
        self.score = snapshot.score;
        report
    }

    /// Players in identity order
    pub fn players(&self) -> impl Iterator<Item = (&PlayerId, &Player)> {
        self.players.iter()
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn local_player(&self, config: &FieldConfig) -> Option<&Player> {
        self.players.get(&config.id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// `None` until the first snapshot
    pub fn ball(&self) -> Option<Vec2> {
        self.ball
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn has_snapshot(&self) -> bool {
        self.ball.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(players: serde_json::Value) -> Snapshot {
        Snapshot::from_value(json!({
            "Players": players,
            "Ball": { "Pos": { "X": 1.5, "Y": -2.0 } },
            "Score": [3, 4]
        }))
        .unwrap()
    }

    fn ids(world: &WorldModel) -> Vec<&str> {
        world.players().map(|(id, _)| id.as_str()).collect()
    }

    #[test]
    fn test_decode_snapshot() {
        let snap = snapshot(json!({ "a": { "Team": 1, "Pos": { "X": 10, "Y": 5 } } }));
        let player = &snap.players[&PlayerId::new("a")];
        assert_eq!(player.team, Team::Blue);
        assert_eq!(player.pos, Vec2::new(10.0, 5.0));
        assert_eq!(snap.ball, Vec2::new(1.5, -2.0));
        assert_eq!(snap.score.for_team(Team::Red), 3);
        assert_eq!(snap.score.for_team(Team::Blue), 4);
    }

    #[test]
    fn test_reconcile_join_and_leave() {
        let mut world = WorldModel::new();
        let s1 = snapshot(json!({
            "A": { "Team": 0, "Pos": { "X": 0, "Y": 0 } },
            "B": { "Team": 1, "Pos": { "X": 1, "Y": 1 } }
        }));
        let s2 = snapshot(json!({
            "B": { "Team": 1, "Pos": { "X": 7, "Y": 8 } },
            "C": { "Team": 0, "Pos": { "X": 2, "Y": 2 } }
        }));

        let first = world.apply(s1);
        assert_eq!(first.joined, vec![PlayerId::new("A"), PlayerId::new("B")]);
        assert!(first.left.is_empty());

        let second = world.apply(s2);
        assert_eq!(second.joined, vec![PlayerId::new("C")]);
        assert_eq!(second.left, vec![PlayerId::new("A")]);
        assert_eq!(ids(&world), vec!["B", "C"]);
        assert_eq!(
            world.player(&PlayerId::new("B")).unwrap().pos,
            Vec2::new(7.0, 8.0)
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let snap = snapshot(json!({ "A": { "Team": 0, "Pos": { "X": 3, "Y": 4 } } }));
        let mut once = WorldModel::new();
        once.apply(snap.clone());

        let mut twice = WorldModel::new();
        twice.apply(snap.clone());
        let report = twice.apply(snap);

        assert_eq!(once, twice);
        assert!(report.is_empty());
    }

    #[test]
    fn test_team_change_is_overwritten() {
        let mut world = WorldModel::new();
        world.apply(snapshot(json!({ "A": { "Team": 0, "Pos": { "X": 0, "Y": 0 } } })));
        world.apply(snapshot(json!({ "A": { "Team": 1, "Pos": { "X": 0, "Y": 0 } } })));
        assert_eq!(world.player(&PlayerId::new("A")).unwrap().team, Team::Blue);
    }

    #[test]
    fn test_unknown_team_rejected() {
        let err = Snapshot::from_value(json!({
            "Players": { "A": { "Team": 2, "Pos": { "X": 0, "Y": 0 } } },
            "Ball": { "Pos": { "X": 0, "Y": 0 } },
            "Score": [0, 0]
        }))
        .unwrap_err();
        assert!(matches!(err, DecodeError::State(_)));
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        let ball = Snapshot::from_value(json!({
            "Players": {},
            "Ball": { "Pos": { "X": 1e40, "Y": 1 } },
            "Score": [0, 0]
        }));
        assert!(matches!(ball, Err(DecodeError::State(_))));

        let player = Snapshot::from_value(json!({
            "Players": { "A": { "Team": 0, "Pos": { "X": 0, "Y": -1e39 } } },
            "Ball": { "Pos": { "X": 0, "Y": 0 } },
            "Score": [0, 0]
        }));
        assert!(matches!(player, Err(DecodeError::State(_))));
    }

    #[test]
    fn test_score_must_be_a_pair() {
        let err = Snapshot::from_value(json!({
            "Players": {},
            "Ball": { "Pos": { "X": 0, "Y": 0 } },
            "Score": [1, 2, 3]
        }))
        .unwrap_err();
        assert!(matches!(err, DecodeError::State(_)));
    }

    #[test]
    fn test_score_is_mirrored_without_monotonicity() {
        let mut world = WorldModel::new();
        world.apply(snapshot(json!({})));
        assert_eq!(world.score(), Score([3, 4]));

        let reset = Snapshot {
            players: BTreeMap::new(),
            ball: Vec2::ZERO,
            score: Score([0, 0]),
        };
        world.apply(reset);
        assert_eq!(world.score(), Score([0, 0]));
    }

    #[test]
    fn test_local_player_lookup() {
        let config = FieldConfig {
            field_width: 100.0,
            field_height: 60.0,
            goal_size: 20.0,
            ball_radius: 2.0,
            player_radius: 3.0,
            edge_radius: 1.0,
            id: PlayerId::new("B"),
        };
        let mut world = WorldModel::new();
        assert!(world.local_player(&config).is_none());

        world.apply(snapshot(json!({
            "A": { "Team": 0, "Pos": { "X": 1, "Y": 1 } },
            "B": { "Team": 1, "Pos": { "X": -4, "Y": 2 } }
        })));
        let local = world.local_player(&config).unwrap();
        assert_eq!(local.team, Team::Blue);
        assert_eq!(local.pos, Vec2::new(-4.0, 2.0));

        world.apply(snapshot(json!({ "A": { "Team": 0, "Pos": { "X": 1, "Y": 1 } } })));
        assert!(world.local_player(&config).is_none());
    }

    #[test]
    fn test_empty_world_has_no_ball() {
        let world = WorldModel::new();
        assert!(!world.has_snapshot());
        assert_eq!(world.ball(), None);
        assert_eq!(world.player_count(), 0);
    }
}
