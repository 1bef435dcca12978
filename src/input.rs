//! Pointer sampling
//!
//! Pointer positions come in as logical pixels relative to the canvas and are
//! stored in simulation units, clamped to the playable rectangle. The last
//! event wins; nothing is smoothed or rate limited here.

use glam::Vec2;

use crate::field::FieldConfig;
use crate::transform::Transform;

/// The local participant's requested position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalInputState {
    pub pos: Vec2,
}

/// Owns [`LocalInputState`]; the only writer of it
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    state: LocalInputState,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a device-space pointer position and store it
    pub fn sample(&mut self, device: Vec2, transform: &Transform, config: &FieldConfig) {
        if !device.is_finite() {
            log::debug!("Dropping non-finite pointer position {:?}", device);
            return;
        }
        let sim = transform.inverse(device);
        self.state.pos = clamp_to_field(sim, config);
    }

    pub fn state(&self) -> LocalInputState {
        self.state
    }

    /// Back to the origin (new session)
    pub fn reset(&mut self) {
        self.state = LocalInputState::default();
    }
}

/// Clamp each axis to the field's half extents (edge padding excluded)
pub fn clamp_to_field(pos: Vec2, config: &FieldConfig) -> Vec2 {
    let half = config.half_extents();
    pos.clamp(-half, half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PlayerId;
    use proptest::prelude::*;

    fn config() -> FieldConfig {
        FieldConfig {
            field_width: 100.0,
            field_height: 60.0,
            goal_size: 20.0,
            ball_radius: 2.0,
            player_radius: 3.0,
            edge_radius: 1.0,
            id: PlayerId::new("p1"),
        }
    }

    #[test]
    fn test_defaults_to_origin() {
        assert_eq!(InputSampler::new().state().pos, Vec2::ZERO);
    }

    #[test]
    fn test_clamps_far_right_to_half_width() {
        let cfg = config();
        let t = Transform::new(&cfg, 800.0, 600.0).unwrap();
        let mut sampler = InputSampler::new();

        let device = t.forward(Vec2::new(cfg.field_width, 0.0));
        sampler.sample(device, &t, &cfg);

        let pos = sampler.state().pos;
        assert!((pos.x - 50.0).abs() < 1e-4);
        assert!(pos.y.abs() < 1e-3);
    }

    #[test]
    fn test_edge_padding_is_not_playable() {
        let cfg = config();
        // Inside the padding band, outside the field
        assert_eq!(
            clamp_to_field(Vec2::new(-50.5, 30.5), &cfg),
            Vec2::new(-50.0, 30.0)
        );
    }

    #[test]
    fn test_last_event_wins() {
        let cfg = config();
        let t = Transform::new(&cfg, 800.0, 600.0).unwrap();
        let mut sampler = InputSampler::new();
        sampler.sample(t.forward(Vec2::new(10.0, 10.0)), &t, &cfg);
        sampler.sample(t.forward(Vec2::new(-20.0, 5.0)), &t, &cfg);
        let pos = sampler.state().pos;
        assert!((pos - Vec2::new(-20.0, 5.0)).length() < 1e-3);

        sampler.reset();
        assert_eq!(sampler.state().pos, Vec2::ZERO);
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let cfg = config();
        let t = Transform::new(&cfg, 800.0, 600.0).unwrap();
        let mut sampler = InputSampler::new();
        sampler.sample(t.forward(Vec2::new(1.0, 2.0)), &t, &cfg);
        let before = sampler.state();
        sampler.sample(Vec2::new(f32::NAN, 0.0), &t, &cfg);
        assert_eq!(sampler.state(), before);
    }

    proptest! {
        #[test]
        fn prop_sample_stays_in_field(
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            w in 1.0f32..3000.0,
            h in 1.0f32..3000.0,
        ) {
            let cfg = config();
            let t = Transform::new(&cfg, w, h).unwrap();
            let mut sampler = InputSampler::new();
            sampler.sample(Vec2::new(x, y), &t, &cfg);
            let pos = sampler.state().pos;
            prop_assert!(pos.x.abs() <= 50.0 && pos.y.abs() <= 30.0);
        }
    }
}
