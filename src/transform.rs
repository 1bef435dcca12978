//! Simulation space <-> device space mapping
//!
//! Simulation space is centered on the field with Y up. Device space is the
//! drawing surface in logical pixels with the origin top-left and Y down.
//! The edge-padded field is fit with a single uniform scale and centered,
//! so the spare dimension is letterboxed rather than stretched.

use glam::{Affine2, Mat2, Mat4, Vec2, Vec3};

use crate::field::FieldConfig;

/// Affine mapping for one (config, viewport) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    device_from_sim: Affine2,
    sim_from_device: Affine2,
    scale: f32,
    viewport: Vec2,
}

impl Transform {
    /// Build the mapping for a viewport, or `None` if the viewport is degenerate
    pub fn new(config: &FieldConfig, width: f32, height: f32) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let extents = config.padded_extents();
        if extents.x <= 0.0 || extents.y <= 0.0 {
            return None;
        }

        let scale = (width / extents.x).min(height / extents.y);
        let viewport = Vec2::new(width, height);
        let device_from_sim = Affine2::from_mat2_translation(
            Mat2::from_diagonal(Vec2::new(scale, -scale)),
            viewport * 0.5,
        );

        Some(Self {
            device_from_sim,
            sim_from_device: device_from_sim.inverse(),
            scale,
            viewport,
        })
    }

    /// Simulation units -> logical pixels
    pub fn forward(&self, sim: Vec2) -> Vec2 {
        self.device_from_sim.transform_point2(sim)
    }

    /// Logical pixels -> simulation units
    pub fn inverse(&self, device: Vec2) -> Vec2 {
        self.sim_from_device.transform_point2(device)
    }

    /// Pixels per simulation unit
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Device-space size of the playable rectangle (without edge padding)
    pub fn field_extent(&self, config: &FieldConfig) -> Vec2 {
        Vec2::new(config.field_width, config.field_height) * self.scale
    }

    /// Forward mapping followed by device -> clip space, for the vertex shader
    pub fn clip_from_sim(&self) -> Mat4 {
        let clip_from_device = Mat4::from_translation(Vec3::new(-1.0, 1.0, 0.0))
            * Mat4::from_scale(Vec3::new(
                2.0 / self.viewport.x,
                -2.0 / self.viewport.y,
                1.0,
            ));
        let m = self.device_from_sim.matrix2;
        let t = self.device_from_sim.translation;
        let device_from_sim = Mat4::from_cols(
            m.x_axis.extend(0.0).extend(0.0),
            m.y_axis.extend(0.0).extend(0.0),
            Vec3::Z.extend(0.0),
            t.extend(0.0).extend(1.0),
        );
        clip_from_device * device_from_sim
    }
}

/// Current viewport and the last valid transform computed for it
///
/// Degenerate sizes (hidden tab, collapsed canvas) keep the previous
/// transform instead of replacing it.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    size: Option<Vec2>,
    transform: Option<Transform>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new viewport size and recompute when a config is known
    ///
    /// Returns true if the transform was replaced.
    pub fn resize(&mut self, config: Option<&FieldConfig>, width: f32, height: f32) -> bool {
        let size = Vec2::new(width, height);
        match config.and_then(|c| Transform::new(c, width, height)) {
            Some(transform) => {
                self.size = Some(size);
                self.transform = Some(transform);
                true
            }
            None => {
                if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
                    self.size = Some(size);
                } else {
                    log::debug!("Ignoring degenerate viewport {}x{}", width, height);
                }
                false
            }
        }
    }

    /// Recompute for a (new) config at the last known size
    pub fn reconfigure(&mut self, config: &FieldConfig) -> bool {
        self.transform = None;
        match self.size {
            Some(size) => self.resize(Some(config), size.x, size.y),
            None => false,
        }
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn size(&self) -> Option<Vec2> {
        self.size
    }
}

/// Largest surface inside the window with the field's aspect ratio
pub fn fit_surface(config: &FieldConfig, window_width: f32, window_height: f32) -> (f32, f32) {
    if window_width <= 0.0 || window_height <= 0.0 {
        return (window_width.max(0.0), window_height.max(0.0));
    }
    let field_aspect = config.aspect_ratio();
    let window_aspect = window_width / window_height;
    if window_aspect > field_aspect {
        (window_width * field_aspect / window_aspect, window_height)
    } else {
        (window_width, window_height * window_aspect / field_aspect)
    }
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

    fn approx(a: Vec2, b: Vec2, tol: f32) -> bool {
        (a - b).abs().max_element() <= tol
    }

    #[test]
    fn test_scale_is_min_of_axes() {
        let t = Transform::new(&config(), 800.0, 600.0).unwrap();
        let expected = (800.0_f32 / 102.0).min(600.0 / 62.0);
        assert!((t.scale() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_origin_maps_to_center_and_y_flips() {
        let t = Transform::new(&config(), 800.0, 600.0).unwrap();
        assert!(approx(t.forward(Vec2::ZERO), Vec2::new(400.0, 300.0), 1e-4));

        let up = t.forward(Vec2::new(0.0, 10.0));
        assert!(up.y < 300.0, "positive sim Y must move up on screen");
        let right = t.forward(Vec2::new(10.0, 0.0));
        assert!(right.x > 400.0);
    }

    #[test]
    fn test_wide_viewport_is_pillarboxed() {
        let t = Transform::new(&config(), 2000.0, 620.0).unwrap();
        // Height constrains: 620 / 62 = 10 px per unit
        assert!((t.scale() - 10.0).abs() < 1e-6);
        let left_edge = t.forward(Vec2::new(-51.0, 0.0));
        assert!((left_edge.x - (1000.0 - 510.0)).abs() < 1e-3);
    }

    #[test]
    fn test_tall_viewport_is_letterboxed() {
        let t = Transform::new(&config(), 1020.0, 2000.0).unwrap();
        // Width constrains: 1020 / 102 = 10 px per unit
        assert!((t.scale() - 10.0).abs() < 1e-6);

        let top = t.forward(Vec2::new(0.0, 31.0));
        let bottom = t.forward(Vec2::new(0.0, -31.0));
        assert!((top.y - (1000.0 - 310.0)).abs() < 1e-3);
        assert!((bottom.y - (1000.0 + 310.0)).abs() < 1e-3);

        // Padded left and right edges touch the viewport sides
        assert!(t.forward(Vec2::new(-51.0, 0.0)).x.abs() < 1e-3);
        assert!((t.forward(Vec2::new(51.0, 0.0)).x - 1020.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_viewport() {
        assert!(Transform::new(&config(), 0.0, 600.0).is_none());
        assert!(Transform::new(&config(), 800.0, -1.0).is_none());
        assert!(Transform::new(&config(), f32::NAN, 600.0).is_none());
    }

    #[test]
    fn test_viewport_holds_last_valid_transform() {
        let cfg = config();
        let mut viewport = Viewport::new();
        assert!(viewport.resize(Some(&cfg), 800.0, 600.0));
        let before = *viewport.transform().unwrap();

        assert!(!viewport.resize(Some(&cfg), 0.0, 0.0));
        assert_eq!(viewport.transform(), Some(&before));
        assert_eq!(viewport.size(), Some(Vec2::new(800.0, 600.0)));
    }

    #[test]
    fn test_viewport_without_config_remembers_size() {
        let mut viewport = Viewport::new();
        assert!(!viewport.resize(None, 640.0, 480.0));
        assert!(viewport.transform().is_none());

        assert!(viewport.reconfigure(&config()));
        assert_eq!(viewport.transform().unwrap().viewport(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_clip_matrix_maps_corners() {
        let cfg = config();
        let t = Transform::new(&cfg, 800.0, 600.0).unwrap();
        let clip = t.clip_from_sim();

        let center = clip.transform_point3(Vec3::ZERO);
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5);

        // Width constrains at 800x600, so the padded left edge touches clip x = -1
        let left = clip.transform_point3(Vec3::new(-51.0, 0.0, 0.0));
        assert!((left.x + 1.0).abs() < 1e-4);
        let top = clip.transform_point3(Vec3::new(0.0, 10.0, 0.0));
        assert!(top.y > 0.0);
    }

    #[test]
    fn test_fit_surface_matches_field_aspect() {
        let cfg = config();
        let (w, h) = fit_surface(&cfg, 1920.0, 600.0);
        assert_eq!(h, 600.0);
        assert!((w / h - cfg.aspect_ratio()).abs() < 1e-4);

        let (w, h) = fit_surface(&cfg, 500.0, 1000.0);
        assert_eq!(w, 500.0);
        assert!((w / h - cfg.aspect_ratio()).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_aspect_ratio_preserved(w in 1.0f32..4000.0, h in 1.0f32..4000.0) {
            let cfg = config();
            let t = Transform::new(&cfg, w, h).unwrap();
            let extent = t.field_extent(&cfg);
            let ratio = extent.x / extent.y;
            prop_assert!((ratio - cfg.aspect_ratio()).abs() < 1e-3);
            // The padded field never overflows the viewport
            let padded = cfg.padded_extents() * t.scale();
            prop_assert!(padded.x <= w * (1.0 + 1e-5) && padded.y <= h * (1.0 + 1e-5));
        }

        #[test]
        fn prop_round_trip(
            w in 50.0f32..4000.0,
            h in 50.0f32..4000.0,
            x in -51.0f32..51.0,
            y in -31.0f32..31.0,
        ) {
            let t = Transform::new(&config(), w, h).unwrap();
            let p = Vec2::new(x, y);
            prop_assert!(approx(t.inverse(t.forward(p)), p, 1e-3));

            let d = t.forward(p);
            prop_assert!(approx(t.forward(t.inverse(d)), d, 1e-2));
        }

        #[test]
        fn prop_recompute_is_idempotent(w in 1.0f32..4000.0, h in 1.0f32..4000.0) {
            let cfg = config();
            prop_assert_eq!(Transform::new(&cfg, w, h), Transform::new(&cfg, w, h));
        }
    }
}
