//! Viewing camera: perspective projection, viewport resize, and orbit controls.

use glam::{DMat4, DVec3};
use helio_config::CameraConfig;
use tracing::debug;

use crate::SceneError;

/// Pitch limit for orbit controls, just short of the poles.
const MAX_PITCH: f64 = std::f64::consts::FRAC_PI_2 - 1.0e-3;

/// A perspective camera that looks at, and orbits around, a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCamera {
    /// Eye position in scene space.
    pub position: DVec3,
    /// Point the camera looks at and orbits around.
    pub target: DVec3,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Width / height.
    pub aspect_ratio: f64,
    /// Near clip plane distance (always positive).
    pub near: f64,
    /// Far clip plane distance (always positive, > near).
    pub far: f64,
}

impl ViewCamera {
    /// Build from config for a viewport of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidClipPlanes`] unless `0 < near < far`, both finite.
    pub fn from_config(
        config: &CameraConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, SceneError> {
        if !valid_clip_planes(config.near, config.far) {
            return Err(SceneError::InvalidClipPlanes {
                near: config.near,
                far: config.far,
            });
        }

        let mut camera = Self {
            position: DVec3::from_array(config.position),
            target: DVec3::from_array(config.target),
            fov_y: config.fov_y_degrees.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: config.near,
            far: config.far,
        };
        camera.resize(width, height);
        Ok(camera)
    }

    /// Adapt the aspect ratio to a new viewport. Zero-sized viewports
    /// (minimized windows) leave the camera unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("Ignoring resize to {width}x{height}");
            return;
        }
        self.aspect_ratio = f64::from(width) / f64::from(height);
    }

    /// Right-handed view matrix, +Y up.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, DVec3::Y)
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Distance from the eye to the target.
    pub fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }

    /// Rotate the eye around the target by yaw (about +Y) and pitch deltas.
    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius == 0.0 {
            return;
        }

        let yaw = offset.x.atan2(offset.z) + delta_yaw;
        let pitch = ((offset.y / radius).asin() + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);

        let horizontal = radius * pitch.cos();
        self.position = self.target
            + DVec3::new(
                horizontal * yaw.sin(),
                radius * pitch.sin(),
                horizontal * yaw.cos(),
            );
    }

    /// Scale the eye distance by `factor`, keeping it between the clip planes.
    pub fn zoom(&mut self, factor: f64) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius == 0.0 || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        if !valid_clip_planes(self.near, self.far) {
            debug!("Ignoring zoom with clip planes {}..{}", self.near, self.far);
            return;
        }
        let new_radius = (radius * factor).clamp(self.near, self.far);
        self.position = self.target + offset * (new_radius / radius);
    }
}

fn valid_clip_planes(near: f64, far: f64) -> bool {
    near.is_finite() && far.is_finite() && near > 0.0 && near < far
}
