use crate::core::data::vec3::Vec3;

/// Geometric framing of a rendering surface.
///
/// Values read from a surface are untrusted until they pass
/// [`validate_camera`](crate::core::validation::camera::validate_camera).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub position: Vec3,
    pub focal_point: Vec3,
    pub view_up: Vec3,
    pub view_plane_normal: Vec3,
    /// Zoom proxy for parallel projection; must be positive when present.
    pub parallel_scale: Option<f64>,
    pub parallel_projection: bool,
}

impl Camera {
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let scales_match = match (self.parallel_scale, other.parallel_scale) {
            (Some(a), Some(b)) => (a - b).abs() <= epsilon,
            (None, None) => true,
            _ => false,
        };

        scales_match
            && self.parallel_projection == other.parallel_projection
            && self.position.approx_eq(&other.position, epsilon)
            && self.focal_point.approx_eq(&other.focal_point, epsilon)
            && self.view_up.approx_eq(&other.view_up, epsilon)
            && self.view_plane_normal.approx_eq(&other.view_plane_normal, epsilon)
    }

    /// Moves the camera along its view plane normal so that its focal point
    /// lies on the plane through `point`, keeping the viewing direction.
    #[must_use]
    pub fn translated_to_plane_of(&self, point: Vec3) -> Self {
        let offset = (point - self.focal_point).dot(self.view_plane_normal);
        let shift = self.view_plane_normal * offset;

        Self {
            position: self.position + shift,
            focal_point: self.focal_point + shift,
            ..*self
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            focal_point: Vec3::ZERO,
            view_up: Vec3::new(0.0, 1.0, 0.0),
            view_plane_normal: Vec3::new(0.0, 0.0, 1.0),
            parallel_scale: Some(1.0),
            parallel_projection: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use crate::core::data::vec3::Vec3;

    #[test]
    fn approx_eq_tolerates_small_drift() {
        let camera = Camera::default();
        let drifted = Camera {
            position: camera.position + Vec3::new(1e-12, 0.0, 0.0),
            ..camera
        };

        assert!(camera.approx_eq(&drifted, 1e-9));
        assert!(!camera.approx_eq(
            &Camera {
                parallel_scale: Some(2.0),
                ..camera
            },
            1e-9
        ));
        assert!(!camera.approx_eq(
            &Camera {
                parallel_scale: None,
                ..camera
            },
            1e-9
        ));
    }

    #[test]
    fn translated_to_plane_only_moves_along_normal() {
        let camera = Camera::default();

        let moved = camera.translated_to_plane_of(Vec3::new(5.0, -3.0, 7.0));

        assert_eq!(moved.focal_point, Vec3::new(0.0, 0.0, 7.0));
        assert_eq!(moved.position, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(moved.view_up, camera.view_up);
        assert_eq!(moved.parallel_scale, camera.parallel_scale);
    }
}
