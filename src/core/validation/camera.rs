use crate::core::data::camera::Camera;

/// Accepts a candidate camera and returns its normalized form.
///
/// Rejects non-finite components, zero-length direction vectors and a
/// non-positive `parallel_scale`. Direction vectors come back unit length;
/// already-normalized cameras come back unchanged.
#[must_use]
pub fn validate_camera(candidate: &Camera) -> Option<Camera> {
    if !candidate.position.is_finite() || !candidate.focal_point.is_finite() {
        return None;
    }

    let view_up = candidate.view_up.normalized()?;
    let view_plane_normal = candidate.view_plane_normal.normalized()?;

    let parallel_scale = match candidate.parallel_scale {
        Some(scale) if scale.is_finite() && scale > 0.0 => Some(scale),
        Some(_) => return None,
        None => None,
    };

    Some(Camera {
        position: candidate.position,
        focal_point: candidate.focal_point,
        view_up,
        view_plane_normal,
        parallel_scale,
        parallel_projection: candidate.parallel_projection,
    })
}
