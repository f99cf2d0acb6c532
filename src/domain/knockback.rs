use glam::DVec3;

use crate::domain::entities::Pose;
use crate::domain::errors::DegenerateDirection;

/// Turns an object's offset from a detonation into a knockback velocity.
///
/// The offset is rotated into the explosive's local frame (yaw about the
/// vertical axis, then pitch about the resulting horizontal axis) before being
/// normalized, so the blast is directed by the explosive's facing instead of
/// pushing radially. Whatever lies straight ahead of the explosive is thrown
/// along +Z.
pub fn compute_impulse(
    detonation: Pose,
    object_position: DVec3,
    power: f64,
) -> Result<DVec3, DegenerateDirection> {
    let relative = object_position - detonation.position;
    let local = rotate_into_frame(relative, detonation.yaw, detonation.pitch);
    local
        .try_normalize()
        .map(|direction| direction * power)
        .ok_or(DegenerateDirection)
}

fn rotate_into_frame(v: DVec3, yaw: f64, pitch: f64) -> DVec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let x = v.x * cos_yaw + v.z * sin_yaw;
    let z = -v.x * sin_yaw + v.z * cos_yaw;

    // Pitch is positive looking down.
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    let y = v.y * cos_pitch + z * sin_pitch;
    let z = -v.y * sin_pitch + z * cos_pitch;

    DVec3::new(x, y, z)
}
