//! Vertical physics for the character
//!
//! Semi-implicit Euler with a constant per-tick gravity. The visual fields
//! (rotation, animation phase) are derived here from physics state and are
//! never stored.

use crate::consts::*;

/// Advance velocity by gravity, then position by the new velocity.
///
/// Returns `(position, velocity)`.
#[inline]
pub fn integrate(position: f32, velocity: f32) -> (f32, f32) {
    let velocity = velocity + GRAVITY;
    (position + velocity, velocity)
}

/// Jump impulse: velocity is reset, not accumulated.
#[inline]
pub fn jump_velocity() -> f32 {
    JUMP_STRENGTH
}

/// Sprite rotation in degrees (nose down when falling)
#[inline]
pub fn rotation_for_velocity(velocity: f32) -> f32 {
    (velocity * ROTATION_PER_VELOCITY).clamp(MIN_ROTATION_DEG, MAX_ROTATION_DEG)
}

/// Two-frame run cycle. Rising always shows the "push off" frame.
#[inline]
pub fn animation_phase(frame_count: u64, velocity: f32) -> u8 {
    if velocity < 0.0 {
        1
    } else {
        ((frame_count / ANIMATION_FRAME_TICKS) % 2) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_applies_gravity_before_position() {
        let (p, v) = integrate(100.0, 0.0);
        assert!((v - GRAVITY).abs() < 1e-6);
        assert!((p - (100.0 + GRAVITY)).abs() < 1e-6);

        let (p, v) = integrate(p, v);
        assert!((v - 2.0 * GRAVITY).abs() < 1e-6);
        assert!((p - (100.0 + 3.0 * GRAVITY)).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_clamped() {
        assert_eq!(rotation_for_velocity(-20.0), MIN_ROTATION_DEG);
        assert_eq!(rotation_for_velocity(50.0), MAX_ROTATION_DEG);
        assert!((rotation_for_velocity(2.0) - 8.0).abs() < 1e-6);
        assert_eq!(rotation_for_velocity(0.0), 0.0);
    }

    #[test]
    fn test_animation_phase() {
        assert_eq!(animation_phase(0, 1.0), 0);
        assert_eq!(animation_phase(7, 1.0), 0);
        assert_eq!(animation_phase(8, 1.0), 1);
        assert_eq!(animation_phase(16, 1.0), 0);
        // Rising overrides the cycle
        assert_eq!(animation_phase(0, JUMP_STRENGTH), 1);
    }
}
