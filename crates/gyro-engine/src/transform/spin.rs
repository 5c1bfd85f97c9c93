use glam::{Mat4, Quat, Vec3};

/// Accumulating rotation driven by frame count.
///
/// Every `advance()` right-multiplies the orientation by a fixed per-frame
/// rotation: `q_n = q_(n-1) * step`. The orientation never resets, so after
/// `n` frames it equals `step^n` (up to renormalization).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    orientation: Quat,
    step: Quat,
    frames: u64,
}

impl Spin {
    /// Spin of `angle_per_frame` radians about `axis` per frame.
    ///
    /// A zero axis yields a spin that never moves.
    pub fn new(axis: Vec3, angle_per_frame: f32) -> Self {
        let step = axis
            .try_normalize()
            .map(|axis| Quat::from_axis_angle(axis, angle_per_frame))
            .unwrap_or(Quat::IDENTITY);
        Self::from_step(step)
    }

    /// Spin composing an explicit per-frame rotation.
    pub fn from_step(step: Quat) -> Self {
        Self {
            orientation: Quat::IDENTITY,
            step: step.normalize(),
            frames: 0,
        }
    }

    /// Composes one more per-frame rotation into the orientation.
    pub fn advance(&mut self) {
        // Renormalize so float error does not build up into a scale.
        self.orientation = (self.orientation * self.step).normalize();
        self.frames += 1;
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn step(&self) -> Quat {
        self.step
    }

    /// Frames composed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }

    /// Column-major matrix, ready for a `mat4x4<f32>` uniform.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.matrix().to_cols_array_2d()
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::from_step(Quat::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEGREE: f32 = std::f32::consts::PI / 180.0;

    #[test]
    fn starts_at_identity() {
        let spin = Spin::new(Vec3::Y, DEGREE);
        assert_eq!(spin.orientation(), Quat::IDENTITY);
        assert_eq!(spin.matrix(), Mat4::IDENTITY);
        assert_eq!(spin.frames(), 0);
    }

    #[test]
    fn n_frames_equal_n_compositions() {
        let mut spin = Spin::new(Vec3::new(1.0, 1.0, 0.0), DEGREE);
        let step = spin.step();

        let mut expected = Quat::IDENTITY;
        for _ in 0..500 {
            spin.advance();
            expected = expected * step;
        }

        assert_eq!(spin.frames(), 500);
        assert!(spin.orientation().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn accumulates_total_angle() {
        let mut spin = Spin::new(Vec3::Y, DEGREE);
        for _ in 0..90 {
            spin.advance();
        }
        let target = Quat::from_rotation_y(90.0 * DEGREE);
        assert!(spin.orientation().abs_diff_eq(target, 1e-4));

        // A quarter turn about Y maps +X to -Z.
        let x = spin.matrix().transform_vector3(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn composition_order_is_right_multiplication() {
        // With non-commuting steps the order is observable: compare against
        // left-multiplication, which must differ.
        let a = Quat::from_rotation_x(0.3);
        let b = Quat::from_rotation_y(0.7);
        let mut spin = Spin::from_step(a);
        spin.advance();
        let after_a = spin.orientation();

        let mut s2 = Spin { orientation: after_a, step: b, frames: 1 };
        s2.advance();

        assert!(s2.orientation().abs_diff_eq(a * b, 1e-5));
        assert!(!s2.orientation().abs_diff_eq(b * a, 1e-3));
    }

    #[test]
    fn full_turn_returns_to_start() {
        let mut spin = Spin::new(Vec3::Z, DEGREE);
        for _ in 0..360 {
            spin.advance();
        }
        // q and -q are the same rotation; compare the matrices.
        assert!(spin.matrix().abs_diff_eq(Mat4::IDENTITY, 1e-3));
    }

    #[test]
    fn zero_axis_never_moves() {
        let mut spin = Spin::new(Vec3::ZERO, DEGREE);
        spin.advance();
        assert!(spin.orientation().abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn matrix_stays_a_pure_rotation() {
        let mut spin = Spin::new(Vec3::new(0.3, 1.0, 0.2), 3.0 * DEGREE);
        for _ in 0..10_000 {
            spin.advance();
        }
        let m = spin.matrix();
        assert!((m.determinant() - 1.0).abs() < 1e-4);
    }
}
