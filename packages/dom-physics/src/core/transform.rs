//! Body pose -> element transform
//!
//! Physics bodies are positioned by their geometric center, DOM elements by
//! their top-left corner. The element is moved to the body center, rotated,
//! then pulled back by half its own size so both centers coincide.

use super::Vec2;

/// Center position and rotation of a simulated body
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub center: Vec2,
    /// Radians, clockwise on screen (y grows downward)
    pub angle: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { center: Vec2::new(x, y), angle }
    }

    /// CSS `transform` value placing an element of `size` on this pose.
    pub fn css_transform(&self, size: Vec2) -> String {
        let half = size.half();
        format!(
            "translate({}px, {}px) rotate({}rad) translate({}px, {}px)",
            self.center.x, self.center.y, self.angle, -half.x, -half.y
        )
    }

    /// Same transform as [`Pose::css_transform`], as a matrix.
    pub fn element_matrix(&self, size: Vec2) -> Affine {
        let half = size.half();
        Affine::translate(self.center.x, self.center.y)
            * Affine::rotate(self.angle)
            * Affine::translate(-half.x, -half.y)
    }
}

/// 2D affine matrix in CSS `matrix(a, b, c, d, e, f)` layout:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Affine {
    pub fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self { e: x, f: y, ..Self::identity() }
    }

    pub fn rotate(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Rotation angle encoded in the linear part
    pub fn angle(&self) -> f32 {
        self.b.atan2(self.a)
    }

    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.e, self.f)
    }
}

/// `lhs * rhs` applies `rhs` first, matching CSS transform-list order.
impl std::ops::Mul for Affine {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }
}
