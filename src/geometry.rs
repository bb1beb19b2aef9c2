pub type FloatType = f64;

/// Tolerance used for parallel-ray cutoffs, surface membership tests and the
/// self-intersection offset.
pub const EPSILON: FloatType = 1e-4;

pub type WorldPoint = nalgebra::Point3<FloatType>;
pub type WorldVector = nalgebra::Vector3<FloatType>;
pub type UnitVector = nalgebra::Unit<WorldVector>;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Normalized direction of the ray
    pub direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn point_at(&self, distance: FloatType) -> WorldPoint {
        self.origin + self.direction * distance
    }
}

/// Mirror reflection of `v` about the normal `n`.
pub fn reflect(v: &WorldVector, n: &WorldVector) -> WorldVector {
    v - 2.0 * v.dot(n) * n
}

/// Snell refraction of `v` through a surface with normal `n`.
///
/// Returns `None` on total internal reflection (negative discriminant).
pub fn refract(v: &WorldVector, n: &WorldVector, refraction_ratio: FloatType) -> Option<WorldVector> {
    let dt = v.dot(n);
    let discriminant = 1.0 - refraction_ratio * refraction_ratio * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(refraction_ratio * (v - dt * n) - discriminant.sqrt() * n)
    } else {
        None
    }
}
