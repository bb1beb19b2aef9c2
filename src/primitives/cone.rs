use crate::error::ValidationError;
use crate::geometry::{EPSILON, FloatType, Ray, UnitVector, WorldPoint, WorldVector};
use crate::materials::Material;

use super::{Axis, Disk, Hit, transform::rotation_about};

/// Right circular cone between an apex and a circular base disk.
#[derive(Clone, Debug)]
pub struct Cone {
    base_center: WorldPoint,
    apex: WorldPoint,
    radius: FloatType,
    base: Disk,
}

impl Cone {
    pub fn new(
        base_center: WorldPoint,
        apex: WorldPoint,
        radius: FloatType,
        material: Material,
    ) -> Result<Self, ValidationError> {
        if radius <= 0.0 {
            return Err(ValidationError::NonPositiveRadius { value: radius });
        }
        // A zero-height cone leaves the base without a normal.
        let base = Disk::new(base_center, base_center - apex, radius, material)?;
        Ok(Cone {
            base_center,
            apex,
            radius,
            base,
        })
    }

    /// Quadratic for the lateral surface anchored at the apex, with
    /// `m = r² / h²` encoding the opening angle, compared against the base
    /// disk; the nearest wins.
    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        let axis = (self.base_center - self.apex).normalize();
        let height = self.height();
        let m = (self.radius * self.radius) / (height * height);

        let ao = ray.origin - self.apex;
        let dna = ray.direction.dot(&axis);
        let aona = ao.dot(&axis);

        let a = ray.direction.dot(&ray.direction) - m * dna * dna - dna * dna;
        let b = 2.0 * (ray.direction.dot(&ao) - m * dna * aona - dna * aona);
        let c = ao.dot(&ao) - m * aona * aona - aona * aona;

        let mut nearest: Option<(FloatType, UnitVector)> = None;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let sqrt_disc = discriminant.sqrt();
            let mut t = (-b - sqrt_disc) / (2.0 * a);
            if t <= t_min {
                // Ray origin inside the cone, try the far wall.
                t = (-b + sqrt_disc) / (2.0 * a);
            }
            if t > t_min && t <= t_max {
                let point = ray.point_at(t);
                let on_axis = self.closest_point_on_axis(&point);
                // The quadratic also matches the mirror cone past the apex;
                // keep only hits whose axis projection falls between the apex
                // and the base.
                if (on_axis - self.apex).norm() <= height
                    && (on_axis - self.base_center).norm() <= height
                {
                    nearest = Some((t, self.lateral_normal(&point)));
                }
            }
        }

        if let Some(hit) = self.base.hit(ray, t_min, t_max) {
            if nearest.is_none_or(|(t, _)| hit.t < t) {
                nearest = Some((hit.t, hit.normal));
            }
        }

        nearest.map(|(t, normal)| Hit {
            point: ray.point_at(t),
            normal,
            ray: *ray,
            t,
            material: self.base.material(),
        })
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        let on_axis = self.closest_point_on_axis(point);
        let from_apex = (on_axis - self.apex).norm();
        let height = self.height();
        let between = from_apex <= height && (on_axis - self.base_center).norm() <= height;
        // Lateral radius grows linearly from zero at the apex.
        let expected = from_apex / height * self.radius;
        let on_mantle = between && ((point - on_axis).norm() - expected).abs() < EPSILON;

        on_mantle || self.base.contains_point(point)
    }

    /// Outward lateral normal: the apex, the surface point and a point X on
    /// the axis form a right triangle with the right angle at the surface, so
    /// the normal is point - X.
    fn lateral_normal(&self, point: &WorldPoint) -> UnitVector {
        let axis = (self.base_center - self.apex).normalize();
        let opening = (self.radius / self.height()).atan();
        let hypotenuse = (self.apex - point).norm() / opening.cos();
        let x = self.apex + hypotenuse * axis;
        UnitVector::new_normalize(point - x)
    }

    fn closest_point_on_axis(&self, point: &WorldPoint) -> WorldPoint {
        let axis = (self.base_center - self.apex).normalize();
        self.apex + (point - self.apex).dot(&axis) * axis
    }

    fn height(&self) -> FloatType {
        (self.base_center - self.apex).norm()
    }

    fn material(&self) -> Material {
        *self.base.material()
    }

    pub fn translated(&self, offset: &WorldVector) -> Result<Cone, ValidationError> {
        Cone::new(
            self.base_center + offset,
            self.apex + offset,
            self.radius,
            self.material(),
        )
    }

    pub fn scaled(&self, factor: FloatType) -> Result<Cone, ValidationError> {
        let center = self.base_center + (self.apex - self.base_center) / 2.0;
        Cone::new(
            center + (self.base_center - center) * factor,
            center + (self.apex - center) * factor,
            self.radius * factor,
            self.material(),
        )
    }

    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Result<Cone, ValidationError> {
        let rotation = rotation_about(axis, angle);
        let center = self.base_center + (self.apex - self.base_center) / 2.0;
        Cone::new(
            center + rotation * (self.base_center - center),
            center + rotation * (self.apex - center),
            self.radius,
            self.material(),
        )
    }
}
