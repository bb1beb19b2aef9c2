use crate::error::ValidationError;
use crate::geometry::{EPSILON, FloatType, Ray, UnitVector, WorldPoint, WorldVector};
use crate::materials::Material;

use super::{Axis, Disk, Hit, transform::rotation_about};

/// Capped right cylinder between two cap centers.
#[derive(Clone, Debug)]
pub struct Cylinder {
    center1: WorldPoint,
    center2: WorldPoint,
    radius: FloatType,
    cap1: Disk,
    cap2: Disk,
}

impl Cylinder {
    pub fn new(
        center1: WorldPoint,
        center2: WorldPoint,
        radius: FloatType,
        material: Material,
    ) -> Result<Self, ValidationError> {
        if radius <= 0.0 {
            return Err(ValidationError::NonPositiveRadius { value: radius });
        }
        // Coincident centers leave the caps without a normal.
        let cap1 = Disk::new(center1, center1 - center2, radius, material)?;
        let cap2 = Disk::new(center2, center2 - center1, radius, material)?;
        Ok(Cylinder {
            center1,
            center2,
            radius,
            cap1,
            cap2,
        })
    }

    /// Quadratic for the lateral surface in the plane perpendicular to the
    /// axis, compared against both cap disks; the nearest wins.
    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        let axis = (self.center2 - self.center1).normalize();
        let ao = ray.origin - self.center1;

        // Project the direction and origin offset away from the axis.
        let dn = ray.direction - ray.direction.dot(&axis) * axis;
        let aon = ao - ao.dot(&axis) * axis;
        let a = dn.dot(&dn);
        let b = 2.0 * dn.dot(&aon);
        let c = aon.dot(&aon) - self.radius * self.radius;

        let mut nearest: Option<(FloatType, UnitVector)> = None;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let sqrt_disc = discriminant.sqrt();
            let mut t = (-b - sqrt_disc) / (2.0 * a);
            if t <= t_min {
                // Ray origin inside the mantle, try the far wall.
                t = (-b + sqrt_disc) / (2.0 * a);
            }
            if t > t_min && t <= t_max {
                let point = ray.point_at(t);
                let on_axis = self.closest_point_on_axis(&point);
                let height = (self.center2 - self.center1).norm();
                if (on_axis - self.center1).norm() <= height
                    && (on_axis - self.center2).norm() <= height
                {
                    nearest = Some((t, UnitVector::new_normalize(point - on_axis)));
                }
            }
        }

        for cap in [&self.cap1, &self.cap2] {
            if let Some(hit) = cap.hit(ray, t_min, t_max) {
                if nearest.is_none_or(|(t, _)| hit.t < t) {
                    nearest = Some((hit.t, hit.normal));
                }
            }
        }

        nearest.map(|(t, normal)| Hit {
            point: ray.point_at(t),
            normal,
            ray: *ray,
            t,
            material: self.cap1.material(),
        })
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        let on_axis = self.closest_point_on_axis(point);
        let height = (self.center2 - self.center1).norm();
        let between_caps = (on_axis - self.center1).norm() <= height
            && (on_axis - self.center2).norm() <= height;
        let on_mantle = between_caps && ((point - on_axis).norm() - self.radius).abs() < EPSILON;

        on_mantle || self.cap1.contains_point(point) || self.cap2.contains_point(point)
    }

    fn closest_point_on_axis(&self, point: &WorldPoint) -> WorldPoint {
        let axis = (self.center2 - self.center1).normalize();
        self.center1 + (point - self.center1).dot(&axis) * axis
    }

    fn material(&self) -> Material {
        *self.cap1.material()
    }

    pub fn translated(&self, offset: &WorldVector) -> Result<Cylinder, ValidationError> {
        Cylinder::new(
            self.center1 + offset,
            self.center2 + offset,
            self.radius,
            self.material(),
        )
    }

    pub fn scaled(&self, factor: FloatType) -> Result<Cylinder, ValidationError> {
        let center = self.center1 + (self.center2 - self.center1) / 2.0;
        Cylinder::new(
            center + (self.center1 - center) * factor,
            center + (self.center2 - center) * factor,
            self.radius * factor,
            self.material(),
        )
    }

    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Result<Cylinder, ValidationError> {
        let rotation = rotation_about(axis, angle);
        let center = self.center1 + (self.center2 - self.center1) / 2.0;
        Cylinder::new(
            center + rotation * (self.center1 - center),
            center + rotation * (self.center2 - center),
            self.radius,
            self.material(),
        )
    }
}
