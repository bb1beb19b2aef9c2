use crate::error::ValidationError;
use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};
use crate::materials::Material;

use super::{Axis, Hit, Plane};

/// Flat circular disk, a plane hit restricted to a radius around the center.
#[derive(Clone, Debug)]
pub struct Disk {
    center: WorldPoint,
    radius: FloatType,
    plane: Plane,
}

impl Disk {
    pub fn new(
        center: WorldPoint,
        normal: WorldVector,
        radius: FloatType,
        material: Material,
    ) -> Result<Self, ValidationError> {
        if radius <= 0.0 {
            return Err(ValidationError::NonPositiveRadius { value: radius });
        }
        Ok(Disk {
            center,
            radius,
            plane: Plane::new(center, normal, material)?,
        })
    }

    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        self.plane
            .hit(ray, t_min, t_max)
            .filter(|hit| (hit.point - self.center).norm() <= self.radius)
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        self.plane.contains_point(point) && (point - self.center).norm() <= self.radius
    }

    pub(crate) fn material(&self) -> &Material {
        self.plane.material()
    }

    pub fn translated(&self, offset: &WorldVector) -> Disk {
        Disk {
            center: self.center + offset,
            radius: self.radius,
            plane: self.plane.translated(offset),
        }
    }

    pub fn scaled(&self, factor: FloatType) -> Disk {
        Disk {
            center: self.center,
            radius: self.radius * factor,
            plane: self.plane.clone(),
        }
    }

    /// Rotates the disk plane about the disk center.
    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Disk {
        Disk {
            center: self.center,
            radius: self.radius,
            plane: self.plane.rotated(axis, angle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EPSILON;
    use crate::util::WHITE;
    use assert2::assert;

    fn disk() -> Disk {
        Disk::new(
            WorldPoint::new(0.0, 0.0, 1.0),
            WorldVector::new(0.0, 0.0, 1.0),
            2.0,
            Material::diffuse(WHITE),
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_radius() {
        let result = Disk::new(
            WorldPoint::origin(),
            WorldVector::new(0.0, 0.0, 1.0),
            -1.0,
            Material::diffuse(WHITE),
        );
        assert!(result.unwrap_err() == ValidationError::NonPositiveRadius { value: -1.0 });
    }

    #[test]
    fn hit_inside_the_radius() {
        let disk = disk();
        let ray = Ray::new(WorldPoint::new(1.5, 0.0, 3.0), WorldVector::new(0.0, 0.0, -1.0));
        let hit = disk.hit(&ray, EPSILON, 100.0).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn miss_outside_the_radius() {
        let ray = Ray::new(WorldPoint::new(2.5, 0.0, 3.0), WorldVector::new(0.0, 0.0, -1.0));
        assert!(disk().hit(&ray, EPSILON, 100.0).is_none());
    }

    #[test]
    fn contains_point_respects_both_plane_and_radius() {
        let disk = disk();
        assert!(disk.contains_point(&WorldPoint::new(1.0, 1.0, 1.0)));
        assert!(!disk.contains_point(&WorldPoint::new(2.5, 0.0, 1.0)));
        assert!(!disk.contains_point(&WorldPoint::new(1.0, 1.0, 1.5)));
    }
}
