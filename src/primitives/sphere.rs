use crate::error::ValidationError;
use crate::geometry::{EPSILON, FloatType, Ray, UnitVector, WorldPoint, WorldVector};
use crate::materials::Material;

use super::Hit;

#[derive(Clone, Debug)]
pub struct Sphere {
    center: WorldPoint,
    radius: FloatType,
    material: Material,
}

impl Sphere {
    pub fn new(
        center: WorldPoint,
        radius: FloatType,
        material: Material,
    ) -> Result<Self, ValidationError> {
        if radius <= 0.0 {
            return Err(ValidationError::NonPositiveRadius { value: radius });
        }
        Ok(Sphere {
            center,
            radius,
            material,
        })
    }

    /// Solves `(o + t·dir - c) · (o + t·dir - c) = r²`. The ray direction is
    /// unit length, so the quadratic reduces to the half-b form. The smaller
    /// root is preferred; the larger one covers a ray origin inside the
    /// sphere.
    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        let oc = ray.origin - self.center;
        let b = oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let mut t = -b - sqrt_disc;
        if t <= t_min {
            t = -b + sqrt_disc;
        }
        if t <= t_min || t > t_max {
            return None;
        }

        let point = ray.point_at(t);
        Some(Hit {
            point,
            // Geometric outward normal, deliberately not flipped.
            normal: UnitVector::new_normalize(point - self.center),
            ray: *ray,
            t,
            material: &self.material,
        })
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        ((point - self.center).norm() - self.radius).abs() < EPSILON
    }

    pub fn translated(&self, offset: &WorldVector) -> Sphere {
        Sphere {
            center: self.center + offset,
            radius: self.radius,
            material: self.material,
        }
    }

    pub fn scaled(&self, factor: FloatType) -> Sphere {
        Sphere {
            center: self.center,
            radius: self.radius * factor,
            material: self.material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::WHITE;
    use assert2::assert;

    fn unit_sphere() -> Sphere {
        Sphere::new(WorldPoint::origin(), 1.0, Material::diffuse(WHITE)).unwrap()
    }

    #[test]
    fn rejects_non_positive_radius() {
        let result = Sphere::new(WorldPoint::origin(), 0.0, Material::diffuse(WHITE));
        assert!(result.is_err());
    }

    #[test]
    fn axial_ray_hits_at_radius_with_outward_normal() {
        // Sphere of radius r at the origin, ray from (0, 0, 2r) toward it.
        let sphere = unit_sphere();
        let ray = Ray::new(WorldPoint::new(0.0, 0.0, 2.0), WorldVector::new(0.0, 0.0, -1.0));

        let hit = sphere.hit(&ray, EPSILON, 100.0).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!((hit.normal.into_inner() - WorldVector::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn ray_from_inside_uses_the_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 1.0, 0.0));

        let hit = sphere.hit(&ray, EPSILON, 100.0).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);
        // Outward normal points along the ray when leaving the sphere.
        assert!(hit.normal.into_inner().dot(&ray.direction) > 0.0);
    }

    #[test]
    fn narrow_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(
            WorldPoint::new(1.01, 0.0, 2.0),
            WorldVector::new(0.0, 0.0, -1.0),
        );
        assert!(sphere.hit(&ray, EPSILON, 100.0).is_none());
    }

    #[test]
    fn hit_beyond_t_max_is_rejected() {
        let sphere = unit_sphere();
        let ray = Ray::new(WorldPoint::new(0.0, 0.0, 5.0), WorldVector::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, EPSILON, 3.0).is_none());
    }

    #[test]
    fn contains_point_checks_the_surface_shell() {
        let sphere = unit_sphere();
        assert!(sphere.contains_point(&WorldPoint::new(1.0, 0.0, 0.0)));
        assert!(!sphere.contains_point(&WorldPoint::origin()));
        assert!(!sphere.contains_point(&WorldPoint::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn scale_keeps_the_center() {
        let sphere = unit_sphere().scaled(2.0);
        assert!(sphere.contains_point(&WorldPoint::new(2.0, 0.0, 0.0)));
    }
}
