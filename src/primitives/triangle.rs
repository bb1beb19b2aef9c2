use crate::error::ValidationError;
use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint, WorldVector};
use crate::materials::Material;

use super::{Axis, Hit, Plane, transform::rotation_about};

#[derive(Clone, Debug)]
pub struct Triangle {
    v0: WorldPoint,
    v1: WorldPoint,
    v2: WorldPoint,
    plane: Plane,
}

impl Triangle {
    pub fn new(
        v0: WorldPoint,
        v1: WorldPoint,
        v2: WorldPoint,
        material: Material,
    ) -> Result<Self, ValidationError> {
        // Collinear vertices make the cross product vanish and fail the plane.
        let normal = (v1 - v0).cross(&(v2 - v0));
        let plane = Plane::new(v0, normal, material)?;
        Ok(Triangle { v0, v1, v2, plane })
    }

    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        self.plane
            .hit(ray, t_min, t_max)
            .filter(|hit| self.contains_in_plane(&hit.point, EPSILON))
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        self.plane.contains_point(point) && self.contains_in_plane(point, EPSILON)
    }

    /// Edge test: the point is inside iff it lies on the normal side of all
    /// three oriented edges. A positive `tolerance` also accepts points on
    /// the edges themselves.
    pub(crate) fn contains_in_plane(&self, point: &WorldPoint, tolerance: FloatType) -> bool {
        let normal = self.plane.normal().into_inner();
        let edges = [
            (self.v0, self.v1 - self.v0),
            (self.v1, self.v2 - self.v1),
            (self.v2, self.v0 - self.v2),
        ];
        edges
            .iter()
            .all(|(start, edge)| normal.dot(&edge.cross(&(point - start))) > -tolerance)
    }

    pub fn translated(&self, offset: &WorldVector) -> Result<Triangle, ValidationError> {
        Triangle::new(
            self.v0 + offset,
            self.v1 + offset,
            self.v2 + offset,
            *self.plane.material(),
        )
    }

    pub fn scaled(&self, factor: FloatType) -> Result<Triangle, ValidationError> {
        let center = self.centroid();
        Triangle::new(
            center + (self.v0 - center) * factor,
            center + (self.v1 - center) * factor,
            center + (self.v2 - center) * factor,
            *self.plane.material(),
        )
    }

    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Result<Triangle, ValidationError> {
        let rotation = rotation_about(axis, angle);
        let center = self.centroid();
        Triangle::new(
            center + rotation * (self.v0 - center),
            center + rotation * (self.v1 - center),
            center + rotation * (self.v2 - center),
            *self.plane.material(),
        )
    }

    fn centroid(&self) -> WorldPoint {
        WorldPoint::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EPSILON;
    use crate::util::WHITE;
    use assert2::assert;

    fn triangle() -> Triangle {
        Triangle::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(2.0, 0.0, 0.0),
            WorldPoint::new(0.0, 2.0, 0.0),
            Material::diffuse(WHITE),
        )
        .unwrap()
    }

    #[test]
    fn rejects_collinear_vertices() {
        let result = Triangle::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(1.0, 0.0, 0.0),
            WorldPoint::new(2.0, 0.0, 0.0),
            Material::diffuse(WHITE),
        );
        assert!(matches!(result, Err(ValidationError::ZeroNormal)));
    }

    #[test]
    fn hit_inside() {
        let triangle = triangle();
        let ray = Ray::new(WorldPoint::new(0.5, 0.5, 2.0), WorldVector::new(0.0, 0.0, -1.0));
        let hit = triangle.hit(&ray, EPSILON, 100.0).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn hit_exactly_on_an_edge() {
        // Landing on the v0-v1 edge must count as a hit, not slip through.
        let triangle = triangle();
        let ray = Ray::new(WorldPoint::new(1.0, 0.0, 2.0), WorldVector::new(0.0, 0.0, -1.0));
        let hit = triangle.hit(&ray, EPSILON, 100.0).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn miss_outside_the_edges() {
        let ray = Ray::new(WorldPoint::new(1.5, 1.5, 2.0), WorldVector::new(0.0, 0.0, -1.0));
        assert!(triangle().hit(&ray, EPSILON, 100.0).is_none());
    }

    #[test]
    fn contains_point_needs_the_plane_too() {
        let triangle = triangle();
        assert!(triangle.contains_point(&WorldPoint::new(0.5, 0.5, 0.0)));
        assert!(!triangle.contains_point(&WorldPoint::new(0.5, 0.5, 1.0)));
    }

    #[test]
    fn scaling_keeps_the_centroid_fixed() {
        let scaled = triangle().scaled(2.0).unwrap();
        // Centroid of the original triangle.
        let centroid = WorldPoint::new(2.0 / 3.0, 2.0 / 3.0, 0.0);
        assert!(scaled.contains_point(&centroid));
        assert!(scaled.contains_point(&WorldPoint::new(3.0, 0.5, 0.0)) == false);
        // A vertex scaled away from the centroid.
        let v = centroid + (WorldPoint::new(2.0, 0.0, 0.0) - centroid) * 2.0;
        assert!((scaled.v1 - v).norm() < 1e-12);
    }
}
