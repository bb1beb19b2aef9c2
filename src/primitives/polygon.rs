use itertools::Itertools as _;

use crate::error::ValidationError;
use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint, WorldVector};
use crate::materials::Material;

use super::{Axis, Hit, Plane, Triangle, transform::rotation_about};

/// Convex planar polygon given as an ordered vertex list.
///
/// Construction validates coplanarity and convexity and precomputes the
/// carrier plane plus a fan triangulation from the first vertex.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<WorldPoint>,
    plane: Plane,
    triangles: Vec<Triangle>,
}

impl Polygon {
    pub fn new(
        vertices: Vec<WorldPoint>,
        material: Material,
    ) -> Result<Self, ValidationError> {
        if vertices.len() < 3 {
            return Err(ValidationError::TooFewVertices {
                found: vertices.len(),
            });
        }

        let normal = (vertices[1] - vertices[0]).cross(&(vertices[2] - vertices[0]));
        let plane = Plane::new(vertices[0], normal, material)?;
        if !vertices[3..].iter().all(|v| plane.contains_point(v)) {
            return Err(ValidationError::NotCoplanar);
        }

        check_convex(&vertices, &plane)?;

        // Fan triangulation from vertex 0.
        let triangles = (2..vertices.len())
            .map(|i| Triangle::new(vertices[0], vertices[i - 1], vertices[i], material))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Polygon {
            vertices,
            plane,
            triangles,
        })
    }

    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        self.plane
            .hit(ray, t_min, t_max)
            .filter(|hit| self.contains_in_plane(&hit.point, EPSILON))
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        self.plane.contains_point(point) && self.contains_in_plane(point, EPSILON)
    }

    fn contains_in_plane(&self, point: &WorldPoint, tolerance: FloatType) -> bool {
        self.triangles
            .iter()
            .any(|triangle| triangle.contains_in_plane(point, tolerance))
    }

    pub fn vertices(&self) -> &[WorldPoint] {
        &self.vertices
    }

    pub(crate) fn material(&self) -> &Material {
        self.plane.material()
    }

    /// Vertex centroid, the pivot for rotation and scaling.
    pub(crate) fn centroid(&self) -> WorldPoint {
        centroid(&self.vertices)
    }

    /// Rebuilds the polygon with every vertex mapped through `f`.
    pub(crate) fn mapped(
        &self,
        f: impl Fn(&WorldPoint) -> WorldPoint,
    ) -> Result<Polygon, ValidationError> {
        Polygon::new(self.vertices.iter().map(f).collect(), *self.material())
    }

    pub fn translated(&self, offset: &WorldVector) -> Result<Polygon, ValidationError> {
        self.mapped(|v| v + offset)
    }

    pub fn scaled(&self, factor: FloatType) -> Result<Polygon, ValidationError> {
        let center = self.centroid();
        self.mapped(|v| center + (v - center) * factor)
    }

    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Result<Polygon, ValidationError> {
        let rotation = rotation_about(axis, angle);
        let center = self.centroid();
        self.mapped(|v| center + rotation * (v - center))
    }
}

pub(crate) fn centroid(vertices: &[WorldPoint]) -> WorldPoint {
    let sum = vertices
        .iter()
        .fold(WorldVector::zeros(), |sum, v| sum + v.coords);
    WorldPoint::from(sum / vertices.len() as FloatType)
}

/// Convexity check: every pair of consecutive edges must turn the same way
/// around the plane normal, and the exterior turn angles of a convex loop sum
/// to 2π.
fn check_convex(vertices: &[WorldPoint], plane: &Plane) -> Result<(), ValidationError> {
    let normal = plane.normal().into_inner();
    let edges: Vec<WorldVector> = vertices
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| b - a)
        .collect();

    let mut turn_sum = 0.0;
    for (e0, e1) in edges.iter().circular_tuple_windows() {
        if normal.dot(&e0.cross(e1)) <= 0.0 {
            return Err(ValidationError::NotConvex);
        }
        let cos = (e0.dot(e1) / (e0.norm() * e1.norm())).clamp(-1.0, 1.0);
        turn_sum += cos.acos();
    }

    if (turn_sum - 2.0 * std::f64::consts::PI).abs() > EPSILON {
        return Err(ValidationError::NotConvex);
    }
    Ok(())
}
