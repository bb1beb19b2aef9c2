use crate::error::ValidationError;
use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};

use super::{Axis, Hit, Polygon, cuboid::nearest_face_hit, transform::rotation_about};

/// Polygon soup with an axis-aligned bounding box.
///
/// Faces are arbitrary convex polygons; loading them from a model file is the
/// caller's concern. The bounds only serve as the pivot for transforms.
#[derive(Clone, Debug)]
pub struct Mesh {
    faces: Vec<Polygon>,
    min: WorldPoint,
    max: WorldPoint,
}

impl Mesh {
    pub fn new(faces: Vec<Polygon>) -> Result<Self, ValidationError> {
        if faces.is_empty() {
            return Err(ValidationError::EmptyMesh);
        }
        let (min, max) = bounds(&faces);
        Ok(Mesh { faces, min, max })
    }

    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        nearest_face_hit(&self.faces, ray, t_min, t_max)
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        self.faces.iter().any(|face| face.contains_point(point))
    }

    pub fn faces(&self) -> &[Polygon] {
        &self.faces
    }

    /// Bounding box center, the pivot for rotation and scaling.
    fn center(&self) -> WorldPoint {
        self.min + (self.max - self.min) / 2.0
    }

    fn mapped(
        &self,
        f: impl Fn(&WorldPoint) -> WorldPoint,
    ) -> Result<Mesh, ValidationError> {
        let faces = self
            .faces
            .iter()
            .map(|face| face.mapped(&f))
            .collect::<Result<Vec<_>, _>>()?;
        Mesh::new(faces)
    }

    pub fn translated(&self, offset: &WorldVector) -> Result<Mesh, ValidationError> {
        self.mapped(|v| v + offset)
    }

    pub fn scaled(&self, factor: FloatType) -> Result<Mesh, ValidationError> {
        let center = self.center();
        self.mapped(|v| center + (v - center) * factor)
    }

    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Result<Mesh, ValidationError> {
        let rotation = rotation_about(axis, angle);
        let center = self.center();
        self.mapped(|v| center + rotation * (v - center))
    }
}

fn bounds(faces: &[Polygon]) -> (WorldPoint, WorldPoint) {
    let mut min = faces[0].vertices()[0];
    let mut max = min;
    for face in faces {
        for vertex in face.vertices() {
            min = WorldPoint::new(min.x.min(vertex.x), min.y.min(vertex.y), min.z.min(vertex.z));
            max = WorldPoint::new(max.x.max(vertex.x), max.y.max(vertex.y), max.z.max(vertex.z));
        }
    }
    (min, max)
}
