use crate::error::ValidationError;
use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};
use crate::materials::Material;

use super::{Axis, Hit, Polygon, transform::rotation_about};

/// Rectangular box composed of six polygonal faces.
///
/// Defined by two opposite corners; after a rotation the faces are no longer
/// axis aligned but the corners keep marking the pivot midpoint.
#[derive(Clone, Debug)]
pub struct Cuboid {
    corner1: WorldPoint,
    corner2: WorldPoint,
    faces: Vec<Polygon>,
}

impl Cuboid {
    pub fn new(
        corner1: WorldPoint,
        corner2: WorldPoint,
        material: Material,
    ) -> Result<Self, ValidationError> {
        let extent = corner2 - corner1;
        let directions = [
            WorldVector::new(extent.x, 0.0, 0.0),
            WorldVector::new(0.0, extent.y, 0.0),
            WorldVector::new(0.0, 0.0, extent.z),
        ];

        // Three faces fan out of each corner; a zero extent degenerates the
        // face polygon and fails its construction.
        let mut faces = Vec::with_capacity(6);
        for i in 0..3 {
            faces.push(corner_face(corner1, directions[i], directions[(i + 1) % 3], material)?);
            faces.push(corner_face(corner2, -directions[i], -directions[(i + 1) % 3], material)?);
        }

        Ok(Cuboid {
            corner1,
            corner2,
            faces,
        })
    }

    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        nearest_face_hit(&self.faces, ray, t_min, t_max)
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        self.faces.iter().any(|face| face.contains_point(point))
    }

    pub fn corners(&self) -> (WorldPoint, WorldPoint) {
        (self.corner1, self.corner2)
    }

    fn center(&self) -> WorldPoint {
        self.corner1 + (self.corner2 - self.corner1) / 2.0
    }

    fn material(&self) -> Material {
        *self.faces[0].material()
    }

    pub fn translated(&self, offset: &WorldVector) -> Result<Cuboid, ValidationError> {
        let faces = self
            .faces
            .iter()
            .map(|face| face.translated(offset))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Cuboid {
            corner1: self.corner1 + offset,
            corner2: self.corner2 + offset,
            faces,
        })
    }

    pub fn scaled(&self, factor: FloatType) -> Result<Cuboid, ValidationError> {
        let center = self.center();
        Cuboid::new(
            center + (self.corner1 - center) * factor,
            center + (self.corner2 - center) * factor,
            self.material(),
        )
    }

    /// Rotates all face vertices (and the defining corners) about the box
    /// center.
    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Result<Cuboid, ValidationError> {
        let rotation = rotation_about(axis, angle);
        let center = self.center();
        let faces = self
            .faces
            .iter()
            .map(|face| face.mapped(|v| center + rotation * (v - center)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Cuboid {
            corner1: center + rotation * (self.corner1 - center),
            corner2: center + rotation * (self.corner2 - center),
            faces,
        })
    }
}

fn corner_face(
    corner: WorldPoint,
    edge1: WorldVector,
    edge2: WorldVector,
    material: Material,
) -> Result<Polygon, ValidationError> {
    Polygon::new(
        vec![corner, corner + edge1, corner + edge1 + edge2, corner + edge2],
        material,
    )
}

/// Nearest hit over a face list, ties broken by strict `<` on t.
pub(crate) fn nearest_face_hit<'a>(
    faces: &'a [Polygon],
    ray: &Ray,
    t_min: FloatType,
    t_max: FloatType,
) -> Option<Hit<'a>> {
    let mut nearest: Option<Hit> = None;
    for face in faces {
        if let Some(hit) = face.hit(ray, t_min, t_max) {
            if nearest.as_ref().is_none_or(|n| hit.t < n.t) {
                nearest = Some(hit);
            }
        }
    }
    nearest
}
