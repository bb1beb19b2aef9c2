mod cone;
mod cuboid;
mod cylinder;
mod disk;
mod mesh;
mod plane;
mod polygon;
mod sphere;
mod transform;
mod triangle;

pub use cone::Cone;
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use disk::Disk;
pub use mesh::Mesh;
pub use plane::Plane;
pub use polygon::Polygon;
pub use sphere::Sphere;
pub use transform::{Axis, Transform};
pub use triangle::Triangle;

use crate::error::ValidationError;
use crate::geometry::{FloatType, Ray, UnitVector, WorldPoint, WorldVector};
use crate::materials::Material;

/// A ray-surface intersection.
///
/// Planar primitives flip the normal to oppose the ray; volumetric surfaces
/// (sphere, cylinder and cone mantles) keep the geometric outward normal so
/// that dielectrics can tell entering from exiting by its sign.
#[derive(Copy, Clone, Debug)]
pub struct Hit<'a> {
    pub point: WorldPoint,
    pub normal: UnitVector,
    /// The ray that produced this hit.
    pub ray: Ray,
    /// Parametric distance along the ray.
    pub t: FloatType,
    pub material: &'a Material,
}

/// Closed set of renderable primitives, dispatched by `match`.
///
/// Primitives are immutable once constructed; geometric transforms are pure
/// functions producing new values (see [`Transform`]).
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Disk(Disk),
    Triangle(Triangle),
    Polygon(Polygon),
    Cuboid(Cuboid),
    Cylinder(Cylinder),
    Cone(Cone),
    Mesh(Mesh),
}

impl Primitive {
    /// Nearest intersection with parametric distance in `(t_min, t_max]`.
    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, t_min, t_max),
            Primitive::Plane(p) => p.hit(ray, t_min, t_max),
            Primitive::Disk(d) => d.hit(ray, t_min, t_max),
            Primitive::Triangle(t) => t.hit(ray, t_min, t_max),
            Primitive::Polygon(p) => p.hit(ray, t_min, t_max),
            Primitive::Cuboid(c) => c.hit(ray, t_min, t_max),
            Primitive::Cylinder(c) => c.hit(ray, t_min, t_max),
            Primitive::Cone(c) => c.hit(ray, t_min, t_max),
            Primitive::Mesh(m) => m.hit(ray, t_min, t_max),
        }
    }

    /// Surface membership test with tolerance [`crate::geometry::EPSILON`].
    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        match self {
            Primitive::Sphere(s) => s.contains_point(point),
            Primitive::Plane(p) => p.contains_point(point),
            Primitive::Disk(d) => d.contains_point(point),
            Primitive::Triangle(t) => t.contains_point(point),
            Primitive::Polygon(p) => p.contains_point(point),
            Primitive::Cuboid(c) => c.contains_point(point),
            Primitive::Cylinder(c) => c.contains_point(point),
            Primitive::Cone(c) => c.contains_point(point),
            Primitive::Mesh(m) => m.contains_point(point),
        }
    }

    pub fn translated(&self, offset: &WorldVector) -> Result<Primitive, ValidationError> {
        Ok(match self {
            Primitive::Sphere(s) => s.translated(offset).into(),
            Primitive::Plane(p) => p.translated(offset).into(),
            Primitive::Disk(d) => d.translated(offset).into(),
            Primitive::Triangle(t) => t.translated(offset)?.into(),
            Primitive::Polygon(p) => p.translated(offset)?.into(),
            Primitive::Cuboid(c) => c.translated(offset)?.into(),
            Primitive::Cylinder(c) => c.translated(offset)?.into(),
            Primitive::Cone(c) => c.translated(offset)?.into(),
            Primitive::Mesh(m) => m.translated(offset)?.into(),
        })
    }

    /// Uniform scale about the primitive's own geometric center.
    pub fn scaled(&self, factor: FloatType) -> Result<Primitive, ValidationError> {
        if factor <= 0.0 {
            return Err(ValidationError::NonPositiveScale { value: factor });
        }
        Ok(match self {
            Primitive::Sphere(s) => s.scaled(factor).into(),
            Primitive::Plane(p) => p.clone().into(),
            Primitive::Disk(d) => d.scaled(factor).into(),
            Primitive::Triangle(t) => t.scaled(factor)?.into(),
            Primitive::Polygon(p) => p.scaled(factor)?.into(),
            Primitive::Cuboid(c) => c.scaled(factor)?.into(),
            Primitive::Cylinder(c) => c.scaled(factor)?.into(),
            Primitive::Cone(c) => c.scaled(factor)?.into(),
            Primitive::Mesh(m) => m.scaled(factor)?.into(),
        })
    }

    /// Rotation about one coordinate axis, pivoting around the primitive's
    /// own geometric center. `angle` is in radians.
    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Result<Primitive, ValidationError> {
        Ok(match self {
            Primitive::Sphere(s) => s.clone().into(),
            Primitive::Plane(p) => p.rotated(axis, angle).into(),
            Primitive::Disk(d) => d.rotated(axis, angle).into(),
            Primitive::Triangle(t) => t.rotated(axis, angle)?.into(),
            Primitive::Polygon(p) => p.rotated(axis, angle)?.into(),
            Primitive::Cuboid(c) => c.rotated(axis, angle)?.into(),
            Primitive::Cylinder(c) => c.rotated(axis, angle)?.into(),
            Primitive::Cone(c) => c.rotated(axis, angle)?.into(),
            Primitive::Mesh(m) => m.rotated(axis, angle)?.into(),
        })
    }
}

macro_rules! primitive_from {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Primitive {
                fn from(value: $variant) -> Primitive {
                    Primitive::$variant(value)
                }
            }
        )+
    };
}

primitive_from!(Sphere, Plane, Disk, Triangle, Polygon, Cuboid, Cylinder, Cone, Mesh);
