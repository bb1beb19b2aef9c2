use nalgebra::Rotation3;

use crate::error::ValidationError;
use crate::geometry::{FloatType, WorldVector};

use super::Primitive;

/// Coordinate axis for [`Primitive::rotated`] and [`Transform`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

pub(crate) fn rotation_about(axis: Axis, angle: FloatType) -> Rotation3<FloatType> {
    let axis = match axis {
        Axis::X => WorldVector::x_axis(),
        Axis::Y => WorldVector::y_axis(),
        Axis::Z => WorldVector::z_axis(),
    };
    Rotation3::from_axis_angle(&axis, angle)
}

/// Declarative bundle of transforms applied to a primitive in a fixed order:
/// translation, then scaling, then rotations about x, y and z. Angles are in
/// radians.
#[derive(Copy, Clone, Debug, Default)]
pub struct Transform {
    pub translate: Option<WorldVector>,
    pub scale: Option<FloatType>,
    pub rotate_x: Option<FloatType>,
    pub rotate_y: Option<FloatType>,
    pub rotate_z: Option<FloatType>,
}

impl Transform {
    pub fn apply(&self, primitive: Primitive) -> Result<Primitive, ValidationError> {
        let mut primitive = primitive;
        if let Some(offset) = self.translate {
            primitive = primitive.translated(&offset)?;
        }
        if let Some(factor) = self.scale {
            primitive = primitive.scaled(factor)?;
        }
        for (axis, angle) in [
            (Axis::X, self.rotate_x),
            (Axis::Y, self.rotate_y),
            (Axis::Z, self.rotate_z),
        ] {
            if let Some(angle) = angle {
                primitive = primitive.rotated(axis, angle)?;
            }
        }
        Ok(primitive)
    }
}
