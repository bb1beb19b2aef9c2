use rand::Rng;
use rand_distr::Distribution as _;

use crate::error::ValidationError;
use crate::geometry::{FloatType, Ray, WorldVector, reflect, refract};
use crate::primitives::Hit;
use crate::util::{BLACK, Color};

/// One BSDF sample: the scattered ray and the color it is attenuated by.
#[derive(Copy, Clone, Debug)]
pub struct ScatterSample {
    pub ray: Ray,
    pub attenuation: Color,
}

/// Closed set of surface materials.
///
/// A material is a pure function of a hit (plus the sampling RNG) to an
/// emission color and an optional scattered sample. All parameters are
/// validated at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Material {
    Diffuse {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        roughness: FloatType,
    },
    Glass {
        albedo: Color,
        roughness: FloatType,
        ior: FloatType,
    },
    Emissive {
        color: Color,
        intensity: FloatType,
    },
}

impl Material {
    pub fn diffuse(albedo: Color) -> Material {
        Material::Diffuse { albedo }
    }

    pub fn metal(albedo: Color, roughness: FloatType) -> Result<Material, ValidationError> {
        if !(0.0..=1.0).contains(&roughness) {
            return Err(ValidationError::RoughnessOutOfRange { value: roughness });
        }
        Ok(Material::Metal { albedo, roughness })
    }

    pub fn glass(
        albedo: Color,
        roughness: FloatType,
        ior: FloatType,
    ) -> Result<Material, ValidationError> {
        if !(0.0..=1.0).contains(&roughness) {
            return Err(ValidationError::RoughnessOutOfRange { value: roughness });
        }
        if ior <= 0.0 {
            return Err(ValidationError::NonPositiveIor { value: ior });
        }
        Ok(Material::Glass {
            albedo,
            roughness,
            ior,
        })
    }

    pub fn emissive(color: Color, intensity: FloatType) -> Result<Material, ValidationError> {
        if intensity < 0.0 {
            return Err(ValidationError::NegativeIntensity { value: intensity });
        }
        Ok(Material::Emissive { color, intensity })
    }

    /// Light emitted at a hit. Black for everything but `Emissive`.
    pub fn emit(&self) -> Color {
        match self {
            Material::Emissive { color, intensity } => *color * *intensity,
            _ => BLACK,
        }
    }

    /// Samples the scattered ray for a hit, or `None` if the path ends here
    /// (pure emitters).
    pub fn sample(&self, hit: &Hit, rng: &mut impl Rng) -> Option<ScatterSample> {
        match self {
            Material::Diffuse { albedo } => Some(sample_diffuse(hit, *albedo, rng)),
            Material::Metal { albedo, roughness } => {
                Some(sample_metal(hit, *albedo, *roughness, rng))
            }
            Material::Glass {
                albedo,
                roughness,
                ior,
            } => Some(sample_glass(hit, *albedo, *roughness, *ior, rng)),
            Material::Emissive { .. } => None,
        }
    }
}

/// Cosine-weighted hemisphere sample around the hit normal: the normal plus a
/// uniform point on the unit sphere.
fn sample_diffuse(hit: &Hit, albedo: Color, rng: &mut impl Rng) -> ScatterSample {
    let normal = hit.normal.into_inner();
    let mut direction = normal + unit_sphere_vector(rng);

    // The sphere sample can cancel the normal almost exactly.
    if direction.norm_squared() < 1e-12 {
        direction = normal;
    }

    ScatterSample {
        ray: Ray::new(hit.point, direction),
        attenuation: albedo,
    }
}

fn sample_metal(hit: &Hit, albedo: Color, roughness: FloatType, rng: &mut impl Rng) -> ScatterSample {
    let normal = hit.normal.into_inner();
    let mut reflected = reflect(&hit.ray.direction, &normal);

    if roughness > 0.0 {
        reflected += in_ball_vector(roughness, rng);
    }

    ScatterSample {
        ray: Ray::new(hit.point, reflected),
        attenuation: albedo,
    }
}

fn sample_glass(
    hit: &Hit,
    albedo: Color,
    roughness: FloatType,
    ior: FloatType,
    rng: &mut impl Rng,
) -> ScatterSample {
    let direction = hit.ray.direction;
    let mut normal = hit.normal.into_inner();

    // Entering or exiting the medium decides the refraction ratio; on exit the
    // normal has to face the inside.
    let refraction_ratio = if direction.dot(&normal) < 0.0 {
        1.0 / ior
    } else {
        normal = -normal;
        ior
    };

    let cos_theta = (-direction).dot(&normal).min(1.0);
    let mut scattered = match refract(&direction, &normal, refraction_ratio) {
        Some(refracted) if rng.random::<FloatType>() >= schlick(cos_theta, refraction_ratio) => {
            refracted
        }
        // Total internal reflection, or the Fresnel coin toss chose reflection.
        _ => reflect(&direction, &normal),
    };

    if roughness > 0.0 {
        scattered += in_ball_vector(roughness, rng);
    }

    ScatterSample {
        ray: Ray::new(hit.point, scattered),
        attenuation: albedo,
    }
}

/// Schlick's approximation of the Fresnel reflectance.
fn schlick(cos_theta: FloatType, refraction_ratio: FloatType) -> FloatType {
    let mut r0 = (1.0 - refraction_ratio) / (1.0 + refraction_ratio);
    r0 *= r0;
    r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5)
}

fn unit_sphere_vector(rng: &mut impl Rng) -> WorldVector {
    let [x, y, z]: [FloatType; 3] = rand_distr::UnitSphere.sample(rng);
    WorldVector::new(x, y, z)
}

fn in_ball_vector(radius: FloatType, rng: &mut impl Rng) -> WorldVector {
    let [x, y, z]: [FloatType; 3] = rand_distr::UnitBall.sample(rng);
    WorldVector::new(x, y, z) * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{EPSILON, UnitVector, WorldPoint};
    use crate::util::WHITE;
    use assert2::assert;
    use rand::SeedableRng as _;
    use rand::rngs::SmallRng;
    use test_case::test_case;

    fn test_hit<'a>(
        ray_direction: WorldVector,
        normal: WorldVector,
        material: &'a Material,
    ) -> Hit<'a> {
        let ray = Ray::new(WorldPoint::new(0.0, 0.0, 1.0), ray_direction);
        Hit {
            point: WorldPoint::origin(),
            normal: UnitVector::new_normalize(normal),
            ray,
            t: 1.0,
            material,
        }
    }

    #[test_case(-0.1 ; "below range")]
    #[test_case(1.1 ; "above range")]
    fn metal_rejects_roughness(roughness: f64) {
        let result = Material::metal(WHITE, roughness);
        assert!(result == Err(ValidationError::RoughnessOutOfRange { value: roughness }));
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-1.4 ; "negative")]
    fn glass_rejects_ior(ior: f64) {
        let result = Material::glass(WHITE, 0.0, ior);
        assert!(result == Err(ValidationError::NonPositiveIor { value: ior }));
    }

    #[test]
    fn emissive_rejects_negative_intensity() {
        let result = Material::emissive(WHITE, -1.0);
        assert!(result == Err(ValidationError::NegativeIntensity { value: -1.0 }));
    }

    #[test]
    fn emissive_ends_the_path_and_scales_its_color() {
        let material = Material::emissive(Color::new(1.0, 0.5, 0.0), 2.0).unwrap();
        let hit = test_hit(
            WorldVector::new(0.0, 0.0, -1.0),
            WorldVector::new(0.0, 0.0, 1.0),
            &material,
        );
        let mut rng = SmallRng::seed_from_u64(1);

        assert!(material.sample(&hit, &mut rng).is_none());
        assert!(material.emit() == Color::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn diffuse_scatters_into_the_upper_hemisphere() {
        let material = Material::diffuse(Color::new(0.8, 0.1, 0.1));
        let normal = WorldVector::new(0.0, 0.0, 1.0);
        let hit = test_hit(WorldVector::new(0.0, 0.0, -1.0), normal, &material);
        let mut rng = SmallRng::seed_from_u64(2);

        for _ in 0..200 {
            let sample = material.sample(&hit, &mut rng).unwrap();
            assert!(sample.ray.direction.dot(&normal) >= 0.0);
            assert!(sample.attenuation == Color::new(0.8, 0.1, 0.1));
        }
    }

    #[test]
    fn smooth_metal_reflects_exactly() {
        let material = Material::metal(WHITE, 0.0).unwrap();
        let hit = test_hit(
            WorldVector::new(1.0, 0.0, -1.0),
            WorldVector::new(0.0, 0.0, 1.0),
            &material,
        );
        let mut rng = SmallRng::seed_from_u64(3);

        let sample = material.sample(&hit, &mut rng).unwrap();
        let expected = WorldVector::new(1.0, 0.0, 1.0).normalize();
        assert!((sample.ray.direction - expected).norm() < 1e-12);
    }

    #[test]
    fn rough_metal_stays_near_the_mirror_direction() {
        let material = Material::metal(WHITE, 0.2).unwrap();
        let hit = test_hit(
            WorldVector::new(1.0, 0.0, -1.0),
            WorldVector::new(0.0, 0.0, 1.0),
            &material,
        );
        let mirror = WorldVector::new(1.0, 0.0, 1.0).normalize();
        let mut rng = SmallRng::seed_from_u64(4);

        for _ in 0..100 {
            let sample = material.sample(&hit, &mut rng).unwrap();
            // Perturbation radius 0.2 around a unit mirror vector.
            assert!((sample.ray.direction.normalize() - mirror).norm() < 0.5);
        }
    }

    #[test]
    fn schlick_at_normal_incidence_matches_the_closed_form() {
        let ior: FloatType = 1.5;
        let expected = ((1.0 - ior) / (1.0 + ior)).powi(2);
        assert!((schlick(1.0, 1.0 / ior) - expected).abs() < 1e-12);
        assert!((schlick(1.0, ior) - expected).abs() < 1e-12);
    }

    #[test]
    fn glass_at_normal_incidence_scatters_along_the_normal() {
        let material = Material::glass(WHITE, 0.0, 1.5).unwrap();
        let normal = WorldVector::new(0.0, 0.0, 1.0);
        let hit = test_hit(WorldVector::new(0.0, 0.0, -1.0), normal, &material);
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..50 {
            let sample = material.sample(&hit, &mut rng).unwrap();
            // Either refracted straight through or reflected straight back.
            assert!(sample.ray.direction.dot(&normal).abs() > 1.0 - EPSILON);
        }
    }

    #[test]
    fn glass_exiting_uses_the_inverted_normal() {
        let material = Material::glass(WHITE, 0.0, 1.5).unwrap();
        // Ray travelling along the outward normal, i.e. leaving the medium.
        let normal = WorldVector::new(0.0, 0.0, 1.0);
        let hit = test_hit(WorldVector::new(0.0, 0.0, 1.0), normal, &material);
        let mut rng = SmallRng::seed_from_u64(6);

        let sample = material.sample(&hit, &mut rng).unwrap();
        assert!(sample.ray.direction.dot(&normal).abs() > 1.0 - EPSILON);
    }
}
