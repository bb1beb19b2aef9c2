use std::num::{NonZeroU32, NonZeroUsize};
use std::path::Path;

use anyhow::Context as _;
use indicatif::ProgressBar;

use pathlight::{
    Camera, Material, Mesh, Polygon, Primitive, RenderOptions, RenderParams, Scene, Transform,
    geometry::WorldPoint,
    render_with_progress,
    util::Color,
};

fn main() -> anyhow::Result<()> {
    let camera = Camera::builder()
        .eye(WorldPoint::new(2.5, 2.0, 6.0))
        .canvas_origin(WorldPoint::new(0.0, 0.0, 0.0))
        .canvas_width(5.0)
        .canvas_height(4.0)
        .pixels_per_unit(160.try_into()?)
        .focal_length(8.0)
        .aperture(0.1)
        .ssaa_factor(NonZeroU32::new(2).unwrap())
        .samples_per_ray(NonZeroU32::new(64).unwrap())
        .build()?;

    let mut primitives = demo_primitives()?;
    if let Some(obj_path) = std::env::args().nth(1) {
        let pewter = Material::metal(Color::new(0.7, 0.7, 0.75), 0.3)?;
        let mesh = load_obj_mesh(Path::new(&obj_path), pewter)?;
        let placed = Transform {
            translate: Some(pathlight::geometry::WorldVector::new(2.5, 1.0, -5.0)),
            ..Transform::default()
        }
        .apply(mesh.into())?;
        primitives.push(placed);
    }

    let params = RenderParams::new(
        NonZeroU32::new(8).unwrap(),
        Color::new(0.02, 0.02, 0.05),
        100.0,
    )?;
    let scene = Scene::new(camera, primitives, params);

    let options = RenderOptions {
        threads: NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN),
        seed: None,
    };

    let bar = ProgressBar::no_length();
    let output = render_with_progress(&scene, &options, |progress| {
        bar.update(|state| {
            state.set_len(progress.total as u64);
            state.set_pos(progress.finished as u64);
        });
    })?;
    bar.finish();

    for (key, value) in output.summary.entries() {
        println!("{key}: {value}");
    }

    output
        .buffer
        .gamma_corrected(2.2)
        .to_rgb_image()
        .save("render.png")
        .context("saving render.png")?;

    Ok(())
}

fn demo_primitives() -> anyhow::Result<Vec<Primitive>> {
    use pathlight::geometry::WorldVector;
    use pathlight::{Cone, Cuboid, Cylinder, Plane, Sphere};

    let floor = Plane::new(
        WorldPoint::origin(),
        WorldVector::new(0.0, 1.0, 0.0),
        Material::diffuse(Color::new(0.6, 0.6, 0.6)),
    )?;
    let sky_light = Sphere::new(
        WorldPoint::new(2.5, 14.0, -6.0),
        8.0,
        Material::emissive(Color::new(1.0, 0.98, 0.92), 2.0)?,
    )?;
    let red = Sphere::new(
        WorldPoint::new(1.2, 1.0, -5.0),
        1.0,
        Material::diffuse(Color::new(0.8, 0.15, 0.1)),
    )?;
    let mirror = Sphere::new(
        WorldPoint::new(3.8, 1.0, -6.0),
        1.0,
        Material::metal(Color::new(0.9, 0.9, 0.9), 0.05)?,
    )?;
    let glass = Sphere::new(
        WorldPoint::new(2.5, 0.8, -3.5),
        0.8,
        Material::glass(Color::new(0.95, 0.95, 0.95), 0.0, 1.5)?,
    )?;
    let block = Transform {
        rotate_y: Some(std::f64::consts::FRAC_PI_6),
        ..Transform::default()
    }
    .apply(
        Cuboid::new(
            WorldPoint::new(4.2, 0.0, -4.8),
            WorldPoint::new(5.2, 1.4, -3.8),
            Material::diffuse(Color::new(0.2, 0.6, 0.25)),
        )?
        .into(),
    )?;
    let cone = Cone::new(
        WorldPoint::new(0.6, 0.0, -3.2),
        WorldPoint::new(0.6, 1.5, -3.2),
        0.5,
        Material::diffuse(Color::new(0.15, 0.3, 0.75)),
    )?;
    let pillar = Cylinder::new(
        WorldPoint::new(-0.8, 0.0, -6.5),
        WorldPoint::new(-0.8, 2.2, -6.5),
        0.6,
        Material::metal(Color::new(0.85, 0.7, 0.3), 0.2)?,
    )?;

    Ok(vec![
        floor.into(),
        sky_light.into(),
        red.into(),
        mirror.into(),
        glass.into(),
        block,
        cone.into(),
        pillar.into(),
    ])
}

/// Loads the triangles of an OBJ file into a [`Mesh`].
///
/// Degenerate faces (zero-area triangles some exporters emit) are skipped.
fn load_obj_mesh(path: &Path, material: Material) -> anyhow::Result<Mesh> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let obj_set = wavefront_obj::obj::parse(content)
        .map_err(|e| anyhow::anyhow!("parsing {}: line {}: {}", path.display(), e.line_number, e.message))?;

    let mut faces = Vec::new();
    for object in &obj_set.objects {
        let vertex = |index: wavefront_obj::obj::VTNIndex| {
            let v = object.vertices[index.0];
            WorldPoint::new(v.x, v.y, v.z)
        };
        for geometry in &object.geometry {
            for shape in &geometry.shapes {
                if let wavefront_obj::obj::Primitive::Triangle(a, b, c) = shape.primitive {
                    if let Ok(face) = Polygon::new(vec![vertex(a), vertex(b), vertex(c)], material)
                    {
                        faces.push(face);
                    }
                }
            }
        }
    }

    Ok(Mesh::new(faces)?)
}
