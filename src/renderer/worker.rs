use rand::{SeedableRng as _, rngs::SmallRng};

use crate::{
    geometry::{FloatType, Ray},
    scene::Scene,
    util::{BLACK, Color, ColorExt as _, WHITE},
};

/// Renders one contiguous column range of the image.
///
/// Each worker owns its RNG and ray tally, so rendering a column touches no
/// shared state at all.
pub struct Worker<'a> {
    scene: &'a Scene,
    rng: SmallRng,
    rays_spawned: u64,
}

impl<'a> Worker<'a> {
    pub fn new(scene: &'a Scene, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Worker {
            scene,
            rng,
            rays_spawned: 0,
        }
    }

    pub fn rays_spawned(&self) -> u64 {
        self.rays_spawned
    }

    /// Fills one column slice; `column[y]` is the pixel at `(x, y)` with the
    /// bottom-left origin of [`crate::image_buffer::PixelBuffer`].
    pub fn render_column(&mut self, x: u32, column: &mut [Color]) {
        for (y, pixel) in column.iter_mut().enumerate() {
            *pixel = self.render_pixel(x, y as u32);
        }
    }

    /// Averages a stratified ssaa × ssaa sub-pixel grid, each cell averaged
    /// over the camera's lens samples, and clamps the result.
    fn render_pixel(&mut self, x: u32, y: u32) -> Color {
        let camera = self.scene.camera();
        let resolution = camera.resolution();
        let ssaa = camera.ssaa_factor();
        let samples = camera.samples_per_ray();

        let mut subpixel_sum = BLACK;
        for i in 0..ssaa {
            for j in 0..ssaa {
                let offset = (
                    i as FloatType / ssaa as FloatType,
                    j as FloatType / ssaa as FloatType,
                );
                let canvas_point = camera.canvas_point(x, y, offset, resolution);
                let focal_point = camera.focal_point(&canvas_point);

                let mut sample_sum = BLACK;
                for _ in 0..samples {
                    let origin = camera.lens_origin(&mut self.rng);
                    let ray = Ray::new(origin, focal_point - origin);
                    sample_sum += self.shade(ray);
                }
                subpixel_sum += sample_sum * (1.0 / samples as FloatType);
            }
        }

        (subpixel_sum * (1.0 / (ssaa * ssaa) as FloatType)).clamped()
    }

    /// Iterative bounce loop: emission is accumulated against the running
    /// throughput until the path escapes, is absorbed, or runs out of bounces.
    fn shade(&mut self, ray: Ray) -> Color {
        let mut color = BLACK;
        let mut throughput = WHITE;
        let mut ray = ray;

        for _ in 0..self.scene.params().max_bounces() {
            self.rays_spawned += 1;
            let Some(hit) = self.scene.trace(&ray) else {
                color += throughput.attenuate(self.scene.params().void_color());
                break;
            };

            color += throughput.attenuate(hit.material.emit());
            match hit.material.sample(&hit, &mut self.rng) {
                Some(scatter) => {
                    throughput = throughput.attenuate(scatter.attenuation);
                    ray = scatter.ray;
                }
                None => break,
            }
        }

        color
    }
}
