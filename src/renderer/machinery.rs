use std::{
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
    thread,
    time::{Duration, Instant},
};

use crate::{
    error::RenderError,
    image_buffer::PixelBuffer,
    renderer::{RenderOptions, worker::Worker},
    scene::Scene,
    util::group_digits,
};

/// Columns finished so far out of the image total.
#[derive(Copy, Clone, Debug)]
pub struct Progress {
    pub finished: usize,
    pub total: usize,
}

pub struct RenderOutput {
    pub buffer: PixelBuffer,
    pub summary: RenderSummary,
}

/// Statistics of a finished render.
#[derive(Clone, Debug)]
pub struct RenderSummary {
    pub rays_spawned: u64,
    pub elapsed: Duration,
    pub samples_per_ray: u32,
    pub ssaa_factor: u32,
    pub max_bounces: u32,
}

impl RenderSummary {
    /// Key/value view for log lines or image metadata.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rays spawned", group_digits(self.rays_spawned)),
            ("render time", format_hms(self.elapsed)),
            ("samples per ray", self.samples_per_ray.to_string()),
            ("ssaa factor", self.ssaa_factor.to_string()),
            ("max bounces", self.max_bounces.to_string()),
        ]
    }
}

fn format_hms(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

pub fn render(scene: &Scene, options: &RenderOptions) -> Result<RenderOutput, RenderError> {
    render_with_progress(scene, options, |_| {})
}

/// Renders the scene on `options.threads` worker threads.
///
/// The image is split into contiguous column ranges, one per worker. The
/// column-major pixel buffer makes each range a disjoint `chunks_mut` slice,
/// so workers write without locks; a shared atomic tracks finished columns
/// for `on_progress` and another tallies spawned rays for the summary.
pub fn render_with_progress(
    scene: &Scene,
    options: &RenderOptions,
    on_progress: impl Fn(Progress) + Sync,
) -> Result<RenderOutput, RenderError> {
    let start = Instant::now();

    let (width, height) = scene.camera().resolution();
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }

    let mut buffer = PixelBuffer::new(width, height);
    let columns_per_partition = (width as usize).div_ceil(options.threads.get());
    let total_columns = width as usize;
    let columns_done = AtomicUsize::new(0);
    let rays_spawned = AtomicU64::new(0);

    on_progress(Progress {
        finished: 0,
        total: total_columns,
    });

    thread::scope(|scope| -> Result<(), RenderError> {
        let mut handles = Vec::new();
        let partitions = buffer
            .data_mut()
            .chunks_mut(columns_per_partition * height as usize);

        for (index, partition) in partitions.enumerate() {
            let first_column = (index * columns_per_partition) as u32;
            let seed = options
                .seed
                .map(|seed| seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
            let columns_done = &columns_done;
            let rays_spawned = &rays_spawned;
            let on_progress = &on_progress;

            let handle = thread::Builder::new()
                .name(format!("render-worker-{index}"))
                .spawn_scoped(scope, move || {
                    let mut worker = Worker::new(scene, seed);
                    for (offset, column) in
                        partition.chunks_mut(height as usize).enumerate()
                    {
                        worker.render_column(first_column + offset as u32, column);
                        let finished = columns_done.fetch_add(1, Ordering::AcqRel) + 1;
                        on_progress(Progress {
                            finished,
                            total: total_columns,
                        });
                    }
                    rays_spawned.fetch_add(worker.rays_spawned(), Ordering::AcqRel);
                })?;
            handles.push(handle);
        }

        for handle in handles {
            handle.join().map_err(|_| RenderError::WorkerPanicked)?;
        }
        Ok(())
    })?;

    let summary = RenderSummary {
        rays_spawned: rays_spawned.load(Ordering::Acquire),
        elapsed: start.elapsed(),
        samples_per_ray: scene.camera().samples_per_ray(),
        ssaa_factor: scene.camera().ssaa_factor(),
        max_bounces: scene.params().max_bounces(),
    };

    Ok(RenderOutput { buffer, summary })
}
