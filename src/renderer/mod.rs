mod machinery;
mod worker;

pub use machinery::{Progress, RenderOutput, RenderSummary, render, render_with_progress};

use std::num::NonZeroUsize;

/// Scheduling knobs for one render invocation.
#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    pub threads: NonZeroUsize,
    /// Base seed for the per-worker RNGs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            threads: NonZeroUsize::MIN,
            seed: None,
        }
    }
}
