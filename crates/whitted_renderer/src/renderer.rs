//! Parallel render scheduling.
//!
//! Every pixel is an independent task run on a fixed-size rayon pool.
//! Results come back in raster order regardless of which worker finished
//! first, so a scene always renders to the same image.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::sampler::render_pixel;
use crate::{Color, RenderError, RenderResult, Scene, Viewport};
use whitted_math::Interval;

/// The pool never runs with fewer workers than this.
pub const MIN_WORKERS: usize = 2;

/// Receives human-readable progress messages at render checkpoints.
pub trait RenderLog {
    fn log(&self, message: &str);
}

impl<F: Fn(&str)> RenderLog for F {
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Forwards progress messages to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl RenderLog for LogSink {
    fn log(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Output size and projection of one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub width: u32,
    pub height: u32,
    /// World-space width of the camera's view plane
    pub view_plane_width: f32,
    /// Worker count override; `None` uses the available parallelism
    pub threads: Option<usize>,
}

impl RenderRequest {
    pub fn new(width: u32, height: u32, view_plane_width: f32) -> Self {
        Self {
            width,
            height,
            view_plane_width,
            threads: None,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if !self.view_plane_width.is_finite() || self.view_plane_width <= 0.0 {
            return Err(RenderError::InvalidViewPlane(self.view_plane_width));
        }
        Ok(())
    }
}

/// Number of workers for a render: the override or the detected
/// parallelism, never below [`MIN_WORKERS`].
pub fn worker_count(requested: Option<usize>) -> usize {
    requested
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
        .max(MIN_WORKERS)
}

/// Render the scene. Blocks until every pixel is resolved or one fails.
pub fn render(scene: &Scene, request: &RenderRequest, sink: &dyn RenderLog) -> RenderResult<RgbImage> {
    let interrupt = AtomicBool::new(false);
    render_cancellable(scene, request, sink, &interrupt)
}

/// Render the scene, aborting with [`RenderError::Interrupted`] once
/// `interrupt` is raised.
///
/// Pixel tasks check the flag before they start; in-flight tasks finish
/// their pixel. Any failing task aborts the whole render and no partial
/// image is returned.
pub fn render_cancellable(
    scene: &Scene,
    request: &RenderRequest,
    sink: &dyn RenderLog,
    interrupt: &AtomicBool,
) -> RenderResult<RgbImage> {
    request.validate()?;

    let (width, height) = (request.width, request.height);
    let viewport = scene.camera().view(width, height, request.view_plane_width);

    let threads = worker_count(request.threads);
    sink.log(&format!(
        "Initialize worker pool. Using {} threads to render {}",
        threads,
        scene.name()
    ));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("whitted-worker-{}", i))
        .build()?;

    let pixel_count = width as usize * height as usize;
    let ray_count = pixel_count as u64 * u64::from(scene.settings().samples_per_pixel());
    sink.log(&format!("Starting to shoot {} rays over {}", ray_count, scene.name()));
    log::debug!(
        "Rendering {}x{} with view plane width {} and settings {:?}",
        width,
        height,
        request.view_plane_width,
        scene.settings()
    );

    let colors: RenderResult<Vec<Color>> = pool.install(|| {
        (0..pixel_count)
            .into_par_iter()
            .map(|index| {
                let x = (index % width as usize) as u32;
                let y = (index / width as usize) as u32;
                pixel_task(scene, &viewport, x, y, interrupt)
            })
            .collect()
    });

    // Rayon dispatches and joins in one step, so dispatch is only known to
    // be complete once every task has resolved. Logged before the result is
    // checked so a failed render still reports it.
    sink.log("Done shooting rays.");
    let colors = colors?;

    let mut image = RgbImage::new(width, height);
    for (index, color) in colors.into_iter().enumerate() {
        let x = (index % width as usize) as u32;
        let y = (index / width as usize) as u32;
        image.put_pixel(x, y, Rgb(color_to_rgb(color)));
    }

    sink.log(&format!("Ray tracing of {} has been completed.", scene.name()));
    Ok(image)
}

/// One pixel's work unit: sample, average and check the result.
fn pixel_task(
    scene: &Scene,
    viewport: &Viewport,
    x: u32,
    y: u32,
    interrupt: &AtomicBool,
) -> RenderResult<Color> {
    if interrupt.load(Ordering::Relaxed) {
        return Err(RenderError::Interrupted);
    }

    let color = panic::catch_unwind(AssertUnwindSafe(|| render_pixel(scene, viewport, x, y)))
        .map_err(|payload| RenderError::TaskPanicked {
            x,
            y,
            message: panic_message(payload.as_ref()),
        })?;

    if !color.is_finite() {
        return Err(RenderError::NonFiniteColor { x, y });
    }
    Ok(color)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("unknown panic")
    }
}

/// Clamp a channel to [0, 1] and quantize it to 8 bits.
#[inline]
fn channel_to_u8(value: f32) -> u8 {
    (Interval::UNIT.clamp(value) * 255.0).round() as u8
}

/// Convert an accumulated color to an 8-bit RGB triple.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
    ]
}
