// Off-thread media decoding for the modal: GIF frames plus their delays.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Delay, ImageFormat};
use tracing::debug;

/// Upper bound on decoded frames per item.
pub const MAX_FRAMES: usize = 600;
/// Upper bound on decoded RGBA bytes per item. Longer animations are cut short.
pub const MAX_DECODED_BYTES: usize = 192 * 1024 * 1024;

/// Browsers treat near-zero GIF delays as 100 ms; so do we.
const MIN_FRAME_DELAY: Duration = Duration::from_millis(20);
const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// One decoded RGBA frame.
pub struct FrameData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_frames: usize,
    pub max_bytes: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_frames: MAX_FRAMES,
            max_bytes: MAX_DECODED_BYTES,
        }
    }
}

/// Decode every frame of a GIF within `limits`, or the single frame of a still image.
///
/// `is_stale` is polled between frames; once it returns true decoding stops
/// and `Ok(None)` is returned. The first frame is always kept, even when it
/// alone exceeds the byte budget.
pub fn decode_frames(
    path: &Path,
    limits: DecodeLimits,
    is_stale: &dyn Fn() -> bool,
) -> Result<Option<Vec<FrameData>>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read media: {:?}", path))?;
    let format = image::guess_format(&bytes).ok();

    if format == Some(ImageFormat::Gif) {
        let decoder = GifDecoder::new(Cursor::new(bytes))
            .with_context(|| format!("Failed to decode GIF: {:?}", path))?;
        let mut frames: Vec<FrameData> = Vec::new();
        let mut total_bytes = 0usize;
        for frame in decoder.into_frames().take(limits.max_frames.max(1)) {
            if is_stale() {
                return Ok(None);
            }
            let frame = frame.context("Failed to decode GIF frame")?;
            let delay = frame_delay(frame.delay());
            let buffer = frame.into_buffer();
            let frame_bytes = buffer.as_raw().len();
            if !frames.is_empty() && total_bytes + frame_bytes > limits.max_bytes {
                debug!(
                    path = %path.display(),
                    frames = frames.len(),
                    "Decoded byte budget reached, truncating animation"
                );
                break;
            }
            total_bytes += frame_bytes;
            frames.push(FrameData {
                width: buffer.width(),
                height: buffer.height(),
                pixels: buffer.into_raw(),
                delay,
            });
        }
        if frames.is_empty() {
            return Err(anyhow!("GIF has no frames: {:?}", path));
        }
        return Ok(Some(frames));
    }

    let image = match format {
        Some(fmt) => image::load_from_memory_with_format(&bytes, fmt),
        None => image::load_from_memory(&bytes),
    }
    .with_context(|| format!("Failed to decode image: {:?}", path))?
    .to_rgba8();

    Ok(Some(vec![FrameData {
        width: image.width(),
        height: image.height(),
        pixels: image.into_raw(),
        delay: Duration::ZERO,
    }]))
}

/// A decode request for the worker, tagged with the generation it belongs to.
pub struct MediaRequest {
    pub generation: u64,
    pub path: PathBuf,
}

/// Result of an off-thread decode, tagged with the request generation.
pub struct MediaLoad {
    pub generation: u64,
    pub path: PathBuf,
    pub result: Result<Vec<FrameData>, String>,
}

/// Start the single decode worker.
///
/// Queued requests are coalesced to the newest one, and work for a
/// generation other than the current value of `generation` is abandoned.
/// The worker exits once either channel is closed.
pub fn spawn_decode_worker(
    requests: async_channel::Receiver<MediaRequest>,
    results: async_channel::Sender<MediaLoad>,
    generation: Arc<AtomicU64>,
    limits: DecodeLimits,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while let Ok(mut request) = requests.recv_blocking() {
            while let Ok(newer) = requests.try_recv() {
                request = newer;
            }

            let is_stale = || request.generation != generation.load(Ordering::Acquire);
            if is_stale() {
                continue;
            }

            let result = match decode_frames(&request.path, limits, &is_stale) {
                Ok(Some(frames)) => Ok(frames),
                Ok(None) => {
                    debug!(path = %request.path.display(), "Abandoned stale decode");
                    continue;
                }
                Err(err) => Err(format!("{:#}", err)),
            };
            if is_stale() {
                continue;
            }

            let load = MediaLoad {
                generation: request.generation,
                path: request.path,
                result,
            };
            if results.send_blocking(load).is_err() {
                break;
            }
        }
    })
}

fn frame_delay(delay: Delay) -> Duration {
    let (numer, denom) = delay.numer_denom_ms();
    let millis = if denom == 0 { 0 } else { numer / denom };
    let delay = Duration::from_millis(u64::from(millis));
    if delay < MIN_FRAME_DELAY {
        DEFAULT_FRAME_DELAY
    } else {
        delay
    }
}

/// Metadata line shown under the modal title.
pub fn dimensions_label(width: u32, height: u32) -> String {
    format!("Dimensions: {} \u{00d7} {} px", width, height)
}
