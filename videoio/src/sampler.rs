use crate::{Result, SampleConfig, VideoError};
use ffmpeg_next as ffmpeg;
use ffmpeg::software::scaling;
use ffmpeg::util::frame::video::Video;
use image::RgbImage;
use pano_imgproc::fit_width;
use std::path::Path;
use tracing::{debug, warn};

/// Sample a video file into an ordered frame sequence.
///
/// Frames are walked sequentially from index 0; a frame is kept iff its
/// index is a multiple of `frame_step`, and every kept frame passes through
/// the width constraint. Sampling stops at stream exhaustion or once
/// `max_frames` frames were kept. A decoder fault mid-stream ends sampling
/// early without discarding frames already kept. All FFmpeg handles are
/// dropped on every exit path.
pub fn sample_frames<P: AsRef<Path>>(path: P, config: &SampleConfig) -> Result<Vec<RgbImage>> {
    ffmpeg::init().map_err(|e| VideoError::Open(e.to_string()))?;

    let mut ictx =
        ffmpeg::format::input(&path).map_err(|e| VideoError::Open(e.to_string()))?;

    let (stream_index, parameters) = {
        let stream = ictx
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or_else(|| VideoError::Open("no video stream found".to_string()))?;
        (stream.index(), stream.parameters())
    };

    let context = ffmpeg::codec::context::Context::from_parameters(parameters)
        .map_err(|e| VideoError::Decode(e.to_string()))?;
    let mut decoder = context
        .decoder()
        .video()
        .map_err(|e| VideoError::Decode(e.to_string()))?;

    let mut scaler = scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        ffmpeg::format::Pixel::RGB24,
        decoder.width(),
        decoder.height(),
        scaling::Flags::BILINEAR,
    )
    .map_err(|e| VideoError::Decode(e.to_string()))?;

    let mut walk = FrameWalk {
        config,
        frames: Vec::new(),
        index: 0,
    };
    let mut decoded = Video::empty();

    'packets: for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if let Err(e) = decoder.send_packet(&packet) {
            // Unreadable packet: keep what we have, stop walking.
            warn!(error = %e, kept = walk.frames.len(), "decoder fault mid-stream");
            break;
        }
        while decoder.receive_frame(&mut decoded).is_ok() {
            if walk.take(&decoded, &mut scaler) == Step::Stop {
                break 'packets;
            }
        }
    }

    // Drain frames the decoder buffered past the last packet.
    if walk.frames.len() < config.max_frames && decoder.send_eof().is_ok() {
        while decoder.receive_frame(&mut decoded).is_ok() {
            if walk.take(&decoded, &mut scaler) == Step::Stop {
                break;
            }
        }
    }

    debug!(
        kept = walk.frames.len(),
        walked = walk.index,
        step = config.frame_step,
        "video sampling finished"
    );

    if walk.frames.len() < 2 {
        return Err(VideoError::InsufficientFrames {
            got: walk.frames.len(),
        });
    }
    Ok(walk.frames)
}

#[derive(PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

struct FrameWalk<'a> {
    config: &'a SampleConfig,
    frames: Vec<RgbImage>,
    index: u64,
}

impl FrameWalk<'_> {
    fn take(&mut self, decoded: &Video, scaler: &mut scaling::Context) -> Step {
        let keep = self.config.keeps(self.index);
        self.index += 1;

        if keep {
            match to_rgb_image(decoded, scaler) {
                Some(frame) => self.frames.push(fit_width(&frame, self.config.max_width)),
                None => {
                    warn!(index = self.index - 1, "unreadable frame, ending sample walk");
                    return Step::Stop;
                }
            }
        }

        if self.frames.len() >= self.config.max_frames {
            Step::Stop
        } else {
            Step::Continue
        }
    }
}

/// Convert a decoded frame to a dense RGB buffer, honoring the scaler's row
/// stride.
fn to_rgb_image(decoded: &Video, scaler: &mut scaling::Context) -> Option<RgbImage> {
    let mut rgb = Video::empty();
    scaler.run(decoded, &mut rgb).ok()?;

    let width = rgb.width();
    let height = rgb.height();
    let stride = rgb.stride(0);
    let data = rgb.data(0);
    let row_bytes = width as usize * 3;

    let mut buf = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        buf.extend_from_slice(&data[start..start + row_bytes]);
    }

    RgbImage::from_raw(width, height, buf)
}
