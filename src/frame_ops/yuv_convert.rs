//! Sensor YUV420 to packed ARGB conversion.
//!
//! Integer only: the luma/chroma coefficients are pre-multiplied by 1024 and
//! the accumulated channel values are clamped to `2^18 - 1` before they are
//! shifted down into 8 bit channels.

use std::path::Path;
use anyhow::Context;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use crate::common::{PixelFormat, PixelFrame};
use crate::data::ensure_parent;

/// `2^18 - 1`, upper bound of a channel before it is normalized to 8 bits.
pub const MAX_CHANNEL_VALUE: i32 = 262143;

/// Bytes taken by a semi-planar YUV420 frame of the given dimensions.
///
/// Odd dimensions round the chroma plane up, every 2x2 block needs one U and one V byte.
pub fn yuv_byte_size(width: u32, height: u32) -> usize {
    let y_size = width as usize * height as usize;
    let uv_size = ((width as usize + 1) / 2) * ((height as usize + 1) / 2) * 2;
    y_size + uv_size
}

/// Converts one sample to an opaque `0xAARRGGBB` pixel.
#[inline]
pub fn yuv_to_argb(y: i32, u: i32, v: i32) -> u32 {
    let y = (y - 16).max(0);
    let u = u - 128;
    let v = v - 128;

    // 1.164 * 1024, 1.596 * 1024, 0.813 * 1024, 0.391 * 1024, 2.018 * 1024
    let y1192 = 1192 * y;
    let r = (y1192 + 1634 * v).clamp(0, MAX_CHANNEL_VALUE);
    let g = (y1192 - 833 * v - 400 * u).clamp(0, MAX_CHANNEL_VALUE);
    let b = (y1192 + 2066 * u).clamp(0, MAX_CHANNEL_VALUE);

    0xff000000 | (((r << 6) & 0xff0000) as u32) | (((g >> 2) & 0xff00) as u32) | (((b >> 10) & 0xff) as u32)
}

/// Converts an NV21 buffer (Y plane, then interleaved V/U pairs).
///
/// Panics when `input` is shorter than [`yuv_byte_size`] or `output` holds
/// fewer than `width * height` pixels.
pub fn convert_yuv420sp_to_argb8888(input: &[u8], width: u32, height: u32, output: &mut [u32]) {
    assert!(width > 0 && height > 0, "Invalid frame size {}x{}", width, height);
    let frame_size = width as usize * height as usize;
    assert!(output.len() >= frame_size, "Output buffer too small: got {}, expected {}", output.len(), frame_size);
    assert!(input.len() >= yuv_byte_size(width, height),
            "YUV420SP buffer too small: got {}, expected {}", input.len(), yuv_byte_size(width, height));

    let width = width as usize;
    let uv_row_len = ((width + 1) / 2) * 2;
    let (luma, chroma) = input.split_at(frame_size);

    output[..frame_size]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(j, row)| {
            let y_row = &luma[j * width..(j + 1) * width];
            let uv_row = &chroma[(j >> 1) * uv_row_len..];
            for (i, px) in row.iter_mut().enumerate() {
                let uvp = i & !1;
                let v = uv_row[uvp] as i32;
                let u = uv_row[uvp + 1] as i32;
                *px = yuv_to_argb(y_row[i] as i32, u, v);
            }
        });
}

/// Converts three separate planes with explicit strides.
///
/// Works for tightly packed planes as well as padded HAL buffers where
/// `uv_pixel_stride` is 2 (U and V planes aliasing one interleaved buffer).
#[allow(clippy::too_many_arguments)]
pub fn convert_yuv420_to_argb8888(y_data: &[u8], u_data: &[u8], v_data: &[u8],
                                  width: u32, height: u32,
                                  y_row_stride: usize, uv_row_stride: usize, uv_pixel_stride: usize,
                                  output: &mut [u32]) {
    assert!(width > 0 && height > 0, "Invalid frame size {}x{}", width, height);
    let frame_size = width as usize * height as usize;
    assert!(output.len() >= frame_size, "Output buffer too small: got {}, expected {}", output.len(), frame_size);

    let y_needed = y_row_stride * (height as usize - 1) + width as usize;
    assert!(y_row_stride >= width as usize, "Y row stride {} below width {}", y_row_stride, width);
    assert!(y_data.len() >= y_needed, "Y plane too small: got {}, expected {}", y_data.len(), y_needed);

    let uv_needed = uv_row_stride * ((height as usize - 1) >> 1) + ((width as usize - 1) >> 1) * uv_pixel_stride + 1;
    assert!(u_data.len() >= uv_needed, "U plane too small: got {}, expected {}", u_data.len(), uv_needed);
    assert!(v_data.len() >= uv_needed, "V plane too small: got {}, expected {}", v_data.len(), uv_needed);

    let width = width as usize;
    output[..frame_size]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(j, row)| {
            let p_y = y_row_stride * j;
            let p_uv = uv_row_stride * (j >> 1);
            for (i, px) in row.iter_mut().enumerate() {
                let uv_offset = p_uv + (i >> 1) * uv_pixel_stride;
                *px = yuv_to_argb(y_data[p_y + i] as i32, u_data[uv_offset] as i32, v_data[uv_offset] as i32);
            }
        });
}

/// Converts `frame` into `output`, dispatching on its pixel format.
pub fn convert_into(frame: &PixelFrame, output: &mut [u32]) {
    match frame.format {
        PixelFormat::Yuv420SemiPlanar => {
            assert_eq!(frame.planes.len(), 1, "Semi-planar frames carry exactly one plane");
            convert_yuv420sp_to_argb8888(&frame.planes[0], frame.width, frame.height, output);
        }
        PixelFormat::Yuv420Planar { y_row_stride, uv_row_stride, uv_pixel_stride } => {
            assert_eq!(frame.planes.len(), 3, "Planar frames carry Y, U and V planes");
            convert_yuv420_to_argb8888(&frame.planes[0], &frame.planes[1], &frame.planes[2],
                                       frame.width, frame.height,
                                       y_row_stride, uv_row_stride, uv_pixel_stride,
                                       output);
        }
    }
}

/// Allocating variant of [`convert_into`].
pub fn convert(frame: &PixelFrame) -> Vec<u32> {
    let mut output = vec![0u32; frame.pixel_count()];
    convert_into(frame, &mut output);
    output
}

/// Unpacks `0xAARRGGBB` pixels into an [`RgbaImage`].
pub fn to_rgba_image(pixels: &[u32], width: u32, height: u32) -> RgbaImage {
    let frame_size = width as usize * height as usize;
    assert!(pixels.len() >= frame_size, "Pixel buffer too small: got {}, expected {}", pixels.len(), frame_size);

    let width_us = width as usize;
    RgbaImage::from_fn(width, height, |x, y| {
        let [a, r, g, b] = pixels[y as usize * width_us + x as usize].to_be_bytes();
        Rgba([r, g, b, a])
    })
}

/// Writes a bitmap to disk for inspection, e.g. the exact detector input.
pub fn save_bitmap<P: AsRef<Path>>(image: &RgbaImage, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    log::info!("Saving {}x{} bitmap to {}", image.width(), image.height(), path.display());
    ensure_parent(path)?;
    image.save(path)
        .with_context(|| format!("Failed to save bitmap to {}", path.display()))?;
    Ok(())
}
