//! Preparing the detector's square input and mapping its results back.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use crate::common::Detection;
use crate::frame_ops::Transform;

/// Draws `frame` into a `crop_width x crop_height` bitmap through
/// `frame_to_crop`, sampling nearest neighbours by inverse mapping.
///
/// Crop pixels falling outside the frame stay transparent black.
pub fn warp_to_crop(frame: &RgbaImage, frame_to_crop: &Transform, crop_width: u32, crop_height: u32) -> RgbaImage {
    assert!(crop_width > 0 && crop_height > 0, "Invalid crop size {}x{}", crop_width, crop_height);

    let mut crop = RgbaImage::new(crop_width, crop_height);
    let Some(crop_to_frame) = frame_to_crop.invert() else {
        log::warn!("Frame to crop transform is singular, leaving crop empty");
        return crop;
    };

    let (src_width, src_height) = frame.dimensions();
    let row_len = crop_width as usize * 4;

    crop.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(dst_y, row)| {
            for (dst_x, px) in row.chunks_exact_mut(4).enumerate() {
                // sample at the pixel center
                let (sx, sy) = crop_to_frame.map_point(dst_x as f32 + 0.5, dst_y as f32 + 0.5);
                let (sx, sy) = (sx.floor(), sy.floor());
                if sx < 0.0 || sy < 0.0 || sx >= src_width as f32 || sy >= src_height as f32 {
                    continue;
                }
                let Rgba(value) = *frame.get_pixel(sx as u32, sy as u32);
                px.copy_from_slice(&value);
            }
        });

    crop
}

/// Keeps detections that have geometry and reach `min_confidence`, moving
/// their boxes from detector-input coordinates into frame coordinates.
pub fn map_recognitions(results: &[Detection], crop_to_frame: &Transform, min_confidence: f32) -> Vec<Detection> {
    results
        .iter()
        .filter(|result| result.confidence >= min_confidence)
        .filter_map(|result| {
            let location = result.bbox.as_ref()?;
            let mut mapped = result.clone();
            mapped.bbox = Some(crop_to_frame.map_rect(location));
            Some(mapped)
        })
        .collect()
}
