#![allow(dead_code)]

use sight_speak::common::{Detection, PixelFrame};

/// NV21 frame where every pixel carries the same `(y, u, v)` sample.
pub fn flat_nv21(width: u32, height: u32, y: u8, u: u8, v: u8) -> PixelFrame {
    let y_size = (width * height) as usize;
    let uv_pairs = (((width + 1) / 2) * ((height + 1) / 2)) as usize;

    let mut data = vec![y; y_size];
    for _ in 0..uv_pairs {
        data.push(v);
        data.push(u);
    }
    PixelFrame::semi_planar(width, height, data)
}

/// The same flat sample laid out as three tightly packed planes.
pub fn flat_planar(width: u32, height: u32, y: u8, u: u8, v: u8) -> PixelFrame {
    let uv_width = ((width + 1) / 2) as usize;
    let uv_height = ((height + 1) / 2) as usize;
    PixelFrame::planar(width, height,
                       vec![y; (width * height) as usize],
                       vec![u; uv_width * uv_height],
                       vec![v; uv_width * uv_height],
                       width as usize, uv_width, 1)
}

/// Luma ramp with neutral chroma, so neighbouring pixels differ.
pub fn ramp_nv21(width: u32, height: u32) -> PixelFrame {
    let mut frame = flat_nv21(width, height, 0, 128, 128);
    for (i, px) in frame.planes[0].iter_mut().take((width * height) as usize).enumerate() {
        *px = (16 + i % 220) as u8;
    }
    frame
}

pub fn boxed(label: &str, confidence: f32, x: f32, y: f32, w: f32, h: f32) -> Detection {
    Detection::new(None, label, confidence).with_x1y1_wh(x, y, w, h)
}
