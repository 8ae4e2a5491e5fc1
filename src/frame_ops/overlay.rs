//! Debug drawing of tracked boxes into an in-memory bitmap.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use crate::common::BBox;

const STROKE_WIDTH: i32 = 3;

/// Everything needed to draw one tracked object on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub rect: BBox,
    pub corner_size: f32,
    pub color: [u8; 4],
    pub caption: String,
}

pub fn draw_overlay(canvas: &mut RgbaImage, items: &[DrawItem]) {
    for item in items {
        let (x, y, w, h) = item.rect.as_xy_wh_i32();
        for inset in 0..STROKE_WIDTH {
            let (rw, rh) = (w - 2 * inset, h - 2 * inset);
            if rw <= 0 || rh <= 0 {
                break;
            }
            let rect = Rect::at(x + inset, y + inset).of_size(rw as u32, rh as u32);
            draw_hollow_rect_mut(canvas, rect, Rgba(item.color));
        }
    }
}
