use image::Rgba;

/// Box colors handed out to tracked objects, in assignment order.
pub const PALETTE: [Rgba<u8>; 15] = [
    Rgba([0, 0, 255, 255]),       // blue
    Rgba([255, 0, 0, 255]),       // red
    Rgba([0, 255, 0, 255]),       // green
    Rgba([255, 255, 0, 255]),     // yellow
    Rgba([0, 255, 255, 255]),     // cyan
    Rgba([255, 0, 255, 255]),     // magenta
    Rgba([255, 255, 255, 255]),   // white
    Rgba([0x55, 0xFF, 0x55, 255]),
    Rgba([0xFF, 0xA5, 0x00, 255]),
    Rgba([0xFF, 0x88, 0x88, 255]),
    Rgba([0xAA, 0xAA, 0xFF, 255]),
    Rgba([0xFF, 0xFF, 0xAA, 255]),
    Rgba([0x55, 0xAA, 0xAA, 255]),
    Rgba([0xAA, 0x33, 0xAA, 255]),
    Rgba([0x0D, 0x00, 0x68, 255]),
];

pub fn color_at(index: usize) -> Rgba<u8> {
    PALETTE[index % PALETTE.len()]
}
