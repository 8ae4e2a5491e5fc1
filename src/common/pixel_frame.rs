/// Chroma layout of a sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Luma plane followed by one interleaved V/U plane (NV21), 2x2 subsampled.
    Yuv420SemiPlanar,
    /// Separate Y, U and V planes with explicit strides, as handed out by
    /// camera HALs that pad their rows.
    Yuv420Planar {
        y_row_stride: usize,
        uv_row_stride: usize,
        uv_pixel_stride: usize,
    },
}

/// A raw sensor frame, borrowed for the duration of one conversion.
#[derive(Debug, Clone)]
pub struct PixelFrame {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// One plane for [`PixelFormat::Yuv420SemiPlanar`], three (Y, U, V) for
    /// [`PixelFormat::Yuv420Planar`].
    pub planes: Vec<Vec<u8>>,
}

impl PixelFrame {
    pub fn semi_planar(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Yuv420SemiPlanar,
            planes: vec![data],
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn planar(width: u32, height: u32,
                  y: Vec<u8>, u: Vec<u8>, v: Vec<u8>,
                  y_row_stride: usize, uv_row_stride: usize, uv_pixel_stride: usize) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Yuv420Planar {
                y_row_stride,
                uv_row_stride,
                uv_pixel_stride,
            },
            planes: vec![y, u, v],
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
