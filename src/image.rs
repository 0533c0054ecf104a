//! Planar `f32` image storage.
//!
//! Rows are padded so that each one holds a whole number of vector strides.
//! Kernels read and write the padding instead of handling a partial final
//! stride; padding never belongs to the declared image.

#[cfg(test)]
mod tests;

use crate::{ColorEncoding, CreationError};

/// Widest vector lane count used by any kernel. Row strides are a multiple of it.
pub const LANES: usize = 8;

const fn padded_stride(width: usize) -> usize {
    let rounded = (width + LANES - 1) / LANES * LANES;
    if rounded == 0 {
        LANES
    } else {
        rounded
    }
}

/// A single plane of 32-bit float samples, stored row-major with a stride
/// that may exceed the width.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageF {
    data: Vec<f32>,
    width: usize,
    height: usize,
    stride: usize,
}

impl ImageF {
    /// Create a zero-filled plane of the given size.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let stride = padded_stride(width);
        Self {
            data: vec![0.0; stride * height],
            width,
            height,
            stride,
        }
    }

    /// Create a plane from tightly packed row-major samples.
    ///
    /// # Errors
    /// - If data length does not match `width * height`
    pub fn from_packed(data: &[f32], width: usize, height: usize) -> Result<Self, CreationError> {
        if data.len() != width * height {
            return Err(CreationError::ResolutionMismatch);
        }

        let mut plane = Self::new(width, height);
        if width > 0 {
            for (dst, src) in plane.data.chunks_exact_mut(plane.stride).zip(data.chunks_exact(width)) {
                dst[..width].copy_from_slice(src);
            }
        }
        Ok(plane)
    }

    /// Returns the declared samples as a tightly packed vector.
    #[must_use]
    pub fn to_packed(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }

    #[must_use]
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Distance in samples between the starts of two consecutive rows.
    #[must_use]
    #[inline]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// The `width` samples of row `y`.
    #[must_use]
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    #[must_use]
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Row `y` including its padding, `stride` samples long.
    #[must_use]
    #[inline]
    pub fn padded_row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.stride]
    }

    /// Disjoint mutable padded rows, top to bottom.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        self.data.chunks_exact_mut(self.stride)
    }

    /// Disjoint mutable stripes of `lines` padded rows each; the last stripe
    /// may be shorter.
    pub fn stripes_mut(&mut self, lines: usize) -> std::slice::ChunksMut<'_, f32> {
        self.data.chunks_mut(self.stride * lines.max(1))
    }

    #[must_use]
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.row(y)[x]
    }

    /// Sets every declared sample to `value`. Padding keeps its contents.
    pub fn fill(&mut self, value: f32) {
        for y in 0..self.height {
            self.row_mut(y).fill(value);
        }
    }
}

/// Three planes of identical size, holding R,G,B or X,Y,B or Y,Cb,Cr.
#[derive(Debug, Clone, PartialEq)]
pub struct Image3F {
    planes: [ImageF; 3],
}

impl Image3F {
    /// Create three zero-filled planes of the given size.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            planes: [
                ImageF::new(width, height),
                ImageF::new(width, height),
                ImageF::new(width, height),
            ],
        }
    }

    /// # Errors
    /// - If the planes do not all share the same width and height
    pub fn from_planes(p0: ImageF, p1: ImageF, p2: ImageF) -> Result<Self, CreationError> {
        let dims = (p0.width, p0.height);
        if (p1.width, p1.height) != dims || (p2.width, p2.height) != dims {
            return Err(CreationError::ResolutionMismatch);
        }
        Ok(Self {
            planes: [p0, p1, p2],
        })
    }

    /// Create an image from interleaved pixel triples, the layout used by
    /// most decoders.
    ///
    /// # Errors
    /// - If data length does not match `width * height`
    pub fn from_interleaved(
        data: &[[f32; 3]],
        width: usize,
        height: usize,
    ) -> Result<Self, CreationError> {
        if data.len() != width * height {
            return Err(CreationError::ResolutionMismatch);
        }

        let mut image = Self::new(width, height);
        for (y, pixels) in data.chunks_exact(width.max(1)).enumerate().take(height) {
            for (c, plane) in image.planes.iter_mut().enumerate() {
                for (dst, pix) in plane.row_mut(y).iter_mut().zip(pixels) {
                    *dst = pix[c];
                }
            }
        }
        Ok(image)
    }

    /// Returns the declared samples as interleaved pixel triples.
    #[must_use]
    pub fn to_interleaved(&self) -> Vec<[f32; 3]> {
        let mut out = Vec::with_capacity(self.width() * self.height());
        for y in 0..self.height() {
            let rows = [self.plane_row(0, y), self.plane_row(1, y), self.plane_row(2, y)];
            out.extend((0..self.width()).map(|x| [rows[0][x], rows[1][x], rows[2][x]]));
        }
        out
    }

    #[must_use]
    #[inline]
    pub const fn width(&self) -> usize {
        self.planes[0].width
    }

    #[must_use]
    #[inline]
    pub const fn height(&self) -> usize {
        self.planes[0].height
    }

    #[must_use]
    #[inline]
    pub fn same_size(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    #[must_use]
    #[inline]
    pub const fn plane(&self, c: usize) -> &ImageF {
        &self.planes[c]
    }

    #[must_use]
    #[inline]
    pub fn plane_mut(&mut self, c: usize) -> &mut ImageF {
        &mut self.planes[c]
    }

    /// Mutable access to all three planes at once.
    #[must_use]
    #[inline]
    pub fn planes_mut(&mut self) -> [&mut ImageF; 3] {
        let [p0, p1, p2] = &mut self.planes;
        [p0, p1, p2]
    }

    #[must_use]
    #[inline]
    pub fn plane_row(&self, c: usize, y: usize) -> &[f32] {
        self.planes[c].row(y)
    }

    #[must_use]
    #[inline]
    pub fn plane_row_mut(&mut self, c: usize, y: usize) -> &mut [f32] {
        self.planes[c].row_mut(y)
    }

    /// Padded row `y` of each plane.
    #[must_use]
    #[inline]
    pub fn padded_rows(&self, y: usize) -> [&[f32]; 3] {
        [
            self.planes[0].padded_row(y),
            self.planes[1].padded_row(y),
            self.planes[2].padded_row(y),
        ]
    }

    /// Mutable padded rows grouped by row index: element `y` holds row `y`
    /// of all three planes.
    pub fn rows_mut(&mut self) -> Vec<[&mut [f32]; 3]> {
        let [p0, p1, p2] = &mut self.planes;
        p0.rows_mut()
            .zip(p1.rows_mut())
            .zip(p2.rows_mut())
            .map(|((r0, r1), r2)| [r0, r1, r2])
            .collect()
    }

    /// Like [`Image3F::rows_mut`], with `lines` consecutive rows per element.
    pub fn stripes_mut(&mut self, lines: usize) -> Vec<[&mut [f32]; 3]> {
        let [p0, p1, p2] = &mut self.planes;
        p0.stripes_mut(lines)
            .zip(p1.stripes_mut(lines))
            .zip(p2.stripes_mut(lines))
            .map(|((s0, s1), s2)| [s0, s1, s2])
            .collect()
    }
}

/// Color planes together with the encoding they are currently in.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBundle {
    color: Image3F,
    encoding: ColorEncoding,
}

impl ImageBundle {
    #[must_use]
    pub const fn new(color: Image3F, encoding: ColorEncoding) -> Self {
        Self { color, encoding }
    }

    #[must_use]
    #[inline]
    pub const fn color(&self) -> &Image3F {
        &self.color
    }

    #[must_use]
    #[inline]
    pub fn color_mut(&mut self) -> &mut Image3F {
        &mut self.color
    }

    /// The encoding the planes are currently in.
    #[must_use]
    #[inline]
    pub const fn c_current(&self) -> &ColorEncoding {
        &self.encoding
    }

    #[must_use]
    #[inline]
    pub const fn is_gray(&self) -> bool {
        self.encoding.gray
    }

    #[must_use]
    #[inline]
    pub fn is_srgb(&self) -> bool {
        self.encoding.is_srgb()
    }

    #[must_use]
    #[inline]
    pub const fn width(&self) -> usize {
        self.color.width()
    }

    #[must_use]
    #[inline]
    pub const fn height(&self) -> usize {
        self.color.height()
    }

    /// Replaces the planes and the encoding they are in.
    pub fn set_from_image(&mut self, color: Image3F, encoding: ColorEncoding) {
        self.color = color;
        self.encoding = encoding;
    }
}
