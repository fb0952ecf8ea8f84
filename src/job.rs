// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Permission is hereby granted, free of charge, to any person obtaining a copy of this
// software and associated documentation files (the "Software"), to deal in the Software
// without restriction, including without limitation the rights to use, copy, modify,
// merge, publish, distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED,
// INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT
// HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
use crate::pixel_format::{PlanarFormat, MAX_NUMBER_OF_PLANES};
use crate::ErrorKind;

/// Default bit offsets of the R, G, B channels within a packed 32-bit word.
pub const DEFAULT_RGB_SHIFT: [u32; 3] = [0, 8, 16];

/// Describes one planar-to-packed conversion invocation.
///
/// A job borrows up to four decoded sample planes together with their row
/// strides and carries the frame geometry the kernels operate on. All plane
/// geometry is validated once, by [`ConvertJob::new`]; kernels index the
/// planes without further checks.
///
/// Jobs are cheap to copy. The parallel dispatcher derives one sub-job per
/// horizontal strip from the original; a job is never mutated once built.
#[derive(Copy, Clone, Debug)]
pub struct ConvertJob<'a> {
    format: PlanarFormat,
    width: u32,
    height: u32,
    depth: u32,
    rgb_shift: [u32; 3],
    planes: [&'a [u8]; MAX_NUMBER_OF_PLANES],
    linesize: [usize; MAX_NUMBER_OF_PLANES],
}

impl<'a> ConvertJob<'a> {
    /// Creates a job over `planes` with the given per-plane strides in bytes.
    ///
    /// `depth` is the input sample bit depth; samples wider than 8 bits are
    /// stored as little-endian 16-bit words and their strides must be even.
    /// Unused trailing entries of `planes`/`linesize` are ignored.
    ///
    /// # Errors
    ///
    /// * [`InvalidValue`] if `width` or `height` is zero, `depth` is not one
    ///   of 8, 10, 12, 16, or a stride cannot hold a row of samples at the
    ///   plane's subsampled width
    ///
    /// * [`NotEnoughData`] if fewer planes than the arrangement requires are
    ///   provided, or a plane buffer is smaller than its stride times its row
    ///   count
    ///
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    /// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
    pub fn new(
        format: PlanarFormat,
        width: u32,
        height: u32,
        depth: u32,
        planes: &[&'a [u8]],
        linesize: &[usize],
    ) -> Result<Self, ErrorKind> {
        if width == 0 || height == 0 {
            return Err(ErrorKind::InvalidValue);
        }
        if !matches!(depth, 8 | 10 | 12 | 16) {
            return Err(ErrorKind::InvalidValue);
        }

        let num_planes = format.num_planes();
        if planes.len() < num_planes || linesize.len() < num_planes {
            return Err(ErrorKind::NotEnoughData);
        }

        let bytes_per_sample = if depth > 8 { 2 } else { 1 };
        let mut job = ConvertJob {
            format,
            width,
            height,
            depth,
            rgb_shift: DEFAULT_RGB_SHIFT,
            planes: [&[]; MAX_NUMBER_OF_PLANES],
            linesize: [0; MAX_NUMBER_OF_PLANES],
        };

        for plane in 0..num_planes {
            // Plane 0 is never subsampled.
            let (cw, ch) = if plane == 0 {
                (0, 0)
            } else {
                (format.log2_chroma_w(), format.log2_chroma_h())
            };

            let cols = ((width as usize + (1 << cw) - 1) >> cw) * bytes_per_sample;
            let rows = (height as usize + (1 << ch) - 1) >> ch;
            if linesize[plane] < cols {
                return Err(ErrorKind::InvalidValue);
            }
            if bytes_per_sample == 2 && linesize[plane] % 2 != 0 {
                return Err(ErrorKind::InvalidValue);
            }
            let required = linesize[plane]
                .checked_mul(rows)
                .ok_or(ErrorKind::InvalidValue)?;
            if planes[plane].len() < required {
                return Err(ErrorKind::NotEnoughData);
            }

            job.planes[plane] = planes[plane];
            job.linesize[plane] = linesize[plane];
        }

        Ok(job)
    }

    /// Replaces the packed-word channel offsets used by the RGBA kernels.
    ///
    /// Each offset must be a multiple of 8 not larger than 24 and the three
    /// channels must not overlap; the bits left uncovered carry the alpha
    /// value, forced to all-ones.
    pub fn with_rgb_shift(mut self, rgb_shift: [u32; 3]) -> Self {
        self.rgb_shift = rgb_shift;
        self
    }

    /// Source plane arrangement.
    pub fn format(&self) -> PlanarFormat {
        self.format
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Input sample bit depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Bytes used to store one input sample.
    pub fn bytes_per_sample(&self) -> usize {
        if self.depth > 8 {
            2
        } else {
            1
        }
    }

    pub(crate) fn rgb_shift(&self) -> [u32; 3] {
        self.rgb_shift
    }

    /// Row `y` of `plane`, starting at the first sample; the slice extends to
    /// the end of the plane so callers index only what they consume.
    pub(crate) fn row(&self, plane: usize, y: usize) -> &'a [u8] {
        let data = self.planes[plane];
        &data[y * self.linesize[plane]..]
    }

    /// Derives the descriptor for a horizontal strip of `rows` rows starting
    /// at `start_row`. Chroma planes advance by the subsampled distance;
    /// plane 0 is never shifted.
    pub(crate) fn strip(&self, start_row: u32, rows: u32) -> ConvertJob<'a> {
        let mut strip = *self;
        for plane in 0..self.format.num_planes() {
            let shift = if plane == 0 {
                0
            } else {
                self.format.log2_chroma_h()
            };
            let offset = ((start_row as usize) * self.linesize[plane]) >> shift;
            let data = self.planes[plane];
            strip.planes[plane] = &data[offset..];
        }
        strip.height = rows;
        strip
    }
}
