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
use core::fmt;

/// Most planes any supported source arrangement uses.
pub const MAX_NUMBER_OF_PLANES: usize = 4;

/// An enumeration of supported source plane arrangements.
///
/// Each arrangement fixes the number of planes and the chroma subsampling
/// factors used to size and partition the chroma planes:
///
/// arrangement             | #planes | subsampling | sample depth
/// ------------------------|:-------:|:-----------:|:------------:
/// `PlanarFormat::Gbrp`    | 3       | 4:4:4       | 10, 12, 16
/// `PlanarFormat::Gbrap`   | 4       | 4:4:4       | 8
/// `PlanarFormat::Rgbp`    | 3       | 4:4:4       | 8, 10, 12, 16
/// `PlanarFormat::Yuv422p` | 3       | 4:2:2       | 8, 10, 12, 16
/// `PlanarFormat::Yuv420p` | 3       | 4:2:0       | 8
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlanarFormat {
    /// Planar RGB with the G plane first, then B, then R.
    Gbrp,
    /// Planar RGB with alpha, plane order G, B, R, A.
    Gbrap,
    /// Planar RGB in natural order R, G, B. Decoders that do not
    /// distinguish 4:4:4 YCbCr from RGB report their output this way.
    Rgbp,
    /// Planar YCbCr with chroma planes halved in the horizontal dimension.
    Yuv422p,
    /// Planar YCbCr with chroma planes halved in both dimensions.
    Yuv420p,
}

impl PlanarFormat {
    pub(crate) const fn num_planes(self) -> usize {
        match self {
            PlanarFormat::Gbrap => 4,
            _ => 3,
        }
    }

    /// Log2 horizontal subsampling factor of the chroma planes.
    pub(crate) const fn log2_chroma_w(self) -> u32 {
        match self {
            PlanarFormat::Yuv422p | PlanarFormat::Yuv420p => 1,
            _ => 0,
        }
    }

    /// Log2 vertical subsampling factor of the chroma planes.
    pub(crate) const fn log2_chroma_h(self) -> u32 {
        match self {
            PlanarFormat::Yuv420p => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for PlanarFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlanarFormat::Gbrp => write!(f, "gbrp"),
            PlanarFormat::Gbrap => write!(f, "gbrap"),
            PlanarFormat::Rgbp => write!(f, "rgbp"),
            PlanarFormat::Yuv422p => write!(f, "yuv422p"),
            PlanarFormat::Yuv420p => write!(f, "yuv420p"),
        }
    }
}

/// An enumeration of supported packed destination formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PackedFormat {
    /// 12-bit RGB, 8 pixels packed into 36-byte blocks.
    ///
    /// 36 bits per pixel
    R12l,
    /// 16-bit little-endian RGB triplets.
    ///
    /// 48 bits per pixel
    Rg48,
    /// 10-bit RGB in 4-byte words, the two low bits forced to ones.
    ///
    /// 32 bits per pixel
    R10k,
    /// 10-bit 4:2:2 YCbCr, 6 pixels packed into four 32-bit
    /// little-endian words.
    ///
    /// 128 bits per 6 pixels
    V210,
    /// 8-bit 4:2:2 YCbCr ordered Cb, Y0, Cr, Y1.
    ///
    /// 16 bits per pixel
    Uyvy,
    /// 8-bit 4:2:2 YCbCr ordered Y0, Cb, Y1, Cr.
    ///
    /// 16 bits per pixel
    Yuyv,
    /// Contiguous planar 4:2:0 YCbCr. The destination pitch is ignored,
    /// planes follow each other tightly packed. Width and height must be
    /// multiples of 2.
    ///
    /// 12 bits per pixel
    I420,
    /// RGB packed into 24 bits without padding.
    ///
    /// 24 bits per pixel
    Rgb,
    /// RGB in 32-bit words with configurable channel order; bits not
    /// covered by a color channel are forced to ones.
    ///
    /// 32 bits per pixel
    Rgba,
}

impl fmt::Display for PackedFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PackedFormat::R12l => write!(f, "r12l"),
            PackedFormat::Rg48 => write!(f, "rg48"),
            PackedFormat::R10k => write!(f, "r10k"),
            PackedFormat::V210 => write!(f, "v210"),
            PackedFormat::Uyvy => write!(f, "uyvy"),
            PackedFormat::Yuyv => write!(f, "yuyv"),
            PackedFormat::I420 => write!(f, "i420"),
            PackedFormat::Rgb => write!(f, "rgb"),
            PackedFormat::Rgba => write!(f, "rgba"),
        }
    }
}

/// If the destination pitch is assigned to this constant, rows are assumed
/// to be tightly packed
pub const STRIDE_AUTO: usize = 0;

pub(crate) fn is_compatible(format: PackedFormat, width: u32, height: u32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    match format {
        PackedFormat::I420 => (width & 1) == 0 && (height & 1) == 0,
        _ => true,
    }
}

/// Smallest pitch able to hold a row of `width` pixels.
pub(crate) fn default_pitch(format: PackedFormat, width: u32) -> usize {
    let width = width as usize;
    match format {
        PackedFormat::R12l => width.div_ceil(8) * 36,
        PackedFormat::Rg48 => 6 * width,
        PackedFormat::R10k | PackedFormat::Rgba => 4 * width,
        PackedFormat::V210 => width.div_ceil(6) * 16,
        PackedFormat::Uyvy | PackedFormat::Yuyv => width.div_ceil(2) * 4,
        PackedFormat::I420 => width,
        PackedFormat::Rgb => 3 * width,
    }
}

/// Bytes required in the destination buffer for `height` rows at `pitch`,
/// or `None` if the frame does not fit the address space.
pub(crate) fn buffer_size(
    format: PackedFormat,
    width: u32,
    height: u32,
    pitch: usize,
) -> Option<usize> {
    let width = width as usize;
    let height = height as usize;
    match format {
        // Contiguous planar output, the pitch does not apply.
        PackedFormat::I420 => {
            let luma = width.checked_mul(height)?;
            luma.checked_add(2 * ((width / 2) * (height / 2)))
        }
        _ => pitch.checked_mul(height),
    }
}
