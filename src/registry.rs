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
use crate::convert_image;
use crate::cpu_info::InstructionSet;
use crate::job::ConvertJob;
use crate::pixel_format::{PackedFormat, PlanarFormat};

/// A conversion kernel.
///
/// Writes `job.height()` rows of `job.width()` pixels into the destination
/// at the given pitch. There is no return value; completion of the call is
/// success. Kernels may run concurrently on descriptors whose buffer
/// regions do not overlap.
pub type KernelFn = fn(&ConvertJob<'_>, &mut [u8], usize);

/// One entry of the conversion table.
#[derive(Copy, Clone)]
pub struct Conversion {
    /// Source plane arrangement the kernel expects.
    pub src: PlanarFormat,
    /// Packed format the kernel produces.
    pub dst: PackedFormat,
    /// Multiplier turning a decoder's sample-count strides into the byte
    /// strides the job descriptor wants.
    pub in_bytes_per_sample: usize,
    /// Whether the kernel is verified safe under strip partitioning.
    /// [`convert_image`](crate::convert_image) runs single threaded when
    /// this is false.
    pub parallel: bool,
    /// The kernel itself. Invoking it directly bypasses the output checks
    /// of the public entry points; the descriptor and destination must
    /// already satisfy its contract.
    pub kernel: KernelFn,
}

pub(crate) const TABLE_SIZE: usize = 8;

macro_rules! conversion_table {
    ($set:ident) => {
        [
            Conversion {
                src: PlanarFormat::Yuv422p,
                dst: PackedFormat::Uyvy,
                in_bytes_per_sample: 1,
                parallel: true,
                kernel: convert_image::$set::yuv422p_to_uyvy,
            },
            Conversion {
                src: PlanarFormat::Yuv422p,
                dst: PackedFormat::Yuyv,
                in_bytes_per_sample: 1,
                parallel: true,
                kernel: convert_image::$set::yuv422p_to_yuyv,
            },
            Conversion {
                src: PlanarFormat::Yuv420p,
                dst: PackedFormat::I420,
                in_bytes_per_sample: 1,
                // No proper support for parallel decode of the contiguous
                // planar copy.
                parallel: false,
                kernel: convert_image::$set::yuv420p_to_i420,
            },
            Conversion {
                src: PlanarFormat::Rgbp,
                dst: PackedFormat::Rgb,
                in_bytes_per_sample: 1,
                parallel: true,
                kernel: convert_image::$set::rgbp_to_rgb,
            },
            Conversion {
                src: PlanarFormat::Yuv422p,
                dst: PackedFormat::V210,
                in_bytes_per_sample: 2,
                parallel: true,
                kernel: convert_image::$set::yuv422p10le_to_v210,
            },
            Conversion {
                src: PlanarFormat::Rgbp,
                dst: PackedFormat::R10k,
                in_bytes_per_sample: 2,
                parallel: true,
                kernel: convert_image::$set::rgbp_to_r10k,
            },
            Conversion {
                src: PlanarFormat::Rgbp,
                dst: PackedFormat::R12l,
                in_bytes_per_sample: 2,
                parallel: true,
                kernel: convert_image::$set::rgbp_to_r12l,
            },
            Conversion {
                src: PlanarFormat::Rgbp,
                dst: PackedFormat::Rg48,
                in_bytes_per_sample: 2,
                parallel: true,
                kernel: convert_image::$set::rgbp_to_rg48,
            },
        ]
    };
}

pub(crate) fn build(set: InstructionSet) -> [Conversion; TABLE_SIZE] {
    match set {
        InstructionSet::X86 => conversion_table!(x86),
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        InstructionSet::Sse2 => conversion_table!(sse2),
    }
}

/// First structurally matching entry wins. An absent entry means the
/// conversion is unsupported, not that a retry could succeed.
pub(crate) fn lookup(table: &[Conversion], dst: PackedFormat) -> Option<&Conversion> {
    table.iter().find(|conversion| conversion.dst == dst)
}
