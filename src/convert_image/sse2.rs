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

//! SSE2 kernel set. Only the 4:2:x chroma/luma interleaves have a vector
//! path; every other kernel is the scalar implementation re-exported.

use crate::convert_image::x86;
use crate::job::ConvertJob;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

pub use crate::convert_image::x86::{
    gbrap_to_rgb, gbrap_to_rgba, gbrp10le_to_r10k, gbrp10le_to_rg48, gbrp10le_to_rgb,
    gbrp10le_to_rgba, gbrp12le_to_r10k, gbrp12le_to_r12l, gbrp12le_to_rg48, gbrp12le_to_rgb,
    gbrp12le_to_rgba, gbrp16le_to_r10k, gbrp16le_to_r12l, gbrp16le_to_rg48, gbrp16le_to_rgb,
    gbrp16le_to_rgba, rgbp_to_r10k, rgbp_to_r12l, rgbp_to_rg48, rgbp_to_rgb,
    yuv422p10le_to_uyvy, yuv422p10le_to_v210, yuv420p_to_i420,
};

/// Interleaves 16 output bytes per iteration; returns the first pixel the
/// scalar remainder loop has to pick up.
///
/// The caller guarantees at least `width` luma samples, `width / 2` chroma
/// samples and `2 * width` output bytes, so the 16-byte loads and 32-byte
/// stores below stay in bounds while `x + 16 <= width`.
#[inline(always)]
fn interleave_pairs_16x(
    row: &mut [u8],
    src_y: &[u8],
    src_cb: &[u8],
    src_cr: &[u8],
    width: usize,
    yuyv: bool,
) -> usize {
    let mut x = 0;
    unsafe {
        while x + 16 <= width {
            let luma = _mm_loadu_si128(src_y.as_ptr().add(x).cast());
            let cb = _mm_loadl_epi64(src_cb.as_ptr().add(x / 2).cast());
            let cr = _mm_loadl_epi64(src_cr.as_ptr().add(x / 2).cast());
            let chroma = _mm_unpacklo_epi8(cb, cr);

            let (lo, hi) = if yuyv {
                (
                    _mm_unpacklo_epi8(luma, chroma),
                    _mm_unpackhi_epi8(luma, chroma),
                )
            } else {
                (
                    _mm_unpacklo_epi8(chroma, luma),
                    _mm_unpackhi_epi8(chroma, luma),
                )
            };
            _mm_storeu_si128(row.as_mut_ptr().add(2 * x).cast(), lo);
            _mm_storeu_si128(row.as_mut_ptr().add(2 * x + 16).cast(), hi);
            x += 16;
        }
    }
    x
}

#[inline(always)]
fn interleave_row(row: &mut [u8], src_y: &[u8], src_cb: &[u8], src_cr: &[u8], width: usize, yuyv: bool) {
    let done = interleave_pairs_16x(row, src_y, src_cb, src_cr, width, yuyv);
    x86::interleave_pairs(row, src_y, src_cb, src_cr, width, done, yuyv);
}

#[inline(always)]
fn yuv422p_to_uyvy_yuyv(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize, yuyv: bool) {
    let width = job.width() as usize;
    for y in 0..job.height() as usize {
        let row = &mut dst[y * dst_pitch..];
        interleave_row(row, job.row(0, y), job.row(1, y), job.row(2, y), width, yuyv);
    }
}

pub fn yuv422p_to_uyvy(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    if job.depth() == 8 {
        yuv422p_to_uyvy_yuyv(job, dst, dst_pitch, false);
    } else {
        x86::yuv422p_to_uyvy(job, dst, dst_pitch);
    }
}

pub fn yuv422p_to_yuyv(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    debug_assert_eq!(job.depth(), 8);
    yuv422p_to_uyvy_yuyv(job, dst, dst_pitch, true);
}

pub fn yuv420p_to_uyvy(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    let width = job.width() as usize;
    let height = job.height() as usize;
    let row_len = width.div_ceil(2) * 4;

    for pair in 0..height.div_ceil(2) {
        let top = 2 * pair;
        let src_cb = job.row(1, pair);
        let src_cr = job.row(2, pair);
        let rows = &mut dst[top * dst_pitch..];

        if top + 1 < height {
            let (first, second) = rows.split_at_mut(dst_pitch);
            interleave_row(&mut first[..row_len], job.row(0, top), src_cb, src_cr, width, false);
            interleave_row(
                &mut second[..row_len],
                job.row(0, top + 1),
                src_cb,
                src_cr,
                width,
                false,
            );
        } else {
            interleave_row(&mut rows[..row_len], job.row(0, top), src_cb, src_cr, width, false);
        }
    }
}
