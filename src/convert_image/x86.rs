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

//! Scalar kernel set. Depth scaling is always a pure shift, never rounding,
//! so repacking the same frame is reproducible bit for bit.

use crate::convert_image::common::*;
use crate::job::ConvertJob;
use paste::paste;

#[inline(always)]
fn gbrpxxle_to_r10k(
    job: &ConvertJob<'_>,
    dst: &mut [u8],
    dst_pitch: usize,
    in_depth: u32,
    pl: [usize; 3],
) {
    debug_assert!(in_depth >= 10);

    let width = job.width() as usize;
    for y in 0..job.height() as usize {
        let src_r = job.row(pl[0], y);
        let src_g = job.row(pl[1], y);
        let src_b = job.row(pl[2], y);
        let row = &mut dst[y * dst_pitch..][..4 * width];

        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let r = load_u16_le(src_r, x);
            let g = load_u16_le(src_g, x);
            let b = load_u16_le(src_b, x);
            px[0] = (r >> (in_depth - 8)) as u8;
            px[1] = ((((r >> (in_depth - 10)) & 0x3) << 6) | (g >> (in_depth - 6))) as u8;
            px[2] = ((((g >> (in_depth - 10)) & 0xF) << 4) | (b >> (in_depth - 4))) as u8;
            px[3] = ((((b >> (in_depth - 10)) & 0x3F) << 2) | 0x3) as u8;
        }
    }
}

/// 8 pixels per 36-byte block; the tail buffers keep the last partial block
/// from reading past the row end.
#[inline(always)]
fn gbrpxxle_to_r12l(
    job: &ConvertJob<'_>,
    dst: &mut [u8],
    dst_pitch: usize,
    in_depth: u32,
    pl: [usize; 3],
) {
    debug_assert!(in_depth >= 12);

    let width = job.width() as usize;
    let shift = in_depth - 12;
    for y in 0..job.height() as usize {
        let src_r = job.row(pl[0], y);
        let src_g = job.row(pl[1], y);
        let src_b = job.row(pl[2], y);
        let row = &mut dst[y * dst_pitch..][..width.div_ceil(8) * 36];

        for (x, block) in (0..width).step_by(8).zip(row.chunks_exact_mut(36)) {
            let mut r = [0u16; 8];
            let mut g = [0u16; 8];
            let mut b = [0u16; 8];
            for i in 0..8.min(width - x) {
                r[i] = load_u16_le(src_r, x + i) >> shift;
                g[i] = load_u16_le(src_g, x + i) >> shift;
                b[i] = load_u16_le(src_b, x + i) >> shift;
            }

            block[byte_swap(0)] = (r[0] & 0xff) as u8;
            block[byte_swap(1)] = (((g[0] & 0xf) << 4) | (r[0] >> 8)) as u8;
            block[byte_swap(2)] = (g[0] >> 4) as u8;
            block[byte_swap(3)] = (b[0] & 0xff) as u8;
            block[4 + byte_swap(0)] = (((r[1] & 0xf) << 4) | (b[0] >> 8)) as u8;
            block[4 + byte_swap(1)] = (r[1] >> 4) as u8;
            block[4 + byte_swap(2)] = (g[1] & 0xff) as u8;
            block[4 + byte_swap(3)] = (((b[1] & 0xf) << 4) | (g[1] >> 8)) as u8;
            block[8 + byte_swap(0)] = (b[1] >> 4) as u8;
            block[8 + byte_swap(1)] = (r[2] & 0xff) as u8;
            block[8 + byte_swap(2)] = (((g[2] & 0xf) << 4) | (r[2] >> 8)) as u8;
            block[8 + byte_swap(3)] = (g[2] >> 4) as u8;
            block[12 + byte_swap(0)] = (b[2] & 0xff) as u8;
            block[12 + byte_swap(1)] = (((r[3] & 0xf) << 4) | (b[2] >> 8)) as u8;
            block[12 + byte_swap(2)] = (r[3] >> 4) as u8;
            block[12 + byte_swap(3)] = (g[3] & 0xff) as u8;
            block[16 + byte_swap(0)] = (((b[3] & 0xf) << 4) | (g[3] >> 8)) as u8;
            block[16 + byte_swap(1)] = (b[3] >> 4) as u8;
            block[16 + byte_swap(2)] = (r[4] & 0xff) as u8;
            block[16 + byte_swap(3)] = (((g[4] & 0xf) << 4) | (r[4] >> 8)) as u8;
            block[20 + byte_swap(0)] = (g[4] >> 4) as u8;
            block[20 + byte_swap(1)] = (b[4] & 0xff) as u8;
            block[20 + byte_swap(2)] = (((r[5] & 0xf) << 4) | (b[4] >> 8)) as u8;
            block[20 + byte_swap(3)] = (r[5] >> 4) as u8;
            block[24 + byte_swap(0)] = (g[5] & 0xff) as u8;
            block[24 + byte_swap(1)] = (((b[5] & 0xf) << 4) | (g[5] >> 8)) as u8;
            block[24 + byte_swap(2)] = (b[5] >> 4) as u8;
            block[24 + byte_swap(3)] = (r[6] & 0xff) as u8;
            block[28 + byte_swap(0)] = (((g[6] & 0xf) << 4) | (r[6] >> 8)) as u8;
            block[28 + byte_swap(1)] = (g[6] >> 4) as u8;
            block[28 + byte_swap(2)] = (b[6] & 0xff) as u8;
            block[28 + byte_swap(3)] = (((r[7] & 0xf) << 4) | (b[6] >> 8)) as u8;
            block[32 + byte_swap(0)] = (r[7] >> 4) as u8;
            block[32 + byte_swap(1)] = (g[7] & 0xff) as u8;
            block[32 + byte_swap(2)] = (((b[7] & 0xf) << 4) | (g[7] >> 8)) as u8;
            block[32 + byte_swap(3)] = (b[7] >> 4) as u8;
        }
    }
}

#[inline(always)]
fn rgbpxxle_to_rg48(
    job: &ConvertJob<'_>,
    dst: &mut [u8],
    dst_pitch: usize,
    in_depth: u32,
    pl: [usize; 3],
) {
    let width = job.width() as usize;
    for y in 0..job.height() as usize {
        let src_r = job.row(pl[0], y);
        let src_g = job.row(pl[1], y);
        let src_b = job.row(pl[2], y);
        let row = &mut dst[y * dst_pitch..][..6 * width];

        for (x, px) in row.chunks_exact_mut(6).enumerate() {
            px[0..2].copy_from_slice(&(load_u16_le(src_r, x) << (16 - in_depth)).to_le_bytes());
            px[2..4].copy_from_slice(&(load_u16_le(src_g, x) << (16 - in_depth)).to_le_bytes());
            px[4..6].copy_from_slice(&(load_u16_le(src_b, x) << (16 - in_depth)).to_le_bytes());
        }
    }
}

#[inline(always)]
fn gbrpxxle_to_rgb(
    job: &ConvertJob<'_>,
    dst: &mut [u8],
    dst_pitch: usize,
    in_depth: u32,
    pl: [usize; 3],
) {
    let width = job.width() as usize;
    for y in 0..job.height() as usize {
        let src_r = job.row(pl[0], y);
        let src_g = job.row(pl[1], y);
        let src_b = job.row(pl[2], y);
        let row = &mut dst[y * dst_pitch..][..3 * width];

        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            px[0] = (load_u16_le(src_r, x) >> (in_depth - 8)) as u8;
            px[1] = (load_u16_le(src_g, x) >> (in_depth - 8)) as u8;
            px[2] = (load_u16_le(src_b, x) >> (in_depth - 8)) as u8;
        }
    }
}

/// The bits not assigned to a color channel by `rgb_shift` carry the alpha
/// value; the precomputed mask forces them to ones for every channel order.
#[inline(always)]
fn gbrpxxle_to_rgba(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize, in_depth: u32) {
    let width = job.width() as usize;
    let shift = job.rgb_shift();
    let mask = alpha_mask(shift);

    for y in 0..job.height() as usize {
        let src_g = job.row(0, y);
        let src_b = job.row(1, y);
        let src_r = job.row(2, y);
        let row = &mut dst[y * dst_pitch..][..4 * width];

        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let r = u32::from(load_u16_le(src_r, x) >> (in_depth - 8));
            let g = u32::from(load_u16_le(src_g, x) >> (in_depth - 8));
            let b = u32::from(load_u16_le(src_b, x) >> (in_depth - 8));
            let word = mask | (r << shift[0]) | (g << shift[1]) | (b << shift[2]);
            px.copy_from_slice(&word.to_le_bytes());
        }
    }
}

#[inline(always)]
fn gbrap_to_rgb_rgba(
    job: &ConvertJob<'_>,
    dst: &mut [u8],
    dst_pitch: usize,
    pl: [usize; 3],
    alpha_plane: Option<usize>,
) {
    let width = job.width() as usize;
    let out_comp_count = if alpha_plane.is_some() { 4 } else { 3 };

    for y in 0..job.height() as usize {
        let src_r = job.row(pl[0], y);
        let src_g = job.row(pl[1], y);
        let src_b = job.row(pl[2], y);
        let src_a = alpha_plane.map(|plane| job.row(plane, y));
        let row = &mut dst[y * dst_pitch..][..out_comp_count * width];

        for (x, px) in row.chunks_exact_mut(out_comp_count).enumerate() {
            px[0] = src_r[x];
            px[1] = src_g[x];
            px[2] = src_b[x];
            if let Some(src_a) = src_a {
                px[3] = src_a[x];
            }
        }
    }
}

macro_rules! gbrp_kernels {
    ($($depth:literal => [$($target:ident),*]),* $(,)?) => {
        paste! {
            $($(
                pub fn [<gbrp $depth le_to_ $target>](
                    job: &ConvertJob<'_>,
                    dst: &mut [u8],
                    dst_pitch: usize,
                ) {
                    [<gbrpxxle_to_ $target>](job, dst, dst_pitch, $depth, GBR_PLANES);
                }
            )*)*
        }
    };
}

gbrp_kernels! {
    10 => [r10k, rgb],
    12 => [r10k, r12l, rgb],
    16 => [r10k, r12l, rgb],
}

macro_rules! gbrp_rg48_kernel {
    ($($depth:literal),* $(,)?) => {
        paste! {
            $(
                pub fn [<gbrp $depth le_to_rg48>](
                    job: &ConvertJob<'_>,
                    dst: &mut [u8],
                    dst_pitch: usize,
                ) {
                    rgbpxxle_to_rg48(job, dst, dst_pitch, $depth, GBR_PLANES);
                }
            )*
        }
    };
}

gbrp_rg48_kernel!(10, 12, 16);

macro_rules! gbrp_rgba_kernel {
    ($($depth:literal),* $(,)?) => {
        paste! {
            $(
                pub fn [<gbrp $depth le_to_rgba>](
                    job: &ConvertJob<'_>,
                    dst: &mut [u8],
                    dst_pitch: usize,
                ) {
                    gbrpxxle_to_rgba(job, dst, dst_pitch, $depth);
                }
            )*
        }
    };
}

gbrp_rgba_kernel!(10, 12, 16);

pub fn rgbp_to_r10k(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    gbrpxxle_to_r10k(job, dst, dst_pitch, job.depth(), RGB_PLANES);
}

pub fn rgbp_to_r12l(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    gbrpxxle_to_r12l(job, dst, dst_pitch, job.depth(), RGB_PLANES);
}

pub fn rgbp_to_rg48(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    rgbpxxle_to_rg48(job, dst, dst_pitch, job.depth(), RGB_PLANES);
}

pub fn rgbp_to_rgb(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    if job.depth() == 8 {
        gbrap_to_rgb_rgba(job, dst, dst_pitch, RGB_PLANES, None);
    } else {
        gbrpxxle_to_rgb(job, dst, dst_pitch, job.depth(), RGB_PLANES);
    }
}

pub fn gbrap_to_rgb(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    gbrap_to_rgb_rgba(job, dst, dst_pitch, GBR_PLANES, None);
}

pub fn gbrap_to_rgba(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    gbrap_to_rgb_rgba(job, dst, dst_pitch, GBR_PLANES, Some(GBRA_ALPHA_PLANE));
}

/// Interleaves one row of 8-bit 4:2:2 planes into UYVY or YUYV groups,
/// starting at pixel `start_x` (must be even). An odd row end emits the
/// final unpaired pixel with the absent sample slot zeroed.
pub(crate) fn interleave_pairs(
    row: &mut [u8],
    src_y: &[u8],
    src_cb: &[u8],
    src_cr: &[u8],
    width: usize,
    start_x: usize,
    yuyv: bool,
) {
    debug_assert!(start_x % 2 == 0);

    let pairs = width / 2;
    for x in start_x / 2..pairs {
        let px = &mut row[4 * x..4 * x + 4];
        let (y0, y1) = (src_y[2 * x], src_y[2 * x + 1]);
        if yuyv {
            px.copy_from_slice(&[y0, src_cb[x], y1, src_cr[x]]);
        } else {
            px.copy_from_slice(&[src_cb[x], y0, src_cr[x], y1]);
        }
    }
    if width % 2 == 1 {
        let px = &mut row[4 * pairs..4 * pairs + 4];
        let last = src_y[width - 1];
        if yuyv {
            px.copy_from_slice(&[last, src_cb[pairs], 0, src_cr[pairs]]);
        } else {
            px.copy_from_slice(&[src_cb[pairs], last, src_cr[pairs], 0]);
        }
    }
}

#[inline(always)]
fn yuv422p_to_uyvy_yuyv(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize, yuyv: bool) {
    let width = job.width() as usize;
    for y in 0..job.height() as usize {
        let row = &mut dst[y * dst_pitch..];
        interleave_pairs(
            row,
            job.row(0, y),
            job.row(1, y),
            job.row(2, y),
            width,
            0,
            yuyv,
        );
    }
}

#[inline(always)]
fn yuv422pxxle_to_uyvy(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize, in_depth: u32) {
    let width = job.width() as usize;
    let pairs = width / 2;
    for y in 0..job.height() as usize {
        let src_y = job.row(0, y);
        let src_cb = job.row(1, y);
        let src_cr = job.row(2, y);
        let row = &mut dst[y * dst_pitch..][..width.div_ceil(2) * 4];

        for (x, px) in row.chunks_exact_mut(4).take(pairs).enumerate() {
            px[0] = (load_u16_le(src_cb, x) >> (in_depth - 8)) as u8;
            px[1] = (load_u16_le(src_y, 2 * x) >> (in_depth - 8)) as u8;
            px[2] = (load_u16_le(src_cr, x) >> (in_depth - 8)) as u8;
            px[3] = (load_u16_le(src_y, 2 * x + 1) >> (in_depth - 8)) as u8;
        }
        if width % 2 == 1 {
            let px = &mut row[4 * pairs..4 * pairs + 4];
            px[0] = (load_u16_le(src_cb, pairs) >> (in_depth - 8)) as u8;
            px[1] = (load_u16_le(src_y, width - 1) >> (in_depth - 8)) as u8;
            px[2] = (load_u16_le(src_cr, pairs) >> (in_depth - 8)) as u8;
            px[3] = 0;
        }
    }
}

/// Picks the byte or word path from the descriptor depth.
pub fn yuv422p_to_uyvy(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    if job.depth() == 8 {
        yuv422p_to_uyvy_yuyv(job, dst, dst_pitch, false);
    } else {
        yuv422pxxle_to_uyvy(job, dst, dst_pitch, job.depth());
    }
}

pub fn yuv422p10le_to_uyvy(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    yuv422pxxle_to_uyvy(job, dst, dst_pitch, 10);
}

pub fn yuv422p_to_yuyv(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    debug_assert_eq!(job.depth(), 8);
    yuv422p_to_uyvy_yuyv(job, dst, dst_pitch, true);
}

/// 6 source pixels make four 32-bit little-endian words. Rows are processed
/// in whole 6-pixel groups; a `width % 6` remainder is not emitted.
pub fn yuv422p10le_to_v210(job: &ConvertJob<'_>, dst: &mut [u8], dst_pitch: usize) {
    debug_assert!(job.depth() > 8);

    let width = job.width() as usize;
    let groups = width / 6;
    for y in 0..job.height() as usize {
        let src_y = job.row(0, y);
        let src_cb = job.row(1, y);
        let src_cr = job.row(2, y);
        let row = &mut dst[y * dst_pitch..];

        for (g, out) in row.chunks_exact_mut(16).take(groups).enumerate() {
            let luma = |i| u32::from(load_u16_le(src_y, 6 * g + i));
            let cb = |i| u32::from(load_u16_le(src_cb, 3 * g + i));
            let cr = |i| u32::from(load_u16_le(src_cr, 3 * g + i));

            let w0 = cb(0) | (luma(0) << 10) | (cr(0) << 20);
            let w1 = luma(1) | (cb(1) << 10) | (luma(2) << 20);
            let w2 = cr(1) | (luma(3) << 10) | (cb(2) << 20);
            let w3 = luma(4) | (cr(2) << 10) | (luma(5) << 20);

            out[0..4].copy_from_slice(&w0.to_le_bytes());
            out[4..8].copy_from_slice(&w1.to_le_bytes());
            out[8..12].copy_from_slice(&w2.to_le_bytes());
            out[12..16].copy_from_slice(&w3.to_le_bytes());
        }
    }
}

/// Plain layout copy into a single contiguous buffer; the destination pitch
/// does not apply. Not safe under strip partitioning, run single threaded.
pub fn yuv420p_to_i420(job: &ConvertJob<'_>, dst: &mut [u8], _dst_pitch: usize) {
    let width = job.width() as usize;
    let height = job.height() as usize;
    debug_assert!(width % 2 == 0 && height % 2 == 0);

    let chroma_linesize = width / 2;
    let (dst_y, dst_chroma) = dst.split_at_mut(width * height);
    let (dst_u, dst_v) = dst_chroma.split_at_mut(chroma_linesize * (height / 2));

    for y in 0..height {
        dst_y[y * width..(y + 1) * width].copy_from_slice(&job.row(0, y)[..width]);
    }
    for y in 0..height / 2 {
        dst_u[y * chroma_linesize..(y + 1) * chroma_linesize]
            .copy_from_slice(&job.row(1, y)[..chroma_linesize]);
        dst_v[y * chroma_linesize..(y + 1) * chroma_linesize]
            .copy_from_slice(&job.row(2, y)[..chroma_linesize]);
    }
}

/// Each chroma row serves two output rows; an odd frame ends on a single
/// row fed from the last luma row.
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
            interleave_pairs(
                &mut first[..row_len],
                job.row(0, top),
                src_cb,
                src_cr,
                width,
                0,
                false,
            );
            interleave_pairs(
                &mut second[..row_len],
                job.row(0, top + 1),
                src_cb,
                src_cr,
                width,
                0,
                false,
            );
        } else {
            interleave_pairs(
                &mut rows[..row_len],
                job.row(0, top),
                src_cb,
                src_cr,
                width,
                0,
                false,
            );
        }
    }
}
