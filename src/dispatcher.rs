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
use crate::job::ConvertJob;
use crate::registry::KernelFn;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::mem;

/// Runs `kernel` over `num_threads` horizontal strips of the frame and
/// returns once every strip has completed. `num_threads == 0` selects the
/// detected core count.
///
/// The base strip height is `height / num_threads` rounded down to an even
/// number, so subsampled chroma rows divide evenly between strips; the last
/// strip takes the remainder. Each strip gets a copy of the descriptor with
/// its plane slices advanced by the (chroma-shifted) strip distance and a
/// disjoint region of `dst`, so strips need no synchronization beyond the
/// final join. There is no way to abort a dispatched conversion.
///
/// The dispatcher performs no format-aware safety check of its own: callers
/// pass `num_threads = 1` for kernels whose chroma handling is not verified
/// under partitioning, as recorded by [`Conversion`](crate::Conversion).
///
/// # Panics
///
/// Panics if `dst` is shorter than the frame described by `job` at
/// `dst_pitch`.
pub fn convert_parallel(
    kernel: KernelFn,
    job: &ConvertJob<'_>,
    dst: &mut [u8],
    dst_pitch: usize,
    num_threads: usize,
) {
    let num_threads = if num_threads == 0 {
        rayon::current_num_threads()
    } else {
        num_threads
    };
    if num_threads <= 1 {
        kernel(job, dst, dst_pitch);
        return;
    }

    let height = job.height();
    let base = (height / num_threads as u32) & !1;

    let mut strips = Vec::with_capacity(num_threads);
    let mut rest = dst;
    for i in 0..num_threads {
        let last = i == num_threads - 1;
        let rows = if last {
            height - base * (num_threads as u32 - 1)
        } else {
            base
        };
        let bytes = if last {
            rest.len()
        } else {
            base as usize * dst_pitch
        };
        let (out, tail) = mem::take(&mut rest).split_at_mut(bytes);
        rest = tail;
        strips.push((job.strip(base * i as u32, rows), out));
    }

    strips
        .into_par_iter()
        .for_each(|(strip, out)| kernel(&strip, out, dst_pitch));
}
