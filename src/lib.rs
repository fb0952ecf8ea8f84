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
#![warn(missing_docs)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
#![allow(
    clippy::too_many_arguments, // API design
    clippy::similar_names, // This requires effort to ensure
    clippy::inline_always,
    // Sample repacking truncates on purpose
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    // Yield false positives
    clippy::must_use_candidate,
)]

//! Planar pack primitives is a library to convert decoded planar pixel
//! buffers into packed wire and display formats.
//!
//! It is able to perform the following conversions:
//!
//! | Source arrangement   | Destination packed formats          |
//! | -------------------- | ----------------------------------- |
//! | GBRP (10/12/16 bit)  | R10K, R12L, RG48, RGB, RGBA         |
//! | GBRAP                | RGB, RGBA                           |
//! | RGBP                 | R10K, R12L, RG48, RGB               |
//! | YUV 4:2:2 planar     | UYVY, YUYV, v210                    |
//! | YUV 4:2:0 planar     | I420, UYVY                          |
//!
//! Conversions only repack sample layouts; depth changes are pure bit
//! shifts and no color model math is involved.
//!
//! # Examples
//!
//! Pack an 8-bit 4:2:2 planar frame into uyvy, letting the dispatcher use
//! every detected core:
//! ```
//! use planar_pack_primitives as ppp;
//! use ppp::{convert_image, ConvertJob, PackedFormat, PlanarFormat, STRIDE_AUTO};
//! use std::error;
//!
//! fn convert() -> Result<(), Box<dyn error::Error>> {
//!     const WIDTH: u32 = 640;
//!     const HEIGHT: u32 = 480;
//!
//!     let src_y = vec![16u8; (WIDTH as usize) * (HEIGHT as usize)];
//!     let src_cb = vec![128u8; (WIDTH as usize) / 2 * (HEIGHT as usize)];
//!     let src_cr = vec![128u8; (WIDTH as usize) / 2 * (HEIGHT as usize)];
//!     let mut dst = vec![0u8; 2 * (WIDTH as usize) * (HEIGHT as usize)];
//!
//!     let job = ConvertJob::new(
//!         PlanarFormat::Yuv422p,
//!         WIDTH,
//!         HEIGHT,
//!         8,
//!         &[&src_y[..], &src_cb[..], &src_cr[..]],
//!         &[WIDTH as usize, (WIDTH as usize) / 2, (WIDTH as usize) / 2],
//!     )?;
//!
//!     convert_image(&job, PackedFormat::Uyvy, &mut dst, STRIDE_AUTO, 0)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Compute how many bytes are needed to store a packed image of a given
//! format and size:
//! ```
//! use planar_pack_primitives as ppp;
//! use ppp::{packed_buffer_size, PackedFormat, STRIDE_AUTO};
//! use std::error;
//!
//! fn compute_size() -> Result<(), Box<dyn error::Error>> {
//!     const WIDTH: u32 = 640;
//!     const HEIGHT: u32 = 480;
//!
//!     let size = packed_buffer_size(WIDTH, HEIGHT, PackedFormat::V210, STRIDE_AUTO)?;
//!     let buffer: Vec<_> = vec![0u8; size];
//!
//!     // Do something with buffer
//!     // --snip--
//!
//!     Ok(())
//! }
//! ```
//!
//! Integrate with a decoder through the conversion table, scaling the
//! decoder's sample-count strides to bytes:
//! ```
//! use planar_pack_primitives as ppp;
//! use ppp::{convert_image, ConvertJob, PackedFormat, PlanarFormat, STRIDE_AUTO};
//! use std::error;
//!
//! fn deliver_frame(
//!     planes: &[&[u8]; 3],
//!     stride_in_samples: usize,
//!     width: u32,
//!     height: u32,
//!     dst: &mut [u8],
//! ) -> Result<(), Box<dyn error::Error>> {
//!     let conversion = ppp::find_conversion(PackedFormat::Uyvy)
//!         .ok_or(ppp::ErrorKind::InvalidOperation)?;
//!
//!     let linesize = stride_in_samples * conversion.in_bytes_per_sample;
//!     let job = ConvertJob::new(
//!         conversion.src,
//!         width,
//!         height,
//!         8,
//!         planes,
//!         &[linesize, linesize / 2, linesize / 2],
//!     )?;
//!
//!     convert_image(&job, PackedFormat::Uyvy, dst, STRIDE_AUTO, 0)?;
//!
//!     Ok(())
//! }
//! ```
mod convert_image;
mod cpu_info;
mod dispatcher;
mod job;
mod pixel_format;
mod registry;

use cpu_info::{CpuManufacturer, InstructionSet};
use std::error;
use std::fmt;
#[cfg(feature = "test_instruction_sets")]
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::OnceLock;

pub use dispatcher::convert_parallel;
pub use job::{ConvertJob, DEFAULT_RGB_SHIFT};
pub use pixel_format::{PackedFormat, PlanarFormat, MAX_NUMBER_OF_PLANES, STRIDE_AUTO};
pub use registry::{Conversion, KernelFn};

/// An enumeration of errors.
#[derive(Debug)]
pub enum ErrorKind {
    /// One or more parameters have invalid values for the called function
    InvalidValue,
    /// The combination of parameters is unsupported for the called function
    InvalidOperation,
    /// Not enough data was provided to the called function. Typically, provided
    /// buffers are not correctly sized
    NotEnoughData,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::InvalidValue => write!(
                f,
                "One or more parameters have not legal values for the command"
            ),
            ErrorKind::InvalidOperation => write!(
                f,
                "The combination of parameters is not legal for the command"
            ),
            ErrorKind::NotEnoughData => write!(f, "Not enough data provided"),
        }
    }
}

impl error::Error for ErrorKind {
    fn cause(&self) -> Option<&dyn error::Error> {
        None
    }
}

#[cfg(feature = "test_instruction_sets")]
static TEST_SET: AtomicI32 = AtomicI32::new(-1);

struct Context {
    manufacturer: CpuManufacturer,
    set: InstructionSet,
    conversions: [Conversion; registry::TABLE_SIZE],
    #[cfg(feature = "test_instruction_sets")]
    scalar_conversions: [Conversion; registry::TABLE_SIZE],
}

impl Context {
    pub fn global() -> &'static Context {
        static INSTANCE: OnceLock<Context> = OnceLock::new();
        INSTANCE.get_or_init(Context::new)
    }

    pub fn new() -> Self {
        let (manufacturer, set) = cpu_info::get();
        Context {
            manufacturer,
            set,
            conversions: registry::build(set),
            #[cfg(feature = "test_instruction_sets")]
            scalar_conversions: registry::build(InstructionSet::X86),
        }
    }

    fn conversions(&self) -> &[Conversion; registry::TABLE_SIZE] {
        #[cfg(feature = "test_instruction_sets")]
        if TEST_SET.load(Ordering::SeqCst) == 0 {
            return &self.scalar_conversions;
        }
        &self.conversions
    }

    fn active_set(&self) -> InstructionSet {
        #[cfg(feature = "test_instruction_sets")]
        if TEST_SET.load(Ordering::SeqCst) == 0 {
            return InstructionSet::X86;
        }
        self.set
    }
}

/// Returns a description of the algorithms that are best for the running cpu
/// and available instruction sets
///
/// # Examples
/// ```
/// use planar_pack_primitives as ppp;
/// println!("{}", ppp::describe_acceleration());
/// // => {cpu-manufacturer:Intel,instruction-set:Sse2}
/// ```
pub fn describe_acceleration() -> String {
    let state = Context::global();

    format!(
        "{{cpu-manufacturer:{:?},instruction-set:{:?}}}",
        state.manufacturer, state.set
    )
}

fn resolve_output(
    format: PackedFormat,
    width: u32,
    height: u32,
    dst_pitch: usize,
) -> Result<(usize, usize), ErrorKind> {
    if !pixel_format::is_compatible(format, width, height) {
        return Err(ErrorKind::InvalidValue);
    }

    let min_pitch = pixel_format::default_pitch(format, width);
    let pitch = if dst_pitch == STRIDE_AUTO {
        min_pitch
    } else {
        dst_pitch
    };
    if pitch < min_pitch {
        return Err(ErrorKind::InvalidValue);
    }

    let size = pixel_format::buffer_size(format, width, height, pitch)
        .ok_or(ErrorKind::InvalidValue)?;
    Ok((pitch, size))
}

/// Compute the number of bytes required to store a packed image given its
/// format, dimensions and optionally its pitch
///
/// Default pitch (the one you would set for tightly packed rows) can be
/// selected with the constant [`STRIDE_AUTO`]. [`PackedFormat::I420`]
/// produces a contiguous buffer and ignores the pitch.
///
/// # Errors
///
/// * [`InvalidValue`] if `width` or `height` is zero or violates the size
///   constraints imposed by the packed format
///
/// * [`InvalidValue`] if `dst_pitch` is not [`STRIDE_AUTO`] and cannot hold
///   a row of `width` pixels
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`STRIDE_AUTO`]: ./constant.STRIDE_AUTO.html
pub fn packed_buffer_size(
    width: u32,
    height: u32,
    format: PackedFormat,
    dst_pitch: usize,
) -> Result<usize, ErrorKind> {
    resolve_output(format, width, height, dst_pitch).map(|(_, size)| size)
}

/// Looks up the conversion producing `dst`.
///
/// The table is scanned linearly and the first structurally matching entry
/// wins. `None` means the conversion is unsupported; callers are expected to
/// refuse the requested output format rather than retry.
pub fn find_conversion(dst: PackedFormat) -> Option<Conversion> {
    registry::lookup(Context::global().conversions(), dst).copied()
}

/// Converts the planar frame described by `job` into `dst_format`, packing
/// into `dst` at `dst_pitch` ([`STRIDE_AUTO`] selects the tightly packed
/// pitch).
///
/// The kernel is taken from the conversion table. `num_threads` is handed to
/// the parallel dispatcher: `0` selects the detected core count, `1` stays
/// on the calling thread; conversions not verified safe under strip
/// partitioning always run single threaded. The call returns once every
/// strip has completed.
///
/// # Errors
///
/// * [`InvalidOperation`] if no conversion produces `dst_format`
///
/// * [`InvalidValue`] if the descriptor's plane arrangement or sample width
///   does not match the conversion, or the dimensions or pitch violate the
///   destination format constraints
///
/// * [`NotEnoughData`] if `dst` is smaller than the frame requires
///
/// [`InvalidOperation`]: ./enum.ErrorKind.html#variant.InvalidOperation
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`STRIDE_AUTO`]: ./constant.STRIDE_AUTO.html
pub fn convert_image(
    job: &ConvertJob<'_>,
    dst_format: PackedFormat,
    dst: &mut [u8],
    dst_pitch: usize,
    num_threads: usize,
) -> Result<(), ErrorKind> {
    let conversion = find_conversion(dst_format).ok_or(ErrorKind::InvalidOperation)?;
    if conversion.src != job.format() || conversion.in_bytes_per_sample != job.bytes_per_sample() {
        return Err(ErrorKind::InvalidValue);
    }

    let (pitch, required) = resolve_output(dst_format, job.width(), job.height(), dst_pitch)?;
    if dst.len() < required {
        return Err(ErrorKind::NotEnoughData);
    }

    let num_threads = if conversion.parallel { num_threads } else { 1 };
    convert_parallel(conversion.kernel, job, dst, pitch, num_threads);
    Ok(())
}

macro_rules! select_kernel {
    ($name:ident) => {{
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        let kernel: KernelFn = match Context::global().active_set() {
            InstructionSet::X86 => convert_image::x86::$name,
            InstructionSet::Sse2 => convert_image::sse2::$name,
        };
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        let kernel: KernelFn = convert_image::x86::$name;
        kernel
    }};
}

macro_rules! packed_kernels {
    ($($(#[$attr:meta])* $name:ident => $dst:ident,)*) => {
        $(
            $(#[$attr])*
            ///
            /// Writes the frame described by `job` into `dst` at `dst_pitch`
            /// ([`STRIDE_AUTO`] selects the tightly packed pitch) on the
            /// calling thread; use [`convert_parallel`] to partition the
            /// frame instead.
            ///
            /// # Errors
            ///
            /// * [`InvalidValue`] if the dimensions or pitch violate the
            ///   destination format constraints
            ///
            /// * [`NotEnoughData`] if `dst` is smaller than the frame
            ///   requires
            ///
            /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
            /// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
            /// [`STRIDE_AUTO`]: ./constant.STRIDE_AUTO.html
            /// [`convert_parallel`]: ./fn.convert_parallel.html
            pub fn $name(
                job: &ConvertJob<'_>,
                dst: &mut [u8],
                dst_pitch: usize,
            ) -> Result<(), ErrorKind> {
                let (pitch, required) =
                    resolve_output(PackedFormat::$dst, job.width(), job.height(), dst_pitch)?;
                if dst.len() < required {
                    return Err(ErrorKind::NotEnoughData);
                }

                let kernel = select_kernel!($name);
                kernel(job, dst, pitch);
                Ok(())
            }
        )*
    };
}

packed_kernels! {
    /// Packs 10-bit G/B/R planes into R10K words.
    gbrp10le_to_r10k => R10k,
    /// Packs 12-bit G/B/R planes into R10K words.
    gbrp12le_to_r10k => R10k,
    /// Packs 16-bit G/B/R planes into R10K words.
    gbrp16le_to_r10k => R10k,
    /// Packs R/G/B planes into R10K words, scaling from the descriptor depth.
    rgbp_to_r10k => R10k,
    /// Packs 12-bit G/B/R planes into R12L 36-byte blocks.
    gbrp12le_to_r12l => R12l,
    /// Packs 16-bit G/B/R planes into R12L 36-byte blocks.
    gbrp16le_to_r12l => R12l,
    /// Packs R/G/B planes into R12L blocks, scaling from the descriptor
    /// depth; the depth must be at least 12 bits.
    rgbp_to_r12l => R12l,
    /// Expands 10-bit G/B/R planes to RG48 triplets.
    gbrp10le_to_rg48 => Rg48,
    /// Expands 12-bit G/B/R planes to RG48 triplets.
    gbrp12le_to_rg48 => Rg48,
    /// Expands 16-bit G/B/R planes to RG48 triplets.
    gbrp16le_to_rg48 => Rg48,
    /// Expands R/G/B planes to RG48 triplets, scaling from the descriptor
    /// depth.
    rgbp_to_rg48 => Rg48,
    /// Interleaves 10-bit G/B/R planes into 8-bit RGB.
    gbrp10le_to_rgb => Rgb,
    /// Interleaves 12-bit G/B/R planes into 8-bit RGB.
    gbrp12le_to_rgb => Rgb,
    /// Interleaves 16-bit G/B/R planes into 8-bit RGB.
    gbrp16le_to_rgb => Rgb,
    /// Interleaves R/G/B planes into 8-bit RGB, scaling from the descriptor
    /// depth.
    rgbp_to_rgb => Rgb,
    /// Packs 10-bit G/B/R planes into RGBA words laid out by the
    /// descriptor's channel shifts; alpha bits are forced to ones.
    gbrp10le_to_rgba => Rgba,
    /// Packs 12-bit G/B/R planes into RGBA words laid out by the
    /// descriptor's channel shifts; alpha bits are forced to ones.
    gbrp12le_to_rgba => Rgba,
    /// Packs 16-bit G/B/R planes into RGBA words laid out by the
    /// descriptor's channel shifts; alpha bits are forced to ones.
    gbrp16le_to_rgba => Rgba,
    /// Interleaves 8-bit G/B/R/A planes into RGB, dropping alpha.
    gbrap_to_rgb => Rgb,
    /// Interleaves 8-bit G/B/R/A planes into RGBA.
    gbrap_to_rgba => Rgba,
    /// Interleaves 4:2:2 planes into UYVY; samples wider than 8 bits are
    /// shifted down to 8.
    yuv422p_to_uyvy => Uyvy,
    /// Interleaves 10-bit 4:2:2 planes into UYVY.
    yuv422p10le_to_uyvy => Uyvy,
    /// Interleaves 8-bit 4:2:2 planes into YUYV.
    yuv422p_to_yuyv => Yuyv,
    /// Packs 10-bit 4:2:2 planes into v210 words. Rows are emitted in whole
    /// 6-pixel groups; a `width % 6` remainder is not written.
    yuv422p10le_to_v210 => V210,
    /// Copies 4:2:0 planes into a contiguous I420 buffer. Not safe under
    /// strip partitioning; keep it on one thread.
    yuv420p_to_i420 => I420,
    /// Interleaves 4:2:0 planes into UYVY, reusing each chroma row for two
    /// output rows.
    yuv420p_to_uyvy => Uyvy,
}

/// This is for internal use only
#[cfg(feature = "test_instruction_sets")]
pub fn initialize_with_instruction_set(instruction_set: &str) {
    match instruction_set {
        "x86" => TEST_SET.store(0, Ordering::SeqCst),
        _ => TEST_SET.store(-1, Ordering::SeqCst),
    };
}
