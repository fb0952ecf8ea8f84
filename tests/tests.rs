#![warn(unused)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_code)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
#![allow(clippy::too_many_lines)] // This requires effort to handle

mod common;

use common::check_err;
use itertools::iproduct;
use planar_pack_primitives as ppp;
use ppp::{
    describe_acceleration, find_conversion, packed_buffer_size, ErrorKind, PackedFormat,
    PlanarFormat, STRIDE_AUTO,
};

const PACKED_FORMATS: &[PackedFormat; 9] = &[
    PackedFormat::R12l,
    PackedFormat::Rg48,
    PackedFormat::R10k,
    PackedFormat::V210,
    PackedFormat::Uyvy,
    PackedFormat::Yuyv,
    PackedFormat::I420,
    PackedFormat::Rgb,
    PackedFormat::Rgba,
];

#[test]
fn bootstrap() {
    println!("{}", describe_acceleration());
}

#[test]
fn buffer_size_rejects_empty_frames() {
    for (format, (width, height)) in iproduct!(PACKED_FORMATS, [(0u32, 2u32), (2, 0), (0, 0)]) {
        let status = packed_buffer_size(width, height, *format, STRIDE_AUTO);
        check_err(status.unwrap_err(), ErrorKind::InvalidValue);
    }
}

#[test]
fn buffer_size_tightly_packed() {
    // (format, width, height, expected pitch, expected size)
    let cases = [
        (PackedFormat::R12l, 16, 2, 72, 144),
        (PackedFormat::R12l, 11, 1, 72, 72),
        (PackedFormat::Rg48, 7, 3, 42, 126),
        (PackedFormat::R10k, 5, 4, 20, 80),
        (PackedFormat::V210, 6, 2, 16, 32),
        (PackedFormat::V210, 7, 2, 32, 64),
        (PackedFormat::Uyvy, 4, 2, 8, 16),
        (PackedFormat::Uyvy, 5, 2, 12, 24),
        (PackedFormat::Yuyv, 2, 1, 4, 4),
        (PackedFormat::Rgb, 3, 3, 9, 27),
        (PackedFormat::Rgba, 3, 3, 12, 36),
        (PackedFormat::I420, 6, 4, 6, 36),
    ];

    for (format, width, height, pitch, size) in cases {
        assert_eq!(
            packed_buffer_size(width, height, format, STRIDE_AUTO).unwrap(),
            size,
            "{format} {width}x{height}"
        );
        // An explicit pitch equal to the packed one gives the same answer.
        assert_eq!(
            packed_buffer_size(width, height, format, pitch).unwrap(),
            size,
            "{format} {width}x{height} explicit pitch"
        );
    }
}

#[test]
fn buffer_size_custom_pitch() {
    for format in PACKED_FORMATS {
        let status = packed_buffer_size(16, 4, *format, 1);
        check_err(status.unwrap_err(), ErrorKind::InvalidValue);
    }

    // Padded rows grow the buffer, except for the contiguous planar target.
    assert_eq!(
        packed_buffer_size(4, 2, PackedFormat::Uyvy, 256).unwrap(),
        512
    );
    assert_eq!(
        packed_buffer_size(4, 2, PackedFormat::I420, STRIDE_AUTO).unwrap(),
        12
    );
}

#[test]
fn buffer_size_i420_requires_even_frames() {
    for (width, height) in [(5u32, 4u32), (4, 5), (5, 5)] {
        let status = packed_buffer_size(width, height, PackedFormat::I420, STRIDE_AUTO);
        check_err(status.unwrap_err(), ErrorKind::InvalidValue);
    }
}

#[test]
fn conversion_table() {
    let expected = [
        (PackedFormat::Uyvy, PlanarFormat::Yuv422p, 1, true),
        (PackedFormat::Yuyv, PlanarFormat::Yuv422p, 1, true),
        (PackedFormat::I420, PlanarFormat::Yuv420p, 1, false),
        (PackedFormat::Rgb, PlanarFormat::Rgbp, 1, true),
        (PackedFormat::V210, PlanarFormat::Yuv422p, 2, true),
        (PackedFormat::R10k, PlanarFormat::Rgbp, 2, true),
        (PackedFormat::R12l, PlanarFormat::Rgbp, 2, true),
        (PackedFormat::Rg48, PlanarFormat::Rgbp, 2, true),
    ];

    for (dst, src, in_bytes_per_sample, parallel) in expected {
        let conversion = find_conversion(dst).unwrap();
        assert_eq!(conversion.src, src);
        assert_eq!(conversion.dst, dst);
        assert_eq!(conversion.in_bytes_per_sample, in_bytes_per_sample);
        assert_eq!(conversion.parallel, parallel);
    }

    // No conversion emits free-standing rgba; callers must treat this as
    // unsupported.
    assert!(find_conversion(PackedFormat::Rgba).is_none());
}
