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

/// Source plane indices of the R, G, B channels in the G, B, R arrangement.
pub const GBR_PLANES: [usize; 3] = [2, 0, 1];

/// Source plane indices of the R, G, B channels in the natural arrangement.
pub const RGB_PLANES: [usize; 3] = [0, 1, 2];

/// Source plane index of the alpha channel in the G, B, R, A arrangement.
pub const GBRA_ALPHA_PLANE: usize = 3;

/// Byte positions within a 4-byte packed group are reflected on big-endian
/// hosts so the serialized layout stays identical.
#[cfg(target_endian = "little")]
#[inline(always)]
pub const fn byte_swap(i: usize) -> usize {
    i
}

#[cfg(target_endian = "big")]
#[inline(always)]
pub const fn byte_swap(i: usize) -> usize {
    3 - i
}

/// Loads the `x`-th little-endian 16-bit sample of a row.
#[inline(always)]
pub fn load_u16_le(row: &[u8], x: usize) -> u16 {
    u16::from_le_bytes([row[2 * x], row[2 * x + 1]])
}

/// All bits of a packed 32-bit word not covered by the configured R, G, B
/// channels; or-ing it in forces the alpha channel to all-ones no matter
/// which channel order is configured.
#[inline(always)]
pub fn alpha_mask(rgb_shift: [u32; 3]) -> u32 {
    0xFFFF_FFFF
        ^ (0xFF << rgb_shift[0])
        ^ (0xFF << rgb_shift[1])
        ^ (0xFF << rgb_shift[2])
}
