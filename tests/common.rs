#![allow(dead_code)]

use planar_pack_primitives::ErrorKind;
use rand::Rng;

pub fn check_err(result: ErrorKind, err: ErrorKind) {
    assert_eq!(result as u32, err as u32);
}

pub fn random_plane_u8(
    cols: usize,
    rows: usize,
    linesize: usize,
    rng: &mut impl Rng,
) -> Vec<u8> {
    assert!(linesize >= cols);
    let mut plane = vec![0u8; linesize * rows];
    for y in 0..rows {
        for x in 0..cols {
            plane[y * linesize + x] = rng.gen();
        }
    }
    plane
}

pub fn random_plane_u16(
    cols: usize,
    rows: usize,
    linesize: usize,
    depth: u32,
    rng: &mut impl Rng,
) -> Vec<u8> {
    assert!(linesize >= 2 * cols);
    let mut plane = vec![0u8; linesize * rows];
    for y in 0..rows {
        for x in 0..cols {
            let value = rng.gen_range(0u32..1 << depth) as u16;
            plane[y * linesize + 2 * x..y * linesize + 2 * x + 2]
                .copy_from_slice(&value.to_le_bytes());
        }
    }
    plane
}

pub fn solid_plane_u8(cols: usize, rows: usize, linesize: usize, value: u8) -> Vec<u8> {
    assert!(linesize >= cols);
    let mut plane = vec![0u8; linesize * rows];
    for y in 0..rows {
        plane[y * linesize..y * linesize + cols].fill(value);
    }
    plane
}

pub fn solid_plane_u16(cols: usize, rows: usize, linesize: usize, value: u16) -> Vec<u8> {
    assert!(linesize >= 2 * cols);
    let mut plane = vec![0u8; linesize * rows];
    for y in 0..rows {
        for x in 0..cols {
            plane[y * linesize + 2 * x..y * linesize + 2 * x + 2]
                .copy_from_slice(&value.to_le_bytes());
        }
    }
    plane
}

/// Little-endian sample read used to cross-check kernel output.
pub fn sample_u16(plane: &[u8], linesize: usize, x: usize, y: usize) -> u16 {
    u16::from_le_bytes([plane[y * linesize + 2 * x], plane[y * linesize + 2 * x + 1]])
}
