//! Headless output: color snapshots to image files, no GPU involved.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::world::Rgba;

/// Encodes a row-major RGBA snapshot as a binary PPM (P6) image.
///
/// PPM carries no alpha, so the alpha byte is dropped.
pub fn ppm_bytes(width: usize, height: usize, colors: &[Rgba]) -> Vec<u8> {
    debug_assert_eq!(colors.len(), width * height);
    let mut bytes = format!("P6\n{width} {height}\n255\n").into_bytes();
    bytes.reserve(colors.len() * 3);
    for color in colors {
        bytes.extend_from_slice(&color[..3]);
    }
    bytes
}

/// Writes the snapshot to `path` as binary PPM.
pub fn write_ppm(path: &Path, width: usize, height: usize, colors: &[Rgba]) -> anyhow::Result<()> {
    fs::write(path, ppm_bytes(width, height, colors))
        .with_context(|| format!("writing snapshot {}", path.display()))
}
