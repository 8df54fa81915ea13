//! Intensity histograms and simple whole-volume voxel transforms.

use crate::types::WindowingFunction;
use crate::volume::Volume;
use crate::window::windowed_value;

/// A 16-bit intensity histogram. Bins are `u32` rather than `u16` so a large
/// volume cannot saturate a bin before every voxel has been counted.
pub fn histogram(volume: &Volume) -> Box<[u32; 65536]> {
    let mut bins = Box::new([0u32; 65536]);
    for &value in volume.raw() {
        bins[value as usize] += 1;
    }
    bins
}

/// A histogram of voxel values after applying a VOI LUT window, without
/// allocating an intermediate windowed volume.
pub fn histogram_with_windowing(
    volume: &Volume,
    func: WindowingFunction,
    center: f64,
    width: f64,
    offset: f64,
) -> crate::error::Result<Box<[u32; 65536]>> {
    if width <= 0.0 {
        return Err(crate::error::VdtkError::InvalidArgument(format!(
            "window width {width} must be positive"
        )));
    }
    let mut bins = Box::new([0u32; 65536]);
    for &value in volume.raw() {
        let windowed = windowed_value(value, func, center, width, offset);
        bins[windowed as usize] += 1;
    }
    Ok(bins)
}

/// Replaces every voxel `v` with `u16::MAX - v`.
pub fn invert(volume: &mut Volume) {
    for value in volume.raw_mut() {
        *value = u16::MAX - *value;
    }
}

/// Byte-swaps every voxel in place, as if the volume had been read with the
/// wrong endianness.
pub fn flip_endianness(volume: &mut Volume) {
    for value in volume.raw_mut() {
        *value = value.swap_bytes();
    }
}
