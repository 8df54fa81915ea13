//! Threshold-based bounding-box cropping.

use crate::types::VolumeSize;
use crate::volume::Volume;
use std::ops::Range;

/// Crops `volume` to the tightest axis-aligned box containing every voxel
/// strictly greater than `threshold`.
///
/// Bounds are found axis by axis (x, then y, then z), each pass narrowing
/// its search to the bounds already established by the earlier ones. If no
/// voxel exceeds the threshold, the volume is returned unchanged.
pub fn cut(volume: &Volume, threshold: u16) -> Volume {
    let size = volume.size();

    if !any_voxel_exceeds(volume, threshold, 0..size.x, 0..size.y, 0..size.z) {
        log::debug!("edge cut: no voxel exceeds threshold {threshold}, volume left unchanged");
        return volume.clone();
    }

    let xmin = (0..size.x)
        .find(|&x| any_voxel_exceeds(volume, threshold, x..x + 1, 0..size.y, 0..size.z))
        .expect("at least one voxel exceeds threshold");
    let xmax = (0..size.x)
        .rev()
        .find(|&x| any_voxel_exceeds(volume, threshold, x..x + 1, 0..size.y, 0..size.z))
        .expect("at least one voxel exceeds threshold");

    let ymin = (0..size.y)
        .find(|&y| any_voxel_exceeds(volume, threshold, xmin..xmax + 1, y..y + 1, 0..size.z))
        .expect("narrowed x bounds still contain an exceeding voxel");
    let ymax = (0..size.y)
        .rev()
        .find(|&y| any_voxel_exceeds(volume, threshold, xmin..xmax + 1, y..y + 1, 0..size.z))
        .expect("narrowed x bounds still contain an exceeding voxel");

    let zmin = (0..size.z)
        .find(|&z| any_voxel_exceeds(volume, threshold, xmin..xmax + 1, ymin..ymax + 1, z..z + 1))
        .expect("narrowed x/y bounds still contain an exceeding voxel");
    let zmax = (0..size.z)
        .rev()
        .find(|&z| any_voxel_exceeds(volume, threshold, xmin..xmax + 1, ymin..ymax + 1, z..z + 1))
        .expect("narrowed x/y bounds still contain an exceeding voxel");

    let new_size = VolumeSize::new(xmax - xmin + 1, ymax - ymin + 1, zmax - zmin + 1);
    log::debug!(
        "edge cut: {:?} -> {:?} (bounds x[{xmin},{xmax}] y[{ymin},{ymax}] z[{zmin},{zmax}])",
        size,
        new_size
    );

    let mut output = Volume::new(new_size, volume.spacing());
    for z in 0..new_size.z {
        for y in 0..new_size.y {
            for x in 0..new_size.x {
                let value = volume.get(x + xmin, y + ymin, z + zmin).expect("within source bounds");
                output.set(x, y, z, value).expect("within output bounds");
            }
        }
    }
    output
}

fn any_voxel_exceeds(volume: &Volume, threshold: u16, xs: Range<u32>, ys: Range<u32>, zs: Range<u32>) -> bool {
    for z in zs {
        for y in ys.clone() {
            for x in xs.clone() {
                if volume.get(x, y, z).expect("in bounds") > threshold {
                    return true;
                }
            }
        }
    }
    false
}

/// Crops using a threshold expressed as a fraction of the full `u16` range.
/// Values outside `[0.0, 1.0]` are silently ignored (the volume is returned
/// unchanged) since they cannot correspond to a real voxel value.
pub fn cut_normalized(volume: &Volume, threshold: f32) -> Volume {
    if !(0.0..=1.0).contains(&threshold) {
        log::warn!("edge cut: normalized threshold {threshold} outside [0, 1], volume left unchanged");
        return volume.clone();
    }
    let scaled = (threshold * u16::MAX as f32).round() as u16;
    cut(volume, scaled)
}
