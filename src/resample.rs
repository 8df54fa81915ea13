//! Multi-mode resampling: nearest neighbor, trilinear, and tricubic.

use crate::error::{Result, VdtkError};
use crate::pool::WorkerPool;
use crate::types::{ScaleFactor, ScaleMode, VolumeSize, VolumeSpacing};
use crate::volume::Volume;
use crate::writer::RawWriter;

/// Resamples `volume` by `factor`, independently per axis, using `mode`.
///
/// An identity factor is a no-op clone. A non-positive factor on any axis
/// returns [`VdtkError::InvalidArgument`].
pub fn scale(volume: &Volume, factor: ScaleFactor, mode: ScaleMode, threads: usize) -> Result<Volume> {
    if !factor.is_positive() {
        return Err(VdtkError::InvalidArgument(format!(
            "scale factor {:?} must be positive on every axis",
            factor
        )));
    }
    if factor.is_identity() {
        return Ok(volume.clone());
    }

    let old_size = volume.size();
    let old_spacing = volume.spacing();
    let new_size = VolumeSize::new(
        ((old_size.x as f64 * factor.x).round() as u32).max(1),
        ((old_size.y as f64 * factor.y).round() as u32).max(1),
        ((old_size.z as f64 * factor.z).round() as u32).max(1),
    );
    let new_spacing = VolumeSpacing::new(
        old_spacing.x / factor.x,
        old_spacing.y / factor.y,
        old_spacing.z / factor.z,
    );

    log::debug!(
        "resampling volume {:?} -> {:?} with {:?}",
        old_size,
        new_size,
        mode
    );

    let mut output = Volume::new(new_size, new_spacing);
    let writer = RawWriter::new(output.raw_ptr_mut(), output.voxel_count());

    // Unclamped source-space position, per the original `scaleSliceX`: only
    // the sample *indices* the interpolators read are bounded (`cubic_neighbors`,
    // `trilinear`'s `x1=min(ceil,size-1)`), never the position itself, so the
    // fractional part `t` stays correct all the way to the last output slice.
    let map_axis = |new_coord: u32, factor: f64| -> f64 { new_coord as f64 / factor };

    {
        let pool = WorkerPool::new(threads);
        for nx in 0..new_size.x {
            let writer_ref = &writer;
            let volume_ref = volume;
            pool.enqueue(move || {
                let src_x = map_axis(nx, factor.x);
                for ny in 0..new_size.y {
                    let src_y = map_axis(ny, factor.y);
                    for nz in 0..new_size.z {
                        let src_z = map_axis(nz, factor.z);
                        let value = match mode {
                            ScaleMode::Nearest => nearest(volume_ref, src_x, src_y, src_z),
                            ScaleMode::Trilinear => trilinear(volume_ref, src_x, src_y, src_z),
                            ScaleMode::Tricubic => tricubic(volume_ref, src_x, src_y, src_z),
                        };
                        let idx = nx as usize
                            + new_size.x as usize * (ny as usize + new_size.y as usize * nz as usize);
                        unsafe { writer_ref.set(idx, value) };
                    }
                }
            });
        }
        pool.join();
    }

    Ok(output)
}

/// Nearest-neighbor resampling by `factor`.
pub fn scale_nearest(volume: &Volume, factor: ScaleFactor, threads: usize) -> Result<Volume> {
    scale(volume, factor, ScaleMode::Nearest, threads)
}

/// Trilinear resampling by `factor`.
pub fn scale_trilinear(volume: &Volume, factor: ScaleFactor, threads: usize) -> Result<Volume> {
    scale(volume, factor, ScaleMode::Trilinear, threads)
}

/// Tricubic resampling by `factor`.
pub fn scale_tricubic(volume: &Volume, factor: ScaleFactor, threads: usize) -> Result<Volume> {
    scale(volume, factor, ScaleMode::Tricubic, threads)
}

fn clip_truncate(value: f64) -> u16 {
    value.clamp(0.0, u16::MAX as f64) as u16
}

fn nearest(volume: &Volume, src_x: f64, src_y: f64, src_z: f64) -> u16 {
    let size = volume.size();
    let x = (src_x.round() as u32).min(size.x - 1);
    let y = (src_y.round() as u32).min(size.y - 1);
    let z = (src_z.round() as u32).min(size.z - 1);
    volume.get(x, y, z).expect("clamped nearest index is in bounds")
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn voxel(volume: &Volume, x: u32, y: u32, z: u32) -> f64 {
    volume.get(x, y, z).expect("source coordinate is in bounds by construction") as f64
}

fn trilinear(volume: &Volume, src_x: f64, src_y: f64, src_z: f64) -> u16 {
    let size = volume.size();
    let x0 = src_x.floor() as u32;
    let y0 = src_y.floor() as u32;
    let z0 = src_z.floor() as u32;
    let x1 = (x0 + 1).min(size.x - 1);
    let y1 = (y0 + 1).min(size.y - 1);
    let z1 = (z0 + 1).min(size.z - 1);
    let tx = src_x - x0 as f64;
    let ty = src_y - y0 as f64;
    let tz = src_z - z0 as f64;

    let c00 = lerp(voxel(volume, x0, y0, z0), voxel(volume, x1, y0, z0), tx);
    let c01 = lerp(voxel(volume, x0, y0, z1), voxel(volume, x1, y0, z1), tx);
    let c10 = lerp(voxel(volume, x0, y1, z0), voxel(volume, x1, y1, z0), tx);
    let c11 = lerp(voxel(volume, x0, y1, z1), voxel(volume, x1, y1, z1), tx);
    let c0 = lerp(c00, c10, ty);
    let c1 = lerp(c01, c11, ty);
    clip_truncate(lerp(c0, c1, tz))
}

/// Catmull-Rom style cubic through four samples at parameter `t` in `[0, 1]`
/// between `v1` and `v2`.
fn cubic(v0: f64, v1: f64, v2: f64, v3: f64, t: f64) -> f64 {
    v1 + 0.5
        * t
        * ((v2 - v0) + t * (2.0 * v0 - 5.0 * v1 + 4.0 * v2 - v3 + t * (3.0 * (v1 - v2) + v3 - v0)))
}

/// The four neighbor indices along one axis for a cubic stencil centered on
/// `(floor(src), floor(src)+1)`, with edge indices collapsed (duplicated)
/// instead of reading out of bounds.
fn cubic_neighbors(src: f64, extent: u32) -> (u32, u32, u32, u32, f64) {
    let x0 = src.floor() as u32;
    let t = src - x0 as f64;
    let x1 = (x0 + 1).min(extent - 1);
    let xm1 = if x0 >= 1 { x0 - 1 } else { x0 };
    let xp2 = if x1 < extent - 1 { x1 + 1 } else { x1 };
    (xm1, x0, x1, xp2, t)
}

fn tricubic(volume: &Volume, src_x: f64, src_y: f64, src_z: f64) -> u16 {
    let size = volume.size();
    let (xm1, x0, x1, xp2, tx) = cubic_neighbors(src_x, size.x);
    let (ym1, y0, y1, yp2, ty) = cubic_neighbors(src_y, size.y);
    let (zm1, z0, z1, zp2, tz) = cubic_neighbors(src_z, size.z);
    let xs = [xm1, x0, x1, xp2];
    let ys = [ym1, y0, y1, yp2];
    let zs = [zm1, z0, z1, zp2];

    let mut along_y = [[0.0f64; 4]; 4];
    for (xi, &x) in xs.iter().enumerate() {
        for (yi, &y) in ys.iter().enumerate() {
            let samples = [
                voxel(volume, x, y, zs[0]),
                voxel(volume, x, y, zs[1]),
                voxel(volume, x, y, zs[2]),
                voxel(volume, x, y, zs[3]),
            ];
            along_y[xi][yi] = cubic(samples[0], samples[1], samples[2], samples[3], tz);
        }
    }

    let mut along_x = [0.0f64; 4];
    for xi in 0..4 {
        let row = along_y[xi];
        along_x[xi] = cubic(row[0], row[1], row[2], row[3], ty);
    }

    clip_truncate(cubic(along_x[0], along_x[1], along_x[2], along_x[3], tx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_volume() -> Volume {
        let size = VolumeSize::new(4, 4, 4);
        let spacing = VolumeSpacing::new(1.0, 1.0, 1.0);
        let mut data = Vec::with_capacity(64);
        for z in 0..4u32 {
            for y in 0..4u32 {
                for x in 0..4u32 {
                    data.push((x * 10) as u16);
                    let _ = (y, z);
                }
            }
        }
        Volume::from_raw(size, spacing, data).unwrap()
    }

    #[test]
    fn identity_factor_is_a_clone() {
        let v = ramp_volume();
        let out = scale(&v, ScaleFactor::uniform(1.0), ScaleMode::Nearest, 2).unwrap();
        assert_eq!(out, v);
    }

    #[test]
    fn non_positive_factor_is_rejected() {
        let v = ramp_volume();
        let err = scale(&v, ScaleFactor::new(0.0, 1.0, 1.0), ScaleMode::Nearest, 2).unwrap_err();
        assert!(matches!(err, VdtkError::InvalidArgument(_)));
    }

    #[test]
    fn upscale_doubles_reported_size() {
        let v = ramp_volume();
        let out = scale(&v, ScaleFactor::uniform(2.0), ScaleMode::Nearest, 2).unwrap();
        assert_eq!(out.size(), VolumeSize::new(8, 8, 8));
    }

    #[test]
    fn downscale_halves_reported_size() {
        let v = ramp_volume();
        let out = scale(&v, ScaleFactor::uniform(0.5), ScaleMode::Trilinear, 2).unwrap();
        assert_eq!(out.size(), VolumeSize::new(2, 2, 2));
    }

    #[test]
    fn trilinear_interpolates_between_known_samples() {
        let v = ramp_volume();
        let value = trilinear(&v, 0.5, 0.0, 0.0);
        assert_eq!(value, 5);
    }

    #[test]
    fn upscale_uses_unclamped_position_at_top_boundary() {
        // old extent 4, factor 2, output x'=7 -> src=3.5, unclamped: stencil
        // {v[2]=20, v[3]=30, v[3]=30, v[3]=30}, t=0.5 -> cubic = 30.625,
        // truncated (not rounded) to 30.
        let v = ramp_volume();
        let out = scale(&v, ScaleFactor::uniform(2.0), ScaleMode::Tricubic, 1).unwrap();
        assert_eq!(out.get(7, 0, 0).unwrap(), 30);
    }

    #[test]
    fn tricubic_truncates_rather_than_rounds_non_grid_values() {
        let v = ramp_volume();
        assert_eq!(tricubic(&v, 3.5, 0.0, 0.0), 30);
    }

    #[test]
    fn tricubic_matches_corners_exactly_at_grid_points() {
        let v = ramp_volume();
        for x in 0..4u32 {
            let value = tricubic(&v, x as f64, 0.0, 0.0);
            assert_eq!(value, v.get(x, 0, 0).unwrap());
        }
    }

    #[test]
    fn named_scale_wrappers_agree_with_scale() {
        let v = ramp_volume();
        let factor = ScaleFactor::uniform(2.0);
        assert_eq!(
            scale_nearest(&v, factor, 1).unwrap(),
            scale(&v, factor, ScaleMode::Nearest, 1).unwrap()
        );
        assert_eq!(
            scale_tricubic(&v, factor, 1).unwrap(),
            scale(&v, factor, ScaleMode::Tricubic, 1).unwrap()
        );
    }

    #[test]
    fn output_is_identical_regardless_of_thread_count() {
        let v = ramp_volume();
        let factor = ScaleFactor::new(1.5, 0.75, 2.0);
        let baseline = scale(&v, factor, ScaleMode::Tricubic, 1).unwrap();
        for threads in [2, 8] {
            let out = scale(&v, factor, ScaleMode::Tricubic, threads).unwrap();
            assert_eq!(out, baseline);
        }
    }

    #[test]
    fn spacing_scales_inversely_with_factor() {
        let v = ramp_volume();
        let out = scale(&v, ScaleFactor::uniform(2.0), ScaleMode::Nearest, 1).unwrap();
        assert!((out.spacing().x - 0.5).abs() < 1e-12);
    }
}
