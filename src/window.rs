//! VOI LUT windowing: linear, exact-linear, and sigmoid intensity remapping.

use crate::error::{Result, VdtkError};
use crate::pool::WorkerPool;
use crate::types::WindowingFunction;
use crate::volume::Volume;
use crate::writer::RawWriter;

const MAX_OUTPUT: f64 = u16::MAX as f64;

/// Applies a VOI LUT window to every voxel, producing a new volume.
///
/// `center`/`width` follow DICOM VOI LUT conventions; `offset` is added to
/// each raw voxel value before windowing (a rescale intercept). Returns
/// [`VdtkError::InvalidArgument`] if `width` is not positive.
pub fn apply(
    volume: &Volume,
    func: WindowingFunction,
    center: f64,
    width: f64,
    offset: f64,
    threads: usize,
) -> Result<Volume> {
    if width <= 0.0 {
        return Err(VdtkError::InvalidArgument(format!(
            "window width {width} must be positive"
        )));
    }

    let size = volume.size();
    log::debug!("applying {:?} window (center={center}, width={width}) over {:?}", func, size);

    let mut output = Volume::new(size, volume.spacing());
    let writer = RawWriter::new(output.raw_ptr_mut(), output.voxel_count());

    {
        let pool = WorkerPool::new(threads);
        for x in 0..size.x {
            let writer_ref = &writer;
            let volume_ref = volume;
            pool.enqueue(move || {
                for y in 0..size.y {
                    for z in 0..size.z {
                        let raw = volume_ref.get(x, y, z).expect("in-bounds by construction");
                        let value = windowed_value(raw, func, center, width, offset);
                        let idx = x as usize
                            + size.x as usize * (y as usize + size.y as usize * z as usize);
                        unsafe { writer_ref.set(idx, value) };
                    }
                }
            });
        }
        pool.join();
    }

    Ok(output)
}

/// Windows a single raw voxel value. Arithmetic is widened to `f64` so large
/// centers/widths never overflow the way naive `i32` math would.
pub fn windowed_value(raw: u16, func: WindowingFunction, center: f64, width: f64, offset: f64) -> u16 {
    let adjusted = raw as f64 + offset;
    let result = match func {
        WindowingFunction::Linear => {
            let c = center - 0.5;
            let w = width - 1.0;
            linear_clip(adjusted, c, w)
        }
        WindowingFunction::LinearExact => linear_clip(adjusted, center, width),
        WindowingFunction::Sigmoid => {
            MAX_OUTPUT / (1.0 + (-4.0 * (adjusted - center) / width).exp())
        }
    };
    result.clamp(0.0, MAX_OUTPUT) as u16
}

fn linear_clip(value: f64, c: f64, w: f64) -> f64 {
    let lower = c - w / 2.0;
    let upper = c + w / 2.0;
    if value <= lower {
        0.0
    } else if value > upper {
        MAX_OUTPUT
    } else {
        ((value - c) / w + 0.5) * MAX_OUTPUT
    }
}
