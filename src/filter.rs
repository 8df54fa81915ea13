//! 3D convolution filtering with the "extend by center" boundary rule: a
//! sample that would fall outside the volume is replaced by the center
//! voxel's own value rather than clamped to the nearest edge voxel.

use crate::error::Result;
use crate::kernel::FilterKernel;
use crate::pool::WorkerPool;
use crate::volume::Volume;
use crate::writer::RawWriter;

/// Convolves `volume` with `kernel`, producing a new volume of the same size.
pub fn apply(volume: &Volume, kernel: &FilterKernel, threads: usize) -> Result<Volume> {
    let size = volume.size();
    log::debug!(
        "applying {}x{}x{} filter kernel over volume {:?}",
        kernel.size(),
        kernel.size(),
        kernel.size(),
        size
    );

    let mut output = Volume::new(size, volume.spacing());
    let writer = RawWriter::new(output.raw_ptr_mut(), output.voxel_count());
    let radius = kernel.radius();

    {
        let pool = WorkerPool::new(threads);
        for x in 0..size.x {
            let writer_ref = &writer;
            let volume_ref = volume;
            pool.enqueue(move || {
                for y in 0..size.y {
                    for z in 0..size.z {
                        let value = convolve_at(volume_ref, kernel, x, y, z, radius);
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

fn convolve_at(volume: &Volume, kernel: &FilterKernel, x: u32, y: u32, z: u32, radius: i64) -> u16 {
    let size = volume.size();
    let center = volume.get(x, y, z).expect("center voxel is in bounds") as f64;

    let mut acc = 0.0f64;
    for (kz, oz) in (-radius..=radius).enumerate() {
        for (ky, oy) in (-radius..=radius).enumerate() {
            for (kx, ox) in (-radius..=radius).enumerate() {
                let sample_x = x as i64 + ox;
                let sample_y = y as i64 + oy;
                let sample_z = z as i64 + oz;
                let value = if sample_x < 0
                    || sample_y < 0
                    || sample_z < 0
                    || sample_x >= size.x as i64
                    || sample_y >= size.y as i64
                    || sample_z >= size.z as i64
                {
                    center
                } else {
                    volume
                        .get(sample_x as u32, sample_y as u32, sample_z as u32)
                        .expect("checked in bounds") as f64
                };
                acc += value * kernel.weight(kx as u32, ky as u32, kz as u32);
            }
        }
    }

    acc.clamp(0.0, u16::MAX as f64) as u16
}
