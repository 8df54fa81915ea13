//! The dense in-memory volume container and its 2D slice views.

use crate::error::{Result, VdtkError};
use crate::types::{VolumeAxis, VolumeSize, VolumeSpacing};

/// A dense 3D scalar field of 16-bit voxels.
///
/// Voxels are stored X-fastest, Z-slowest: `index = x + X*(y + Y*z)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    size: VolumeSize,
    spacing: VolumeSpacing,
    data: Vec<u16>,
}

impl Volume {
    /// Builds a volume of the given size, filled with zeroes.
    pub fn new(size: VolumeSize, spacing: VolumeSpacing) -> Self {
        let count = size.voxel_count() as usize;
        Self {
            size,
            spacing,
            data: vec![0u16; count],
        }
    }

    /// Builds a volume from a caller-supplied flat buffer, X-fastest/Z-slowest.
    ///
    /// Returns [`VdtkError::DimensionMismatch`] if `data.len()` does not equal
    /// `size.voxel_count()`.
    pub fn from_raw(size: VolumeSize, spacing: VolumeSpacing, data: Vec<u16>) -> Result<Self> {
        let expected = size.voxel_count() as usize;
        if data.len() != expected {
            return Err(VdtkError::DimensionMismatch(format!(
                "raw buffer has {} voxels, expected {expected} for size {:?}",
                data.len(),
                size
            )));
        }
        Ok(Self { size, spacing, data })
    }

    pub fn size(&self) -> VolumeSize {
        self.size
    }

    pub fn spacing(&self) -> VolumeSpacing {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: VolumeSpacing) {
        self.spacing = spacing;
    }

    pub fn voxel_count(&self) -> usize {
        self.data.len()
    }

    /// Flat X-fastest/Z-slowest index of the voxel at `(x, y, z)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        x as usize + self.size.x as usize * (y as usize + self.size.y as usize * z as usize)
    }

    fn in_bounds(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.size.x && y < self.size.y && z < self.size.z
    }

    /// Reads the voxel at `(x, y, z)`.
    pub fn get(&self, x: u32, y: u32, z: u32) -> Result<u16> {
        if !self.in_bounds(x, y, z) {
            return Err(VdtkError::OutOfRange(format!(
                "({x}, {y}, {z}) outside volume of size {:?}",
                self.size
            )));
        }
        Ok(self.data[self.index(x, y, z)])
    }

    /// Writes `value` into the voxel at `(x, y, z)`.
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: u16) -> Result<()> {
        if !self.in_bounds(x, y, z) {
            return Err(VdtkError::OutOfRange(format!(
                "({x}, {y}, {z}) outside volume of size {:?}",
                self.size
            )));
        }
        let idx = self.index(x, y, z);
        self.data[idx] = value;
        Ok(())
    }

    pub fn raw(&self) -> &[u16] {
        &self.data
    }

    pub fn raw_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }

    pub(crate) fn raw_ptr_mut(&mut self) -> *mut u16 {
        self.data.as_mut_ptr()
    }

    /// Replaces the voxel buffer wholesale. Used by operations that build an
    /// independent output volume and then install it in place of the input.
    #[allow(dead_code)]
    pub(crate) fn set_raw(&mut self, size: VolumeSize, data: Vec<u16>) {
        self.size = size;
        self.data = data;
    }

    /// Extracts a copy of the plane at `index` along `axis`.
    pub fn get_slice(&self, axis: VolumeAxis, index: u32) -> Result<Slice> {
        let (width, height, extent) = self.slice_dims(axis);
        if index >= extent {
            return Err(VdtkError::OutOfRange(format!(
                "slice index {index} outside extent {extent} for axis {:?}",
                axis
            )));
        }
        let mut buffer = vec![0u16; (width * height) as usize];
        for h in 0..height {
            for w in 0..width {
                let (x, y, z) = self.plane_to_volume(axis, index, w, h);
                buffer[(h + height * w) as usize] = self.data[self.index(x, y, z)];
            }
        }
        Ok(Slice {
            axis,
            width,
            height,
            data: buffer,
        })
    }

    /// Writes `slice` back into the volume at `index` along its axis.
    pub fn set_slice(&mut self, slice: &Slice, index: u32) -> Result<()> {
        let (width, height, extent) = self.slice_dims(slice.axis);
        if slice.width != width || slice.height != height {
            return Err(VdtkError::DimensionMismatch(format!(
                "slice is {}x{}, expected {}x{} for axis {:?}",
                slice.width, slice.height, width, height, slice.axis
            )));
        }
        if index >= extent {
            return Err(VdtkError::OutOfRange(format!(
                "slice index {index} outside extent {extent} for axis {:?}",
                slice.axis
            )));
        }
        for h in 0..height {
            for w in 0..width {
                let (x, y, z) = self.plane_to_volume(slice.axis, index, w, h);
                let idx = self.index(x, y, z);
                self.data[idx] = slice.get(w, h);
            }
        }
        Ok(())
    }

    fn slice_dims(&self, axis: VolumeAxis) -> (u32, u32, u32) {
        match axis {
            VolumeAxis::YZAxis => (self.size.y, self.size.z, self.size.x),
            VolumeAxis::XZAxis => (self.size.x, self.size.z, self.size.y),
            VolumeAxis::XYAxis => (self.size.x, self.size.y, self.size.z),
        }
    }

    fn plane_to_volume(&self, axis: VolumeAxis, index: u32, w: u32, h: u32) -> (u32, u32, u32) {
        match axis {
            VolumeAxis::YZAxis => (index, w, h),
            VolumeAxis::XZAxis => (w, index, h),
            VolumeAxis::XYAxis => (w, h, index),
        }
    }
}

/// A single 2D plane extracted from a [`Volume`], row-major in `(width, height)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    axis: VolumeAxis,
    width: u32,
    height: u32,
    data: Vec<u16>,
}

impl Slice {
    pub fn axis(&self) -> VolumeAxis {
        self.axis
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reads pixel `(w, h)`. Row-major: `buffer[h + height*w]`.
    pub fn get(&self, w: u32, h: u32) -> u16 {
        self.data[(h + self.height * w) as usize]
    }

    pub fn set(&mut self, w: u32, h: u32, value: u16) {
        let idx = (h + self.height * w) as usize;
        self.data[idx] = value;
    }

    pub fn raw(&self) -> &[u16] {
        &self.data
    }
}
