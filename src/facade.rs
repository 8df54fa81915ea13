//! `VolumeProcessor`: the single entry point that owns a volume and applies
//! operations to it, threading configuration through to each one.

use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::kernel::FilterKernel;
use crate::legal;
use crate::types::{ScaleFactor, ScaleMode, VolumeSize, VolumeSpacing, WindowingFunction};
use crate::volume::Volume;
use crate::{convert, edge, filter, histogram, resample, window};

/// Owns a [`Volume`] and exposes every processing operation against it,
/// threading [`ProcessorConfig`] through to whichever ones are parallel.
#[derive(Debug, Clone)]
pub struct VolumeProcessor {
    volume: Volume,
    config: ProcessorConfig,
}

impl VolumeProcessor {
    pub fn new(volume: Volume, config: ProcessorConfig) -> Self {
        Self { volume, config }
    }

    pub fn with_default_config(volume: Volume) -> Self {
        Self::new(volume, ProcessorConfig::default())
    }

    pub fn config(&self) -> ProcessorConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ProcessorConfig) {
        self.config = config;
    }

    pub fn get_volume(&self) -> &Volume {
        &self.volume
    }

    pub fn into_volume(self) -> Volume {
        self.volume
    }

    pub fn get_size(&self) -> VolumeSize {
        self.volume.size()
    }

    pub fn get_spacing(&self) -> VolumeSpacing {
        self.volume.spacing()
    }

    pub fn get_raw_value(&self, x: u32, y: u32, z: u32) -> Result<u16> {
        self.volume.get(x, y, z)
    }

    /// Resamples in place by `factor` using `mode`.
    pub fn scale(&mut self, factor: ScaleFactor, mode: ScaleMode) -> Result<()> {
        self.volume = resample::scale(&self.volume, factor, mode, self.config.threads)?;
        Ok(())
    }

    /// Convolves in place with `kernel`.
    pub fn apply_filter(&mut self, kernel: &FilterKernel) -> Result<()> {
        self.volume = filter::apply(&self.volume, kernel, self.config.threads)?;
        Ok(())
    }

    /// Applies a VOI LUT window in place.
    pub fn apply_window(
        &mut self,
        func: WindowingFunction,
        center: f64,
        width: f64,
        offset: f64,
    ) -> Result<()> {
        self.volume = window::apply(&self.volume, func, center, width, offset, self.config.threads)?;
        Ok(())
    }

    /// Crops in place to the bounding box of voxels above `threshold`.
    pub fn cut_borders(&mut self, threshold: u16) {
        self.volume = edge::cut(&self.volume, threshold);
    }

    /// Crops in place using a `[0.0, 1.0]`-normalized threshold.
    pub fn cut_borders_normalized(&mut self, threshold: f32) {
        self.volume = edge::cut_normalized(&self.volume, threshold);
    }

    pub fn invert(&mut self) {
        histogram::invert(&mut self.volume);
    }

    pub fn convert_endianness(&mut self) {
        histogram::flip_endianness(&mut self.volume);
    }

    pub fn histogram(&self) -> Box<[u32; 65536]> {
        histogram::histogram(&self.volume)
    }

    pub fn histogram_with_windowing(
        &self,
        func: WindowingFunction,
        center: f64,
        width: f64,
        offset: f64,
    ) -> Result<Box<[u32; 65536]>> {
        histogram::histogram_with_windowing(&self.volume, func, center, width, offset)
    }

    pub fn print_legal_notice(&self) {
        legal::print_legal_notice();
    }
}

pub use convert::{rgb_to_color, rgb_to_mono, u16_to_u8, u8_to_u16};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VolumeSpacing;

    fn sample_processor() -> VolumeProcessor {
        let size = VolumeSize::new(4, 4, 4);
        let volume = Volume::new(size, VolumeSpacing::new(1.0, 1.0, 1.0));
        VolumeProcessor::new(volume, ProcessorConfig::new(2))
    }

    #[test]
    fn scale_updates_owned_volume_size() {
        let mut p = sample_processor();
        p.scale(ScaleFactor::uniform(2.0), ScaleMode::Nearest).unwrap();
        assert_eq!(p.get_size(), VolumeSize::new(8, 8, 8));
    }

    #[test]
    fn invert_is_reflected_in_get_raw_value() {
        let mut p = sample_processor();
        p.invert();
        assert_eq!(p.get_raw_value(0, 0, 0).unwrap(), u16::MAX);
    }

    #[test]
    fn cut_borders_on_empty_volume_is_a_no_op() {
        let mut p = sample_processor();
        let before = p.get_volume().clone();
        p.cut_borders(0);
        assert_eq!(p.get_volume(), &before);
    }
}
