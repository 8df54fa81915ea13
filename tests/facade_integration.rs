//! End-to-end exercises against the public façade, as opposed to the
//! per-module unit tests that live alongside each source file.

use vdtk::{
    FilterKernel, ProcessorConfig, ScaleFactor, ScaleMode, Volume, VolumeProcessor, VolumeSize,
    VolumeSpacing, WindowingFunction,
};

fn gradient_volume(size: VolumeSize) -> Volume {
    let mut data = Vec::with_capacity(size.voxel_count() as usize);
    for z in 0..size.z {
        for y in 0..size.y {
            for x in 0..size.x {
                data.push((x as u32 + y as u32 + z as u32).min(u16::MAX as u32) as u16);
            }
        }
    }
    Volume::from_raw(size, VolumeSpacing::new(1.0, 1.0, 1.0), data).unwrap()
}

#[test]
fn pipeline_scale_filter_window_histogram() {
    let volume = gradient_volume(VolumeSize::new(8, 8, 8));
    let mut processor = VolumeProcessor::new(volume, ProcessorConfig::new(3));

    processor
        .scale(ScaleFactor::uniform(2.0), ScaleMode::Trilinear)
        .unwrap();
    assert_eq!(processor.get_size(), VolumeSize::new(16, 16, 16));

    processor.apply_filter(&FilterKernel::box_average(3)).unwrap();
    processor
        .apply_window(WindowingFunction::LinearExact, 10.0, 20.0, 0.0)
        .unwrap();

    let bins = processor.histogram();
    let total: u64 = bins.iter().map(|&c| c as u64).sum();
    assert_eq!(total, processor.get_size().voxel_count());
}

#[test]
fn crop_then_invert_round_trips_through_double_invert() {
    let volume = gradient_volume(VolumeSize::new(10, 10, 10));
    let mut processor = VolumeProcessor::new(volume.clone(), ProcessorConfig::new(2));

    processor.cut_borders(5);
    let cropped_size = processor.get_size();
    assert!(cropped_size.x <= volume.size().x);

    let before_invert = processor.get_volume().clone();
    processor.invert();
    processor.invert();
    assert_eq!(processor.get_volume(), &before_invert);
}

#[test]
fn invalid_window_width_is_reported_through_the_facade() {
    let volume = gradient_volume(VolumeSize::new(4, 4, 4));
    let mut processor = VolumeProcessor::new(volume, ProcessorConfig::new(1));
    let err = processor
        .apply_window(WindowingFunction::Linear, 0.0, 0.0, 0.0)
        .unwrap_err();
    assert!(matches!(err, vdtk::VdtkError::InvalidArgument(_)));
}

#[test]
fn nonpositive_scale_factor_is_reported_through_the_facade() {
    let volume = gradient_volume(VolumeSize::new(4, 4, 4));
    let mut processor = VolumeProcessor::new(volume, ProcessorConfig::new(1));
    let err = processor
        .scale(ScaleFactor::new(-1.0, 1.0, 1.0), ScaleMode::Nearest)
        .unwrap_err();
    assert!(matches!(err, vdtk::VdtkError::InvalidArgument(_)));
}
