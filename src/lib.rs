//! A toolkit for processing dense 3D scalar volumes: windowing, convolution
//! filtering, multi-mode resampling, threshold-based cropping, histograms,
//! and the small set of pixel-format conversions that feed them.
//!
//! This crate does not read or write files, decode image formats, or touch
//! a process's argument list; it operates entirely on [`Volume`] values
//! already resident in memory. Wiring those up to disk or a command line is
//! left to the caller.

pub mod config;
pub mod convert;
pub mod edge;
pub mod error;
pub mod facade;
pub mod filter;
pub mod histogram;
pub mod kernel;
pub mod legal;
pub mod pool;
pub mod resample;
pub mod types;
pub mod volume;
pub mod window;
mod writer;

pub use config::ProcessorConfig;
pub use error::{Result, VdtkError};
pub use facade::VolumeProcessor;
pub use kernel::FilterKernel;
pub use pool::WorkerPool;
pub use types::{ScaleFactor, ScaleMode, VolumeAxis, VolumeSize, VolumeSpacing, WindowingFunction};
pub use volume::{Slice, Volume};
