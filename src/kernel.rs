//! Convolution kernels used by the grid filter.

/// A cubic (`size`×`size`×`size`) convolution kernel of floating-point weights.
///
/// Construction never fails: a structurally invalid request (even `size`,
/// zero `size`, or a weight grid of the wrong length) silently falls back to
/// the 3x3x3 identity kernel, with a `warn!` recording the fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterKernel {
    size: u32,
    weights: Vec<f64>,
}

impl FilterKernel {
    /// Builds a kernel from a flat, `size*size*size`-long, X-fastest weight
    /// grid. `size` must be 3 or 5 for the request to be honored.
    pub fn new(size: u32, weights: Vec<f64>) -> Self {
        let expected = (size as usize).pow(3);
        if (size != 3 && size != 5) || weights.len() != expected {
            log::warn!(
                "filter kernel request (size={size}, len={}) is invalid, falling back to identity",
                weights.len()
            );
            return Self::identity();
        }
        Self { size, weights }
    }

    /// The 3x3x3 kernel whose convolution is a no-op: all weight on the
    /// center voxel.
    pub fn identity() -> Self {
        let mut weights = vec![0.0; 27];
        weights[13] = 1.0;
        Self { size: 3, weights }
    }

    /// A uniform averaging kernel of the given size (3 or 5).
    pub fn box_average(size: u32) -> Self {
        if size != 3 && size != 5 {
            log::warn!("box average kernel size {size} is invalid, falling back to identity");
            return Self::identity();
        }
        let count = (size as usize).pow(3);
        Self {
            size,
            weights: vec![1.0 / count as f64; count],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Half the kernel extent on either side of its center, e.g. `1` for a
    /// 3x3x3 kernel.
    pub fn radius(&self) -> i64 {
        (self.size as i64 - 1) / 2
    }

    #[inline]
    pub fn weight(&self, x: u32, y: u32, z: u32) -> f64 {
        let s = self.size as usize;
        self.weights[x as usize + s * (y as usize + s * z as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_kernel_has_single_center_weight() {
        let k = FilterKernel::identity();
        assert_eq!(k.size(), 3);
        assert_eq!(k.weight(1, 1, 1), 1.0);
        assert_eq!(k.weight(0, 0, 0), 0.0);
    }

    #[test]
    fn invalid_size_falls_back_to_identity() {
        let k = FilterKernel::new(4, vec![1.0; 64]);
        assert_eq!(k, FilterKernel::identity());
    }

    #[test]
    fn mismatched_weight_count_falls_back_to_identity() {
        let k = FilterKernel::new(3, vec![1.0; 10]);
        assert_eq!(k, FilterKernel::identity());
    }

    #[test]
    fn box_average_sums_to_one() {
        let k = FilterKernel::box_average(3);
        let sum: f64 = (0..3)
            .flat_map(|z| (0..3).flat_map(move |y| (0..3).map(move |x| (x, y, z))))
            .map(|(x, y, z)| k.weight(x, y, z))
            .sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
