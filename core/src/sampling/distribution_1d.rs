//! 1D Distribution.

use crate::pbrt::*;

/// Represents a piecewise-constant 1D function’s PDF and CDF and provides
/// methods to perform this sampling efficiently.
#[derive(Clone)]
pub struct Distribution1D {
    /// Piecewise-constant function.
    pub func: Vec<Float>,

    /// CDF for `func`.
    pub cdf: Vec<Float>,

    /// Integral of `func`.
    pub func_int: Float,
}

impl Distribution1D {
    /// Returns a new `Distribution1D` for given piecewise-constant function.
    ///
    /// - `f` - Piecewise-constant 1D function.
    pub fn new(f: Vec<Float>) -> Self {
        let n = f.len();

        // Compute integral of step function at `x_i`
        let mut cdf: Vec<Float> = Vec::with_capacity(n + 1);
        cdf.push(0.0);
        for i in 1..n + 1 {
            cdf.push(cdf[i - 1] + f[i - 1] / n as Float);
        }

        // Transform step function integral into CDF.
        let func_int = cdf[n];
        if func_int == 0.0 {
            for (i, v) in cdf.iter_mut().enumerate().skip(1).take(n) {
                *v = i as Float / n as Float;
            }
        } else {
            for v in cdf.iter_mut().skip(1).take(n) {
                *v /= func_int;
            }
        }

        Self { func: f, cdf, func_int }
    }

    /// Returns the number of sample points for the piecewise-constant function.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Return an index, its probability and the sample remapped to [0, 1)
    /// from the discrete distribution given a random sample. An empty
    /// distribution returns a zero probability.
    ///
    /// - `u` - The random sample.
    pub fn sample_discrete(&self, u: Float) -> (usize, Float, Float) {
        if self.count() == 0 {
            return (0, 0.0, u);
        }

        // Find surrounding CDF segments and `offset`.
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);
        let pdf = self.discrete_pdf(offset);

        let width = self.cdf[offset + 1] - self.cdf[offset];
        let u_remapped = if width > 0.0 {
            clamp((u - self.cdf[offset]) / width, 0.0, 1.0)
        } else {
            0.0
        };

        (offset, pdf, u_remapped)
    }

    /// Return the PDF for sampling a given value from the discrete PDF.
    ///
    /// * `index` - Sample index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        if index >= self.count() || self.func_int == 0.0 {
            0.0
        } else {
            self.func[index] / (self.func_int * self.count() as Float)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn discrete_pdf_is_proportional_to_function() {
        let d = Distribution1D::new(vec![1.0, 3.0]);
        assert!(approx_eq!(Float, d.discrete_pdf(0), 0.25, epsilon = 1e-6));
        assert!(approx_eq!(Float, d.discrete_pdf(1), 0.75, epsilon = 1e-6));
    }

    #[test]
    fn sample_discrete_selects_by_weight() {
        let d = Distribution1D::new(vec![1.0, 3.0]);
        assert_eq!(d.sample_discrete(0.1).0, 0);
        assert_eq!(d.sample_discrete(0.3).0, 1);
        assert_eq!(d.sample_discrete(0.99).0, 1);
    }

    #[test]
    fn empty_distribution_has_zero_pdf() {
        let d = Distribution1D::new(vec![]);
        assert_eq!(d.sample_discrete(0.5).1, 0.0);
        assert_eq!(d.discrete_pdf(0), 0.0);
    }

    proptest! {
        #[test]
        fn sample_discrete_pdf_matches_discrete_pdf(
            f in prop::collection::vec(0.1f32..10.0, 1..8),
            u in 0.0f32..1.0,
        ) {
            let d = Distribution1D::new(f);
            let (i, pdf, u_remapped) = d.sample_discrete(u);
            prop_assert!(i < d.count());
            prop_assert!(approx_eq!(Float, pdf, d.discrete_pdf(i), ulps = 2));
            prop_assert!((0.0..=1.0).contains(&u_remapped));
        }
    }
}
