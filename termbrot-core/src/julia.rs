use crate::complex::Complex;
use crate::fractal::{Fractal, ESCAPE_RADIUS_SQ};

/// A Julia set: `z_{n+1} = z_n² + k`, where `k` is a fixed seed
/// and `z₀` is the point on the complex plane.
///
/// This is the viewer's alternate mode. It shares the escape test and the
/// sentinel contract with [`Mandelbrot`](crate::Mandelbrot).
#[derive(Debug, Clone, Copy)]
pub struct Julia {
    max_iterations: u32,

    /// The fixed seed defining this Julia set.
    seed: Complex,
}

impl Julia {
    /// A visually interesting default: `k = -0.7 + 0.27015i`.
    pub const DEFAULT_SEED: Complex = Complex {
        re: -0.7,
        im: 0.27015,
    };

    pub fn new(seed: Complex, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            seed,
        }
    }

    pub fn with_default_seed(max_iterations: u32) -> Self {
        Self::new(Self::DEFAULT_SEED, max_iterations)
    }

    pub fn seed(&self) -> Complex {
        self.seed
    }
}

impl Fractal for Julia {
    fn iterate(&self, point: Complex) -> u32 {
        let max_iter = self.max_iterations;

        let mut z = point;

        // Brent's cycle detection state.
        let mut old_z = z;
        let mut period: u32 = 0;
        let mut check: u32 = 3;

        for n in 0..max_iter {
            z = z.square_add(self.seed);

            if z.norm_sq() > ESCAPE_RADIUS_SQ {
                return n;
            }

            if (z.re - old_z.re).abs() < 1e-13 && (z.im - old_z.im).abs() < 1e-13 {
                return max_iter;
            }

            period += 1;
            if period > check {
                old_z = z;
                period = 0;
                check = check.saturating_mul(2);
            }
        }

        max_iter
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
