use crate::complex::Complex;
use crate::fractal::{Fractal, ESCAPE_RADIUS_SQ};

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// The point `c` is the cell's coordinate on the complex plane.
#[derive(Debug, Clone, Copy)]
pub struct Mandelbrot {
    max_iterations: u32,
}

impl Mandelbrot {
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
///
/// This is a closed-form check that avoids iterating ~30–40% of visible
/// points at the default zoom level.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

impl Fractal for Mandelbrot {
    fn iterate(&self, c: Complex) -> u32 {
        let max_iter = self.max_iterations;

        if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
            return max_iter;
        }

        let mut z = Complex::ZERO;

        // Brent's cycle detection state.
        let mut old_z = z;
        let mut period: u32 = 0;
        let mut check: u32 = 3;

        for n in 0..max_iter {
            z = z.square_add(c);

            if z.norm_sq() > ESCAPE_RADIUS_SQ {
                return n;
            }

            // Orbits rarely settle early, so skip the first 32 steps and
            // only look every 4th iteration.
            if n >= 32 && n & 3 == 0 {
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
        }

        max_iter
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
