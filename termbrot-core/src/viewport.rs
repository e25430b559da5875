use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;

/// Defines the visible region of the complex plane as a grid of terminal cells.
///
/// The viewport is centred on `center`. At `zoom == 1.0` the grid spans
/// [`BASE_SPAN`](Self::BASE_SPAN) plane units horizontally; larger zoom
/// values magnify. Each cell is [`CELL_ASPECT`](Self::CELL_ASPECT) times
/// taller than it is wide, so the imaginary step is stretched by the same
/// factor to keep the set undistorted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Plane point under the centre of the grid.
    pub center: Complex,

    /// Magnification. Always within `[MIN_ZOOM, MAX_ZOOM]`.
    zoom: f64,

    /// Grid height in cells.
    rows: u32,

    /// Grid width in cells.
    cols: u32,
}

impl Viewport {
    pub const DEFAULT_CENTER: Complex = Complex { re: -0.5, im: 0.0 };
    pub const DEFAULT_ZOOM: f64 = 1.0;

    /// Real-axis span of the whole grid at zoom 1.
    pub const BASE_SPAN: f64 = 3.5;

    /// Height-to-width ratio of a terminal character cell.
    pub const CELL_ASPECT: f64 = 2.0;

    pub const MIN_ZOOM: f64 = 1e-3;

    /// Beyond this, adjacent cells collapse onto the same `f64` value.
    pub const MAX_ZOOM: f64 = 1e14;

    /// Default view: the whole set, centred near `-0.5 + 0i`.
    ///
    /// Zero dimensions are bumped to 1; use [`new`](Self::new) when the
    /// caller needs them rejected instead.
    pub fn default_mandelbrot(rows: u32, cols: u32) -> Self {
        Self {
            center: Self::DEFAULT_CENTER,
            zoom: Self::DEFAULT_ZOOM,
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Create a viewport with explicit parameters.
    pub fn new(center: Complex, zoom: f64, rows: u32, cols: u32) -> crate::Result<Self> {
        check_dimensions(rows, cols)?;
        check_center(center)?;
        let zoom = check_zoom(zoom)?;
        Ok(Self {
            center,
            zoom,
            rows,
            cols,
        })
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Plane distance between horizontally adjacent cells.
    #[inline]
    pub fn step_re(&self) -> f64 {
        Self::BASE_SPAN / (self.cols as f64 * self.zoom)
    }

    /// Plane distance between vertically adjacent cells.
    #[inline]
    pub fn step_im(&self) -> f64 {
        self.step_re() * Self::CELL_ASPECT
    }

    /// Map a cell to the plane point at its centre.
    ///
    /// `(0, 0)` is the top-left cell. Rows grow downward, so the imaginary
    /// part decreases with `row`.
    #[inline]
    pub fn cell_to_complex(&self, row: u32, col: u32) -> Complex {
        let half_w = self.cols as f64 / 2.0;
        let half_h = self.rows as f64 / 2.0;
        Complex::new(
            self.center.re + (col as f64 + 0.5 - half_w) * self.step_re(),
            self.center.im - (row as f64 + 0.5 - half_h) * self.step_im(),
        )
    }

    /// Real-axis extent of the whole grid.
    pub fn complex_width(&self) -> f64 {
        self.cols as f64 * self.step_re()
    }

    /// Imaginary-axis extent of the whole grid.
    pub fn complex_height(&self) -> f64 {
        self.rows as f64 * self.step_im()
    }

    /// Shift the centre by `(dx / zoom, dy / zoom)`.
    ///
    /// Non-finite deltas, or deltas that would push the centre out of the
    /// finite range, leave the viewport unchanged.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            debug!(dx, dy, "Ignoring non-finite pan");
            return;
        }
        let center = self.center + Complex::new(dx, dy) * (1.0 / self.zoom);
        if !center.is_finite() {
            debug!(dx, dy, "Ignoring pan that overflows the centre");
            return;
        }
        self.center = center;
    }

    /// Multiply the zoom by `factor`, clamped to the supported range.
    ///
    /// Non-positive or non-finite factors are ignored.
    pub fn zoom_by(&mut self, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            debug!(factor, "Ignoring invalid zoom factor");
            return;
        }
        self.zoom = clamp_zoom(self.zoom * factor);
    }

    pub fn set_center(&mut self, center: Complex) -> crate::Result<()> {
        check_center(center)?;
        self.center = center;
        Ok(())
    }

    /// Set an absolute zoom. Rejects `z <= 0` and non-finite values; clamps
    /// positive values into `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_zoom(&mut self, zoom: f64) -> crate::Result<()> {
        self.zoom = check_zoom(zoom)?;
        Ok(())
    }

    pub fn resize(&mut self, rows: u32, cols: u32) -> crate::Result<()> {
        check_dimensions(rows, cols)?;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }
}

#[inline]
fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(Viewport::MIN_ZOOM, Viewport::MAX_ZOOM)
}

fn check_zoom(zoom: f64) -> crate::Result<f64> {
    if zoom <= 0.0 || !zoom.is_finite() {
        return Err(CoreError::invalid(
            "zoom",
            format!("must be positive and finite, got {zoom}"),
        ));
    }
    Ok(clamp_zoom(zoom))
}

fn check_center(center: Complex) -> crate::Result<()> {
    if !center.is_finite() {
        return Err(CoreError::invalid(
            "center",
            format!("coordinates must be finite, got {center}"),
        ));
    }
    Ok(())
}

fn check_dimensions(rows: u32, cols: u32) -> crate::Result<()> {
    if rows == 0 || cols == 0 {
        return Err(CoreError::invalid(
            "resolution",
            format!("dimensions must be > 0, got {rows}×{cols}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn default_viewport_shows_whole_set() {
        let vp = Viewport::default_mandelbrot(40, 120);
        assert_eq!(vp.rows(), 40);
        assert_eq!(vp.cols(), 120);
        assert!((vp.center.re - (-0.5)).abs() < EPSILON);
        assert!(vp.center.im.abs() < EPSILON);
        assert!(vp.complex_width() >= 3.0);
        assert!(vp.complex_height() >= 2.2);
    }

    #[test]
    fn default_clamps_zero_dimensions() {
        let vp = Viewport::default_mandelbrot(0, 0);
        assert_eq!((vp.rows(), vp.cols()), (1, 1));
    }

    #[test]
    fn center_cell_maps_near_center() {
        // Odd dimensions: the middle cell's centre is the viewport centre.
        let vp = Viewport::new(Complex::new(0.25, -0.5), 2.0, 11, 21).unwrap();
        let c = vp.cell_to_complex(5, 10);
        assert!((c.re - 0.25).abs() < EPSILON);
        assert!((c.im - (-0.5)).abs() < EPSILON);
    }

    #[test]
    fn corners_follow_orientation() {
        let vp = Viewport::new(Complex::ZERO, 1.0, 10, 10).unwrap();
        let tl = vp.cell_to_complex(0, 0);
        let br = vp.cell_to_complex(9, 9);
        assert!(tl.re < 0.0 && tl.im > 0.0);
        assert!(br.re > 0.0 && br.im < 0.0);
        assert!((tl.re + br.re).abs() < EPSILON);
        assert!((tl.im + br.im).abs() < EPSILON);
    }

    #[test]
    fn aspect_correction_stretches_imaginary_step() {
        let vp = Viewport::default_mandelbrot(30, 90);
        assert!((vp.step_im() / vp.step_re() - Viewport::CELL_ASPECT).abs() < EPSILON);
        let a = vp.cell_to_complex(3, 4);
        let b = vp.cell_to_complex(4, 5);
        assert!(((b.re - a.re) - vp.step_re()).abs() < EPSILON);
        assert!(((a.im - b.im) - vp.step_im()).abs() < EPSILON);
    }

    #[test]
    fn pan_is_scaled_by_zoom() {
        let mut vp = Viewport::new(Complex::ZERO, 4.0, 10, 10).unwrap();
        vp.pan(1.0, -2.0);
        assert!((vp.center.re - 0.25).abs() < EPSILON);
        assert!((vp.center.im - (-0.5)).abs() < EPSILON);
    }

    #[test]
    fn pan_ignores_non_finite() {
        let mut vp = Viewport::default_mandelbrot(10, 10);
        vp.pan(f64::NAN, 1.0);
        vp.pan(0.0, f64::INFINITY);
        assert_eq!(vp.center, Viewport::DEFAULT_CENTER);
    }

    #[test]
    fn pan_ignores_overflowing_delta() {
        let mut vp = Viewport::new(Complex::ZERO, Viewport::MIN_ZOOM, 3, 3).unwrap();
        vp.pan(1e306, 0.0);
        assert_eq!(vp.center, Complex::ZERO);
        vp.pan(0.0, -1e306);
        assert_eq!(vp.center, Complex::ZERO);
        assert!(vp.cell_to_complex(1, 1).is_finite());
    }

    #[test]
    fn zoom_by_clamps_to_range() {
        let mut vp = Viewport::default_mandelbrot(10, 10);
        vp.zoom_by(1e30);
        assert_eq!(vp.zoom(), Viewport::MAX_ZOOM);
        vp.zoom_by(1e-40);
        assert_eq!(vp.zoom(), Viewport::MIN_ZOOM);
    }

    #[test]
    fn zoom_by_ignores_invalid_factor() {
        let mut vp = Viewport::default_mandelbrot(10, 10);
        vp.zoom_by(0.0);
        vp.zoom_by(-3.0);
        vp.zoom_by(f64::NAN);
        assert_eq!(vp.zoom(), Viewport::DEFAULT_ZOOM);
    }

    #[test]
    fn set_zoom_rejects_non_positive() {
        let mut vp = Viewport::default_mandelbrot(10, 10);
        assert!(vp.set_zoom(0.0).is_err());
        assert!(vp.set_zoom(-1.0).is_err());
        assert!(vp.set_zoom(f64::INFINITY).is_err());
        assert_eq!(vp.zoom(), Viewport::DEFAULT_ZOOM);
        vp.set_zoom(250.0).unwrap();
        assert_eq!(vp.zoom(), 250.0);
    }

    #[test]
    fn set_center_rejects_non_finite() {
        let mut vp = Viewport::default_mandelbrot(10, 10);
        assert!(vp.set_center(Complex::new(f64::NAN, 0.0)).is_err());
        assert_eq!(vp.center, Viewport::DEFAULT_CENTER);
    }

    #[test]
    fn invalid_dimensions() {
        assert!(Viewport::new(Complex::ZERO, 1.0, 0, 10).is_err());
        assert!(Viewport::new(Complex::ZERO, 1.0, 10, 0).is_err());
        let mut vp = Viewport::default_mandelbrot(10, 10);
        assert!(vp.resize(0, 5).is_err());
        assert_eq!((vp.rows(), vp.cols()), (10, 10));
    }
}
