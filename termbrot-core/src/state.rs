use tracing::debug;

use crate::complex::Complex;
use crate::fractal::{FractalMode, IterationLimits};
use crate::preset::{Preset, PresetCatalog};
use crate::viewport::Viewport;

/// Number of color schemes the renderer knows about.
pub const COLOR_SCHEME_COUNT: u8 = 5;

/// Everything the user can change about the view.
///
/// `max_iterations` is kept inside `limits` and `color_scheme` below
/// [`COLOR_SCHEME_COUNT`] by every mutator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    viewport: Viewport,
    max_iterations: u32,
    limits: IterationLimits,
    mode: FractalMode,
    color_scheme: u8,
    preset_index: usize,
}

/// One user-level state transition, consumed by [`ViewState::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Pan { dx: f64, dy: f64 },
    ZoomIn(f64),
    ZoomOut(f64),
    SetCenter { re: f64, im: f64 },
    SetZoom(f64),
    Reset { rows: u32, cols: u32 },
    Resize { rows: u32, cols: u32 },
    SetMaxIterations(u32),
    AdjustMaxIterations(i64),
    ToggleMode,
    SetMode(FractalMode),
    SetColorScheme(usize),
    CycleColorScheme,
    NextPreset,
    PrevPreset,
}

impl ViewState {
    pub fn new(viewport: Viewport, limits: IterationLimits) -> Self {
        Self {
            viewport,
            max_iterations: limits.clamp(IterationLimits::DEFAULT_ITERATIONS),
            limits,
            mode: FractalMode::default(),
            color_scheme: 0,
            preset_index: 0,
        }
    }

    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.set_max_iterations(n);
        self
    }

    pub fn with_mode(mut self, mode: FractalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_color_scheme(mut self, scheme: usize) -> Self {
        self.set_color_scheme(scheme);
        self
    }

    // -- Accessors --

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn limits(&self) -> IterationLimits {
        self.limits
    }

    pub fn mode(&self) -> FractalMode {
        self.mode
    }

    pub fn color_scheme(&self) -> u8 {
        self.color_scheme
    }

    pub fn preset_index(&self) -> usize {
        self.preset_index
    }

    // -- Mutators --

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self, factor: f64) {
        self.viewport.zoom_by(factor);
    }

    pub fn zoom_out(&mut self, factor: f64) {
        self.viewport.zoom_by(factor.recip());
    }

    pub fn set_center(&mut self, re: f64, im: f64) -> crate::Result<()> {
        self.viewport.set_center(Complex::new(re, im))
    }

    pub fn set_zoom(&mut self, zoom: f64) -> crate::Result<()> {
        self.viewport.set_zoom(zoom)
    }

    /// Back to the canonical view at a new resolution. Iteration cap, mode
    /// and color scheme are user preferences and survive.
    pub fn reset(&mut self, rows: u32, cols: u32) -> crate::Result<()> {
        let viewport = Viewport::new(Viewport::DEFAULT_CENTER, Viewport::DEFAULT_ZOOM, rows, cols)?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn resize(&mut self, rows: u32, cols: u32) -> crate::Result<()> {
        self.viewport.resize(rows, cols)
    }

    pub fn set_max_iterations(&mut self, n: u32) {
        self.max_iterations = self.limits.clamp(n);
    }

    /// Step the iteration cap by `delta`, saturating, then clamp.
    pub fn adjust_max_iterations(&mut self, delta: i64) {
        let n = (self.max_iterations as i64).saturating_add(delta);
        self.set_max_iterations(n.clamp(0, u32::MAX as i64) as u32);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn set_mode(&mut self, mode: FractalMode) {
        self.mode = mode;
    }

    pub fn set_color_scheme(&mut self, scheme: usize) {
        self.color_scheme = (scheme % COLOR_SCHEME_COUNT as usize) as u8;
    }

    pub fn cycle_color_scheme(&mut self) {
        self.set_color_scheme(self.color_scheme as usize + 1);
    }

    /// Jump to the preset after the current one. On an empty catalog
    /// nothing changes and `Ok(None)` is returned.
    pub fn next_preset<'a>(
        &mut self,
        catalog: &'a PresetCatalog,
    ) -> crate::Result<Option<&'a Preset>> {
        match catalog.next(self.preset_index) {
            Some((preset, index)) => self.go_to_preset(preset, index).map(|_| Some(preset)),
            None => Ok(None),
        }
    }

    pub fn prev_preset<'a>(
        &mut self,
        catalog: &'a PresetCatalog,
    ) -> crate::Result<Option<&'a Preset>> {
        match catalog.prev(self.preset_index) {
            Some((preset, index)) => self.go_to_preset(preset, index).map(|_| Some(preset)),
            None => Ok(None),
        }
    }

    fn go_to_preset(&mut self, preset: &Preset, index: usize) -> crate::Result<()> {
        // Validate both fields before touching anything.
        let viewport = Viewport::new(
            preset.center,
            preset.zoom,
            self.viewport.rows(),
            self.viewport.cols(),
        )?;
        self.viewport = viewport;
        self.preset_index = index;
        debug!(name = %preset.name, index, "Moved to preset");
        Ok(())
    }

    /// Pure reducer: the state after `command`, or an error with `self`
    /// left as it was.
    pub fn apply(&self, command: Command, catalog: &PresetCatalog) -> crate::Result<Self> {
        let mut next = *self;
        match command {
            Command::Pan { dx, dy } => next.pan(dx, dy),
            Command::ZoomIn(f) => next.zoom_in(f),
            Command::ZoomOut(f) => next.zoom_out(f),
            Command::SetCenter { re, im } => next.set_center(re, im)?,
            Command::SetZoom(z) => next.set_zoom(z)?,
            Command::Reset { rows, cols } => next.reset(rows, cols)?,
            Command::Resize { rows, cols } => next.resize(rows, cols)?,
            Command::SetMaxIterations(n) => next.set_max_iterations(n),
            Command::AdjustMaxIterations(d) => next.adjust_max_iterations(d),
            Command::ToggleMode => next.toggle_mode(),
            Command::SetMode(m) => next.set_mode(m),
            Command::SetColorScheme(i) => next.set_color_scheme(i),
            Command::CycleColorScheme => next.cycle_color_scheme(),
            Command::NextPreset => {
                next.next_preset(catalog)?;
            }
            Command::PrevPreset => {
                next.prev_preset(catalog)?;
            }
        }
        debug!(
            ?command,
            center = %next.viewport.center,
            zoom = next.viewport.zoom(),
            max_iterations = next.max_iterations,
            mode = next.mode.label(),
            "Applied command"
        );
        Ok(next)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(
            Viewport::default_mandelbrot(24, 80),
            IterationLimits::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn state() -> ViewState {
        ViewState::default()
    }

    #[test]
    fn defaults() {
        let s = state();
        assert_eq!(s.max_iterations(), IterationLimits::DEFAULT_ITERATIONS);
        assert_eq!(s.mode(), FractalMode::Mandelbrot);
        assert_eq!(s.color_scheme(), 0);
        assert_eq!(s.viewport().center, Viewport::DEFAULT_CENTER);
    }

    #[test]
    fn pan_round_trip_restores_center() {
        let mut s = state();
        s.zoom_in(37.0);
        let before = s.viewport().center;
        s.pan(0.3, -1.7);
        s.pan(-0.3, 1.7);
        let after = s.viewport().center;
        assert!((before.re - after.re).abs() < EPSILON);
        assert!((before.im - after.im).abs() < EPSILON);
    }

    #[test]
    fn zoom_in_then_out_restores_zoom() {
        for k in [0.5, 1.5, 2.0, 10.0] {
            let mut s = state();
            s.zoom_in(k);
            s.zoom_out(k);
            assert!((s.viewport().zoom() - 1.0).abs() < EPSILON, "k = {k}");
        }
    }

    #[test]
    fn max_iterations_clamped() {
        let mut s = state();
        s.set_max_iterations(1);
        assert_eq!(s.max_iterations(), IterationLimits::DEFAULT_MIN);
        s.set_max_iterations(u32::MAX);
        assert_eq!(s.max_iterations(), IterationLimits::DEFAULT_MAX);
    }

    #[test]
    fn adjust_max_iterations_saturates() {
        let mut s = state();
        s.adjust_max_iterations(-1_000_000);
        assert_eq!(s.max_iterations(), IterationLimits::DEFAULT_MIN);
        s.adjust_max_iterations(i64::MAX);
        assert_eq!(s.max_iterations(), IterationLimits::DEFAULT_MAX);
        s.adjust_max_iterations(-100);
        assert_eq!(s.max_iterations(), IterationLimits::DEFAULT_MAX - 100);
    }

    #[test]
    fn color_scheme_wraps() {
        let mut s = state();
        s.set_color_scheme(7);
        assert_eq!(s.color_scheme(), 2);
        s.set_color_scheme(4);
        s.cycle_color_scheme();
        assert_eq!(s.color_scheme(), 0);
    }

    #[test]
    fn reset_keeps_preferences() {
        let mut s = state()
            .with_max_iterations(777)
            .with_mode(FractalMode::Julia)
            .with_color_scheme(3);
        s.pan(5.0, 5.0);
        s.zoom_in(100.0);
        s.reset(30, 100).unwrap();
        assert_eq!(s.viewport().center, Viewport::DEFAULT_CENTER);
        assert_eq!(s.viewport().zoom(), Viewport::DEFAULT_ZOOM);
        assert_eq!((s.viewport().rows(), s.viewport().cols()), (30, 100));
        assert_eq!(s.max_iterations(), 777);
        assert_eq!(s.mode(), FractalMode::Julia);
        assert_eq!(s.color_scheme(), 3);
    }

    #[test]
    fn reset_rejects_zero_resolution() {
        let mut s = state();
        s.pan(1.0, 0.0);
        let before = s;
        assert!(s.reset(0, 80).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn apply_failure_leaves_state() {
        let s = state();
        let catalog = PresetCatalog::builtin();
        assert!(s.apply(Command::SetZoom(0.0), &catalog).is_err());
        assert!(s.apply(Command::SetZoom(-2.0), &catalog).is_err());
        assert!(s
            .apply(Command::SetCenter { re: f64::NAN, im: 0.0 }, &catalog)
            .is_err());
        assert_eq!(s, state());
    }

    #[test]
    fn apply_is_pure() {
        let s = state();
        let catalog = PresetCatalog::builtin();
        let next = s.apply(Command::ToggleMode, &catalog).unwrap();
        assert_eq!(s.mode(), FractalMode::Mandelbrot);
        assert_eq!(next.mode(), FractalMode::Julia);
    }

    #[test]
    fn apply_sequence() {
        let catalog = PresetCatalog::builtin();
        let commands = [
            Command::SetCenter { re: 0.1, im: 0.2 },
            Command::SetZoom(8.0),
            Command::ZoomOut(2.0),
            Command::SetMaxIterations(400),
            Command::CycleColorScheme,
        ];
        let s = commands
            .iter()
            .try_fold(state(), |s, &c| s.apply(c, &catalog))
            .unwrap();
        assert_eq!(s.viewport().center, Complex::new(0.1, 0.2));
        assert!((s.viewport().zoom() - 4.0).abs() < EPSILON);
        assert_eq!(s.max_iterations(), 400);
        assert_eq!(s.color_scheme(), 1);
    }

    #[test]
    fn preset_cycle_returns_to_start() {
        let catalog = PresetCatalog::builtin();
        let mut s = state();
        for _ in 0..catalog.len() {
            assert!(s.next_preset(&catalog).unwrap().is_some());
        }
        assert_eq!(s.preset_index(), 0);
        let first = catalog.get(0).unwrap();
        assert_eq!(s.viewport().center, first.center);
        assert_eq!(s.viewport().zoom(), first.zoom);
    }

    #[test]
    fn preset_on_empty_catalog_is_noop() {
        let catalog = PresetCatalog::default();
        let mut s = state();
        s.pan(0.25, 0.0);
        let before = s;
        assert!(s.next_preset(&catalog).unwrap().is_none());
        assert!(s.prev_preset(&catalog).unwrap().is_none());
        assert_eq!(s, before);
        assert_eq!(s.apply(Command::NextPreset, &catalog).unwrap(), before);
    }

    #[test]
    fn invalid_preset_is_rejected() {
        let catalog = PresetCatalog::new(vec![
            Preset::new("ok", 0.0, 0.0, 1.0),
            Preset::new("bad", 0.0, 0.0, -1.0),
        ]);
        let mut s = state();
        assert!(s.next_preset(&catalog).is_err());
        assert_eq!(s.preset_index(), 0);
        assert_eq!(s.viewport().center, Viewport::DEFAULT_CENTER);
    }
}
