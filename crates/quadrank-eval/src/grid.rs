use quadrank_core::config::CalibrationConfig;
use quadrank_core::constants::MAX_GRID_POINTS;
use quadrank_core::errors::{CalibrationError, QuadrankResult};

/// Slack absorbing float error in `(stop - start) / step`, so that a grid
/// like 0 → 0.3 by 0.1 has three points rather than two.
const GRID_EPSILON: f64 = 1e-9;

/// Alpha grid `start + step, start + 2·step, …, stop`.
///
/// `start` itself is excluded and `stop` is included whenever it lies on the
/// grid, giving `floor((stop - start) / step)` points. Points are computed
/// as `start + i · step` rather than by repeated addition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaGrid {
    start: f64,
    stop: f64,
    step: f64,
}

impl AlphaGrid {
    pub fn new(start: f64, stop: f64, step: f64) -> QuadrankResult<Self> {
        let valid = start.is_finite() && stop.is_finite() && step.is_finite() && step > 0.0 && stop >= start;
        if !valid || ((stop - start) / step + GRID_EPSILON).floor() > MAX_GRID_POINTS as f64 {
            return Err(CalibrationError::InvalidGrid { start, stop, step }.into());
        }
        Ok(Self { start, stop, step })
    }

    pub fn from_config(config: &CalibrationConfig) -> QuadrankResult<Self> {
        Self::new(config.start, config.stop, config.step)
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        ((self.stop - self.start) / self.step + GRID_EPSILON).floor() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid points in increasing order.
    pub fn points(&self) -> Vec<f64> {
        (1..=self.len())
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_five_hundred_points() {
        let grid = AlphaGrid::from_config(&CalibrationConfig::default()).unwrap();
        assert_eq!(grid.len(), 500);
        let points = grid.points();
        assert!((points[0] - 0.01).abs() < 1e-12);
        assert!((points[499] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn start_excluded_stop_included() {
        let grid = AlphaGrid::new(0.0, 1.0, 0.25).unwrap();
        assert_eq!(grid.points(), vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn float_error_does_not_drop_last_point() {
        assert_eq!(AlphaGrid::new(0.0, 0.3, 0.1).unwrap().len(), 3);
    }

    #[test]
    fn off_grid_stop_is_not_exceeded() {
        let grid = AlphaGrid::new(0.0, 1.0, 0.3).unwrap();
        assert_eq!(grid.len(), 3);
        assert!(grid.points().iter().all(|a| *a <= 1.0));
    }

    #[test]
    fn degenerate_grid_is_empty() {
        assert!(AlphaGrid::new(2.0, 2.0, 0.1).unwrap().is_empty());
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert_eq!(AlphaGrid::new(0.0, 1e6, 1.0).unwrap().len(), MAX_GRID_POINTS);
        assert!(AlphaGrid::new(0.0, 1e12, 1.0).is_err());
        assert!(AlphaGrid::new(0.0, 1.0, 1e-300).is_err());
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert!(AlphaGrid::new(0.0, 1.0, 0.0).is_err());
        assert!(AlphaGrid::new(0.0, 1.0, -0.1).is_err());
        assert!(AlphaGrid::new(1.0, 0.0, 0.1).is_err());
        assert!(AlphaGrid::new(0.0, f64::INFINITY, 0.1).is_err());
    }
}
