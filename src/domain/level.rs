// Tank level calibration - maps a sensor distance to a fill percentage

/// Distance range of the tank. `min_distance` is the reading of a full tank
/// (sensor close to the water), `max_distance` the reading of an empty one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCalibration {
    pub min_distance: f64,
    pub max_distance: f64,
}

impl LevelCalibration {
    pub fn new(min_distance: f64, max_distance: f64) -> Self {
        Self {
            min_distance,
            max_distance,
        }
    }

    /// Whole percentage in 0..=100. A degenerate range reports 0.
    pub fn level_for(&self, distance: f64) -> f64 {
        let range = self.max_distance - self.min_distance;
        if range == 0.0 {
            return 0.0;
        }

        let normalized = 1.0 - (distance - self.min_distance) / range;
        (normalized * 100.0).clamp(0.0, 100.0).round()
    }
}
