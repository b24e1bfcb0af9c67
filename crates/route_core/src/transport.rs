//! Transport modes and the speed field that drives them.
//!
//! Selecting a mode resets the speed to that mode's ceiling. Typing a speed
//! above the active ceiling promotes the mode to the slowest one that can
//! still reach it; a speed above every ceiling leaves the mode alone.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Foot,
    Bike,
    Car,
    Train,
    Plane,
}

impl TransportMode {
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Foot,
        TransportMode::Bike,
        TransportMode::Car,
        TransportMode::Train,
        TransportMode::Plane,
    ];

    /// Maximum speed in km/h. Doubles as the suggested cruising speed.
    pub fn ceiling_kmh(self) -> f64 {
        match self {
            TransportMode::Foot => 5.0,
            TransportMode::Bike => 20.0,
            TransportMode::Car => 140.0,
            TransportMode::Train => 250.0,
            TransportMode::Plane => 800.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransportMode::Foot => "foot",
            TransportMode::Bike => "bike",
            TransportMode::Car => "car",
            TransportMode::Train => "train",
            TransportMode::Plane => "plane",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TransportMode::Foot => "🚶",
            TransportMode::Bike => "🚲",
            TransportMode::Car => "🚗",
            TransportMode::Train => "🚆",
            TransportMode::Plane => "✈",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mode that should be active after the speed is set to `speed_kmh`.
pub fn promoted_mode(active: TransportMode, speed_kmh: f64) -> TransportMode {
    if speed_kmh <= active.ceiling_kmh() {
        return active;
    }
    let mut faster: Vec<TransportMode> = TransportMode::ALL
        .into_iter()
        .filter(|mode| mode.ceiling_kmh() > speed_kmh)
        .collect();
    faster.sort_by(|a, b| a.ceiling_kmh().total_cmp(&b.ceiling_kmh()));
    faster.first().copied().unwrap_or(active)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportState {
    active: TransportMode,
    speed_kmh: f64,
    speed_text: String,
}

impl Default for TransportState {
    fn default() -> Self {
        Self::with_mode(TransportMode::Car)
    }
}

impl TransportState {
    pub fn with_mode(mode: TransportMode) -> Self {
        let mut state = Self {
            active: mode,
            speed_kmh: 0.0,
            speed_text: String::new(),
        };
        state.set_active_mode(mode);
        state
    }

    pub fn active_mode(&self) -> TransportMode {
        self.active
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Raw contents of the speed field, sent verbatim with route requests.
    pub fn speed_text(&self) -> &str {
        &self.speed_text
    }

    pub fn set_active_mode(&mut self, mode: TransportMode) {
        self.active = mode;
        self.speed_kmh = mode.ceiling_kmh();
        self.speed_text = format_speed(self.speed_kmh);
    }

    pub fn set_speed(&mut self, speed_kmh: f64) {
        self.speed_kmh = speed_kmh;
        self.speed_text = format_speed(speed_kmh);
        self.promote_for(speed_kmh);
    }

    /// Apply an edit of the speed field. The text is always kept; the numeric
    /// speed and the mode only follow when the text parses.
    pub fn set_speed_text(&mut self, raw: &str) {
        self.speed_text = raw.to_string();
        if let Ok(speed_kmh) = raw.trim().parse::<f64>() {
            if speed_kmh.is_finite() {
                self.speed_kmh = speed_kmh;
                self.promote_for(speed_kmh);
            }
        }
    }

    fn promote_for(&mut self, speed_kmh: f64) {
        let next = promoted_mode(self.active, speed_kmh);
        if next != self.active {
            log::debug!(
                "speed {} km/h exceeds {} ceiling, switching to {}",
                speed_kmh,
                self.active,
                next
            );
            self.active = next;
        }
    }
}

fn format_speed(speed_kmh: f64) -> String {
    speed_kmh.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_car_at_its_ceiling() {
        let state = TransportState::default();
        assert_eq!(state.active_mode(), TransportMode::Car);
        assert_eq!(state.speed_kmh(), 140.0);
        assert_eq!(state.speed_text(), "140");
    }

    #[test]
    fn speed_equal_to_ceiling_does_not_promote() {
        assert_eq!(promoted_mode(TransportMode::Car, 140.0), TransportMode::Car);
    }

    #[test]
    fn promotion_picks_smallest_strictly_greater_ceiling() {
        assert_eq!(promoted_mode(TransportMode::Foot, 20.0), TransportMode::Car);
        assert_eq!(promoted_mode(TransportMode::Foot, 19.0), TransportMode::Bike);
        assert_eq!(promoted_mode(TransportMode::Car, 250.0), TransportMode::Plane);
    }

    #[test]
    fn lower_speed_never_demotes() {
        assert_eq!(promoted_mode(TransportMode::Plane, 3.0), TransportMode::Plane);
    }

    #[test]
    fn non_numeric_speed_text_keeps_mode_and_speed() {
        let mut state = TransportState::default();
        state.set_speed_text("fast");
        assert_eq!(state.speed_text(), "fast");
        assert_eq!(state.speed_kmh(), 140.0);
        assert_eq!(state.active_mode(), TransportMode::Car);
    }
}
