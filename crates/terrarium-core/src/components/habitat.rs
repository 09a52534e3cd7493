//! Enclosure state owned by the session: tank hygiene and the day/night cycle.

use serde::{Deserialize, Serialize};
use terrarium_logic::clock;
use terrarium_logic::constants::{clamp_stat, STAT_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Habitat {
    /// Tank cleanliness, 0..=100.
    pub cleanliness: f32,
    /// Day/night cycle value, 0..100 (above 50 is night).
    pub day_night_cycle: f32,
    /// UVB exposure accumulated since the last midnight, in hours.
    pub uvb_hours_today: f32,
}

impl Default for Habitat {
    fn default() -> Self {
        Self {
            cleanliness: STAT_MAX,
            day_night_cycle: 0.0,
            uvb_hours_today: 0.0,
        }
    }
}

impl Habitat {
    pub fn is_night(&self) -> bool {
        clock::is_night(self.day_night_cycle)
    }

    /// Scrub the tank back to spotless.
    pub fn clean(&mut self) {
        self.cleanliness = STAT_MAX;
    }

    pub fn set_cleanliness(&mut self, value: f32) {
        self.cleanliness = clamp_stat(value);
    }

    /// Advance the cycle and UVB accounting by `dt` seconds. Returns whether
    /// it is night after the update.
    pub fn advance_cycle(&mut self, dt: f32, uvb_on: bool) -> bool {
        self.day_night_cycle = clock::advance_cycle(self.day_night_cycle, dt);
        let night = self.is_night();
        self.uvb_hours_today += clock::uvb_hours_gained(dt, uvb_on, night);
        if clock::is_midnight(self.day_night_cycle) {
            self.uvb_hours_today = 0.0;
        }
        night
    }
}
