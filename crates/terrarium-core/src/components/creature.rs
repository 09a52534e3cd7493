//! The dragon itself.

use serde::{Deserialize, Serialize};

use terrarium_logic::actions::FoodCategory;
use terrarium_logic::clock;
use terrarium_logic::constants::hatchling;
use terrarium_logic::growth::{size_for, stage_for, GrowthStage};
use terrarium_logic::movement::Position;
use terrarium_logic::needs::{mood_for, Mood, Vitals};

use super::locomotion::Locomotion;

/// Color morph. Cosmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMorph {
    #[default]
    Normal,
    Red,
    Citrus,
    Hypo,
    Leatherback,
}

impl ColorMorph {
    pub const ALL: [ColorMorph; 5] = [
        Self::Normal,
        Self::Red,
        Self::Citrus,
        Self::Hypo,
        Self::Leatherback,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Red => "red",
            Self::Citrus => "citrus",
            Self::Hypo => "hypo",
            Self::Leatherback => "leatherback",
        }
    }
}

impl std::str::FromStr for ColorMorph {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown color morph '{s}'"))
    }
}

/// Lifetime and per-day tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub meals_eaten: u32,
    pub insects_today: u32,
    pub veggies_today: u32,
    pub times_handled: u32,
    pub total_days_alive: u32,
}

/// What changed when age advanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeProgress {
    /// A new game day began.
    pub new_day: bool,
    /// The stage the dragon just grew into, if any.
    pub grew_into: Option<GrowthStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub color: ColorMorph,
    /// Whole game days lived.
    pub age_days: u32,
    /// Real seconds lived; drives every other age field.
    pub real_age_secs: f64,
    pub size_inches: f32,
    stage: GrowthStage,
    pub vitals: Vitals,
    pub mood: Mood,
    pub asleep: bool,
    pub locomotion: Locomotion,
    pub counters: Counters,
    /// Session clock of the last meal.
    pub last_meal_ms: Option<u64>,
}

impl Creature {
    /// A fresh hatchling on the basking rock. An empty name falls back to
    /// the default.
    pub fn hatch(name: impl Into<String>, color: ColorMorph) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            hatchling::NAME.to_string()
        } else {
            name
        };
        let vitals = Vitals::default();
        Self {
            name,
            color,
            age_days: 0,
            real_age_secs: 0.0,
            size_inches: hatchling::SIZE_INCHES,
            stage: GrowthStage::Baby,
            mood: mood_for(&vitals, false),
            vitals,
            asleep: false,
            locomotion: Locomotion::at(Position::Basking),
            counters: Counters::default(),
            last_meal_ms: None,
        }
    }

    pub fn stage(&self) -> GrowthStage {
        self.stage
    }

    pub fn position(&self) -> Position {
        self.locomotion.position
    }

    pub fn is_moving(&self) -> bool {
        self.locomotion.is_moving()
    }

    /// Add `dt` real seconds of life. Stage, size and daily counters only
    /// change when a new game day starts.
    pub fn advance_age(&mut self, dt: f64) -> AgeProgress {
        self.real_age_secs += dt.max(0.0);
        let days = clock::game_days(self.real_age_secs);
        if days <= self.age_days {
            return AgeProgress::default();
        }

        self.age_days = days;
        self.counters.total_days_alive = days;
        self.counters.insects_today = 0;
        self.counters.veggies_today = 0;
        self.size_inches = size_for(days as f32);

        let stage = stage_for(days as f32);
        let grew_into = (stage != self.stage).then_some(stage);
        self.stage = stage;

        AgeProgress {
            new_day: true,
            grew_into,
        }
    }

    /// Rebuild the age-derived fields from `real_age_secs` and clamp the
    /// vitals. Used on records read back from storage.
    pub fn rederive(&mut self) {
        self.real_age_secs = self.real_age_secs.max(0.0);
        let days = clock::game_days(self.real_age_secs);
        self.age_days = days;
        self.counters.total_days_alive = days;
        self.size_inches = size_for(days as f32);
        self.stage = stage_for(days as f32);
        let v = self.vitals;
        self.vitals = Vitals::new(v.health, v.hunger, v.hydration, v.happiness);
        self.refresh_mood();
    }

    pub fn record_meal(&mut self, category: FoodCategory, now_ms: u64) {
        match category {
            FoodCategory::Insect => self.counters.insects_today += 1,
            FoodCategory::Veggie => self.counters.veggies_today += 1,
        }
        self.counters.meals_eaten += 1;
        self.last_meal_ms = Some(now_ms);
    }

    pub fn refresh_mood(&mut self) -> Mood {
        self.mood = mood_for(&self.vitals, self.asleep);
        self.mood
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hatchling_defaults() {
        let c = Creature::hatch("", ColorMorph::default());
        assert_eq!(c.name, "Spike");
        assert_eq!(c.stage(), GrowthStage::Baby);
        assert_eq!(c.size_inches, 4.0);
        assert_eq!(c.vitals.hunger, 80.0);
        assert_eq!(c.position(), Position::Basking);
        assert_eq!(c.mood, Mood::Happy);
        assert!(!c.is_moving());
    }

    #[test]
    fn test_day_boundary_resets_daily_counters() {
        let mut c = Creature::hatch("Rex", ColorMorph::Red);
        c.record_meal(FoodCategory::Insect, 10);
        c.record_meal(FoodCategory::Veggie, 20);
        assert_eq!(c.counters.meals_eaten, 2);

        assert!(!c.advance_age(119.0).new_day);
        assert_eq!(c.counters.insects_today, 1);

        let progress = c.advance_age(1.0);
        assert!(progress.new_day);
        assert_eq!(progress.grew_into, None);
        assert_eq!(c.age_days, 1);
        assert_eq!(c.counters.total_days_alive, 1);
        assert_eq!(c.counters.insects_today, 0);
        assert_eq!(c.counters.veggies_today, 0);
        assert_eq!(c.counters.meals_eaten, 2);
        assert_eq!(c.last_meal_ms, Some(20));
    }

    #[test]
    fn test_stage_change_reported_once() {
        let mut c = Creature::hatch("Rex", ColorMorph::Red);
        c.advance_age(60.0 * 120.0 - 1.0);
        assert_eq!(c.stage(), GrowthStage::Baby);
        let progress = c.advance_age(1.0);
        assert_eq!(progress.grew_into, Some(GrowthStage::Juvenile));
        assert_eq!(c.stage(), GrowthStage::Juvenile);
        assert_eq!(c.advance_age(120.0).grew_into, None);
        assert!(c.size_inches > 4.0);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("Hypo".parse::<ColorMorph>(), Ok(ColorMorph::Hypo));
        assert!("plaid".parse::<ColorMorph>().is_err());
    }
}
