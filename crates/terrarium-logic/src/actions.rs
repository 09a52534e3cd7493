//! Pure action logic - nutrition table, diet effectiveness and the fixed
//! vitals deltas of every keeper action.

use serde::{Deserialize, Serialize};

use crate::growth::GrowthStage;
use crate::needs::VitalsDelta;

/// Broad diet category of a food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Insect,
    Veggie,
}

/// Every food the keeper can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodKind {
    Crickets,
    Dubia,
    Mealworms,
    Hornworms,
    Collards,
    Squash,
    BellPepper,
}

/// Raw nutrition values before effectiveness scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutrition {
    pub hunger: f32,
    pub health: f32,
    pub happiness: f32,
    pub category: FoodCategory,
}

impl FoodKind {
    pub const ALL: [FoodKind; 7] = [
        FoodKind::Crickets,
        FoodKind::Dubia,
        FoodKind::Mealworms,
        FoodKind::Hornworms,
        FoodKind::Collards,
        FoodKind::Squash,
        FoodKind::BellPepper,
    ];

    pub fn nutrition(self) -> Nutrition {
        use FoodCategory::*;
        let (hunger, health, happiness, category) = match self {
            FoodKind::Crickets => (15.0, 5.0, 5.0, Insect),
            FoodKind::Dubia => (20.0, 8.0, 8.0, Insect),
            FoodKind::Mealworms => (10.0, 3.0, 3.0, Insect),
            FoodKind::Hornworms => (25.0, 5.0, 15.0, Insect),
            FoodKind::Collards => (10.0, 10.0, 2.0, Veggie),
            FoodKind::Squash => (12.0, 8.0, 3.0, Veggie),
            FoodKind::BellPepper => (8.0, 5.0, 2.0, Veggie),
        };
        Nutrition {
            hunger,
            health,
            happiness,
            category,
        }
    }

    pub fn category(self) -> FoodCategory {
        self.nutrition().category
    }

    /// Identifier used on the command line and in saves.
    pub fn key(self) -> &'static str {
        match self {
            FoodKind::Crickets => "crickets",
            FoodKind::Dubia => "dubia",
            FoodKind::Mealworms => "mealworms",
            FoodKind::Hornworms => "hornworms",
            FoodKind::Collards => "collards",
            FoodKind::Squash => "squash",
            FoodKind::BellPepper => "bell-pepper",
        }
    }

    /// Keeper-facing name.
    pub fn display_name(self) -> &'static str {
        match self {
            FoodKind::Crickets => "Crickets",
            FoodKind::Dubia => "Dubia Roaches",
            FoodKind::Mealworms => "Mealworms",
            FoodKind::Hornworms => "Hornworms",
            FoodKind::Collards => "Collard Greens",
            FoodKind::Squash => "Butternut Squash",
            FoodKind::BellPepper => "Bell Pepper",
        }
    }
}

impl std::str::FromStr for FoodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodKind::ALL
            .into_iter()
            .find(|food| food.key() == s)
            .ok_or_else(|| format!("unknown food '{s}'"))
    }
}

/// Multiplier applied to hunger and health gains for a stage/category pair.
pub fn effectiveness(stage: GrowthStage, category: FoodCategory) -> f32 {
    match (stage.prefers_insects(), category) {
        (true, FoodCategory::Insect) => 1.2,
        (true, FoodCategory::Veggie) => 0.8,
        (false, FoodCategory::Veggie) => 1.2,
        (false, FoodCategory::Insect) => 0.9,
    }
}

/// Vitals delta from eating `food` at `stage`. Happiness is never scaled.
pub fn feed_delta(food: FoodKind, stage: GrowthStage) -> VitalsDelta {
    let n = food.nutrition();
    let mult = effectiveness(stage, n.category);
    VitalsDelta {
        health: n.health * mult,
        hunger: n.hunger * mult,
        hydration: 0.0,
        happiness: n.happiness,
    }
}

/// Drinking at the water dish.
pub fn drink_delta() -> VitalsDelta {
    VitalsDelta {
        hydration: 30.0,
        happiness: 5.0,
        ..Default::default()
    }
}

/// A warm bath.
pub fn bath_delta() -> VitalsDelta {
    VitalsDelta {
        health: 5.0,
        hydration: 40.0,
        happiness: 10.0,
        ..Default::default()
    }
}

/// Keeper cleaned the tank (cleanliness itself resets separately).
pub fn clean_tank_delta() -> VitalsDelta {
    VitalsDelta {
        health: 5.0,
        happiness: 5.0,
        ..Default::default()
    }
}

/// Finished a full play sequence.
pub fn play_delta() -> VitalsDelta {
    VitalsDelta {
        hunger: -5.0,
        happiness: 15.0,
        ..Default::default()
    }
}

/// Stroked while awake.
pub fn pet_delta() -> VitalsDelta {
    VitalsDelta {
        happiness: 2.0,
        ..Default::default()
    }
}

/// Outcome of a handling session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleOutcome {
    /// The dragon enjoyed it.
    Enjoyed { happiness_gain: f32 },
    /// The dragon got stressed and will retreat to its hide.
    Stressed { happiness_loss: f32 },
}

impl HandleOutcome {
    pub fn delta(self) -> VitalsDelta {
        match self {
            Self::Enjoyed { happiness_gain } => VitalsDelta {
                happiness: happiness_gain,
                ..Default::default()
            },
            Self::Stressed { happiness_loss } => VitalsDelta {
                happiness: -happiness_loss,
                ..Default::default()
            },
        }
    }
}

/// Chance that handling stresses a dragon at `stage`.
pub fn stress_chance(stage: GrowthStage) -> f64 {
    if stage == GrowthStage::Baby {
        0.3
    } else {
        0.1
    }
}

/// Resolve a handling session from a uniform `roll` in `[0, 1)`.
pub fn resolve_handling(stage: GrowthStage, roll: f64) -> HandleOutcome {
    if roll < stress_chance(stage) {
        HandleOutcome::Stressed {
            happiness_loss: 10.0,
        }
    } else {
        let happiness_gain = if stage == GrowthStage::Baby { 5.0 } else { 10.0 };
        HandleOutcome::Enjoyed { happiness_gain }
    }
}
