//! Growth model - stage and size as pure functions of age in game days.

use serde::{Deserialize, Serialize};

/// Discrete growth phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    /// Days 0..60
    Baby,
    /// Days 60..180
    Juvenile,
    /// Days 180..365
    Subadult,
    /// Days 365+
    Adult,
}

impl GrowthStage {
    /// Age in days at which this stage begins.
    pub fn starts_at(self) -> u32 {
        match self {
            Self::Baby => 0,
            Self::Juvenile => 60,
            Self::Subadult => 180,
            Self::Adult => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Baby => "baby",
            Self::Juvenile => "juvenile",
            Self::Subadult => "subadult",
            Self::Adult => "adult",
        }
    }

    /// Babies and juveniles do better on insects, older dragons on greens.
    pub fn prefers_insects(self) -> bool {
        matches!(self, Self::Baby | Self::Juvenile)
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Growth stage for an age in game days.
pub fn stage_for(age_days: f32) -> GrowthStage {
    if age_days < 60.0 {
        GrowthStage::Baby
    } else if age_days < 180.0 {
        GrowthStage::Juvenile
    } else if age_days < 365.0 {
        GrowthStage::Subadult
    } else {
        GrowthStage::Adult
    }
}

/// Length in inches for an age in game days.
///
/// Piecewise linear through (0, 4), (30, 8), (60, 12), (180, 18), (365, 22),
/// then two more inches over the following year, capped at 24.
pub fn size_for(age_days: f32) -> f32 {
    let age = age_days.max(0.0);
    if age < 30.0 {
        4.0 + (age / 30.0) * 4.0
    } else if age < 60.0 {
        8.0 + ((age - 30.0) / 30.0) * 4.0
    } else if age < 180.0 {
        12.0 + ((age - 60.0) / 120.0) * 6.0
    } else if age < 365.0 {
        18.0 + ((age - 180.0) / 185.0) * 4.0
    } else {
        (22.0 + ((age - 365.0) / 365.0) * 2.0).min(24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(stage_for(0.0), GrowthStage::Baby);
        assert_eq!(stage_for(59.0), GrowthStage::Baby);
        assert_eq!(stage_for(60.0), GrowthStage::Juvenile);
        assert_eq!(stage_for(179.0), GrowthStage::Juvenile);
        assert_eq!(stage_for(180.0), GrowthStage::Subadult);
        assert_eq!(stage_for(364.0), GrowthStage::Subadult);
        assert_eq!(stage_for(365.0), GrowthStage::Adult);
        assert_eq!(stage_for(5_000.0), GrowthStage::Adult);
    }

    #[test]
    fn test_stage_starts_match_derivation() {
        for stage in [
            GrowthStage::Baby,
            GrowthStage::Juvenile,
            GrowthStage::Subadult,
            GrowthStage::Adult,
        ] {
            assert_eq!(stage_for(stage.starts_at() as f32), stage);
        }
    }

    #[test]
    fn test_size_anchor_points() {
        assert_eq!(size_for(0.0), 4.0);
        assert_eq!(size_for(30.0), 8.0);
        assert_eq!(size_for(60.0), 12.0);
        assert_eq!(size_for(180.0), 18.0);
        assert_eq!(size_for(365.0), 22.0);
        assert_eq!(size_for(730.0), 24.0);
        assert_eq!(size_for(10_000.0), 24.0);
    }

    #[test]
    fn test_size_continuous_at_breakpoints() {
        for breakpoint in [30.0_f32, 60.0, 180.0, 365.0] {
            let left = size_for(breakpoint - 0.001);
            let right = size_for(breakpoint);
            assert!((right - left).abs() < 0.01, "jump at {breakpoint}");
        }
    }

    #[test]
    fn test_insect_preference() {
        assert!(GrowthStage::Baby.prefers_insects());
        assert!(GrowthStage::Juvenile.prefers_insects());
        assert!(!GrowthStage::Subadult.prefers_insects());
        assert!(!GrowthStage::Adult.prefers_insects());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(GrowthStage::Subadult.to_string(), "subadult");
    }
}
