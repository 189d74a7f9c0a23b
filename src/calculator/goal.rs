use serde::{Deserialize, Serialize};

use crate::calculator::constants::{DEFAULT_GYM_DAY_GOAL, DEFAULT_NORMAL_DAY_GOAL};

/// Daily kcal goals, selected by the gym-day flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyGoals {
    pub normal_day: i64,
    pub gym_day: i64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            normal_day: DEFAULT_NORMAL_DAY_GOAL,
            gym_day: DEFAULT_GYM_DAY_GOAL,
        }
    }
}

impl DailyGoals {
    pub fn goal_for(&self, is_gym_day: bool) -> i64 {
        if is_gym_day {
            self.gym_day
        } else {
            self.normal_day
        }
    }
}

/// Goal for a day using the built-in defaults.
pub fn goal_for(is_gym_day: bool) -> i64 {
    DailyGoals::default().goal_for(is_gym_day)
}

/// Logged kcal minus goal; positive means over the goal.
pub fn delta(total_logged: f64, goal: i64) -> f64 {
    total_logged - goal as f64
}
