use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};

use crate::calculator::{delta, DailyGoals};
use crate::models::LogEntry;

/// Span of days covered by a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    /// Seven days ending today.
    Week,
    /// First of the month up to today.
    Month,
}

impl Period {
    /// Inclusive date range for a summary computed on `today`.
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Period::Day => today,
            Period::Week => today - Duration::days(6),
            Period::Month => today.with_day(1).unwrap_or(today),
        };
        (start, today)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day => write!(f, "Today"),
            Period::Week => write!(f, "Last 7 days"),
            Period::Month => write!(f, "This month"),
        }
    }
}

/// Logged totals for one day against its goal.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,

    /// Per-meal totals in display order.
    pub meals: Vec<(String, f64)>,

    pub total: f64,
    pub gym: bool,
    pub goal: i64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DaySummary>,
    pub total_logged: f64,
    pub total_goal: i64,
    pub delta: f64,
}

/// Order meals by their position in `meal_order`; unknown meals go last,
/// alphabetically.
fn sort_meals(meals: BTreeMap<String, f64>, meal_order: &[String]) -> Vec<(String, f64)> {
    let mut meals: Vec<(String, f64)> = meals.into_iter().collect();
    meals.sort_by_key(|(meal, _)| {
        meal_order
            .iter()
            .position(|m| m == meal)
            .unwrap_or(meal_order.len())
    });
    meals
}

/// Aggregate `entries` over `period`, one row per day with entries.
///
/// A `Day` summary always has a row for today, even when nothing was logged.
pub fn summarize<F>(
    entries: &[LogEntry],
    is_gym_day: F,
    goals: &DailyGoals,
    meal_order: &[String],
    period: Period,
    today: NaiveDate,
) -> Summary
where
    F: Fn(NaiveDate) -> bool,
{
    let (start, end) = period.range(today);

    let mut by_day: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.date >= start && e.date <= end) {
        *by_day
            .entry(entry.date)
            .or_default()
            .entry(entry.meal.clone())
            .or_insert(0.0) += entry.total_kcal;
    }
    if period == Period::Day {
        by_day.entry(today).or_default();
    }

    let days: Vec<DaySummary> = by_day
        .into_iter()
        .map(|(date, meals)| {
            let total: f64 = meals.values().sum();
            let gym = is_gym_day(date);
            let goal = goals.goal_for(gym);
            DaySummary {
                date,
                meals: sort_meals(meals, meal_order),
                total,
                gym,
                goal,
                delta: delta(total, goal),
            }
        })
        .collect();

    let total_logged: f64 = days.iter().map(|d| d.total).sum();
    let total_goal: i64 = days.iter().map(|d| d.goal).sum();

    Summary {
        period,
        start,
        end,
        days,
        total_logged,
        total_goal,
        delta: delta(total_logged, total_goal),
    }
}
