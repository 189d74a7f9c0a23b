/// Daily goal (kcal) on a rest day.
pub const DEFAULT_NORMAL_DAY_GOAL: i64 = 2000;

/// Daily goal (kcal) on a day with a gym session.
pub const DEFAULT_GYM_DAY_GOAL: i64 = 2400;

/// Catalog values above this were almost certainly written by a sheet that
/// dropped the decimal comma (`220,00` read back as `22000`).
pub const DEFAULT_MANGLED_VALUE_THRESHOLD: f64 = 2000.0;

/// Divisor applied to mangled catalog values.
pub const MANGLED_VALUE_DIVISOR: f64 = 100.0;

/// Label prefix for directly entered kcal in a structured calculation.
pub const FREE_KCAL_LABEL: &str = "Kcal libres";

/// Number of food slots offered by the interactive calculator.
pub const DEFAULT_FOOD_SLOTS: usize = 4;

/// Default meal slots, in display order.
pub const DEFAULT_MEALS: [&str; 6] = [
    "desayuno",
    "almuerzo",
    "merienda",
    "post entreno",
    "cena",
    "extra",
];
