pub mod constants;
pub mod goal;
pub mod number;
pub mod structured;
pub mod text;

pub use constants::*;
pub use goal::{delta, goal_for, DailyGoals};
pub use number::{parse_number, safe_int};
pub use structured::calculate;
pub use text::{calculate_from_text, parse_line, TextLine};
