pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_food_lines, prompt_free_kcal, prompt_meal, prompt_pricing_mode, prompt_quantity,
    prompt_yes_no,
};
pub use render::{
    display_catalog, display_entry, display_result, display_suggestion, display_summary,
    format_delta,
};
