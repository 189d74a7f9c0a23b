/// One requested food and its quantity (grams or units).
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLine {
    pub item_name: String,
    pub quantity: f64,
}

impl RequestLine {
    pub fn new(item_name: impl Into<String>, quantity: f64) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
        }
    }
}

/// A single contribution to a calculation total.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownLine {
    /// Human-readable label, e.g. `"pollo: 330 kcal"`.
    pub label: String,

    /// Unrounded kcal.
    pub amount: f64,
}

/// Total kcal plus the ordered lines that make it up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationResult {
    pub total: f64,
    pub breakdown: Vec<BreakdownLine>,
}

impl CalculationResult {
    pub(crate) fn push(&mut self, label: String, amount: f64) {
        self.total += amount;
        self.breakdown.push(BreakdownLine { label, amount });
    }

    pub fn is_empty(&self) -> bool {
        self.breakdown.is_empty()
    }

    /// Breakdown labels, one per line, as stored in the log.
    pub fn detail(&self) -> String {
        self.breakdown
            .iter()
            .map(|line| line.label.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
