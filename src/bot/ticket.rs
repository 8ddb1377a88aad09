//! The operator's current trade selection.

/// Amount and pair used for the next manual or automated trade.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub amount: f64,
    pub pair: String,
}

/// Parses an operator-entered amount, falling back to `default` when the
/// input is empty, unparsable or not a positive finite number.
pub fn parse_amount(input: Option<&str>, default: f64) -> f64 {
    input
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|a| a.is_finite() && *a > 0.0)
        .unwrap_or(default)
}
