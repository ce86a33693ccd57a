//! Per-model cost estimation
//!
//! Prices are USD per million tokens. The table covers the models the
//! assistant is expected to run with; unknown models report zero cost.

use super::provider::Usage;

/// (model prefix, input price, output price) in USD per 1M tokens.
/// More specific prefixes come first.
const PRICES: &[(&str, f64, f64)] = &[
    ("gpt-4o-mini", 0.15, 0.60),
    ("gpt-4o", 2.50, 10.00),
    ("gpt-3.5-turbo", 0.50, 1.50),
];

/// Estimate the USD cost of the given usage for a model
pub fn completion_cost(model: &str, usage: &Usage) -> f64 {
    let Some((_, input_price, output_price)) = PRICES
        .iter()
        .copied()
        .find(|(prefix, _, _)| model.starts_with(prefix))
    else {
        return 0.0;
    };

    (usage.prompt_tokens as f64 * input_price + usage.completion_tokens as f64 * output_price)
        / 1_000_000.0
}
