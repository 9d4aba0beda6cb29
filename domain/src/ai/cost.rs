//! Token cost estimation

/// (model prefix, USD per million input tokens, USD per million output tokens)
///
/// Looked up by longest matching prefix so dated model ids
/// (`claude-sonnet-4-20250514`) resolve to their family.
const MODEL_PRICING: &[(&str, f64, f64)] = &[
    ("gpt-4o-mini", 0.15, 0.60),
    ("gpt-4o", 2.50, 10.00),
    ("gpt-4.1-mini", 0.40, 1.60),
    ("gpt-4.1", 2.00, 8.00),
    ("o3-mini", 1.10, 4.40),
    ("claude-opus-4", 15.00, 75.00),
    ("claude-sonnet-4", 3.00, 15.00),
    ("claude-3-5-haiku", 0.80, 4.00),
    ("claude-haiku-4", 1.00, 5.00),
];

const DEFAULT_PRICING: (f64, f64) = (3.00, 15.00);

fn pricing_for(model: &str) -> (f64, f64) {
    MODEL_PRICING
        .iter()
        .filter(|(prefix, _, _)| model.starts_with(prefix))
        .max_by_key(|(prefix, _, _)| prefix.len())
        .map_or(DEFAULT_PRICING, |&(_, input, output)| (input, output))
}

/// Known model prefixes
pub fn priced_models() -> impl Iterator<Item = &'static str> {
    MODEL_PRICING.iter().map(|(model, _, _)| *model)
}

/// Estimated USD cost of a call
pub fn estimate_cost(model: &str, input_tokens: u64, output_tokens: u64) -> f64 {
    let (input, output) = pricing_for(model);
    (input_tokens as f64 * input + output_tokens as f64 * output) / 1_000_000.0
}

/// `$0.005`, or `<$0.001` for negligible amounts
pub fn format_cost(cost: f64) -> String {
    if cost < 0.001 {
        "<$0.001".to_string()
    } else {
        format!("${:.3}", cost)
    }
}

/// `~1,234,567`
pub fn format_token_count(tokens: u64) -> String {
    let digits = tokens.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('~');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
