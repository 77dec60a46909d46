//! Portfolio input parsing
//!
//! The portfolio panel accepts newline-delimited `symbol,quantity` pairs
//! typed by the user; parsing is deliberately lenient and forwards whatever
//! it read to the backend, which owns the valuation.

/// One holding as entered by the user
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    /// Parsed quantity; a non-numeric entry becomes NaN and is forwarded
    /// to the backend unchanged
    pub quantity: f64,
}

/// Parse newline-delimited `symbol,quantity` lines
///
/// Lines missing either field are silently skipped. Symbols are trimmed;
/// the quantity is integer-parsed with no further validation.
pub fn parse_holdings(text: &str) -> Vec<Holding> {
    text.lines()
        .filter_map(|line| {
            let (symbol, quantity) = line.split_once(',')?;
            let symbol = symbol.trim();
            let quantity = quantity.trim();
            if symbol.is_empty() || quantity.is_empty() {
                return None;
            }

            let quantity = quantity
                .parse::<i64>()
                .map_or(f64::NAN, |q| q as f64);

            Some(Holding {
                symbol: symbol.to_string(),
                quantity,
            })
        })
        .collect()
}
