//! Currency formatter
//!
//! Symbol-prefixed amounts with comma thousands grouping, matching the
//! `en-NG` currency style (`₦5,000`).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::application::ports::PriceFormatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
    fraction_digits: u32,
}

impl CurrencyFormatter {
    pub fn new(symbol: impl Into<String>, fraction_digits: u32) -> Self {
        Self {
            symbol: symbol.into(),
            fraction_digits,
        }
    }

    /// Nigerian naira, whole units
    pub fn naira() -> Self {
        Self::new("₦", 0)
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::naira()
    }
}

impl PriceFormatter for CurrencyFormatter {
    fn format_price(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = rounded.abs().to_string();
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits.as_str(), ""),
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(int_part));

        if self.fraction_digits > 0 {
            let width = self.fraction_digits as usize;
            out.push('.');
            out.push_str(&format!("{:0<width$}", frac_part, width = width));
        }
        out
    }
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
