//! Base-unit amounts and their display form

use alloy::primitives::U256;
use serde::Serialize;

/// Decimals of the network's base currency (wei per ether)
pub const ETHER_DECIMALS: u8 = 18;

/// An amount in the network's smallest unit, shown in the base currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balance {
    raw: U256,
}

impl Balance {
    pub fn from_raw(raw: U256) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> U256 {
        self.raw
    }

    /// Decimal string in ether, e.g. `"1.5"` or `"0.0"`
    pub fn formatted(&self) -> String {
        format_units(self.raw, ETHER_DECIMALS)
    }

    /// Like [`Balance::formatted`] with thousands separators in the whole part
    pub fn commified(&self) -> String {
        commify(&self.formatted())
    }
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Format a U256 value with decimals
///
/// Trailing fractional zeros are trimmed but one fractional digit is always
/// kept, so whole amounts read as `"2.0"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    let remainder_str = format!(
        "{:0>width$}",
        remainder.to_string(),
        width = decimals as usize
    );
    let trimmed = remainder_str.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

/// Insert `,` every three digits of the whole part of a decimal string
pub fn commify(value: &str) -> String {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}.{}", grouped, fraction),
        None => grouped,
    }
}
