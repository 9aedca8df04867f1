//! Asset amounts.
//!
//! An [`Asset`] stores its magnitude as a signed 64-bit count of
//! micro-units, so `"10.00000 BWF"` is held as `1_000_000` at precision 5.
//! Precision always comes from the [`SymbolTable`]; an unknown symbol is a
//! hard error, never a guess.

use crate::errors::TypeError;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Width of the symbol field on the wire. Symbols are NUL-padded to this.
pub const SYMBOL_WIRE_LEN: usize = 9;

/// Symbol→precision lookup, seeded with the native Beowulf assets.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    precisions: HashMap<String, u8>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        let mut precisions = HashMap::new();
        precisions.insert("BWF".to_string(), 5);
        precisions.insert("W".to_string(), 5);
        precisions.insert("M".to_string(), 5);
        Self { precisions }
    }
}

impl SymbolTable {
    /// Look up the precision of a symbol.
    pub fn precision_of(&self, symbol: &str) -> Result<u8, TypeError> {
        self.precisions
            .get(symbol)
            .copied()
            .ok_or_else(|| TypeError::UnknownSymbol(symbol.to_string()))
    }

    /// Whether the symbol is known.
    pub fn contains(&self, symbol: &str) -> bool {
        self.precisions.contains_key(symbol)
    }

    /// Register an SMT token symbol discovered at runtime.
    pub fn register(&mut self, symbol: &str, precision: u8) -> Result<(), TypeError> {
        if symbol.len() > SYMBOL_WIRE_LEN {
            return Err(TypeError::SymbolTooLong(symbol.to_string()));
        }
        self.precisions.insert(symbol.to_string(), precision);
        Ok(())
    }
}

/// An amount of one asset, in micro-units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    amount: i64,
    precision: u8,
    symbol: String,
}

impl Asset {
    /// Build from raw micro-units and an already-resolved precision.
    pub fn from_units(amount: i64, precision: u8, symbol: &str) -> Result<Self, TypeError> {
        if symbol.len() > SYMBOL_WIRE_LEN {
            return Err(TypeError::SymbolTooLong(symbol.to_string()));
        }
        Ok(Self {
            amount,
            precision,
            symbol: symbol.to_string(),
        })
    }

    /// Parse a `"<decimal> <SYMBOL>"` string, resolving precision through
    /// the table. `"10.00000 BWF"` → 1_000_000 micro-units at precision 5.
    pub fn parse(s: &str, table: &SymbolTable) -> Result<Self, TypeError> {
        let mut parts = s.trim().split_whitespace();
        let (value, symbol) = match (parts.next(), parts.next(), parts.next()) {
            (Some(v), Some(sym), None) => (v, sym),
            _ => return Err(TypeError::MalformedAmount(s.to_string())),
        };
        let precision = table.precision_of(symbol)?;

        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(TypeError::MalformedAmount(s.to_string()));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(TypeError::MalformedAmount(s.to_string()));
        }
        if frac_part.len() > precision as usize {
            return Err(TypeError::PrecisionExceeded {
                amount: s.to_string(),
                precision,
            });
        }

        let scale = 10i64
            .checked_pow(u32::from(precision))
            .ok_or_else(|| TypeError::AmountOutOfRange(s.to_string()))?;
        let int_units: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| TypeError::AmountOutOfRange(s.to_string()))?
        };
        let frac_scale = 10i64.pow((precision as usize - frac_part.len()) as u32);
        let frac_units: i64 = if frac_part.is_empty() {
            0
        } else {
            frac_part
                .parse::<i64>()
                .map_err(|_| TypeError::AmountOutOfRange(s.to_string()))?
                * frac_scale
        };
        let magnitude = int_units
            .checked_mul(scale)
            .and_then(|v| v.checked_add(frac_units))
            .ok_or_else(|| TypeError::AmountOutOfRange(s.to_string()))?;
        let amount = if negative { -magnitude } else { magnitude };

        Ok(Self {
            amount,
            precision,
            symbol: symbol.to_string(),
        })
    }

    /// Micro-unit magnitude.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Decimal places of the symbol.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Asset symbol, e.g. `"BWF"`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10i64.pow(u32::from(self.precision));
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let int_part = magnitude / scale as u64;
        if self.precision == 0 {
            write!(f, "{sign}{int_part} {}", self.symbol)
        } else {
            let frac_part = magnitude % scale as u64;
            write!(
                f,
                "{sign}{int_part}.{frac_part:0width$} {}",
                self.symbol,
                width = self.precision as usize
            )
        }
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
