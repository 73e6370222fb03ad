use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

// Amounts with more fractional digits than this cannot come out of the
// journal; the cap keeps the denominator comfortably inside i64.
const MAX_SCALE: u32 = 9;

/// The ledger's fixed-point representation of a monetary amount: an integer
/// numerator over a power-of-ten denominator. `10.50` is 1050/100. The
/// denominator encodes the precision the ledger owner recorded the amount
/// at, so it survives round trips through the journal text.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct FixedValue {
    num: i64,
    denom: i64,
}

impl FixedValue {
    pub fn new(num: i64, denom: i64) -> FixedValue {
        debug_assert!(denom > 0 && 10i64.pow(denom.ilog10()) == denom);
        FixedValue { num, denom }
    }

    /// Parses a plain decimal amount (`10.50`, `-3`, `0.125`) into its
    /// fixed-point form, taking the denominator from the number of
    /// fractional digits written. Returns `None` for anything that is not
    /// a simple decimal number.
    pub fn parse(text: &str) -> Option<FixedValue> {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() || frac_part.len() as u32 > MAX_SCALE {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let denom = 10i64.pow(frac_part.len() as u32);
        let num: i64 = format!("{}{}", int_part, frac_part).parse().ok()?;
        Some(FixedValue {
            num: if negative { -num } else { num },
            denom,
        })
    }

    /// Converts an exact decimal price into the fixed-point form with the
    /// given denominator: numerator = round(price × denom), half-to-even.
    /// Returns `None` if the scaled numerator does not fit.
    pub fn from_decimal(price: Decimal, denom: i64) -> Option<FixedValue> {
        let scaled = price.checked_mul(Decimal::from(denom))?;
        let num = scaled.round().to_i64()?;
        Some(FixedValue { num, denom })
    }

    pub fn num(&self) -> i64 {
        self.num
    }

    pub fn denom(&self) -> i64 {
        self.denom
    }

    fn scale(&self) -> u32 {
        self.denom.ilog10()
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.num, self.scale())
    }
}

impl fmt::Display for FixedValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Decimal keeps trailing zeros at the given scale, so 1050/100
        // renders back as "10.50".
        write!(f, "{}", self.to_decimal())
    }
}
