// The fixed point layout is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

#![no_std]

mod mul_div;

pub use mul_div::mul_div_floor;

/// Unsigned fraction with 18 decimal places.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Decimal(u128);

impl Decimal {
    const DECIMAL_FRACTIONAL: u128 = 1_000_000_000_000_000_000u128; // 1*10**18

    pub const fn raw(value: u128) -> Self {
        Self(value)
    }

    /// Create a 1.0 Decimal
    #[inline]
    pub const fn one() -> Self {
        Self(Self::DECIMAL_FRACTIONAL)
    }

    /// Convert basis points (x/10000) into Decimal
    pub fn bps(x: u64) -> Self {
        Self((x as u128) * 100_000_000_000_000)
    }

    /// Raw value scaled by 10^18, e.g. 0.5 -> 500_000_000_000_000_000
    #[must_use]
    #[inline]
    pub const fn atomics(&self) -> u128 {
        self.0
    }

    /// `value * self`, rounded down.
    ///
    /// The value is split around 10^18 so that fractions up to 1.0 never overflow,
    /// whatever the size of `value`.
    pub fn checked_mul_floor(self, value: u128) -> Option<u128> {
        let whole = value / Self::DECIMAL_FRACTIONAL;
        let rest = value % Self::DECIMAL_FRACTIONAL;
        let whole_part = whole.checked_mul(self.0)?;
        let rest_part = rest.checked_mul(self.0)? / Self::DECIMAL_FRACTIONAL;
        whole_part.checked_add(rest_part)
    }
}
