// The curve shapes follow the wynd-utils crate, which is licensed under the Apache
// License Apache 2.0 - https://github.com/wynddao/wynd-contracts

#![no_std]

use soroban_sdk::contracttype;

#[derive(Debug, Eq, PartialEq)]
pub enum CurveError {
    /// "Later point must have higher X than previous point"
    PointsOutOfOrder,

    /// A curve that always decrease or stay constant
    MonotonicDecreasing,
}

#[contracttype]
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Curve {
    /// Linear between two points, flat outside of them
    SaturatingLinear(SaturatingLinear),
}

impl Curve {
    pub fn saturating_linear((min_x, min_y): (u64, u128), (max_x, max_y): (u64, u128)) -> Self {
        Curve::SaturatingLinear(SaturatingLinear {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// provides y = f(x) evaluation
    pub fn value(&self, x: u64) -> u128 {
        match self {
            Curve::SaturatingLinear(s) => s.value(x),
        }
    }

    /// returns an error if there is ever x2 > x1 such that value(x2) < value(x1)
    pub fn validate_monotonic_increasing(&self) -> Result<(), CurveError> {
        match self {
            Curve::SaturatingLinear(s) => s.validate_monotonic_increasing(),
        }
    }
}

/// min_y for all x <= min_x, max_y for all x >= max_x, linear in between
#[contracttype]
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SaturatingLinear {
    pub min_x: u64,
    pub min_y: u128,
    pub max_x: u64,
    pub max_y: u128,
}

impl SaturatingLinear {
    pub fn value(&self, x: u64) -> u128 {
        match (x <= self.min_x, x >= self.max_x) {
            (true, _) => self.min_y,
            (_, true) => self.max_y,
            _ => interpolate((self.min_x, self.min_y), (self.max_x, self.max_y), x),
        }
    }

    pub fn validate_monotonic_increasing(&self) -> Result<(), CurveError> {
        if self.max_x <= self.min_x {
            return Err(CurveError::PointsOutOfOrder);
        }
        if self.max_y < self.min_y {
            return Err(CurveError::MonotonicDecreasing);
        }
        Ok(())
    }
}

// requires min_x < x < max_x
fn interpolate((min_x, min_y): (u64, u128), (max_x, max_y): (u64, u128), x: u64) -> u128 {
    let elapsed = u128::from(x - min_x);
    let span = u128::from(max_x - min_x);
    if max_y > min_y {
        min_y + scale(max_y - min_y, elapsed, span)
    } else {
        min_y - scale(min_y - max_y, elapsed, span)
    }
}

/// floor(delta * elapsed / span) for elapsed <= span < 2^64.
///
/// Splitting delta into quotient and remainder of span keeps every intermediate
/// product below 2^128, so the result never overflows.
fn scale(delta: u128, elapsed: u128, span: u128) -> u128 {
    let whole = delta / span;
    let rest = delta % span;
    whole * elapsed + rest * elapsed / span
}
