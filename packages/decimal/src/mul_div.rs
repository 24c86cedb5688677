use soroban_sdk::{Env, U256};

/// floor(a * b / denominator) computed on 256-bit host integers.
///
/// Returns `None` for a zero denominator or when the quotient does not fit in `u128`.
pub fn mul_div_floor(env: &Env, a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    product.div(&U256::from_u128(env, denominator)).to_u128()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values() {
        let env = Env::default();
        assert_eq!(mul_div_floor(&env, 1000, 50, 100), Some(500));
        assert_eq!(mul_div_floor(&env, 10, 1, 3), Some(3));
        assert_eq!(mul_div_floor(&env, 0, 7, 3), Some(0));
    }

    #[test]
    fn wide_intermediate_product() {
        let env = Env::default();
        assert_eq!(
            mul_div_floor(&env, u128::MAX, u128::MAX, u128::MAX),
            Some(u128::MAX)
        );
        assert_eq!(
            mul_div_floor(&env, u128::MAX, 3, 4),
            Some(u128::MAX / 4 * 3 + 2)
        );
    }

    #[test]
    fn zero_denominator_or_overflowing_quotient() {
        let env = Env::default();
        assert_eq!(mul_div_floor(&env, 1, 1, 0), None);
        assert_eq!(mul_div_floor(&env, u128::MAX, 2, 1), None);
    }
}
