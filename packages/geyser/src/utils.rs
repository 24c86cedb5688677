pub const MAX_BPS: i64 = 10_000;

/// Returns `Err($err)` from the enclosing function if any argument is not strictly positive.
#[macro_export]
macro_rules! ensure_positive {
    ($err:expr, $($arg:expr),+ $(,)?) => {
        $(
            if $arg <= 0 {
                return Err($err);
            }
        )+
    };
}

pub fn is_valid_bps(value: i64) -> bool {
    (0..=MAX_BPS).contains(&value)
}
