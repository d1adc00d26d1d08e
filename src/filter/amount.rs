//! Canonical amount text
//!
//! Amount-prefix search compares against the raw number, not a currency
//! rendering: the shortest decimal string that parses back to the same
//! value, without a trailing `.0` for integral amounts.

/// Canonical decimal text of an amount
///
/// `100.0 -> "100"`, `12.5 -> "12.5"`, `0.1 -> "0.1"`, `-0.0 -> "0"`.
pub fn canonical_amount(amount: f64) -> String {
    if amount == 0.0 {
        "0".to_string()
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_amounts_have_no_fraction() {
        assert_eq!(canonical_amount(100.0), "100");
        assert_eq!(canonical_amount(5.0), "5");
        assert_eq!(canonical_amount(-20.0), "-20");
    }

    #[test]
    fn test_fractional_amounts_round_trip() {
        assert_eq!(canonical_amount(12.5), "12.5");
        assert_eq!(canonical_amount(0.1), "0.1");
        assert_eq!(canonical_amount(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_zero() {
        assert_eq!(canonical_amount(0.0), "0");
        assert_eq!(canonical_amount(-0.0), "0");
    }
}
