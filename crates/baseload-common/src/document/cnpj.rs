//! CNPJ (business-entity registry) validation

use super::{check_digit, digit_values};

const CNPJ_LENGTH: usize = 14;

const FIRST_WEIGHT_TABLE: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHT_TABLE: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Checks whether a CNPJ is valid.
///
/// Expects the 14-digit normalized form. Wrong length or non-digit
/// characters yield `false`; this never errors.
pub fn validate(cnpj: &str) -> bool {
    if cnpj.len() != CNPJ_LENGTH {
        return false;
    }

    let Some(digits) = digit_values(cnpj) else {
        return false;
    };

    let sum = weighted_sum(&digits[..12], &FIRST_WEIGHT_TABLE);
    if check_digit(sum) != digits[12] {
        return false;
    }

    let sum = weighted_sum(&digits[..13], &SECOND_WEIGHT_TABLE);
    check_digit(sum) == digits[13]
}

fn weighted_sum(digits: &[u32], weights: &[u32]) -> u32 {
    digits
        .iter()
        .zip(weights)
        .map(|(digit, weight)| digit * weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cnpj() {
        assert!(validate("11444777000161"));
    }

    #[test]
    fn test_valid_cnpj_first_check_digit_zero() {
        // first-pass remainder wraps the raw digit past 9, clamping to 0
        assert!(validate("20775878000106"));
    }

    #[test]
    fn test_valid_cnpj_second_check_digit_zero() {
        assert!(validate("91057935000160"));
    }

    #[test]
    fn test_invalid_length() {
        assert!(!validate("1144477700016"));
        assert!(!validate("114447770001611"));
        assert!(!validate(""));
    }

    #[test]
    fn test_non_digit_characters() {
        assert!(!validate("1144477700016a"));
        assert!(!validate("11.444.777/0001-61"));
    }

    #[test]
    fn test_invalid_first_check_digit() {
        assert!(!validate("11444777000171"));
    }

    #[test]
    fn test_invalid_second_check_digit() {
        assert!(!validate("11444777000162"));
    }
}
