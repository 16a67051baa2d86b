//! CPF (individual taxpayer registry) validation

use super::{check_digit, digit_values};

const CPF_LENGTH: usize = 11;
const FIRST_WEIGHT_START: u32 = 10;
const SECOND_WEIGHT_START: u32 = 11;

/// CPFs with all digits repeated pass the check-digit arithmetic but are
/// invalid by construction.
const REPEATED_DIGIT_CPFS: [&str; 10] = [
    "00000000000",
    "11111111111",
    "22222222222",
    "33333333333",
    "44444444444",
    "55555555555",
    "66666666666",
    "77777777777",
    "88888888888",
    "99999999999",
];

/// Checks whether a CPF is valid.
///
/// Expects the 11-digit normalized form. Wrong length, non-digit characters,
/// and the repeated-digit blacklist all yield `false`; this never errors.
pub fn validate(cpf: &str) -> bool {
    if cpf.len() != CPF_LENGTH || REPEATED_DIGIT_CPFS.contains(&cpf) {
        return false;
    }

    let Some(digits) = digit_values(cpf) else {
        return false;
    };

    let sum = weighted_sum(&digits[..9], FIRST_WEIGHT_START);
    if check_digit(sum) != digits[9] {
        return false;
    }

    let sum = weighted_sum(&digits[..10], SECOND_WEIGHT_START);
    check_digit(sum) == digits[10]
}

fn weighted_sum(digits: &[u32], weight_start: u32) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, digit)| digit * (weight_start - i as u32))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf() {
        assert!(validate("37078130022"));
    }

    #[test]
    fn test_valid_cpf_first_check_digit_zero() {
        // first-pass remainder wraps the raw digit past 9, clamping to 0
        assert!(validate("05504106001"));
    }

    #[test]
    fn test_valid_cpf_second_check_digit_zero() {
        assert!(validate("15976239030"));
    }

    #[test]
    fn test_repeated_digit_cpfs_rejected() {
        for cpf in REPEATED_DIGIT_CPFS {
            assert!(!validate(cpf), "{cpf} should be invalid");
        }
    }

    #[test]
    fn test_invalid_length() {
        assert!(!validate("3707813002"));
        assert!(!validate("370781300221"));
        assert!(!validate(""));
    }

    #[test]
    fn test_non_digit_characters() {
        assert!(!validate("3707813002a"));
        assert!(!validate("370.781.300-22"));
    }

    #[test]
    fn test_invalid_first_check_digit() {
        assert!(!validate("37078130012"));
    }

    #[test]
    fn test_invalid_second_check_digit() {
        assert!(!validate("37078130021"));
    }
}
