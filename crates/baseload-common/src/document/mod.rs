//! National tax-document validation
//!
//! Both Brazilian registry numbers carry two trailing check digits computed
//! from a weighted sum of the preceding digits modulo 11. The formats differ
//! only in length, weights, and the CPF's blacklist of repeated-digit values.

pub mod cnpj;
pub mod cpf;

const MODULUS: u32 = 11;
const DIGIT_LIMIT: u32 = 10;

/// Derives one check digit from a weighted digit sum.
///
/// A raw result of 10 or 11 wraps to zero; both registries define it that way.
fn check_digit(sum: u32) -> u32 {
    let digit = MODULUS - sum % MODULUS;
    if digit >= DIGIT_LIMIT {
        0
    } else {
        digit
    }
}

/// Decimal digit values of an all-ASCII-digit string.
fn digit_values(document: &str) -> Option<Vec<u32>> {
    document
        .bytes()
        .map(|b| {
            if b.is_ascii_digit() {
                Some(u32::from(b - b'0'))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit_wraps_to_zero() {
        // sum % 11 == 0 gives a raw digit of 11
        assert_eq!(check_digit(22), 0);
        // sum % 11 == 1 gives a raw digit of 10
        assert_eq!(check_digit(12), 0);
    }

    #[test]
    fn test_check_digit_plain() {
        assert_eq!(check_digit(13), 9);
        assert_eq!(check_digit(20), 2);
    }

    #[test]
    fn test_digit_values_rejects_non_digits() {
        assert_eq!(digit_values("042"), Some(vec![0, 4, 2]));
        assert_eq!(digit_values("04a"), None);
        assert_eq!(digit_values("0 2"), None);
    }
}
