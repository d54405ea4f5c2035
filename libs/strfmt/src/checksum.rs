//! Check-digit formats: ISBN-10, ISBN-13, Luhn credit card numbers and US
//! social security numbers.

use std::sync::LazyLock;

use regex::Regex;

static SSN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{3})[- ]?([0-9]{2})[- ]?([0-9]{4})$").expect("valid SSN pattern")
});

fn strip_separators(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '-' | ' ')).collect()
}

/// ISBN-10 with its weighted mod-11 check. Hyphens and spaces are ignored.
pub fn is_isbn10(s: &str) -> bool {
    let digits = strip_separators(s);
    if digits.len() != 10 {
        return false;
    }

    let mut sum = 0u32;
    for (i, c) in digits.chars().enumerate() {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'X' | 'x' if i == 9 => 10,
            _ => return false,
        };
        sum += (i as u32 + 1) * value;
    }
    sum % 11 == 0
}

/// ISBN-13 with alternating 1,3 weights. Hyphens and spaces are ignored.
pub fn is_isbn13(s: &str) -> bool {
    let digits = strip_separators(s);
    if digits.len() != 13 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 0 {
                d
            } else {
                3 * d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Either an ISBN-10 or an ISBN-13.
pub fn is_isbn(s: &str) -> bool {
    is_isbn10(s) || is_isbn13(s)
}

/// Payment card number: 12 to 19 digits, separators allowed, Luhn checked.
pub fn is_credit_card(s: &str) -> bool {
    let digits = strip_separators(s);
    (12..=19).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
        && luhn(&digits)
}

/// Luhn mod-10 check over a string of ASCII digits.
pub fn luhn(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in digits.bytes().rev().enumerate() {
        if !b.is_ascii_digit() {
            return false;
        }
        let mut d = u32::from(b - b'0');
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    !digits.is_empty() && sum % 10 == 0
}

/// US social security number `AAA-GG-SSSS`.
///
/// Areas `000`, `666` and `900`-`999`, group `00` and serial `0000` are never
/// issued and are rejected.
pub fn is_ssn(s: &str) -> bool {
    let Some(caps) = SSN.captures(s) else {
        return false;
    };
    let area = &caps[1];
    let group = &caps[2];
    let serial = &caps[3];

    area != "000" && area != "666" && !area.starts_with('9') && group != "00" && serial != "0000"
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("0321751043", true)]
    #[case("0-321-75104-3", true)]
    #[case("080442957X", true)]
    #[case("080442957x", true)]
    #[case("836217463", false)]
    #[case("0321751044", false)]
    #[case("X321751043", false)]
    fn test_isbn10(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_isbn10(input), valid);
    }

    #[rstest]
    #[case("978-0321751041", true)]
    #[case("978 0321751041", true)]
    #[case("9780321751041", true)]
    #[case("978-0321751042", false)]
    #[case("978032175104", false)]
    fn test_isbn13(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_isbn13(input), valid);
    }

    #[test]
    fn test_isbn_either() {
        assert!(is_isbn("0321751043"));
        assert!(is_isbn("978-0321751041"));
        assert!(!is_isbn("836217463"));
    }

    #[rstest]
    #[case("4111-1111-1111-1111", true)]
    #[case("4012-8888-8888-1881", true)]
    #[case("4111 1111 1111 1111", true)]
    #[case("9999-9999-9999-999", false)]
    #[case("4111-1111-1111-1112", false)]
    #[case("4111-1111-1111-111a", false)]
    #[case("0", false)]
    fn test_credit_card(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_credit_card(input), valid);
    }

    #[rstest]
    #[case("111-11-1111", true)]
    #[case("111 11 1111", true)]
    #[case("111111111", true)]
    #[case("999 99 999", false)]
    #[case("000-11-1111", false)]
    #[case("666-11-1111", false)]
    #[case("900-11-1111", false)]
    #[case("999-99-9999", false)]
    #[case("111-00-1111", false)]
    #[case("111-11-0000", false)]
    #[case("1111-11-111", false)]
    fn test_ssn(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_ssn(input), valid);
    }

    proptest! {
        #[test]
        fn prop_isbn10_single_digit_change_breaks_checksum(pos in 0usize..10, delta in 1u8..10) {
            let mut bytes = b"0321751043".to_vec();
            bytes[pos] = b'0' + (bytes[pos] - b'0' + delta) % 10;
            let mutated = String::from_utf8(bytes).unwrap();
            prop_assert!(!is_isbn10(&mutated));
        }

        #[test]
        fn prop_luhn_single_digit_change_breaks_checksum(pos in 0usize..16, delta in 1u8..10) {
            let mut bytes = b"4111111111111111".to_vec();
            bytes[pos] = b'0' + (bytes[pos] - b'0' + delta) % 10;
            let mutated = String::from_utf8(bytes).unwrap();
            prop_assert!(!luhn(&mutated));
        }
    }
}
