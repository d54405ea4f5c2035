//! Hostname validation, including internationalized names.
//!
//! A hostname is one of:
//! - a bracketed IPv6 literal without a zone, e.g. `[2001:db8::1]`
//! - an IPv4 literal in any of the dotted forms a URL host accepts (decimal,
//!   octal with a leading `0`, hex with `0x`, two to four parts)
//! - a sequence of dot-separated labels, each made of ASCII letters, digits,
//!   hyphens or Unicode characters, optionally punycode encoded as `xn--...`
//!
//! A single trailing dot is allowed. A name whose last label looks like a
//! number must be a valid IPv4 literal.

use std::net::Ipv6Addr;

const MAX_NAME_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// Returns true if `s` is a valid hostname.
pub fn is_hostname(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    if let Some(inner) = s.strip_prefix('[') {
        return inner
            .strip_suffix(']')
            .is_some_and(|addr| !addr.contains('%') && addr.parse::<Ipv6Addr>().is_ok());
    }

    let name = s.strip_suffix('.').unwrap_or(s);
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }

    let labels: Vec<&str> = name.split('.').collect();
    let last = labels[labels.len() - 1];

    if ends_in_number(last) {
        return parse_ipv4_literal(&labels).is_some();
    }

    if !labels.iter().all(|label| is_label(label)) {
        return false;
    }

    // top-level domains are at least two characters long
    labels.len() == 1 || last.chars().count() >= 2
}

fn ends_in_number(last: &str) -> bool {
    (!last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()))
        || parse_ipv4_number(last).is_some()
}

/// Parses a dotted IPv4 literal of two to four parts into its address value.
pub(crate) fn parse_ipv4_literal(parts: &[&str]) -> Option<u32> {
    if !(2..=4).contains(&parts.len()) {
        return None;
    }

    let numbers = parts
        .iter()
        .map(|part| parse_ipv4_number(part))
        .collect::<Option<Vec<u64>>>()?;

    let (last, leading) = numbers.split_last()?;
    if leading.iter().any(|&n| n > 255) {
        return None;
    }
    let last_bits = 8 * (5 - numbers.len() as u32);
    if *last >= 1u64 << last_bits {
        return None;
    }

    let mut address = *last;
    for (i, &n) in leading.iter().enumerate() {
        address += n << (8 * (3 - i as u32));
    }
    u32::try_from(address).ok()
}

fn parse_ipv4_number(part: &str) -> Option<u64> {
    if part.is_empty() {
        return None;
    }

    let (digits, radix, max_len) = if let Some(hex) =
        part.strip_prefix("0x").or_else(|| part.strip_prefix("0X"))
    {
        (hex, 16, 8)
    } else if part.len() > 1 && part.starts_with('0') {
        (&part[1..], 8, 11)
    } else {
        (part, 10, 10)
    };

    if digits.is_empty() {
        return Some(0);
    }
    if digits.len() > max_len || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

fn is_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }

    let is_puny = label
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xn--"));
    if is_puny {
        return match decode_punycode(&label[4..]) {
            Some(decoded) => {
                !decoded.is_ascii() && decoded.chars().all(is_label_char)
            }
            None => false,
        };
    }

    label.chars().all(is_label_char)
}

fn is_label_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '-';
    }
    !(c.is_control() || c.is_whitespace() || is_private_use(c) || is_specials(c))
}

fn is_private_use(c: char) -> bool {
    matches!(c as u32, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD)
}

fn is_specials(c: char) -> bool {
    matches!(c as u32, 0xFFF0..=0xFFFF)
}

/// Decodes the part of a punycode label following the `xn--` prefix.
pub fn decode_punycode(input: &str) -> Option<String> {
    if !input.is_ascii() {
        return None;
    }
    idna::punycode::decode_to_string(input)
}
