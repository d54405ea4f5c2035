//! Network address formats: IPv4, IPv6, CIDR and MAC.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Dotted-quad IPv4 address.
pub fn is_ipv4(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

/// RFC 4291 IPv6 address, including embedded IPv4 forms.
pub fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

/// An address followed by `/` and a prefix length bounded by its family.
pub fn is_cidr(s: &str) -> bool {
    let Some((addr, prefix)) = s.split_once('/') else {
        return false;
    };
    let Ok(addr) = addr.parse::<IpAddr>() else {
        return false;
    };

    if prefix.is_empty()
        || !prefix.bytes().all(|b| b.is_ascii_digit())
        || (prefix.len() > 1 && prefix.starts_with('0'))
    {
        return false;
    }
    let max = if addr.is_ipv4() { 32 } else { 128 };
    prefix.parse::<u8>().is_ok_and(|p| p <= max)
}

/// IEEE 802 MAC-48, EUI-64 or 20-octet InfiniBand address.
///
/// Accepts groups of two hex digits separated by `:` or `-`, or groups of four
/// separated by `.`.
pub fn is_mac(s: &str) -> bool {
    let (separator, group_len, group_counts): (char, usize, [usize; 3]) =
        if s.contains(':') {
            (':', 2, [6, 8, 20])
        } else if s.contains('-') {
            ('-', 2, [6, 8, 20])
        } else {
            ('.', 4, [3, 4, 10])
        };

    let groups: Vec<&str> = s.split(separator).collect();
    group_counts.contains(&groups.len())
        && groups
            .iter()
            .all(|g| g.len() == group_len && g.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("192.168.254.1", true)]
    #[case("0.0.0.0", true)]
    #[case("198.168.254.2.2", false)]
    #[case("256.1.1.1", false)]
    #[case("::1", false)]
    fn test_ipv4(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_ipv4(input), valid);
    }

    #[rstest]
    #[case("::1", true)]
    #[case("2001:db8::7", true)]
    #[case("::ffff:192.0.2.1", true)]
    #[case("127.0.0.1", false)]
    #[case("1::1::1", false)]
    fn test_ipv6(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_ipv6(input), valid);
    }

    #[rstest]
    #[case("192.168.254.1/24", true)]
    #[case("192.0.2.1/24", true)]
    #[case("2001:db8:a0b:12f0::1/32", true)]
    #[case("10.0.0.0/0", true)]
    #[case("::/128", true)]
    #[case("198.168.254.2", false)]
    #[case("2001:db8:a0b:12f0::1", false)]
    #[case("10.0.0.0/33", false)]
    #[case("::/129", false)]
    #[case("10.0.0.0/08", false)]
    #[case("10.0.0.0/+8", false)]
    #[case("10.0.0.0/", false)]
    fn test_cidr(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_cidr(input), valid);
    }

    #[rstest]
    #[case("01:02:03:04:05:06", true)]
    #[case("01-02-03-04-05-06", true)]
    #[case("0102.0304.0506", true)]
    #[case("01:02:03:04:05:06:07:08", true)]
    #[case("00:00:00:00:fe:80:00:00:00:00:00:00:02:00:5e:10:00:00:00:01", true)]
    #[case("01:02:03:04:05", false)]
    #[case("01:02-03:04:05:06", false)]
    #[case("01:02:03:04:05:0g", false)]
    #[case("", false)]
    fn test_mac(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_mac(input), valid);
    }
}
