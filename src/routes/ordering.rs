// Ordering rules for route columns: numeric IPv4 order and interface collation

use std::cmp::Ordering;

/// Fold a dotted-decimal IPv4 string into its 32-bit ordinal.
///
/// Returns `None` unless the input is exactly four decimal octets in 0-255.
pub fn to_ordinal(ip: &str) -> Option<u32> {
    let mut octets = 0;
    let mut acc: u32 = 0;

    for part in ip.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let octet: u8 = part.parse().ok()?;
        octets += 1;
        if octets > 4 {
            return None;
        }
        acc = acc * 256 + u32::from(octet);
    }

    (octets == 4).then_some(acc)
}

/// Compare two dotted-decimal addresses by numeric value.
///
/// Strings without an ordinal sort after every valid address and compare
/// among themselves by raw text, so the order stays total.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (to_ordinal(a), to_ordinal(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Drop a trailing `/mask` suffix, keeping the bare address.
pub fn strip_mask(ip_with_mask: &str) -> &str {
    ip_with_mask
        .split_once('/')
        .map_or(ip_with_mask, |(ip, _)| ip)
}

/// Case-insensitive collation for interface names.
///
/// Ties on the folded text are broken at the first position where case
/// differs, lowercase first, then by raw text.
pub fn compare_interfaces(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| compare_case(a, b))
        .then_with(|| a.cmp(b))
}

fn compare_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 9] = [
        "0.0.0.0",
        "1.1.1.1",
        "9.255.255.255",
        "10.0.0.1",
        "192.168.1.0",
        "255.255.255.255",
        "not-an-ip",
        "1.2.3",
        "abc",
    ];

    #[test]
    fn test_to_ordinal_bounds() {
        assert_eq!(to_ordinal("0.0.0.0"), Some(0));
        assert_eq!(to_ordinal("255.255.255.255"), Some(4294967295));
        assert_eq!(to_ordinal("192.168.1.10"), Some(0xC0A8010A));
    }

    #[test]
    fn test_to_ordinal_rejects_malformed() {
        assert_eq!(to_ordinal("10.0.0"), None);
        assert_eq!(to_ordinal("10.0.0.0.1"), None);
        assert_eq!(to_ordinal("10.0.0.256"), None);
        assert_eq!(to_ordinal("10.0.x.1"), None);
        assert_eq!(to_ordinal("10..0.1"), None);
        assert_eq!(to_ordinal("+1.0.0.1"), None);
        assert_eq!(to_ordinal(""), None);
    }

    #[test]
    fn test_compare_is_numeric_not_lexicographic() {
        // "9..." > "10..." as text
        assert_eq!(compare("9.255.255.255", "10.0.0.1"), Ordering::Less);
        assert_eq!(compare("10.0.0.2", "10.0.0.10"), Ordering::Less);
    }

    #[test]
    fn test_compare_antisymmetric_and_reflexive() {
        for a in SAMPLES {
            assert_eq!(compare(a, a), Ordering::Equal);
            for b in SAMPLES {
                assert_eq!(compare(a, b), compare(b, a).reverse(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_malformed_sorts_last() {
        assert_eq!(compare("not-an-ip", "255.255.255.255"), Ordering::Greater);
        assert_eq!(compare("0.0.0.0", "1.2.3"), Ordering::Less);
        assert_eq!(compare("abc", "abd"), Ordering::Less);
    }

    #[test]
    fn test_strip_mask() {
        assert_eq!(strip_mask("192.168.1.0/24"), "192.168.1.0");
        assert_eq!(strip_mask("10.0.0.1"), "10.0.0.1");
        assert_eq!(strip_mask("10.0.0.0/8/extra"), "10.0.0.0");
    }

    #[test]
    fn test_interface_collation() {
        let mut names = vec!["eth1", "Eth0", "eth10"];
        names.sort_by(|a, b| compare_interfaces(a, b));
        assert_eq!(names, vec!["Eth0", "eth1", "eth10"]);
    }

    #[test]
    fn test_interface_case_tie_break() {
        assert_eq!(compare_interfaces("eth0", "Eth0"), Ordering::Less);
        assert_eq!(compare_interfaces("Eth0", "eth0"), Ordering::Greater);
        assert_eq!(compare_interfaces("wlan0", "wlan0"), Ordering::Equal);
        assert_eq!(compare_interfaces("LO", "eth0"), Ordering::Greater);
    }
}
