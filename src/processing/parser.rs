//! Input token classification.
//!
//! A token is a bare dotted-quad address, a CIDR range (address plus `/n`
//! with `n` in 0..=32) or invalid. Empty tokens are skipped by the caller.

use crate::error::SummarizeError;
use crate::models::Ipv4;
use regex::{Captures, Regex};
use std::net::Ipv4Addr;
use std::sync::OnceLock;

const OCTET: &str = "(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

static IP_REGEX: OnceLock<Regex> = OnceLock::new();
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_ip_regex() -> &'static Regex {
    IP_REGEX.get_or_init(|| {
        Regex::new(&format!(r"^{OCTET}\.{OCTET}\.{OCTET}\.{OCTET}$")).expect("Invalid Regex")
    })
}

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| {
        Regex::new(&format!(
            r"^{OCTET}\.{OCTET}\.{OCTET}\.{OCTET}/(3[0-2]|[12]?[0-9])$"
        ))
        .expect("Invalid Regex")
    })
}

/// A classified, non-empty input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single address, e.g. `192.168.1.9`.
    Address(Ipv4Addr),
    /// A range as written, e.g. `192.168.1.9/30` (base not cut to the network).
    Range(Ipv4),
}

/// Checks if a string is a valid IP address.
pub fn is_valid_ip(line: &str) -> bool {
    get_ip_regex().is_match(line)
}

/// Checks if a string is a valid CIDR range.
pub fn is_valid_cidr_range(line: &str) -> bool {
    get_cidr_regex().is_match(line)
}

fn octets(caps: &Captures) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = caps.get(i + 1)?.as_str().parse().ok()?;
    }
    Some(Ipv4Addr::from(octets))
}

/// Classify a token. Surrounding whitespace is ignored; `Ok(None)` means the
/// token was blank.
pub fn classify(token: &str) -> Result<Option<Token>, SummarizeError> {
    let entry = token.trim();
    if entry.is_empty() {
        return Ok(None);
    }
    let invalid = || {
        log::warn!("Rejecting entry '{entry}'");
        SummarizeError::InvalidAddressFormat(entry.to_string())
    };

    if let Some(caps) = get_cidr_regex().captures(entry) {
        let addr = octets(&caps).ok_or_else(invalid)?;
        let mask: u8 = caps
            .get(5)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(invalid)?;
        return Ok(Some(Token::Range(Ipv4 { addr, mask })));
    }
    if let Some(caps) = get_ip_regex().captures(entry) {
        let addr = octets(&caps).ok_or_else(invalid)?;
        return Ok(Some(Token::Address(addr)));
    }
    Err(invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ip() {
        assert!(is_valid_ip("192.168.1.9"));
        assert!(is_valid_ip("0.0.0.0"));
        assert!(is_valid_ip("255.255.255.255"));
        assert!(is_valid_ip("010.001.0.1"));
        assert!(!is_valid_ip("256.1.1.1"));
        assert!(!is_valid_ip("1.1.1"));
        assert!(!is_valid_ip("1.1.1.1.1"));
        assert!(!is_valid_ip("1.1.1.1/24"));
        assert!(!is_valid_ip("a.b.c.d"));
        assert!(!is_valid_ip(""));
    }

    #[test]
    fn test_is_valid_cidr_range() {
        assert!(is_valid_cidr_range("10.0.0.0/8"));
        assert!(is_valid_cidr_range("10.0.0.0/0"));
        assert!(is_valid_cidr_range("10.0.0.1/32"));
        assert!(!is_valid_cidr_range("10.0.0.1/33"));
        assert!(!is_valid_cidr_range("10.0.0.1/"));
        assert!(!is_valid_cidr_range("10.0.0.1"));
        assert!(!is_valid_cidr_range("10.0.0.256/24"));
    }

    #[test]
    fn test_classify_address() {
        assert_eq!(
            classify(" 192.168.1.9 ").unwrap(),
            Some(Token::Address(Ipv4Addr::new(192, 168, 1, 9)))
        );
        assert_eq!(
            classify("010.0.0.7").unwrap(),
            Some(Token::Address(Ipv4Addr::new(10, 0, 0, 7)))
        );
    }

    #[test]
    fn test_classify_range_keeps_base() {
        assert_eq!(
            classify("192.168.1.9/30").unwrap(),
            Some(Token::Range(Ipv4 {
                addr: Ipv4Addr::new(192, 168, 1, 9),
                mask: 30
            }))
        );
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify("").unwrap(), None);
        assert_eq!(classify("   \t").unwrap(), None);
    }

    #[test]
    fn test_classify_invalid() {
        for bad in ["10.0.0.1/33", "host.example", "1.2.3", "1.2.3.4/", "300.1.1.1/24"] {
            assert_eq!(
                classify(bad).unwrap_err(),
                SummarizeError::InvalidAddressFormat(bad.to_string()),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_ranges_read_back_as_ipv4() {
        for text in ["010.0.0.0/8", "192.168.001.009/30", "0.0.0.0/0", "10.0.0.1/32"] {
            let Some(Token::Range(block)) = classify(text).unwrap() else {
                panic!("{text} should be a range");
            };
            assert_eq!(Ipv4::new(text).unwrap(), block, "{text}");
        }
    }
}
