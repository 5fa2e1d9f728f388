//! Numeric literals as written on cards.
//!
//! Besides the usual forms (`5`, `-0.5`, `.5`, `1e6`, `1.0E+05`) card
//! numbers may drop the exponent letter when the exponent is signed:
//! `1.5-3` is 1.5e-3 and `2+4` is 2e4. A `d`/`D` exponent letter is accepted
//! as well.

use crate::types::MAX_ID;

/// Parse a real number literal.
pub fn parse_real(token: &str) -> Option<f64> {
    let bytes = token.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &token[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        frac_part = &token[frac_start..pos];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent = String::new();
    if pos < bytes.len() {
        if matches!(bytes[pos], b'e' | b'E' | b'd' | b'D') {
            pos += 1;
            if pos < bytes.len() && matches!(bytes[pos], b'+' | b'-') {
                exponent.push(bytes[pos] as char);
                pos += 1;
            }
        } else if matches!(bytes[pos], b'+' | b'-') {
            exponent.push(bytes[pos] as char);
            pos += 1;
        } else {
            return None;
        }

        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start || pos != bytes.len() {
            return None;
        }
        exponent.push_str(&token[exp_start..pos]);
    }

    let normalized = format!(
        "{}{}.{}e{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
        if exponent.is_empty() { "0" } else { exponent.as_str() },
    );
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a non-negative integer written as plain decimal digits, no larger
/// than [`MAX_ID`].
pub fn parse_unsigned(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u32>().ok().filter(|&n| n <= MAX_ID)
}

/// Parse an entity id: a positive integer.
pub fn parse_id(token: &str) -> Option<u32> {
    parse_unsigned(token).filter(|&id| id > 0)
}

/// Whether a token reads as a number.
pub fn is_number(token: &str) -> bool {
    parse_real(token).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflowing_real_rejected() {
        assert_eq!(parse_real("1e400"), None);
        assert_eq!(parse_real("-2+999"), None);
        assert_eq!(parse_real("1e308"), Some(1e308));
    }

    #[test]
    fn test_id_range() {
        assert_eq!(parse_id("99999999"), Some(MAX_ID));
        assert_eq!(parse_id("100000000"), None);
        assert_eq!(parse_unsigned("4294967295"), None);
    }

    #[test]
    fn test_plain_forms() {
        assert_eq!(parse_real("5"), Some(5.0));
        assert_eq!(parse_real("-0.5"), Some(-0.5));
        assert_eq!(parse_real("+.25"), Some(0.25));
        assert_eq!(parse_real("3."), Some(3.0));
    }

    #[test]
    fn test_exponent_with_letter() {
        assert_eq!(parse_real("1e6"), Some(1e6));
        assert_eq!(parse_real("1.0E+05"), Some(1e5));
        assert_eq!(parse_real("2.5d-2"), Some(0.025));
        assert_eq!(parse_real("1.5e-5"), Some(1.5e-5));
    }

    #[test]
    fn test_exponent_without_letter() {
        assert_eq!(parse_real("1.5-3"), Some(1.5e-3));
        assert_eq!(parse_real("2+4"), Some(2e4));
        assert_eq!(parse_real("-6.02+23"), Some(-6.02e23));
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        let zero = parse_real("-0").unwrap();
        assert!(zero.is_sign_negative());
    }

    #[test]
    fn test_rejects_non_numbers() {
        for token in ["", ".", "-", "e5", "1e", "1.5-", "1x", "inf", "nan", "1.2.3", "1e5e"] {
            assert_eq!(parse_real(token), None, "{token}");
        }
    }

    #[test]
    fn test_ids() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("+1"), None);
        assert_eq!(parse_unsigned("0"), Some(0));
        assert_eq!(parse_id("99999999999"), None);
    }
}
