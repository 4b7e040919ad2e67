//! GTIN validation
//!
//! Classifies a candidate identifier and verifies its check digit.

use crate::records::Gtin;

/// Validates a raw identifier and names its kind.
pub trait GtinValidator: Sync {
    fn validate(&self, candidate: &str) -> Option<Gtin>;
}

/// Check-digit validator for GTIN-8/12/13/14, ISBN-10/13, ISSN and ISMN.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecksumGtin;

impl GtinValidator for ChecksumGtin {
    fn validate(&self, candidate: &str) -> Option<Gtin> {
        let value: String = candidate
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        let kind = if value.len() == 10 {
            valid_isbn10(&value).then_some("isbn10")?
        } else {
            if !value.bytes().all(|b| b.is_ascii_digit()) || !valid_gs1_check_digit(&value) {
                return None;
            }
            match value.len() {
                8 => "gtin8",
                12 => "upc",
                13 if value.starts_with("9790") => "ismn",
                13 if value.starts_with("978") || value.starts_with("979") => "isbn13",
                13 if value.starts_with("977") => "issn",
                13 => "gtin13",
                14 => "gtin14",
                _ => return None,
            }
        };

        Some(Gtin {
            kind: kind.to_string(),
            value,
        })
    }
}

fn valid_gs1_check_digit(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 { d * 3 } else { d }
        })
        .sum();
    sum % 10 == 0
}

fn valid_isbn10(value: &str) -> bool {
    let mut sum = 0;
    for (i, c) in value.chars().enumerate() {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'X' | 'x' if i == 9 => 10,
            _ => return false,
        };
        sum += digit * (10 - i as u32);
    }
    sum % 11 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("4006381333931", Some("gtin13"))]
    #[case("400-6381 333931", Some("gtin13"))]
    #[case("9780306406157", Some("isbn13"))]
    #[case("036000291452", Some("upc"))]
    #[case("96385074", Some("gtin8"))]
    #[case("0306406152", Some("isbn10"))]
    #[case("4006381333932", None)]
    #[case("40063813339a1", None)]
    #[case("12345", None)]
    #[case("", None)]
    fn test_validate(#[case] candidate: &str, #[case] kind: Option<&str>) {
        let gtin = ChecksumGtin.validate(candidate);
        assert_eq!(gtin.as_ref().map(|g| g.kind.as_str()), kind);
    }

    #[test]
    fn test_value_is_cleaned() {
        let gtin = ChecksumGtin.validate(" 4006381-333931 ").unwrap();
        assert_eq!(gtin.value, "4006381333931");
    }
}
