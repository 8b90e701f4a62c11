use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for four-digit calendar years
    /// - Valid: "2024", "0999", "1970"
    /// - Invalid: "24", "20245", "２０２４", "abcd"
    pub static ref YEAR_REGEX: Regex = Regex::new(r"^[0-9]{4}$").unwrap();

    /// Regex for zero-padded calendar months
    /// - Valid: "01", "09", "12"
    /// - Invalid: "1", "00", "13", "001"
    pub static ref MONTH_REGEX: Regex = Regex::new(r"^(0[1-9]|1[0-2])$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_regex_valid() {
        assert!(YEAR_REGEX.is_match("2024"));
        assert!(YEAR_REGEX.is_match("1970"));
        assert!(YEAR_REGEX.is_match("0999"));
    }

    #[test]
    fn test_year_regex_invalid() {
        assert!(!YEAR_REGEX.is_match("24"));
        assert!(!YEAR_REGEX.is_match("20245"));
        assert!(!YEAR_REGEX.is_match("abcd"));
        assert!(!YEAR_REGEX.is_match("２０２４")); // non-ascii digits
        assert!(!YEAR_REGEX.is_match(""));
        assert!(!YEAR_REGEX.is_match(" 2024"));
    }

    #[test]
    fn test_month_regex_valid() {
        for m in 1..=12 {
            assert!(MONTH_REGEX.is_match(&format!("{:02}", m)));
        }
    }

    #[test]
    fn test_month_regex_invalid() {
        assert!(!MONTH_REGEX.is_match("1")); // not zero padded
        assert!(!MONTH_REGEX.is_match("00"));
        assert!(!MONTH_REGEX.is_match("13"));
        assert!(!MONTH_REGEX.is_match("001"));
        assert!(!MONTH_REGEX.is_match("ab"));
    }
}
