//! Raw input tokens and the numeric gate every other module relies on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single raw cell supplied by the input provider.
///
/// Spreadsheet columns mix numbers, text and blanks, so tokens keep whatever the
/// provider handed over and are only interpreted when read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    /// A numeric cell.
    Number(f64),
    /// A text cell, possibly holding a number such as `"0.25"` or `"12 mm"`.
    Text(String),
    /// A blank cell.
    Missing,
}

impl Token {
    /// Interpret the token as a finite number.
    ///
    /// Text is read with leading-prefix semantics, see [`parse_leading_float`].
    ///
    /// # Examples
    /// ```
    /// use drawx::Token;
    ///
    /// assert_eq!(Token::from("12.5 mm").value(), Some(12.5));
    /// assert_eq!(Token::from("mm").value(), None);
    /// assert_eq!(Token::from(f64::NAN).value(), None);
    /// ```
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Token::Number(value) => *value,
            Token::Text(text) => parse_leading_float(text)?,
            Token::Missing => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        Token::Number(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::Text(value.to_owned())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::Text(value)
    }
}

impl<T: Into<Token>> From<Option<T>> for Token {
    fn from(value: Option<T>) -> Self {
        value.map_or(Token::Missing, Into::into)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{value}"),
            Token::Text(text) => write!(f, "{text:?}"),
            Token::Missing => f.write_str("<blank>"),
        }
    }
}

/// Return `true` when the token holds a finite number.
#[must_use]
pub fn is_valid_number(token: &Token) -> bool {
    token.value().is_some()
}

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped and trailing characters are ignored, so `"3.5kN"`
/// reads as `3.5`. An exponent is only consumed when digits follow it. Returns
/// `None` when no digits start the string.
///
/// # Examples
/// ```
/// use drawx::parse_leading_float;
///
/// assert_eq!(parse_leading_float("  -1.5e2x"), Some(-150.0));
/// assert_eq!(parse_leading_float("7e"), Some(7.0));
/// assert_eq!(parse_leading_float(".5"), Some(0.5));
/// assert_eq!(parse_leading_float("abc"), None);
/// ```
#[must_use]
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_end..]);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    text[..end].parse().ok()
}

/// Count the ASCII digits at the start of `bytes`.
fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_numeric_text_are_valid() {
        assert!(is_valid_number(&Token::from(1.25)));
        assert!(is_valid_number(&Token::from("1.25")));
        assert!(is_valid_number(&Token::from("  42")));
        assert!(is_valid_number(&Token::from("3.5kN")));
    }

    #[test]
    fn non_numeric_tokens_are_rejected() {
        assert!(!is_valid_number(&Token::from("bad")));
        assert!(!is_valid_number(&Token::from("")));
        assert!(!is_valid_number(&Token::from("-")));
        assert!(!is_valid_number(&Token::from(".")));
        assert!(!is_valid_number(&Token::Missing));
        assert!(!is_valid_number(&Token::from(f64::NAN)));
        assert!(!is_valid_number(&Token::from(f64::INFINITY)));
    }

    #[test]
    fn prefix_parsing_stops_at_first_foreign_character() {
        assert_eq!(parse_leading_float("0x10"), Some(0.0));
        assert_eq!(parse_leading_float("5."), Some(5.0));
        assert_eq!(parse_leading_float("1e+"), Some(1.0));
        assert_eq!(parse_leading_float("2E-3 s"), Some(0.002));
        assert_eq!(parse_leading_float("+4.0.1"), Some(4.0));
    }

    #[test]
    fn blank_cells_are_missing() {
        assert_eq!(Token::from(None::<f64>), Token::Missing);
        assert_eq!(Token::from(Some("2.5")), Token::from("2.5"));
    }

    #[test]
    fn overflowing_text_is_not_finite() {
        assert_eq!(Token::from("1e999").value(), None);
    }

    #[test]
    fn tokens_deserialize_from_mixed_json() {
        let tokens: Vec<Token> =
            serde_json::from_str(r#"[1.5, "2.5", null, "n/a"]"#).expect("valid json");
        assert_eq!(
            tokens,
            vec![
                Token::Number(1.5),
                Token::from("2.5"),
                Token::Missing,
                Token::from("n/a"),
            ]
        );
    }
}
