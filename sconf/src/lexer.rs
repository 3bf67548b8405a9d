//! Classification of scanned token text.
//!
//! The parser decides where a token ends; the functions here decide what the
//! captured text means.
use logos::Logos;

use crate::value::Value;

/// Bare words that stand for something other than a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos)]
pub(crate) enum Keyword {
    #[token("true")]
    #[token("yes")]
    True,
    #[token("false")]
    #[token("no")]
    False,
    #[token("nil")]
    Nil,
}

impl Keyword {
    /// Returns the keyword spelled by the whole of `text`, if any.
    pub fn classify(text: &str) -> Option<Self> {
        let mut lexer = Keyword::lexer(text);
        match [lexer.next(), lexer.next()] {
            [Some(Ok(keyword)), None] => Some(keyword),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Keyword::True => Value::Bool(true),
            Keyword::False => Value::Bool(false),
            Keyword::Nil => Value::Nil,
        }
    }
}

/// Turn the text captured by the number scanner into a value.
///
/// The scanner is permissive, so `text` need not be a well formed number.
/// Conversion reads the longest numeric prefix, in the manner of C's `strtod`:
/// `12abc` is 12 and text without a numeric prefix is 0. `0x` introduces a
/// base-16 integer. When the scanner saw no `.` the result is truncated to an
/// `i32`, saturating at its bounds.
pub(crate) fn number_value(text: &[u8], floating: bool) -> Value {
    let number = numeric_prefix(text);
    if floating {
        Value::new_double(number)
    } else {
        Value::Int(number as i32)
    }
}

fn numeric_prefix(text: &[u8]) -> f64 {
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };

    let magnitude = hex_prefix(digits).unwrap_or_else(|| decimal_prefix(digits));
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn hex_prefix(text: &[u8]) -> Option<f64> {
    let rest = match text {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => return None,
    };

    let mut value = None;
    for byte in rest {
        let Some(digit) = (*byte as char).to_digit(16) else {
            break;
        };
        value = Some(value.unwrap_or(0.0) * 16.0 + f64::from(digit));
    }
    value
}

fn decimal_prefix(text: &[u8]) -> f64 {
    let count_digits = |from: usize| {
        text[from..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = count_digits(0);
    let mut mantissa_digits = end;
    if text.get(end) == Some(&b'.') {
        let fraction = count_digits(end + 1);
        mantissa_digits += fraction;
        end += 1 + fraction;
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if let Some(b'e' | b'E') = text.get(end) {
        let sign = usize::from(matches!(text.get(end + 1), Some(b'+' | b'-')));
        let exponent = count_digits(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    std::str::from_utf8(&text[..end])
        .ok()
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or(0.0)
}
