//! Parse values from s-expression text.
//!
//! The parser is a recursive-descent scanner over raw bytes. It reads exactly
//! one value per call to [`Parser::parse_value`] and leaves whatever follows
//! untouched. A NUL byte is treated as the end of the input.
use std::io::Read;
use std::ops::Range;

use delegate::delegate;

use crate::buffer::TokenBuffer;
use crate::error::{track, Result};
use crate::lexer::{number_value, Keyword};
use crate::list::List;
use crate::value::Value;

/// Longest run of bytes captured for a single number or symbol token.
pub const MAX_TOKEN_LEN: usize = 127;

/// Default limit on how deeply lists may nest.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Span of bytes within the input.
pub type Span = Range<usize>;

/// A syntax error in the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    Eof(Span),
    #[error("unexpected )")]
    UnexpectedClose(Span),
    #[error("lists nested deeper than {max_depth} levels")]
    DepthLimit { max_depth: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Eof(span) => span.clone(),
            ParseError::UnexpectedClose(span) => span.clone(),
            ParseError::DepthLimit { span, .. } => span.clone(),
        }
    }
}

/// Settings that control the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of lists that may be open at once.
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Matches the C locale's `isspace`.
#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// A position in the input.
#[derive(Debug, Clone)]
struct Scanner<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        match self.input.get(self.offset) {
            None | Some(0) => None,
            Some(byte) => Some(*byte),
        }
    }

    #[inline]
    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;
        Some(byte)
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    /// Skip whitespace and `;` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(byte) if is_space(byte) => self.offset += 1,
                Some(b';') => {
                    while let Some(byte) = self.bump() {
                        if byte == b'\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }
}

/// A parser stepping through some input.
#[derive(Debug)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    buffer: TokenBuffer,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a [u8], options: ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(input),
            buffer: TokenBuffer::new(),
            options,
            depth: 0,
        }
    }

    delegate! {
        to self.scanner {
            pub fn offset(&self) -> usize;
            fn peek(&self) -> Option<u8>;
            fn bump(&mut self) -> Option<u8>;
            fn skip_trivia(&mut self);
        }
    }

    /// Whether only whitespace and comments remain.
    pub fn is_at_end(&mut self) -> bool {
        self.skip_trivia();
        self.peek().is_none()
    }

    /// Parse the next value.
    ///
    /// On failure nothing built so far escapes; the error says where the
    /// offending construct started.
    pub fn parse_value(&mut self) -> Result<Value> {
        self.skip_trivia();
        let start = self.offset();

        match self.peek() {
            None => Err(ParseError::Eof(start..start).into()),
            Some(b'(') => {
                self.bump();
                self.list(start)
            }
            Some(b')') => Err(ParseError::UnexpectedClose(start..start + 1).into()),
            Some(b'"') => {
                self.bump();
                self.string(start)
            }
            Some(b'\\') => {
                self.bump();
                self.char_literal(start)
            }
            Some(byte) if byte.is_ascii_digit() || byte == b'-' => self.number(),
            Some(_) => self.symbol(),
        }
    }

    fn list(&mut self, start: usize) -> Result<Value> {
        if self.depth >= self.options.max_depth {
            tracing::trace!(max_depth = self.options.max_depth, start, "nesting limit hit");
            return Err(ParseError::DepthLimit {
                max_depth: self.options.max_depth,
                span: start..self.offset(),
            }
            .into());
        }

        self.depth += 1;
        let result = self.list_items(start);
        self.depth -= 1;
        result
    }

    fn list_items(&mut self, start: usize) -> Result<Value> {
        let mut list = List::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(b')') => {
                    self.bump();
                    return Ok(Value::List(list));
                }
                None => return Err(ParseError::Eof(start..self.offset()).into()),
                Some(_) => {
                    let item = self.parse_value()?;
                    list.push(item)?;
                }
            }
        }
    }

    fn string(&mut self, start: usize) -> Result<Value> {
        self.buffer.reset();
        loop {
            let Some(byte) = self.bump() else {
                return Err(ParseError::Eof(start..self.offset()).into());
            };

            match byte {
                b'"' => return Ok(Value::String(self.buffer.to_text()?)),
                b'\\' => {
                    let Some(escaped) = self.bump() else {
                        return Err(ParseError::Eof(start..self.offset()).into());
                    };
                    match escaped {
                        b'n' => self.buffer.push(b'\n')?,
                        b'r' => self.buffer.push(b'\r')?,
                        b'"' => self.buffer.push(b'"')?,
                        other => {
                            self.buffer.push(b'\\')?;
                            self.buffer.push(other)?;
                        }
                    }
                }
                other => self.buffer.push(other)?,
            }
        }
    }

    fn char_literal(&mut self, start: usize) -> Result<Value> {
        match self.bump() {
            Some(byte) => Ok(Value::Char(byte)),
            None => Err(ParseError::Eof(start..self.offset()).into()),
        }
    }

    fn number(&mut self) -> Result<Value> {
        self.buffer.reset();
        let mut floating = false;

        while let Some(byte) = self.peek() {
            let accepted = byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'.';
            if !accepted || self.buffer.len() == MAX_TOKEN_LEN {
                break;
            }
            floating |= byte == b'.';
            self.bump();
            self.buffer.push(byte)?;
        }

        Ok(number_value(self.buffer.as_bytes(), floating))
    }

    fn symbol(&mut self) -> Result<Value> {
        self.buffer.reset();

        while let Some(byte) = self.peek() {
            if is_space(byte) || byte == b'(' || byte == b')' {
                break;
            }
            if self.buffer.len() == MAX_TOKEN_LEN {
                break;
            }
            self.bump();
            self.buffer.push(byte)?;
        }

        let text = String::from_utf8_lossy(self.buffer.as_bytes());
        match Keyword::classify(&text) {
            Some(keyword) => Ok(keyword.into_value()),
            None => Ok(Value::new_symbol(&text)),
        }
    }
}

fn parse_one(input: &[u8], options: ParseOptions) -> Result<Value> {
    let result = Parser::with_options(input, options).parse_value();
    if let Err(err) = &result {
        tracing::debug!(error = %err, "failed to parse s-expression");
    }
    track(result)
}

/// Parse one value from the start of `text`.
pub fn parse(text: &str) -> Result<Value> {
    parse_one(text.as_bytes(), ParseOptions::default())
}

/// Parse one value from the start of `text` with the given options.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Value> {
    parse_one(text.as_bytes(), options)
}

/// Parse one value from the first `len` bytes of `bytes`.
///
/// A `len` beyond the end of `bytes` is clamped.
pub fn parse_with_length(bytes: &[u8], len: usize) -> Result<Value> {
    let len = len.min(bytes.len());
    parse_one(&bytes[..len], ParseOptions::default())
}

/// Parse one value from raw bytes.
pub fn parse_bytes(bytes: &[u8]) -> Result<Value> {
    parse_one(bytes, ParseOptions::default())
}

/// Parse every top-level value in `text`.
pub fn parse_all(text: &str) -> Result<Vec<Value>> {
    let mut parser = Parser::new(text.as_bytes());
    let mut values = Vec::new();
    while !parser.is_at_end() {
        match parser.parse_value() {
            Ok(value) => values.push(value),
            Err(err) => {
                tracing::debug!(error = %err, count = values.len(), "failed to parse s-expression");
                return track(Err(err));
            }
        }
    }
    Ok(values)
}

/// Read all of `reader` into memory, then parse one value from it.
pub fn load<R: Read>(reader: R) -> Result<Value> {
    load_with_options(reader, ParseOptions::default())
}

/// Read all of `reader` into memory, then parse one value from it with the given options.
pub fn load_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Value> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    tracing::debug!(bytes = content.len(), "loaded s-expression source");
    parse_one(&content, options)
}

#[cfg(test)]
mod test {
    use super::{
        load, parse, parse_all, parse_bytes, parse_with_length, parse_with_options, ParseError,
        ParseOptions, Parser, MAX_TOKEN_LEN,
    };
    use crate::error::{clear_last_error, last_error, Error, ErrorCode};
    use crate::value::Value;
    use rstest::rstest;

    fn parse_error(text: &str) -> ParseError {
        match parse(text) {
            Err(Error::Parse(err)) => err,
            other => panic!("expected a parse error for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_list() {
        let value = parse("()").unwrap();
        assert!(value.is_list());
        assert_eq!(0, value.size().unwrap());
        assert!(value.first().is_none());
    }

    #[test]
    fn test_comment_then_nil() {
        let value = parse("; just nil with comment\nnil ; :)").unwrap();
        assert!(value.is_nil());
    }

    #[rstest]
    #[case("true", true)]
    #[case("yes", true)]
    #[case("false", false)]
    #[case("no", false)]
    fn test_bool(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(Value::Bool(expected), parse(text).unwrap());
    }

    #[test]
    fn test_symbol() {
        let value = parse("marx").unwrap();
        assert_eq!(Some("marx"), value.get_symbol_value());
    }

    #[rstest]
    #[case("a;b", "a;b")]
    #[case("sym(", "sym")]
    #[case("+", "+")]
    #[case("nil?", "nil?")]
    fn test_symbol_boundaries(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(Some(expected), parse(text).unwrap().get_symbol_value());
    }

    #[test]
    fn test_list_with_comments() {
        let text = "( ; a list with multiple elem\n\
                    true false ; some bool\n\
                    random_sym ; a random symbol\n\
                    no)";
        let value = parse(text).unwrap();
        assert_eq!(4, value.size().unwrap());
        assert_eq!(Some(&Value::Bool(true)), value.first());
        assert_eq!(
            Some("random_sym"),
            value.at(2).and_then(Value::get_symbol_value)
        );
        assert_eq!(Some(&Value::Bool(false)), value.last());
    }

    #[test]
    fn test_list_with_sublists() {
        let value = parse("(sym () () ())").unwrap();
        assert_eq!(4, value.size().unwrap());
        assert!(value.last().is_some_and(Value::is_list));
    }

    #[test]
    fn test_nested_list() {
        let value = parse("(a (b (c)) d)").unwrap();
        let inner = value.at(1).unwrap();
        assert_eq!(2, inner.size().unwrap());
        assert_eq!(
            Some("c"),
            inner.last().and_then(Value::first).and_then(Value::get_symbol_value)
        );
    }

    #[rstest]
    #[case("(")]
    #[case("( ; eof")]
    #[case("(true yes")]
    #[case("((a) (b)")]
    #[case("\"trans right are human right")]
    #[case("\"ends in escape\\")]
    #[case("\\")]
    #[case("")]
    #[case("   ; only a comment")]
    fn test_unexpected_eof(#[case] text: &str) {
        clear_last_error();
        assert!(matches!(parse_error(text), ParseError::Eof(_)));
        assert_eq!(ErrorCode::UnexpectedEof, last_error());
    }

    #[test]
    fn test_eof_span_starts_at_open_list() {
        assert_eq!(3..9, parse_error("   (a b c").span());
    }

    #[test]
    fn test_unexpected_close() {
        assert_eq!(ParseError::UnexpectedClose(1..2), parse_error(" )"));
    }

    #[test]
    fn test_int() {
        assert_eq!(Value::Int(-123456), parse("-123456").unwrap());
    }

    #[test]
    fn test_double() {
        let value = parse("3.14").unwrap();
        assert!((value.as_double().unwrap() - 3.14).abs() < 0.00004);
    }

    #[test]
    fn test_hex_int() {
        assert_eq!(Value::Int(255), parse("0xFF").unwrap());
    }

    #[test]
    fn test_number_ends_at_delimiter() {
        let value = parse("(1 2.5 -3)").unwrap();
        assert_eq!(Some(&Value::Int(1)), value.at(0));
        assert_eq!(Some(&Value::new_double(2.5)), value.at(1));
        assert_eq!(Some(&Value::Int(-3)), value.at(2));
    }

    #[test]
    fn test_string() {
        let value = parse("\"Hello, world\\n\"").unwrap();
        assert_eq!(Some("Hello, world\n"), value.get_string_value());
    }

    #[rstest]
    #[case(r#""a\rb""#, "a\rb")]
    #[case(r#""say \"hi\"""#, "say \"hi\"")]
    #[case(r#""tab\tstays""#, "tab\\tstays")]
    #[case(r#""back\\slash""#, "back\\\\slash")]
    #[case(r#""(not a list) ; nor a comment""#, "(not a list) ; nor a comment")]
    #[case(r#""""#, "")]
    fn test_string_escapes(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(Some(expected), parse(text).unwrap().get_string_value());
    }

    #[test]
    fn test_list_of_strings() {
        let value = parse("(\"lol\" \"lulz\" \"all your base belong to us\")").unwrap();
        assert_eq!(3, value.size().unwrap());
        assert_eq!(
            Some("all your base belong to us"),
            value.last().and_then(Value::get_string_value)
        );
    }

    #[rstest]
    #[case("\\o", b'o')]
    #[case("\\(", b'(')]
    #[case("\\\"", b'"')]
    #[case("\\ ", b' ')]
    fn test_char(#[case] text: &str, #[case] expected: u8) {
        assert_eq!(Value::Char(expected), parse(text).unwrap());
    }

    #[test]
    fn test_char_in_list() {
        let value = parse("(\\a\\b c)").unwrap();
        assert_eq!(
            vec![
                Value::Char(b'a'),
                Value::Char(b'b'),
                Value::new_symbol("c")
            ],
            value.as_list().unwrap().iter().cloned().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_trailing_input_is_ignored() {
        assert_eq!(Value::Int(1), parse("1 2 3").unwrap());
        assert_eq!(Value::Nil, parse("nil)").unwrap());
    }

    #[test]
    fn test_nul_ends_input() {
        assert_eq!(Value::Int(12), parse_bytes(b"12\x0034").unwrap());
        assert!(parse_bytes(b"(a\x00)").is_err());
    }

    #[test]
    fn test_parse_with_length() {
        let bytes = b"(a b) trailing";
        assert_eq!(2, parse_with_length(bytes, 5).unwrap().size().unwrap());
        assert!(parse_with_length(bytes, 4).is_err());
        assert!(parse_with_length(bytes, 100).is_ok());
        assert!(parse_with_length(bytes, 0).is_err());
    }

    #[test]
    fn test_long_symbol_is_split() {
        let text = format!("({})", "s".repeat(MAX_TOKEN_LEN + 3));
        let value = parse(&text).unwrap();
        assert_eq!(2, value.size().unwrap());
        assert_eq!(
            Some(MAX_TOKEN_LEN),
            value.first().and_then(Value::get_symbol_value).map(str::len)
        );
        assert_eq!(Some("sss"), value.last().and_then(Value::get_symbol_value));
    }

    #[rstest]
    #[case(b"plain".as_slice(), "plain")]
    #[case(b"a-symbol-that-is-longer-than-the-inline-limit".as_slice(), "a-symbol-that-is-longer-than-the-inline-limit")]
    #[case(b"caf\xe9".as_slice(), "caf\u{fffd}")]
    fn test_symbol_text(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(Value::new_symbol(expected), parse_bytes(input).unwrap());
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        assert!(parse_with_options("(())", options).is_ok());
        assert!(matches!(
            parse_with_options("((()))", options),
            Err(Error::Parse(ParseError::DepthLimit { max_depth: 2, .. }))
        ));

        let deep = format!("{}{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(
            parse(&deep),
            Err(Error::Parse(ParseError::DepthLimit { .. }))
        ));
    }

    #[test]
    fn test_parser_reads_one_value_at_a_time() {
        let mut parser = Parser::new(b"a (b) ; done\n");
        assert_eq!(Some("a"), parser.parse_value().unwrap().get_symbol_value());
        assert_eq!(1, parser.offset());
        assert!(parser.parse_value().unwrap().is_list());
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_parse_all() {
        let values = parse_all("; config\n(name \"demo\")\n(port 8080)\nyes").unwrap();
        assert_eq!(3, values.len());
        assert_eq!(Value::Bool(true), values[2]);
        assert!(parse_all("").unwrap().is_empty());
        assert!(parse_all("(a) (b").is_err());
    }

    #[test]
    fn test_load() {
        let source: &[u8] = b"(server (port 80) (debug no))";
        let value = load(source).unwrap();
        assert_eq!(2, value.size().unwrap());

        let empty: &[u8] = b"";
        assert!(matches!(load(empty), Err(Error::Parse(ParseError::Eof(_)))));
    }

    #[test]
    fn test_from_str() {
        let value: Value = "(1 2)".parse().unwrap();
        assert_eq!(2, value.size().unwrap());
    }
}
