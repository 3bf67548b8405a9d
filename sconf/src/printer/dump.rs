use std::io::{self, Write};

use super::exponent_form;
use crate::parser::MAX_TOKEN_LEN;
use crate::value::Value;

enum Step<'a> {
    Value(&'a Value, usize),
    Separator,
    Close,
}

/// Write `value` to `sink` in the classic indented layout.
///
/// Atoms are written inline and list children are separated by a single
/// space. A list nested at depth `n > 1` starts on a new line, with its
/// opening parenthesis in column `n`. Doubles are written with six fractional
/// digits, falling back to exponent form when that would exceed
/// [`MAX_TOKEN_LEN`] bytes. Chars are written as a backslash and the raw byte.
/// Strings are quoted without escaping, so a string containing a quote does
/// not read back unchanged.
///
/// The tree is walked with an explicit stack, so arbitrarily deep trees can be
/// dumped.
pub fn dump<W: Write>(mut sink: W, value: &Value) -> io::Result<()> {
    let mut stack = vec![Step::Value(value, 1)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Separator => sink.write_all(b" ")?,
            Step::Close => sink.write_all(b")")?,
            Step::Value(Value::List(list), level) => {
                if level > 1 {
                    sink.write_all(b"\n")?;
                }
                write!(sink, "{:>level$}", "(")?;

                stack.push(Step::Close);
                for (index, child) in list.iter().enumerate().rev() {
                    stack.push(Step::Value(child, level + 1));
                    if index > 0 {
                        stack.push(Step::Separator);
                    }
                }
            }
            Step::Value(Value::Nil, _) => sink.write_all(b"nil")?,
            Step::Value(Value::Bool(true), _) => sink.write_all(b"true")?,
            Step::Value(Value::Bool(false), _) => sink.write_all(b"false")?,
            Step::Value(Value::Int(int), _) => write!(sink, "{}", int)?,
            Step::Value(Value::Double(double), _) => {
                sink.write_all(fixed_double(double.into_inner()).as_bytes())?
            }
            Step::Value(Value::Char(c), _) => sink.write_all(&[b'\\', *c])?,
            Step::Value(Value::Symbol(symbol), _) => sink.write_all(symbol.as_bytes())?,
            Step::Value(Value::String(string), _) => write!(sink, "\"{}\"", string)?,
        }
    }

    Ok(())
}

fn fixed_double(value: f64) -> String {
    let text = format!("{:.6}", value);
    if text.len() > MAX_TOKEN_LEN {
        exponent_form(value)
    } else {
        text
    }
}

/// Dump `value` into a string.
///
/// Output that is not valid UTF-8, such as a char above `0x7f`, is converted
/// lossily. Use [`dump`] with a byte sink to keep it intact.
pub fn dump_to_string(value: &Value) -> String {
    let mut output = Vec::new();
    let _ = dump(&mut output, value);
    String::from_utf8_lossy(&output).into_owned()
}
