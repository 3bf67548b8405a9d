use crate::escape::{escape_char, escape_string};
use std::convert::Infallible;
use std::fmt::Write as _;

use super::{format_double, Print, Printer};

/// A printer that formats the output as a single line.
struct SimplePrinter {
    needs_whitespace: bool,
    string: String,
}

impl SimplePrinter {
    pub fn new() -> Self {
        Self {
            needs_whitespace: false,
            string: String::new(),
        }
    }

    #[inline]
    fn separate(&mut self) {
        if self.needs_whitespace {
            self.string.push(' ');
        }
        self.needs_whitespace = true;
    }

    #[inline]
    fn atom(&mut self, text: &str) -> Result<(), Infallible> {
        self.separate();
        self.string.push_str(text);
        Ok(())
    }
}

impl Printer for SimplePrinter {
    type Error = Infallible;

    fn nil(&mut self) -> Result<(), Self::Error> {
        self.atom("nil")
    }

    fn bool(&mut self, value: bool) -> Result<(), Self::Error> {
        self.atom(if value { "true" } else { "false" })
    }

    fn int(&mut self, value: i32) -> Result<(), Self::Error> {
        self.separate();
        let _ = write!(&mut self.string, "{}", value);
        Ok(())
    }

    fn double(&mut self, value: f64) -> Result<(), Self::Error> {
        self.atom(&format_double(value))
    }

    fn char(&mut self, value: u8) -> Result<(), Self::Error> {
        self.atom(&escape_char(value))
    }

    fn symbol(&mut self, symbol: &str) -> Result<(), Self::Error> {
        self.atom(symbol)
    }

    fn string(&mut self, string: &str) -> Result<(), Self::Error> {
        self.atom(&escape_string(string))
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.separate();
        self.string.push('(');
        self.needs_whitespace = false;
        f(self)?;
        self.string.push(')');
        self.needs_whitespace = true;

        Ok(())
    }
}

/// Print a `T` into an s-expression string.
///
/// This function does not produce any line breaks, indentation, or unnecessary whitespace.
/// It is intended to be used when the output is intended to be consumed by another program.
/// Where human readability is a concern, consider using the [`to_string_pretty`] function instead.
///
/// Strings holding backslash pairs and chars above `0x7f` do not read back unchanged; see the
/// [module docs](crate::printer).
///
/// [`to_string_pretty`]: `crate::printer::to_string_pretty`
pub fn to_string<T: Print>(value: T) -> String {
    let mut printer = SimplePrinter::new();
    let _ = value.print(&mut printer);
    printer.string
}

#[cfg(test)]
mod test {
    use super::to_string;
    use crate::value::Value;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Nil, "nil")]
    #[case(Value::new_true(), "true")]
    #[case(Value::new_false(), "false")]
    #[case(Value::new_int(-42), "-42")]
    #[case(Value::new_double(3.0), "3.0")]
    #[case(Value::new_char(b'o'), r"\o")]
    #[case(Value::new_symbol("marx"), "marx")]
    #[case(Value::new_string("a \"b\"\n").unwrap(), r#""a \"b\"\n""#)]
    #[case(Value::new_list(), "()")]
    fn test_atoms(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(expected, to_string(&value));
    }

    #[test]
    fn test_nested() {
        let value: Value = [
            Value::new_symbol("server"),
            [Value::new_symbol("port"), Value::new_int(80)]
                .into_iter()
                .collect(),
            Value::new_list(),
        ]
        .into_iter()
        .collect();
        assert_eq!("(server (port 80) ())", to_string(&value));
    }

    #[test]
    fn test_sequence() {
        let values = vec![Value::new_int(1), Value::Nil, Value::new_list()];
        assert_eq!("1 nil ()", to_string(&values));
    }
}
