use std::convert::Infallible;

use crate::escape::{escape_char, escape_string};

use super::{format_double, Print, Printer};
use pretty::DocAllocator as _;

/// A pretty printer that uses the `pretty` crate to format the output.
struct PrettyPrinter<'a> {
    arena: &'a pretty::Arena<'a>,
    items: Vec<pretty::DocBuilder<'a, pretty::Arena<'a>>>,
}

impl<'a> PrettyPrinter<'a> {
    fn atom(&mut self, text: String) -> Result<(), Infallible> {
        let doc = self.arena.text(text);
        self.items.push(doc);
        Ok(())
    }
}

impl<'a> Printer for PrettyPrinter<'a> {
    type Error = Infallible;

    fn nil(&mut self) -> Result<(), Self::Error> {
        self.atom("nil".to_string())
    }

    fn bool(&mut self, value: bool) -> Result<(), Self::Error> {
        self.atom(value.to_string())
    }

    fn int(&mut self, value: i32) -> Result<(), Self::Error> {
        self.atom(value.to_string())
    }

    fn double(&mut self, value: f64) -> Result<(), Self::Error> {
        self.atom(format_double(value))
    }

    fn char(&mut self, value: u8) -> Result<(), Self::Error> {
        self.atom(escape_char(value))
    }

    fn symbol(&mut self, symbol: &str) -> Result<(), Self::Error> {
        self.atom(symbol.to_string())
    }

    fn string(&mut self, string: &str) -> Result<(), Self::Error> {
        self.atom(escape_string(string))
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        let position = self.items.len();
        f(self)?;
        let items = self.items.drain(position..);

        let docs = self
            .arena
            .intersperse(items, self.arena.line())
            .nest(2)
            .group();

        self.items.push(
            self.arena
                .text("(")
                .append(docs)
                .append(self.arena.text(")")),
        );

        Ok(())
    }
}

/// Pretty print a `T` into an s-expression string that fits within `width` columns where possible.
///
/// Lists that fit on one line stay on one line; longer lists put each child on its own line,
/// indented by two spaces. Top-level values are separated by a blank line.
///
/// Atoms are written as [`to_string`](crate::printer::to_string) writes them, with the same
/// limits on what reads back.
pub fn to_string_pretty<T: Print>(value: T, width: usize) -> String {
    let arena = pretty::Arena::new();
    let mut printer = PrettyPrinter {
        items: vec![],
        arena: &arena,
    };

    let _ = value.print(&mut printer);

    let double_line = arena.line().append(arena.line());
    let doc = arena.intersperse(printer.items, double_line);

    let mut string = String::new();
    let _ = doc.render_fmt(width, &mut string);
    string
}

#[cfg(test)]
mod test {
    use super::to_string_pretty;
    use crate::parser::parse;
    use crate::value::Value;

    fn config() -> Value {
        parse("(server (name \"demo\") (port 8080) (debug no))").unwrap()
    }

    #[test]
    fn test_fits_on_one_line() {
        assert_eq!(
            "(server (name \"demo\") (port 8080) (debug false))",
            to_string_pretty(config(), 80)
        );
    }

    #[test]
    fn test_breaks_long_lists() {
        let expected = "(server\n  (name \"demo\")\n  (port 8080)\n  (debug false))";
        assert_eq!(expected, to_string_pretty(config(), 20));
    }

    #[test]
    fn test_top_level_values_are_separated() {
        let values = vec![Value::new_int(1), Value::new_int(2)];
        assert_eq!("1\n\n2", to_string_pretty(&values, 80));
    }
}
