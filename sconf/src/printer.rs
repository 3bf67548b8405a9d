//! Print values into s-expressions.
//!
//! Three renderings are available:
//!
//! - [`dump`] writes the classic indented form, where every nested list starts
//!   on a new line indented by its depth. Strings are written without escaping.
//! - [`to_string`] produces a compact single line.
//! - [`to_string_pretty`] lays the output out to fit a given width.
//!
//! The latter two go through the [`Printer`] trait and escape `"`, line feeds
//! and carriage returns inside strings. The grammar has no escape for a
//! backslash, so a string containing a backslash followed by `n`, `r` or `"`,
//! or ending in a backslash, does not read back unchanged; a trailing
//! backslash makes the printed text unparseable. Char values above `0x7f`
//! cannot be written into a `String` as the single byte the parser expects
//! and are rendered as the Latin-1 character instead. [`dump`] writes such
//! bytes verbatim.
//!
//! Doubles that would need more than [`MAX_TOKEN_LEN`] bytes in fixed
//! notation are written in exponent form. Non-finite doubles print as `inf`,
//! `-inf` and `NaN`, which read back as a symbol or as the integer 0.
//!
//! [`MAX_TOKEN_LEN`]: crate::parser::MAX_TOKEN_LEN
use crate::list::List;
use crate::parser::MAX_TOKEN_LEN;
use crate::value::Value;

mod dump;
mod pretty;
mod simple;
pub use dump::{dump, dump_to_string};
pub use pretty::to_string_pretty;
pub use simple::to_string;

/// Trait for types that can print s-expressions.
pub trait Printer: Sized {
    type Error;

    fn nil(&mut self) -> Result<(), Self::Error>;

    fn bool(&mut self, value: bool) -> Result<(), Self::Error>;

    fn int(&mut self, value: i32) -> Result<(), Self::Error>;

    fn double(&mut self, value: f64) -> Result<(), Self::Error>;

    /// Print a char literal.
    fn char(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Print a symbol.
    fn symbol(&mut self, symbol: &str) -> Result<(), Self::Error>;

    /// Print a string.
    fn string(&mut self, string: &str) -> Result<(), Self::Error>;

    /// Print a list given a function that prints the contents.
    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print a printable value.
    fn print(&mut self, value: impl Print) -> Result<(), Self::Error> {
        value.print(self)
    }
}

/// Trait for types that can be printed as an s-expression.
pub trait Print {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error>;
}

impl<T: Print + ?Sized> Print for &T {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        (*self).print(printer)
    }
}

impl<T: Print> Print for [T] {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        for item in self {
            printer.print(item)?;
        }
        Ok(())
    }
}

impl<T: Print> Print for Vec<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_slice())
    }
}

impl Print for List {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_slice())
    }
}

impl Print for Value {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        match self {
            Value::Nil => printer.nil(),
            Value::List(items) => printer.list(|printer| printer.print(items)),
            Value::String(string) => printer.string(string),
            Value::Char(c) => printer.char(*c),
            Value::Int(int) => printer.int(*int),
            Value::Double(double) => printer.double(double.into_inner()),
            Value::Symbol(symbol) => printer.symbol(symbol),
            Value::Bool(value) => printer.bool(*value),
        }
    }
}

/// Format a finite double so that it reads back as the same double.
pub(crate) fn format_double(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    if text.len() > MAX_TOKEN_LEN {
        return exponent_form(value);
    }
    text
}

/// Shortest exponent notation with a `.` in the mantissa, such as `1.0e300`.
pub(crate) fn exponent_form(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{mantissa}.0e{exponent}")
        }
        _ => text,
    }
}
