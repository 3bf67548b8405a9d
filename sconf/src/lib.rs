//! S-expressions for configuration files.
//!
//! # Syntax
//!
//! - **Lists** are sequences of values delimited by `(` and `)` and separated
//!   by whitespace.
//!
//! - **Strings** are enclosed in double quotes. Within strings, `\n`, `\r` and
//!   `\"` stand for a newline, a carriage return and a double quote. Any other
//!   backslash is kept as is, together with the character that follows it.
//!
//! - **Characters** are written as a backslash followed by a single byte,
//!   such as `\a`.
//!
//! - **Numbers** start with a digit or `-`. A number containing a `.` is a
//!   double, anything else is an integer. `0x` introduces a base-16 integer.
//!
//! - **Keywords** `true` and `yes` read as the boolean true, `false` and `no`
//!   as false, and `nil` as nil.
//!
//! - **Symbols** are any other run of characters up to the next whitespace or
//!   parenthesis.
//!
//! - **Comments** begin with a `;` and extend to the end of the line.
//!
//! # Example
//!
//! ```
//! let mut config = sconf::parse("(server (port 8080) ; http\n (debug no))").unwrap();
//! assert_eq!(config.size().unwrap(), 2);
//!
//! config.append(sconf::Value::new_symbol("reload")).unwrap();
//! assert_eq!(
//!     sconf::to_string(&config),
//!     "(server (port 8080) (debug false) reload)"
//! );
//! ```

pub(crate) mod buffer;
pub mod error;
pub(crate) mod escape;
pub(crate) mod lexer;
pub mod list;
pub mod parser;
pub mod printer;
pub mod value;

pub use error::{clear_last_error, error_description, last_error, Error, ErrorCode, Result};
pub use list::List;
pub use parser::{
    load, load_with_options, parse, parse_all, parse_bytes, parse_with_length,
    parse_with_options, ParseError, ParseOptions, Parser,
};
pub use printer::{dump, dump_to_string, to_string, to_string_pretty};
pub use value::{Kind, Value};

/// Version of this library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
