//! The value model: one enum covering every kind of node in a tree.
use std::fmt::Display;

use ordered_float::OrderedFloat;
use proptest::arbitrary::Arbitrary;
use smol_str::SmolStr;

use crate::error::{track, Error, Result};
use crate::list::List;

/// The kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    List,
    String,
    Char,
    Int,
    Double,
    Symbol,
    Bool,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Nil => "nil",
            Kind::List => "list",
            Kind::String => "string",
            Kind::Char => "char",
            Kind::Int => "int",
            Kind::Double => "double",
            Kind::Symbol => "symbol",
            Kind::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// An s-expression value.
///
/// Lists own their children and strings own their text, so dropping a value
/// releases the whole tree below it.
///
/// Dropping and [`dump`](crate::printer::dump) walk the tree with an explicit
/// stack. The derived `Clone`, `PartialEq`, `Hash` and `Debug` impls, as well
/// as [`to_string`](crate::printer::to_string) and
/// [`to_string_pretty`](crate::printer::to_string_pretty), recurse once per
/// nesting level, so trees built by hand far deeper than the parser's depth
/// limit can overflow the stack in those operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Nil,
    List(List),
    String(String),
    Char(u8),
    Int(i32),
    Double(OrderedFloat<f64>),
    Symbol(SmolStr),
    Bool(bool),
}

fn duplicate(text: &str) -> Result<String> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}

impl Value {
    #[inline]
    pub fn new_list() -> Self {
        Value::List(List::new())
    }

    #[inline]
    pub fn new_nil() -> Self {
        Value::Nil
    }

    #[inline]
    pub fn new_bool(value: bool) -> Self {
        Value::Bool(value)
    }

    #[inline]
    pub fn new_true() -> Self {
        Value::Bool(true)
    }

    #[inline]
    pub fn new_false() -> Self {
        Value::Bool(false)
    }

    #[inline]
    pub fn new_int(value: i32) -> Self {
        Value::Int(value)
    }

    #[inline]
    pub fn new_double(value: f64) -> Self {
        Value::Double(OrderedFloat(value))
    }

    #[inline]
    pub fn new_char(value: u8) -> Self {
        Value::Char(value)
    }

    /// Create a symbol holding a copy of `text`.
    ///
    /// Symbols are held in a [`SmolStr`], which stores short text inline
    /// and aborts like any other infallible allocation when a long copy fails.
    #[inline]
    pub fn new_symbol(text: &str) -> Self {
        Value::Symbol(SmolStr::new(text))
    }

    /// Create a string holding a copy of `text`.
    pub fn new_string(text: &str) -> Result<Self> {
        track(duplicate(text).map(Value::String))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::List(_) => Kind::List,
            Value::String(_) => Kind::String,
            Value::Char(_) => Kind::Char,
            Value::Int(_) => Kind::Int,
            Value::Double(_) => Kind::Double,
            Value::Symbol(_) => Kind::Symbol,
            Value::Bool(_) => Kind::Bool,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    #[inline]
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    #[inline]
    pub fn is_char(&self) -> bool {
        matches!(self, Value::Char(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    /// The text of a string value.
    pub fn get_string_value(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string.as_str()),
            _ => None,
        }
    }

    /// The text of a symbol value.
    pub fn get_symbol_value(&self) -> Option<&str> {
        match self {
            Value::Symbol(symbol) => Some(symbol.as_str()),
            _ => None,
        }
    }

    pub fn as_string_mut(&mut self) -> Option<&mut String> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(value) => Some(value.into_inner()),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<u8> {
        match self {
            Value::Char(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    fn list_mut(&mut self) -> Result<&mut List> {
        match self {
            Value::List(list) => Ok(list),
            other => Err(Error::NotAList(other.kind())),
        }
    }

    fn list(&self) -> Result<&List> {
        match self {
            Value::List(list) => Ok(list),
            other => Err(Error::NotAList(other.kind())),
        }
    }

    /// Append `item` to the end of this list.
    pub fn append(&mut self, item: Value) -> Result<()> {
        track(self.list_mut().and_then(|list| list.push(item)))
    }

    /// Append every item of `items` in order.
    pub fn append_many(&mut self, items: impl IntoIterator<Item = Value>) -> Result<()> {
        track(self.list_mut().and_then(|list| list.extend_values(items)))
    }

    /// Detach the child at `index` and hand it back to the caller.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        track(self.list_mut().and_then(|list| list.remove(index)))
    }

    /// Detach the first child equal to `item`, if there is one.
    pub fn remove_item(&mut self, item: &Value) -> Result<Option<Value>> {
        track(self.list_mut().map(|list| list.remove_item(item)))
    }

    /// Number of children of this list.
    pub fn size(&self) -> Result<usize> {
        track(self.list().map(List::len))
    }

    /// The child at `index`, if this is a list long enough to have one.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_list()?.get(index)
    }

    pub fn first(&self) -> Option<&Value> {
        self.as_list()?.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.as_list()?.last()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::new_double(value)
    }
}

impl From<SmolStr> for Value {
    fn from(value: SmolStr) -> Self {
        Value::Symbol(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Value::List(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::printer::to_string(self))
    }
}

impl std::str::FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse(s)
    }
}

/// Generates trees whose printed form parses back to the same tree.
///
/// Symbols are drawn from identifier-like text that cannot be mistaken for a
/// keyword or number, and strings avoid quotes, backslashes and line breaks.
/// Doubles are either quarters, which survive six fractional digits, or
/// magnitudes up to `1e300`, which need the exponent fallback in both
/// printers.
impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let leaf = prop_oneof![
            Just(Value::Nil),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(Value::Int),
            (-1_000_000i32..1_000_000, 1u32..4).prop_map(|(whole, frac)| {
                Value::new_double(f64::from(whole) + f64::from(frac) * 0.25)
            }),
            (-1_000i32..1_000, 16i32..300).prop_map(|(mantissa, exponent)| {
                Value::new_double(f64::from(mantissa) * 10f64.powi(exponent))
            }),
            proptest::char::range('!', '~')
                .prop_map(|c| Value::Char(c as u8)),
            "[a-z_][a-z0-9_+*/<>=!?-]{0,12}"
                .prop_filter("keywords parse as bool or nil", |s| {
                    !matches!(s.as_str(), "true" | "yes" | "false" | "no" | "nil")
                })
                .prop_map(|s| Value::Symbol(s.into())),
            "[a-zA-Z0-9 ,.:;()!?-]{0,16}".prop_map(Value::String),
        ];

        leaf.prop_recursive(6, 128, 8, |inner| {
            proptest::collection::vec(inner, 0..8)
                .prop_map(|items| Value::List(items.into_iter().collect()))
        })
        .boxed()
    }
}
