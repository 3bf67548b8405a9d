use crate::error::{Error, Result};
use crate::value::Value;

/// The ordered children of a list value.
///
/// Children are kept in a growable vector, so appending is amortized O(1)
/// and `first`, `last` and `get` are O(1). Removing a child hands ownership
/// back to the caller and keeps the relative order of the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct List {
    items: Vec<Value>,
}

impl List {
    #[inline]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Append `item` after the current last child.
    pub fn push(&mut self, item: Value) -> Result<()> {
        self.items.try_reserve(1)?;
        self.items.push(item);
        Ok(())
    }

    /// Append every item in order.
    ///
    /// Items appended before an allocation failure stay in the list.
    pub fn extend_values(&mut self, items: impl IntoIterator<Item = Value>) -> Result<()> {
        let items = items.into_iter();
        self.items.try_reserve(items.size_hint().0)?;
        for item in items {
            self.push(item)?;
        }
        Ok(())
    }

    /// Detach the child at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfBound {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Detach the first child equal to `item`.
    pub fn remove_item(&mut self, item: &Value) -> Option<Value> {
        let index = self.items.iter().position(|child| child == item)?;
        Some(self.items.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

/// Tears nested lists down with a work list so that dropping a deeply nested
/// tree does not recurse once per level.
impl Drop for List {
    fn drop(&mut self) {
        if !self.items.iter().any(Value::is_list) {
            return;
        }

        let mut pending = std::mem::take(&mut self.items);
        while let Some(mut value) = pending.pop() {
            if let Value::List(list) = &mut value {
                pending.append(&mut list.items);
            }
        }
    }
}

impl FromIterator<Value> for List {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.items).into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
