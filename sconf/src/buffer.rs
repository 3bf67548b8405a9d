use crate::error::Result;

/// Capacity of a token buffer after its first growth.
const BASE_CAPACITY: usize = 8;

/// Append-only byte accumulator used to stage token text while scanning.
///
/// The buffer grows geometrically: it starts empty, jumps to
/// [`BASE_CAPACITY`] on first use and doubles whenever it runs out of room.
/// Growth is fallible so that allocation failure surfaces as
/// [`Error::OutOfMemory`](crate::Error::OutOfMemory) instead of aborting.
/// A parser keeps one buffer and [`reset`](TokenBuffer::reset)s it between
/// tokens, so the allocation is reused across the whole input.
#[derive(Debug, Default)]
pub(crate) struct TokenBuffer {
    bytes: Vec<u8>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current contents but keep the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    pub fn push(&mut self, byte: u8) -> Result<()> {
        if self.bytes.len() == self.bytes.capacity() {
            self.grow()?;
        }
        self.bytes.push(byte);
        Ok(())
    }

    fn grow(&mut self) -> Result<()> {
        let capacity = self.bytes.capacity();
        let target = if capacity >= BASE_CAPACITY {
            capacity * 2
        } else {
            BASE_CAPACITY
        };
        self.bytes.try_reserve_exact(target - self.bytes.len())?;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copy the contents out as text, replacing invalid UTF-8 sequences.
    pub fn to_text(&self) -> Result<String> {
        let text = String::from_utf8_lossy(&self.bytes);
        let mut owned = String::new();
        owned.try_reserve_exact(text.len())?;
        owned.push_str(&text);
        Ok(owned)
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.bytes.capacity()
    }
}
