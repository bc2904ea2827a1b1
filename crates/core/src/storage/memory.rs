use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::CoreError;

use super::traits::KeyValueStore;

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    fail_writes: bool,
    /// Writes still allowed before `fail_writes` switches on
    writes_left: Option<usize>,
}

/// In-process key-value store.
///
/// Clones share the same underlying map, so a caller can keep a handle to
/// inspect what the ledger wrote, or switch on `fail_writes` to simulate a
/// full or unavailable store (e.g. a browser in private mode).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, every `set`/`remove` fails with `CoreError::Persistence`.
    pub fn set_fail_writes(&self, fail: bool) {
        let mut inner = self.inner.borrow_mut();
        inner.fail_writes = fail;
        inner.writes_left = None;
    }

    /// Accept `n` more writes, then fail every write after them.
    pub fn fail_after_writes(&self, n: usize) {
        let mut inner = self.inner.borrow_mut();
        inner.fail_writes = false;
        inner.writes_left = Some(n);
    }

    /// Copy of all stored key/value pairs.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner.borrow().values.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().values.is_empty()
    }

    fn check_writable(&self) -> Result<(), CoreError> {
        let mut inner = self.inner.borrow_mut();
        let writes_left = inner.writes_left;
        match writes_left {
            Some(0) => inner.fail_writes = true,
            Some(n) => inner.writes_left = Some(n - 1),
            None => {}
        }
        if inner.fail_writes {
            return Err(CoreError::Persistence(
                "memory store rejected the write (quota exceeded)".into(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.inner.borrow().values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.check_writable()?;
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.check_writable()?;
        self.inner.borrow_mut().values.remove(key);
        Ok(())
    }
}
