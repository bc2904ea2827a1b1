use crate::errors::CoreError;

/// Durable map from string key to string value.
///
/// Implementations must replace a key's value atomically: after `set`
/// returns `Ok`, a reader sees either the whole new value or, on error,
/// the whole old one. The ledger rewrites the complete bill collection on
/// every change and relies on this.
pub trait KeyValueStore {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Read a value. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}
