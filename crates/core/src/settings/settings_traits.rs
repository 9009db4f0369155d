//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;

/// Small key/value store holding the user's preferences across restarts.
///
/// Getters return `Ok(None)` when the key has never been written.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Read a list of strings stored under `key`.
    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Replace the list stored under `key`.
    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<()>;

    /// Read a boolean flag stored under `key`.
    fn get_bool(&self, key: &str) -> Result<Option<bool>>;

    /// Replace the flag stored under `key`.
    async fn set_bool(&self, key: &str, value: bool) -> Result<()>;
}
