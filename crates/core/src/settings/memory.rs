use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::SettingsRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};

#[derive(Debug, Clone)]
enum StoredValue {
    List(Vec<String>),
    Flag(bool),
}

/// Process-local settings store.
///
/// Used by tests and by the terminal app when no database is configured.
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsRepository {
    values: Arc<Mutex<HashMap<String, StoredValue>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write return a database error.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredValue>>> {
        self.values
            .lock()
            .map_err(|e| Error::Database(DatabaseError::Internal(e.to_string())))
    }

    fn check_writable(&self) -> Result<()> {
        let failing = self.fail_writes.lock().map(|f| *f).unwrap_or(false);
        if failing {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "settings store is read-only".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsRepositoryTrait for InMemorySettingsRepository {
    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.lock()?.get(key) {
            None => Ok(None),
            Some(StoredValue::List(values)) => Ok(Some(values.clone())),
            Some(StoredValue::Flag(_)) => Err(Error::InvalidSettingValue {
                key: key.to_string(),
                message: "expected a list, found a flag".to_string(),
            }),
        }
    }

    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<()> {
        self.check_writable()?;
        self.lock()?
            .insert(key.to_string(), StoredValue::List(values.to_vec()));
        Ok(())
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.lock()?.get(key) {
            None => Ok(None),
            Some(StoredValue::Flag(value)) => Ok(Some(*value)),
            Some(StoredValue::List(_)) => Err(Error::InvalidSettingValue {
                key: key.to_string(),
                message: "expected a flag, found a list".to_string(),
            }),
        }
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.check_writable()?;
        self.lock()?.insert(key.to_string(), StoredValue::Flag(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_keys_read_as_none() {
        let repo = InMemorySettingsRepository::new();
        assert_eq!(repo.get_string_list("savedTickers").unwrap(), None);
        assert_eq!(repo.get_bool("isMarqueeMode").unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_clones() {
        let repo = InMemorySettingsRepository::new();
        let other = repo.clone();
        repo.set_string_list("savedTickers", &["AAPL".to_string(), "MSFT".to_string()])
            .await
            .unwrap();
        repo.set_bool("isMarqueeMode", true).await.unwrap();

        assert_eq!(
            other.get_string_list("savedTickers").unwrap(),
            Some(vec!["AAPL".to_string(), "MSFT".to_string()])
        );
        assert_eq!(other.get_bool("isMarqueeMode").unwrap(), Some(true));
    }

    #[tokio::test]
    async fn failing_writes_leave_values_untouched() {
        let repo = InMemorySettingsRepository::new();
        repo.set_bool("isMarqueeMode", false).await.unwrap();
        repo.set_fail_writes(true);

        let result = repo.set_bool("isMarqueeMode", true).await;
        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(repo.get_bool("isMarqueeMode").unwrap(), Some(false));
    }

    #[tokio::test]
    async fn type_mismatch_is_reported() {
        let repo = InMemorySettingsRepository::new();
        repo.set_bool("savedTickers", true).await.unwrap();
        assert!(matches!(
            repo.get_string_list("savedTickers"),
            Err(Error::InvalidSettingValue { .. })
        ));
    }
}
