use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use tickerbar_core::errors::{Error, Result};
use tickerbar_core::settings::SettingsRepositoryTrait;

/// Settings stored as text rows in `app_settings`.
///
/// Lists are JSON arrays, flags are `"true"` / `"false"`. Reads use a pooled
/// connection; writes go through the single writer actor.
pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let value = app_settings
            .filter(setting_key.eq(key))
            .select(setting_value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<()> {
        let row = AppSettingDB {
            setting_key: key.to_string(),
            setting_value: value,
        };
        self.writer
            .exec(move |conn| {
                diesel::replace_into(app_settings)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        serde_json::from_str::<Vec<String>>(&raw)
            .map(Some)
            .map_err(|e| Error::InvalidSettingValue {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<()> {
        let encoded = serde_json::to_string(values)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        self.set_raw(key, encoded).await
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        raw.trim()
            .parse::<bool>()
            .map(Some)
            .map_err(|e| Error::InvalidSettingValue {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set_raw(key, value.to_string()).await
    }
}
