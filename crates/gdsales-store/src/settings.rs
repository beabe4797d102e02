// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::Store;
use gdsales_model::SystemSetting;

impl Store {
    pub async fn list_settings(&self) -> Result<Vec<SystemSetting>, StoreError> {
        let conn = self.lock().await;
        let mut stmt = conn.prepare("SELECT * FROM system_settings ORDER BY key")?;
        let settings = stmt
            .query_map([], |row| {
                Ok(SystemSetting {
                    key: row.get("key")?,
                    value: row.get("value")?,
                    description: row.get("description")?,
                    updated_at: row.get("updated_at")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(settings)
    }

    pub async fn upsert_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.lock().await;
        conn.execute(
            "INSERT INTO system_settings (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
             updated_at = CURRENT_TIMESTAMP",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_overwrites_existing_values() {
        let store = Store::open_in_memory().expect("open store");
        store
            .upsert_setting("company_name", "GD Garments")
            .await
            .expect("insert");
        store
            .upsert_setting("company_name", "GD Garments Ltd")
            .await
            .expect("overwrite");
        store
            .upsert_setting("currency", "USD")
            .await
            .expect("second key");

        let settings = store.list_settings().await.expect("list");
        assert_eq!(settings.len(), 2);
        assert_eq!(settings[0].key, "company_name");
        assert_eq!(settings[0].value, "GD Garments Ltd");
    }
}
