// SPDX-License-Identifier: Apache-2.0

//! Account storage. Password hashes stay inside this module's credential
//! lookup; every read path returns the hash-free `User` shape.

use crate::error::StoreError;
use crate::rows;
use crate::Store;
use gdsales_model::User;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub department: String,
    pub phone: Option<String>,
    pub status: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// Credentials row used by the login handler. Not serializable; the hash
/// never crosses the HTTP boundary.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
    pub active: bool,
}

impl Store {
    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.lock().await;
        let mut stmt =
            conn.prepare("SELECT * FROM users ORDER BY created_at DESC, rowid DESC")?;
        let users = stmt
            .query_map([], rows::user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    pub async fn get_user(&self, id: &str) -> Result<User, StoreError> {
        let conn = self.lock().await;
        conn.query_row(
            "SELECT * FROM users WHERE id = ?1",
            rusqlite::params![id],
            rows::user_from_row,
        )
        .optional()?
        .ok_or(StoreError::NotFound("User"))
    }

    pub async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let conn = self.lock().await;
        let taken: Option<String> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?1",
                rusqlite::params![new.email],
                |row| row.get(0),
            )
            .optional()?;
        if taken.is_some() {
            return Err(StoreError::Conflict("Email already exists".to_string()));
        }
        let id = Store::new_row_id();
        let permissions = serde_json::to_string(&new.permissions)
            .map_err(|err| StoreError::Validation(format!("invalid permissions: {err}")))?;
        conn.execute(
            "INSERT INTO users \
             (id, name, email, password, role, department, phone, status, permissions) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                id,
                new.name,
                new.email,
                new.password_hash,
                new.role,
                new.department,
                new.phone,
                new.status,
                permissions
            ],
        )?;
        conn.query_row(
            "SELECT * FROM users WHERE id = ?1",
            rusqlite::params![id],
            rows::user_from_row,
        )
        .optional()?
        .ok_or(StoreError::NotFound("User"))
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, StoreError> {
        let conn = self.lock().await;
        let exists: Option<String> = conn
            .query_row(
                "SELECT id FROM users WHERE id = ?1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::NotFound("User"));
        }
        if let Some(email) = &patch.email {
            let taken: Option<String> = conn
                .query_row(
                    "SELECT id FROM users WHERE email = ?1 AND id != ?2",
                    rusqlite::params![email, id],
                    |row| row.get(0),
                )
                .optional()?;
            if taken.is_some() {
                return Err(StoreError::Conflict("Email already exists".to_string()));
            }
        }
        let mut sets: Vec<&str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();
        if let Some(v) = &patch.name {
            sets.push("name = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.email {
            sets.push("email = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.password_hash {
            sets.push("password = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.role {
            sets.push("role = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.department {
            sets.push("department = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.phone {
            sets.push("phone = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.status {
            sets.push("status = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.permissions {
            sets.push("permissions = ?");
            let encoded = serde_json::to_string(v)
                .map_err(|err| StoreError::Validation(format!("invalid permissions: {err}")))?;
            params.push(Value::Text(encoded));
        }
        sets.push("updated_at = CURRENT_TIMESTAMP");
        params.push(Value::Text(id.to_string()));
        let sql = format!("UPDATE users SET {} WHERE id = ?", sets.join(", "));
        conn.execute(&sql, params_from_iter(params))?;
        conn.query_row(
            "SELECT * FROM users WHERE id = ?1",
            rusqlite::params![id],
            rows::user_from_row,
        )
        .optional()?
        .ok_or(StoreError::NotFound("User"))
    }

    pub async fn delete_user(&self, id: &str, acting_user_id: &str) -> Result<(), StoreError> {
        if id == acting_user_id {
            return Err(StoreError::Conflict(
                "Cannot delete your own account".to_string(),
            ));
        }
        let conn = self.lock().await;
        let deleted = conn.execute("DELETE FROM users WHERE id = ?1", rusqlite::params![id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound("User"));
        }
        Ok(())
    }

    /// Looks up the credentials row for a login attempt. `None` for an
    /// unknown email; the caller decides how to phrase the rejection.
    pub async fn user_credentials(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let conn = self.lock().await;
        let found = conn
            .query_row(
                "SELECT * FROM users WHERE email = ?1",
                rusqlite::params![email],
                |row| {
                    let user = rows::user_from_row(row)?;
                    let password_hash: String = row.get("password")?;
                    let status: String = row.get("status")?;
                    Ok(UserCredentials {
                        user,
                        password_hash,
                        active: status == "active",
                    })
                },
            )
            .optional()?;
        Ok(found)
    }

    pub async fn touch_last_login(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.lock().await;
        conn.execute(
            "UPDATE users SET last_login = CURRENT_TIMESTAMP WHERE id = ?1",
            rusqlite::params![id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::new_user;

    #[tokio::test]
    async fn create_rejects_duplicate_emails() {
        let store = Store::open_in_memory().expect("open store");
        store
            .create_user(new_user("Mina", "mina@gdsales.test"))
            .await
            .expect("first user");
        let err = store
            .create_user(new_user("Other Mina", "mina@gdsales.test"))
            .await
            .expect_err("duplicate email");
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.list_users().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn update_checks_email_is_free() {
        let store = Store::open_in_memory().expect("open store");
        let a = store
            .create_user(new_user("Mina", "mina@gdsales.test"))
            .await
            .expect("user a");
        store
            .create_user(new_user("Omar", "omar@gdsales.test"))
            .await
            .expect("user b");
        let err = store
            .update_user(
                a.id.as_str(),
                UserPatch {
                    email: Some("omar@gdsales.test".to_string()),
                    ..UserPatch::default()
                },
            )
            .await
            .expect_err("email taken");
        assert!(matches!(err, StoreError::Conflict(_)));

        let renamed = store
            .update_user(
                a.id.as_str(),
                UserPatch {
                    name: Some("Mina A.".to_string()),
                    ..UserPatch::default()
                },
            )
            .await
            .expect("rename");
        assert_eq!(renamed.name, "Mina A.");
    }

    #[tokio::test]
    async fn users_cannot_delete_themselves() {
        let store = Store::open_in_memory().expect("open store");
        let user = store
            .create_user(new_user("Mina", "mina@gdsales.test"))
            .await
            .expect("user");
        let err = store
            .delete_user(user.id.as_str(), user.id.as_str())
            .await
            .expect_err("self delete");
        assert!(matches!(err, StoreError::Conflict(_)));
        store
            .delete_user(user.id.as_str(), "someone-else")
            .await
            .expect("delete by another account");
    }

    #[tokio::test]
    async fn credentials_lookup_keeps_hash_out_of_user_shape() {
        let store = Store::open_in_memory().expect("open store");
        store
            .create_user(new_user("Mina", "mina@gdsales.test"))
            .await
            .expect("user");
        let creds = store
            .user_credentials("mina@gdsales.test")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(creds.password_hash, "test-hash");
        assert!(creds.active);
        assert!(store
            .user_credentials("nobody@gdsales.test")
            .await
            .expect("lookup")
            .is_none());
    }
}
