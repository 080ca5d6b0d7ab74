//! User Storage
//! Mission: Persist user accounts with SQLite

use crate::auth::models::User;
use anyhow::{Context, Result};
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode};
use tracing::info;
use uuid::Uuid;

/// User storage with SQLite backend.
///
/// Email uniqueness is enforced at write time: a pre-check for friendly
/// rejection, plus the UNIQUE column constraint as the real guarantee.
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_on TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            full_name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            created_on: row.get(4)?,
        })
    }

    /// Get user by email
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, full_name, email, password_hash, created_on
             FROM users WHERE email = ?1",
        )?;

        let user_result = stmt.query_row(params![email], Self::row_to_user);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get user by id
    pub fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, full_name, email, password_hash, created_on
             FROM users WHERE id = ?1",
        )?;

        let user_result = stmt.query_row(params![id.to_string()], Self::row_to_user);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create a new user with a bcrypt-hashed password.
    ///
    /// Returns `None` when the email is already registered.
    pub fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>> {
        if self.get_user_by_email(email)?.is_some() {
            return Ok(None);
        }

        let password_hash = hash(password, DEFAULT_COST).context("Failed to hash password")?;

        let user = User {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash,
            created_on: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        let inserted = conn.execute(
            "INSERT INTO users (id, full_name, email, password_hash, created_on)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.full_name,
                user.email,
                user.password_hash,
                user.created_on,
            ],
        );

        match inserted {
            Ok(_) => {
                info!("✅ Created account: {}", user.email);
                Ok(Some(user))
            }
            // Lost a race with a concurrent registration for the same email.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to insert user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::verify;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = UserStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_create_and_retrieve_user() {
        let (store, _temp) = create_test_store();

        let user = store
            .create_user("Alice Example", "alice@example.com", "secret1")
            .unwrap()
            .unwrap();
        assert_eq!(user.full_name, "Alice Example");

        let by_email = store.get_user_by_email("alice@example.com").unwrap();
        assert!(by_email.is_some());
        assert_eq!(by_email.unwrap().id, user.id);

        let by_id = store.get_user_by_id(&user.id).unwrap();
        assert_eq!(by_id.unwrap().email, "alice@example.com");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (store, _temp) = create_test_store();

        store
            .create_user("Alice", "alice@example.com", "secret1")
            .unwrap()
            .unwrap();

        let second = store
            .create_user("Other Alice", "alice@example.com", "secret2")
            .unwrap();
        assert!(second.is_none());

        // The first record is untouched.
        let user = store.get_user_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(user.full_name, "Alice");
    }

    #[test]
    fn test_password_is_hashed() {
        let (store, _temp) = create_test_store();

        let user = store
            .create_user("Alice", "alice@example.com", "secret1")
            .unwrap()
            .unwrap();

        assert_ne!(user.password_hash, "secret1");
        assert!(verify("secret1", &user.password_hash).unwrap());
        assert!(!verify("wrong", &user.password_hash).unwrap());
    }

    #[test]
    fn test_unknown_lookups_return_none() {
        let (store, _temp) = create_test_store();

        assert!(store.get_user_by_email("nobody@example.com").unwrap().is_none());
        assert!(store.get_user_by_id(&Uuid::new_v4()).unwrap().is_none());
    }
}
