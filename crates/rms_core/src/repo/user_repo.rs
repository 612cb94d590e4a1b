//! Read-only user lookups.

use crate::model::user::{User, UserId};
use crate::repo::{ensure_connection_ready, int_to_bool, RepoResult};
use rusqlite::{Connection, OptionalExtension};

pub trait UserRepository {
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["users"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                "SELECT
                    id,
                    username,
                    email,
                    hashed_password,
                    is_active,
                    is_admin,
                    created_at,
                    updated_at
                 FROM users
                 WHERE id = ?1;",
                [id],
                |row| {
                    Ok((
                        User {
                            id: row.get("id")?,
                            username: row.get("username")?,
                            email: row.get("email")?,
                            hashed_password: row.get("hashed_password")?,
                            is_active: false,
                            is_admin: false,
                            created_at: row.get("created_at")?,
                            updated_at: row.get("updated_at")?,
                        },
                        row.get::<_, i64>("is_active")?,
                        row.get::<_, i64>("is_admin")?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((mut user, is_active, is_admin)) => {
                user.is_active = int_to_bool("users.is_active", is_active)?;
                user.is_admin = int_to_bool("users.is_admin", is_admin)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}
