//! SQLite-backed storage implementation.
//!
//! Uses `rusqlite` (with bundled SQLite) wrapped in an `Arc<Mutex<Connection>>`
//! to satisfy the `Send + Sync` requirements. All blocking calls are offloaded
//! to a thread-pool via `tokio::task::spawn_blocking`.
//!
//! # Schema
//!
//! - `users`, `thoughts`, `reactions` — one row per document, scalar fields.
//! - `user_thoughts` — ordered back-list of authored thoughts.
//! - `user_friends` — friend set; `(user_id, friend_id)` is unique and
//!   insertion order is kept through the rowid.
//! - `thought_reactions` — ordered reaction list of a thought.
//!
//! Relation rows are owned by the document on the `*_id` owner side and go
//! away with it. Rows pointing *at* a deleted document are left alone, so a
//! dangling reference stays stored and is skipped on expansion.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use thoughtnet::{Reaction, Thought, User, UserPatch};

use super::{Storage, StorageError};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,
    username    TEXT NOT NULL,
    email       TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS thoughts (
    id            TEXT PRIMARY KEY,
    thought_text  TEXT NOT NULL,
    user_id       TEXT,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reactions (
    id             TEXT PRIMARY KEY,
    reaction_body  TEXT NOT NULL,
    user_id        TEXT,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_thoughts (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL,
    thought_id  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_user_thoughts_user ON user_thoughts(user_id);

CREATE TABLE IF NOT EXISTS user_friends (
    user_id    TEXT NOT NULL,
    friend_id  TEXT NOT NULL,
    PRIMARY KEY (user_id, friend_id)
);

CREATE TABLE IF NOT EXISTS thought_reactions (
    seq          INTEGER PRIMARY KEY AUTOINCREMENT,
    thought_id   TEXT NOT NULL,
    reaction_id  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_thought_reactions_thought ON thought_reactions(thought_id);
";

// ---------------------------------------------------------------------------
// SqliteStorage
// ---------------------------------------------------------------------------

/// SQLite-backed implementation of [`Storage`].
///
/// Holds a single database connection protected by a `Mutex`. All operations
/// run inside `spawn_blocking` to avoid blocking the async runtime.
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the SQLite database at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database (data is lost when dropped).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` on the connection inside `spawn_blocking`.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| StorageError::Internal("sqlite connection mutex poisoned".into()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// Error conversions
// ---------------------------------------------------------------------------

fn map_err(e: rusqlite::Error) -> StorageError {
    StorageError::Internal(e.to_string())
}

// ---------------------------------------------------------------------------
// Row loaders (run with the connection already locked)
// ---------------------------------------------------------------------------

fn id_column(conn: &Connection, sql: &str, owner: &str) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn.prepare_cached(sql).map_err(map_err)?;
    let ids = stmt
        .query_map(params![owner], |row| row.get::<_, String>(0))
        .map_err(map_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_err)?;
    Ok(ids)
}

fn user_exists(conn: &Connection, id: &str) -> Result<bool, StorageError> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .map_err(map_err)?;
    Ok(count > 0)
}

fn load_user(conn: &Connection, id: &str) -> Result<Option<User>, StorageError> {
    let row = conn
        .query_row(
            "SELECT id, username, email, created_at FROM users WHERE id = ?1",
            params![id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    thoughts: Vec::new(),
                    friends: Vec::new(),
                    created_at: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(map_err)?;

    let Some(mut user) = row else {
        return Ok(None);
    };
    user.thoughts = id_column(
        conn,
        "SELECT thought_id FROM user_thoughts WHERE user_id = ?1 ORDER BY seq ASC",
        &user.id,
    )?;
    user.friends = id_column(
        conn,
        "SELECT friend_id FROM user_friends WHERE user_id = ?1 ORDER BY rowid ASC",
        &user.id,
    )?;
    Ok(Some(user))
}

fn load_thought(conn: &Connection, id: &str) -> Result<Option<Thought>, StorageError> {
    let row = conn
        .query_row(
            "SELECT id, thought_text, user_id, created_at FROM thoughts WHERE id = ?1",
            params![id],
            |row| {
                Ok(Thought {
                    id: row.get(0)?,
                    thought_text: row.get(1)?,
                    user: row.get(2)?,
                    reactions: Vec::new(),
                    created_at: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(map_err)?;

    let Some(mut thought) = row else {
        return Ok(None);
    };
    thought.reactions = id_column(
        conn,
        "SELECT reaction_id FROM thought_reactions WHERE thought_id = ?1 ORDER BY seq ASC",
        &thought.id,
    )?;
    Ok(Some(thought))
}

fn load_reaction(conn: &Connection, id: &str) -> Result<Option<Reaction>, StorageError> {
    conn.query_row(
        "SELECT id, reaction_body, user_id, created_at FROM reactions WHERE id = ?1",
        params![id],
        |row| {
            Ok(Reaction {
                id: row.get(0)?,
                reaction_body: row.get(1)?,
                user: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(map_err)
}

/// Load every id in `ids` with `load`, skipping missing documents.
fn load_many<T>(
    conn: &Connection,
    ids: &[String],
    load: fn(&Connection, &str) -> Result<Option<T>, StorageError>,
) -> Result<Vec<T>, StorageError> {
    let mut docs = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(doc) = load(conn, id)? {
            docs.push(doc);
        }
    }
    Ok(docs)
}

/// Load every document of a collection, oldest first.
fn load_all<T>(
    conn: &Connection,
    sql: &str,
    load: fn(&Connection, &str) -> Result<Option<T>, StorageError>,
) -> Result<Vec<T>, StorageError> {
    let mut stmt = conn.prepare(sql).map_err(map_err)?;
    let ids = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(map_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_err)?;
    load_many(conn, &ids, load)
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for SqliteStorage {
    // --- Users ---------------------------------------------------------------

    async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        let user = user.clone();

        self.with_conn(move |conn| {
            if user_exists(conn, &user.id)? {
                return Err(StorageError::Conflict(format!(
                    "user {} already exists",
                    user.id
                )));
            }

            let tx = conn.transaction().map_err(map_err)?;
            tx.execute(
                "INSERT INTO users (id, username, email, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![user.id, user.username, user.email, user.created_at],
            )
            .map_err(map_err)?;
            for thought_id in &user.thoughts {
                tx.execute(
                    "INSERT INTO user_thoughts (user_id, thought_id) VALUES (?1, ?2)",
                    params![user.id, thought_id],
                )
                .map_err(map_err)?;
            }
            for friend_id in &user.friends {
                tx.execute(
                    "INSERT OR IGNORE INTO user_friends (user_id, friend_id) VALUES (?1, ?2)",
                    params![user.id, friend_id],
                )
                .map_err(map_err)?;
            }
            tx.commit().map_err(map_err)
        })
        .await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        let id = id.to_string();
        self.with_conn(move |conn| load_user(conn, &id)).await
    }

    async fn get_users(&self, ids: &[String]) -> Result<Vec<User>, StorageError> {
        let ids = ids.to_vec();
        self.with_conn(move |conn| load_many(conn, &ids, load_user))
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        self.with_conn(|conn| load_all(conn, "SELECT id FROM users ORDER BY id ASC", load_user))
            .await
    }

    async fn update_user(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<User>, StorageError> {
        let id = id.to_string();
        let patch = patch.clone();

        self.with_conn(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE users SET
                       username = COALESCE(?2, username),
                       email    = COALESCE(?3, email)
                     WHERE id = ?1",
                    params![id, patch.username, patch.email],
                )
                .map_err(map_err)?;
            if changed == 0 {
                return Ok(None);
            }
            load_user(conn, &id)
        })
        .await
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StorageError> {
        let id = id.to_string();

        self.with_conn(move |conn| {
            let tx = conn.transaction().map_err(map_err)?;
            let deleted = tx
                .execute("DELETE FROM users WHERE id = ?1", params![id])
                .map_err(map_err)?;
            tx.execute("DELETE FROM user_thoughts WHERE user_id = ?1", params![id])
                .map_err(map_err)?;
            tx.execute("DELETE FROM user_friends WHERE user_id = ?1", params![id])
                .map_err(map_err)?;
            tx.commit().map_err(map_err)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn add_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<User>, StorageError> {
        let user_id = user_id.to_string();
        let friend_id = friend_id.to_string();

        self.with_conn(move |conn| {
            if !user_exists(conn, &user_id)? {
                return Ok(None);
            }
            conn.execute(
                "INSERT OR IGNORE INTO user_friends (user_id, friend_id) VALUES (?1, ?2)",
                params![user_id, friend_id],
            )
            .map_err(map_err)?;
            load_user(conn, &user_id)
        })
        .await
    }

    async fn remove_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<User>, StorageError> {
        let user_id = user_id.to_string();
        let friend_id = friend_id.to_string();

        self.with_conn(move |conn| {
            if !user_exists(conn, &user_id)? {
                return Ok(None);
            }
            conn.execute(
                "DELETE FROM user_friends WHERE user_id = ?1 AND friend_id = ?2",
                params![user_id, friend_id],
            )
            .map_err(map_err)?;
            load_user(conn, &user_id)
        })
        .await
    }

    async fn push_thought(
        &self,
        user_id: &str,
        thought_id: &str,
    ) -> Result<Option<User>, StorageError> {
        let user_id = user_id.to_string();
        let thought_id = thought_id.to_string();

        self.with_conn(move |conn| {
            if !user_exists(conn, &user_id)? {
                return Ok(None);
            }
            conn.execute(
                "INSERT INTO user_thoughts (user_id, thought_id) VALUES (?1, ?2)",
                params![user_id, thought_id],
            )
            .map_err(map_err)?;
            load_user(conn, &user_id)
        })
        .await
    }

    // --- Thoughts ------------------------------------------------------------

    async fn insert_thought(&self, thought: &Thought) -> Result<(), StorageError> {
        let thought = thought.clone();

        self.with_conn(move |conn| {
            let exists: bool = conn
                .query_row(
                    "SELECT COUNT(*) FROM thoughts WHERE id = ?1",
                    params![thought.id],
                    |row| row.get::<_, i64>(0),
                )
                .map_err(map_err)?
                > 0;
            if exists {
                return Err(StorageError::Conflict(format!(
                    "thought {} already exists",
                    thought.id
                )));
            }

            let tx = conn.transaction().map_err(map_err)?;
            tx.execute(
                "INSERT INTO thoughts (id, thought_text, user_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    thought.id,
                    thought.thought_text,
                    thought.user,
                    thought.created_at,
                ],
            )
            .map_err(map_err)?;
            for reaction_id in &thought.reactions {
                tx.execute(
                    "INSERT INTO thought_reactions (thought_id, reaction_id) VALUES (?1, ?2)",
                    params![thought.id, reaction_id],
                )
                .map_err(map_err)?;
            }
            tx.commit().map_err(map_err)
        })
        .await
    }

    async fn get_thought(&self, id: &str) -> Result<Option<Thought>, StorageError> {
        let id = id.to_string();
        self.with_conn(move |conn| load_thought(conn, &id)).await
    }

    async fn get_thoughts(&self, ids: &[String]) -> Result<Vec<Thought>, StorageError> {
        let ids = ids.to_vec();
        self.with_conn(move |conn| load_many(conn, &ids, load_thought))
            .await
    }

    async fn list_thoughts(&self) -> Result<Vec<Thought>, StorageError> {
        self.with_conn(|conn| {
            load_all(conn, "SELECT id FROM thoughts ORDER BY id ASC", load_thought)
        })
        .await
    }

    // --- Reactions -----------------------------------------------------------

    async fn insert_reaction(&self, reaction: &Reaction) -> Result<(), StorageError> {
        let reaction = reaction.clone();

        self.with_conn(move |conn| {
            let inserted = conn
                .execute(
                    "INSERT OR IGNORE INTO reactions (id, reaction_body, user_id, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        reaction.id,
                        reaction.reaction_body,
                        reaction.user,
                        reaction.created_at,
                    ],
                )
                .map_err(map_err)?;
            if inserted == 0 {
                return Err(StorageError::Conflict(format!(
                    "reaction {} already exists",
                    reaction.id
                )));
            }
            Ok(())
        })
        .await
    }

    async fn get_reactions(&self, ids: &[String]) -> Result<Vec<Reaction>, StorageError> {
        let ids = ids.to_vec();
        self.with_conn(move |conn| load_many(conn, &ids, load_reaction))
            .await
    }

    async fn delete_reaction(&self, id: &str) -> Result<bool, StorageError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let deleted = conn
                .execute("DELETE FROM reactions WHERE id = ?1", params![id])
                .map_err(map_err)?;
            Ok(deleted > 0)
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
