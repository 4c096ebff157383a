//! session.rs
//!
//! Локальное хранилище сессии: сериализованный пользователь и токен
//! в одном JSON-файле. Файл читается при старте, удаляется при выходе.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::models::User;

// На диске лежат ровно две строковые записи: пользователь в виде
// JSON-строки и токен. Частично заполненный файл считается отсутствием
// сессии, поэтому оба поля обязательны при разборе.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user: String,
    session_token: String,
}

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    user: Option<User>,
    token: Option<String>,
}

impl SessionStore {
    /// Читает сохраненную пару пользователь+токен. Любая проблема с
    /// файлом (нет, не парсится, неполный) дает пустую сессию.
    pub fn load(path: PathBuf) -> Self {
        let mut store = Self {
            path,
            user: None,
            token: None,
        };

        let raw = match fs::read_to_string(&store.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No stored session ({})", e);
                return store;
            }
        };

        let stored: StoredSession = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Stored session is unreadable, ignoring: {}", e);
                return store;
            }
        };

        match serde_json::from_str::<User>(&stored.user) {
            Ok(user) => {
                debug!("Restored session for {}", user.phone);
                store.user = Some(user);
                store.token = Some(stored.session_token);
            }
            Err(e) => warn!("Stored user record is unreadable, ignoring: {}", e),
        }

        store
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Сохраняет обе записи. Для вызывающего операция атомарна:
    /// пишем во временный файл и переименовываем.
    pub fn save(&mut self, user: User, token: String) {
        let stored = StoredSession {
            user: serde_json::to_string(&user).unwrap_or_default(),
            session_token: token.clone(),
        };

        self.user = Some(user);
        self.token = Some(token);

        if let Err(e) = self.persist(&stored) {
            warn!("Failed to persist session: {}", e);
        }
    }

    fn persist(&self, stored: &StoredSession) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(stored)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)
    }

    /// Выход: убирает обе записи с диска и из памяти.
    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;

        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove session file: {}", e);
            }
        }
    }
}
