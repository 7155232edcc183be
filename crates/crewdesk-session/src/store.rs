use crate::session::Session;
use async_trait::async_trait;
use crewdesk_core::{CrewdeskError, CrewdeskResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Fixed name of the durable token entry: the raw bearer token string.
const TOKEN_FILE: &str = "token";

/// Fixed name of the durable user entry: the serialized profile record.
const USER_FILE: &str = "user.json";

/// Durable persistence for the session, surviving process restarts.
///
/// The two entries are written together on login and removed together on
/// logout.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the persisted session; missing entries yield an anonymous one.
    async fn load(&self) -> CrewdeskResult<Session>;
    /// Persists both entries, removing whichever the session no longer has.
    async fn save(&self, session: &Session) -> CrewdeskResult<()>;
    /// Removes both entries.
    async fn clear(&self) -> CrewdeskResult<()>;
}

/// File-based session store: two files under a state directory.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Creates the store, creating the state directory if needed.
    pub async fn new(dir: PathBuf) -> CrewdeskResult<Self> {
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }
}

async fn remove_if_exists(path: &Path) -> CrewdeskResult<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> CrewdeskResult<Session> {
        let token = match tokio::fs::read_to_string(self.token_path()).await {
            Ok(raw) => {
                let trimmed = raw.trim().to_string();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let user = match tokio::fs::read_to_string(self.user_path()).await {
            Ok(raw) => Some(serde_json::from_str(&raw).map_err(|e| {
                CrewdeskError::Session(format!("failed to parse stored user profile: {e}"))
            })?),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Session { token, user })
    }

    async fn save(&self, session: &Session) -> CrewdeskResult<()> {
        match &session.token {
            Some(token) => tokio::fs::write(self.token_path(), token).await?,
            None => remove_if_exists(&self.token_path()).await?,
        }
        match &session.user {
            Some(user) => {
                let json = serde_json::to_string_pretty(user)?;
                tokio::fs::write(self.user_path(), json).await?;
            }
            None => remove_if_exists(&self.user_path()).await?,
        }
        Ok(())
    }

    async fn clear(&self) -> CrewdeskResult<()> {
        remove_if_exists(&self.token_path()).await?;
        remove_if_exists(&self.user_path()).await?;
        Ok(())
    }
}

/// In-memory session store, for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: parking_lot::Mutex<Session>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> CrewdeskResult<Session> {
        Ok(self.inner.lock().clone())
    }

    async fn save(&self, session: &Session) -> CrewdeskResult<()> {
        *self.inner.lock() = session.clone();
        Ok(())
    }

    async fn clear(&self) -> CrewdeskResult<()> {
        *self.inner.lock() = Session::default();
        Ok(())
    }
}
