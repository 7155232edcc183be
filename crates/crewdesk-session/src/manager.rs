use crate::session::Session;
use crate::store::SessionStore;
use crewdesk_api::AuthApi;
use crewdesk_core::{Credentials, CrewdeskResult, TokenSource};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared read view of the current session.
///
/// One writer (the [`SessionManager`]), many readers: the API client reads
/// the token through this cell before every outbound request. A reader may
/// observe a stale token while a logout is in flight; the server rejects
/// revoked tokens, so that window is harmless.
#[derive(Clone, Default)]
pub struct SessionCell {
    inner: Arc<RwLock<Session>>,
}

impl SessionCell {
    /// An anonymous cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    /// True when a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_authenticated()
    }

    fn replace(&self, session: Session) {
        *self.inner.write() = session;
    }
}

impl TokenSource for SessionCell {
    fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }
}

/// Owns the session lifecycle: login, logout, restore-on-startup.
///
/// The manager is the only writer of the [`SessionCell`] and of the durable
/// store. Overlapping login/logout calls are not coordinated; the last one
/// to finish wins.
pub struct SessionManager {
    auth: AuthApi,
    cell: SessionCell,
    store: Arc<dyn SessionStore>,
    loading: AtomicBool,
    last_error: Mutex<Option<String>>,
}

impl SessionManager {
    /// Hydrates the cell from the durable store and returns the manager.
    ///
    /// An unreadable store entry is logged and treated as anonymous rather
    /// than failing startup.
    pub async fn restore(auth: AuthApi, cell: SessionCell, store: Arc<dyn SessionStore>) -> Self {
        match store.load().await {
            Ok(session) => cell.replace(session),
            Err(e) => warn!(error = %e, "failed to restore session, starting anonymous"),
        }
        Self {
            auth,
            cell,
            store,
            loading: AtomicBool::new(false),
            last_error: Mutex::new(None),
        }
    }

    /// Logs in with `credentials`.
    ///
    /// On success the token and user are written to the cell and both
    /// durable entries. Any failure message is retained in
    /// [`last_error`](Self::last_error) until the next attempt starts.
    pub async fn login(&self, credentials: Credentials) -> CrewdeskResult<Session> {
        self.loading.store(true, Ordering::SeqCst);
        *self.last_error.lock() = None;

        let result = self.attempt_login(&credentials).await;
        if let Err(e) = &result {
            *self.last_error.lock() = Some(e.to_string());
        }

        self.loading.store(false, Ordering::SeqCst);
        result
    }

    async fn attempt_login(&self, credentials: &Credentials) -> CrewdeskResult<Session> {
        let success = self.auth.login(credentials).await?;
        let session = Session::authenticated(success.token, success.user);
        self.store.save(&session).await?;
        self.cell.replace(session.clone());
        info!("logged in");
        Ok(session)
    }

    /// Logs out, best-effort.
    ///
    /// The server-side call may fail; its error is logged and swallowed so
    /// that local teardown (cell and durable entries) always completes.
    /// Logout failures never populate [`last_error`](Self::last_error).
    pub async fn logout(&self) {
        self.loading.store(true, Ordering::SeqCst);

        if let Err(e) = self.auth.logout().await {
            warn!(error = %e, "server-side logout failed, clearing local session anyway");
        }

        self.cell.replace(Session::default());
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to clear durable session entries");
        }

        self.loading.store(false, Ordering::SeqCst);
        info!("logged out");
    }

    /// True when a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.cell.is_authenticated()
    }

    /// True while a login or logout call is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// The last login failure message, if the most recent attempt failed.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    /// A copy of the current session.
    pub fn current(&self) -> Session {
        self.cell.snapshot()
    }
}
