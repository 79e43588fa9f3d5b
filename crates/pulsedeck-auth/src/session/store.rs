//! Client-held session store: current user, persistence, hydration.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use pulsedeck_core::config::{AppConfig, SessionConfig};
use pulsedeck_core::events::{DomainEvent, SessionEvent};
use pulsedeck_core::result::AppResult;
use pulsedeck_core::traits::PersistentStore;
use pulsedeck_entity::session::SessionRecord;
use pulsedeck_entity::user::{AuthUser, Role};

use crate::error::AuthError;
use crate::rbac::AccessPolicy;
use crate::token::TokenManager;

use super::directory::LoginDirectory;
use super::phase::HydrationPhase;

/// Buffered session events per subscriber.
const EVENT_CAPACITY: usize = 64;

/// Mutable session state. `authenticated == current_user.is_some()` after
/// every completed transition.
#[derive(Debug, Default)]
struct SessionState {
    /// The authenticated identity, if any.
    current_user: Option<AuthUser>,
    /// Whether a user is authenticated.
    authenticated: bool,
    /// Set once by the first `initialize()`; never reset.
    initialized: bool,
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// The authenticated identity, if any.
    pub current_user: Option<AuthUser>,
    /// Whether a user is authenticated.
    pub authenticated: bool,
    /// Whether `initialize()` has completed at least once.
    pub initialized: bool,
    /// Hydration progress.
    pub phase: HydrationPhase,
}

struct Inner {
    /// Session state behind a single lock.
    state: RwLock<SessionState>,
    /// Durable store holding the persisted record.
    store: Arc<dyn PersistentStore>,
    /// Token issuance and validation.
    tokens: TokenManager,
    /// Demo identities accepted by `login`.
    directory: LoginDirectory,
    /// Storage key and routes.
    config: SessionConfig,
    /// Hydration phase publisher.
    phase: watch::Sender<HydrationPhase>,
    /// Deferred hydration retries scheduled but not yet run.
    pending_retries: AtomicUsize,
    /// Session event publisher.
    events: broadcast::Sender<DomainEvent>,
}

/// Owner of the one logical session of a running client.
///
/// Cloning is cheap and yields another handle to the same session; build
/// one per client and pass it down rather than sharing a global.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("SessionStore")
            .field("authenticated", &state.authenticated)
            .field("initialized", &state.initialized)
            .field("phase", &*self.inner.phase.borrow())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl SessionStore {
    /// Creates a new session store with all required dependencies.
    pub fn new(
        store: Arc<dyn PersistentStore>,
        tokens: TokenManager,
        directory: LoginDirectory,
        config: SessionConfig,
    ) -> Self {
        let (phase, _) = watch::channel(HydrationPhase::Uninitialized);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(SessionState::default()),
                store,
                tokens,
                directory,
                config,
                phase,
                pending_retries: AtomicUsize::new(0),
                events,
            }),
        }
    }

    /// Creates a session store from application configuration.
    pub fn from_config(config: &AppConfig, store: Arc<dyn PersistentStore>) -> AppResult<Self> {
        Ok(Self::new(
            store,
            TokenManager::from_config(&config.auth)?,
            LoginDirectory::from_config(&config.auth)?,
            config.session.clone(),
        ))
    }

    /// Creates a session store with default tokens, directory and routes.
    pub fn with_store(store: Arc<dyn PersistentStore>) -> Self {
        Self::new(
            store,
            TokenManager::default(),
            LoginDirectory::default(),
            SessionConfig::default(),
        )
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Restores the persisted session. Idempotent and never blocks.
    ///
    /// The restore runs on the first call and on every call while the
    /// store is reachable. If it does not authenticate and the store is
    /// reachable, exactly one deferred retry is scheduled on the current
    /// tokio runtime (after a single yield, no timer); without a runtime the
    /// retry runs inline. `initialized` is true when this returns, but a
    /// pending retry may still authenticate afterwards: await
    /// [`settled`](Self::settled) to observe the final state.
    pub fn initialize(&self) {
        let available = self.inner.store.is_available();
        let first_call = !self.read_state().initialized;

        if first_call || available {
            self.load_stored_session();
        }

        let retry = available && !self.is_authenticated();
        if retry {
            self.inner.pending_retries.fetch_add(1, Ordering::SeqCst);
        }

        self.write_state().initialized = true;

        if retry {
            self.inner.phase.send_replace(HydrationPhase::SyncChecked);
            self.schedule_retry();
        } else if self.inner.pending_retries.load(Ordering::SeqCst) == 0 {
            self.inner.phase.send_replace(HydrationPhase::Settled);
        }

        debug!(
            available,
            first_call,
            authenticated = self.is_authenticated(),
            phase = ?self.phase(),
            "Session initialized"
        );
    }

    /// Resolves once no hydration attempt is outstanding.
    ///
    /// Runs `initialize()` first if it has never been called.
    pub async fn settled(&self) {
        if self.phase() == HydrationPhase::Uninitialized {
            self.initialize();
        }
        let mut rx = self.inner.phase.subscribe();
        // The sender lives as long as `self`, so this only returns once settled.
        let _ = rx.wait_for(|phase| phase.is_settled()).await;
    }

    /// Reads, validates and adopts the persisted session record.
    ///
    /// A missing record or unreachable store leaves the state untouched. A
    /// record that fails validation is deleted. An expired token on a
    /// restored record is refreshed and re-persisted.
    pub fn load_stored_session(&self) {
        self.restore(false);
    }

    /// Authenticates against the login directory and persists the session.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] when no identity matches;
    /// session state is left unchanged.
    pub fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let Some(credential) = self.inner.directory.find(email, password) else {
            warn!(email, "Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let user = credential.to_auth_user(self.inner.tokens.issue(&credential.id));
        let user_id = user.id.clone();

        self.set_user(Some(user.clone()));
        self.persist(&user);

        info!(user_id = %user_id, "Login successful");
        self.emit(Some(user_id.clone()), SessionEvent::LoggedIn { user_id });
        Ok(())
    }

    /// Clears the session and its persisted record.
    ///
    /// Returns the login route the caller should navigate to.
    pub fn logout(&self) -> String {
        let previous = self.set_user(None);
        self.inner.store.remove(&self.inner.config.storage_key);

        if let Some(user) = previous {
            info!(user_id = %user.id, "Logged out");
            self.emit(
                Some(user.id.clone()),
                SessionEvent::LoggedOut { user_id: user.id },
            );
        }

        self.inner.config.login_route.clone()
    }

    /// Reissues the current user's token and re-persists the session.
    /// No-op without a current user.
    pub fn refresh_token(&self) {
        let refreshed = {
            let mut state = self.write_state();
            let Some(user) = state.current_user.as_ref() else {
                return;
            };
            let refreshed = self.inner.tokens.refresh(user);
            state.current_user = Some(refreshed.clone());
            refreshed
        };

        self.persist(&refreshed);

        info!(user_id = %refreshed.id, "Token refreshed");
        self.emit(
            Some(refreshed.id.clone()),
            SessionEvent::TokenRefreshed {
                user_id: refreshed.id,
            },
        );
    }

    // ── Queries ────────────────────────────────────────────────

    /// The authenticated user, if any.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.read_state().current_user.clone()
    }

    /// Whether a user is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.read_state().authenticated
    }

    /// Whether `initialize()` has completed at least once.
    pub fn is_initialized(&self) -> bool {
        self.read_state().initialized
    }

    /// Current hydration phase.
    pub fn phase(&self) -> HydrationPhase {
        *self.inner.phase.borrow()
    }

    /// A consistent copy of the session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read_state();
        SessionSnapshot {
            current_user: state.current_user.clone(),
            authenticated: state.authenticated,
            initialized: state.initialized,
            phase: self.phase(),
        }
    }

    /// Whether the current user's token is well-formed and unexpired.
    pub fn is_token_valid(&self) -> bool {
        self.read_state()
            .current_user
            .as_ref()
            .is_some_and(|user| self.inner.tokens.is_valid(&user.token))
    }

    /// Whether the session satisfies `required_roles`. An empty
    /// requirement is always satisfied.
    pub fn has_access(&self, required_roles: &[Role]) -> bool {
        if required_roles.is_empty() {
            return true;
        }
        self.read_state()
            .current_user
            .as_ref()
            .is_some_and(|user| AccessPolicy::matches(&user.roles, required_roles))
    }

    /// Whether the current user holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.has_any_role(&[role])
    }

    /// Whether the current user holds any of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.read_state()
            .current_user
            .as_ref()
            .is_some_and(|user| user.has_any_role(roles))
    }

    /// Whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Whether the current user may customize dashboards.
    pub fn can_edit_dashboard(&self) -> bool {
        self.has_any_role(&[Role::Admin, Role::TenantUser])
    }

    /// Tenant of the current user.
    pub fn tenant_id(&self) -> Option<String> {
        self.read_state()
            .current_user
            .as_ref()
            .map(|user| user.tenant_id.clone())
    }

    /// Whether the durable store is reachable from this host.
    pub fn store_available(&self) -> bool {
        self.inner.store.is_available()
    }

    /// Whether a persisted record exists, without validating it.
    pub fn has_stored_session(&self) -> bool {
        self.store_available()
            && self
                .inner
                .store
                .get(&self.inner.config.storage_key)
                .is_some()
    }

    /// Storage key and routes this store was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.inner.events.subscribe()
    }

    /// Watch hydration phase transitions.
    pub fn watch_phase(&self) -> watch::Receiver<HydrationPhase> {
        self.inner.phase.subscribe()
    }

    // ── Internals ──────────────────────────────────────────────

    fn schedule_retry(&self) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let session = self.clone();
                handle.spawn(async move {
                    tokio::task::yield_now().await;
                    session.run_deferred_retry();
                });
            }
            Err(_) => {
                debug!("No async runtime; running hydration retry inline");
                self.run_deferred_retry();
            }
        }
    }

    fn run_deferred_retry(&self) {
        if !self.is_authenticated() {
            debug!("Deferred hydration retry: loading stored session again");
            self.restore(true);
        }
        if self.inner.pending_retries.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.phase.send_replace(HydrationPhase::Settled);
        }
    }

    fn restore(&self, deferred: bool) {
        match self.read_record() {
            Ok(Some(user)) => {
                let user_id = user.id.clone();
                let token_valid = self.inner.tokens.is_valid(&user.token);
                self.set_user(Some(user));

                info!(user_id = %user_id, deferred, "Session restored from storage");
                self.emit(
                    Some(user_id.clone()),
                    SessionEvent::Restored {
                        user_id: user_id.clone(),
                        deferred,
                    },
                );

                if !token_valid {
                    info!(user_id = %user_id, "Stored token expired, refreshing");
                    self.refresh_token();
                }
            }
            Ok(None) => debug!("No stored session found"),
            Err(AuthError::StorageUnavailable) => {
                debug!("Durable store unavailable, skipping session restore")
            }
            Err(e) => {
                warn!(error = %e, "Invalid session data in storage, clearing");
                self.inner.store.remove(&self.inner.config.storage_key);
                self.emit(
                    None,
                    SessionEvent::RecordDiscarded {
                        reason: e.to_string(),
                    },
                );
            }
        }
    }

    fn read_record(&self) -> Result<Option<AuthUser>, AuthError> {
        if !self.inner.store.is_available() {
            return Err(AuthError::StorageUnavailable);
        }
        let Some(raw) = self.inner.store.get(&self.inner.config.storage_key) else {
            return Ok(None);
        };
        Ok(Some(SessionRecord::decode(&raw)?))
    }

    fn persist(&self, user: &AuthUser) {
        if !self.inner.store.is_available() {
            debug!(user_id = %user.id, "Durable store unavailable, session not persisted");
            return;
        }
        match SessionRecord::encode(user) {
            Ok(raw) => self.inner.store.set(&self.inner.config.storage_key, &raw),
            Err(e) => error!(user_id = %user.id, error = %e, "Failed to encode session record"),
        }
    }

    /// Replaces the current user, keeping `authenticated` in step.
    /// Returns the previous user.
    fn set_user(&self, user: Option<AuthUser>) -> Option<AuthUser> {
        let mut state = self.write_state();
        state.authenticated = user.is_some();
        std::mem::replace(&mut state.current_user, user)
    }

    fn emit(&self, actor_id: Option<String>, event: SessionEvent) {
        // No subscribers is not an error.
        let _ = self.inner.events.send(DomainEvent::new(actor_id, event));
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
