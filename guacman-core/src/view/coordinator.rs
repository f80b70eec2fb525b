//! Admin view coordinator
//!
//! Binds the administration services to a [`ViewState`] and reacts to edit
//! surface outcomes. Loads run as tokio tasks and publish every change
//! through a `watch` channel, so callers can observe each load state on its
//! own or wait for a combination explicitly.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{Instrument, debug, info, info_span, instrument, warn};

use crate::api::AdminServices;
use crate::error::{ApiError, ApiResult, ViewError, ViewResult};
use crate::models::{Connection, ConnectionGroup, ObjectPermissionType, ROOT_IDENTIFIER, User};
use crate::tracing::span_names;

use super::state::{LoadState, ViewState};
use super::surface::{
    ConnectionEditRequest, ConnectionGroupEditRequest, EditOutcome, EditSurface, UserEditRequest,
};
use super::users::{remove_first_by_username, replace_by_username};

/// Performs the fetches and writes their results into the shared state
#[derive(Clone)]
struct Loader {
    services: AdminServices,
    state: Arc<watch::Sender<ViewState>>,
}

impl Loader {
    #[instrument(name = "view.load_connections", skip(self))]
    async fn load_connections(&self) -> ApiResult<()> {
        match self
            .services
            .groups
            .connection_group_tree(ROOT_IDENTIFIER, ObjectPermissionType::Update)
            .await
        {
            Ok(tree) => {
                info!(
                    connections = tree.connection_count(),
                    groups = tree.group_count(),
                    "Connection group tree loaded"
                );
                self.state.send_modify(|s| s.set_root_group(tree));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load connection group tree");
                let state = LoadState::Failed(e.to_string());
                self.state.send_modify(|s| s.set_connections_state(state));
                Err(e)
            }
        }
    }

    #[instrument(name = "view.load_users", skip(self))]
    async fn load_users(&self) -> ApiResult<()> {
        match self.services.users.users(ObjectPermissionType::Update).await {
            Ok(users) => {
                info!(count = users.len(), "User list loaded");
                self.state.send_modify(|s| s.set_users(users));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load users");
                let state = LoadState::Failed(e.to_string());
                self.state.send_modify(|s| s.set_users_state(state));
                Err(e)
            }
        }
    }

    #[instrument(name = "view.load_protocols", skip(self))]
    async fn load_protocols(&self) -> ApiResult<()> {
        match self.services.protocols.protocols().await {
            Ok(protocols) => {
                info!(count = protocols.len(), "Protocols loaded");
                self.state.send_modify(|s| s.set_protocols(protocols));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load protocols");
                let state = LoadState::Failed(e.to_string());
                self.state.send_modify(|s| s.set_protocols_state(state));
                Err(e)
            }
        }
    }

    /// Creates `user` and appends it once the server confirms
    ///
    /// On failure the username goes back into an empty input.
    async fn create_user(self, user: User) -> ApiResult<User> {
        debug!(username = %user.username, "Creating user");
        match self.services.users.create_user(&user).await {
            Ok(()) => {
                info!("User created");
                let created = user.clone();
                self.state.send_modify(|s| s.users_mut().push(created));
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create user");
                self.state.send_if_modified(|s| {
                    if s.new_username().is_empty() {
                        s.set_new_username(user.username.clone());
                        true
                    } else {
                        false
                    }
                });
                Err(e)
            }
        }
    }
}

/// Coordinates the administration view
///
/// Each coordinator owns one fresh [`ViewState`]. Dropping it aborts any
/// request still in flight and wakes every waiter with `ViewError::Closed`.
pub struct AdminViewCoordinator {
    loader: Loader,
    surface: Arc<dyn EditSurface>,
    tasks: Mutex<Vec<AbortHandle>>,
    activated: AtomicBool,
    closed: watch::Sender<bool>,
}

impl AdminViewCoordinator {
    /// Creates a coordinator with a fresh view state
    ///
    /// Nothing is fetched until [`initialize`](Self::initialize) is called.
    #[must_use]
    pub fn new(services: AdminServices, surface: Arc<dyn EditSurface>) -> Self {
        let (state, _) = watch::channel(ViewState::new());
        Self {
            loader: Loader {
                services,
                state: Arc::new(state),
            },
            surface,
            tasks: Mutex::new(Vec::new()),
            activated: AtomicBool::new(false),
            closed: watch::channel(false).0,
        }
    }

    /// Activates the view
    ///
    /// Protocol metadata is requested immediately. The connection group tree
    /// and the user list are requested concurrently once
    /// `basic_permissions` resolves; each settles its own load state when it
    /// completes. If `basic_permissions` never resolves, both stay loading.
    ///
    /// Returns false if the view was already activated.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn initialize<F>(&self, basic_permissions: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.activated.swap(true, Ordering::SeqCst) {
            warn!("Admin view already activated");
            return false;
        }

        let span = info_span!(span_names::VIEW_ACTIVATE);

        let loader = self.loader.clone();
        self.spawn(
            async move {
                let _ = loader.load_protocols().await;
            }
            .instrument(span.clone()),
        );

        let loader = self.loader.clone();
        self.spawn(
            async move {
                basic_permissions.await;
                debug!("Basic permissions resolved");
                let _ = tokio::join!(loader.load_connections(), loader.load_users());
            }
            .instrument(span),
        );

        true
    }

    /// Fetches protocol metadata and replaces the protocol map
    ///
    /// # Errors
    ///
    /// Returns the API error; the protocol load state is set to failed.
    pub async fn load_protocols(&self) -> ApiResult<()> {
        self.loader.load_protocols().await
    }

    /// Returns a receiver that observes every view state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.loader.state.subscribe()
    }

    /// Returns a copy of the current view state
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.loader.state.borrow().clone()
    }

    /// Waits until `predicate` holds for the view state
    ///
    /// A state that already satisfies `predicate` is returned even after
    /// [`shutdown`](Self::shutdown).
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Closed` if the view is shut down before
    /// `predicate` holds.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ViewState) -> bool,
    ) -> ViewResult<ViewState> {
        let mut rx = self.subscribe();
        let mut closed = self.closed.subscribe();
        tokio::select! {
            biased;
            state = rx.wait_for(predicate) => {
                Ok(state.map_err(|_| ViewError::Closed)?.clone())
            }
            _ = closed.wait_for(|closed| *closed) => Err(ViewError::Closed),
        }
    }

    /// Waits until neither the tree nor the user list is loading
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Closed` if the view is shut down first.
    pub async fn wait_until_loaded(&self) -> ViewResult<ViewState> {
        self.wait_for(ViewState::is_loaded).await
    }

    /// Waits until nothing is loading, protocols included
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Closed` if the view is shut down first.
    pub async fn wait_until_settled(&self) -> ViewResult<ViewState> {
        self.wait_for(ViewState::is_settled).await
    }

    /// Re-requests the connection group tree after a failure
    ///
    /// Returns false unless the tree load had failed.
    pub fn retry_connections(&self) -> bool {
        let restarted = self.loader.state.send_if_modified(|s| {
            if s.connections_state().is_failed() {
                s.set_connections_state(LoadState::Loading);
                true
            } else {
                false
            }
        });
        if restarted {
            let loader = self.loader.clone();
            self.spawn(async move {
                let _ = loader.load_connections().await;
            });
        }
        restarted
    }

    /// Re-requests the user list after a failure
    ///
    /// Returns false unless the user load had failed.
    pub fn retry_users(&self) -> bool {
        let restarted = self.loader.state.send_if_modified(|s| {
            if s.users_state().is_failed() {
                s.set_users_state(LoadState::Loading);
                true
            } else {
                false
            }
        });
        if restarted {
            let loader = self.loader.clone();
            self.spawn(async move {
                let _ = loader.load_users().await;
            });
        }
        restarted
    }

    /// Re-requests protocol metadata after a failure
    ///
    /// Returns false unless the protocol load had failed.
    pub fn retry_protocols(&self) -> bool {
        let restarted = self.loader.state.send_if_modified(|s| {
            if s.protocols_state().is_failed() {
                s.set_protocols_state(LoadState::Loading);
                true
            } else {
                false
            }
        });
        if restarted {
            let loader = self.loader.clone();
            self.spawn(async move {
                let _ = loader.load_protocols().await;
            });
        }
        restarted
    }

    /// Opens the connection editor for an existing connection
    pub async fn edit_connection(&self, connection: Connection) -> EditOutcome<Connection> {
        let request = {
            let state = self.loader.state.borrow();
            ConnectionEditRequest {
                connection,
                protocols: state.protocols().clone(),
                root_group: state.root_group().cloned(),
            }
        };
        let outcome = self.surface.edit_connection(request).await;
        if outcome.is_committed() {
            self.refresh_connections().await;
        }
        outcome
    }

    /// Opens the connection editor for a new connection
    pub async fn new_connection(&self) -> EditOutcome<Connection> {
        self.edit_connection(Connection::default()).await
    }

    /// Opens the group editor for an existing connection group
    pub async fn edit_connection_group(
        &self,
        connection_group: ConnectionGroup,
    ) -> EditOutcome<ConnectionGroup> {
        let request = ConnectionGroupEditRequest {
            connection_group,
            root_group: self.loader.state.borrow().root_group().cloned(),
        };
        let outcome = self.surface.edit_connection_group(request).await;
        if outcome.is_committed() {
            self.refresh_connections().await;
        }
        outcome
    }

    /// Opens the group editor for a new connection group
    pub async fn new_connection_group(&self) -> EditOutcome<ConnectionGroup> {
        self.edit_connection_group(ConnectionGroup::default()).await
    }

    /// Opens the user editor and applies its outcome to the user list
    ///
    /// A saved user replaces the entry with the same username; a deleted
    /// user is removed with [`remove_user`](Self::remove_user).
    pub async fn edit_user(&self, user: User) -> EditOutcome<User> {
        let request = UserEditRequest {
            user,
            root_group: self.loader.state.borrow().root_group().cloned(),
        };
        let outcome = self.surface.edit_user(request).await;
        match &outcome {
            EditOutcome::Cancelled => {}
            EditOutcome::Saved(saved) => {
                let saved = saved.clone();
                self.loader
                    .state
                    .send_if_modified(|s| replace_by_username(s.users_mut(), saved));
            }
            EditOutcome::Deleted(deleted) => {
                self.remove_user(deleted);
            }
        }
        outcome
    }

    /// Removes the first user whose username matches `user`
    ///
    /// Does nothing if no user matches. Returns the removed record.
    pub fn remove_user(&self, user: &User) -> Option<User> {
        let mut removed = None;
        self.loader.state.send_if_modified(|s| {
            removed = remove_first_by_username(s.users_mut(), &user.username);
            removed.is_some()
        });
        removed
    }

    /// Sets the "new username" input
    pub fn set_new_username(&self, username: impl Into<String>) {
        let username = username.into();
        self.loader
            .state
            .send_modify(|s| s.set_new_username(username));
    }

    /// Creates a user from the "new username" input
    ///
    /// An empty input is ignored and `Ok(None)` is returned. Otherwise the
    /// input is cleared as soon as the request is issued, and the locally
    /// built record is appended to the user list once the server confirms.
    /// The request runs as a view task, so dropping the returned future
    /// does not lose the username: the outcome is still applied.
    ///
    /// # Errors
    ///
    /// Returns the API error if creation fails. The username is put back
    /// into the input unless something new has been typed meanwhile.
    /// Returns `ApiError::Unavailable` if the view is shut down first.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub async fn new_user(&self) -> ApiResult<Option<User>> {
        let mut username = String::new();
        self.loader.state.send_if_modified(|s| {
            username = s.take_new_username();
            !username.is_empty()
        });
        if username.is_empty() {
            return Ok(None);
        }

        let span = info_span!(span_names::VIEW_CREATE_USER);
        let creating = self
            .spawn(self.loader.clone().create_user(User::new(username)).instrument(span));
        match creating.await {
            Ok(created) => created.map(Some),
            Err(e) => {
                debug!(error = %e, "User creation task ended early");
                Err(ApiError::Unavailable("admin view was shut down".into()))
            }
        }
    }

    /// Aborts every request still in flight
    ///
    /// The current state is kept. Pending and later waits that are not yet
    /// satisfied end with `ViewError::Closed`.
    pub fn shutdown(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        for task in tasks.drain(..) {
            task.abort();
        }
        self.closed.send_replace(true);
    }

    /// Re-fetches the tree after a committed edit
    ///
    /// Skipped while the initial load is pending so the tree never settles
    /// before the permission signal.
    async fn refresh_connections(&self) {
        if self.loader.state.borrow().is_loading_connections() {
            return;
        }
        let _ = self.loader.load_connections().await;
    }

    fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle.abort_handle());
        handle
    }
}

impl Drop for AdminViewCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for AdminViewCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminViewCoordinator")
            .field("state", &*self.loader.state.borrow())
            .field("activated", &self.activated.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
