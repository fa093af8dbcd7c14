use crate::directory::{Directory, DirectoryError, UserPayload};
use crate::state::{State, View};
use anyhow::Result;
use log::*;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Clone)]
pub enum Event {
    LogIn {
        username: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    FetchUsers,
    FetchUser {
        id: i64,
    },
    CreateUser {
        user: UserPayload,
    },
    UpdateUser {
        id: i64,
        user: UserPayload,
    },
    DeleteUser {
        id: i64,
    },
}

/// Passwords never reach the log output.
impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::LogIn { username, .. } => write!(f, "LogIn {{ username: {:?} }}", username),
            Event::Register {
                username, email, ..
            } => write!(
                f,
                "Register {{ username: {:?}, email: {:?} }}",
                username, email
            ),
            Event::FetchUsers => write!(f, "FetchUsers"),
            Event::FetchUser { id } => write!(f, "FetchUser {{ id: {} }}", id),
            Event::CreateUser { user } => {
                write!(f, "CreateUser {{ username: {:?} }}", user.username)
            }
            Event::UpdateUser { id, .. } => write!(f, "UpdateUser {{ id: {} }}", id),
            Event::DeleteUser { id } => write!(f, "DeleteUser {{ id: {} }}", id),
        }
    }
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    directory: &'a mut Directory,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, directory: &'a mut Directory) -> Self {
        Handler { state, directory }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::LogIn { username, password } => self.log_in(username, password).await?,
            Event::Register {
                username,
                email,
                password,
            } => self.register(username, email, password).await?,
            Event::FetchUsers => self.fetch_users().await?,
            Event::FetchUser { id } => self.fetch_user(id).await?,
            Event::CreateUser { user } => self.create_user(user).await?,
            Event::UpdateUser { id, user } => self.update_user(id, user).await?,
            Event::DeleteUser { id } => self.delete_user(id).await?,
        }
        Ok(())
    }

    /// Record a failed directory request in state. A rejected session drops
    /// the user back to the login view.
    ///
    async fn apply_error(&self, error: DirectoryError) {
        let mut state = self.state.lock().await;
        match error {
            DirectoryError::Unauthorized => {
                warn!("Session rejected by the directory API; returning to login");
                state.log_out();
                state.set_api_error("Session expired. Please log in again.".to_string());
            }
            e => {
                error!("Directory request failed: {}", e);
                state.set_api_error(e.to_string());
            }
        }
    }

    /// Authenticate, store the session, and load the user list.
    ///
    async fn log_in(&mut self, username: String, password: String) -> Result<()> {
        info!("Authenticating with the directory API...");
        self.state.lock().await.begin_loading();
        let result = self.directory.log_in(&username, &password).await;
        {
            let mut state = self.state.lock().await;
            state.end_loading();
            match result {
                Ok(session) => {
                    state.set_session(session);
                    state.clear_notices();
                    state.reset_views(View::Users);
                    state.login_form_mut().reset();
                    state.request_config_save();
                }
                Err(DirectoryError::Unauthorized) => {
                    state.set_api_error("Invalid username or password".to_string());
                    return Ok(());
                }
                Err(e) => {
                    error!("Login failed: {}", e);
                    state.set_api_error(e.to_string());
                    return Ok(());
                }
            }
        }
        self.fetch_users().await
    }

    /// Create an account, then route to the login view to sign in with it.
    ///
    async fn register(&mut self, username: String, email: String, password: String) -> Result<()> {
        info!("Registering account '{}'...", username);
        self.state.lock().await.begin_loading();
        let result = self.directory.register(&username, &email, &password).await;
        let mut state = self.state.lock().await;
        state.end_loading();
        match result {
            Ok(session) => {
                state.register_form_mut().reset();
                state.reset_views(View::Login);
                state.set_flash(format!(
                    "Account '{}' created. Please log in.",
                    session.username
                ));
            }
            Err(DirectoryError::Unauthorized) => {
                state.set_api_error("Registration was not accepted".to_string());
            }
            Err(e) => {
                error!("Registration failed: {}", e);
                state.set_api_error(e.to_string());
            }
        }
        Ok(())
    }

    /// Update state with all user records.
    ///
    async fn fetch_users(&mut self) -> Result<()> {
        info!("Fetching user records...");
        self.state.lock().await.begin_loading();
        let result = self.directory.users().await;
        match result {
            Ok(users) => {
                let mut state = self.state.lock().await;
                state.end_loading();
                info!("Loaded {} user records.", users.len());
                state.set_users(users);
            }
            Err(e) => {
                self.state.lock().await.end_loading();
                self.apply_error(e).await;
            }
        }
        Ok(())
    }

    /// Update state with full details for one user record.
    ///
    async fn fetch_user(&mut self, id: i64) -> Result<()> {
        debug!("Fetching user record {}...", id);
        self.state.lock().await.begin_loading();
        let result = self.directory.user(id).await;
        match result {
            Ok(user) => {
                let mut state = self.state.lock().await;
                state.end_loading();
                state.set_current_user(user);
            }
            Err(e) => {
                self.state.lock().await.end_loading();
                self.apply_error(e).await;
            }
        }
        Ok(())
    }

    /// Create a user record, then return to the refreshed list.
    ///
    async fn create_user(&mut self, user: UserPayload) -> Result<()> {
        info!("Creating user record '{}'...", user.username);
        self.state.lock().await.begin_loading();
        let result = self.directory.create_user(&user).await;
        {
            let mut state = self.state.lock().await;
            state.end_loading();
            match result {
                Ok(created) => {
                    state.close_user_form();
                    state.reset_views(View::Users);
                    state.set_flash(format!("User '{}' created", created.username));
                }
                Err(e) => {
                    drop(state);
                    self.apply_error(e).await;
                    return Ok(());
                }
            }
        }
        self.fetch_users().await
    }

    /// Update a user record, then return to the refreshed list.
    ///
    async fn update_user(&mut self, id: i64, user: UserPayload) -> Result<()> {
        info!("Updating user record {}...", id);
        self.state.lock().await.begin_loading();
        let result = self.directory.update_user(id, &user).await;
        {
            let mut state = self.state.lock().await;
            state.end_loading();
            match result {
                Ok(updated) => {
                    state.close_user_form();
                    state.set_current_user(updated.clone());
                    state.reset_views(View::Users);
                    state.set_flash(format!("User '{}' updated", updated.username));
                }
                Err(e) => {
                    drop(state);
                    self.apply_error(e).await;
                    return Ok(());
                }
            }
        }
        self.fetch_users().await
    }

    /// Delete a user record, then refresh the list.
    ///
    async fn delete_user(&mut self, id: i64) -> Result<()> {
        info!("Deleting user record {}...", id);
        self.state.lock().await.begin_loading();
        let result = self.directory.delete_user(id).await;
        {
            let mut state = self.state.lock().await;
            state.end_loading();
            match result {
                Ok(()) => {
                    if state.current_user().map(|user| user.id) == Some(id) {
                        state.clear_current_user();
                        state.reset_views(View::Users);
                    }
                    state.set_flash(format!("User {} deleted", id));
                }
                Err(e) => {
                    drop(state);
                    self.apply_error(e).await;
                    return Ok(());
                }
            }
        }
        self.fetch_users().await
    }
}
