use crate::app::{ConfigSaveSender, NetworkEventSender};
use crate::directory::{Session, User};
use crate::events::network::Event as NetworkEvent;
use crate::ui::Theme;
use log::*;
use ratatui::widgets::ListState;

use super::forms::{self, FormBinding};
use super::navigation::View;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: NetworkEventSender,
    config_save_sender: ConfigSaveSender,
    session: Option<Session>,
    users: Vec<User>,
    users_list_state: ListState,
    current_user: Option<User>,
    view_stack: Vec<View>,
    spinner_index: usize,
    loading_count: usize,
    api_error: Option<String>,
    flash: Option<String>,
    delete_confirmation: Option<i64>,
    login_form: FormBinding,
    register_form: FormBinding,
    user_form: Option<FormBinding>,
    theme: Theme,
}

impl State {
    /// Return new instance wired to the network and config-save channels,
    /// starting at the user list when a session was restored and at the
    /// login view otherwise.
    ///
    pub fn new(
        net_sender: NetworkEventSender,
        config_save_sender: ConfigSaveSender,
        session: Option<Session>,
        theme: Theme,
    ) -> State {
        let login_form = forms::login_form(net_sender.clone());
        let register_form = forms::register_form(net_sender.clone());
        let initial_view = if session.is_some() {
            View::Users
        } else {
            View::Login
        };
        State {
            net_sender,
            config_save_sender,
            session,
            users: vec![],
            users_list_state: ListState::default(),
            current_user: None,
            view_stack: vec![initial_view],
            spinner_index: 0,
            loading_count: 0,
            api_error: None,
            flash: None,
            delete_confirmation: None,
            login_form,
            register_form,
            user_form: None,
            theme,
        }
    }

    /// Send a network event to the handler thread.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        debug!("Dispatching network event '{:?}'...", event);
        if let Err(e) = self.net_sender.send(event) {
            error!("Failed to dispatch network event: {}", e);
        }
    }

    /// Request an asynchronous save of the configuration file.
    ///
    pub fn request_config_save(&self) {
        if let Err(e) = self.config_save_sender.send(()) {
            error!("Failed to request config save: {}", e);
        }
    }

    // Navigation

    pub fn current_view(&self) -> &View {
        self.view_stack.last().unwrap_or(&View::Login)
    }

    pub fn push_view(&mut self, view: View) {
        self.view_stack.push(view);
    }

    pub fn pop_view(&mut self) {
        if self.view_stack.len() > 1 {
            self.view_stack.pop();
        }
    }

    /// Drop all stacked views and land on the given one.
    ///
    pub fn reset_views(&mut self, view: View) {
        self.view_stack = vec![view];
    }

    // Session

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Drop the session, wipe fetched records, reset the auth forms, and
    /// return to the login view. The cleared session is persisted.
    ///
    pub fn log_out(&mut self) {
        info!("Logging out...");
        self.session = None;
        self.users.clear();
        self.users_list_state = ListState::default();
        self.current_user = None;
        self.user_form = None;
        self.login_form.reset();
        self.register_form.reset();
        self.reset_views(View::Login);
        self.request_config_save();
    }

    // Users

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        if self.users_list_state.selected().is_none() && !users.is_empty() {
            self.users_list_state.select(Some(0));
        }
        if let Some(selected) = self.users_list_state.selected() {
            if selected >= users.len() {
                self.users_list_state.select(if users.is_empty() {
                    None
                } else {
                    Some(users.len() - 1)
                });
            }
        }
        self.users = users;
    }

    pub fn users_list_state(&mut self) -> &mut ListState {
        &mut self.users_list_state
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.users_list_state
            .selected()
            .and_then(|index| self.users.get(index))
    }

    pub fn select_next_user(&mut self) {
        if self.users.is_empty() {
            return;
        }
        let next = match self.users_list_state.selected() {
            Some(index) if index + 1 < self.users.len() => index + 1,
            Some(_) => 0,
            None => 0,
        };
        self.users_list_state.select(Some(next));
    }

    pub fn select_previous_user(&mut self) {
        if self.users.is_empty() {
            return;
        }
        let previous = match self.users_list_state.selected() {
            Some(0) | None => self.users.len() - 1,
            Some(index) => index - 1,
        };
        self.users_list_state.select(Some(previous));
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
    }

    pub fn clear_current_user(&mut self) {
        self.current_user = None;
    }

    // Loading and notices

    pub fn begin_loading(&mut self) {
        self.loading_count += 1;
    }

    pub fn end_loading(&mut self) {
        self.loading_count = self.loading_count.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.loading_count > 0
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_index = (self.spinner_index + 1) % crate::ui::SPINNER_FRAME_COUNT;
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }

    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    pub fn set_api_error(&mut self, message: String) {
        self.flash = None;
        self.api_error = Some(message);
    }

    pub fn flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    pub fn set_flash(&mut self, message: String) {
        self.api_error = None;
        self.flash = Some(message);
    }

    pub fn clear_notices(&mut self) {
        self.api_error = None;
        self.flash = None;
    }

    // Delete confirmation

    pub fn request_delete(&mut self, id: i64) {
        self.delete_confirmation = Some(id);
    }

    pub fn delete_confirmation(&self) -> Option<i64> {
        self.delete_confirmation
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirmation = None;
    }

    // Forms

    pub fn login_form(&self) -> &FormBinding {
        &self.login_form
    }

    pub fn login_form_mut(&mut self) -> &mut FormBinding {
        &mut self.login_form
    }

    pub fn register_form(&self) -> &FormBinding {
        &self.register_form
    }

    pub fn register_form_mut(&mut self) -> &mut FormBinding {
        &mut self.register_form
    }

    pub fn open_create_user_form(&mut self) {
        self.user_form = Some(forms::user_form(self.net_sender.clone(), None));
    }

    pub fn open_edit_user_form(&mut self, user: &User) {
        self.user_form = Some(forms::user_form(self.net_sender.clone(), Some(user)));
    }

    pub fn close_user_form(&mut self) {
        self.user_form = None;
    }

    pub fn user_form(&self) -> Option<&FormBinding> {
        self.user_form.as_ref()
    }

    pub fn user_form_mut(&mut self) -> Option<&mut FormBinding> {
        self.user_form.as_mut()
    }

    // Theme

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        let (net_sender, _) = std::sync::mpsc::channel();
        let (config_save_sender, _) = std::sync::mpsc::channel();
        State::new(net_sender, config_save_sender, None, Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn test_starts_at_login_without_session() {
        let state = State::default();
        assert_eq!(state.current_view(), &View::Login);
        assert!(!state.has_session());
    }

    #[test]
    fn test_view_stack_push_pop() {
        let mut state = State::default();
        state.push_view(View::Register);
        assert_eq!(state.current_view(), &View::Register);
        state.pop_view();
        assert_eq!(state.current_view(), &View::Login);
        // The last view never pops.
        state.pop_view();
        assert_eq!(state.current_view(), &View::Login);
    }

    #[test]
    fn test_user_selection_wraps() {
        let mut state = State::default();
        let users: Vec<User> = vec![Faker.fake(), Faker.fake(), Faker.fake()];
        state.set_users(users);
        assert_eq!(state.users_list_state().selected(), Some(0));

        state.select_previous_user();
        assert_eq!(state.users_list_state().selected(), Some(2));
        state.select_next_user();
        assert_eq!(state.users_list_state().selected(), Some(0));
        state.select_next_user();
        assert_eq!(state.users_list_state().selected(), Some(1));
        assert!(state.selected_user().is_some());
    }

    #[test]
    fn test_set_users_clamps_selection() {
        let mut state = State::default();
        state.set_users(vec![Faker.fake(), Faker.fake(), Faker.fake()]);
        state.select_previous_user(); // index 2
        state.set_users(vec![Faker.fake()]);
        assert_eq!(state.users_list_state().selected(), Some(0));
        state.set_users(vec![]);
        assert_eq!(state.users_list_state().selected(), None);
    }

    #[test]
    fn test_loading_counts_nested_operations() {
        let mut state = State::default();
        assert!(!state.is_loading());
        state.begin_loading();
        state.begin_loading();
        state.end_loading();
        assert!(state.is_loading());
        state.end_loading();
        assert!(!state.is_loading());
        state.end_loading();
        assert!(!state.is_loading());
    }

    #[test]
    fn test_notices_displace_each_other() {
        let mut state = State::default();
        state.set_api_error("boom".to_string());
        assert_eq!(state.api_error(), Some("boom"));
        state.set_flash("saved".to_string());
        assert!(state.api_error().is_none());
        assert_eq!(state.flash(), Some("saved"));
        state.clear_notices();
        assert!(state.flash().is_none());
    }

    #[test]
    fn test_delete_confirmation_lifecycle() {
        let mut state = State::default();
        state.request_delete(9);
        assert_eq!(state.delete_confirmation(), Some(9));
        state.cancel_delete();
        assert!(state.delete_confirmation().is_none());
    }

    #[test]
    fn test_log_out_clears_session_and_returns_to_login() {
        let mut state = State::default();
        state.set_session(Session {
            token: "t".to_string(),
            username: "ada".to_string(),
            email: None,
            logged_in_at: chrono::Utc::now(),
        });
        state.set_users(vec![Faker.fake()]);
        state.push_view(View::Users);
        state.open_create_user_form();

        state.log_out();
        assert!(!state.has_session());
        assert!(state.users().is_empty());
        assert!(state.user_form().is_none());
        assert_eq!(state.current_view(), &View::Login);
    }
}
