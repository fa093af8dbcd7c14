use crate::events::network::Event as NetworkEvent;
use crate::form::Submission;
use crate::state::{FormBinding, State, View};
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::sync::Arc;
use std::{sync::mpsc, thread, time::Duration};
use tokio::sync::Mutex;

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                if let Ok(CrosstermEvent::Key(key)) = event::read() {
                    if tx_clone.send(Event::Input(key)).is_err() {
                        break;
                    }
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub async fn handle_next(&self, state: &Arc<Mutex<State>>) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => {
                let mut state = state.lock().await;
                handle_key(key, &mut state).await
            }
            Event::Tick => {
                let mut state = state.lock().await;
                if state.is_loading() {
                    state.advance_spinner();
                }
                Ok(true)
            }
        }
    }
}

/// Route a key press by the current view. Returns false when exit was
/// requested.
///
async fn handle_key(key: KeyEvent, state: &mut State) -> Result<bool> {
    if key.kind == KeyEventKind::Release {
        return Ok(true);
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return Ok(false);
    }

    // An open delete confirmation captures input on any view.
    if state.delete_confirmation().is_some() {
        handle_delete_confirmation_key(key, state);
        return Ok(true);
    }

    match state.current_view().clone() {
        View::Login => handle_login_key(key, state).await,
        View::Register => handle_register_key(key, state).await,
        View::Users => handle_users_key(key, state),
        View::UserDetail => handle_user_detail_key(key, state),
        View::CreateUser | View::EditUser => handle_user_form_key(key, state).await,
        View::DebugLog => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                state.pop_view();
            }
            Ok(true)
        }
    }
}

/// Run a form submission to completion. A validation rejection is terminal
/// feedback, not a failure; handler failures bubble up to the caller.
///
async fn submit_form(form: &mut FormBinding) -> Result<()> {
    match form.submit() {
        Submission::Pending(outcome) => outcome.await,
        Submission::Rejected => {
            debug!("Form submission rejected by validation");
            Ok(())
        }
    }
}

fn handle_delete_confirmation_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(id) = state.delete_confirmation() {
                state.cancel_delete();
                state.dispatch(NetworkEvent::DeleteUser { id });
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.cancel_delete(),
        _ => {}
    }
}

async fn handle_login_key(key: KeyEvent, state: &mut State) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            state.clear_notices();
            submit_form(state.login_form_mut()).await?;
        }
        KeyCode::Tab | KeyCode::Down => state.login_form_mut().focus_next(),
        KeyCode::BackTab | KeyCode::Up => state.login_form_mut().focus_prev(),
        KeyCode::Backspace => state.login_form_mut().delete_char(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.clear_notices();
            state.push_view(View::Register);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.login_form_mut().insert_char(c)
        }
        _ => {}
    }
    Ok(true)
}

async fn handle_register_key(key: KeyEvent, state: &mut State) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            state.clear_notices();
            submit_form(state.register_form_mut()).await?;
        }
        KeyCode::Tab | KeyCode::Down => state.register_form_mut().focus_next(),
        KeyCode::BackTab | KeyCode::Up => state.register_form_mut().focus_prev(),
        KeyCode::Backspace => state.register_form_mut().delete_char(),
        KeyCode::Esc => {
            state.clear_notices();
            state.pop_view();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.register_form_mut().insert_char(c)
        }
        _ => {}
    }
    Ok(true)
}

fn handle_users_key(key: KeyEvent, state: &mut State) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Down | KeyCode::Char('j') => state.select_next_user(),
        KeyCode::Up | KeyCode::Char('k') => state.select_previous_user(),
        KeyCode::Enter => {
            if let Some(id) = state.selected_user().map(|user| user.id) {
                state.clear_current_user();
                state.dispatch(NetworkEvent::FetchUser { id });
                state.push_view(View::UserDetail);
            }
        }
        KeyCode::Char('n') => {
            state.clear_notices();
            state.open_create_user_form();
            state.push_view(View::CreateUser);
        }
        KeyCode::Char('e') => {
            if let Some(user) = state.selected_user().cloned() {
                state.clear_notices();
                state.open_edit_user_form(&user);
                state.push_view(View::EditUser);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = state.selected_user().map(|user| user.id) {
                state.request_delete(id);
            }
        }
        KeyCode::Char('r') => state.dispatch(NetworkEvent::FetchUsers),
        KeyCode::Char('L') => state.log_out(),
        KeyCode::Char('D') => state.push_view(View::DebugLog),
        _ => {}
    }
    Ok(true)
}

fn handle_user_detail_key(key: KeyEvent, state: &mut State) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.clear_current_user();
            state.pop_view();
        }
        KeyCode::Char('e') => {
            if let Some(user) = state.current_user().cloned() {
                state.clear_notices();
                state.open_edit_user_form(&user);
                state.push_view(View::EditUser);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = state.current_user().map(|user| user.id) {
                state.request_delete(id);
            }
        }
        KeyCode::Char('y') => {
            if let Some(email) = state.current_user().map(|user| user.email.clone()) {
                copy_to_clipboard(&email);
            }
        }
        KeyCode::Char('D') => state.push_view(View::DebugLog),
        _ => {}
    }
    Ok(true)
}

async fn handle_user_form_key(key: KeyEvent, state: &mut State) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            state.close_user_form();
            state.pop_view();
        }
        KeyCode::Enter => {
            state.clear_notices();
            if let Some(form) = state.user_form_mut() {
                submit_form(form).await?;
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = state.user_form_mut() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = state.user_form_mut() {
                form.focus_prev();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = state.user_form_mut() {
                form.delete_char();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(form) = state.user_form_mut() {
                form.insert_char(c);
            }
        }
        _ => {}
    }
    Ok(true)
}

fn copy_to_clipboard(text: &str) {
    let context: Result<ClipboardContext, _> = ClipboardProvider::new();
    match context {
        Ok(mut context) => match context.set_contents(text.to_owned()) {
            Ok(_) => info!("Email address copied to clipboard"),
            Err(e) => warn!("Failed to copy to clipboard: {}", e),
        },
        Err(e) => warn!("Failed to initialize clipboard: {}", e),
    }
}
