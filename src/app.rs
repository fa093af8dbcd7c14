use crate::config::Config;
use crate::directory::{Directory, Session};
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::state::State;
use crate::ui;
use anyhow::Result;
use chrono::prelude::*;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;
pub type ConfigSaveSender = std::sync::mpsc::Sender<()>;
type ConfigSaveReceiver = std::sync::mpsc::Receiver<()>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        tui_logger::init_logger(LevelFilter::Debug)
            .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
        tui_logger::set_default_level(LevelFilter::Trace);

        info!("Starting application...");
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let (config_save_tx, config_save_rx) = std::sync::mpsc::channel::<()>();

        // A persisted token restores the session; its account details are
        // refreshed by the first authenticated request.
        let session = config.access_token.clone().map(|token| Session {
            token,
            username: config.username.clone().unwrap_or_default(),
            email: None,
            logged_in_at: Utc::now(),
        });
        let has_session = session.is_some();
        let theme = ui::Theme::by_name(&config.theme_name);

        let app = App {
            state: Arc::new(Mutex::new(State::new(
                tx.clone(),
                config_save_tx.clone(),
                session,
                theme,
            ))),
            config,
        };
        app.start_network(rx)?;
        app.start_config_saver(config_save_rx);
        if has_session {
            if let Err(e) = tx.send(NetworkEvent::FetchUsers) {
                error!("Failed to request initial user list: {}", e);
            }
        }
        app.start_ui().await?;

        // Save config on exit
        {
            let state = app.state.lock().await;
            let mut config = app.config.clone();
            sync_config_with_state(&mut config, &state);
            if let Err(e) = config.save() {
                error!("Failed to save config on exit: {}", e);
            }
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Start a thread to handle config save requests.
    ///
    fn start_config_saver(&self, receiver: ConfigSaveReceiver) {
        let state = Arc::clone(&self.state);
        let mut config = self.config.clone();
        std::thread::spawn(move || {
            while receiver.recv().is_ok() {
                if let Ok(state_guard) = state.try_lock() {
                    sync_config_with_state(&mut config, &state_guard);
                    if let Err(e) = config.save() {
                        error!("Failed to save config: {}", e);
                    }
                }
            }
        });
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let base_url = self.config.api_base_url.clone();
        let access_token = self.config.access_token.clone();
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async {
                    let mut directory = Directory::new(&base_url, access_token.as_deref());
                    let mut network_event_handler =
                        NetworkEventHandler::new(&cloned_state, &mut directory);
                    while let Ok(network_event) = net_receiver.recv() {
                        match network_event_handler.handle(network_event).await {
                            Ok(_) => (),
                            Err(e) => error!("Failed to handle network event: {}", e),
                        }
                    }
                })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            {
                let mut state = self.state.lock().await;
                terminal.draw(|frame| ui::render(frame, &mut state))?;
            }
            if !terminal_event_handler.handle_next(&self.state).await? {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Mirror the live session into the configuration before a save.
///
fn sync_config_with_state(config: &mut Config, state: &State) {
    match state.session() {
        Some(session) => {
            config.access_token = Some(session.token.clone());
            config.username = Some(session.username.clone());
        }
        None => {
            config.access_token = None;
            config.username = None;
        }
    }
}
