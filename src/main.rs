//! A terminal user interface for user directory administration.

mod app;
mod config;
mod directory;
mod error;
mod events;
mod form;
mod state;
mod ui;
mod utils;

use app::App;
use clap::{App as CliApp, Arg};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = CliApp::new("userdeck-tui")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A terminal user interface for user directory administration")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIRECTORY")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    App::start(config).await
}
