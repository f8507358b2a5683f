//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and an optional forecast seed
//! before starting the server.

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Starts from [`ServerConfig::from_env`] so environment values become
/// the prompt defaults, then delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Crime Prediction Server");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let seed: String = Input::new()
        .with_prompt("Forecast seed (blank for random)")
        .allow_empty(true)
        .default(
            defaults
                .forecast_seed
                .map(|s| s.to_string())
                .unwrap_or_default(),
        )
        .interact_text()
        .unwrap_or_default();

    let forecast_seed = match seed.trim() {
        "" => None,
        s => match s.parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                println!("Ignoring invalid seed '{s}'.");
                None
            }
        },
    };

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(ServerConfig {
        bind_addr,
        port,
        forecast_seed,
        static_dir: defaults.static_dir,
    })
    .await
}
