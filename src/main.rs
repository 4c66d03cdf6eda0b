use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;

use lurch::net::listener;
use lurch::server::ServerOptions;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    // clap prints help and exits when no subcommand is given
    let matches = cli::get_app().get_matches();

    match matches.subcommand() {
        // subcommand to inspect the derived address record
        ("show", Some(sub_matches)) => show(sub_matches),

        // subcommand to open a listener
        ("listen", Some(sub_matches)) => listen(cli::get_options(sub_matches)).await,

        // match exhaustion, this should not happen
        (sub_command, sub_matches) => panic!(
            "Unhandled subcommand '{}' with sub_matches {:?}",
            sub_command, sub_matches
        ),
    }
}

fn show(matches: &ArgMatches<'_>) -> Result<()> {
    let config = cli::get_config(matches, Arc::new(|| {})).context("invalid server parameters")?;

    let address = config.address();
    println!("family:   {}", address.family());
    println!("port:     {}", hex(&address.port_bytes()));
    println!("address:  {}", hex(&address.addr_bytes()));
    println!("sockaddr: {}", hex(&address.to_bytes()));
    println!("endpoint: {}", address.to_socket_addr());
    println!("backlog:  {}", config.backlog());

    Ok(())
}

async fn listen(options: ServerOptions) -> Result<()> {
    let config = options
        .build(Arc::new(|| log::info!("server launched")))
        .context("invalid server parameters")?;

    let _listener = listener::serve(&config)
        .await
        .with_context(|| format!("could not open listener on {}", config.address()))?;

    tokio::signal::ctrl_c().await?;
    log::info!("Shutting down");
    Ok(())
}

fn hex(data: &[u8]) -> String {
    data.iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}
