//! Interactive console for the shared frontend configuration.
//!
//! Starts from a preset, applies command-line overrides, then reads
//! `get`/`set`/`watch` commands from stdin until `quit` or end of input.

use shared_config::{
    cli::Cli,
    console::{self, Console},
    store::SharedConfigStore,
};
use tokio::io::{self, BufReader};
use tracing::{Level, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let args: Cli = argh::from_env();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let store: SharedConfigStore = args.build_store();
    info!("Starting from the {} preset", store.preset());
    info!("Configuration:\n{}", console::banner(&store));
    info!("Type 'help' for commands");

    let mut console = Console::new(store);
    console.run(BufReader::new(io::stdin()), io::stdout()).await?;

    info!("Console closed");
    Ok(())
}
