use std::{
    net::{IpAddr, SocketAddr},
    process::ExitCode,
    time::Duration,
};

use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;

use cashbook::{
    AppState, DeadlineStore, MemoryStore, SqliteStore, add_tracing_layer, build_router,
    graceful_shutdown, setup_logging,
};

/// The REST API server for cashbook.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "CASHBOOK_DB_PATH", default_value = "cashbook.db")]
    db_path: String,

    /// Keep all data in memory instead of in a database file.
    #[arg(long, env = "CASHBOOK_IN_MEMORY")]
    in_memory: bool,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// The address to bind the server to.
    #[arg(long, env = "CASHBOOK_ADDRESS", default_value = "127.0.0.1")]
    address: IpAddr,

    /// How long a single store call may take, in milliseconds.
    #[arg(long, env = "CASHBOOK_STORE_TIMEOUT_MS", default_value_t = 5000)]
    store_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();
    let deadline = Duration::from_millis(args.store_timeout_ms);

    let state = if args.in_memory {
        tracing::info!("Using the in-memory store");
        AppState::new(DeadlineStore::new(MemoryStore::new(), deadline))
    } else {
        match open_sqlite_store(&args.db_path) {
            Ok(store) => AppState::new(DeadlineStore::new(store, deadline)),
            Err(error) => {
                tracing::error!("Could not open the database {}: {error}", args.db_path);
                return ExitCode::FAILURE;
            }
        }
    };

    let addr = SocketAddr::new(args.address, args.port);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn open_sqlite_store(db_path: &str) -> Result<SqliteStore, Box<dyn std::error::Error>> {
    let connection = Connection::open(db_path)?;

    Ok(SqliteStore::new(connection)?)
}
