//! # tanrai
//!
//! `tanrai serve` runs the todo API; `list`, `add`, `toggle` and `delete`
//! drive the client controller against a running server and print the list.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tanrai_client::{HttpTodoApi, TodoApi, TodoApp, render};
use tanrai_core::logging::{LogFormat, bootstrap_subscriber, init_subscriber};
use tanrai_server::{ServerConfig, TodoServer};
use tanrai_settings::{DatabaseSettings, ServerSettings, TanraiSettings};
use tanrai_store::{ConnectionConfig, TodoStore};
use tracing::info;

/// Todo list API server and client.
#[derive(Parser, Debug)]
#[command(name = "tanrai", version, about = "Todo list API server and client")]
struct Cli {
    /// Settings file (default `~/.tanrai/settings.json`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API until Ctrl-C.
    Serve(ServeArgs),
    /// Print all todos.
    List(ClientArgs),
    /// Add a todo.
    Add {
        /// Todo text.
        text: String,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Flip a todo's completed flag.
    Toggle {
        /// Todo id.
        id: i64,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Delete a todo.
    Delete {
        /// Todo id.
        id: i64,
        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Host to bind.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (0 for auto-assign).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the `SQLite` database.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct ClientArgs {
    /// API base URL.
    #[arg(long)]
    url: Option<String>,
}

/// What a client subcommand does after loading the list.
#[derive(Debug, PartialEq, Eq)]
enum ClientOp {
    List,
    Add(String),
    Toggle(i64),
    Delete(i64),
}

impl Cli {
    /// Fold command-line flags into loaded settings. Flags win.
    fn apply_overrides(&self, settings: &mut TanraiSettings) {
        match &self.command {
            Command::Serve(args) => {
                if let Some(host) = &args.host {
                    settings.server.host.clone_from(host);
                }
                if let Some(port) = args.port {
                    settings.server.port = port;
                }
                if let Some(path) = &args.db_path {
                    settings.database.path = path.to_string_lossy().into_owned();
                }
            }
            Command::List(client)
            | Command::Add { client, .. }
            | Command::Toggle { client, .. }
            | Command::Delete { client, .. } => {
                if let Some(url) = &client.url {
                    settings.client.api_url.clone_from(url);
                }
            }
        }
    }

    fn client_op(&self) -> Option<ClientOp> {
        match &self.command {
            Command::Serve(_) => None,
            Command::List(_) => Some(ClientOp::List),
            Command::Add { text, .. } => Some(ClientOp::Add(text.clone())),
            Command::Toggle { id, .. } => Some(ClientOp::Toggle(*id)),
            Command::Delete { id, .. } => Some(ClientOp::Delete(*id)),
        }
    }
}

/// Expand a leading `~/` against `HOME`.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => Path::new(&home).join(rest),
        _ => PathBuf::from(path),
    }
}

fn connection_config(db: &DatabaseSettings) -> ConnectionConfig {
    ConnectionConfig {
        pool_size: db.pool_size,
        busy_timeout_ms: db.busy_timeout_ms,
        connection_timeout: Duration::from_millis(db.connection_timeout_ms),
    }
}

fn server_config(server: &ServerSettings) -> ServerConfig {
    ServerConfig {
        host: server.host.clone(),
        port: server.port,
        static_dir: server.static_dir.as_deref().map(expand_home),
    }
}

fn load_settings(path: Option<&Path>) -> Result<TanraiSettings> {
    match path {
        Some(path) => tanrai_settings::load_settings_from_path(path),
        None => tanrai_settings::load_settings(),
    }
    .context("Failed to load settings")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        load_settings(cli.config.as_deref())
    })?;
    cli.apply_overrides(&mut settings);

    let format = if settings.logging.json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_subscriber(&settings.logging.level, format);

    match cli.client_op() {
        None => serve(&settings).await,
        Some(op) => {
            let api = HttpTodoApi::with_timeout(
                settings.client.api_url.clone(),
                Duration::from_secs(u64::from(settings.client.timeout_secs)),
            );
            let app = TodoApp::new(api);
            let result = run_client(&app, op).await;
            print!("{}", render(&app, Utc::now()));
            result
        }
    }
}

async fn serve(settings: &TanraiSettings) -> Result<()> {
    let db_path = expand_home(&settings.database.path);
    let store = TodoStore::open(&db_path, &connection_config(&settings.database))
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let server = TodoServer::new(server_config(&settings.server), store);
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;
    info!(db = %db_path.display(), "Tanrai listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    info!("Shutting down...");
    server.shutdown().graceful_shutdown(handle, None).await;
    info!("Shutdown complete");
    Ok(())
}

/// Load the list, then perform `op`.
async fn run_client<A: TodoApi>(app: &TodoApp<A>, op: ClientOp) -> Result<()> {
    app.load().await.context("Failed to fetch todos")?;

    match op {
        ClientOp::List => {}
        ClientOp::Add(text) => {
            if text.trim().is_empty() {
                bail!("Todo text is required");
            }
            app.set_input(text);
            app.add().await.context("Failed to add todo")?;
        }
        ClientOp::Toggle(id) => {
            ensure_known(app, id)?;
            app.toggle(id).await.context("Failed to update todo")?;
        }
        ClientOp::Delete(id) => {
            ensure_known(app, id)?;
            app.delete(id).await.context("Failed to delete todo")?;
        }
    }
    Ok(())
}

fn ensure_known<A: TodoApi>(app: &TodoApp<A>, id: i64) -> Result<()> {
    if !app.todos().iter().any(|t| t.id == id) {
        bail!("Todo not found: {id}");
    }
    Ok(())
}
