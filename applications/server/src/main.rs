/// Spendwise Server - personal expense tracking API
use clap::{Parser, Subcommand};
use spendwise_core::{types::NewUser, ExpenseStore, UserStore};
use spendwise_server::{
    api, config::ServerConfig, services::AuthService, state::AppState, ExpenseService,
    IdentityResolver,
};
use spendwise_storage::SqliteStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spendwise-server")]
#[command(about = "Spendwise personal expense tracking server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SPENDWISE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spendwise_server=info,spendwise_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            name,
            email,
            password,
        } => {
            add_user(config, &name, &email, &password).await?;
        }
        Commands::ListUsers => {
            list_users(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Spendwise Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let store = open_store(&config).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(auth_service(&config));
    tracing::info!("Auth service initialized");

    let expense_store: Arc<dyn ExpenseStore> = store.clone();
    let user_store: Arc<dyn UserStore> = store;
    let resolver: Arc<dyn IdentityResolver> = auth_service.clone();

    let app_state = AppState::new(ExpenseService::new(expense_store), user_store, auth_service);
    let app = api::create_router(app_state, resolver);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn add_user(
    config: ServerConfig,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let auth_service = auth_service(&config);

    let password_hash = auth_service.hash_password(password)?;
    let user = store
        .create_user(NewUser::new(name, email, password_hash)?)
        .await?;

    println!("Created user {} <{}> ({})", user.name, user.email, user.id);
    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let users = store.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<Arc<SqliteStore>> {
    ensure_database_dir(&config.storage.database_url)?;

    let pool = spendwise_storage::create_pool(&config.storage.database_url).await?;
    spendwise_storage::run_migrations(&pool).await?;

    Ok(Arc::new(SqliteStore::new(pool)))
}

/// SQLite creates the file but not its parent directory
fn ensure_database_dir(database_url: &str) -> std::io::Result<()> {
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    match std::path::Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
