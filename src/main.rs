use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use recipe_api::auth::{self, Claims};
use recipe_api::config;
use recipe_api::db;
use recipe_api::routes::{build_router, AppState};

#[derive(Parser)]
#[command(name = "recipe-api")]
#[command(about = "Recipe management API server and admin tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to bind, overrides configuration")]
        port: Option<u16>,
    },

    #[command(about = "Create a user and print its id")]
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        name: String,
    },

    #[command(about = "Mint an access token for an existing user")]
    IssueToken {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::config();

    let pool = db::connect(&cfg.database.url, cfg.database.max_connections)
        .await
        .context("failed to open database")?;
    db::migrate(&pool).await.context("failed to run migrations")?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            let app = build_router(AppState { pool });
            let port = port.unwrap_or(cfg.server.port);
            let bind_addr = format!("0.0.0.0:{}", port);

            let listener = tokio::net::TcpListener::bind(&bind_addr)
                .await
                .with_context(|| format!("failed to bind {}", bind_addr))?;

            tracing::info!("recipe-api listening on http://{}", bind_addr);
            axum::serve(listener, app).await.context("server exited")?;
        }
        Commands::CreateUser { email, name } => {
            let user = db::users::create(&pool, &email, &name)
                .await
                .context("failed to create user")?;
            println!("{}", user.id);
        }
        Commands::IssueToken { email } => {
            let user = db::users::find_by_email(&pool, &email)
                .await
                .context("failed to look up user")?
                .with_context(|| format!("no user with email {}", email))?;
            let token = auth::issue_token(&Claims::new(user.id, user.email))?;
            println!("{}", token);
        }
    }

    Ok(())
}
