use clap::{Args as ClapArgs, Parser};
use pocket_recipe_core::domain::common::{DatabaseConfig, IdentityConfig, PocketRecipeConfig};
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(name = "pocket-recipe-api", version, about = "Pocket Recipe web API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub identity: IdentityArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(id = "server_host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(id = "server_port", long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Public origin of the site; the OAuth callback URL is built from it.
    #[arg(long = "site-url", env = "SITE_URL", default_value = "http://localhost:3000")]
    pub site_url: Url,

    /// Mark session cookies `Secure`. Enable behind HTTPS.
    #[arg(long = "secure-cookies", env = "SECURE_COOKIES")]
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    #[arg(id = "database_host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database_port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "postgres",
        hide_env_values = true
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "pocket_recipe")]
    pub name: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct IdentityArgs {
    #[arg(long = "supabase-url", env = "SUPABASE_URL")]
    pub supabase_url: String,

    #[arg(long = "supabase-anon-key", env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    /// Emit JSON log lines.
    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for PocketRecipeConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            identity: IdentityConfig {
                supabase_url: args.identity.supabase_url,
                supabase_anon_key: args.identity.supabase_anon_key,
                site_url: args.server.site_url.to_string(),
            },
        }
    }
}

/// Installs the global `tracing` subscriber.
pub fn init_logger(log: &LogArgs) {
    let filter = tracing_subscriber::EnvFilter::try_new(&log.filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
