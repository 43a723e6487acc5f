use std::env;
use std::path::PathBuf;

/// Secret used to sign sessions when `AUTH_SECRET` is unset outside production.
const DEV_AUTH_SECRET: &str = "waenweb-dev-auth-secret";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 30;
const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";

/// Process configuration read from the environment (after `.env` is loaded).
///
/// | Env Var                 | Required   | Default                            |
/// |-------------------------|------------|------------------------------------|
/// | `DATABASE_URL`          | **yes**    | --                                 |
/// | `APP_ENV`               | no         | `development`                      |
/// | `PORT`                  | no         | `8080`                             |
/// | `AUTH_SECRET`           | production | dev fallback                       |
/// | `SESSION_TTL_HOURS`     | no         | `720`                              |
/// | `SEED_TOKEN`            | no         | unset                              |
/// | `BLOB_READ_WRITE_TOKEN` | no         | unset                              |
/// | `BLOB_API_URL`          | no         | `https://blob.vercel-storage.com`  |
/// | `FRONTEND_DIR`          | no         | unset                              |
/// | `RUN_MIGRATIONS`        | no         | `true`                             |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub environment: Environment,
    pub port: u16,
    pub auth_secret: String,
    pub session_ttl_hours: i64,
    pub seed_token: Option<String>,
    pub blob_token: Option<String>,
    pub blob_api_url: String,
    pub frontend_dir: Option<PathBuf>,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is unset, if `AUTH_SECRET` is unset in
    /// production, or if a numeric variable does not parse.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let environment = Environment::parse(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let port: u16 = env::var("PORT")
            .map(|p| p.parse().expect("PORT must be a valid u16"))
            .unwrap_or(DEFAULT_PORT);

        let auth_secret = match (non_empty_var("AUTH_SECRET"), environment) {
            (Some(secret), _) => secret,
            (None, Environment::Production) => panic!("AUTH_SECRET must be set in production"),
            (None, Environment::Development) => {
                tracing::warn!("AUTH_SECRET not set, using the development secret");
                DEV_AUTH_SECRET.to_string()
            }
        };

        let session_ttl_hours: i64 = env::var("SESSION_TTL_HOURS")
            .map(|h| h.parse().expect("SESSION_TTL_HOURS must be a valid i64"))
            .unwrap_or(DEFAULT_SESSION_TTL_HOURS);

        let run_migrations = env::var("RUN_MIGRATIONS")
            .map(|v| !matches!(v.as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            database_url,
            environment,
            port,
            auth_secret,
            session_ttl_hours,
            seed_token: non_empty_var("SEED_TOKEN"),
            blob_token: non_empty_var("BLOB_READ_WRITE_TOKEN"),
            blob_api_url: non_empty_var("BLOB_API_URL")
                .unwrap_or_else(|| DEFAULT_BLOB_API_URL.to_string()),
            frontend_dir: non_empty_var("FRONTEND_DIR").map(PathBuf::from),
            run_migrations,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Settings the seed endpoint needs at request time.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub production: bool,
    pub token: Option<String>,
}

impl From<&AppConfig> for SeedConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            production: config.is_production(),
            token: config.seed_token.clone(),
        }
    }
}
