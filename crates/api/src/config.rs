//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use geocoder::GeocoderConfig;
use mailer::MailerConfig;
use secrecy::SecretString;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// HS256 secret shared with the identity provider.
    pub jwt_secret: SecretString,
    /// Directory avatar images are written to.
    pub upload_dir: PathBuf,
    /// Reverse-geocoding client settings.
    pub geocoder: GeocoderConfig,
    /// SMTP settings; lifecycle email is disabled when absent.
    pub mailer: Option<MailerConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `API_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:agentwaala.db?mode=rwc` |
    /// | `AUTH_JWT_SECRET` | Token signing secret | (required) |
    /// | `UPLOAD_DIR` | Avatar storage directory | `uploads` |
    /// | `GEOCODER_BASE_URL` | Reverse-geocoding service | BigDataCloud |
    /// | `GEOCODER_TIMEOUT_SECS` | Geocoding timeout | `10` |
    /// | `SMTP_HOST` ... | See `MailerConfig::from_env` | (email disabled) |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("API_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:agentwaala.db?mode=rwc".to_string());

        let jwt_secret = env::var("AUTH_JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::from)
            .ok_or(ConfigError::MissingJwtSecret)?;

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let geocoder = GeocoderConfig::from_env()?;

        let mailer = match env::var("SMTP_HOST") {
            Ok(_) => Some(MailerConfig::from_env()?),
            Err(_) => None,
        };

        Ok(Self {
            addr,
            database_url,
            jwt_secret,
            upload_dir,
            geocoder,
            mailer,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API_ADDR format")]
    InvalidAddr,

    #[error("AUTH_JWT_SECRET environment variable is required")]
    MissingJwtSecret,

    #[error(transparent)]
    Geocoder(#[from] geocoder::GeocodeError),

    #[error(transparent)]
    Mailer(#[from] mailer::MailerError),
}
