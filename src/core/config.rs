use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub map: MapConfig,
    pub refresh: RefreshConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    /// Mark the token and session cookies `Secure`
    pub secure_cookies: bool,
}

/// REST backend the web front talks to
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    /// Base URL browsers use for uploaded images (defaults to `base_url`)
    pub public_url: String,
    /// Per-request timeout; none unless configured
    pub timeout: Option<Duration>,
}

/// Map rendering capabilities
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Load the Leaflet widget in the browser
    pub widget_enabled: bool,
    /// Google Static Maps key; static images are used only when set
    pub google_maps_api_key: Option<String>,
    /// Allow the OpenStreetMap embed iframe
    pub embed_enabled: bool,
}

/// Browser-side polling
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub interval: Duration,
    pub geolocation_timeout: Duration,
}

/// In-memory view sessions
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub idle_ttl: Duration,
    pub prune_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            map: MapConfig::from_env()?,
            refresh: RefreshConfig::from_env()?,
            session: SessionConfig::from_env()?,
        })
    }
}

fn parse_bool(name: &str, default: bool) -> Result<bool, String> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(format!("{} must be true or false", name)),
        },
        Err(_) => Ok(default),
    }
}

fn parse_u64(name: &str, default: u64) -> Result<u64, String> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .map_err(|_| format!("{} must be a valid number", name))
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 25 * 1024 * 1024; // 25MB, report photos

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let secure_cookies = parse_bool("SECURE_COOKIES", false)?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            secure_cookies,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err("BACKEND_URL must be an http(s) URL".to_string());
        }

        let public_url = env::var("BACKEND_PUBLIC_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| base_url.clone());

        let timeout = match env::var("BACKEND_TIMEOUT_SECS").ok().filter(|s| !s.is_empty()) {
            Some(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                "BACKEND_TIMEOUT_SECS must be a valid number".to_string()
            })?)),
            None => None,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            public_url: public_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }
}

impl MapConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            widget_enabled: parse_bool("MAP_WIDGET_ENABLED", true)?,
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            embed_enabled: parse_bool("MAP_EMBED_ENABLED", true)?,
        })
    }
}

impl RefreshConfig {
    const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
    const DEFAULT_GEOLOCATION_TIMEOUT_MS: u64 = 5000;

    pub fn from_env() -> Result<Self, String> {
        let interval_secs = parse_u64(
            "REFRESH_INTERVAL_SECS",
            Self::DEFAULT_REFRESH_INTERVAL_SECS,
        )?;
        if interval_secs == 0 {
            return Err("REFRESH_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            geolocation_timeout: Duration::from_millis(parse_u64(
                "GEOLOCATION_TIMEOUT_MS",
                Self::DEFAULT_GEOLOCATION_TIMEOUT_MS,
            )?),
        })
    }
}

impl SessionConfig {
    const DEFAULT_IDLE_TTL_SECS: u64 = 2 * 60 * 60; // 2 hours
    const DEFAULT_PRUNE_INTERVAL_SECS: u64 = 5 * 60; // 5 minutes

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            idle_ttl: Duration::from_secs(parse_u64(
                "SESSION_IDLE_TTL_SECS",
                Self::DEFAULT_IDLE_TTL_SECS,
            )?),
            prune_interval: Duration::from_secs(parse_u64(
                "SESSION_PRUNE_INTERVAL_SECS",
                Self::DEFAULT_PRUNE_INTERVAL_SECS,
            )?),
        })
    }
}
