use legalease_core::routing::{ReturnPolicy, DEFAULT_POST_LOGIN_PATH};
use legalease_core::upload::MAX_UPLOAD_BYTES;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BackendSettings {
    /// Base URL of the document-analysis API, e.g. `http://localhost:8000`.
    pub url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SessionSettings {
    /// Mark the session cookie `Secure`. Enable behind HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
    #[serde(default = "default_inactivity_hours")]
    pub inactivity_hours: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secure_cookie: false,
            inactivity_hours: default_inactivity_hours(),
        }
    }
}

fn default_inactivity_hours() -> i64 {
    24
}

#[derive(Deserialize, Clone, Debug)]
pub struct UploadSettings {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_max_bytes() -> usize {
    MAX_UPLOAD_BYTES
}

#[derive(Deserialize, Clone, Debug)]
pub struct NavigationSettings {
    /// Landing page after login when no return path applies.
    #[serde(default = "default_post_login_path")]
    pub post_login_path: String,
    #[serde(default)]
    pub return_policy: ReturnPolicy,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            post_login_path: default_post_login_path(),
            return_policy: ReturnPolicy::default(),
        }
    }
}

fn default_post_login_path() -> String {
    DEFAULT_POST_LOGIN_PATH.to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC collector; tracing stays local when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Defaults for everything except where the backend lives.
    pub fn with_backend(url: impl Into<String>) -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            backend: BackendSettings { url: url.into() },
            session: SessionSettings::default(),
            upload: UploadSettings::default(),
            navigation: NavigationSettings::default(),
            telemetry: TelemetrySettings::default(),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    // Run either from the workspace root or from the crate directory.
    let configuration_directory = if base_path.ends_with("legalease-web") {
        base_path.join("config")
    } else {
        base_path.join("legalease-web").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
