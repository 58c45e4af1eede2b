//! src/configuration.rs
use config::{Config, ConfigError, File};
use secrecy::Secret;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub email: EmailSettings,
    #[serde(default)]
    pub courses: Vec<CourseSettings>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    /// Public address of the service, used for links in outgoing emails.
    pub base_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    /// Drop every booking and course before seeding.
    #[serde(default)]
    pub reset_on_startup: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EmailSettings {
    pub sender_email: String,
    pub sender_name: String,
    pub owner_email: Option<String>,
    pub outbox_dir: PathBuf,
    pub smtp: Option<SmtpSettings>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<Secret<String>>,
}

fn default_smtp_port() -> u16 {
    587
}

/// Sender and owner overrides read straight from the process environment.
#[derive(Deserialize, Debug, Default)]
struct MailEnvironment {
    from_email: Option<String>,
    from_name: Option<String>,
    owner_email: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CourseSettings {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub total_seats: i64,
    pub schedule: Option<ScheduleSettings>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScheduleSettings {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(PartialEq)]
pub enum Environment {
    Local,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_ref() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                s
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if not specified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    // A missing .env file is fine, the variables may already be exported.
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(true))
        // e.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;
    apply_mail_environment(&mut settings.email)?;

    Ok(settings)
}

/// Layers `SMTP_*`, `FROM_EMAIL`, `FROM_NAME` and `OWNER_EMAIL` over the
/// file-based email settings.
fn apply_mail_environment(email: &mut EmailSettings) -> Result<(), ConfigError> {
    match envy::prefixed("SMTP_").from_env::<SmtpSettings>() {
        Ok(smtp) if !smtp.host.trim().is_empty() => email.smtp = Some(smtp),
        Ok(_) | Err(envy::Error::MissingValue(_)) => {}
        Err(e) => {
            return Err(ConfigError::Message(format!(
                "Failed to parse SMTP settings from environment: {}",
                e
            )))
        }
    }

    let overrides = envy::from_env::<MailEnvironment>().map_err(|e| {
        ConfigError::Message(format!("Failed to parse email settings from environment: {}", e))
    })?;
    if let Some(from_email) = overrides.from_email {
        email.sender_email = from_email;
    }
    if let Some(from_name) = overrides.from_name {
        email.sender_name = from_name;
    }
    if overrides.owner_email.is_some() {
        email.owner_email = overrides.owner_email;
    }

    Ok(())
}
