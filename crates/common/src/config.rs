//! Environment-sourced configuration.
//!
//! The worker reads its settings from the environment once at startup but
//! validates them per invocation: a missing database or Mailjet variable
//! fails the invocation that needed it (with an error enumerating which
//! parameters were present), not the whole process.

use sqlx::postgres::PgConnectOptions;

use crate::error::DispatchError;

/// Default queue list key, matching the queue the admin app publishes to.
const DEFAULT_QUEUE_NAME: &str = "notificationqueue";

/// Raw environment settings. Every value is optional at this stage; the
/// typed accessors below decide what is required for which operation.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<String>,
    pub mailjet_api_key: Option<String>,
    pub mailjet_api_secret: Option<String>,
    pub mailjet_url: Option<String>,
    pub queue_url: Option<String>,
    pub queue_name: String,
}

/// Validated database connection parameters.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
}

/// Validated Mailjet API credentials.
#[derive(Debug, Clone)]
pub struct MailjetSettings {
    pub api_key: String,
    pub api_secret: String,
    pub url: String,
}

/// Validated queue connection parameters for the consumer loop.
#[derive(Debug, Clone)]
pub struct QueueSettings {
    pub url: String,
    pub name: String,
}

impl Settings {
    /// Load raw settings from the environment (and a `.env` file if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            db_name: env_opt("dbName"),
            db_user: env_opt("dbUser"),
            db_password: env_opt("dbPassword"),
            db_host: env_opt("dbHost"),
            db_port: env_opt("dbPort"),
            mailjet_api_key: env_opt("mailjetApiKey"),
            mailjet_api_secret: env_opt("mailjetApiSecret"),
            mailjet_url: env_opt("mailjetUrl"),
            queue_url: env_opt("queueUrl"),
            queue_name: env_opt("queueName").unwrap_or_else(|| DEFAULT_QUEUE_NAME.to_string()),
        }
    }

    /// Database parameters, all five required.
    ///
    /// The error message enumerates every parameter as its value or `None`;
    /// the password is reported only as present (`xxx`) or absent.
    pub fn database(&self) -> Result<DatabaseSettings, DispatchError> {
        match (
            present(&self.db_name),
            present(&self.db_user),
            present(&self.db_password),
            present(&self.db_host),
            present(&self.db_port),
        ) {
            (Some(name), Some(user), Some(password), Some(host), Some(port)) => {
                Ok(DatabaseSettings {
                    name: name.to_string(),
                    user: user.to_string(),
                    password: password.to_string(),
                    host: host.to_string(),
                    port: port.to_string(),
                })
            }
            _ => Err(DispatchError::Config(format!(
                "insufficient database connection details read from environment: \
                 dbName:\"{}\", dbUser:\"{}\", dbPassword:\"{}\", dbHost:\"{}\", dbPort:\"{}\"",
                render(&self.db_name),
                render(&self.db_user),
                mask(&self.db_password),
                render(&self.db_host),
                render(&self.db_port),
            ))),
        }
    }

    /// Mailjet credentials, all three required. Same contract as
    /// [`Settings::database`], with the secret masked.
    pub fn mailjet(&self) -> Result<MailjetSettings, DispatchError> {
        match (
            present(&self.mailjet_api_key),
            present(&self.mailjet_api_secret),
            present(&self.mailjet_url),
        ) {
            (Some(api_key), Some(api_secret), Some(url)) => Ok(MailjetSettings {
                api_key: api_key.to_string(),
                api_secret: api_secret.to_string(),
                url: url.to_string(),
            }),
            _ => Err(DispatchError::Config(format!(
                "insufficient Mailjet credentials read from environment: \
                 mailjetApiKey:\"{}\", mailjetApiSecret:\"{}\", mailjetUrl:\"{}\"",
                render(&self.mailjet_api_key),
                mask(&self.mailjet_api_secret),
                render(&self.mailjet_url),
            ))),
        }
    }

    /// Queue parameters for the consumer loop. Validated at startup, since
    /// without a queue there is nothing to consume.
    pub fn queue(&self) -> Result<QueueSettings, DispatchError> {
        let url = present(&self.queue_url).ok_or_else(|| {
            DispatchError::Config("queueUrl missing from environment".to_string())
        })?;

        Ok(QueueSettings {
            url: url.to_string(),
            name: self.queue_name.clone(),
        })
    }
}

impl DatabaseSettings {
    /// Build Postgres connect options from the discrete parameters.
    pub fn connect_options(&self) -> Result<PgConnectOptions, DispatchError> {
        let port: u16 = self.port.parse().map_err(|_| {
            DispatchError::Config(format!("dbPort \"{}\" is not a valid port number", self.port))
        })?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name))
    }
}

/// Read an environment variable, treating empty values as absent.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// A value counts as present only if it is non-empty.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Render a parameter for the enumeration message.
fn render(value: &Option<String>) -> &str {
    present(value).unwrap_or("None")
}

/// Render a secret for the enumeration message: presence only, never the value.
fn mask(value: &Option<String>) -> &'static str {
    if present(value).is_some() { "xxx" } else { "None" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_settings() -> Settings {
        Settings {
            db_name: Some("techconfdb".to_string()),
            db_user: Some("sqladmin".to_string()),
            db_password: Some("hunter2".to_string()),
            db_host: Some("db.example.com".to_string()),
            db_port: Some("5432".to_string()),
            mailjet_api_key: Some("key".to_string()),
            mailjet_api_secret: Some("secret".to_string()),
            mailjet_url: Some("https://api.mailjet.com/v3.1/send".to_string()),
            queue_url: Some("redis://localhost:6379".to_string()),
            queue_name: "notificationqueue".to_string(),
        }
    }

    #[test]
    fn database_accepts_complete_settings() {
        let db = full_settings().database().unwrap();
        assert_eq!(db.name, "techconfdb");
        assert_eq!(db.port, "5432");
    }

    #[test]
    fn database_error_enumerates_present_and_absent() {
        let settings = Settings {
            db_user: None,
            db_host: None,
            ..full_settings()
        };
        let msg = settings.database().unwrap_err().to_string();

        assert!(msg.contains("dbName:\"techconfdb\""));
        assert!(msg.contains("dbUser:\"None\""));
        assert!(msg.contains("dbHost:\"None\""));
        assert!(msg.contains("dbPort:\"5432\""));
    }

    #[test]
    fn database_error_never_contains_password() {
        let settings = Settings {
            db_host: None,
            ..full_settings()
        };
        let msg = settings.database().unwrap_err().to_string();

        assert!(msg.contains("dbPassword:\"xxx\""));
        assert!(!msg.contains("hunter2"));
    }

    #[test]
    fn database_treats_empty_values_as_absent() {
        let settings = Settings {
            db_name: Some(String::new()),
            ..full_settings()
        };
        let msg = settings.database().unwrap_err().to_string();
        assert!(msg.contains("dbName:\"None\""));
    }

    #[test]
    fn mailjet_error_masks_secret() {
        let settings = Settings {
            mailjet_url: None,
            ..full_settings()
        };
        let msg = settings.mailjet().unwrap_err().to_string();

        assert!(msg.contains("mailjetApiKey:\"key\""));
        assert!(msg.contains("mailjetApiSecret:\"xxx\""));
        assert!(msg.contains("mailjetUrl:\"None\""));
        assert!(!msg.contains("\"secret\""));
    }

    #[test]
    fn connect_options_rejects_bad_port() {
        let settings = Settings {
            db_port: Some("not-a-port".to_string()),
            ..full_settings()
        };
        let err = settings.database().unwrap().connect_options().unwrap_err();
        assert!(err.to_string().contains("not-a-port"));
    }

    #[test]
    fn queue_requires_url() {
        let settings = Settings {
            queue_url: None,
            ..full_settings()
        };
        assert!(settings.queue().is_err());

        let queue = full_settings().queue().unwrap();
        assert_eq!(queue.name, "notificationqueue");
    }
}
