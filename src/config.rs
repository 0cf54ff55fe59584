use std::env;
use std::str::FromStr;

use secrecy::SecretString;

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_RESEND_KEY: &str = "resend_api_key";

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_origin: String,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub refresh_expiration_hours: i64,
    pub frontend_url: String,
    pub resend_api_key: SecretString,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: env_or("MONGO_DB_NAME", "prepdesk-local"),
            web_server_host: env_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: env_parse("WEB_SERVER_PORT", 8080),
            cors_origin: env_or("CORS_ORIGIN", "*"),
            jwt_secret: SecretString::from(env_or("JWT_SECRET", DEFAULT_JWT_SECRET)),
            jwt_expiration_hours: env_parse("JWT_EXPIRATION_HOURS", 24),
            refresh_expiration_hours: env_parse("REFRESH_EXPIRATION_HOURS", 24 * 7),
            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
            resend_api_key: SecretString::from(env_or("RESEND_API_KEY", DEFAULT_RESEND_KEY)),
            mail_from: env_or("MAIL_FROM", "PrepDesk <noreply@prepdesk.example>"),
        }
    }

    /// Refuses to boot a production process on placeholder secrets.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();
        if jwt_secret == DEFAULT_JWT_SECRET {
            panic!("JWT_SECRET must be set in production");
        }
        if jwt_secret.len() < 32 {
            panic!(
                "JWT_SECRET must be at least 32 characters, got {}",
                jwt_secret.len()
            );
        }

        if self.resend_api_key.expose_secret() == DEFAULT_RESEND_KEY {
            panic!("RESEND_API_KEY must be set in production");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "prepdesk-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_origin: "*".to_string(),
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            refresh_expiration_hours: 168,
            frontend_url: "http://localhost:3000".to_string(),
            resend_api_key: SecretString::from("test_resend_key".to_string()),
            mail_from: "PrepDesk <noreply@prepdesk.example>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.web_server_port > 0);
    }

    #[test]
    fn test_test_config_is_local_only() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "prepdesk-test");
        assert_eq!(config.jwt_expiration_hours, 1);
        assert_eq!(config.refresh_expiration_hours, 168);
    }
}
