use std::net::SocketAddr;

use anyhow::{ensure, Context};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub remember_days: i64,
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// One year.
    pub const MAX_TTL_MINUTES: i64 = 365 * 24 * 60;
    /// Ten years.
    pub const MAX_REMEMBER_DAYS: i64 = 3650;

    /// Keeps both lifetimes in a range `time::Duration` and cookie Max-Age can hold.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (1..=Self::MAX_TTL_MINUTES).contains(&self.ttl_minutes),
            "SESSION_TTL_MINUTES must be between 1 and {}, got {}",
            Self::MAX_TTL_MINUTES,
            self.ttl_minutes
        );
        ensure!(
            (1..=Self::MAX_REMEMBER_DAYS).contains(&self.remember_days),
            "SESSION_REMEMBER_DAYS must be between 1 and {}, got {}",
            Self::MAX_REMEMBER_DAYS,
            self.remember_days
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET").context("SESSION_SECRET is not set")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "recipebook".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "recipebook-web".into()),
            ttl_minutes: env_parse("SESSION_TTL_MINUTES").unwrap_or(12 * 60),
            remember_days: env_parse("SESSION_REMEMBER_DAYS").unwrap_or(30),
            cookie_secure: env_parse("COOKIE_SECURE").unwrap_or(false),
        };
        session.validate()?;
        Ok(Self {
            database_url,
            session,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parse("APP_PORT").unwrap_or(8080),
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = AppConfig {
            database_url: "postgres://localhost/recipes".into(),
            session: SessionConfig {
                secret: "s".into(),
                issuer: "i".into(),
                audience: "a".into(),
                ttl_minutes: 1,
                remember_days: 1,
                cookie_secure: false,
            },
            host: "127.0.0.1".into(),
            port: 3000,
        };
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    fn session(ttl_minutes: i64, remember_days: i64) -> SessionConfig {
        SessionConfig {
            secret: "s".into(),
            issuer: "i".into(),
            audience: "a".into(),
            ttl_minutes,
            remember_days,
            cookie_secure: false,
        }
    }

    #[test]
    fn session_lifetimes_are_bounded() {
        assert!(session(12 * 60, 30).validate().is_ok());
        assert!(session(SessionConfig::MAX_TTL_MINUTES, SessionConfig::MAX_REMEMBER_DAYS)
            .validate()
            .is_ok());

        let err = session(i64::MAX, 30).validate().unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_MINUTES"));
        let err = session(720, 9_999_999_999_999).validate().unwrap_err();
        assert!(err.to_string().contains("SESSION_REMEMBER_DAYS"));
        assert!(session(0, 30).validate().is_err());
        assert!(session(720, -1).validate().is_err());
    }

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let mut config = AppConfig {
            database_url: String::new(),
            session: SessionConfig {
                secret: String::new(),
                issuer: String::new(),
                audience: String::new(),
                ttl_minutes: 0,
                remember_days: 0,
                cookie_secure: false,
            },
            host: "not a host".into(),
            port: 80,
        };
        assert!(config.bind_addr().is_err());
        config.host = "0.0.0.0".into();
        assert!(config.bind_addr().is_ok());
    }
}
