use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::net::IpAddr;
use validator::{Validate, ValidateError};

use super::ParseError;
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport, Sensitive};

#[derive(Debug, Deserialize)]
pub struct Server {
  pub db: super::Database,
  /// Secret key used to sign and verify identity tokens.
  ///
  /// **Environment variables**:
  /// - `TABLON_JWT_SECRET`
  pub jwt_secret: Sensitive<String>,
  /// **Environment variables**:
  /// - `TABLON_IP`
  #[serde(default = "Server::default_ip")]
  pub ip: IpAddr,
  /// **Environment variables**:
  /// - `TABLON_PORT`
  #[serde(default = "Server::default_port")]
  pub port: u16,
}

impl Validate for Server {
  fn validate(&self) -> std::result::Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if let Err(e) = self.db.validate() {
      fields.insert("db", e);
    }
    fields.insert("jwt_secret", {
      let mut error = ValidateError::msg_builder();
      if !(12..=1024).contains(&self.jwt_secret.as_str().len()) {
        error.insert("Invalid JWT secret key");
      }
      error.build()
    });
    fields.build().into_result()
  }
}

impl Server {
  pub fn load() -> Result<Self, ParseError> {
    dotenvy::dotenv().ok();

    let config = Self::figment()
      .extract::<Self>()
      .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

    config
      .validate()
      .into_validator_report()
      .change_context(ParseError)?;

    Ok(config)
  }
}

impl Server {
  const DEFAULT_CONFIG_FILE: &'static str = "tablon.yml";

  const fn default_ip() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::LOCALHOST)
  }

  const fn default_port() -> u16 {
    3000
  }

  /// Creates a default [`figment::Figment`] object to load server
  /// configuration. This function is there for implementing
  /// [`Server::load`] and testing.
  pub(crate) fn figment() -> figment::Figment {
    use figment::{
      providers::{Env, Format, Yaml},
      Figment,
    };

    Figment::new()
      .merge(Yaml::file(Self::DEFAULT_CONFIG_FILE))
      // One big con about figment (env provider to be specific) especially
      // these fields with underscore in it.
      .merge(Env::prefixed("TABLON_").map(|v| match v.as_str() {
        "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
        "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

        "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
        "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

        "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
        "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

        "JWT_SECRET" => "jwt_secret".into(),

        _ => v.as_str().replace('_', ".").into(),
      }))
      // Environment variable aliases
      .merge(Env::raw().map(|v| match v.as_str() {
        "DATABASE_URL" => "db.primary.url".into(),
        _ => v.into(),
      }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use figment::Jail;
  use std::num::{NonZeroU32, NonZeroU64};

  #[test]
  fn env_aliases() {
    Jail::expect_with(|jail| {
      jail.set_env("DATABASE_URL", "postgres://localhost/tablon");

      jail.set_env("TABLON_JWT_SECRET", "jwt-secret-for-testing");

      jail.set_env("TABLON_DB_PRIMARY_MIN_IDLE", "100");
      jail.set_env("TABLON_DB_PRIMARY_POOL_SIZE", "100");

      jail.set_env("TABLON_DB_REPLICA_URL", "required");
      jail.set_env("TABLON_DB_REPLICA_MIN_IDLE", "589");
      jail.set_env("TABLON_DB_REPLICA_POOL_SIZE", "589");

      jail.set_env("TABLON_DB_ENFORCE_TLS", "false");
      jail.set_env("TABLON_DB_TIMEOUT_SECS", "3030");

      let config: Server = Server::figment().extract()?;
      assert_eq!(config.db.primary.url.as_str(), "postgres://localhost/tablon");
      assert_eq!(
        config.db.primary.min_idle.unwrap(),
        NonZeroU32::new(100).unwrap()
      );
      assert_eq!(config.db.primary.pool_size, NonZeroU32::new(100).unwrap());
      assert_eq!(
        config.db.replica.as_ref().unwrap().min_idle.unwrap(),
        NonZeroU32::new(589).unwrap()
      );
      assert_eq!(
        config.db.replica.as_ref().unwrap().pool_size,
        NonZeroU32::new(589).unwrap()
      );

      assert_eq!(config.db.enforce_tls, false);
      assert_eq!(config.db.timeout_secs, NonZeroU64::new(3030).unwrap());

      assert_eq!(config.jwt_secret.as_str(), "jwt-secret-for-testing");
      assert_eq!(config.port, 3000);

      Ok(())
    });
  }

  #[test]
  fn validate_rejects_short_jwt_secret() {
    Jail::expect_with(|jail| {
      jail.set_env("DATABASE_URL", "postgres://localhost/tablon");
      jail.set_env("TABLON_JWT_SECRET", "short");

      let config: Server = Server::figment().extract()?;
      assert!(config.validate().is_err());
      Ok(())
    });
  }
}
