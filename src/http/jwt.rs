use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::Error;
use crate::{
  types::{
    id::{marker::UserMarker, Id},
    Error as ErrorType,
  },
  App,
};

/// Tokens are good for one day, after that the client logs in again.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Deserialize, Serialize)]
pub struct Jwt {
  pub user_id: Id<UserMarker>,
  pub iat: i64,
  pub exp: i64,
}

fn sign(user_id: Id<UserMarker>, secret: &[u8]) -> jsonwebtoken::errors::Result<String> {
  let now = Utc::now().timestamp();
  let claims = Jwt {
    user_id,
    iat: now,
    exp: now + TOKEN_TTL_SECS,
  };
  let key = EncodingKey::from_secret(secret);
  jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &key)
}

fn parse(token: &str, secret: &[u8]) -> jsonwebtoken::errors::Result<Jwt> {
  let key = DecodingKey::from_secret(secret);
  let validation = Validation::new(Algorithm::HS512);
  jsonwebtoken::decode::<Jwt>(token, &key, &validation).map(|data| data.claims)
}

impl Jwt {
  /// Bad signatures and expired tokens land on the same forbidden
  /// response, the client cannot tell which check failed.
  #[tracing::instrument(skip_all)]
  pub fn decode(token: &str, app: &App) -> Result<Self, Error> {
    parse(token, app.config.jwt_secret.as_str().as_bytes())
      .map_err(|error| Error::from_context(ErrorType::Forbidden, error))
  }

  #[tracing::instrument(skip(app))]
  pub async fn encode(user_id: Id<UserMarker>, app: &App) -> Result<String, Error> {
    let secret = app.config.jwt_secret.clone();
    let token = tokio::task::spawn_blocking(move || sign(user_id, secret.as_str().as_bytes()))
      .await?
      .map_err(|error| Error::from_context(ErrorType::Internal, error))?;

    Ok(token)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SECRET: &[u8] = b"jwt-secret-for-tests";

  #[test]
  fn round_trips_the_user_id() {
    let token = sign(Id::new(42), SECRET).unwrap();
    let claims = parse(&token, SECRET).unwrap();
    assert_eq!(claims.user_id, Id::new(42));
    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
  }

  #[test]
  fn rejects_a_foreign_signature() {
    let token = sign(Id::new(42), b"someone-elses-secret").unwrap();
    assert!(parse(&token, SECRET).is_err());
  }

  #[test]
  fn rejects_garbage_tokens() {
    assert!(parse("definitely.not.a-jwt", SECRET).is_err());
  }
}
