use actix_web::{http::header, web, FromRequest};
use futures::future::{ready, LocalBoxFuture};
use thiserror::Error as ThisError;

use crate::{schema::User, App};

use super::{Error, Jwt};

/// Who is making the request. Routes that allow both cases take
/// this directly, user-only routes go through [`Actor::get_user`].
#[derive(Debug)]
pub enum Actor {
  Anonymous,
  User(User),
}

impl Actor {
  pub fn get_user(self) -> Result<User, Error> {
    #[derive(Debug, ThisError)]
    #[error("Attempt to access user-only route")]
    struct Unauthorized;
    match self {
      Self::User(n) => Ok(n),
      Self::Anonymous => Err(Error::from_context(
        crate::types::Error::Unauthorized,
        Unauthorized,
      )),
    }
  }
}

impl FromRequest for Actor {
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(
    req: &actix_web::HttpRequest,
    _payload: &mut actix_web::dev::Payload,
  ) -> Self::Future {
    let token = req
      .headers()
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.strip_prefix("Bearer "))
      .map(str::to_owned);

    let Some(token) = token else {
      return Box::pin(ready(Ok(Actor::Anonymous)));
    };

    let Some(app) = req.app_data::<web::Data<App>>() else {
      #[derive(Debug, ThisError)]
      #[error("The web app has no available configuration")]
      struct NoConfig;
      return Box::pin(ready(Err(Error::from_context(
        crate::types::Error::Internal,
        NoConfig,
      ))));
    };

    let app = app.clone();
    Box::pin(async move {
      let jwt = Jwt::decode(&token, app.as_ref())?;
      let mut conn = app.db_read_prefer_primary().await?;
      match User::by_id(&mut conn, jwt.user_id).await? {
        Some(user) => Ok(Actor::User(user)),
        None => {
          // The token verified but its subject is gone, most
          // likely a deleted account still holding a session.
          #[derive(Debug, ThisError)]
          #[error("Token subject no longer exists")]
          struct UnknownUser;
          Err(Error::from_context(
            crate::types::Error::Forbidden,
            UnknownUser,
          ))
        }
      }
    })
  }
}
