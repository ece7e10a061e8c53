use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use thiserror::Error as ThisError;
use validator::Validate;

use crate::{
  http::{Error, Jwt},
  schema::User,
  types::{form::users::login, Error as ErrorType},
  util::password,
  App,
};

/// Unknown addresses and wrong passwords produce the exact same
/// response, down to the attached context message.
#[derive(Debug, ThisError)]
#[error("Invalid e-mail address or password")]
struct BadCredentials;

#[tracing::instrument(skip_all)]
pub async fn login(app: web::Data<App>, form: Json<login::Request>) -> Result<HttpResponse, Error> {
  form.validate()?;

  let mut conn = app.db_read_prefer_primary().await?;
  let Some(user) = User::by_email(&mut conn, &form.email).await? else {
    return Err(Error::from_context(ErrorType::Unauthorized, BadCredentials));
  };

  let attempt = form.password.clone();
  let hash = user.password_hash.clone();
  let matched =
    tokio::task::spawn_blocking(move || password::verify(attempt.as_str().as_bytes(), &hash))
      .await?
      .map_err(|report| Error::from_report(ErrorType::Internal, report))?;

  if !matched {
    return Err(Error::from_context(ErrorType::Unauthorized, BadCredentials));
  }

  let token = Jwt::encode(user.id, &app).await?;
  Ok(HttpResponse::Ok().json(login::Response {
    token,
    user: user.into(),
  }))
}
