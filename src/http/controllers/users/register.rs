use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use thiserror::Error as ThisError;
use validator::Validate;

use crate::{
  http::Error,
  schema::User,
  types::{form::users::register, Error as ErrorType},
  util::password,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn register(
  app: web::Data<App>,
  form: Json<register::Request>,
) -> Result<HttpResponse, Error> {
  form.validate()?;

  let mut conn = app.db_write().await?;
  if User::by_email(&mut conn, &form.email).await?.is_some() {
    #[derive(Debug, ThisError)]
    #[error("E-mail address is already registered")]
    struct EmailTaken;
    return Err(Error::from_context(ErrorType::Conflict, EmailTaken));
  }

  let password = form.password.clone();
  let password_hash = tokio::task::spawn_blocking(move || password::hash(password.as_str()))
    .await?
    .map_err(|report| Error::from_report(ErrorType::Internal, report))?;

  let user = User::insert(&mut conn, &form.name, &form.email, &password_hash).await?;

  Ok(HttpResponse::Created().json(register::Response {
    message: "account created",
    user: user.into(),
  }))
}
