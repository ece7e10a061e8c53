use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use serde_json::json;
use thiserror::Error as ThisError;
use validator::Validate;

use crate::{
  database::ErrorExt,
  http::{Actor, Error},
  schema::User,
  types::{form::users::account, Error as ErrorType},
  util::password,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn delete_account(
  app: web::Data<App>,
  actor: Actor,
  form: Json<account::Request>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let attempt = form.password.clone();
  let hash = user.password_hash.clone();
  let matched =
    tokio::task::spawn_blocking(move || password::verify(attempt.as_str().as_bytes(), &hash))
      .await?
      .map_err(|report| Error::from_report(ErrorType::Internal, report))?;

  if !matched {
    #[derive(Debug, ThisError)]
    #[error("Password does not match")]
    struct WrongPassword;
    return Err(Error::from_context(ErrorType::Forbidden, WrongPassword));
  }

  let mut tx = app.db_begin().await?;
  let deleted = User::delete_with_content(&mut tx, user.id).await?;
  if deleted.is_none() {
    #[derive(Debug, ThisError)]
    #[error("Account was already removed")]
    struct AlreadyGone;
    return Err(Error::from_context(ErrorType::NotFound, AlreadyGone));
  }
  tx.commit().await.into_db_error()?;

  Ok(HttpResponse::Ok().json(json!({ "message": "account deleted" })))
}
