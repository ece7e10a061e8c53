use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use thiserror::Error as ThisError;
use validator::{Validate, ValidateError};

use crate::{
  http::{Actor, Error},
  schema::{User, UserChanges},
  types::{form::users::profile, Error as ErrorType},
  util::password,
  App,
};

/// Renaming is free, but changing the e-mail or the password
/// re-confirms the current password first.
#[tracing::instrument(skip_all)]
pub async fn update_profile(
  app: web::Data<App>,
  actor: Actor,
  form: Json<profile::Request>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let name = form
    .name
    .as_deref()
    .map(str::trim)
    .filter(|name| *name != user.name)
    .map(str::to_owned);
  let email = form
    .email
    .as_deref()
    .map(|email| email.trim().to_lowercase())
    .filter(|email| *email != user.email);

  if form.new_password.is_some() || email.is_some() {
    let Some(current) = form.current_password.clone() else {
      return Err(ValidateError::field("current_password", "Current password is required").into());
    };

    let hash = user.password_hash.clone();
    let matched =
      tokio::task::spawn_blocking(move || password::verify(current.as_str().as_bytes(), &hash))
        .await?
        .map_err(|report| Error::from_report(ErrorType::Internal, report))?;

    if !matched {
      #[derive(Debug, ThisError)]
      #[error("Current password does not match")]
      struct WrongPassword;
      return Err(Error::from_context(ErrorType::Forbidden, WrongPassword));
    }
  }

  let mut conn = app.db_write().await?;
  if let Some(email) = email.as_deref() {
    if User::by_email(&mut conn, email).await?.is_some() {
      #[derive(Debug, ThisError)]
      #[error("E-mail address is already registered")]
      struct EmailTaken;
      return Err(Error::from_context(ErrorType::Conflict, EmailTaken));
    }
  }

  let password_hash = match form.new_password.clone() {
    Some(new_password) => Some(
      tokio::task::spawn_blocking(move || password::hash(new_password.as_str()))
        .await?
        .map_err(|report| Error::from_report(ErrorType::Internal, report))?,
    ),
    None => None,
  };

  let changes = UserChanges {
    name,
    email,
    password_hash,
  };
  if changes.is_empty() {
    return Ok(HttpResponse::Ok().json(profile::Response {
      message: "no changes",
      user: user.into(),
    }));
  }

  let Some(updated) = User::update(&mut conn, user.id, &changes).await? else {
    #[derive(Debug, ThisError)]
    #[error("User row disappeared mid-update")]
    struct Vanished;
    return Err(Error::from_context(ErrorType::NotFound, Vanished));
  };

  Ok(HttpResponse::Ok().json(profile::Response {
    message: "profile updated",
    user: updated.into(),
  }))
}
