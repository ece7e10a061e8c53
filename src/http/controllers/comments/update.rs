use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::{Actor, Error},
  notify::Event,
  schema::{Comment, CommentView},
  types::{
    form::comments::update as form,
    id::{marker::CommentMarker, Id},
  },
  App,
};

use super::not_owned;

#[tracing::instrument(skip_all)]
pub async fn update(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<Id<CommentMarker>>,
  form: Json<form::Request>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let mut conn = app.db_write().await?;
  let Some(comment) = Comment::update_content(&mut conn, *path, user.id, &form.content).await?
  else {
    return Err(not_owned());
  };

  let view = CommentView::from_comment(comment, user.name);
  app.notifier.publish(Event::CommentUpdated(view.clone()));

  Ok(HttpResponse::Ok().json(view))
}
