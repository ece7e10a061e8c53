use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use thiserror::Error as ThisError;
use validator::Validate;

use crate::{
  database::ErrorExt,
  http::{Actor, Error},
  notify::Event,
  schema::{Comment, CommentView, Post},
  types::{
    form::comments::create as form,
    id::{marker::PostMarker, Id},
    Error as ErrorType,
  },
  App,
};

/// The existence check and the insert share one transaction, a
/// post deleted in between cannot gain a dangling comment.
#[tracing::instrument(skip_all)]
pub async fn create(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<Id<PostMarker>>,
  form: Json<form::Request>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let mut tx = app.db_begin().await?;
  if !Post::exists(&mut tx, *path).await? {
    #[derive(Debug, ThisError)]
    #[error("Cannot comment on a missing post")]
    struct MissingPost;
    return Err(Error::from_context(ErrorType::NotFound, MissingPost));
  }

  let comment = Comment::insert(&mut tx, *path, user.id, &form.content).await?;
  tx.commit().await.into_db_error()?;

  let view = CommentView::from_comment(comment, user.name);
  app.notifier.publish(Event::NewComment(view.clone()));

  Ok(HttpResponse::Created().json(view))
}
