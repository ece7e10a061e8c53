use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
  http::{Actor, Error},
  notify::Event,
  schema::Comment,
  types::id::{marker::CommentMarker, Id},
  App,
};

use super::not_owned;

#[tracing::instrument(skip_all)]
pub async fn delete(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<Id<CommentMarker>>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;

  let mut conn = app.db_write().await?;
  let Some((comment_id, post_id)) = Comment::delete(&mut conn, *path, user.id).await? else {
    return Err(not_owned());
  };

  app
    .notifier
    .publish(Event::CommentDeleted { comment_id, post_id });

  Ok(HttpResponse::Ok().json(json!({ "message": "comment deleted" })))
}
