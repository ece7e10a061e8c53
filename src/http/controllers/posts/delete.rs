use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
  database::ErrorExt,
  http::{Actor, Error},
  notify::Event,
  schema::Post,
  types::id::{marker::PostMarker, Id},
  App,
};

use super::not_owned;

#[tracing::instrument(skip_all)]
pub async fn delete(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<Id<PostMarker>>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;

  let mut tx = app.db_begin().await?;
  let Some(post_id) = Post::delete(&mut tx, *path, user.id).await? else {
    return Err(not_owned());
  };
  tx.commit().await.into_db_error()?;

  app.notifier.publish(Event::PostDeleted { post_id });

  Ok(HttpResponse::Ok().json(json!({ "message": "post deleted" })))
}
