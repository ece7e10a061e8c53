use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::{Actor, Error},
  notify::Event,
  schema::{Post, PostView},
  types::{
    form::posts::update as form,
    id::{marker::PostMarker, Id},
  },
  App,
};

use super::not_owned;

#[tracing::instrument(skip_all)]
pub async fn update(
  app: web::Data<App>,
  actor: Actor,
  path: web::Path<Id<PostMarker>>,
  form: Json<form::Request>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let mut conn = app.db_write().await?;
  let Some(post) = Post::update_content(&mut conn, *path, user.id, &form.content).await? else {
    return Err(not_owned());
  };

  // Reload through the view so the broadcast carries the comment
  // thread, not just the bare row.
  let view = match PostView::by_id(&mut conn, post.id).await? {
    Some(view) => view,
    None => PostView::assemble(post, Some(user.name), Vec::new()),
  };
  app.notifier.publish(Event::PostUpdated(view.clone()));

  Ok(HttpResponse::Ok().json(view))
}
