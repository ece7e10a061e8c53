use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::{Actor, Error},
  notify::Event,
  schema::{Post, PostView},
  types::form::posts::create as form,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn create(
  app: web::Data<App>,
  actor: Actor,
  form: Json<form::Request>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  form.validate()?;

  let mut conn = app.db_write().await?;
  let post = Post::insert(&mut conn, user.id, &form.title, &form.content).await?;

  let view = PostView::assemble(post, Some(user.name), Vec::new());
  app.notifier.publish(Event::NewPost(view.clone()));

  Ok(HttpResponse::Created().json(view))
}
