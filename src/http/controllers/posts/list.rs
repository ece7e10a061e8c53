use actix_web::{web, HttpResponse};

use crate::{
  http::{Actor, Error},
  schema::PostView,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn list(app: web::Data<App>, actor: Actor) -> Result<HttpResponse, Error> {
  actor.get_user()?;

  let mut conn = app.db_read().await?;
  let views = PostView::all(&mut conn).await?;
  Ok(HttpResponse::Ok().json(views))
}

#[tracing::instrument(skip_all)]
pub async fn mine(app: web::Data<App>, actor: Actor) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;

  let mut conn = app.db_read().await?;
  let views = PostView::by_user(&mut conn, user.id).await?;
  Ok(HttpResponse::Ok().json(views))
}
