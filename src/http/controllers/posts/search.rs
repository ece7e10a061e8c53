use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
  http::{Actor, Error},
  schema::PostView,
  types::form::posts::search as form,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn search(
  app: web::Data<App>,
  actor: Actor,
  query: web::Query<form::Request>,
) -> Result<HttpResponse, Error> {
  actor.get_user()?;
  query.validate()?;

  let mut conn = app.db_read().await?;
  let views = PostView::search(&mut conn, &query.q).await?;
  Ok(HttpResponse::Ok().json(views))
}
