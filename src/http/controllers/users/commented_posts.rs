use actix_web::{web, HttpResponse};

use crate::{
  http::{Actor, Error},
  schema::PostView,
  App,
};

/// Posts the caller has commented on, wherever they were posted.
#[tracing::instrument(skip_all)]
pub async fn commented_posts(app: web::Data<App>, actor: Actor) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;

  let mut conn = app.db_read().await?;
  let views = PostView::commented_by(&mut conn, user.id).await?;
  Ok(HttpResponse::Ok().json(views))
}
