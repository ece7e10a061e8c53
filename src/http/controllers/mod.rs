use actix_web::web;

pub mod comments;
pub mod events;
pub mod posts;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::scope("/users")
        .route("/register", web::post().to(users::register))
        .route("/login", web::post().to(users::login))
        .route("/profile", web::put().to(users::update_profile))
        .route("/account", web::delete().to(users::delete_account))
        .route("/commented-posts", web::get().to(users::commented_posts)),
    )
    .service(
      web::scope("/posts")
        .route("", web::post().to(posts::create))
        .route("", web::get().to(posts::list))
        .route("/me", web::get().to(posts::mine))
        .route("/search", web::get().to(posts::search))
        .route("/{id}", web::put().to(posts::update))
        .route("/{id}", web::delete().to(posts::delete))
        .route("/{post_id}/comments", web::post().to(comments::create)),
    )
    .service(
      web::scope("/comments")
        .route("/{id}", web::put().to(comments::update))
        .route("/{id}", web::delete().to(comments::delete)),
    )
    .route("/events", web::get().to(events::subscribe));
}
