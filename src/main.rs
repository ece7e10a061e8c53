use std::process::ExitCode;
use tracing_actix_web::TracingLogger;

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .pretty()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  match run().await {
    Ok(()) => ExitCode::SUCCESS,
    Err(error) => {
      eprintln!("{error}");
      ExitCode::FAILURE
    }
  }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
  let config = tablon::config::Server::load().map_err(|report| format!("{report:?}"))?;
  let app = tablon::App::new(config).await.map_err(|report| format!("{report:?}"))?;

  let addr = (app.config.ip, app.config.port);
  let app = actix_web::web::Data::new(app);

  tracing::info!("listening on {}:{}", addr.0, addr.1);
  actix_web::HttpServer::new(move || {
    actix_web::App::new()
      .app_data(app.clone())
      .wrap(TracingLogger::default())
      .configure(tablon::http::controllers::configure)
  })
  .bind(addr)?
  .run()
  .await?;

  Ok(())
}
