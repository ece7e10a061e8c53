use actix_web::{http::header, web, HttpResponse};
use futures::stream;
use tokio::sync::broadcast::error::RecvError;

use crate::{http::Error, notify::Event, App};

/// Server-sent event feed of board activity. Open to anonymous
/// readers, the payloads only contain data public reads expose
/// anyway.
#[tracing::instrument(skip_all)]
pub async fn subscribe(app: web::Data<App>) -> Result<HttpResponse, Error> {
  let receiver = app.notifier.subscribe();

  let stream = stream::unfold(receiver, |mut receiver| async move {
    loop {
      match receiver.recv().await {
        Ok(event) => match render(&event) {
          Ok(frame) => return Some((Ok::<_, actix_web::Error>(frame), receiver)),
          Err(error) => {
            tracing::warn!(%error, "dropping unserializable board event");
            continue;
          }
        },
        // A slow client skips what it missed and picks up from
        // the live edge again.
        Err(RecvError::Lagged(..)) => continue,
        Err(RecvError::Closed) => return None,
      }
    }
  });

  Ok(
    HttpResponse::Ok()
      .insert_header(header::ContentType(mime::TEXT_EVENT_STREAM))
      .insert_header((header::CACHE_CONTROL, "no-cache"))
      .streaming(stream),
  )
}

fn render(event: &Event) -> serde_json::Result<web::Bytes> {
  let payload = serde_json::to_string(event)?;
  Ok(web::Bytes::from(format!("data: {payload}\n\n")))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Id;

  #[test]
  fn frames_follow_the_sse_wire_format() {
    let frame = render(&Event::PostDeleted {
      post_id: Id::new(3),
    })
    .unwrap();
    let text = std::str::from_utf8(&frame).unwrap();
    assert!(text.starts_with("data: {"));
    assert!(text.ends_with("\n\n"));
    assert!(text.contains(r#""event":"post_deleted""#));
  }
}
