use serde::Serialize;
use tokio::sync::broadcast;

use crate::{
  schema::{CommentView, PostView},
  types::id::{
    marker::{CommentMarker, PostMarker},
    Id,
  },
};

/// Board activity pushed to live subscribers. Payloads carry the
/// fully assembled view so clients never have to refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Event {
  NewPost(PostView),
  PostUpdated(PostView),
  PostDeleted { post_id: Id<PostMarker> },
  NewComment(CommentView),
  CommentUpdated(CommentView),
  CommentDeleted {
    comment_id: Id<CommentMarker>,
    post_id: Id<PostMarker>,
  },
}

/// Fan-out hub for [`Event`]s. Cloning shares the same channel, so
/// one hub is created at startup and handed to every handler.
#[derive(Debug, Clone)]
pub struct Notifier {
  sender: broadcast::Sender<Event>,
}

impl Default for Notifier {
  fn default() -> Self {
    Self::new(256)
  }
}

impl Notifier {
  #[must_use]
  pub fn new(capacity: usize) -> Self {
    let (sender, _) = broadcast::channel(capacity);
    Self { sender }
  }

  #[must_use]
  pub fn subscribe(&self) -> broadcast::Receiver<Event> {
    self.sender.subscribe()
  }

  /// Publishes to whoever is listening right now. Must only be
  /// called after the originating transaction has committed.
  pub fn publish(&self, event: Event) {
    let receivers = self.sender.receiver_count();
    match self.sender.send(event) {
      Ok(reached) => tracing::trace!(reached, "published board event"),
      Err(..) => tracing::trace!(receivers, "no subscribers for board event"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn deleted(post_id: u64) -> Event {
    Event::PostDeleted {
      post_id: Id::new(post_id),
    }
  }

  #[tokio::test]
  async fn subscribers_receive_published_events() {
    let notifier = Notifier::new(4);
    let mut first = notifier.subscribe();
    let mut second = notifier.subscribe();

    notifier.publish(deleted(7));
    assert_eq!(first.recv().await.unwrap(), deleted(7));
    assert_eq!(second.recv().await.unwrap(), deleted(7));
  }

  #[test]
  fn publish_without_subscribers_is_a_no_op() {
    let notifier = Notifier::new(4);
    notifier.publish(deleted(7));
  }

  #[test]
  fn event_payload_shape() {
    let value = serde_json::to_value(deleted(7)).unwrap();
    assert_eq!(value["event"], "post_deleted");
    assert_eq!(value["data"]["post_id"], "7");
  }
}
