//! Transient user-facing messages (the toast channel).

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Sending half handed to every view. A dropped receiver only means nobody
/// is displaying notices anymore.
#[derive(Debug, Clone)]
pub struct NoticeSender {
    tx: mpsc::UnboundedSender<Notice>,
}

pub fn notice_channel() -> (NoticeSender, mpsc::UnboundedReceiver<Notice>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NoticeSender { tx }, rx)
}

/// Feeds every notice to `sink` until all senders are gone. Awaiting the
/// handle after dropping the senders delivers everything already sent.
pub fn spawn_drain<F>(mut rx: mpsc::UnboundedReceiver<Notice>, mut sink: F) -> JoinHandle<()>
where
    F: FnMut(Notice) + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(notice) = rx.recv().await {
            sink(notice);
        }
    })
}

impl NoticeSender {
    pub fn send(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::error!("{}", notice.message),
            NoticeLevel::Warning => tracing::warn!("{}", notice.message),
            _ => tracing::info!("{}", notice.message),
        }
        if self.tx.send(notice).is_err() {
            tracing::debug!("Notice receiver dropped");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Success, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Info, message));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Warning, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Error, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_arrive_in_order() {
        let (sender, mut rx) = notice_channel();
        sender.warn("Seat already selected.");
        sender.success("Booking created successfully!");

        assert_eq!(rx.try_recv().unwrap(), Notice::new(NoticeLevel::Warning, "Seat already selected."));
        assert_eq!(rx.try_recv().unwrap().level, NoticeLevel::Success);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_drain_delivers_notices_sent_before_shutdown() {
        let (sender, rx) = notice_channel();
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handle = spawn_drain(rx, move |notice| sink.lock().unwrap().push(notice.message));

        sender.error("Failed to load flight or seat data.");
        sender.info("last words");
        drop(sender);
        handle.await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["Failed to load flight or seat data.".to_string(), "last words".to_string()]
        );
    }

    #[test]
    fn test_send_without_receiver_is_silent() {
        let (sender, rx) = notice_channel();
        drop(rx);
        sender.error("nobody listening");
    }
}
