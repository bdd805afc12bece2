//! Status line state types.

use std::time::{Duration, Instant};

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message shown in place of the key hints.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct StatusLine {
    notice: Option<Notice>,
}

impl StatusLine {
    pub fn info(&mut self, text: impl Into<String>) {
        self.set(text.into(), NoticeLevel::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(text.into(), NoticeLevel::Error);
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Drops the notice once it has expired.
    pub fn on_tick(&mut self, now: Instant) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| now >= notice.expires_at)
        {
            self.notice = None;
        }
    }

    fn set(&mut self, text: String, level: NoticeLevel) {
        self.notice = Some(Notice {
            text,
            level,
            expires_at: Instant::now() + NOTICE_DURATION,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires() {
        let mut status = StatusLine::default();
        status.error("Search failed");
        assert_eq!(status.notice().map(|n| n.level), Some(NoticeLevel::Error));

        status.on_tick(Instant::now());
        assert!(status.notice().is_some());

        status.on_tick(Instant::now() + NOTICE_DURATION + Duration::from_millis(1));
        assert!(status.notice().is_none());
    }
}
