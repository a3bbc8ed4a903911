use std::time::Duration;

pub const DEFAULT_NOTIFY_DURATION: Duration = Duration::from_millis(4000);
/// Danger notifications carrying server error text stay up longer.
pub const ERROR_NOTIFY_DURATION: Duration = Duration::from_millis(8000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Info,
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub id: u64,
    pub severity: Severity,
    pub text: String,
}

/// Stack of transient status banners, most recent first. Banners leave the
/// stack either when their timer message arrives or when the user dismisses
/// them; removal is keyed by id, so the two paths cannot double-fire.
pub struct NotificationCenter {
    banners: Vec<Banner>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self { banners: Vec::new(), next_id: 1 }
    }

    pub fn push(
        &mut self,
        severity: Severity,
        text: String,
        duration: Option<Duration>,
    ) -> (u64, Duration) {
        let id = self.next_id;
        self.next_id += 1;
        let duration = duration.unwrap_or(DEFAULT_NOTIFY_DURATION);
        self.banners.insert(0, Banner { id, severity, text });
        (id, duration)
    }

    /// Remove a banner; `false` when it is already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.banners.len();
        self.banners.retain(|banner| banner.id != id);
        self.banners.len() != before
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_NOTIFY_DURATION, NotificationCenter, Severity};

    #[test]
    fn banners_stack_most_recent_first() {
        let mut center = NotificationCenter::new();
        center.push(Severity::Danger, "Failed to create collection: col exists".to_owned(), None);
        center.push(Severity::Danger, "Failed to create collection: col exists".to_owned(), None);

        let banners = center.banners();
        assert_eq!(banners.len(), 2);
        assert_ne!(banners[0].id, banners[1].id);
        assert!(banners[0].id > banners[1].id);
    }

    #[test]
    fn dismissal_is_independent_and_idempotent() {
        let mut center = NotificationCenter::new();
        let (first, _) = center.push(Severity::Info, "one".to_owned(), None);
        let (second, _) = center.push(Severity::Info, "two".to_owned(), None);

        assert!(center.dismiss(first));
        assert_eq!(center.banners().len(), 1);
        assert_eq!(center.banners()[0].id, second);

        // The expiry timer arriving after a manual dismissal is a no-op.
        assert!(!center.dismiss(first));
        assert!(center.dismiss(second));
        assert!(center.banners().is_empty());
    }

    #[test]
    fn default_duration_applies_when_unspecified() {
        let mut center = NotificationCenter::new();
        let (_, duration) = center.push(Severity::Success, "done".to_owned(), None);
        assert_eq!(duration, DEFAULT_NOTIFY_DURATION);
    }
}
