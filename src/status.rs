/// Identifies one scheduled revert. Only the most recent token can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertToken(u64);

#[derive(Debug, Clone, Copy)]
struct PendingRevert {
    token: RevertToken,
    due: f64,
}

/// Label showing the active tool, temporarily replaced by action messages
#[derive(Debug, Clone)]
pub struct StatusLabel {
    text: String,
    resting: String,
    delay: f64,
    pending: Option<PendingRevert>,
    issued: u64,
}

impl StatusLabel {
    /// `delay` is in seconds
    pub fn new(resting: &str, delay: f64) -> Self {
        Self {
            text: resting.to_owned(),
            resting: resting.to_owned(),
            delay,
            pending: None,
            issued: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Show `message` until `now + delay`. Replaces any earlier message and
    /// its deadline.
    pub fn flash(&mut self, message: &str, now: f64) -> RevertToken {
        self.issued += 1;
        let token = RevertToken(self.issued);
        self.text = message.to_owned();
        self.pending = Some(PendingRevert {
            token,
            due: now + self.delay,
        });
        token
    }

    /// Change the text shown when no message is up, and show it now
    pub fn set_resting(&mut self, resting: &str) {
        self.resting = resting.to_owned();
        self.text = resting.to_owned();
        self.pending = None;
    }

    /// Revert if `token` is still the latest scheduled one.
    /// Returns whether the label changed.
    pub fn revert(&mut self, token: RevertToken) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                self.text = self.resting.clone();
                true
            }
            _ => false,
        }
    }

    /// Fire the pending revert once its deadline has passed
    pub fn tick(&mut self, now: f64) -> bool {
        match self.pending {
            Some(pending) if now >= pending.due => self.revert(pending.token),
            _ => false,
        }
    }

    /// Seconds until the pending revert fires, if any
    pub fn time_until_revert(&self, now: f64) -> Option<f64> {
        self.pending.map(|pending| (pending.due - now).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_then_revert() {
        let mut status = StatusLabel::new("Brush", 1.5);
        status.flash("Canvas Saved", 10.0);
        assert_eq!(status.text(), "Canvas Saved");

        assert!(!status.tick(11.0));
        assert_eq!(status.text(), "Canvas Saved");

        assert!(status.tick(11.5));
        assert_eq!(status.text(), "Brush");
        assert_eq!(status.time_until_revert(12.0), None);
    }

    #[test]
    fn test_new_message_resets_deadline() {
        let mut status = StatusLabel::new("Brush", 1.5);
        let first = status.flash("Canvas Saved", 0.0);
        status.flash("Canvas Loaded", 1.0);

        // the first deadline passes but the second message stays
        assert!(!status.tick(2.0));
        assert_eq!(status.text(), "Canvas Loaded");
        assert!(!status.revert(first));

        assert!(status.tick(2.5));
        assert_eq!(status.text(), "Brush");
    }

    #[test]
    fn test_set_resting_cancels_pending() {
        let mut status = StatusLabel::new("Brush", 1.5);
        let token = status.flash("Canvas Cleared", 0.0);
        status.set_resting("Eraser");
        assert_eq!(status.text(), "Eraser");
        assert!(!status.revert(token));
        assert!(!status.tick(5.0));
    }
}
