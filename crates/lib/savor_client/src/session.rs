//! Signed-in session handle.

use std::sync::atomic::{AtomicI64, Ordering};

const UNKNOWN_REVISION: i64 = -1;

/// Bearer token plus the last collection revision the server reported.
///
/// Sessions are passed to [`crate::SavorClient`] calls explicitly. With
/// [`Session::with_revision_checks`], writes carry `If-Match` for the last
/// seen revision, so a write based on a stale view fails with 409 instead of
/// overwriting someone else's change.
#[derive(Debug)]
pub struct Session {
    token: String,
    revision: AtomicI64,
    check_revisions: bool,
}

impl Session {
    /// Session for an existing bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            revision: AtomicI64::new(UNKNOWN_REVISION),
            check_revisions: false,
        }
    }

    /// Send `If-Match` with the last seen revision on every write.
    pub fn with_revision_checks(mut self) -> Self {
        self.check_revisions = true;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Last collection revision seen in a response, if any.
    pub fn last_revision(&self) -> Option<i64> {
        match self.revision.load(Ordering::Acquire) {
            UNKNOWN_REVISION => None,
            rev => Some(rev),
        }
    }

    /// Forget the last seen revision; the next write is unconditional.
    pub fn reset_revision(&self) {
        self.revision.store(UNKNOWN_REVISION, Ordering::Release);
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(crate) fn expected_revision(&self) -> Option<i64> {
        if self.check_revisions {
            self.last_revision()
        } else {
            None
        }
    }

    pub(crate) fn observe_revision(&self, revision: i64) {
        self.revision.store(revision, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_checks_are_opt_in() {
        let plain = Session::new("t");
        plain.observe_revision(3);
        assert_eq!(plain.last_revision(), Some(3));
        assert_eq!(plain.expected_revision(), None);

        let checked = Session::new("t").with_revision_checks();
        assert_eq!(checked.expected_revision(), None);
        checked.observe_revision(4);
        assert_eq!(checked.expected_revision(), Some(4));
        checked.reset_revision();
        assert_eq!(checked.expected_revision(), None);
    }

    #[test]
    fn bearer_header_value() {
        assert_eq!(Session::new("abc").bearer(), "Bearer abc");
    }
}
