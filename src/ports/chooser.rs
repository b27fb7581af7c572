//! Link disambiguation port. Picks the team link when a cell holds several.

use crate::domain::{DomainError, TeamLink};

/// Strategy for choosing among several links in one team cell.
///
/// Implemented by adapters (interactive prompt, first-link). Called from
/// synchronous HTML parsing, so this port is not async.
pub trait LinkChooser: Send + Sync {
    /// Return the index of the correct link in `links` (never empty, len > 1).
    ///
    /// # Arguments
    /// * `section` - Section heading the cell belongs to, for context
    /// * `links` - Candidate links in document order
    fn choose(&self, section: &str, links: &[TeamLink]) -> Result<usize, DomainError>;
}
