//! Implements LinkChooser. Inquire-based interactive prompt, plus a non-interactive fallback.

use crate::domain::{DomainError, TeamLink};
use crate::ports::LinkChooser;
use inquire::Select;
use tracing::debug;

fn link_label(i: usize, link: &TeamLink) -> String {
    match &link.title {
        Some(title) => format!("[{}] {} ({})", i, link.text, title),
        None => format!("[{}] {}", i, link.text),
    }
}

/// Asks the operator which link is the team.
#[derive(Debug, Default)]
pub struct PromptLinkChooser;

impl PromptLinkChooser {
    pub fn new() -> Self {
        Self
    }
}

impl LinkChooser for PromptLinkChooser {
    fn choose(&self, section: &str, links: &[TeamLink]) -> Result<usize, DomainError> {
        let options: Vec<String> = links
            .iter()
            .enumerate()
            .map(|(i, l)| link_label(i, l))
            .collect();
        let selected = Select::new(&format!("{}: select the correct team link", section), options.clone())
            .prompt()
            .map_err(|e| DomainError::Prompt(e.to_string()))?;
        // Map the selected display string back to its index
        options
            .iter()
            .position(|o| *o == selected)
            .ok_or_else(|| DomainError::Prompt(format!("unknown selection: {}", selected)))
    }
}

/// Always takes the first link. For unattended runs.
#[derive(Debug, Default)]
pub struct FirstLinkChooser;

impl FirstLinkChooser {
    pub fn new() -> Self {
        Self
    }
}

impl LinkChooser for FirstLinkChooser {
    fn choose(&self, section: &str, links: &[TeamLink]) -> Result<usize, DomainError> {
        debug!(
            section,
            candidates = links.len(),
            chosen = %links.first().map(|l| l.text.as_str()).unwrap_or(""),
            "taking first link"
        );
        Ok(0)
    }
}
