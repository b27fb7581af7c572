//! Progress bars (indicatif) for long-running loads.

use indicatif::{ProgressBar, ProgressStyle};

/// Bar over the tables of a load, labelled with the current table name.
pub fn table_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} tables {msg}")
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}
