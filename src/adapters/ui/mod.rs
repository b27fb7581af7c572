pub mod chooser;
pub mod progress;

pub use chooser::{FirstLinkChooser, PromptLinkChooser};
