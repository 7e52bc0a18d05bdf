//! Prompt construction and upload-analysis parsing for the bill intake assistant.
//!
//! The assistant itself runs behind an external chat backend. This crate owns
//! the text crossing that boundary: the prompts sent out (carrying the current
//! intake status) and the bill-analysis text coming back from uploads.

pub mod analysis;
pub mod prompts;

pub use analysis::*;
pub use prompts::*;
