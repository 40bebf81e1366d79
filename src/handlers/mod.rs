// Handler modules
pub mod lint;

// Re-export all handler functions
pub use lint::{LintArgs, handle_lint};
