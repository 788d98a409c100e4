// ABOUTME: Command handlers for the stackdrop CLI.
// ABOUTME: Wire the real process runner and AWS clients into library operations.

mod deploy;
mod outputs;

pub use deploy::deploy;
pub use outputs::outputs;
