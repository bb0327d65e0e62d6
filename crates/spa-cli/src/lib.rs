//! Library side of the `spa-shell` command-line driver.

pub mod logging;
pub mod settings;
pub mod shell;
