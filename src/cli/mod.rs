//! Console front end: arguments, the interactive seat, text commands and
//! event rendering.

pub mod args;
pub mod commands;
mod console;
mod view;

pub use args::{log_filter, Args};
pub use commands::Command;
pub use console::ConsolePolicy;
pub use view::ConsoleView;
