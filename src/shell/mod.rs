//! External program execution and shell environment helpers.

pub mod command;
pub mod path;
pub mod platform;

pub use command::{display_command, run, CommandOptions, CommandOutput};
pub use path::{find_executable, is_executable, parse_system_path, resolve_tool_path};
pub use platform::{is_ci, ShellType};
