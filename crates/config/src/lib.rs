mod config;
mod error;
mod loader;
mod style;
mod syntax;

pub mod path;

pub use self::config::*;
pub use self::error::*;
pub use self::loader::*;
pub use self::style::*;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
