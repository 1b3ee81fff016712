mod fs;
mod source;
mod stylesheet;

pub use fs::*;
pub use source::*;
pub use stylesheet::*;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
