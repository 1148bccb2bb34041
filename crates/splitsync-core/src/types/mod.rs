mod envelope;
mod ranges;
mod route;

pub use envelope::*;
pub use ranges::*;
pub use route::*;
