//! API endpoint modules.

mod include;

pub use include::IncludeListApi;
