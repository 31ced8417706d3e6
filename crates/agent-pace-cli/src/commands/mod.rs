pub mod cap;
pub mod snapshot;
pub mod workdays;
