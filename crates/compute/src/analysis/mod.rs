pub mod overview;
pub mod spatial;
pub mod statistics;
pub mod temporal;

pub use overview::*;
pub use spatial::*;
pub use statistics::*;
pub use temporal::*;
