pub mod bounds;
pub mod math;

// Foundation crate: small, well-tested geo primitives only.
pub use bounds::*;
pub use math::*;
