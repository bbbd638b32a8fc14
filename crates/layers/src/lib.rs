//! Record-to-visual mapping for the world map: palettes, per-record encoding,
//! connection graphs, markers and regional fills.

pub mod connections;
pub mod encoding;
pub mod markers;
pub mod regions;
pub mod symbology;

pub use connections::*;
pub use encoding::*;
pub use markers::*;
pub use regions::*;
pub use symbology::*;
