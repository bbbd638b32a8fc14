//! Record types shared by the API server and the dashboard.
//!
//! Every record kind is bound to exactly one [`Category`]; the wire format is
//! the JSON row shape the API serves (snake_case fields, RFC 3339 timestamps).

pub mod category;
pub mod climate;
pub mod disaster;
pub mod environmental;
pub mod lenient;
pub mod mock;
pub mod severity;
pub mod snapshot;
pub mod sync;

pub use category::*;
pub use climate::*;
pub use disaster::*;
pub use environmental::*;
pub use severity::*;
pub use snapshot::*;
pub use sync::*;

use chrono::{DateTime, Utc};
use foundation::math::GeoPoint;

/// Common view over the three record kinds.
pub trait Record {
    const CATEGORY: Category;

    fn id(&self) -> &str;
    fn location(&self) -> &str;
    fn point(&self) -> GeoPoint;
    fn timestamp(&self) -> DateTime<Utc>;
}
