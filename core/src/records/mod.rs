pub mod record;
pub mod store;

pub use record::{GeoPosition, GeoRecord, GeoSample};
pub use store::RecordStore;
