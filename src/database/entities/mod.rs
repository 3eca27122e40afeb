pub mod measurement;
pub mod station;

pub use measurement::Entity as Measurements;
pub use station::Entity as Stations;

pub type MeasurementRecord = measurement::Model;
pub type StationRecord = station::Model;
