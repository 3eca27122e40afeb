pub mod climate;
pub mod docs;
pub mod health;
pub mod home;

pub use climate::create_climate_routes;
pub use docs::create_docs_routes;
pub use health::create_health_routes;
pub use home::create_home_routes;
