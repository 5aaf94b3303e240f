mod types;

pub use types::HealthResponse;
