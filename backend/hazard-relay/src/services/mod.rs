pub mod upstream;
pub mod water_services;
