/// Enterprise license consumption
pub mod license;
