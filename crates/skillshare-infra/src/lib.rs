pub mod telemetry;
pub mod web;
