pub mod alerts;
pub mod commands;
pub mod general;
