mod consumer;
pub mod errors;
mod events;
pub mod job;
pub mod ports;
pub mod renderer;
pub mod settings;
pub mod snapshot;
pub mod state;
pub mod updater;
mod worker;
