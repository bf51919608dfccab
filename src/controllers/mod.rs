pub mod cli;
pub mod export;
pub mod ports;
pub mod renderer;
