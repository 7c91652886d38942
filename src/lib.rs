pub mod args;
pub mod cli;

mod autosave;
mod config;
mod firefly_api;
mod terminal;
