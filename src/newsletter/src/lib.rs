pub mod adapters;
pub mod assembler;
pub mod cli;
pub mod configuration;
pub mod domain;
pub mod prompt;
pub mod routes;
pub mod service;
pub mod startup;
pub mod state;
pub mod utils;
