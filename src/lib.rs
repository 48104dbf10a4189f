pub mod config;
pub mod docker_compose;
pub mod error;
pub mod privilege;
pub mod runner;
pub mod selection;
