pub mod agent;
pub mod career;
pub mod config;
pub mod errors;
pub mod game;
pub mod models;
pub mod prompt_template;
pub mod providers;
pub mod student;
pub mod travel;
