pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod run;
pub mod setup;
pub mod storage;
