pub mod client;
pub mod issues;
pub mod repos;

pub use client::GitHubClient;
