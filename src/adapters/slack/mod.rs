mod client;

pub use client::{SlackMessenger, DEFAULT_API_URL};
