//! Fireflies → Claude → Slack meeting summary relay.
//!
//! A webhook names a finished Fireflies transcript; the relay fetches it,
//! asks Claude for a structured Japanese summary, strips stray emoji and
//! posts the result to the Slack channel matching the meeting title.

pub mod api;
pub mod app;
pub mod channels;
pub mod cli;
pub mod config;
pub mod global;
pub mod pipeline;
pub mod publish;
pub mod sanitizer;
pub mod summary;
pub mod transcript;
