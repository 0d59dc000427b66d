//! genai-relay: forwards text, image, file and audio prompts to a generative
//! model and returns the first candidate's text.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
