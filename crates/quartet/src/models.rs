//! Records passed between agents and model providers.
//!
//! Providers speak their own wire formats (OpenAI chat completions, Gemini
//! generateContent); everything is converted into these structs at the
//! provider boundary so agents never see vendor JSON.
pub mod message;
pub mod role;
pub mod tool;
