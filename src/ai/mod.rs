pub mod gemini;
pub mod groq;
pub mod huggingface;
pub mod intent;
pub mod provider;
pub mod sql;
