// Sales-fit analysis: prompt composition, model invocation and reply normalization.
// All generation calls go through llm_client — no provider HTTP here.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
