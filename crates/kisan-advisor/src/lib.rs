//! Kisan Advisor crate - the AI-facing half of the assistant.
//!
//! Turns farmer requests into prompts for a generative model behind the
//! [`AiTransport`] port, and turns the model's loosely structured replies back
//! into typed results:
//!
//! - [`parser`]: the TITLE / SUMMARY / ADDITIONAL ADVICE response protocol.
//! - [`citation`]: flattening of web-grounding metadata.
//! - [`session`]: a multi-turn chat with reset-on-failure.
//! - [`advisor`]: the one-shot advice operations.
//! - [`validation`]: form checks run before anything reaches the model.
//! - [`presentation`]: fixed user-facing text for every failure.

pub mod advisor;
pub mod citation;
pub mod error;
pub mod parser;
pub mod presentation;
pub mod prompts;
pub mod session;
pub mod transport;
pub mod validation;

pub use advisor::{FarmAdvisor, SearchResult};
pub use citation::{extract_citations, Citation, GroundingChunk, GroundingMetadata, WebSource};
pub use error::AdvisorError;
pub use parser::{parse_or_raw, parse_response, ParsedOutput, ParsedResponse};
pub use presentation::{list_or_empty, listing_fallback, offline_insights, Operation};
pub use session::{ConversationSession, SessionState};
pub use transport::{
    AiTransport, ChatChannel, ChatSetup, GenerateRequest, GenerateResponse, MockTransport, Part,
    ResponseFormat, TransportError,
};
pub use validation::FieldErrors;
