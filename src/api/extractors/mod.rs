//! Custom extractors for request handling.

pub mod validated_json;

pub use validated_json::ValidatedJson;
