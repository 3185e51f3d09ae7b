pub mod api_docs;

pub use api_docs::{DocumentationRecord, DocumentationRequest, HttpMethod, Parameters};
