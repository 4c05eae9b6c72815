pub mod ast;
pub mod codegen;
pub(crate) mod converter;
pub mod document;
pub mod errors;
pub mod metrics;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod schema_node;
