pub mod buffer;
pub mod config;
pub mod docstub_service;
pub mod engine;
pub mod errors;
pub mod path_validation;
pub mod render;
pub mod response_formatter;
pub mod scanner;
pub mod stub_config;
pub mod tool_router;
pub mod tools;
pub mod trigger;
pub mod types;

// Re-export commonly used types
pub use buffer::{LineBuffer, SourcePosition};
pub use engine::{StubEngine, StubQuery, StubResult};
pub use render::{CommentStyle, StubEdit, StubRenderer};
pub use scanner::{Dialect, Parameter, QueryDirection, ReturnTagPolicy};
pub use types::*;
