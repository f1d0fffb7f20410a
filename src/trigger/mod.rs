pub mod render;
pub mod resolve;
pub mod selector;
pub mod submit;

pub use resolve::resolve;
pub use submit::{submit, SubmissionResult};
