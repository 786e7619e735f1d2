//! Pipeline entry point: Fetch → Parse → Resolve → Notify.

mod pipeline;

pub use pipeline::Pipeline;
