//! Clipdrop Processing Library
//!
//! The video pipeline: resolve metadata with the media tool, select a format,
//! acquire the chosen format to disk and publish it to storage.
//!
//! Stages are plain async functions over a [`MediaTool`]; [`VideoPipeline`] wires
//! them into the inspect and commit flows.

pub mod acquisition;
pub mod error;
pub mod pipeline;
pub mod publisher;
pub mod resolver;
pub mod selector;
pub mod tool;

pub use acquisition::{acquire, FALLBACK_FORMAT_SELECTOR};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{InspectOutcome, VideoPipeline};
pub use publisher::{publish, DEFAULT_CONTENT_TYPE};
pub use resolver::{parse_resolution, resolve};
pub use selector::select_best;
pub use tool::{MediaTool, ToolTimeouts};
