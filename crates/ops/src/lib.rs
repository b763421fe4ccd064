#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level fetch orchestration for efetch
//!
//! This crate ties the pieces together: it validates and resolves a
//! [`FetchRequest`], runs the runtime and (optionally) codec downloads as
//! independent tasks, and assembles both archives into one merged stream
//! of file entries for the consuming packaging pipeline.
//!
//! [`FetchRequest`]: efetch_types::FetchRequest

mod context;
mod fetch;

pub use context::FetchContext;
pub use fetch::fetch;
