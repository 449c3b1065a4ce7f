//! Host method-channel bridge.
//!
//! Lets a host layer (a UI shell, a playback controller) drive the
//! materializer through named method calls instead of linking against the
//! library API:
//!
//! ```text
//! host ──MethodCall{copyContentToCache, uri}──▶ MethodBridge ──▶ ContentMaterializer
//!      ◀─────────── MethodResult (success | error | not_implemented)
//! ```

pub mod call;
pub mod handler;

pub use call::{MethodCall, MethodResult};
pub use handler::{
    MethodBridge, ARG_URI, CHANNEL, CODE_COPY_ERROR, CODE_INVALID_ARGUMENT,
    METHOD_COPY_CONTENT_TO_CACHE,
};
