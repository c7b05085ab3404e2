//! Leaf utilities for resource-table tooling.
//!
//! Two unrelated facilities with no composition between them:
//!
//! - [`resid`] — pack/unpack helpers for 32-bit resource identifiers
//!   (`0xPPTTEEEE`: package byte, type byte, 16-bit entry), plus
//!   predicates classifying packed values.
//! - [`CBox`] — a move-only owner of a heap block obtained from the C
//!   allocator, released exactly once via `free`.
//!
//! [`text`] additionally decodes UTF-16 buffers as found in mapped
//! resource tables (fixed element count, optionally NUL-terminated).
//!
//! The codec is pure bit arithmetic with no failure modes. `CBox` has no
//! runtime-checked errors either: provenance and pointee validity are
//! caller contracts, documented as `# Safety` sections on the `unsafe`
//! constructors. `unsafe` is confined to [`cbox`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cbox;
pub mod resid;
pub mod text;

pub use cbox::CBox;
pub use resid::ResId;
