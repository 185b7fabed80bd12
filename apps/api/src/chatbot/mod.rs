//! Prompt construction for the external text-generation service.
//!
//! Every builder here is a pure function over already-loaded rows: it reads
//! shop/product/chat records, formats ordered text sections, and returns a
//! single system-prompt string. No builder touches the database or the
//! network, and none of them can fail — malformed tag JSON degrades to
//! verbatim rendering, missing optional fields fall back to fixed text.
//!
//! Downstream generation models are sensitive to prompt phrasing, so the
//! literal section layout (headers, labels, ordering) is part of the
//! contract and pinned by the tests in `builder.rs`.

pub mod builder;
pub mod handlers;
pub mod prompts;
pub mod tags;

pub use builder::{
    build_comparison_prompt, build_generic_prompt, build_shop_prompt, build_support_prompt,
};
