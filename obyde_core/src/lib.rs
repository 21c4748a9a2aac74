//! `obyde_core` is the core library for [obyde](https://github.com/khalednassar/obyde),
//! which publishes markdown vaults (mainly Obsidian) as Jekyll or Hugo posts.
//! It provides a fence-aware scanner, a block rewriting engine, wikilink
//! extraction and resolution, and the vault publisher built on top of them.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Note (*.md)
//!   → Document (splits front matter from the body)
//!   → find/replace (per-note regex rules from the front matter)
//!   → Segmenter (splits the body into plain and preformatted blocks)
//!   → Rewriting engine (applies the transformer pipeline, e.g. ==highlights==)
//!   → Link resolver (turns [[wikilinks]] into asset or post links)
//!   → Post (DATE-slug.md)
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: The fence lexer and the run-measurement primitive shared by
//!   the segmenter and the link extractor.
//! - [`links`]: Wikilink extraction outside of fences.
//! - [`config`]: Configuration loading from `obyde.yaml`.
//! - [`document`]: Front matter handling, post dates, and find/replace.
//! - [`vault`]: Directory walking, slugs, and content-hashed assets.
//! - [`resolve`]: Mapping wikilinks to asset paths and post permalinks.
//! - [`publish`]: Planning and executing a whole vault publish.
//!
//! ## Key Types
//!
//! - [`Block`]: A plain or preformatted span of a note body.
//! - [`RewritingTransformer`]: A pure rewrite of normal blocks, preformatted
//!   blocks, and front matter.
//! - [`RewritingPipeline`]: An ordered list of transformers acting as one.
//! - [`RewritingEngine`]: Applies a transformer to a note and reassembles it.
//!
//! ## Quick Start
//!
//! ```rust
//! use obyde_core::HighlightTransformer;
//! use obyde_core::RewritingEngine;
//! use obyde_core::RewritingPipeline;
//! use obyde_core::segment;
//!
//! let blocks = segment("Some ==marked== text and `==code==`.").unwrap();
//! let pipeline = RewritingPipeline::default().with_phase(HighlightTransformer);
//! let engine = RewritingEngine::new(pipeline);
//! let (_, body) = engine.rewrite("", blocks);
//!
//! assert_eq!(body, "Some <mark>marked</mark> text and `==code==`.");
//! ```

pub use blocks::*;
pub use engine::*;
pub use error::*;
pub use highlight::*;
pub use transform::*;

mod blocks;
pub mod config;
pub mod document;
mod engine;
#[allow(unused_assignments)]
mod error;
mod highlight;
pub mod links;
pub mod publish;
pub mod resolve;
pub mod scanner;
mod transform;
pub mod vault;
