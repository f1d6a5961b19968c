//! `mathenv` rewrites custom-delimited environment blocks (theorem, lemma,
//! proof, …) in a parsed markdown tree into formatted, auto-numbered
//! content. Blocks are delimited by marker paragraphs:
//!
//! ```markdown
//! ::math-env-start{theorem}[name="Euler"]
//!
//! For all real x, e^(ix) = cos x + i sin x.
//!
//! ::math-env-end{theorem}
//! ```
//!
//! which renders as a paragraph starting with bold `Theorem 1 (Euler). `.
//! Environments sharing a counter label share one numbering sequence, and
//! the proof environment appends its end mark (`■` by default).
//!
//! ## Processing Pipeline
//!
//! ```text
//! mdast tree (markdown::to_mdast or any mdast producer)
//!   → Marker scanner (one left-to-right pass over the top-level children)
//!   → Start/end marker analyzers (grammar, environment, nesting checks)
//!   → Option resolution (inline params > configured options > defaults)
//!   → Environment renderer (splices decoration into the buffered content)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use mathenv::{MathEnvOptions, process};
//!
//! let options = MathEnvOptions::default();
//! let tree = process(
//! 	"::math-env-start{proof}\n\nsomething\n\n::math-env-end{proof}\n",
//! 	&options,
//! )
//! .unwrap();
//! assert_eq!(tree.children.len(), 1);
//! ```
//!
//! Applying the transform to its own output is undefined: markers are
//! consumed, so the result of a second pass carries no guarantees.
//!
//! Serializing the rewritten tree back to markdown or HTML is out of scope;
//! pair this crate with an mdast serializer of your choice.

pub use error::*;
pub use markers::*;
pub use options::*;
pub use params::*;
pub use render::*;
pub use scanner::*;

mod error;
mod markers;
mod options;
mod params;
mod render;
mod scanner;

#[cfg(test)]
mod __fixtures;
