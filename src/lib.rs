//! # QuoteScript — declarative queries over a quotes corpus
//!
//! A QuoteScript program declares up to three field filters (the ABOVE
//! section) and a selection policy (the BELOW section):
//!
//! ```text
//! QUOTE:  "freedom" exact
//! AUTHOR: "Camus"
//! THEME:  "absurd" loose
//! TOP: 5
//! RANDOM: 2
//! ```
//!
//! reads as: of the quotes whose text contains the whole word `freedom`,
//! whose author forgivingly matches `Camus`, and which carry a tag loosely
//! matching `absurd`, keep the first five in store order, then pick two of
//! those at random.
//!
//! ## Pipeline
//!
//! | Phase    | Module        | Transformation                 |
//! |----------|---------------|--------------------------------|
//! | Lex      | [`lexer`]     | source text → tokens           |
//! | Parse    | [`parser`]    | tokens → [`ast::Program`]      |
//! | Analyze  | [`semantic`]  | validate/normalize the tree    |
//! | Lower    | [`ir`]        | tree → flat [`ir::Ir`]         |
//! | Optimize | [`optimizer`] | trim/prune the IR              |
//! | Execute  | [`executor`]  | IR × records → result set      |
//!
//! Every phase is synchronous and pure; only the [`store`] touches the
//! outside world, and only at the host boundary.
//!
//! ## Quick example
//!
//! ```rust
//! use quotescript::store::QuoteRecord;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let records = vec![QuoteRecord {
//!     id: 1,
//!     content: "while there is life there is hope".into(),
//!     author: "Cicero".into(),
//!     tags: Some("['Hope']".into()),
//! }];
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let hits = quotescript::run("QUOTE: \"hope\" exact\n", &records, &mut rng).unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod executor;
pub mod ir;
pub mod lexer;
pub mod matching;
pub mod optimizer;
pub mod parser;
pub mod semantic;
pub mod store;

pub mod prelude {
    pub use crate::ast::{Field, FilterDecl, MatchMode, Program, Selection};
    pub use crate::error::*;
    pub use crate::ir::{FilterIr, Ir};
    pub use crate::store::{QuoteRecord, QuoteStore};
    pub use crate::{compile, run};
}

use crate::error::QuoteScriptResult;
use crate::ir::Ir;
use crate::store::QuoteRecord;
use rand::Rng;

/// Compile QuoteScript source down to optimized IR.
///
/// Runs lexing, parsing, semantic analysis, lowering and optimization,
/// halting at the first failing phase.
pub fn compile(source: &str) -> QuoteScriptResult<Ir> {
    let tokens = lexer::lex(source)?;
    let program = parser::parse(&tokens)?;
    let program = semantic::analyze(program)?;
    let ir = ir::lower(&program);
    Ok(optimizer::optimize(ir))
}

/// Compile and execute against an immutable record snapshot.
///
/// The caller supplies the randomness source for the RANDOM step, which
/// keeps independent calls independently seedable (and tests
/// deterministic).
pub fn run<R: Rng + ?Sized>(
    source: &str,
    records: &[QuoteRecord],
    rng: &mut R,
) -> QuoteScriptResult<Vec<QuoteRecord>> {
    let ir = compile(source)?;
    Ok(executor::execute(&ir, records, rng))
}
