//! Syntax Module - Go declaration trees
//!
//! Go sources are parsed with Tree-sitter into a [`DeclarationTree`]. Only the
//! top level of the tree is ever walked: function and method names, type
//! names and every name of a `var`/`const` spec are taggable, nothing declared
//! inside a body is.
//!
//! # Example
//!
//! ```rust,ignore
//! use tago::core::{FileSet, GoParser};
//!
//! let mut fset = FileSet::new();
//! let parser = GoParser::new()?;
//! let tree = parser.parse_source(&mut fset, "demo.go", "package demo\n\nfunc Foo() {}\n")?;
//! for ident in tree.identifiers() {
//!     println!("{} at {}", ident.name, fset.resolve(ident.pos).unwrap());
//! }
//! ```

mod adapter;

pub use adapter::{DeclarationTree, GoParser};

use crate::core::position::Pos;

/// Which kind of top-level declaration introduced an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Function,
    Method,
    Type,
    Const,
    Var,
}

impl DeclKind {
    pub fn name(&self) -> &'static str {
        match self {
            DeclKind::Function => "func",
            DeclKind::Method => "method",
            DeclKind::Type => "type",
            DeclKind::Const => "const",
            DeclKind::Var => "var",
        }
    }
}

/// A top-level declaration name eligible for the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggableIdentifier {
    /// Identifier as written in the source
    pub name: String,
    /// Start of the identifier in the run's [`FileSet`](crate::core::FileSet)
    pub pos: Pos,
    pub kind: DeclKind,
}
