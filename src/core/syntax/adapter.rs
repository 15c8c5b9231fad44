//! Tree-sitter Adapter - Go declaration extraction
//!
//! This module wraps the Tree-sitter Go grammar. Parsing registers the source
//! with the run's [`FileSet`] before anything else, rejects sources that
//! Tree-sitter could only recover from, and hands back a [`DeclarationTree`]
//! whose top-level declarations can be walked once for taggable names.

use super::{DeclKind, TaggableIdentifier};
use crate::core::error::{Result, TagsError};
use crate::core::position::{FileHandle, FileSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Longest snippet of offending source quoted in a parse error
const MAX_SNIPPET: usize = 24;

/// Node kinds allowed after the package clause
const TOP_LEVEL_DECLS: &[&str] = &[
    "import_declaration",
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "const_declaration",
    "var_declaration",
];

/// Tree-sitter based parser for Go sources
pub struct GoParser {
    language: tree_sitter::Language,
}

impl GoParser {
    /// Create a parser, checking that the grammar loads
    pub fn new() -> Result<Self> {
        let parser = Self {
            language: tree_sitter_go::LANGUAGE.into(),
        };
        parser.get_parser()?;
        Ok(parser)
    }

    fn get_parser(&self) -> Result<tree_sitter::Parser> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| TagsError::Initialization(e.to_string()))?;
        Ok(parser)
    }

    /// Read and parse one file
    pub fn parse_file(&self, fset: &mut FileSet, path: &Path) -> Result<DeclarationTree> {
        let source = std::fs::read(path)
            .map_err(|e| TagsError::from(e).with_context(format!("reading {}", path.display())))?;
        self.parse_bytes(fset, path, source)
    }

    /// Parse in-memory source registered under `name`
    pub fn parse_source(
        &self,
        fset: &mut FileSet,
        name: &str,
        source: &str,
    ) -> Result<DeclarationTree> {
        self.parse_bytes(fset, Path::new(name), source.as_bytes().to_vec())
    }

    fn parse_bytes(
        &self,
        fset: &mut FileSet,
        path: &Path,
        source: Vec<u8>,
    ) -> Result<DeclarationTree> {
        let file = fset.register(path.to_string_lossy(), &source);
        let fset: &FileSet = fset;
        let mut parser = self.get_parser()?;

        // the grammar rejects a trailing var or type spec without a newline;
        // offsets are unchanged and the FileSet keeps the original size
        let mut source = source;
        if source.last().is_some_and(|&b| b != b'\n') {
            source.push(b'\n');
        }

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| parse_error(fset, file, path, 0, "failed to parse source".to_string()))?;

        check_syntax(fset, file, path, &tree, &source)?;
        debug!(
            path = %path.display(),
            bytes = source.len(),
            "parsed Go source"
        );

        Ok(DeclarationTree {
            path: path.to_path_buf(),
            file,
            source,
            tree,
        })
    }
}

/// A successfully parsed Go file
pub struct DeclarationTree {
    path: PathBuf,
    file: FileHandle,
    source: Vec<u8>,
    tree: tree_sitter::Tree,
}

impl DeclarationTree {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> FileHandle {
        self.file
    }

    /// Walk the top-level declarations, in source order
    pub fn identifiers(&self) -> impl Iterator<Item = TaggableIdentifier> {
        let mut found = Vec::new();
        let root = self.tree.root_node();
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            match child.kind() {
                "function_declaration" => self.push_name(&mut found, child, DeclKind::Function),
                "method_declaration" => self.push_name(&mut found, child, DeclKind::Method),
                "type_declaration" => self.extract_specs(&mut found, child, DeclKind::Type),
                "const_declaration" => self.extract_specs(&mut found, child, DeclKind::Const),
                "var_declaration" => self.extract_specs(&mut found, child, DeclKind::Var),
                _ => {}
            }
        }

        found.into_iter()
    }

    fn push_name(&self, out: &mut Vec<TaggableIdentifier>, node: tree_sitter::Node, kind: DeclKind) {
        if let Some(name_node) = node.child_by_field_name("name") {
            self.push_ident(out, name_node, kind);
        }
    }

    /// Specs may sit directly under the declaration or inside a `( ... )` list
    fn extract_specs(
        &self,
        out: &mut Vec<TaggableIdentifier>,
        node: tree_sitter::Node,
        kind: DeclKind,
    ) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "type_spec" | "type_alias" | "const_spec" | "var_spec" => {
                    let mut names = child.walk();
                    // a const spec's name field also covers the separating commas
                    for name_node in child
                        .children_by_field_name("name", &mut names)
                        .filter(|n| n.kind() == "identifier" || n.kind() == "type_identifier")
                    {
                        self.push_ident(out, name_node, kind);
                    }
                }
                k if k.ends_with("_spec_list") => self.extract_specs(out, child, kind),
                _ => {}
            }
        }
    }

    fn push_ident(&self, out: &mut Vec<TaggableIdentifier>, node: tree_sitter::Node, kind: DeclKind) {
        let name = self.node_text(node);
        if name.is_empty() {
            return;
        }
        out.push(TaggableIdentifier {
            name,
            pos: self.file.pos(node.start_byte()),
            kind,
        });
    }

    fn node_text(&self, node: tree_sitter::Node) -> String {
        node.utf8_text(&self.source).unwrap_or("").to_string()
    }
}

fn check_syntax(
    fset: &FileSet,
    file: FileHandle,
    path: &Path,
    tree: &tree_sitter::Tree,
    source: &[u8],
) -> Result<()> {
    let root = tree.root_node();

    if let Some(node) = first_error(root) {
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            let text = node.utf8_text(source).unwrap_or("");
            let snippet: String = text
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .chars()
                .take(MAX_SNIPPET)
                .collect();
            if snippet.is_empty() {
                "syntax error".to_string()
            } else {
                format!("syntax error: unexpected `{snippet}`")
            }
        };
        return Err(parse_error(fset, file, path, node.start_byte(), message));
    }

    let mut cursor = root.walk();
    let mut decls = root
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment");
    match decls.next() {
        Some(node) if node.kind() == "package_clause" => {}
        Some(node) => {
            return Err(parse_error(
                fset,
                file,
                path,
                node.start_byte(),
                format!("expected 'package', found {}", node.kind()),
            ))
        }
        None => {
            return Err(parse_error(
                fset,
                file,
                path,
                source.len(),
                "expected 'package', found EOF".to_string(),
            ))
        }
    }

    match decls.find(|n| !TOP_LEVEL_DECLS.contains(&n.kind())) {
        Some(stray) => Err(parse_error(
            fset,
            file,
            path,
            stray.start_byte(),
            "non-declaration statement outside function body".to_string(),
        )),
        None => Ok(()),
    }
}

/// Leftmost ERROR or MISSING node, if any
fn first_error(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found.or(Some(node))
}

fn parse_error(
    fset: &FileSet,
    file: FileHandle,
    path: &Path,
    offset: usize,
    message: String,
) -> TagsError {
    let (line, column) = fset
        .resolve(file.pos(offset))
        .map(|p| (p.line, p.column))
        .unwrap_or((1, 1));
    TagsError::Parse {
        path: path.to_path_buf(),
        line,
        column,
        message,
    }
}
