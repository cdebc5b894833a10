/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node arena, parent/child linkage and semantic annotations
/// - nodes: One node variant per grammar production
/// - selection: Selection (FIRST) sets used for one-token lookahead
/// - printer: Tree dump and re-serialization into source text
pub mod ast;
pub mod nodes;
pub mod printer;
pub mod selection;
