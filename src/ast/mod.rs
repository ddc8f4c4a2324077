/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: The expression tree and identifiers
/// - statements: The statement tree and declaration payloads
pub mod expressions;
pub mod statements;
