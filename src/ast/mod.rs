/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The expression and top-level node sums
/// - expressions: Definitions for the expression kinds
/// - declarations: Prototypes and function definitions
pub mod ast;
pub mod declarations;
pub mod expressions;
