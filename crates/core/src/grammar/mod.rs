/// Section dispatch: matching parse nodes against directive tables.
pub mod dispatch;
/// JSON serialization helpers for the model and parse tree.
pub mod dump;
/// Indentation lexer: turns configuration lines into a section forest.
pub mod lexer;
