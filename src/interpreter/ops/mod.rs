pub mod binary;
pub mod unary;

// Operator semantics live here as free functions; the engine only walks the tree.
pub(crate) use binary::apply_binary;
pub(crate) use unary::apply_unary;
