// AST (Abstract Syntax Tree) definitions for the expression evaluator

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Bitwise
    BitAnd,
    BitXor,
    BitOr,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::BitAnd => "&",
            BinOp::BitXor => "^",
            BinOp::BitOr => "|",
        }
    }
}

/// Unary operators
///
/// The grammar does not produce these yet; the evaluator already knows how
/// to fold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,   // +x
    Neg,    // -x
    BitNot, // ~x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Plus => "+",
            UnOp::Neg => "-",
            UnOp::BitNot => "~",
        }
    }
}

/// AST nodes for a single expression
///
/// Children are owned, so a node tree can never share or cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Literal {
        value: i64,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    pub fn literal(value: i64, location: SourceLocation) -> Self {
        AstNode::Literal { value, location }
    }

    pub fn unary(op: UnOp, operand: AstNode, location: SourceLocation) -> Self {
        AstNode::UnaryOp {
            op,
            operand: Box::new(operand),
            location,
        }
    }

    pub fn binary(op: BinOp, left: AstNode, right: AstNode, location: SourceLocation) -> Self {
        AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Literal { location, .. }
            | AstNode::UnaryOp { location, .. }
            | AstNode::BinaryOp { location, .. } => *location,
        }
    }

    /// Number of nodes in this tree, the root included.
    pub fn node_count(&self) -> usize {
        match self {
            AstNode::Literal { .. } => 1,
            AstNode::UnaryOp { operand, .. } => 1 + operand.node_count(),
            AstNode::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Structural equality that ignores source locations.
    ///
    /// Two parses of the same expression with different spacing produce
    /// the same shape but different columns.
    pub fn same_shape(&self, other: &AstNode) -> bool {
        match (self, other) {
            (AstNode::Literal { value: a, .. }, AstNode::Literal { value: b, .. }) => a == b,
            (
                AstNode::UnaryOp {
                    op: op_a,
                    operand: a,
                    ..
                },
                AstNode::UnaryOp {
                    op: op_b,
                    operand: b,
                    ..
                },
            ) => op_a == op_b && a.same_shape(b),
            (
                AstNode::BinaryOp {
                    op: op_a,
                    left: la,
                    right: ra,
                    ..
                },
                AstNode::BinaryOp {
                    op: op_b,
                    left: lb,
                    right: rb,
                    ..
                },
            ) => op_a == op_b && la.same_shape(lb) && ra.same_shape(rb),
            _ => false,
        }
    }
}

/// Fully parenthesized infix form, e.g. `((1 + 2) * 3)`.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Literal { value, .. } => write!(f, "{}", value),
            AstNode::UnaryOp { op, operand, .. } => write!(f, "({}{})", op.symbol(), operand),
            AstNode::BinaryOp {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op.symbol(), right),
        }
    }
}
