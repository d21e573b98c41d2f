//! Operator precedence for parenthesization.
//!
//! Levels are ordered from tightest (lowest number) to loosest binding. A
//! child operand is wrapped in parentheses when it binds more loosely than
//! its parent, or equally loosely on the side the parent does not associate
//! towards.

use super::Printer;
use fusion_parser::{BinaryOp, Node, NodeIndex, UnaryOp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    NonAssoc,
}

impl Assoc {
    /// Operand side this associativity groups towards: -1 left, 1 right.
    fn side(self) -> i8 {
        match self {
            Assoc::Left => -1,
            Assoc::Right => 1,
            Assoc::NonAssoc => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precedence {
    pub level: u16,
    pub assoc: Assoc,
}

const fn prec(level: u16, assoc: Assoc) -> Option<Precedence> {
    Some(Precedence { level, assoc })
}

fn binary_precedence(op: BinaryOp) -> Option<Precedence> {
    use Assoc::{Left, NonAssoc, Right};
    match op {
        BinaryOp::Pow => prec(0, Right),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => prec(40, Left),
        BinaryOp::Plus | BinaryOp::Minus => prec(50, Left),
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => prec(60, Left),
        BinaryOp::Concat => prec(65, Left),
        BinaryOp::Smaller
        | BinaryOp::SmallerOrEqual
        | BinaryOp::Greater
        | BinaryOp::GreaterOrEqual => prec(70, NonAssoc),
        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::Identical
        | BinaryOp::NotIdentical
        | BinaryOp::Spaceship => prec(80, NonAssoc),
        BinaryOp::BitAnd => prec(90, Left),
        BinaryOp::BitXor => prec(100, Left),
        BinaryOp::BitOr => prec(110, Left),
        BinaryOp::BooleanAnd => prec(120, Left),
        BinaryOp::BooleanOr => prec(130, Left),
        BinaryOp::Coalesce => prec(140, Right),
        BinaryOp::LogicalAnd => prec(180, Left),
        BinaryOp::LogicalXor => prec(190, Left),
        BinaryOp::LogicalOr => prec(200, Left),
    }
}

/// Precedence of an operator node; `None` for nodes that never need
/// parentheses as operands.
pub fn precedence_of(node: &Node) -> Option<Precedence> {
    use Assoc::{NonAssoc, Right};
    match node {
        Node::Binary(binary) => binary_precedence(binary.op),
        Node::Unary(unary) if unary.op == UnaryOp::Not => prec(30, Right),
        Node::Unary(_) | Node::Cast(_) | Node::Clone(_) => prec(10, Right),
        Node::Instanceof(_) => prec(20, NonAssoc),
        Node::Ternary(_) => prec(150, NonAssoc),
        // Compound and plain assignment share a level.
        Node::Assign(_) => prec(160, Right),
        Node::Print(_) => prec(170, Right),
        Node::Include(_) => prec(220, Right),
        _ => None,
    }
}

impl<'a> Printer<'a> {
    /// Whether `child` needs parentheses as the operand of `parent` at
    /// `side` (-1 left, 1 right).
    pub(crate) fn needs_parens(&self, parent: NodeIndex, child: NodeIndex, side: i8) -> bool {
        let (Some(parent), Some(child)) = (self.arena.get(parent), self.arena.get(child)) else {
            return false;
        };
        let (Some(outer), Some(inner)) = (precedence_of(parent), precedence_of(child)) else {
            return false;
        };
        inner.level > outer.level || (inner.level == outer.level && outer.assoc.side() != side)
    }

    /// Emit an operand of `parent`, parenthesized where precedence requires.
    pub(crate) fn emit_operand(&mut self, parent: NodeIndex, child: NodeIndex, side: i8) {
        if self.needs_parens(parent, child, side) {
            self.write("(");
            self.emit(child);
            self.write(")");
        } else {
            self.emit(child);
        }
    }
}
