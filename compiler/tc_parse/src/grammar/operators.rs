//! Operator matching helpers.

use tc_ir::{AssignOp, BinaryOp, TokenKind, UnaryOp, UpdateOp};

use crate::Parser;

impl Parser<'_> {
    /// Binary operator at the cursor, if any. `in` is excluded inside a
    /// `for` head.
    pub(crate) fn match_binary_op(&self) -> Option<BinaryOp> {
        let op = match self.cursor.current_kind() {
            TokenKind::StarStar => BinaryOp::Exp,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Shl => BinaryOp::Shl,
            TokenKind::Shr => BinaryOp::Shr,
            TokenKind::UShr => BinaryOp::UShr,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Instanceof => BinaryOp::Instanceof,
            TokenKind::In if self.allow_in => BinaryOp::In,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::EqEqEq => BinaryOp::StrictEq,
            TokenKind::NotEqEq => BinaryOp::StrictNotEq,
            TokenKind::Amp => BinaryOp::BitAnd,
            TokenKind::Caret => BinaryOp::BitXor,
            TokenKind::Pipe => BinaryOp::BitOr,
            TokenKind::AmpAmp => BinaryOp::And,
            TokenKind::PipePipe => BinaryOp::Or,
            TokenKind::QuestionQuestion => BinaryOp::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            _ => None,
        }
    }

    pub(crate) fn match_update_op(&self) -> Option<UpdateOp> {
        match self.cursor.current_kind() {
            TokenKind::PlusPlus => Some(UpdateOp::Increment),
            TokenKind::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        }
    }

    pub(crate) fn match_assign_op(&self) -> Option<AssignOp> {
        match self.cursor.current_kind() {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::Add),
            TokenKind::MinusEq => Some(AssignOp::Sub),
            TokenKind::StarEq => Some(AssignOp::Mul),
            TokenKind::SlashEq => Some(AssignOp::Div),
            TokenKind::PercentEq => Some(AssignOp::Mod),
            TokenKind::StarStarEq => Some(AssignOp::Exp),
            TokenKind::ShlEq => Some(AssignOp::Shl),
            TokenKind::ShrEq => Some(AssignOp::Shr),
            TokenKind::UShrEq => Some(AssignOp::UShr),
            TokenKind::AmpEq => Some(AssignOp::BitAnd),
            TokenKind::PipeEq => Some(AssignOp::BitOr),
            TokenKind::CaretEq => Some(AssignOp::BitXor),
            TokenKind::AmpAmpEq => Some(AssignOp::And),
            TokenKind::PipePipeEq => Some(AssignOp::Or),
            TokenKind::QuestionQuestionEq => Some(AssignOp::Coalesce),
            _ => None,
        }
    }
}
