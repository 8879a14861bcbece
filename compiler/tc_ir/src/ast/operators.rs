//! Operators of the host language subset.

/// Binary operators, including the logical short-circuit forms.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,

    // Shift
    Shl,
    Shr,
    UShr,

    // Relational
    Lt,
    Gt,
    LtEq,
    GtEq,
    Instanceof,
    In,

    // Equality
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,

    // Bitwise
    BitAnd,
    BitXor,
    BitOr,

    // Logical
    And,
    Or,
    Coalesce,
}

impl BinaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "**",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Instanceof => "instanceof",
            Self::In => "in",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
            Self::Coalesce => "??",
        }
    }

    /// Precedence level. Higher number = binds less tightly.
    ///
    /// - 1: `**`
    /// - 2: `*` `/` `%`
    /// - 3: `+` `-`
    /// - 4: `<<` `>>` `>>>`
    /// - 5: `<` `>` `<=` `>=` `instanceof` `in`
    /// - 6: `==` `!=` `===` `!==`
    /// - 7: `&`
    /// - 8: `^`
    /// - 9: `|`
    /// - 10: `&&`
    /// - 11: `||`
    /// - 12: `??`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Exp => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Add | Self::Sub => 3,
            Self::Shl | Self::Shr | Self::UShr => 4,
            Self::Lt | Self::Gt | Self::LtEq | Self::GtEq | Self::Instanceof | Self::In => 5,
            Self::Eq | Self::NotEq | Self::StrictEq | Self::StrictNotEq => 6,
            Self::BitAnd => 7,
            Self::BitXor => 8,
            Self::BitOr => 9,
            Self::And => 10,
            Self::Or => 11,
            Self::Coalesce => 12,
        }
    }

    /// `**` is the only right-associative binary operator.
    pub const fn is_right_assoc(self) -> bool {
        matches!(self, Self::Exp)
    }

    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Coalesce)
    }
}

/// Prefix unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Not,
    BitNot,
    Plus,
    Neg,
    Typeof,
    Void,
    Delete,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Typeof => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }

    /// Word operators need a space before their operand.
    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::Typeof | Self::Void | Self::Delete)
    }
}

/// `++` and `--`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

/// Assignment operators. `Assign` is plain `=`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Coalesce,
}

impl AssignOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Mod => "%=",
            Self::Exp => "**=",
            Self::Shl => "<<=",
            Self::Shr => ">>=",
            Self::UShr => ">>>=",
            Self::BitAnd => "&=",
            Self::BitOr => "|=",
            Self::BitXor => "^=",
            Self::And => "&&=",
            Self::Or => "||=",
            Self::Coalesce => "??=",
        }
    }
}
