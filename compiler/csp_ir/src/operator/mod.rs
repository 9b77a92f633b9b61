//! Operator registry.
//!
//! Every operator the tree model knows is described by one static
//! [`OperatorInfo`] record: its token name in the interchange format, the
//! category of value it produces, how many children it takes, and whether
//! operand order and nesting matter. Lookup from a token name goes through
//! [`OperatorKind::from_token`]; there is no other way to discover kinds.
//!
//! The table is indexed by the enum discriminant, so `REGISTRY[kind as
//! usize].kind == kind` must hold for every entry (checked in tests).

use std::fmt;

use bitflags::bitflags;

/// Category of the value an operator (or leaf) produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// 0 or 1.
    Boolean,
    /// Any 64-bit integer.
    Integer,
}

/// Arity contract of an operator kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArityClass {
    /// Exactly `n` children.
    Fixed(usize),
    /// At least `min` children.
    Variadic { min: usize },
}

impl ArityClass {
    /// Whether `n` children satisfy this contract.
    #[inline]
    pub fn accepts(self, n: usize) -> bool {
        match self {
            ArityClass::Fixed(k) => n == k,
            ArityClass::Variadic { min } => n >= min,
        }
    }
}

impl fmt::Display for ArityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityClass::Fixed(n) => write!(f, "exactly {n}"),
            ArityClass::Variadic { min } => write!(f, "at least {min}"),
        }
    }
}

bitflags! {
    /// Algebraic properties of an operator.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct OpFlags: u8 {
        /// Operand order is semantically irrelevant.
        const SYMMETRIC = 1 << 0;
        /// Same-kind children may be merged into the parent.
        const ASSOCIATIVE = 1 << 1;
    }
}

/// Operator kinds, in registry order.
///
/// The declaration order is the type ordinal used to break ties when
/// sorting children of symmetric operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OperatorKind {
    Neg,
    Abs,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Sqr,
    Pow,
    Min,
    Max,
    Dist,
    Lt,
    Le,
    Ge,
    Gt,
    Ne,
    Eq,
    Set,
    In,
    NotIn,
    Not,
    And,
    Or,
    Xor,
    Iff,
    Imp,
    If,
}

/// Static metadata for one operator kind.
#[derive(Copy, Clone, Debug)]
pub struct OperatorInfo {
    pub kind: OperatorKind,
    pub token: &'static str,
    pub category: Category,
    pub arity: ArityClass,
    pub flags: OpFlags,
}

const NONE: OpFlags = OpFlags::empty();
const SYM: OpFlags = OpFlags::SYMMETRIC;
const SYM_ASSOC: OpFlags = OpFlags::SYMMETRIC.union(OpFlags::ASSOCIATIVE);

const fn info(
    kind: OperatorKind,
    token: &'static str,
    category: Category,
    arity: ArityClass,
    flags: OpFlags,
) -> OperatorInfo {
    OperatorInfo {
        kind,
        token,
        category,
        arity,
        flags,
    }
}

use ArityClass::{Fixed, Variadic};
use Category::{Boolean, Integer};

static REGISTRY: [OperatorInfo; 28] = [
    info(OperatorKind::Neg, "neg", Integer, Fixed(1), NONE),
    info(OperatorKind::Abs, "abs", Integer, Fixed(1), NONE),
    info(OperatorKind::Add, "add", Integer, Variadic { min: 2 }, SYM_ASSOC),
    info(OperatorKind::Sub, "sub", Integer, Fixed(2), NONE),
    info(OperatorKind::Mul, "mul", Integer, Variadic { min: 2 }, SYM_ASSOC),
    info(OperatorKind::Div, "div", Integer, Fixed(2), NONE),
    info(OperatorKind::Mod, "mod", Integer, Fixed(2), NONE),
    info(OperatorKind::Sqr, "sqr", Integer, Fixed(1), NONE),
    info(OperatorKind::Pow, "pow", Integer, Fixed(2), NONE),
    info(OperatorKind::Min, "min", Integer, Variadic { min: 1 }, SYM_ASSOC),
    info(OperatorKind::Max, "max", Integer, Variadic { min: 1 }, SYM_ASSOC),
    info(OperatorKind::Dist, "dist", Integer, Fixed(2), SYM),
    info(OperatorKind::Lt, "lt", Boolean, Variadic { min: 2 }, NONE),
    info(OperatorKind::Le, "le", Boolean, Variadic { min: 2 }, NONE),
    info(OperatorKind::Ge, "ge", Boolean, Variadic { min: 2 }, NONE),
    info(OperatorKind::Gt, "gt", Boolean, Variadic { min: 2 }, NONE),
    info(OperatorKind::Ne, "ne", Boolean, Variadic { min: 2 }, SYM),
    info(OperatorKind::Eq, "eq", Boolean, Variadic { min: 2 }, SYM),
    // A literal set is only ever the second operand of `in`/`notin`.
    info(OperatorKind::Set, "set", Integer, Variadic { min: 0 }, SYM),
    info(OperatorKind::In, "in", Boolean, Fixed(2), NONE),
    info(OperatorKind::NotIn, "notin", Boolean, Fixed(2), NONE),
    info(OperatorKind::Not, "not", Boolean, Fixed(1), NONE),
    info(OperatorKind::And, "and", Boolean, Variadic { min: 2 }, SYM_ASSOC),
    info(OperatorKind::Or, "or", Boolean, Variadic { min: 2 }, SYM_ASSOC),
    info(OperatorKind::Xor, "xor", Boolean, Variadic { min: 2 }, SYM_ASSOC),
    info(OperatorKind::Iff, "iff", Boolean, Variadic { min: 2 }, SYM),
    info(OperatorKind::Imp, "imp", Boolean, Fixed(2), NONE),
    info(OperatorKind::If, "if", Integer, Fixed(3), NONE),
];

impl OperatorKind {
    /// Every kind, in registry order.
    pub const ALL: [OperatorKind; 28] = [
        OperatorKind::Neg,
        OperatorKind::Abs,
        OperatorKind::Add,
        OperatorKind::Sub,
        OperatorKind::Mul,
        OperatorKind::Div,
        OperatorKind::Mod,
        OperatorKind::Sqr,
        OperatorKind::Pow,
        OperatorKind::Min,
        OperatorKind::Max,
        OperatorKind::Dist,
        OperatorKind::Lt,
        OperatorKind::Le,
        OperatorKind::Ge,
        OperatorKind::Gt,
        OperatorKind::Ne,
        OperatorKind::Eq,
        OperatorKind::Set,
        OperatorKind::In,
        OperatorKind::NotIn,
        OperatorKind::Not,
        OperatorKind::And,
        OperatorKind::Or,
        OperatorKind::Xor,
        OperatorKind::Iff,
        OperatorKind::Imp,
        OperatorKind::If,
    ];

    /// Registry record for this kind.
    #[inline]
    pub fn info(self) -> &'static OperatorInfo {
        &REGISTRY[self as usize]
    }

    /// Look up a kind by its token name (`"add"`, `"notin"`, ...).
    pub fn from_token(token: &str) -> Option<OperatorKind> {
        REGISTRY
            .iter()
            .find(|info| info.token == token)
            .map(|info| info.kind)
    }

    #[inline]
    pub fn token(self) -> &'static str {
        self.info().token
    }

    #[inline]
    pub fn category(self) -> Category {
        self.info().category
    }

    #[inline]
    pub fn arity(self) -> ArityClass {
        self.info().arity
    }

    #[inline]
    pub fn is_variadic(self) -> bool {
        matches!(self.arity(), ArityClass::Variadic { .. })
    }

    #[inline]
    pub fn is_symmetric(self) -> bool {
        self.info().flags.contains(OpFlags::SYMMETRIC)
    }

    #[inline]
    pub fn is_associative(self) -> bool {
        self.info().flags.contains(OpFlags::ASSOCIATIVE)
    }

    #[inline]
    pub fn produces_boolean(self) -> bool {
        self.category() == Category::Boolean
    }

    /// `lt le ge gt ne eq`.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            OperatorKind::Lt
                | OperatorKind::Le
                | OperatorKind::Ge
                | OperatorKind::Gt
                | OperatorKind::Ne
                | OperatorKind::Eq
        )
    }

    /// `not and or xor iff imp`.
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            OperatorKind::Not
                | OperatorKind::And
                | OperatorKind::Or
                | OperatorKind::Xor
                | OperatorKind::Iff
                | OperatorKind::Imp
        )
    }

    /// Integer-valued operators apart from `if` and `set`.
    pub fn is_arithmetic(self) -> bool {
        (self as u8) <= (OperatorKind::Dist as u8)
    }

    /// Kind obtained by swapping the two operands of a binary relation.
    ///
    /// `lt(a,b)` is `gt(b,a)`; `eq`/`ne` are their own inversion.
    pub fn arithmetic_inversion(self) -> Option<OperatorKind> {
        match self {
            OperatorKind::Lt => Some(OperatorKind::Gt),
            OperatorKind::Le => Some(OperatorKind::Ge),
            OperatorKind::Ge => Some(OperatorKind::Le),
            OperatorKind::Gt => Some(OperatorKind::Lt),
            OperatorKind::Ne | OperatorKind::Eq => Some(self),
            _ => None,
        }
    }

    /// Kind computing the negation of a binary relation or membership test.
    pub fn logical_negation(self) -> Option<OperatorKind> {
        match self {
            OperatorKind::Lt => Some(OperatorKind::Ge),
            OperatorKind::Le => Some(OperatorKind::Gt),
            OperatorKind::Ge => Some(OperatorKind::Lt),
            OperatorKind::Gt => Some(OperatorKind::Le),
            OperatorKind::Ne => Some(OperatorKind::Eq),
            OperatorKind::Eq => Some(OperatorKind::Ne),
            OperatorKind::In => Some(OperatorKind::NotIn),
            OperatorKind::NotIn => Some(OperatorKind::In),
            _ => None,
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
