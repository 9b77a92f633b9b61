//! Postfix (RPN) token streams.
//!
//! A tree is linearized in post-order: leaves first, each operator after
//! its children. Variadic operators carry their resolved arity as a
//! numeric prefix so that the stream alone determines the tree shape:
//!
//! ```text
//! lt(add(x,y,z),10)  with scope [x, y, z]   =>   %0 %1 %2 3add 10 2lt
//! ```
//!
//! Streams can also be read back from text with [`tokenize_postfix`]. In
//! text, variables are only ever written as `%i` slots; any other word
//! must name an operator, and words that do not are kept as
//! [`Token::Unknown`] for the compiler to report.

use std::fmt;

use logos::Logos;

use crate::stack::ensure_sufficient_stack;
use crate::{ExpressionNode, Leaf, OperatorKind, VarRef};

/// One element of a postfix stream.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    Int(i64),
    /// `%i`: a parameter, or a variable at position `i` of the scope.
    Slot(u32),
    /// A variable emitted without a scope (or missing from it).
    Var(VarRef),
    Op { kind: OperatorKind, arity: usize },
    /// Word that names no operator.
    Unknown(Box<str>),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(k) => write!(f, "{k}"),
            Token::Slot(i) => write!(f, "%{i}"),
            Token::Var(v) => write!(f, "{v}"),
            Token::Op { kind, arity } if kind.is_variadic() => write!(f, "{arity}{kind}"),
            Token::Op { kind, .. } => write!(f, "{kind}"),
            Token::Unknown(word) => f.write_str(word),
        }
    }
}

impl ExpressionNode {
    /// Post-order token stream of this tree.
    ///
    /// With a scope, a variable at position `i` of the scope is emitted as
    /// `Slot(i)`; without one (or when absent from it) as `Var`. Parameters
    /// are always slots. Wildcards have no postfix form and come out as
    /// `Unknown`.
    pub fn to_postfix(&self, scope: Option<&[VarRef]>) -> Vec<Token> {
        let mut out = Vec::with_capacity(self.size());
        emit(self, scope, &mut out);
        out
    }
}

fn emit(node: &ExpressionNode, scope: Option<&[VarRef]>, out: &mut Vec<Token>) {
    ensure_sufficient_stack(|| match node {
        ExpressionNode::Leaf(Leaf::Int(k)) => out.push(Token::Int(*k)),
        ExpressionNode::Leaf(Leaf::Parameter(i)) => out.push(Token::Slot(*i)),
        ExpressionNode::Leaf(Leaf::Variable(v)) => {
            let position = scope.and_then(|s| s.iter().position(|w| w == v));
            match position.and_then(|p| u32::try_from(p).ok()) {
                Some(slot) => out.push(Token::Slot(slot)),
                None => out.push(Token::Var(v.clone())),
            }
        }
        ExpressionNode::Leaf(Leaf::Wildcard(w)) => out.push(Token::Unknown(w.name().into())),
        ExpressionNode::Operator { kind, children } => {
            for child in children {
                emit(child, scope, out);
            }
            out.push(Token::Op {
                kind: *kind,
                arity: children.len(),
            });
        }
    });
}

/// Render a stream as space-separated text.
pub fn postfix_to_string(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n,]+")]
enum RawToken<'src> {
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"%[0-9]+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    Slot(u32),

    #[regex(r"[0-9]+[a-z]+")]
    Prefixed(&'src str),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word(&'src str),
}

/// Read a textual postfix stream such as `"%0 %1 2add 3 lt"`.
///
/// Unprefixed variadic operators are read as their binary form.
pub fn tokenize_postfix(source: &str) -> Vec<Token> {
    let mut out = Vec::new();
    for (raw, span) in RawToken::lexer(source).spanned() {
        let token = match raw {
            Ok(RawToken::Int(k)) => Token::Int(k),
            Ok(RawToken::Slot(i)) => Token::Slot(i),
            Ok(RawToken::Prefixed(word)) => prefixed_operator(word),
            Ok(RawToken::Word(word)) => match OperatorKind::from_token(word) {
                Some(kind) => Token::Op {
                    kind,
                    arity: default_arity(kind),
                },
                None => Token::Unknown(word.into()),
            },
            Err(()) => Token::Unknown(source[span].into()),
        };
        out.push(token);
    }
    out
}

/// `"3add"` → `add` with arity 3.
fn prefixed_operator(word: &str) -> Token {
    let split = word
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(word.len());
    let (digits, name) = word.split_at(split);
    match (digits.parse::<usize>(), OperatorKind::from_token(name)) {
        (Ok(arity), Some(kind)) => Token::Op { kind, arity },
        _ => Token::Unknown(word.into()),
    }
}

fn default_arity(kind: OperatorKind) -> usize {
    match kind.arity() {
        crate::ArityClass::Fixed(n) => n,
        crate::ArityClass::Variadic { .. } => 2,
    }
}
