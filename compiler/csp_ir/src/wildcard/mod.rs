//! Wildcard leaves for match templates.
//!
//! A wildcard never appears in a tree handed to the compiler; it is the
//! leaf vocabulary of templates. Each wildcard's acceptance rule lives in
//! the pattern matcher, this module only names them.

use std::fmt;

/// Fixed vocabulary of template wildcards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wildcard {
    /// Matches any subtree.
    Any,
    /// Matches when the caller's predicate accepts the subtree; children are not visited.
    AnyCond,
    Var,
    Val,
    VarOrVal,
    AnyAddVal,
    VarAddVal,
    Sub,
    Not,
    SetOfConstants,
    MinOfVars,
    MaxOfVars,
    LogicalOfVars,
    SumOfVars,
    SumOfVarOrVarTimesConst,
    SumOfVarTimesVar,
}

impl Wildcard {
    pub const ALL: [Wildcard; 16] = [
        Wildcard::Any,
        Wildcard::AnyCond,
        Wildcard::Var,
        Wildcard::Val,
        Wildcard::VarOrVal,
        Wildcard::AnyAddVal,
        Wildcard::VarAddVal,
        Wildcard::Sub,
        Wildcard::Not,
        Wildcard::SetOfConstants,
        Wildcard::MinOfVars,
        Wildcard::MaxOfVars,
        Wildcard::LogicalOfVars,
        Wildcard::SumOfVars,
        Wildcard::SumOfVarOrVarTimesConst,
        Wildcard::SumOfVarTimesVar,
    ];

    /// Name used in template listings.
    pub fn name(self) -> &'static str {
        match self {
            Wildcard::Any => "any",
            Wildcard::AnyCond => "anyc",
            Wildcard::Var => "var",
            Wildcard::Val => "val",
            Wildcard::VarOrVal => "var_or_val",
            Wildcard::AnyAddVal => "any_add_val",
            Wildcard::VarAddVal => "var_add_val",
            Wildcard::Sub => "sub",
            Wildcard::Not => "not",
            Wildcard::SetOfConstants => "set_of_constants",
            Wildcard::MinOfVars => "min_of_vars",
            Wildcard::MaxOfVars => "max_of_vars",
            Wildcard::LogicalOfVars => "logical_of_vars",
            Wildcard::SumOfVars => "sum_of_vars",
            Wildcard::SumOfVarOrVarTimesConst => "sum_of_var_or_var_times_const",
            Wildcard::SumOfVarTimesVar => "sum_of_var_times_var",
        }
    }

    pub fn from_name(name: &str) -> Option<Wildcard> {
        Wildcard::ALL.into_iter().find(|w| w.name() == name)
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
