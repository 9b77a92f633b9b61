//! Tuple enumerators over Cartesian products of domains.
//!
//! Every enumerator walks the product in odometer order, evaluates the
//! program once per tuple with a single reused [`EvalContext`], and
//! classifies the tuple as a *support* (nonzero result) or a *conflict*
//! (zero). They differ only in what they keep.
//!
//! # Sampling bias
//!
//! [`enumerate_tuples`] without a fixed bias keeps both sides until more
//! than `sample_limit` tuples have been seen, then commits to the side
//! that is smaller at that moment (supports on a tie) and stops storing
//! the other. The whole product is still visited.

mod odometer;

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use csp_ir::Category;

use crate::config::EnumerationConfig;
use crate::errors::{EnumResult, EnumerateError};
use crate::interpreter::EvalContext;
use crate::program::CompiledProgram;

use odometer::Odometer;

/// Tuples of one side, and which side it is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enumerated {
    pub tuples: Vec<Vec<i64>>,
    /// `true` when `tuples` are supports, `false` for conflicts.
    pub supports: bool,
}

pub(crate) fn check_domains(program: &CompiledProgram, domains: &[Vec<i64>]) -> EnumResult<()> {
    if domains.len() == program.arity() {
        Ok(())
    } else {
        Err(EnumerateError::DomainCount {
            expected: program.arity(),
            got: domains.len(),
        })
    }
}

/// Evaluate every tuple of the product and hand it to `visit` with its
/// result. Returns the number of tuples evaluated.
fn walk<F>(program: &CompiledProgram, domains: &[Vec<i64>], mut visit: F) -> EnumResult<u64>
where
    F: FnMut(&[i64], i64) -> EnumResult<ControlFlow<()>>,
{
    check_domains(program, domains)?;
    let mut ctx = EvalContext::for_program(program);
    let mut odometer = Odometer::new(domains);
    let mut visited = 0u64;

    while let Some(tuple) = odometer.next_tuple() {
        let value = ctx.run(program, tuple)?;
        visited += 1;
        tracing::trace!(?tuple, value, "classified tuple");
        if visit(tuple, value)?.is_break() {
            break;
        }
    }
    Ok(visited)
}

/// Distinct results of `program` over the product, ascending.
///
/// A boolean program gives `[0, 1]` without enumerating.
pub fn possible_values(
    program: &CompiledProgram,
    domains: &[Vec<i64>],
    config: &EnumerationConfig,
) -> EnumResult<Vec<i64>> {
    if program.result_category() == Category::Boolean {
        return Ok(vec![0, 1]);
    }

    let mut values = BTreeSet::new();
    walk(program, domains, |_, value| {
        if !config.result_width.contains(value) {
            return Err(EnumerateError::Range {
                value,
                width: config.result_width,
            });
        }
        values.insert(value);
        Ok(ControlFlow::Continue(()))
    })?;
    Ok(values.into_iter().collect())
}

/// Supports or conflicts of `program` over the product.
///
/// `bias` fixes the side up front (`Some(true)` for supports). With `None`
/// the side is chosen by sampling; see the module docs.
pub fn enumerate_tuples(
    program: &CompiledProgram,
    domains: &[Vec<i64>],
    bias: Option<bool>,
    sample_limit: u32,
) -> EnumResult<Enumerated> {
    let mut supports = Vec::new();
    let mut conflicts = Vec::new();
    let mut bias = bias;
    let mut counter = 0u64;
    let mut frozen_at = None;

    let visited = walk(program, domains, |tuple, value| {
        if value != 0 {
            if bias != Some(false) {
                supports.push(tuple.to_vec());
            }
        } else if bias != Some(true) {
            conflicts.push(tuple.to_vec());
        }

        if bias.is_none() {
            counter += 1;
            if counter > u64::from(sample_limit) {
                let keep_supports = supports.len() <= conflicts.len();
                if keep_supports {
                    conflicts = Vec::new();
                } else {
                    supports = Vec::new();
                }
                bias = Some(keep_supports);
                frozen_at = Some(counter);
            }
        }
        Ok(ControlFlow::Continue(()))
    })?;

    let keep_supports = bias.unwrap_or(supports.len() <= conflicts.len());
    let tuples = if keep_supports { supports } else { conflicts };

    tracing::debug!(
        visited,
        kept = tuples.len(),
        supports = keep_supports,
        frozen_at = ?frozen_at,
        "enumerated tuples"
    );

    Ok(Enumerated {
        tuples,
        supports: keep_supports,
    })
}

/// Every tuple on which `program` holds.
pub fn generate_supports(program: &CompiledProgram, domains: &[Vec<i64>]) -> EnumResult<Vec<Vec<i64>>> {
    Ok(enumerate_tuples(program, domains, Some(true), 0)?.tuples)
}

/// Every tuple on which `program` fails.
pub fn generate_conflicts(program: &CompiledProgram, domains: &[Vec<i64>]) -> EnumResult<Vec<Vec<i64>>> {
    Ok(enumerate_tuples(program, domains, Some(false), 0)?.tuples)
}

/// The single conflicting tuple, if there is exactly one.
///
/// Stops at the second conflict.
pub fn unique_conflict(program: &CompiledProgram, domains: &[Vec<i64>]) -> EnumResult<Option<Vec<i64>>> {
    let mut found: Option<Vec<i64>> = None;
    let mut repeated = false;

    walk(program, domains, |tuple, value| {
        if value != 0 {
            return Ok(ControlFlow::Continue(()));
        }
        if found.is_some() {
            repeated = true;
            return Ok(ControlFlow::Break(()));
        }
        found = Some(tuple.to_vec());
        Ok(ControlFlow::Continue(()))
    })?;

    Ok(if repeated { None } else { found })
}

/// Tuples extended with their result as a trailing column.
///
/// With `target_domain` (sorted ascending), only rows whose result it
/// contains are kept. Kept results must fit `config.result_width`.
pub fn restricted_tuples(
    program: &CompiledProgram,
    domains: &[Vec<i64>],
    target_domain: Option<&[i64]>,
    config: &EnumerationConfig,
) -> EnumResult<Vec<Vec<i64>>> {
    let mut rows = Vec::new();

    walk(program, domains, |tuple, value| {
        if target_domain.is_some_and(|target| target.binary_search(&value).is_err()) {
            return Ok(ControlFlow::Continue(()));
        }
        if !config.result_width.contains(value) {
            return Err(EnumerateError::Range {
                value,
                width: config.result_width,
            });
        }
        let mut row = Vec::with_capacity(tuple.len() + 1);
        row.extend_from_slice(tuple);
        row.push(value);
        rows.push(row);
        Ok(ControlFlow::Continue(()))
    })?;

    Ok(rows)
}

/// Number of supports, without storing them.
pub fn count_supports(program: &CompiledProgram, domains: &[Vec<i64>]) -> EnumResult<u64> {
    let mut count = 0u64;
    walk(program, domains, |_, value| {
        if value != 0 {
            count += 1;
        }
        Ok(ControlFlow::Continue(()))
    })?;
    Ok(count)
}
