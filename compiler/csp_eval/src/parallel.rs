//! Parallel support/conflict generation (`parallel` feature).
//!
//! The product is split by the values of the first domain; each value is
//! enumerated as its own task with its own evaluation context. Results are
//! concatenated in domain order, so the output equals the sequential one.

use rayon::prelude::*;

use crate::enumerate::{check_domains, enumerate_tuples};
use crate::errors::EnumResult;
use crate::program::CompiledProgram;

/// [`generate_supports`](crate::generate_supports) across the rayon pool.
pub fn par_generate_supports(program: &CompiledProgram, domains: &[Vec<i64>]) -> EnumResult<Vec<Vec<i64>>> {
    par_collect_side(program, domains, true)
}

/// [`generate_conflicts`](crate::generate_conflicts) across the rayon pool.
pub fn par_generate_conflicts(program: &CompiledProgram, domains: &[Vec<i64>]) -> EnumResult<Vec<Vec<i64>>> {
    par_collect_side(program, domains, false)
}

fn par_collect_side(program: &CompiledProgram, domains: &[Vec<i64>], supports: bool) -> EnumResult<Vec<Vec<i64>>> {
    check_domains(program, domains)?;
    let Some((first, rest)) = domains.split_first() else {
        return Ok(enumerate_tuples(program, domains, Some(supports), 0)?.tuples);
    };

    let chunks = first
        .par_iter()
        .map(|&value| {
            let mut sub = Vec::with_capacity(domains.len());
            sub.push(vec![value]);
            sub.extend_from_slice(rest);
            enumerate_tuples(program, &sub, Some(supports), 0).map(|side| side.tuples)
        })
        .collect::<EnumResult<Vec<_>>>()?;

    tracing::debug!(tasks = chunks.len(), supports, "parallel enumeration complete");
    Ok(chunks.into_iter().flatten().collect())
}
