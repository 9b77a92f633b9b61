//! Cartesian product walk in odometer order (last position fastest).

use smallvec::SmallVec;

/// Walks every tuple of `domains[0] × … × domains[n-1]`.
///
/// Lends the current tuple instead of allocating one per step. The product
/// of zero domains is the single empty tuple; any empty domain makes the
/// product empty.
pub(crate) struct Odometer<'d> {
    domains: &'d [Vec<i64>],
    indices: SmallVec<[usize; 8]>,
    tuple: SmallVec<[i64; 8]>,
    started: bool,
    done: bool,
}

impl<'d> Odometer<'d> {
    pub(crate) fn new(domains: &'d [Vec<i64>]) -> Self {
        Odometer {
            domains,
            indices: SmallVec::from_elem(0, domains.len()),
            tuple: SmallVec::with_capacity(domains.len()),
            started: false,
            done: domains.iter().any(Vec::is_empty),
        }
    }

    pub(crate) fn next_tuple(&mut self) -> Option<&[i64]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            let domains = self.domains;
            self.tuple.extend(domains.iter().map(|d| d[0]));
            return Some(&self.tuple);
        }

        let domains = self.domains;
        let mut position = domains.len();
        loop {
            if position == 0 {
                self.done = true;
                return None;
            }
            position -= 1;
            let domain = &domains[position];
            self.indices[position] += 1;
            if self.indices[position] < domain.len() {
                self.tuple[position] = domain[self.indices[position]];
                return Some(&self.tuple);
            }
            self.indices[position] = 0;
            self.tuple[position] = domain[0];
        }
    }
}
