/*
    Composition and simplification
*/

use tracing::trace;

use super::*;

impl UnitConverter {
    /// Returns the converter applying `self` first and `that` second.
    ///
    /// Identities are absorbed, converters of the same family are fused
    /// into one, and anything else becomes a flattened chain in which
    /// adjacent steps are fused wherever possible. Mathematically equal
    /// compositions do not necessarily produce structurally equal chains.
    pub fn compose(&self, that: &Self) -> Self {
        if self.is_identity() {
            return that.clone();
        }
        if that.is_identity() {
            return self.clone();
        }
        if let Some(fused) = self.fuse(that) {
            return fused;
        }

        let steps = self.steps().iter().chain(that.steps()).cloned().collect();
        Self::from_steps(steps)
    }

    // The fusion table: returns the single converter equivalent to applying
    // `self` then `that`, or `None` if the pair must stay a chain.
    fn fuse(&self, that: &Self) -> Option<Self> {
        match self {
            UnitConverter::Identity => Some(that.clone()),
            UnitConverter::Add(a) => match that {
                UnitConverter::Add(b) => Some(UnitConverter::Add(a.add(b))),
                _ => None,
            },
            UnitConverter::Multiply(a) => match that {
                UnitConverter::Multiply(b) => Some(UnitConverter::Multiply(a.multiply(b))),
                _ => None,
            },
            UnitConverter::PowerOfInt { base, exponent } => match that {
                UnitConverter::PowerOfInt { base: b, exponent: e } if base == b => {
                    Some(UnitConverter::PowerOfInt {
                        base: *base,
                        exponent: exponent.saturating_add(*e),
                    })
                }
                _ => None,
            },
            UnitConverter::PiPower(a) => match that {
                UnitConverter::PiPower(b) => Some(UnitConverter::PiPower(a.saturating_add(*b))),
                _ => None,
            },
            UnitConverter::Exp(a) => match that {
                UnitConverter::Log(b) if a == b => Some(UnitConverter::Identity),
                _ => None,
            },
            UnitConverter::Log(a) => match that {
                UnitConverter::Exp(b) if a == b => Some(UnitConverter::Identity),
                _ => None,
            },
            UnitConverter::Chain(_) => None,
        }
    }

    // Builds the simplest converter equivalent to applying `steps` in order
    pub(crate) fn from_steps(steps: Vec<UnitConverter>) -> Self {
        let mut steps = normalize(steps);
        match steps.len() {
            0 => UnitConverter::Identity,
            1 => steps.swap_remove(0),
            _ => UnitConverter::Chain(Chain { steps }),
        }
    }
}

// Reduces a sequence of steps until no adjacent pair fuses.
// Runs of linear steps commute, so they are put in canonical order
// first to bring fusable steps next to each other.
fn normalize(mut steps: Vec<UnitConverter>) -> Vec<UnitConverter> {
    let len = steps.len();
    steps.retain(|s| !s.is_identity());
    loop {
        sort_linear_runs(&mut steps);
        let before = steps.len();
        steps = fuse_adjacent(steps);
        if steps.len() == before {
            trace!(input = len, output = steps.len(), "normalized converter chain");
            return steps;
        }
    }
}

// Single greedy left-to-right fusion pass, dropping identities
fn fuse_adjacent(steps: Vec<UnitConverter>) -> Vec<UnitConverter> {
    let mut out: Vec<UnitConverter> = Vec::with_capacity(steps.len());
    for step in steps.into_iter().flat_map(|s| s.into_steps()) {
        if step.is_identity() {
            continue;
        }
        match out.last().and_then(|prev| prev.fuse(&step)) {
            Some(fused) => {
                out.pop();
                if !fused.is_identity() {
                    out.push(fused);
                }
            }
            None => out.push(step),
        }
    }
    out
}

fn sort_linear_runs(steps: &mut [UnitConverter]) {
    let mut start = 0;
    while start < steps.len() {
        if !steps[start].is_linear() {
            start += 1;
            continue;
        }
        let end = steps[start..]
            .iter()
            .position(|s| !s.is_linear())
            .map_or(steps.len(), |n| start + n);
        steps[start..end].sort();
        start = end;
    }
}

impl UnitConverter {
    // Flattens a converter into owned steps
    fn into_steps(self) -> Vec<UnitConverter> {
        match self {
            UnitConverter::Identity => Vec::new(),
            UnitConverter::Chain(chain) => chain.steps,
            other => vec![other],
        }
    }
}
