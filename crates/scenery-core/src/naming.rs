//! Sequential display names: "Mesh 1", "Mesh 2", "Assembly 1", ...
//!
//! The allocator fills the lowest gap: with "Mesh 1" and "Mesh 3" present the
//! next primitive is "Mesh 2". Every primitive kind draws from the single
//! "Mesh" sequence.

use crate::model::Model;
use std::collections::BTreeSet;
use winnow::ascii::{Caseless, digit1};
use winnow::combinator::preceded;
use winnow::prelude::*;
use winnow::token::literal;

/// Which name sequence to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCategory {
    Primitive,
    Assembly,
}

impl NameCategory {
    pub fn prefix(&self) -> &'static str {
        match self {
            NameCategory::Primitive => "Mesh",
            NameCategory::Assembly => "Assembly",
        }
    }
}

/// The next free name in `category`, e.g. `"Mesh 2"`.
///
/// Only nodes of the matching variant are considered, so an assembly renamed
/// "Mesh 4" does not reserve that number for primitives.
pub fn next_name(model: &Model, category: NameCategory) -> String {
    let prefix = category.prefix();
    let taken: BTreeSet<u64> = model
        .nodes()
        .filter(|node| match category {
            NameCategory::Primitive => !node.is_assembly(),
            NameCategory::Assembly => node.is_assembly(),
        })
        .filter_map(|node| sequence_number(&node.name, prefix))
        .collect();
    format!("{prefix} {}", lowest_gap(&taken))
}

/// Parse `"<prefix> <digits>"` (prefix matched case-insensitively, exactly one
/// space) and return the number. Anything else, including trailing text or
/// an out-of-range number, yields `None`.
pub fn sequence_number(name: &str, prefix: &str) -> Option<u64> {
    let mut input = name;
    let n = parse_sequence_suffix(&mut input, prefix).ok()?;
    input.is_empty().then_some(n)
}

fn parse_sequence_suffix(input: &mut &str, prefix: &str) -> ModalResult<u64> {
    preceded((literal(Caseless(prefix)), ' '), digit1.parse_to()).parse_next(input)
}

/// Smallest positive integer missing from the ascending set.
fn lowest_gap(taken: &BTreeSet<u64>) -> u64 {
    let mut next = 1;
    for &n in taken.range(1..) {
        if n != next {
            break;
        }
        next += 1;
    }
    next
}
