//! Solution files: one assembly block per compute cell, introduced by
//! `@N` headers in reading order.

use std::collections::HashSet;

use thiserror::Error;
use tis_core::Field;

use crate::AsmError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolutionError {
    #[error("bad node header {0:?}")]
    BadHeader(String),
    #[error("duplicate node label {0}")]
    DuplicateNode(usize),
    #[error("node label {0} out of range")]
    NodeOutOfRange(usize),
    #[error(transparent)]
    Asm(#[from] AsmError),
}

/// Split a solution into `@N` blocks, assemble each, and install the code
/// into the field's programmable cells. Cells without a block stay empty.
/// Links and the simulation sets are rebuilt afterwards.
pub fn load_solution(
    field: &mut Field,
    source: &str,
    t21_size: usize,
    permissive: bool,
) -> Result<(), SolutionError> {
    let mut rest = match source.find('@') {
        Some(at) => &source[at..],
        None => "",
    };
    let mut seen: HashSet<usize> = HashSet::new();

    while !rest.is_empty() {
        let (header, after) = match rest.find('\n') {
            Some(nl) => (&rest[..nl], &rest[nl + 1..]),
            None => (rest, ""),
        };
        let index: usize = header[1..]
            .trim()
            .parse()
            .map_err(|_| SolutionError::BadHeader(header.to_owned()))?;
        let (section, next) = match after.find('@') {
            Some(at) => (&after[..at], &after[at..]),
            None => (after, ""),
        };
        rest = next;

        if !seen.insert(index) {
            return Err(SolutionError::DuplicateNode(index));
        }
        let section = section.trim_end_matches([' ', '\t', '\r', '\n']);
        if section.is_empty() {
            continue;
        }
        log::debug!("assembling @{index}");
        let code = crate::assemble(section, index, t21_size, permissive)?;
        let Some(cell) = field.node_by_index(index) else {
            return Err(SolutionError::NodeOutOfRange(index));
        };
        cell.set_code(code);
    }

    field.finalize_nodes();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tis_core::{Field, IoSpec, LayoutSpec, NodeType};

    fn small_field() -> Field {
        let spec = LayoutSpec {
            nodes: vec![
                vec![NodeType::Compute, NodeType::Compute],
                vec![NodeType::Compute, NodeType::Damaged],
            ],
            inputs: vec![IoSpec::Numeric, IoSpec::None],
            outputs: vec![IoSpec::Numeric, IoSpec::None],
        };
        Field::new(&spec, 15).expect("valid layout")
    }

    #[test]
    fn installs_blocks_by_reading_order() {
        let mut f = small_field();
        load_solution(&mut f, "@0\nMOV UP, DOWN\n@2\nMOV UP, DOWN\n", 15, false)
            .expect("loads");
        assert_eq!(f.node_by_index(0).expect("cell").code().len(), 1);
        assert!(f.node_by_index(1).expect("cell").code().is_empty());
        assert_eq!(f.node_by_index(2).expect("cell").code().len(), 1);
    }

    #[test]
    fn leading_junk_before_first_header_is_ignored() {
        let mut f = small_field();
        load_solution(&mut f, "saved by the editor\n@0\nNOP\n", 15, false).expect("loads");
        assert_eq!(f.node_by_index(0).expect("cell").code().len(), 1);
    }

    #[test]
    fn duplicate_blocks_are_rejected() {
        let mut f = small_field();
        let err = load_solution(&mut f, "@1\nNOP\n@1\nNOP\n", 15, false).unwrap_err();
        assert_eq!(err, SolutionError::DuplicateNode(1));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut f = small_field();
        let err = load_solution(&mut f, "@9\nNOP\n", 15, false).unwrap_err();
        assert_eq!(err, SolutionError::NodeOutOfRange(9));
    }

    #[test]
    fn empty_blocks_are_allowed() {
        let mut f = small_field();
        load_solution(&mut f, "@0\n\n@1\nNOP\n", 15, false).expect("loads");
        assert!(f.node_by_index(0).expect("cell").code().is_empty());
        assert_eq!(f.node_by_index(1).expect("cell").code().len(), 1);
    }

    #[test]
    fn assembler_errors_carry_the_node_index() {
        let mut f = small_field();
        let err = load_solution(&mut f, "@2\nFROB\n", 15, false).unwrap_err();
        assert!(matches!(
            err,
            SolutionError::Asm(AsmError::BadOpcode { node: 2, .. })
        ));
    }
}
