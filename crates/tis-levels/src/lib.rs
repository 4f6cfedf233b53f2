//! Built-in puzzle catalog: layouts, deterministic test generators, and
//! the puzzle-specific achievement checks.

mod catalog;
pub mod generators;
pub mod random;

pub use catalog::BUILTIN_LEVELS;
pub use generators::{IMAGE_HEIGHT, IMAGE_WIDTH, MAX_TEST_LENGTH, TestProducer};

use tis_core::{Field, FieldError, IoSpec, LayoutSpec, NodeType, SingleTest};

/// One built-in puzzle: identity, layout, and its test generator.
///
/// Generators are pure functions of the seed, so levels are freely
/// shared across grading threads.
#[derive(Clone)]
pub struct Level {
    pub segment: &'static str,
    pub name: &'static str,
    pub base_seed: u32,
    pub nodes: [[NodeType; 4]; 3],
    pub inputs: [IoSpec; 4],
    pub outputs: [IoSpec; 4],
    pub generator: TestProducer,
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level")
            .field("segment", &self.segment)
            .field("name", &self.name)
            .field("base_seed", &self.base_seed)
            .finish_non_exhaustive()
    }
}

impl Level {
    /// Look a level up by segment id or display name.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Level> {
        BUILTIN_LEVELS
            .iter()
            .find(|l| l.segment == id || l.name == id)
    }

    #[must_use]
    pub fn layout(&self) -> LayoutSpec {
        LayoutSpec {
            nodes: self.nodes.iter().map(|row| row.to_vec()).collect(),
            inputs: self.inputs.to_vec(),
            outputs: self.outputs.to_vec(),
        }
    }

    /// Build an empty field for this puzzle.
    pub fn field(&self, t30_size: usize) -> Result<Field, FieldError> {
        Field::new(&self.layout(), t30_size)
    }

    /// Seed-driven test case; `None` means the generator could not place
    /// this seed (a skip, not a failure).
    #[must_use]
    pub fn random_test(&self, seed: u32) -> Option<SingleTest> {
        (self.generator)(seed)
    }

    /// One of the three canonical tests. These seeds always generate.
    #[must_use]
    pub fn static_test(&self, id: u32) -> SingleTest {
        debug_assert!(id < 3);
        self.random_test(self.base_seed * 100 + id)
            .expect("static tests always generate")
    }

    /// Puzzle-specific achievement, evaluated on the field state after a
    /// fully validated fixed battery.
    #[must_use]
    pub fn has_achievement(&self, solve: &Field, cycles: usize) -> bool {
        match self.segment {
            // BUSY_LOOP: waste a lot of time.
            "00150" => cycles > 100_000,
            // UNCONDITIONAL: no conditional jumps anywhere.
            "21340" => !solve.computes().any(tis_core::T21::has_conditional_jump),
            // NO_MEMORY: never touch a stack.
            "42656" => !solve.stacks().any(|s| s.used),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tis_core::{Instr, Operand, Port};

    #[test]
    fn catalog_is_complete_and_unique() {
        assert_eq!(BUILTIN_LEVELS.len(), 51);
        for (i, a) in BUILTIN_LEVELS.iter().enumerate() {
            for b in &BUILTIN_LEVELS[i + 1..] {
                assert_ne!(a.segment, b.segment);
            }
        }
    }

    #[test]
    fn lookup_by_segment_and_name() {
        assert_eq!(Level::find("00150").expect("found").name, "SELF-TEST DIAGNOSTIC");
        assert_eq!(Level::find("SIGNAL AMPLIFIER").expect("found").segment, "10981");
        assert_eq!(
            Level::find("NEXUS.24.511.7").expect("found").name,
            "WAVE COLLAPSE SUPERVISOR"
        );
        assert!(Level::find("NOT A LEVEL").is_none());
    }

    #[test]
    fn every_layout_builds_a_field() {
        for level in &BUILTIN_LEVELS {
            let field = level.field(15).expect("layout is valid");
            assert_eq!(field.width(), 4);
            assert_eq!(field.height(), 3);
        }
    }

    #[test]
    fn static_tests_generate_and_fit_layouts() {
        for level in &BUILTIN_LEVELS {
            for id in 0..3 {
                let test = level.static_test(id);
                let want_inputs = level
                    .inputs
                    .iter()
                    .filter(|s| matches!(s, IoSpec::Numeric))
                    .count();
                let want_numeric = level
                    .outputs
                    .iter()
                    .filter(|s| matches!(s, IoSpec::Numeric))
                    .count();
                let want_images = level
                    .outputs
                    .iter()
                    .filter(|s| matches!(s, IoSpec::Image { .. }))
                    .count();
                assert_eq!(test.inputs.len(), want_inputs, "{} inputs", level.segment);
                assert_eq!(
                    test.n_outputs.len(),
                    want_numeric,
                    "{} numeric outputs",
                    level.segment
                );
                assert_eq!(
                    test.i_outputs.len(),
                    want_images,
                    "{} image outputs",
                    level.segment
                );
            }
        }
    }

    #[test]
    fn static_test_values_are_in_word_range() {
        for level in &BUILTIN_LEVELS {
            let test = level.static_test(0);
            for v in test.inputs.iter().chain(&test.n_outputs) {
                for &w in v {
                    assert!(
                        (-999..=999).contains(&w),
                        "{}: {w} out of range",
                        level.segment
                    );
                }
            }
        }
    }

    #[test]
    fn unconditional_achievement_inspects_code() {
        let level = Level::find("21340").expect("found");
        let mut field = level.field(15).expect("builds");
        assert!(level.has_achievement(&field, 100));

        field
            .node_by_index(0)
            .expect("cell")
            .set_code(vec![Instr::Jez(0)]);
        assert!(!level.has_achievement(&field, 100));
    }

    #[test]
    fn busy_loop_achievement_is_cycle_driven() {
        let level = Level::find("00150").expect("found");
        let field = level.field(15).expect("builds");
        assert!(!level.has_achievement(&field, 99));
        assert!(level.has_achievement(&field, 100_001));
    }

    #[test]
    fn no_memory_achievement_watches_stack_use() {
        let level = Level::find("42656").expect("found");
        let fresh = level.field(15).expect("builds");
        assert!(level.has_achievement(&fresh, 100));

        // Route a value through the stack at (2,0) and drain it to the
        // output so the cells survive pruning. In reading order, #1 is
        // (1,0) beside the stack, #5 is (2,1) below it, #7 is (2,2)
        // above the output column.
        let mut f = level.field(15).expect("builds");
        f.node_by_index(1)
            .expect("cell")
            .set_code(vec![Instr::Mov(Operand::Imm(5), Port::Right)]);
        f.node_by_index(5)
            .expect("cell")
            .set_code(vec![Instr::Mov(Operand::Port(Port::Up), Port::Down)]);
        f.node_by_index(7)
            .expect("cell")
            .set_code(vec![Instr::Mov(Operand::Port(Port::Up), Port::Down)]);
        f.finalize_nodes();
        f.set_expected(SingleTest {
            inputs: vec![vec![]],
            n_outputs: vec![vec![5]],
            i_outputs: vec![],
        });
        for _ in 0..10 {
            f.step().expect("no fault");
        }
        assert!(!level.has_achievement(&f, 100));
    }
}
