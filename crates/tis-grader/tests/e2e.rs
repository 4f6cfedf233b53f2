//! End-to-end grading scenarios over the builtin catalog.

use tis_core::{SingleTest, Word};
use tis_grader::Simulator;
use tis_levels::{BUILTIN_LEVELS, Level};

fn sim_for(id: &str) -> Simulator {
    let mut sim = Simulator::new();
    sim.set_level_by_name(id).expect("level exists");
    sim
}

/// SELF-TEST DIAGNOSTIC: route both input columns through to their
/// outputs. The right column detours around the damaged cell.
const IDENTITY_00150: &str = "\
@0
MOV UP, DOWN
@1
MOV RIGHT, DOWN
@2
MOV UP, LEFT
@3
MOV UP, DOWN
@4
MOV UP, DOWN
@5
MOV UP, DOWN
@6
MOV UP, RIGHT
@7
MOV LEFT, DOWN
";

#[test]
fn self_test_diagnostic_identity_validates() {
    let mut sim = sim_for("00150");
    sim.simulate_code(IDENTITY_00150).expect("grades");
    let sc = &sim.score;
    assert!(sc.validated, "error: {}", sim.error_message);
    assert!(!sc.achievement, "identity is nowhere near the busy loop");
    assert_eq!(sc.nodes, 8);
    assert_eq!(sc.instructions, 8);
    assert!(sc.cycles > 0 && sc.cycles < 1000);
    // No random battery requested.
    assert_eq!(sc.random_test_ran, 0);
    assert!(!sc.hardcoded);
}

#[test]
fn signal_amplifier_doubles() {
    let mut sim = sim_for("SIGNAL AMPLIFIER");
    sim.simulate_code(
        "@1\nMOV UP, ACC\nADD ACC\nMOV ACC, DOWN\n@4\nMOV UP, RIGHT\n@5\nMOV LEFT, DOWN\n@8\nMOV UP, DOWN\n",
    )
    .expect("grades");
    assert!(sim.score.validated, "error: {}", sim.error_message);
    assert_eq!(sim.score.nodes, 4);
    assert_eq!(sim.score.instructions, 6);
}

/// SEQUENCE REVERSER with the stack at (2,0): one controller below the
/// stack pushes a whole group (counting in BAK), then drains it by
/// count, newest first.
const REVERSER_42656: &str = "\
@1
MOV UP, DOWN
@4
MOV UP, RIGHT
@5
ST: SAV
MOV LEFT, ACC
JEZ DONE
MOV ACC, UP
SWP
ADD 1
JMP ST
DONE: SWP
LP: JEZ TERM
MOV UP, DOWN
SUB 1
JMP LP
TERM: MOV 0, DOWN
JMP ST
@7
MOV UP, DOWN
";

#[test]
fn sequence_reverser_with_stack_validates_without_achievement() {
    let mut sim = sim_for("42656");
    sim.simulate_code(REVERSER_42656).expect("grades");
    assert!(sim.score.validated, "error: {}", sim.error_message);
    assert!(
        !sim.score.achievement,
        "the stack was used, NO_MEMORY must not fire"
    );
}

#[test]
fn hcf_fails_the_first_fixed_test() {
    let mut sim = sim_for("00150");
    sim.simulate_code("@0\nHCF\n").expect("grades");
    assert!(!sim.score.validated);
    assert!(
        sim.error_message.contains("for fixed test 1 after 1 cycles"),
        "message: {}",
        sim.error_message
    );
    assert_eq!(sim.score.cycles, 0, "no fixed test validated");
}

#[test]
fn constant_output_fails_every_random_seed() {
    let mut sim = sim_for("10981");
    sim.run_fixed = false;
    sim.add_seed_range(1, 51);
    sim.simulate_code("@8\nMOV 0, DOWN\n").expect("grades");
    let sc = &sim.score;
    assert!(!sc.validated, "no seed can accept constant zeros");
    assert_eq!(sc.random_test_ran, 50);
    assert_eq!(sc.random_test_valid, 0);
    assert!(sc.cheat);
    assert!(sc.hardcoded);
}

/// IMAGE TEST PATTERN 1: paint every row white, top row last.
const WHITE_50370: &str = "\
@9
MOV 18, ACC
ROW: SUB 1
SAV
MOV -1, DOWN
MOV 0, DOWN
MOV ACC, DOWN
MOV 30, ACC
PIX: MOV 3, DOWN
SUB 1
JNZ PIX
SWP
JGZ ROW
";

#[test]
fn image_test_pattern_1_fills_white() {
    let mut sim = sim_for("IMAGE TEST PATTERN 1");
    sim.simulate_code(WHITE_50370).expect("grades");
    assert!(sim.score.validated, "error: {}", sim.error_message);
    assert_eq!(sim.score.nodes, 1);
    assert_eq!(sim.score.instructions, 12);
}

#[test]
fn random_battery_reuses_the_fixed_solution() {
    let mut sim = sim_for("00150");
    sim.add_seed_range(100, 110);
    sim.compute_stats = true;
    sim.simulate_code(IDENTITY_00150).expect("grades");
    let sc = &sim.score;
    assert!(sc.validated);
    assert_eq!(sc.random_test_ran, 10);
    assert_eq!(sc.random_test_valid, 10);
    assert!(!sc.cheat);
    assert!(!sc.hardcoded);
}

#[test]
fn multithreaded_random_battery_agrees() {
    let mut sim = sim_for("00150");
    sim.set_num_threads(4);
    sim.add_seed_range(100, 140);
    sim.compute_stats = true;
    sim.simulate_code(IDENTITY_00150).expect("grades");
    assert_eq!(sim.score.random_test_ran, 40);
    assert_eq!(sim.score.random_test_valid, 40);
    assert!(!sim.score.cheat);
}

#[test]
fn pruned_cells_have_no_observable_effect() {
    // A cell that cannot reach any output is never stepped: adding one
    // changes the instruction count but nothing about the run.
    let mut clean = sim_for("10981");
    clean
        .simulate_code(
            "@1\nMOV UP, ACC\nADD ACC\nMOV ACC, DOWN\n@4\nMOV UP, RIGHT\n@5\nMOV LEFT, DOWN\n@8\nMOV UP, DOWN\n",
        )
        .expect("grades");

    let mut noisy = sim_for("10981");
    noisy
        .simulate_code(
            "@0\nSPIN: ADD 1\nJMP SPIN\n@1\nMOV UP, ACC\nADD ACC\nMOV ACC, DOWN\n@4\nMOV UP, RIGHT\n@5\nMOV LEFT, DOWN\n@8\nMOV UP, DOWN\n",
        )
        .expect("grades");

    assert!(clean.score.validated && noisy.score.validated);
    assert_eq!(clean.score.cycles, noisy.score.cycles);
    assert_eq!(noisy.score.instructions, clean.score.instructions + 2);
    assert_eq!(noisy.score.nodes, clean.score.nodes + 1);
}

#[test]
fn unknown_level_is_reported() {
    let mut sim = Simulator::new();
    assert!(sim.set_level_by_name("NOT A PUZZLE").is_err());
    assert!(sim.simulate_code("@0\nNOP\n").is_err(), "no level set");
}

#[test]
fn parse_errors_surface_with_node_index() {
    let mut sim = sim_for("00150");
    let err = sim.simulate_code("@0\nFROB 1\n").unwrap_err();
    assert!(err.to_string().contains("@0"), "got: {err}");
}

#[test]
fn every_builtin_level_accepts_an_empty_solution() {
    // An empty program must never crash the pipeline. It validates
    // nothing, except the image console sandbox, whose expectation is a
    // blank screen and therefore matches an untouched image.
    for level in &BUILTIN_LEVELS {
        let mut sim = Simulator::new();
        sim.set_level(level.clone());
        sim.cycles_limit = 200;
        sim.simulate_code("").expect("grades");
        let trivially_blank = level.segment == "USEG2";
        assert_eq!(sim.score.validated, trivially_blank, "{}", level.segment);
    }
}

// Synthetic level for the classification thresholds: a fixed expected
// word per seed, solved by a constant program exactly when the
// generator picked 0.

fn gen_mostly_zero(seed: u32) -> Option<SingleTest> {
    let expect = Word::from(seed % 5 == 0);
    Some(SingleTest {
        inputs: vec![Vec::new()],
        n_outputs: vec![vec![expect]],
        i_outputs: vec![],
    })
}

fn gen_never_zero(_seed: u32) -> Option<SingleTest> {
    Some(SingleTest {
        inputs: vec![Vec::new()],
        n_outputs: vec![vec![1]],
        i_outputs: vec![],
    })
}

fn gen_always_zero(_seed: u32) -> Option<SingleTest> {
    Some(SingleTest {
        inputs: vec![Vec::new()],
        n_outputs: vec![vec![0]],
        i_outputs: vec![],
    })
}

fn gen_skip_odd(seed: u32) -> Option<SingleTest> {
    if seed % 2 == 1 {
        return None;
    }
    gen_always_zero(seed)
}

fn synthetic_level(generator: tis_levels::TestProducer) -> Level {
    use tis_core::IoSpec::{None as No, Numeric};
    use tis_core::NodeType::Compute;
    Level {
        segment: "SYNTH",
        name: "SYNTHETIC",
        base_seed: 1,
        nodes: [[Compute; 4]; 3],
        inputs: [Numeric, No, No, No],
        outputs: [Numeric, No, No, No],
        generator,
    }
}

const CONSTANT_ZERO: &str = "@8\nMOV 0, DOWN\n";

#[test]
fn cheat_flag_tracks_any_failure() {
    let mut sim = Simulator::new();
    sim.set_level(synthetic_level(gen_mostly_zero));
    sim.run_fixed = false;
    sim.compute_stats = true;
    sim.add_seed_range(0, 100);
    sim.simulate_code(CONSTANT_ZERO).expect("grades");
    let sc = &sim.score;
    assert_eq!(sc.random_test_ran, 100);
    assert_eq!(sc.random_test_valid, 80, "seeds divisible by 5 fail");
    assert!(sc.validated, "at least one random pass validates");
    assert!(sc.cheat, "any failure is a cheat");
    assert!(!sc.hardcoded, "80% is far above the 5% threshold");
}

#[test]
fn hardcoded_flag_tracks_the_threshold() {
    let mut sim = Simulator::new();
    sim.set_level(synthetic_level(gen_never_zero));
    sim.run_fixed = false;
    sim.compute_stats = true;
    sim.add_seed_range(0, 40);
    sim.simulate_code(CONSTANT_ZERO).expect("grades");
    let sc = &sim.score;
    assert_eq!((sc.random_test_ran, sc.random_test_valid), (40, 0));
    assert!(!sc.validated);
    assert!(sc.cheat);
    assert!(sc.hardcoded);
}

#[test]
fn clean_battery_is_neither_cheat_nor_hardcoded() {
    let mut sim = Simulator::new();
    sim.set_level(synthetic_level(gen_always_zero));
    sim.run_fixed = false;
    sim.add_seed_range(0, 25);
    sim.simulate_code(CONSTANT_ZERO).expect("grades");
    let sc = &sim.score;
    assert_eq!((sc.random_test_ran, sc.random_test_valid), (25, 25));
    assert!(sc.validated);
    assert!(!sc.cheat);
    assert!(!sc.hardcoded);
}

#[test]
fn skipped_seeds_are_non_events() {
    let mut sim = Simulator::new();
    sim.set_level(synthetic_level(gen_skip_odd));
    sim.run_fixed = false;
    sim.add_seed_range(0, 20);
    sim.simulate_code(CONSTANT_ZERO).expect("grades");
    let sc = &sim.score;
    assert_eq!(sc.random_test_ran, 10, "odd seeds skip without counting");
    assert_eq!(sc.random_test_valid, 10);
    assert!(sc.validated);
}

#[test]
fn early_stop_kicks_in_once_classification_is_settled() {
    let mut sim = Simulator::new();
    sim.set_level(synthetic_level(gen_mostly_zero));
    sim.run_fixed = false;
    // No stats: once passes clear cheat_rate * total and a failure has
    // been seen, the battery stops early.
    sim.add_seed_range(0, 10_000);
    sim.simulate_code(CONSTANT_ZERO).expect("grades");
    let sc = &sim.score;
    assert!(sc.random_test_ran < 10_000, "ran {}", sc.random_test_ran);
    assert!(sc.cheat);
}

#[test]
fn random_timeout_is_derived_from_the_fixed_score() {
    // With fixed tests on and a tiny multiplier, a valid solve keeps its
    // score; the derived random ceiling is min(limit, ceil(fixed * k)).
    let mut sim = sim_for("00150");
    sim.limit_multiplier = 1.0;
    sim.compute_stats = true;
    sim.add_seed_range(7, 12);
    sim.simulate_code(IDENTITY_00150).expect("grades");
    // Every static and random case has the same shape, so the fixed
    // worst-case is enough budget for every random test to pass.
    assert!(sim.score.validated);
    assert_eq!(sim.score.random_test_valid, 5);
}
