//! The 51 built-in puzzle definitions.
//!
//! Layouts and base seeds must match the game exactly: the static test
//! battery is derived from `base_seed * 100 + {0,1,2}`.

use tis_core::IoSpec;
use tis_core::IoSpec::Numeric as IO;
use tis_core::NodeType::{Compute as C, Damaged as D, Stack as S};

use crate::Level;
use crate::generators as generate;

const N: IoSpec = IoSpec::None;
const IMG: IoSpec = IoSpec::Image {
    width: 30,
    height: 18,
};

pub const BUILTIN_LEVELS: [Level; 51] = [
    Level {
        segment: "00150",
        name: "SELF-TEST DIAGNOSTIC",
        base_seed: 50,
        nodes: [[C, D, C, C], [C, D, C, D], [C, D, C, C]],
        inputs: [IO, N, N, IO],
        outputs: [IO, N, N, IO],
        generator: generate::self_test_diagnostic,
    },
    Level {
        segment: "10981",
        name: "SIGNAL AMPLIFIER",
        base_seed: 2,
        nodes: [[C, C, C, D], [C, C, C, C], [D, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::signal_amplifier,
    },
    Level {
        segment: "20176",
        name: "DIFFERENTIAL CONVERTER",
        base_seed: 3,
        nodes: [[C, C, C, C], [C, C, C, D], [C, C, C, C]],
        inputs: [N, IO, IO, N],
        outputs: [N, IO, IO, N],
        generator: generate::differential_converter,
    },
    Level {
        segment: "21340",
        name: "SIGNAL COMPARATOR",
        base_seed: 4,
        nodes: [[C, C, C, C], [C, D, D, D], [C, C, C, C]],
        inputs: [IO, N, N, N],
        outputs: [N, IO, IO, IO],
        generator: generate::signal_comparator,
    },
    Level {
        segment: "22280",
        name: "SIGNAL MULTIPLEXER",
        base_seed: 22,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [N, IO, IO, IO],
        outputs: [N, N, IO, N],
        generator: generate::signal_multiplexer,
    },
    Level {
        segment: "30647",
        name: "SEQUENCE GENERATOR",
        base_seed: 5,
        nodes: [[C, C, C, C], [C, C, C, C], [C, D, C, C]],
        inputs: [N, IO, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::sequence_generator,
    },
    Level {
        segment: "31904",
        name: "SEQUENCE COUNTER",
        base_seed: 9,
        nodes: [[C, C, C, D], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, IO, IO, N],
        generator: generate::sequence_counter,
    },
    Level {
        segment: "32050",
        name: "SIGNAL EDGE DETECTOR",
        base_seed: 7,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::signal_edge_detector,
    },
    Level {
        segment: "33762",
        name: "INTERRUPT HANDLER",
        base_seed: 19,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [IO, IO, IO, IO],
        outputs: [N, N, IO, N],
        generator: generate::interrupt_handler,
    },
    Level {
        segment: "USEG0",
        name: "SIMPLE SANDBOX",
        base_seed: 1,
        nodes: [[C, C, C, C], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::sandbox,
    },
    Level {
        segment: "40196",
        name: "SIGNAL PATTERN DETECTOR",
        base_seed: 888,
        nodes: [[C, C, C, D], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::signal_pattern_detector,
    },
    Level {
        segment: "41427",
        name: "SEQUENCE PEAK DETECTOR",
        base_seed: 18,
        nodes: [[C, C, C, C], [C, C, C, D], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, IO, IO, N],
        generator: generate::sequence_peak_detector,
    },
    Level {
        segment: "42656",
        name: "SEQUENCE REVERSER",
        base_seed: 10,
        nodes: [[C, C, S, C], [C, C, C, C], [D, S, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::sequence_reverser,
    },
    Level {
        segment: "43786",
        name: "SIGNAL MULTIPLIER",
        base_seed: 6,
        nodes: [[C, C, C, C], [S, C, C, S], [D, C, C, C]],
        inputs: [N, IO, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::signal_multiplier,
    },
    Level {
        segment: "USEG1",
        name: "STACK MEMORY SANDBOX",
        base_seed: 1,
        nodes: [[C, C, S, C], [C, C, C, C], [C, S, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::sandbox,
    },
    Level {
        segment: "50370",
        name: "IMAGE TEST PATTERN 1",
        base_seed: 13,
        nodes: [[C, C, C, C], [D, C, C, C], [C, C, C, C]],
        inputs: [N, N, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::image_test_pattern_1,
    },
    Level {
        segment: "51781",
        name: "IMAGE TEST PATTERN 2",
        base_seed: 14,
        nodes: [[D, C, C, C], [C, C, C, C], [C, C, C, C]],
        inputs: [N, N, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::image_test_pattern_2,
    },
    Level {
        segment: "52544",
        name: "EXPOSURE MASK VIEWER",
        base_seed: 60,
        nodes: [[C, C, C, D], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::exposure_mask_viewer,
    },
    Level {
        segment: "53897",
        name: "HISTOGRAM VIEWER",
        base_seed: 15,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::histogram_viewer,
    },
    Level {
        segment: "USEG2",
        name: "IMAGE CONSOLE SANDBOX",
        base_seed: 1,
        nodes: [[C, C, C, C], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [
            N,
            N,
            IoSpec::Image {
                width: 36,
                height: 22,
            },
            N,
        ],
        generator: generate::image_console_sandbox,
    },
    Level {
        segment: "60099",
        name: "SIGNAL WINDOW FILTER",
        base_seed: 55,
        nodes: [[D, C, C, S], [C, C, C, C], [C, C, C, S]],
        inputs: [N, IO, N, N],
        outputs: [N, IO, IO, N],
        generator: generate::signal_window_filter,
    },
    Level {
        segment: "61212",
        name: "SIGNAL DIVIDER",
        base_seed: 16,
        nodes: [[C, C, C, C], [S, C, C, S], [C, C, C, D]],
        inputs: [N, IO, IO, N],
        outputs: [N, IO, IO, N],
        generator: generate::signal_divider,
    },
    Level {
        segment: "62711",
        name: "SEQUENCE INDEXER",
        base_seed: 11,
        nodes: [[C, S, C, D], [C, C, C, C], [C, S, C, C]],
        inputs: [IO, N, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::sequence_indexer,
    },
    Level {
        segment: "63534",
        name: "SEQUENCE SORTER",
        base_seed: 12,
        nodes: [[D, C, S, C], [C, C, C, C], [C, S, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::sequence_sorter,
    },
    Level {
        segment: "70601",
        name: "STORED IMAGE DECODER",
        base_seed: 21,
        nodes: [[C, C, C, C], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::stored_image_decoder,
    },
    Level {
        segment: "UNKNOWN",
        name: "UNKNOWN",
        base_seed: 23,
        nodes: [[C, C, C, D], [C, C, C, D], [D, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, IO, IO, N],
        generator: generate::unknown,
    },
    Level {
        segment: "NEXUS.00.526.6",
        name: "SEQUENCE MERGER",
        base_seed: 0,
        nodes: [[C, C, D, C], [S, C, C, C], [C, C, C, S]],
        inputs: [N, IO, N, IO],
        outputs: [N, N, IO, N],
        generator: generate::sequence_merger,
    },
    Level {
        segment: "NEXUS.01.874.8",
        name: "INTEGER SERIES CALCULATOR",
        base_seed: 23,
        nodes: [[C, C, C, D], [C, C, C, C], [C, C, C, D]],
        inputs: [N, IO, N, N],
        outputs: [N, IO, N, N],
        generator: generate::integer_series_calculator,
    },
    Level {
        segment: "NEXUS.02.981.2",
        name: "SEQUENCE RANGE LIMITER",
        base_seed: 46,
        nodes: [[C, C, C, D], [C, C, C, C], [C, C, C, C]],
        inputs: [IO, IO, IO, N],
        outputs: [N, IO, N, N],
        generator: generate::sequence_range_limiter,
    },
    Level {
        segment: "NEXUS.03.176.9",
        name: "SIGNAL ERROR CORRECTOR",
        base_seed: 69,
        nodes: [[D, C, C, D], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, IO, N],
        outputs: [N, IO, IO, N],
        generator: generate::signal_error_corrector,
    },
    Level {
        segment: "NEXUS.04.340.5",
        name: "SUBSEQUENCE EXTRACTOR",
        base_seed: 92,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [N, IO, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::subsequence_extractor,
    },
    Level {
        segment: "NEXUS.05.647.1",
        name: "SIGNAL PRESCALER",
        base_seed: 115,
        nodes: [[C, D, D, D], [C, C, C, C], [C, C, C, C]],
        inputs: [IO, N, N, N],
        outputs: [N, IO, IO, IO],
        generator: generate::signal_prescaler,
    },
    Level {
        segment: "NEXUS.06.786.0",
        name: "SIGNAL AVERAGER",
        base_seed: 138,
        nodes: [[C, C, C, C], [D, C, C, C], [C, C, C, C]],
        inputs: [N, IO, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::signal_averager,
    },
    Level {
        segment: "NEXUS.07.050.0",
        name: "SUBMAXIMUM SELECTOR",
        base_seed: 161,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [IO, IO, IO, IO],
        outputs: [N, N, IO, N],
        generator: generate::submaximum_selector,
    },
    Level {
        segment: "NEXUS.08.633.9",
        name: "DECIMAL DECOMPOSER",
        base_seed: 184,
        nodes: [[C, C, C, D], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [IO, IO, IO, N],
        generator: generate::decimal_decomposer,
    },
    Level {
        segment: "NEXUS.09.904.9",
        name: "SEQUENCE MODE CALCULATOR",
        base_seed: 207,
        nodes: [[S, C, S, D], [C, C, C, D], [C, C, C, D]],
        inputs: [N, IO, N, N],
        outputs: [N, IO, N, N],
        generator: generate::sequence_mode_calculator,
    },
    Level {
        segment: "NEXUS.10.656.5",
        name: "SEQUENCE NORMALIZER",
        base_seed: 230,
        nodes: [[C, C, S, C], [C, C, C, S], [C, D, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::sequence_normalizer,
    },
    Level {
        segment: "NEXUS.11.711.2",
        name: "IMAGE TEST PATTERN 3",
        base_seed: 253,
        nodes: [[D, C, C, C], [C, C, C, C], [C, C, C, C]],
        inputs: [N, N, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::image_test_pattern_3,
    },
    Level {
        segment: "NEXUS.12.534.4",
        name: "IMAGE TEST PATTERN 4",
        base_seed: 276,
        nodes: [[D, C, C, C], [C, C, C, C], [C, C, C, C]],
        inputs: [N, N, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::image_test_pattern_4,
    },
    Level {
        segment: "NEXUS.13.370.9",
        name: "SPATIAL PATH VIEWER",
        base_seed: 299,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::spatial_path_viewer,
    },
    Level {
        segment: "NEXUS.14.781.3",
        name: "CHARACTER TERMINAL",
        base_seed: 322,
        nodes: [[S, C, C, D], [C, C, C, C], [S, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IMG, N],
        generator: generate::character_terminal,
    },
    Level {
        segment: "NEXUS.15.897.9",
        name: "BACK-REFERENCE REIFIER",
        base_seed: 345,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [N, IO, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::back_reference_reifier,
    },
    Level {
        segment: "NEXUS.16.212.8",
        name: "DYNAMIC PATTERN DETECTOR",
        base_seed: 368,
        nodes: [[C, C, C, C], [C, C, C, C], [C, C, C, D]],
        inputs: [IO, N, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::dynamic_pattern_detector,
    },
    Level {
        segment: "NEXUS.17.135.0",
        name: "SEQUENCE GAP INTERPOLATOR",
        base_seed: 391,
        nodes: [[D, C, C, C], [D, S, C, S], [D, C, C, C]],
        inputs: [N, N, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::sequence_gap_interpolator,
    },
    Level {
        segment: "NEXUS.18.427.7",
        name: "DECIMAL TO OCTAL CONVERTER",
        base_seed: 414,
        nodes: [[C, C, C, C], [C, C, C, C], [D, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, N, IO, N],
        generator: generate::decimal_to_octal_converter,
    },
    Level {
        segment: "NEXUS.19.762.9",
        name: "PROLONGED SEQUENCE SORTER",
        base_seed: 437,
        nodes: [[D, S, C, C], [C, C, C, C], [C, S, C, C]],
        inputs: [N, N, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::prolonged_sequence_sorter,
    },
    Level {
        segment: "NEXUS.20.433.1",
        name: "PRIME FACTOR CALCULATOR",
        base_seed: 460,
        nodes: [[C, C, C, D], [C, C, C, C], [C, C, C, C]],
        inputs: [N, IO, N, N],
        outputs: [N, IO, N, N],
        generator: generate::prime_factor_calculator,
    },
    Level {
        segment: "NEXUS.21.601.6",
        name: "SIGNAL EXPONENTIATOR",
        base_seed: 483,
        nodes: [[C, C, C, C], [S, C, C, S], [D, C, C, C]],
        inputs: [N, IO, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::signal_exponentiator,
    },
    Level {
        segment: "NEXUS.22.280.8",
        name: "T20 NODE EMULATOR",
        base_seed: 506,
        nodes: [[C, C, C, C], [C, C, C, C], [C, C, C, D]],
        inputs: [N, IO, IO, N],
        outputs: [N, IO, N, N],
        generator: generate::t20_node_emulator,
    },
    Level {
        segment: "NEXUS.23.727.9",
        name: "T31 NODE EMULATOR",
        base_seed: 529,
        nodes: [[D, S, C, C], [C, C, C, C], [C, S, C, C]],
        inputs: [N, N, IO, N],
        outputs: [N, N, IO, N],
        generator: generate::t31_node_emulator,
    },
    Level {
        segment: "NEXUS.24.511.7",
        name: "WAVE COLLAPSE SUPERVISOR",
        base_seed: 552,
        nodes: [[C, C, C, C], [C, C, C, C], [C, C, C, C]],
        inputs: [IO, IO, IO, IO],
        outputs: [N, IO, N, N],
        generator: generate::wave_collapse_supervisor,
    },
];
