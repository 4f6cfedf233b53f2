//! Byte-exact parity against reference test vectors.
//!
//! Compares every builtin level's static battery with JSON dumps taken
//! from the reference simulator. This is the test that validates both
//! PRNG ports end to end.
//!
//! Vector files live in `test-data/static-tests/<segment>.json`, one
//! object per static test id:
//! `{"inputs": [[..]], "n_outputs": [[..]], "i_outputs": [["rows"]]}`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use tis_core::Image;
use tis_levels::BUILTIN_LEVELS;

#[derive(Deserialize)]
struct ReferenceTest {
    #[serde(default)]
    inputs: Vec<Vec<i16>>,
    #[serde(default)]
    n_outputs: Vec<Vec<i16>>,
    #[serde(default)]
    i_outputs: Vec<Vec<String>>,
}

#[test]
#[ignore = "requires test-data/static-tests — run with --ignored"]
fn static_batteries_match_reference_vectors() {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates dir")
        .parent()
        .expect("workspace root")
        .join("test-data/static-tests");

    if !data_dir.exists() {
        eprintln!("Reference vectors not found at {}", data_dir.display());
        eprintln!("Skipping parity test.");
        return;
    }

    let mut checked = 0u32;
    let mut failed = 0u32;

    for level in &BUILTIN_LEVELS {
        let path = data_dir.join(format!("{}.json", level.segment.replace('.', "_")));
        if !path.exists() {
            eprintln!("No vector for {}, skipping", level.segment);
            continue;
        }
        let data = fs::read_to_string(&path).unwrap_or_else(|e| {
            panic!("Failed to read {}: {e}", path.display());
        });
        let reference: Vec<ReferenceTest> = serde_json::from_str(&data).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {e}", path.display());
        });
        assert_eq!(reference.len(), 3, "{}: want 3 static tests", level.segment);

        for (id, want) in reference.iter().enumerate() {
            let got = level.static_test(id as u32);
            let mut errors = Vec::new();
            if got.inputs != want.inputs {
                errors.push(format!(
                    "inputs: got {:?}, want {:?}",
                    got.inputs, want.inputs
                ));
            }
            if got.n_outputs != want.n_outputs {
                errors.push(format!(
                    "n_outputs: got {:?}, want {:?}",
                    got.n_outputs, want.n_outputs
                ));
            }
            let want_images: Vec<Image> = want
                .i_outputs
                .iter()
                .map(|rows| {
                    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
                    Image::from_rows(&rows)
                })
                .collect();
            if got.i_outputs != want_images {
                errors.push("i_outputs differ".to_owned());
            }

            checked += 1;
            if !errors.is_empty() {
                failed += 1;
                println!("FAIL {} #{id}:", level.segment);
                for e in &errors {
                    println!("  {e}");
                }
            }
        }
    }

    println!("Parity: {checked} checked, {failed} failed");
    assert_eq!(failed, 0, "{failed} static tests diverge from reference");
}
