//! C ABI for embedding the grader.
//!
//! The embedder owns a `tis_sim` handle: create, configure, run against
//! a code string, read the score struct and error message, destroy.
//! Panics never cross the boundary; failures surface as a null score
//! plus a message from `tis_sim_get_error_message`.

// An FFI surface is unsafe by nature; everything else in the workspace
// stays warned.
#![allow(unsafe_code)]

use std::ffi::{CStr, CString, c_char};
use std::panic::{AssertUnwindSafe, catch_unwind};

use tis_grader::Simulator;

/// Result of a full sim run. Layout is stable; mirrors `struct score`
/// in the C header.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct Score {
    pub cycles: u64,
    pub nodes: u64,
    pub instructions: u64,
    pub random_test_ran: u32,
    pub random_test_valid: u32,
    pub validated: bool,
    pub achievement: bool,
    pub cheat: bool,
    pub hardcoded: bool,
}

/// Opaque simulator handle.
pub struct TisSim {
    sim: Simulator,
    score: Score,
    error: CString,
}

impl TisSim {
    fn set_error(&mut self, message: &str) {
        self.error = CString::new(message.replace('\0', " ")).unwrap_or_default();
    }
}

fn with_sim<R>(sim: *mut TisSim, f: impl FnOnce(&mut TisSim) -> R) -> Option<R> {
    // SAFETY: the embedder promises `sim` came from tis_sim_create and
    // is not used concurrently.
    unsafe { sim.as_mut() }.map(f)
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_create() -> *mut TisSim {
    Box::into_raw(Box::new(TisSim {
        sim: Simulator::new(),
        score: Score::default(),
        error: CString::default(),
    }))
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_destroy(sim: *mut TisSim) {
    if !sim.is_null() {
        // SAFETY: created by tis_sim_create, ownership returns here.
        drop(unsafe { Box::from_raw(sim) });
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_add_seed_range(sim: *mut TisSim, begin: u32, end: u32) {
    with_sim(sim, |s| s.sim.add_seed_range(begin, end));
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_builtin_level_name(sim: *mut TisSim, name: *const c_char) {
    with_sim(sim, |s| {
        if name.is_null() {
            s.set_error("null level name");
            return;
        }
        // SAFETY: `name` is a valid NUL-terminated string per the API
        // contract.
        let name = unsafe { CStr::from_ptr(name) }.to_string_lossy();
        if let Err(e) = s.sim.set_level_by_name(&name) {
            s.set_error(&e.to_string());
        }
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_num_threads(sim: *mut TisSim, num_threads: u32) {
    with_sim(sim, |s| s.sim.set_num_threads(num_threads as usize));
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_cycles_limit(sim: *mut TisSim, cycles_limit: usize) {
    with_sim(sim, |s| s.sim.cycles_limit = cycles_limit);
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_total_cycles_limit(sim: *mut TisSim, total_cycles_limit: usize) {
    with_sim(sim, |s| s.sim.total_cycles_limit = total_cycles_limit);
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_cheat_rate(sim: *mut TisSim, cheat_rate: f64) {
    with_sim(sim, |s| s.sim.cheat_rate = cheat_rate);
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_limit_multiplier(sim: *mut TisSim, limit_multiplier: f64) {
    with_sim(sim, |s| s.sim.limit_multiplier = limit_multiplier);
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_t21_size(sim: *mut TisSim, t21_size: u32) {
    with_sim(sim, |s| s.sim.t21_size = t21_size as usize);
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_t30_size(sim: *mut TisSim, t30_size: u32) {
    with_sim(sim, |s| s.sim.t30_size = t30_size as usize);
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_run_fixed(sim: *mut TisSim, run_fixed: bool) {
    with_sim(sim, |s| s.sim.run_fixed = run_fixed);
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_set_compute_stats(sim: *mut TisSim, compute_stats: bool) {
    with_sim(sim, |s| s.sim.compute_stats = compute_stats);
}

#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_get_error_message(sim: *const TisSim) -> *const c_char {
    // SAFETY: valid handle per the API contract.
    match unsafe { sim.as_ref() } {
        Some(s) => s.error.as_ptr(),
        None => std::ptr::null(),
    }
}

/// Run the simulation. Returns the score struct, or null on error (see
/// `tis_sim_get_error_message`).
#[unsafe(no_mangle)]
pub extern "C" fn tis_sim_simulate(sim: *mut TisSim, code: *const c_char) -> *const Score {
    let Some(result) = with_sim(sim, |s| {
        if code.is_null() {
            s.set_error("null code string");
            return false;
        }
        // SAFETY: `code` is a valid NUL-terminated string per the API
        // contract.
        let code = unsafe { CStr::from_ptr(code) }.to_string_lossy().into_owned();
        let outcome = catch_unwind(AssertUnwindSafe(|| s.sim.simulate_code(&code)));
        match outcome {
            Ok(Ok(())) => {
                let sc = &s.sim.score;
                s.score = Score {
                    cycles: sc.cycles as u64,
                    nodes: sc.nodes as u64,
                    instructions: sc.instructions as u64,
                    random_test_ran: sc.random_test_ran,
                    random_test_valid: sc.random_test_valid,
                    validated: sc.validated,
                    achievement: sc.achievement,
                    cheat: sc.cheat,
                    hardcoded: sc.hardcoded,
                };
                let message = s.sim.error_message.clone();
                s.set_error(&message);
                true
            }
            Ok(Err(e)) => {
                s.set_error(&e.to_string());
                false
            }
            Err(_) => {
                s.set_error("internal panic during simulation");
                false
            }
        }
    }) else {
        return std::ptr::null();
    };

    if result {
        // SAFETY: `sim` proved valid in with_sim above.
        unsafe { &raw const (*sim).score }
    } else {
        std::ptr::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    #[test]
    fn create_configure_simulate_destroy() {
        let sim = tis_sim_create();
        let level = CString::new("00150").expect("no NULs");
        tis_sim_set_builtin_level_name(sim, level.as_ptr());
        tis_sim_set_cycles_limit(sim, 10_000);

        let code = CString::new(
            "@0\nMOV UP, DOWN\n@1\nMOV RIGHT, DOWN\n@2\nMOV UP, LEFT\n@3\nMOV UP, DOWN\n\
             @4\nMOV UP, DOWN\n@5\nMOV UP, DOWN\n@6\nMOV UP, RIGHT\n@7\nMOV LEFT, DOWN\n",
        )
        .expect("no NULs");
        let score = tis_sim_simulate(sim, code.as_ptr());
        assert!(!score.is_null());
        // SAFETY: non-null score points into the live handle.
        let score = unsafe { &*score };
        assert!(score.validated);
        assert_eq!(score.nodes, 8);
        assert_eq!(score.instructions, 8);
        tis_sim_destroy(sim);
    }

    #[test]
    fn error_paths_return_null_scores() {
        let sim = tis_sim_create();
        // No level set: simulate fails and leaves a message.
        let code = CString::new("@0\nNOP\n").expect("no NULs");
        let score = tis_sim_simulate(sim, code.as_ptr());
        assert!(score.is_null());
        let msg = tis_sim_get_error_message(sim);
        assert!(!msg.is_null());
        // SAFETY: the handle owns the message.
        let msg = unsafe { CStr::from_ptr(msg) }.to_string_lossy();
        assert!(!msg.is_empty());

        let bad = CString::new("NOT A LEVEL").expect("no NULs");
        tis_sim_set_builtin_level_name(sim, bad.as_ptr());
        tis_sim_destroy(sim);
    }

    #[test]
    fn null_handles_are_tolerated() {
        tis_sim_destroy(std::ptr::null_mut());
        tis_sim_add_seed_range(std::ptr::null_mut(), 0, 1);
        assert!(tis_sim_get_error_message(std::ptr::null()).is_null());
        assert!(tis_sim_simulate(std::ptr::null_mut(), std::ptr::null()).is_null());
    }
}
