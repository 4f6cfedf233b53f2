//! The score triple and its canonical rendering.

use std::fmt;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE_BOLD: &str = "\x1b[94;1m";
const RESET: &str = "\x1b[m";

/// Result of a full grading run:
/// `cycles / nodes / instructions` plus the classification flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Score {
    pub cycles: usize,
    pub nodes: usize,
    pub instructions: usize,
    pub random_test_ran: u32,
    pub random_test_valid: u32,
    pub validated: bool,
    pub achievement: bool,
    pub cheat: bool,
    pub hardcoded: bool,
}

impl Score {
    /// `cycles/nodes/instructions[/a][h|c]`, the community scoreboard
    /// format. `-` stands in for the cycle count of an invalid solve.
    /// With `stats`, a pass-rate suffix is appended.
    #[must_use]
    pub fn render(&self, colored: bool, stats: bool) -> String {
        let paint = |code: &'static str| if colored { code } else { "" };
        let mut out = String::new();
        if self.validated {
            out.push_str(&self.cycles.to_string());
        } else {
            out.push_str(paint(RED));
            out.push('-');
        }
        out.push_str(&format!("/{}/{}", self.nodes, self.instructions));
        if self.validated {
            if self.achievement || self.cheat {
                out.push('/');
            }
            if self.achievement {
                out.push_str(paint(BLUE_BOLD));
                out.push('a');
                out.push_str(paint(RESET));
            }
            if self.hardcoded {
                out.push_str(paint(RED));
                out.push('h');
            } else if self.cheat {
                out.push_str(paint(YELLOW));
                out.push('c');
            }
        }
        if colored {
            out.push_str(RESET);
        }
        if stats && self.random_test_ran > 0 {
            let color = if !self.cheat {
                BLUE_BOLD
            } else if !self.hardcoded {
                YELLOW
            } else {
                RED
            };
            let rate = 100.0 * f64::from(self.random_test_valid) / f64::from(self.random_test_ran);
            out.push_str(&format!(
                " PR: {}{rate}%{} ({}/{})",
                paint(color),
                paint(RESET),
                self.random_test_valid,
                self.random_test_ran
            ));
        }
        out
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_valid_and_invalid() {
        let sc = Score {
            cycles: 83,
            nodes: 8,
            instructions: 34,
            validated: true,
            ..Score::default()
        };
        assert_eq!(sc.to_string(), "83/8/34");

        let sc = Score {
            nodes: 8,
            instructions: 34,
            validated: false,
            ..Score::default()
        };
        assert_eq!(sc.to_string(), "-/8/34");
    }

    #[test]
    fn renders_flags() {
        let sc = Score {
            cycles: 10,
            nodes: 1,
            instructions: 2,
            validated: true,
            achievement: true,
            ..Score::default()
        };
        assert_eq!(sc.to_string(), "10/1/2/a");

        let sc = Score {
            cycles: 10,
            nodes: 1,
            instructions: 2,
            validated: true,
            cheat: true,
            ..Score::default()
        };
        assert_eq!(sc.to_string(), "10/1/2/c");

        let sc = Score {
            cycles: 10,
            nodes: 1,
            instructions: 2,
            validated: true,
            cheat: true,
            hardcoded: true,
            achievement: true,
            ..Score::default()
        };
        assert_eq!(sc.to_string(), "10/1/2/ah");
    }

    #[test]
    fn stats_suffix_reports_pass_rate() {
        let sc = Score {
            cycles: 10,
            nodes: 1,
            instructions: 2,
            validated: true,
            random_test_ran: 4,
            random_test_valid: 3,
            cheat: true,
            ..Score::default()
        };
        assert_eq!(sc.render(false, true), "10/1/2/c PR: 75% (3/4)");
    }
}
