//! TIS-100 assembly parser.
//!
//! Line-oriented, two passes: the first collects labels and validates
//! the source, the second emits instructions. Jump targets that fall off
//! the end of the program are normalized to 0, matching the reference
//! machine's handling of labels on trailing blank lines.

mod solution;

use std::collections::HashMap;

use thiserror::Error;
use tis_core::{Instr, Operand, Port, WORD_MAX, WORD_MIN, Word};

pub use solution::{SolutionError, load_solution};

/// Longest line the strict parser accepts, matching the game's editor.
pub const MAX_LINE_LENGTH: usize = 18;

/// Assembly errors, tagged with the node index and source line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AsmError {
    #[error("@{node}:{line}: line too long ({len} chars)")]
    LineTooLong { node: usize, line: usize, len: usize },
    #[error("@{node}:{line}: character {ch:?} not allowed in source")]
    IllegalChar { node: usize, line: usize, ch: char },
    #[error("@{node}:{line}: invalid label \"\"")]
    EmptyLabel { node: usize, line: usize },
    #[error("@{node}:{line}: label {label:?} defined multiple times")]
    DuplicateLabel {
        node: usize,
        line: usize,
        label: String,
    },
    #[error("@{node}:{line}: line has too many labels")]
    TooManyLabels { node: usize, line: usize },
    #[error("@{node}:{line}: labels must be first on a line")]
    LabelAfterOp { node: usize, line: usize },
    #[error("too many lines of asm for node {node}; {lines} exceeds limit {limit}")]
    TooManyLines {
        node: usize,
        lines: usize,
        limit: usize,
    },
    #[error("@{node}:{line}: expected operand")]
    MissingOperand { node: usize, line: usize },
    #[error("@{node}:{line}: unexpected operand {token:?}")]
    ExtraOperand {
        node: usize,
        line: usize,
        token: String,
    },
    #[error("@{node}:{line}: label {label:?} used but not defined")]
    UndefinedLabel {
        node: usize,
        line: usize,
        label: String,
    },
    #[error("@{node}:{line}: immediate value {value} out of range -999:999")]
    ImmediateOutOfRange {
        node: usize,
        line: usize,
        value: i64,
    },
    #[error("@{node}:{line}: malformed number {token:?}")]
    BadNumber {
        node: usize,
        line: usize,
        token: String,
    },
    #[error("@{node}:{line}: {token:?} is not a valid instruction opcode")]
    BadOpcode {
        node: usize,
        line: usize,
        token: String,
    },
    #[error("@{node}:{line}: {token:?} is not a valid port or register name")]
    BadPort {
        node: usize,
        line: usize,
        token: String,
    },
    #[error("@{node}:{line}: port abbreviation {token:?} is not allowed")]
    PortAbbreviation {
        node: usize,
        line: usize,
        token: String,
    },
}

/// Parse a port or register token. Under `permissive`, any unambiguous
/// prefix of a valid name is accepted; LEFT and ACC win ties.
pub fn parse_port(
    token: &str,
    permissive: bool,
    node: usize,
    line: usize,
) -> Result<Port, AsmError> {
    const PORTS: [(&str, Port); 8] = [
        ("LEFT", Port::Left),
        ("RIGHT", Port::Right),
        ("UP", Port::Up),
        ("DOWN", Port::Down),
        ("NIL", Port::Nil),
        ("ACC", Port::Acc),
        ("ANY", Port::Any),
        ("LAST", Port::Last),
    ];
    for (name, port) in PORTS {
        if name.starts_with(token) {
            if !permissive && token != name {
                return Err(AsmError::PortAbbreviation {
                    node,
                    line,
                    token: token.to_owned(),
                });
            }
            return Ok(port);
        }
    }
    Err(AsmError::BadPort {
        node,
        line,
        token: token.to_owned(),
    })
}

/// Parse a source operand: a decimal immediate (range-checked into the
/// word interval) or a port name.
fn parse_operand(
    token: &str,
    permissive: bool,
    node: usize,
    line: usize,
) -> Result<Operand, AsmError> {
    let first = token.chars().next().unwrap_or(' ');
    if first == '+' || first == '-' || first.is_ascii_digit() {
        // The game accepts 32-bit immediates and clamps; the assembler
        // enforces the word range in the source directly.
        let value: i32 = token.parse().map_err(|_| AsmError::BadNumber {
            node,
            line,
            token: token.to_owned(),
        })?;
        if value < i32::from(WORD_MIN) || value > i32::from(WORD_MAX) {
            return Err(AsmError::ImmediateOutOfRange {
                node,
                line,
                value: i64::from(value),
            });
        }
        Ok(Operand::Imm(value as Word))
    } else {
        Ok(Operand::Port(parse_port(token, permissive, node, line)?))
    }
}

fn preprocess(source: &str) -> Vec<String> {
    source
        .split('\n')
        .map(|line| {
            // The game allows a single ! anywhere; it reads as a space.
            let mut line = line.to_owned();
            if let Some(bang) = line.find('!') {
                line.replace_range(bang..=bang, " ");
            }
            line
        })
        .collect()
}

fn tokenize(line: &str) -> Vec<&str> {
    let code = line.split('#').next().unwrap_or("");
    code.split([' ', '\t', ','])
        .filter(|t| !t.is_empty())
        .collect()
}

/// Assemble one node's worth of source into an instruction vector.
pub fn assemble(
    source: &str,
    node: usize,
    t21_size: usize,
    permissive: bool,
) -> Result<Vec<Instr>, AsmError> {
    let lines = preprocess(source);
    let mut labels: HashMap<String, Word> = HashMap::new();

    // Pass 1: validate and collect labels against instruction indices.
    let mut instr_index: usize = 0;
    let mut noncode_lines: usize = 0;
    for (lineno, line) in lines.iter().enumerate() {
        if !permissive && line.len() > MAX_LINE_LENGTH {
            return Err(AsmError::LineTooLong {
                node,
                line: lineno,
                len: line.len(),
            });
        }
        for ch in line.chars() {
            // '@' is reserved for the solution block headers; anything
            // non-printable except tab is rejected outright.
            if ch == '@' || (ch < ' ' && ch != '\t') || ch > '~' {
                return Err(AsmError::IllegalChar {
                    node,
                    line: lineno,
                    ch,
                });
            }
        }
        let tokens = tokenize(line);
        if tokens.is_empty() {
            noncode_lines += 1;
        }
        let mut label_count = 0;
        for token in &tokens {
            let mut tmp = String::new();
            for ch in token.chars() {
                if ch == ':' {
                    if tmp.is_empty() {
                        return Err(AsmError::EmptyLabel { node, line: lineno });
                    }
                    if labels.contains_key(&tmp) {
                        return Err(AsmError::DuplicateLabel {
                            node,
                            line: lineno,
                            label: tmp,
                        });
                    }
                    log::debug!("label {tmp} -> {instr_index}");
                    labels.insert(std::mem::take(&mut tmp), instr_index as Word);
                    label_count += 1;
                } else {
                    tmp.push(ch);
                }
            }
            if !tmp.is_empty() {
                instr_index += 1;
                break;
            }
        }
        if !permissive && label_count > 1 {
            return Err(AsmError::TooManyLabels { node, line: lineno });
        }
    }

    // Blank and comment-only lines are free only under the permissive
    // parser; the game counts every line.
    let counted = if permissive {
        lines.len() - noncode_lines
    } else {
        lines.len()
    };
    if counted > t21_size {
        return Err(AsmError::TooManyLines {
            node,
            lines: lines.len(),
            limit: t21_size,
        });
    }

    // Pass 2: emit instructions.
    let mut code: Vec<Instr> = Vec::new();
    for (lineno, line) in lines.iter().enumerate() {
        let mut tokens = tokenize(line);
        let mut seen_op = false;
        for token in &mut tokens {
            let t = *token;
            if t.contains(':') {
                if seen_op {
                    return Err(AsmError::LabelAfterOp { node, line: lineno });
                }
                *token = &t[t.rfind(':').map_or(0, |i| i + 1)..];
            }
            if !token.is_empty() {
                seen_op = true;
            }
        }
        tokens.retain(|t| !t.is_empty());
        let Some(&opcode) = tokens.first() else {
            continue;
        };

        let expect_operands = |want: usize| -> Result<(), AsmError> {
            match tokens.len().cmp(&(want + 1)) {
                std::cmp::Ordering::Less => Err(AsmError::MissingOperand { node, line: lineno }),
                std::cmp::Ordering::Greater => Err(AsmError::ExtraOperand {
                    node,
                    line: lineno,
                    token: tokens[want + 1].to_owned(),
                }),
                std::cmp::Ordering::Equal => Ok(()),
            }
        };
        let resolve_label = |token: &str| -> Result<Word, AsmError> {
            labels
                .get(token)
                .copied()
                .ok_or_else(|| AsmError::UndefinedLabel {
                    node,
                    line: lineno,
                    label: token.to_owned(),
                })
        };

        let instr = match opcode {
            "HCF" => {
                expect_operands(0)?;
                Instr::Hcf
            }
            "NOP" => {
                expect_operands(0)?;
                Instr::Nop
            }
            "SWP" => {
                expect_operands(0)?;
                Instr::Swp
            }
            "SAV" => {
                expect_operands(0)?;
                Instr::Sav
            }
            "NEG" => {
                expect_operands(0)?;
                Instr::Neg
            }
            "MOV" => {
                expect_operands(2)?;
                let src = parse_operand(tokens[1], permissive, node, lineno)?;
                let dst = parse_port(tokens[2], permissive, node, lineno)?;
                Instr::Mov(src, dst)
            }
            "ADD" => {
                expect_operands(1)?;
                Instr::Add(parse_operand(tokens[1], permissive, node, lineno)?)
            }
            "SUB" => {
                expect_operands(1)?;
                Instr::Sub(parse_operand(tokens[1], permissive, node, lineno)?)
            }
            "JMP" => {
                expect_operands(1)?;
                Instr::Jmp(resolve_label(tokens[1])?)
            }
            "JEZ" => {
                expect_operands(1)?;
                Instr::Jez(resolve_label(tokens[1])?)
            }
            "JNZ" => {
                expect_operands(1)?;
                Instr::Jnz(resolve_label(tokens[1])?)
            }
            "JGZ" => {
                expect_operands(1)?;
                Instr::Jgz(resolve_label(tokens[1])?)
            }
            "JLZ" => {
                expect_operands(1)?;
                Instr::Jlz(resolve_label(tokens[1])?)
            }
            "JRO" => {
                expect_operands(1)?;
                Instr::Jro(parse_operand(tokens[1], permissive, node, lineno)?)
            }
            other => {
                return Err(AsmError::BadOpcode {
                    node,
                    line: lineno,
                    token: other.to_owned(),
                });
            }
        };
        log::debug!("parsed: {instr}");
        code.push(instr);
    }

    // Labels bound past the end of the program jump to 0.
    let len = code.len() as Word;
    for instr in &mut code {
        match instr {
            Instr::Jmp(t) | Instr::Jez(t) | Instr::Jnz(t) | Instr::Jgz(t) | Instr::Jlz(t) => {
                if *t >= len {
                    log::debug!("normalized label {t}/{len} -> 0");
                    *t = 0;
                }
            }
            _ => {}
        }
    }
    Ok(code)
}
