//! Regular node state machines: T21 compute and T30 stack.
//!
//! The port protocol lives here. A writer holds its outgoing word in
//! `wrt` and advertises it through a staged write port:
//!
//! - `Idle`: no write posted (or a write begun this cycle, not yet
//!   resolved to a direction by `finalize`)
//! - `Pending(p)`: the word is offered toward `p` (a direction or ANY)
//! - `Done`: a reader consumed the word this cycle; `finalize` observes
//!   this and only then advances the program counter
//!
//! The stage doubles as the semaphore the reference machine keeps in its
//! `write_port` field; the extra round-trip through `finalize` is what
//! gives every transfer its one-cycle propagation delay.

use crate::instr::{Instr, Operand};
use crate::port::Port;
use crate::word::{Word, sat_add, sat_add_clamped, sat_sub};

/// What a node spent the current cycle doing. `Write` gates instruction
/// dispatch; the rest is state display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    #[default]
    Idle,
    Run,
    Read,
    Write,
}

impl Activity {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Activity::Idle => "IDLE",
            Activity::Run => "RUN",
            Activity::Read => "READ",
            Activity::Write => "WRTE",
        }
    }
}

/// Staged outgoing write. See the module docs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    #[default]
    Idle,
    Pending(Port),
    Done,
}

/// Raised by an `HCF` instruction; carries the faulting program counter.
/// The field wraps it with node coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HcfFault {
    pub pc: usize,
}

/// A programmable compute node.
#[derive(Debug, Default, Clone)]
pub struct T21 {
    code: Vec<Instr>,
    pub acc: Word,
    pub bak: Word,
    pub pc: usize,
    /// Direction most recently consumed by an ANY read or write; NIL when
    /// none has happened yet.
    pub last: Port,
    wrt: Option<Word>,
    stage: WriteStage,
    pub activity: Activity,
}

impl T21 {
    #[must_use]
    pub fn new() -> T21 {
        T21 {
            code: Vec::new(),
            acc: 0,
            bak: 0,
            pc: 0,
            last: Port::Nil,
            wrt: None,
            stage: WriteStage::Idle,
            activity: Activity::Idle,
        }
    }

    pub fn set_code(&mut self, code: Vec<Instr>) {
        self.code = code;
    }

    #[must_use]
    pub fn code(&self) -> &[Instr] {
        &self.code
    }

    #[must_use]
    pub fn current_instr(&self) -> Option<Instr> {
        self.code.get(self.pc).copied()
    }

    #[must_use]
    pub fn has_hcf(&self) -> bool {
        self.code.iter().any(|i| matches!(i, Instr::Hcf))
    }

    #[must_use]
    pub fn has_conditional_jump(&self) -> bool {
        self.code.iter().any(|i| i.is_conditional_jump())
    }

    /// Pending outgoing word, if any (state display only).
    #[must_use]
    pub fn pending_write(&self) -> Option<(Word, WriteStage)> {
        self.wrt.map(|w| (w, self.stage))
    }

    pub fn reset(&mut self) {
        self.acc = 0;
        self.bak = 0;
        self.pc = 0;
        self.last = Port::Nil;
        self.wrt = None;
        self.stage = WriteStage::Idle;
        self.activity = Activity::Idle;
    }

    fn next(&mut self) {
        self.pc = (self.pc + 1) % self.code.len();
    }

    /// Answer a read arriving from direction `p`.
    ///
    /// Succeeds iff a pending write targets `p` or ANY. An ANY write
    /// records the consuming direction into `last`; either way the stage
    /// moves to `Done` so `finalize` can complete the MOV.
    pub fn emit(&mut self, p: Port) -> Option<Word> {
        debug_assert!(p.is_dir());
        match self.stage {
            WriteStage::Pending(q) if q == p || q == Port::Any => {
                if q == Port::Any {
                    self.last = p;
                }
                self.stage = WriteStage::Done;
                self.wrt.take()
            }
            _ => None,
        }
    }

    /// Dispatch one instruction whose source operand already resolved to
    /// `value`. Port reads and stalls are handled by the field before
    /// calling this.
    pub fn execute(&mut self, instr: Instr, value: Word) -> Result<(), HcfFault> {
        match instr {
            Instr::Hcf => return Err(HcfFault { pc: self.pc }),
            Instr::Nop => {
                self.activity = Activity::Run;
                self.next();
            }
            Instr::Swp => {
                std::mem::swap(&mut self.acc, &mut self.bak);
                self.activity = Activity::Run;
                self.next();
            }
            Instr::Sav => {
                self.bak = self.acc;
                self.activity = Activity::Run;
                self.next();
            }
            Instr::Neg => {
                self.acc = -self.acc;
                self.activity = Activity::Run;
                self.next();
            }
            Instr::Mov(_, dst) => match dst {
                Port::Acc => {
                    self.acc = value;
                    self.activity = Activity::Run;
                    self.next();
                }
                Port::Nil => {
                    self.activity = Activity::Run;
                    self.next();
                }
                Port::Last if self.last == Port::Nil => {
                    // No remembered direction: the word is dropped.
                    self.activity = Activity::Run;
                    self.next();
                }
                _ => {
                    // Direction, ANY, or LAST with a remembered direction.
                    // The write becomes visible to readers next cycle;
                    // pc does not advance until it is consumed.
                    self.wrt = Some(value);
                    self.stage = WriteStage::Idle;
                    self.activity = Activity::Write;
                }
            },
            Instr::Add(_) => {
                self.acc = sat_add(self.acc, value);
                self.activity = Activity::Run;
                self.next();
            }
            Instr::Sub(_) => {
                self.acc = sat_sub(self.acc, value);
                self.activity = Activity::Run;
                self.next();
            }
            Instr::Jmp(t) => {
                self.activity = Activity::Run;
                self.pc = t as usize;
            }
            Instr::Jez(t) => {
                self.activity = Activity::Run;
                if self.acc == 0 {
                    self.pc = t as usize;
                } else {
                    self.next();
                }
            }
            Instr::Jnz(t) => {
                self.activity = Activity::Run;
                if self.acc != 0 {
                    self.pc = t as usize;
                } else {
                    self.next();
                }
            }
            Instr::Jgz(t) => {
                self.activity = Activity::Run;
                if self.acc > 0 {
                    self.pc = t as usize;
                } else {
                    self.next();
                }
            }
            Instr::Jlz(t) => {
                self.activity = Activity::Run;
                if self.acc < 0 {
                    self.pc = t as usize;
                } else {
                    self.next();
                }
            }
            Instr::Jro(_) => {
                self.activity = Activity::Run;
                self.pc =
                    sat_add_clamped(self.pc as Word, value, 0, (self.code.len() - 1) as Word)
                        as usize;
            }
        }
        Ok(())
    }

    /// Second sub-phase: resolve a freshly posted write to its direction,
    /// or complete a consumed one and advance.
    pub fn finalize(&mut self) {
        if self.activity != Activity::Write {
            return;
        }
        match self.stage {
            WriteStage::Idle => {
                // First finalize after the MOV: fix the target direction.
                // Readers can couple from the next cycle on.
                let Some(Instr::Mov(_, dst)) = self.current_instr() else {
                    return;
                };
                let p = if dst == Port::Last { self.last } else { dst };
                self.stage = WriteStage::Pending(p);
            }
            WriteStage::Done => {
                self.stage = WriteStage::Idle;
                self.activity = Activity::Run;
                self.next();
            }
            WriteStage::Pending(_) => {} // still in flight
        }
    }

    /// Evaluate the non-port source operands; returns `None` when the
    /// operand needs a neighbor read (resolved by the field).
    #[must_use]
    pub fn immediate_operand(&self, src: Operand) -> Option<Word> {
        match src {
            Operand::Imm(v) => Some(v),
            Operand::Port(Port::Nil) => Some(0),
            Operand::Port(Port::Acc) => Some(self.acc),
            // LAST with no remembered direction reads as 0.
            Operand::Port(Port::Last) if self.last == Port::Nil => Some(0),
            Operand::Port(_) => None,
        }
    }
}

/// A passive stack node.
#[derive(Debug, Clone)]
pub struct T30 {
    data: Vec<Word>,
    max_size: usize,
    /// Size snapshot from the last finalize; pops only reach below it, so
    /// words pushed this cycle stay invisible until the next.
    division: usize,
    wrote: bool,
    /// Sticky across resets; drives the NO_MEMORY achievement.
    pub used: bool,
}

impl T30 {
    #[must_use]
    pub fn new(max_size: usize) -> T30 {
        T30 {
            data: Vec::with_capacity(max_size),
            max_size,
            division: 0,
            wrote: false,
            used: false,
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.data.len() == self.max_size
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn contents(&self) -> &[Word] {
        &self.data
    }

    /// Accept one word pulled from a neighbor during step.
    pub fn push(&mut self, w: Word) {
        debug_assert!(!self.is_full());
        self.data.push(w);
        self.used = true;
    }

    /// Offer the newest pre-cycle word to any reader; at most one per
    /// cycle.
    pub fn emit(&mut self) -> Option<Word> {
        if !self.wrote && self.division != 0 {
            self.division -= 1;
            let v = self.data.remove(self.division);
            self.wrote = true;
            Some(v)
        } else {
            None
        }
    }

    pub fn finalize(&mut self) {
        self.division = self.data.len();
        self.wrote = false;
    }

    pub fn reset(&mut self) {
        self.data.clear();
        self.division = 0;
        self.wrote = false;
        // `used` deliberately survives.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mov_to_port_stalls_until_consumed() {
        let mut t = T21::new();
        t.set_code(vec![Instr::Mov(Operand::Imm(7), Port::Right), Instr::Nop]);
        t.execute(Instr::Mov(Operand::Imm(7), Port::Right), 7)
            .expect("no fault");
        assert_eq!(t.activity, Activity::Write);
        assert_eq!(t.pc, 0);

        // First finalize resolves the direction; nothing consumable before.
        assert_eq!(t.emit(Port::Right), None);
        t.finalize();
        assert_eq!(t.emit(Port::Left), None);
        assert_eq!(t.emit(Port::Right), Some(7));

        // Completion is only observed at the next finalize.
        assert_eq!(t.pc, 0);
        t.finalize();
        assert_eq!(t.pc, 1);
        assert_eq!(t.activity, Activity::Run);
    }

    #[test]
    fn any_write_records_consuming_direction() {
        let mut t = T21::new();
        t.set_code(vec![Instr::Mov(Operand::Imm(3), Port::Any)]);
        t.execute(Instr::Mov(Operand::Imm(3), Port::Any), 3)
            .expect("no fault");
        t.finalize();
        assert_eq!(t.emit(Port::Down), Some(3));
        assert_eq!(t.last, Port::Down);
    }

    #[test]
    fn mov_last_with_no_history_drops() {
        let mut t = T21::new();
        t.set_code(vec![Instr::Mov(Operand::Imm(1), Port::Last), Instr::Nop]);
        t.execute(Instr::Mov(Operand::Imm(1), Port::Last), 1)
            .expect("no fault");
        assert_eq!(t.activity, Activity::Run);
        assert_eq!(t.pc, 1);
        assert_eq!(t.pending_write(), None);
    }

    #[test]
    fn pc_wraps_after_last_instruction() {
        let mut t = T21::new();
        t.set_code(vec![Instr::Nop, Instr::Nop, Instr::Nop]);
        t.pc = 2;
        t.execute(Instr::Nop, 0).expect("no fault");
        assert_eq!(t.pc, 0);
    }

    #[test]
    fn jro_clamps_to_code_bounds() {
        let mut t = T21::new();
        t.set_code(vec![Instr::Nop; 5]);
        t.pc = 2;
        t.execute(Instr::Jro(Operand::Imm(100)), 100).expect("ok");
        assert_eq!(t.pc, 4);
        t.execute(Instr::Jro(Operand::Imm(-100)), -100).expect("ok");
        assert_eq!(t.pc, 0);
    }

    #[test]
    fn neg_saturates_symmetrically() {
        let mut t = T21::new();
        t.set_code(vec![Instr::Neg]);
        t.acc = 999;
        t.execute(Instr::Neg, 0).expect("ok");
        assert_eq!(t.acc, -999);
        t.execute(Instr::Neg, 0).expect("ok");
        assert_eq!(t.acc, 999);
    }

    #[test]
    fn hcf_faults_with_pc() {
        let mut t = T21::new();
        t.set_code(vec![Instr::Nop, Instr::Hcf]);
        t.pc = 1;
        assert_eq!(t.execute(Instr::Hcf, 0), Err(HcfFault { pc: 1 }));
    }

    #[test]
    fn stack_pops_reversed_and_latches_used() {
        let mut s = T30::new(15);
        assert!(!s.used);
        s.push(1);
        s.push(2);
        s.push(3);
        assert!(s.used);
        // Nothing poppable until the cycle boundary.
        assert_eq!(s.emit(), None);
        s.finalize();
        assert_eq!(s.emit(), Some(3));
        // One pop per cycle.
        assert_eq!(s.emit(), None);
        s.finalize();
        assert_eq!(s.emit(), Some(2));
        s.finalize();
        assert_eq!(s.emit(), Some(1));
        s.finalize();
        assert_eq!(s.emit(), None);

        s.reset();
        assert!(s.is_empty());
        assert!(s.used, "used survives reset");
    }

    #[test]
    fn last_read_with_no_history_yields_zero() {
        let t = T21::new();
        assert_eq!(t.immediate_operand(Operand::Port(Port::Last)), Some(0));
        assert_eq!(t.immediate_operand(Operand::Port(Port::Nil)), Some(0));
        assert_eq!(t.immediate_operand(Operand::Port(Port::Up)), None);
        assert_eq!(t.immediate_operand(Operand::Imm(42)), Some(42));
    }
}
