//! The node grid: topology, linking, pruning, and the cycle driver.

use std::collections::{BinaryHeap, HashSet};
use std::fmt::Write as _;

use bitflags::bitflags;
use thiserror::Error;

use crate::image::Image;
use crate::instr::{Instr, Operand};
use crate::io::{ImageNode, InputNode, OutputNode};
use crate::node::{Activity, T21, T30};
use crate::port::Port;
use crate::word::Word;

/// Kind of a regular grid cell in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Compute,
    Stack,
    Damaged,
}

/// Kind of an IO column attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoSpec {
    None,
    Numeric,
    Image { width: Word, height: Word },
}

/// Immutable description of a puzzle's grid and IO columns.
#[derive(Debug, Clone)]
pub struct LayoutSpec {
    pub nodes: Vec<Vec<NodeType>>,
    pub inputs: Vec<IoSpec>,
    pub outputs: Vec<IoSpec>,
}

/// One generated test case: per-input sequences, per-output expected
/// sequences, per-image expected bitmaps.
#[derive(Debug, Default, Clone)]
pub struct SingleTest {
    pub inputs: Vec<Vec<Word>>,
    pub n_outputs: Vec<Vec<Word>>,
    pub i_outputs: Vec<Image>,
}

/// Construction-time layout errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("layout specs must be rectangular")]
    NotRectangular,
    #[error("layout IO specs must match field dimensions")]
    IoColumnMismatch,
    #[error("invalid layout spec: illegal input node")]
    IllegalInput,
}

/// An `HCF` instruction fired at `(x, y)`, program line `pc`. The grader
/// fails the current test and moves on.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("halt and catch fire at ({x},{y}):{pc}")]
pub struct Hcf {
    pub x: usize,
    pub y: usize,
    pub pc: usize,
}

/// Neighbor reference: another regular cell, or an input node attached
/// above the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Cell(usize),
    Input(usize),
}

#[derive(Debug, Clone)]
enum CellKind {
    Compute(T21),
    Stack(T30),
    Damaged,
}

#[derive(Debug, Clone)]
struct Cell {
    x: usize,
    y: usize,
    kind: CellKind,
    /// Installed read links, indexed by direction. Only present where the
    /// static analysis says this cell may read and the neighbor may write.
    neighbors: [Option<Link>; 4],
}

bitflags! {
    /// Set of directions, used by the link analysis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct DirMask: u8 {
        const LEFT = 1;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
    }
}

impl DirMask {
    fn of(p: Port) -> DirMask {
        match p {
            Port::Any => DirMask::all(),
            p if p.is_dir() => DirMask::from_bits_truncate(1 << p.index()),
            _ => DirMask::empty(),
        }
    }

    fn of_src(src: Operand) -> DirMask {
        match src {
            Operand::Port(p) => DirMask::of(p),
            Operand::Imm(_) => DirMask::empty(),
        }
    }

    fn has(self, d: Port) -> bool {
        self.contains(DirMask::from_bits_truncate(1 << d.index()))
    }
}

/// A rectangular grid of regular cells plus the IO nodes attached above
/// (inputs) and below (outputs). Owns everything; neighbor references are
/// plain indices, so clones are deep and independent.
#[derive(Debug, Clone)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    inputs: Vec<InputNode>,
    numerics: Vec<OutputNode>,
    images: Vec<ImageNode>,
    sim_cells: Vec<usize>,
    sim_inputs: Vec<usize>,
    sim_numerics: Vec<usize>,
    sim_images: Vec<usize>,
}

impl Field {
    pub fn new(spec: &LayoutSpec, t30_size: usize) -> Result<Field, FieldError> {
        let height = spec.nodes.len();
        let width = spec.nodes.first().map_or(0, |row| row.len());
        if spec.nodes.iter().any(|row| row.len() != width) {
            return Err(FieldError::NotRectangular);
        }
        if height > 0 && (spec.inputs.len() != width || spec.outputs.len() != width) {
            return Err(FieldError::IoColumnMismatch);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in spec.nodes.iter().enumerate() {
            for (x, kind) in row.iter().enumerate() {
                let kind = match kind {
                    NodeType::Compute => CellKind::Compute(T21::new()),
                    NodeType::Stack => CellKind::Stack(T30::new(t30_size)),
                    NodeType::Damaged => CellKind::Damaged,
                };
                cells.push(Cell {
                    x,
                    y,
                    kind,
                    neighbors: [None; 4],
                });
            }
        }

        let mut inputs = Vec::new();
        for (x, spec) in spec.inputs.iter().enumerate() {
            match spec {
                IoSpec::Numeric => inputs.push(InputNode::new(x)),
                IoSpec::None => {}
                IoSpec::Image { .. } => return Err(FieldError::IllegalInput),
            }
        }

        let mut numerics = Vec::new();
        let mut images = Vec::new();
        for (x, spec) in spec.outputs.iter().enumerate() {
            match spec {
                IoSpec::Numeric => numerics.push(OutputNode::new(x)),
                IoSpec::Image { width, height } => {
                    images.push(ImageNode::new(x, *width as usize, *height as usize));
                }
                IoSpec::None => {}
            }
        }

        Ok(Field {
            width,
            height,
            cells,
            inputs,
            numerics,
            images,
            sim_cells: Vec::new(),
            sim_inputs: Vec::new(),
            sim_numerics: Vec::new(),
            sim_images: Vec::new(),
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn has_inputs(&self) -> bool {
        !self.inputs.is_empty()
    }

    /// Total instruction count over all compute cells.
    #[must_use]
    pub fn instructions(&self) -> usize {
        self.cells
            .iter()
            .filter_map(|c| match &c.kind {
                CellKind::Compute(t) => Some(t.code().len()),
                _ => None,
            })
            .sum()
    }

    /// Number of compute cells holding any code.
    #[must_use]
    pub fn nodes_used(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(&c.kind, CellKind::Compute(t) if !t.code().is_empty()))
            .count()
    }

    /// The `i`th programmable cell in reading order.
    pub fn node_by_index(&mut self, mut i: usize) -> Option<&mut T21> {
        self.cells.iter_mut().find_map(|c| match &mut c.kind {
            CellKind::Compute(t) => {
                if i == 0 {
                    Some(t)
                } else {
                    i -= 1;
                    None
                }
            }
            _ => None,
        })
    }

    /// Iterate the stack cells (achievement checks).
    pub fn stacks(&self) -> impl Iterator<Item = &T30> {
        self.cells.iter().filter_map(|c| match &c.kind {
            CellKind::Stack(s) => Some(s),
            _ => None,
        })
    }

    /// Iterate the compute cells (achievement checks).
    pub fn computes(&self) -> impl Iterator<Item = &T21> {
        self.cells.iter().filter_map(|c| match &c.kind {
            CellKind::Compute(t) => Some(t),
            _ => None,
        })
    }

    fn useful(&self, idx: usize) -> bool {
        match &self.cells[idx].kind {
            CellKind::Compute(t) => !t.code().is_empty(),
            CellKind::Stack(_) => true,
            CellKind::Damaged => false,
        }
    }

    fn useful_cell_at(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        let idx = y as usize * self.width + x as usize;
        self.useful(idx).then_some(idx)
    }

    /// Directions this cell may ever read from, by static analysis of its
    /// program. Conservatively widens to all directions when a LAST read
    /// can be steered by an ANY write.
    fn in_links(&self, idx: usize) -> DirMask {
        match &self.cells[idx].kind {
            CellKind::Stack(_) => DirMask::all(),
            CellKind::Damaged => DirMask::empty(),
            CellKind::Compute(t) => {
                let mut mask = DirMask::empty();
                let mut reads_last = false;
                let mut writes_any = false;
                for i in t.code() {
                    match *i {
                        Instr::Mov(src, dst) => {
                            if dst == Port::Any {
                                writes_any = true;
                            }
                            mask |= DirMask::of_src(src);
                            if src == Operand::Port(Port::Last) {
                                reads_last = true;
                            }
                        }
                        Instr::Add(src) | Instr::Sub(src) | Instr::Jro(src) => {
                            mask |= DirMask::of_src(src);
                            if src == Operand::Port(Port::Last) {
                                reads_last = true;
                            }
                        }
                        _ => {}
                    }
                }
                if reads_last && writes_any {
                    mask = DirMask::all();
                }
                mask
            }
        }
    }

    /// Directions this cell may ever write to; the mirror of `in_links`.
    fn out_links(&self, idx: usize) -> DirMask {
        match &self.cells[idx].kind {
            CellKind::Stack(_) => DirMask::all(),
            CellKind::Damaged => DirMask::empty(),
            CellKind::Compute(t) => {
                let mut mask = DirMask::empty();
                let mut reads_any = false;
                let mut writes_last = false;
                for i in t.code() {
                    match *i {
                        Instr::Mov(src, dst) => {
                            mask |= DirMask::of(dst);
                            if dst == Port::Last {
                                writes_last = true;
                            }
                            if src == Operand::Port(Port::Any) {
                                reads_any = true;
                            }
                        }
                        Instr::Add(src) | Instr::Sub(src) | Instr::Jro(src) => {
                            if src == Operand::Port(Port::Any) {
                                reads_any = true;
                            }
                        }
                        _ => {}
                    }
                }
                if reads_any && writes_last {
                    mask = DirMask::all();
                }
                mask
            }
        }
    }

    /// Install neighbor links and rebuild the simulation sets. Must be
    /// called after code loading (and is, by the solution loader).
    pub fn finalize_nodes(&mut self) {
        for cell in &mut self.cells {
            cell.neighbors = [None; 4];
        }
        for o in &mut self.numerics {
            o.linked = None;
        }
        for o in &mut self.images {
            o.linked = None;
        }
        self.sim_cells.clear();
        self.sim_inputs.clear();
        self.sim_numerics.clear();
        self.sim_images.clear();

        // A link runs from reader to writer: cell N links toward D only if
        // N may read from D and the neighbor may write back.
        for idx in 0..self.cells.len() {
            if !self.useful(idx) {
                continue;
            }
            let imask = self.in_links(idx);
            let (x, y) = (self.cells[idx].x as i32, self.cells[idx].y as i32);
            for d in Port::DIRECTIONS {
                let (dx, dy) = d.delta();
                if let Some(j) = self.useful_cell_at(x + dx, y + dy) {
                    if imask.has(d) && self.out_links(j).has(d.invert()) {
                        self.cells[idx].neighbors[d.index()] = Some(Link::Cell(j));
                    }
                }
            }
        }

        for i in 0..self.inputs.len() {
            let x = self.inputs[i].x;
            if let Some(idx) = self.useful_cell_at(x as i32, 0) {
                if self.in_links(idx).has(Port::Up) {
                    self.cells[idx].neighbors[Port::Up.index()] = Some(Link::Input(i));
                    log::debug!("input I{x} linked to ({x},0)");
                }
            }
        }
        for o in 0..self.numerics.len() {
            let x = self.numerics[o].x;
            if let Some(idx) = self.useful_cell_at(x as i32, self.height as i32 - 1) {
                if self.out_links(idx).has(Port::Down) {
                    self.numerics[o].linked = Some(idx);
                }
            }
        }
        for o in 0..self.images.len() {
            let x = self.images[o].x;
            if let Some(idx) = self.useful_cell_at(x as i32, self.height as i32 - 1) {
                if self.out_links(idx).has(Port::Down) {
                    self.images[o].linked = Some(idx);
                }
            }
        }

        // Reachability pruning: only cells that can influence an output
        // (or fault) are stepped.
        for idx in 0..self.cells.len() {
            if self.useful(idx) {
                if self.search_for_output(idx) {
                    self.sim_cells.push(idx);
                } else {
                    log::debug!(
                        "cell ({},{}) dropped as not connected",
                        self.cells[idx].x,
                        self.cells[idx].y
                    );
                }
            }
        }
        for i in 0..self.inputs.len() {
            let x = self.inputs[i].x;
            let linked = self.useful_cell_at(x as i32, 0).is_some_and(|idx| {
                self.cells[idx].neighbors[Port::Up.index()] == Some(Link::Input(i))
                    && self.sim_cells.contains(&idx)
            });
            if linked {
                self.sim_inputs.push(i);
            } else {
                log::debug!("input I{x} dropped");
            }
        }
        for o in 0..self.numerics.len() {
            if self.numerics[o].linked.is_some() {
                self.sim_numerics.push(o);
            } else {
                // An unconnected output makes the level unsolvable unless
                // its expectation is empty.
                log::info!("numeric out O{} dropped", self.numerics[o].x);
            }
        }
        for o in 0..self.images.len() {
            if self.images[o].linked.is_some() {
                self.sim_images.push(o);
            } else {
                log::info!("image out O{} dropped", self.images[o].x);
            }
        }
    }

    /// Search for a connected output (or fault source) from `start`,
    /// visiting higher rows first since outputs live at the bottom.
    fn search_for_output(&self, start: usize) -> bool {
        if let CellKind::Compute(t) = &self.cells[start].kind {
            if t.has_hcf() {
                return true;
            }
        }
        let mut queue: BinaryHeap<(usize, usize)> = BinaryHeap::new();
        let mut searched: HashSet<usize> = HashSet::new();
        queue.push((self.cells[start].y, start));
        searched.insert(start);

        while let Some((_, n)) = queue.pop() {
            if let CellKind::Stack(_) = &self.cells[n].kind {
                if self.cells[n].neighbors.iter().all(Option::is_none) {
                    continue;
                }
            }
            let (x, y) = (self.cells[n].x as i32, self.cells[n].y as i32);
            for d in Port::DIRECTIONS {
                let (dx, dy) = d.delta();
                let (nx, ny) = (x + dx, y + dy);
                if let Some(j) = self.useful_cell_at(nx, ny) {
                    let linked = self.cells[n].neighbors[d.index()] == Some(Link::Cell(j))
                        || self.cells[j].neighbors[d.invert().index()] == Some(Link::Cell(n));
                    if linked && searched.insert(j) {
                        if let CellKind::Compute(t) = &self.cells[j].kind {
                            if t.has_hcf() {
                                return true;
                            }
                        }
                        queue.push((self.cells[j].y, j));
                    }
                } else if ny == self.height as i32 {
                    let feeds_output = self
                        .numerics
                        .iter()
                        .any(|o| o.linked == Some(n))
                        || self.images.iter().any(|o| o.linked == Some(n));
                    if feeds_output {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Reset every cell and install a test case.
    pub fn set_expected(&mut self, test: SingleTest) {
        for cell in &mut self.cells {
            match &mut cell.kind {
                CellKind::Compute(t) => t.reset(),
                CellKind::Stack(s) => s.reset(),
                CellKind::Damaged => {}
            }
        }
        for (node, values) in self.inputs.iter_mut().zip(test.inputs) {
            node.reset(values);
        }
        for (node, expected) in self.numerics.iter_mut().zip(test.n_outputs) {
            node.reset(expected);
        }
        for (node, expected) in self.images.iter_mut().zip(test.i_outputs) {
            node.reset(expected);
        }
    }

    /// Answer a read by cell `idx` in direction `d`.
    fn read_dir(&mut self, idx: usize, d: Port) -> Option<Word> {
        let link = self.cells[idx].neighbors[d.index()]?;
        match link {
            Link::Cell(j) => match &mut self.cells[j].kind {
                CellKind::Compute(t) => t.emit(d.invert()),
                CellKind::Stack(s) => s.emit(),
                CellKind::Damaged => None,
            },
            Link::Input(k) => self.inputs[k].emit(),
        }
    }

    fn step_compute(&mut self, idx: usize) -> Result<(), Hcf> {
        let (instr, last) = {
            let CellKind::Compute(t) = &self.cells[idx].kind else {
                return Ok(());
            };
            if t.activity == Activity::Write {
                // The pending MOV's read already happened; wait it out.
                return Ok(());
            }
            let Some(instr) = t.current_instr() else {
                return Ok(());
            };
            (instr, t.last)
        };

        let value = match instr.src() {
            None => Some(0),
            Some(src) => {
                let imm = {
                    let CellKind::Compute(t) = &self.cells[idx].kind else {
                        return Ok(());
                    };
                    t.immediate_operand(src)
                };
                match (imm, src) {
                    (Some(v), _) => Some(v),
                    (None, Operand::Port(Port::Any)) => {
                        let mut got = None;
                        for d in Port::DIRECTIONS {
                            if let Some(w) = self.read_dir(idx, d) {
                                if let CellKind::Compute(t) = &mut self.cells[idx].kind {
                                    t.last = d;
                                }
                                got = Some(w);
                                break;
                            }
                        }
                        got
                    }
                    (None, Operand::Port(Port::Last)) => self.read_dir(idx, last),
                    (None, Operand::Port(d)) => self.read_dir(idx, d),
                    (None, Operand::Imm(_)) => unreachable!("immediates always resolve"),
                }
            }
        };

        let (x, y) = (self.cells[idx].x, self.cells[idx].y);
        let CellKind::Compute(t) = &mut self.cells[idx].kind else {
            return Ok(());
        };
        let Some(value) = value else {
            t.activity = Activity::Read;
            return Ok(());
        };
        t.execute(instr, value).map_err(|fault| Hcf {
            x,
            y,
            pc: fault.pc,
        })
    }

    fn step_stack(&mut self, idx: usize) {
        for d in Port::DIRECTIONS {
            let full = match &self.cells[idx].kind {
                CellKind::Stack(s) => s.is_full(),
                _ => return,
            };
            if full {
                break;
            }
            if let Some(w) = self.read_dir(idx, d) {
                if let CellKind::Stack(s) = &mut self.cells[idx].kind {
                    s.push(w);
                }
            }
        }
    }

    /// Advance one full machine cycle: regular step, IO execute, regular
    /// finalize, in that order.
    pub fn step(&mut self) -> Result<(), Hcf> {
        for k in 0..self.sim_cells.len() {
            let idx = self.sim_cells[k];
            match &self.cells[idx].kind {
                CellKind::Compute(_) => self.step_compute(idx)?,
                CellKind::Stack(_) => self.step_stack(idx),
                CellKind::Damaged => {}
            }
        }

        for k in 0..self.sim_inputs.len() {
            let i = self.sim_inputs[k];
            self.inputs[i].execute();
        }
        for k in 0..self.sim_numerics.len() {
            let o = self.sim_numerics[k];
            if self.numerics[o].complete {
                continue;
            }
            let Some(j) = self.numerics[o].linked else {
                continue;
            };
            let got = match &mut self.cells[j].kind {
                CellKind::Compute(t) => t.emit(Port::Down),
                CellKind::Stack(s) => s.emit(),
                CellKind::Damaged => None,
            };
            if let Some(w) = got {
                self.numerics[o].receive(w);
            }
        }
        for k in 0..self.sim_images.len() {
            let o = self.sim_images[k];
            let Some(j) = self.images[o].linked else {
                continue;
            };
            let got = match &mut self.cells[j].kind {
                CellKind::Compute(t) => t.emit(Port::Down),
                CellKind::Stack(s) => s.emit(),
                CellKind::Damaged => None,
            };
            if let Some(w) = got {
                self.images[o].receive(w);
            }
        }

        for k in 0..self.sim_cells.len() {
            let idx = self.sim_cells[k];
            match &mut self.cells[idx].kind {
                CellKind::Compute(t) => t.finalize(),
                CellKind::Stack(s) => s.finalize(),
                CellKind::Damaged => {}
            }
        }
        Ok(())
    }

    /// True while some output still has work outstanding. Returns false
    /// the moment a numeric output goes wrong, aborting failed tests
    /// early.
    #[must_use]
    pub fn active(&self) -> bool {
        let mut active = false;
        for &o in &self.sim_numerics {
            let out = &self.numerics[o];
            if !out.complete {
                active = true;
                if out.wrong {
                    return false;
                }
            }
        }
        for &o in &self.sim_images {
            if self.images[o].wrong_pixels > 0 {
                active = true;
            }
        }
        active
    }

    /// All outputs satisfied?
    #[must_use]
    pub fn valid(&self) -> bool {
        self.numerics.iter().all(OutputNode::valid) && self.images.iter().all(ImageNode::valid)
    }

    /// Human-readable validation failure report: inputs, then received vs
    /// expected for every failed output.
    #[must_use]
    pub fn failure_report(&self) -> String {
        fn write_words(out: &mut String, v: &[Word], expected: Option<&[Word]>) {
            match expected {
                Some(e) => {
                    let _ = write!(out, "({}/{}) [\n\t", v.len(), e.len());
                }
                None => {
                    let _ = write!(out, "({}) [\n\t", v.len());
                }
            }
            for w in v {
                let _ = write!(out, "{w} ");
            }
            out.push_str("\n]");
        }

        let mut out = String::new();
        for i in &self.inputs {
            let _ = write!(out, "input {}: ", i.x);
            write_words(&mut out, &i.values, None);
            out.push('\n');
        }
        for o in &self.numerics {
            if !o.valid() {
                let _ = write!(out, "validation failure for output {}\noutput: ", o.x);
                write_words(&mut out, &o.received, Some(&o.expected));
                out.push_str("\nexpected: ");
                write_words(&mut out, &o.expected, None);
                out.push('\n');
            }
        }
        for o in &self.images {
            if !o.valid() {
                let _ = write!(
                    out,
                    "validation failure for output {}\noutput: ({},{})\n{}expected:\n{}",
                    o.x,
                    o.received.width(),
                    o.received.height(),
                    o.received.write_text(),
                    o.expected.write_text()
                );
            }
        }
        out
    }

    /// One-line-per-node state dump, for trace logging.
    #[must_use]
    pub fn state_dump(&self) -> String {
        let mut out = String::new();
        for c in &self.cells {
            match &c.kind {
                CellKind::Compute(t) => {
                    let instr = t.current_instr().map(|i| i.to_string()).unwrap_or_default();
                    let _ = writeln!(
                        out,
                        "({},{}) T21 {{ {} ({}) {} {} {} [{}] }}",
                        c.x,
                        c.y,
                        t.acc,
                        t.bak,
                        t.last,
                        t.activity.name(),
                        t.pc,
                        instr
                    );
                }
                CellKind::Stack(s) => {
                    let _ = write!(out, "({},{}) T30 {{", c.x, c.y);
                    for w in s.contents() {
                        let _ = write!(out, "{w}, ");
                    }
                    out.push_str("}\n");
                }
                CellKind::Damaged => {
                    let _ = writeln!(out, "({},{}) {{Damaged}}", c.x, c.y);
                }
            }
        }
        for i in &self.inputs {
            let _ = writeln!(
                out,
                "I{} NUMERIC {{ emitted:({}/{}) }}",
                i.x,
                i.emitted(),
                i.values.len()
            );
        }
        for o in &self.numerics {
            let _ = writeln!(
                out,
                "O{} NUMERIC {{ received:({}/{}) }}",
                o.x,
                o.received.len(),
                o.expected.len()
            );
        }
        for o in &self.images {
            let _ = writeln!(out, "O{} IMAGE {{ wrong:{} }}", o.x, o.wrong_pixels);
        }
        out
    }

    /// Compact layout dump, for debug logging.
    #[must_use]
    pub fn layout_dump(&self) -> String {
        let mut out = String::new();
        for i in &self.inputs {
            let _ = write!(out, "I{} ", i.x);
        }
        for (k, c) in self.cells.iter().enumerate() {
            if k % self.width == 0 {
                out.push('\n');
            }
            out.push(match &c.kind {
                CellKind::Compute(_) => 'C',
                CellKind::Stack(_) => 'S',
                CellKind::Damaged => 'D',
            });
        }
        out.push('\n');
        for o in &self.numerics {
            let _ = write!(out, "O{} ", o.x);
        }
        for o in &self.images {
            let _ = write!(
                out,
                "V{} {},{} ",
                o.x,
                o.expected.width(),
                o.expected.height()
            );
        }
        out
    }
}
