//! IO nodes attached above and below the grid.

use crate::image::{Image, Pixel};
use crate::word::Word;

/// Numeric input: offers one word at a time through the standard
/// writer-reader protocol, always downward.
#[derive(Debug, Default, Clone)]
pub struct InputNode {
    pub x: usize,
    pub values: Vec<Word>,
    idx: usize,
    wrt: Option<Word>,
    writing: bool,
}

impl InputNode {
    #[must_use]
    pub fn new(x: usize) -> InputNode {
        InputNode {
            x,
            values: Vec::new(),
            idx: 0,
            wrt: None,
            writing: false,
        }
    }

    /// Answer a read from the cell below.
    pub fn emit(&mut self) -> Option<Word> {
        self.writing = self.wrt.is_some();
        self.wrt.take()
    }

    /// IO sub-phase. A cycle on which the offered word was consumed does
    /// not refill; the next value appears one cycle later.
    pub fn execute(&mut self) {
        if self.writing {
            self.writing = false;
        } else if self.wrt.is_none() && self.idx < self.values.len() {
            self.wrt = Some(self.values[self.idx]);
            self.idx += 1;
        }
    }

    pub fn reset(&mut self, values: Vec<Word>) {
        self.values = values;
        self.idx = 0;
        self.wrt = None;
        self.writing = false;
    }

    /// How many values have been taken off the sequence so far.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.idx
    }
}

/// Numeric output: consumes from the cell above and compares against the
/// expected sequence.
#[derive(Debug, Default, Clone)]
pub struct OutputNode {
    pub x: usize,
    pub expected: Vec<Word>,
    pub received: Vec<Word>,
    pub wrong: bool,
    pub complete: bool,
    /// Index of the regular cell this output reads from, set during
    /// linking.
    pub linked: Option<usize>,
}

impl OutputNode {
    #[must_use]
    pub fn new(x: usize) -> OutputNode {
        OutputNode {
            x,
            ..OutputNode::default()
        }
    }

    /// Record one received word.
    pub fn receive(&mut self, w: Word) {
        let i = self.received.len();
        self.received.push(w);
        if self.expected.get(i) != Some(&w) {
            self.wrong = true;
            log::debug!("O{}: incorrect value written", self.x);
        }
        self.complete = self.received.len() == self.expected.len();
    }

    #[must_use]
    pub fn valid(&self) -> bool {
        self.complete && !self.wrong
    }

    pub fn reset(&mut self, expected: Vec<Word>) {
        self.expected = expected;
        self.received.clear();
        self.wrong = false;
        self.complete = false;
    }
}

/// Cursor-driven image output. See the wire protocol in the field docs:
/// a negative word clears the cursor, then x, then y, then pixels with
/// x auto-increment.
#[derive(Debug, Default, Clone)]
pub struct ImageNode {
    pub x: usize,
    pub expected: Image,
    pub received: Image,
    cx: Option<Word>,
    cy: Option<Word>,
    /// Pixels still differing from expected; maintained incrementally so
    /// the active check is O(1).
    pub wrong_pixels: usize,
    pub linked: Option<usize>,
}

impl ImageNode {
    #[must_use]
    pub fn new(x: usize, width: usize, height: usize) -> ImageNode {
        ImageNode {
            x,
            expected: Image::new(width, height),
            received: Image::new(width, height),
            cx: None,
            cy: None,
            wrong_pixels: 0,
            linked: None,
        }
    }

    /// Feed one control word.
    pub fn receive(&mut self, w: Word) {
        if w < 0 {
            self.cx = None;
            self.cy = None;
        } else if self.cx.is_none() {
            self.cx = Some(w);
        } else if self.cy.is_none() {
            self.cy = Some(w);
        } else {
            self.poke(Pixel::from_word(w));
            if let Some(cx) = &mut self.cx {
                *cx += 1;
            }
        }
    }

    /// Write a pixel at the cursor; out-of-bounds positions are dropped
    /// but the cursor is retained.
    fn poke(&mut self, px: Pixel) {
        let (Some(cx), Some(cy)) = (self.cx, self.cy) else {
            return;
        };
        if cx < 0 || cy < 0 {
            return;
        }
        let (x, y) = (cx as usize, cy as usize);
        if x >= self.received.width() || y >= self.received.height() {
            return;
        }
        let was = self.received.get(x, y);
        let want = self.expected.get(x, y);
        if was == want && px != want {
            self.wrong_pixels += 1;
        } else if was != want && px == want {
            self.wrong_pixels -= 1;
        }
        self.received.set(x, y, px);
    }

    #[must_use]
    pub fn valid(&self) -> bool {
        self.wrong_pixels == 0
    }

    pub fn reset(&mut self, expected: Image) {
        self.received.reshape(expected.width(), expected.height());
        self.expected = expected;
        self.cx = None;
        self.cy = None;
        self.wrong_pixels = self.received.diff_count(&self.expected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_offers_one_value_every_other_cycle() {
        let mut i = InputNode::new(0);
        i.reset(vec![10, 20]);
        assert_eq!(i.emit(), None);
        i.execute(); // readies 10
        assert_eq!(i.emit(), Some(10));
        i.execute(); // consumed this cycle: no refill yet
        assert_eq!(i.emit(), None);
        i.execute(); // readies 20
        assert_eq!(i.emit(), Some(20));
        i.execute();
        i.execute();
        assert_eq!(i.emit(), None, "sequence exhausted");
        assert_eq!(i.emitted(), 2);
    }

    #[test]
    fn output_flags_mismatch_and_completion() {
        let mut o = OutputNode::new(1);
        o.reset(vec![1, 2, 3]);
        o.receive(1);
        assert!(!o.wrong);
        assert!(!o.complete);
        o.receive(9);
        assert!(o.wrong);
        o.receive(3);
        assert!(o.complete);
        assert!(!o.valid());

        o.reset(vec![5]);
        o.receive(5);
        assert!(o.valid());
    }

    #[test]
    fn image_protocol_draws_and_resets_cursor() {
        let mut img = ImageNode::new(2, 4, 3);
        img.reset(Image::filled(4, 3, Pixel::White));
        assert_eq!(img.wrong_pixels, 12);

        // -1, x, y, then pixels with auto-increment.
        img.receive(-1);
        img.receive(0);
        img.receive(0);
        for _ in 0..4 {
            img.receive(3);
        }
        assert_eq!(img.wrong_pixels, 8);

        // Out-of-bounds pokes are dropped, cursor keeps advancing.
        img.receive(3);
        assert_eq!(img.wrong_pixels, 8);

        img.receive(-1);
        img.receive(1);
        img.receive(1);
        img.receive(4); // red where white is expected: still wrong
        assert_eq!(img.received.get(1, 1), Pixel::Red);
        assert_eq!(img.wrong_pixels, 8);
        img.receive(-1);
        img.receive(1);
        img.receive(1);
        img.receive(3);
        assert_eq!(img.wrong_pixels, 7);
    }

    #[test]
    fn all_black_expectation_is_immediately_valid() {
        let mut img = ImageNode::new(0, 5, 5);
        img.reset(Image::new(5, 5));
        assert!(img.valid());
    }
}
