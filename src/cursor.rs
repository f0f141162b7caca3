/// A bounded index that wraps around in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: usize,
    min: usize,
    max: usize,
}

impl Cursor {
    /// Cursor over `0..len`, starting at 0.
    pub fn over(len: usize) -> Self {
        Self {
            pos: 0,
            min: 0,
            max: len.saturating_sub(1),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn next(&mut self) {
        if self.pos < self.max {
            self.pos += 1;
        } else {
            self.pos = self.min;
        }
    }

    pub fn prev(&mut self) {
        if self.pos > self.min {
            self.pos -= 1;
        } else {
            self.pos = self.max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_forward_and_backward() {
        let mut cursor = Cursor::over(3);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.pos(), 2);
        cursor.next();
        assert_eq!(cursor.pos(), 0);
        cursor.prev();
        assert_eq!(cursor.pos(), 2);
        cursor.prev();
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn wraps_to_min_not_zero() {
        let mut cursor = Cursor { pos: 4, min: 2, max: 4 };
        cursor.next();
        assert_eq!(cursor.pos(), 2);
        cursor.prev();
        assert_eq!(cursor.pos(), 4);
    }

    #[test]
    fn single_entry_stays_put() {
        let mut cursor = Cursor::over(1);
        cursor.next();
        cursor.prev();
        assert_eq!(cursor.pos(), 0);
    }
}
