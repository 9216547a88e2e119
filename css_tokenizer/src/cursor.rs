/// A lookahead stream over a list of elements.
///
/// The cursor is used for code points (by the tokenizer and the unicode-range
/// parser) and for component values (by the parser). Reading past either end
/// of the list yields the `eof` element the cursor was constructed with.
///
/// Offsets are relative to the current position: `peek(0)` is the next input
/// element and `peek(-1)` is the element that was consumed last.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor<T> {
    elements: Vec<T>,
    position: usize,
    eof: T,
}

impl<T: Clone + PartialEq> Cursor<T> {
    pub fn new(elements: Vec<T>, eof: T) -> Self {
        Self {
            elements,
            position: 0,
            eof,
        }
    }

    /// Runs `preprocess` over `source` once and wraps the result.
    pub fn with_preprocess<S>(source: S, preprocess: impl FnOnce(S) -> Vec<T>, eof: T) -> Self {
        Self::new(preprocess(source), eof)
    }

    pub fn is_eof(&self, offset: isize) -> bool {
        self.index(offset).is_none()
    }

    pub fn peek(&self, offset: isize) -> &T {
        match self.index(offset) {
            Some(index) => &self.elements[index],
            None => &self.eof,
        }
    }

    pub fn advance(&mut self, count: usize) {
        self.position += count;
    }

    /// Returns the next input element and moves past it.
    ///
    /// At the end of the input this still advances, so that a following
    /// `reconsume` lands back on the end.
    pub fn consume_any(&mut self) -> T {
        let element = self.peek(0).clone();
        self.advance(1);
        element
    }

    pub fn reconsume(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn consume_if_equal(&mut self, expected: &T) -> bool {
        self.consume_if(|element| element == expected)
    }

    /// Reports whether the input is exhausted. Never advances.
    pub fn consume_if_eof(&self) -> bool {
        self.is_eof(0)
    }

    pub fn consume_if(&mut self, predicate: impl FnOnce(&T) -> bool) -> bool {
        if predicate(self.peek(0)) {
            self.advance(1);
            return true;
        }
        false
    }

    pub fn consume_while(&mut self, predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        self.consume_while_at_most(predicate, usize::MAX)
    }

    pub fn consume_while_at_most(
        &mut self,
        mut predicate: impl FnMut(&T) -> bool,
        max: usize,
    ) -> Vec<T> {
        let start = self.position;
        while self.position - start < max && !self.is_eof(0) && predicate(self.peek(0)) {
            self.advance(1);
        }
        self.elements_between(start, self.position)
    }

    /// Runs `action` and returns every element it consumed.
    pub fn slice_consumed_during(&mut self, action: impl FnOnce(&mut Self)) -> Vec<T> {
        let start = self.position;
        action(self);
        self.elements_between(start, self.position)
    }

    fn elements_between(&self, start: usize, end: usize) -> Vec<T> {
        let end = end.min(self.elements.len());
        self.elements
            .get(start..end)
            .map(<[T]>::to_vec)
            .unwrap_or_default()
    }

    fn index(&self, offset: isize) -> Option<usize> {
        let index = (self.position as isize).checked_add(offset)?;
        if index < 0 || index as usize >= self.elements.len() {
            return None;
        }
        Some(index as usize)
    }
}
