/// Mode state carried from one line to the next within a single document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransducerState {
    pub in_code_block: bool,
    pub in_list: bool,
    /// Indent of the item that started the current list run
    pub list_indent: usize,
}

impl TransducerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip fence membership, returning true when a block was just opened.
    pub(crate) fn toggle_code_block(&mut self) -> bool {
        self.in_code_block = !self.in_code_block;
        if self.in_code_block {
            self.in_list = false;
        }
        self.in_code_block
    }

    /// Record a list item, returning true if it starts a new run or level.
    pub(crate) fn enter_list(&mut self, indent: usize) -> bool {
        if self.in_list && self.list_indent == indent {
            return false;
        }
        self.in_list = true;
        self.list_indent = indent;
        true
    }

    pub(crate) fn end_list(&mut self) {
        self.in_list = false;
    }
}
