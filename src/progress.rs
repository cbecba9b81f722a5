/// Position of a learner in an ordered sequence of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    InProgress(usize),
    Completed,
}

impl Progress {
    /// Maps a raw step index onto a progress value for a sequence of `len` steps.
    /// `index == len` means the sequence is finished.
    pub fn from_index(index: usize, len: usize) -> Self {
        if index >= len {
            Progress::Completed
        } else {
            Progress::InProgress(index)
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Progress::Completed)
    }
}

/// Fraction of the sequence already behind the learner, in percent.
pub fn percent_complete(index: usize, len: usize) -> u16 {
    if len == 0 {
        return 100;
    }
    ((index.min(len) * 100) / len) as u16
}
