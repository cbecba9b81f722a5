use crate::error::SessionError;
use crate::progress::{percent_complete, Progress};
use crate::rewards::{Celebration, PointsSink};

/// Points earned for reading every chapter of a course.
pub const COMPLETION_POINTS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved on to the chapter at this index.
    Moved(usize),
    /// The last chapter was read; points were credited.
    Completed,
    /// Nothing to do, the course was already completed.
    AlreadyCompleted,
}

/// Chapter-by-chapter reading session for one course.
#[derive(Debug)]
pub struct CourseSession<T, P: PointsSink> {
    chapters: Vec<T>,
    index: usize,
    score: u32,
    completed: bool,
    sink: P,
}

impl<T, P: PointsSink> CourseSession<T, P> {
    pub fn new(chapters: Vec<T>, sink: P) -> Result<Self, SessionError> {
        if chapters.is_empty() {
            return Err(SessionError::EmptySteps { kind: "course" });
        }
        Ok(Self {
            chapters,
            index: 0,
            score: 0,
            completed: false,
            sink,
        })
    }

    /// Marks the current chapter as read.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.completed {
            return AdvanceOutcome::AlreadyCompleted;
        }
        if self.index + 1 < self.chapters.len() {
            self.index += 1;
            log::debug!("course moved to chapter {}", self.index);
            return AdvanceOutcome::Moved(self.index);
        }

        self.completed = true;
        self.index = self.chapters.len();
        self.score += COMPLETION_POINTS;
        self.sink.credit_points(COMPLETION_POINTS);
        log::info!("course completed, {} points credited", COMPLETION_POINTS);
        AdvanceOutcome::Completed
    }

    /// Steps back one chapter. Returns false at the first chapter or once completed.
    pub fn previous(&mut self) -> bool {
        if self.completed || self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.score = 0;
        self.completed = false;
        log::debug!("course restarted");
    }

    pub fn progress(&self) -> Progress {
        Progress::from_index(self.index, self.chapters.len())
    }

    /// Index of the chapter being read, or `len()` once completed.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_chapter(&self) -> Option<&T> {
        self.chapters.get(self.index)
    }

    pub fn is_last_chapter(&self) -> bool {
        !self.completed && self.index + 1 == self.chapters.len()
    }

    pub fn percent_read(&self) -> u16 {
        percent_complete(self.index, self.chapters.len())
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Courses celebrate with a toast-sized signal on completion.
    pub fn celebration(&self) -> Option<Celebration> {
        self.completed.then_some(Celebration::Small)
    }
}
