use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Points balance a new learner starts with.
pub const STARTING_POINTS: u32 = 350;

/// Receiver of earned points.
///
/// Engines call this at most once per qualifying completion. The sink is
/// shared between sessions, hence `&self`.
pub trait PointsSink {
    fn credit_points(&self, amount: u32);
}

impl<S: PointsSink + ?Sized> PointsSink for Rc<S> {
    fn credit_points(&self, amount: u32) {
        (**self).credit_points(amount)
    }
}

impl<S: PointsSink + ?Sized> PointsSink for &S {
    fn credit_points(&self, amount: u32) {
        (**self).credit_points(amount)
    }
}

/// In-memory points store shared by every view. Lost on exit.
#[derive(Debug)]
pub struct Wallet {
    balance: Cell<u32>,
    credits: RefCell<Vec<u32>>,
}

impl Wallet {
    pub fn new(starting_points: u32) -> Self {
        Self {
            balance: Cell::new(starting_points),
            credits: RefCell::new(Vec::new()),
        }
    }

    pub fn shared(starting_points: u32) -> Rc<Self> {
        Rc::new(Self::new(starting_points))
    }

    pub fn balance(&self) -> u32 {
        self.balance.get()
    }

    /// Every credit applied so far, oldest first.
    pub fn credits(&self) -> Vec<u32> {
        self.credits.borrow().clone()
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(STARTING_POINTS)
    }
}

impl PointsSink for Wallet {
    fn credit_points(&self, amount: u32) {
        self.balance.set(self.balance.get().saturating_add(amount));
        self.credits.borrow_mut().push(amount);
        log::info!(
            "credited {} points, balance now {}",
            amount,
            self.balance.get()
        );
    }
}

/// Celebratory signal raised by an engine for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Celebration {
    /// A single correct answer.
    Small,
    /// A session finished with a good score.
    Large,
}

impl Celebration {
    /// Confetti particle count for this signal.
    pub fn particle_count(&self) -> usize {
        match self {
            Celebration::Small => 50,
            Celebration::Large => 150,
        }
    }
}
