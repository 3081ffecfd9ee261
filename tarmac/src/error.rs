use thiserror::Error;

/// Errors raised by queue operations.
///
/// `Empty` is an expected condition for callers that poll; components that
/// follow the check-before-dequeue protocol treat it as a broken invariant
/// instead and propagate it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("dequeue from empty queue '{0}'")]
    Empty(&'static str),

    #[error("queue '{name}' exceeded capacity {capacity}")]
    CapacityExceeded { name: &'static str, capacity: usize },
}

pub type Result<T> = std::result::Result<T, QueueError>;
