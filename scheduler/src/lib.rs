//! A CPU scheduling simulation library.
//!
//! This library provides the process record, the [`Scheduler`] trait
//! and four policies that compute start, completion, waiting and
//! turnaround times for a workload.
//!

use std::num::NonZeroUsize;

mod error;
mod scheduler;

use schedulers::{Fcfs, Priority, RoundRobin, Srtf};

pub use crate::error::SchedulerError;
pub use crate::scheduler::{Pid, Policy, Process, Schedule, Scheduler, Slice};

mod schedulers;

/// The Round-Robin quantum used when the caller does not give one.
pub const DEFAULT_QUANTUM: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(quantum) => quantum,
    None => panic!("the default quantum must not be zero"),
};

/// The priority given to processes that do not specify one.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Returns a structure that implements the `Scheduler` trait with a first-come-first-served policy
pub fn fcfs() -> impl Scheduler {
    Fcfs
}

/// Returns a structure that implements the `Scheduler` trait with a preemptive
/// shortest-remaining-time-first policy
pub fn srtf() -> impl Scheduler {
    Srtf
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `quantum` - the time units that a process can run before it is preempted
pub fn round_robin(quantum: NonZeroUsize) -> impl Scheduler {
    RoundRobin::new(quantum)
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive priority policy
pub fn priority() -> impl Scheduler {
    Priority
}

/// Returns the scheduler that implements `policy`.
pub fn from_policy(policy: Policy) -> Box<dyn Scheduler> {
    match policy {
        Policy::Fcfs => Box::new(fcfs()),
        Policy::Srtf => Box::new(srtf()),
        Policy::RoundRobin { quantum } => Box::new(round_robin(quantum)),
        Policy::Priority => Box::new(priority()),
    }
}

/// Builds a scheduler from a policy identifier.
///
/// * `id` - one of `FCFS`, `SRTF`, `RR` or `NPP`, in any case.
/// * `quantum` - only used by `RR`, which falls back to [`DEFAULT_QUANTUM`]
///               when it is `None`. Values below 1 are rejected.
///
/// ## Example
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use scheduler::{select, Pid, Process};
///
/// let burst = |units| NonZeroUsize::new(units).unwrap();
/// let scheduler = select(Some("rr"), Some(2)).unwrap();
/// let schedule = scheduler.schedule(vec![
///     Process::new(Pid::new(1), 0, burst(5), 0),
///     Process::new(Pid::new(2), 1, burst(3), 0),
/// ]);
/// assert_eq!(schedule.processes[1].completion_time(), 7);
/// ```
pub fn select(id: Option<&str>, quantum: Option<i64>) -> Result<Box<dyn Scheduler>, SchedulerError> {
    let policy = match id.unwrap_or_default().parse::<Policy>()? {
        Policy::RoundRobin { .. } => Policy::RoundRobin {
            quantum: match quantum {
                Some(quantum) => usize::try_from(quantum)
                    .ok()
                    .and_then(NonZeroUsize::new)
                    .ok_or(SchedulerError::InvalidQuantum(quantum))?,
                None => DEFAULT_QUANTUM,
            },
        },
        policy => policy,
    };
    log::debug!("selected policy {}", policy);
    Ok(from_policy(policy))
}
