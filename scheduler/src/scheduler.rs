use std::fmt::{self, Display};
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::{SchedulerError, DEFAULT_QUANTUM};

/// The PID of a process
///
/// PIDs are supplied by the caller or default to the 1-based
/// position of the process in the submitted workload.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of work handed to a [`Scheduler`].
///
/// The arrival time, burst time and priority are fixed at construction.
/// Everything else is filled in by the policy that runs the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    arrival_time: usize,
    burst_time: NonZeroUsize,
    priority: i32,
    remaining_time: usize,
    start_time: Option<usize>,
    completion_time: usize,
    waiting_time: usize,
    turnaround_time: usize,
}

impl Process {
    /// Create a process that has not run yet.
    ///
    /// * `burst_time` - the work the process needs, at least one time unit.
    /// * `priority` - lower values are scheduled first by the priority policy.
    pub fn new(pid: Pid, arrival_time: usize, burst_time: NonZeroUsize, priority: i32) -> Process {
        Process {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time.get(),
            start_time: None,
            completion_time: 0,
            waiting_time: 0,
            turnaround_time: 0,
        }
    }

    /// Returns a copy that keeps only the static inputs, as if it never ran.
    pub fn fresh(&self) -> Process {
        Process::new(self.pid, self.arrival_time, self.burst_time, self.priority)
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    pub fn burst_time(&self) -> usize {
        self.burst_time.get()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn remaining_time(&self) -> usize {
        self.remaining_time
    }

    /// Time of the first dispatch, `None` until the process runs.
    pub fn start_time(&self) -> Option<usize> {
        self.start_time
    }

    pub fn completion_time(&self) -> usize {
        self.completion_time
    }

    pub fn waiting_time(&self) -> usize {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> usize {
        self.turnaround_time
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Record the first dispatch. Later dispatches leave the start time alone.
    pub(crate) fn dispatch(&mut self, time: usize) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// Run for at most `units` time units and return how many were used.
    pub(crate) fn run_for(&mut self, units: usize) -> usize {
        let units = units.min(self.remaining_time);
        self.remaining_time -= units;
        units
    }

    pub(crate) fn finish(&mut self, time: usize) {
        self.completion_time = time;
        self.turnaround_time = time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time.get();
    }
}

/// One contiguous stretch of CPU time given to a process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Slice {
    pub pid: Pid,
    pub start: usize,
    pub end: usize,
}

impl Slice {
    pub fn new(pid: Pid, start: usize, end: usize) -> Slice {
        Slice { pid, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}-{}] P{}", self.start, self.end, self.pid)
    }
}

/// The result of running a policy over a workload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    /// The processes sorted by arrival time, with their timings filled in.
    pub processes: Vec<Process>,

    /// Every dispatch, in execution order.
    pub timeline: Vec<Slice>,
}

/// The scheduling policies the engine knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Policy {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Remaining-Time-First, preemptive.
    Srtf,
    /// Round-Robin with a fixed time quantum.
    RoundRobin { quantum: NonZeroUsize },
    /// Non-preemptive priority, lower value first.
    Priority,
}

impl Policy {
    /// The identifier used to select the policy.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Srtf => "SRTF",
            Policy::RoundRobin { .. } => "RR",
            Policy::Priority => "NPP",
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::Srtf | Policy::RoundRobin { .. })
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    /// Parses a case insensitive identifier. Round-Robin gets the default quantum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SchedulerError::MissingPolicy);
        }
        match s.to_ascii_uppercase().as_str() {
            "FCFS" => Ok(Policy::Fcfs),
            "SRTF" => Ok(Policy::Srtf),
            "RR" => Ok(Policy::RoundRobin {
                quantum: DEFAULT_QUANTUM,
            }),
            "NPP" => Ok(Policy::Priority),
            _ => Err(SchedulerError::UnsupportedPolicy(s.to_string())),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::RoundRobin { quantum } => write!(f, "RR quantum={}", quantum),
            policy => write!(f, "{}", policy.name()),
        }
    }
}

/// The trait that every scheduling policy implements.
///
/// A policy owns the process list it is given for the duration of one call
/// and keeps no state between calls.
pub trait Scheduler: Send + Sync {
    /// Returns the policy this scheduler implements.
    fn policy(&self) -> Policy;

    /// Runs the simulation and returns the processes with their timings.
    fn schedule(&self, processes: Vec<Process>) -> Schedule;
}
