//! A scheduling simulation driver
//!
//! This is used for running the policies from the [`scheduler`] crate
//! over a workload and summarising the result.

use std::fmt::Display;

use log::{debug, trace};
use scheduler::{Policy, Process, Scheduler, Slice};

pub mod request;

/// The result of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The policy that produced this outcome.
    pub policy: Policy,

    /// The processes in the order the policy left them, with their timings.
    pub processes: Vec<Process>,

    /// Every dispatch, in execution order.
    pub timeline: Vec<Slice>,

    /// Mean waiting time, rounded to 4 decimal places.
    pub average_waiting_time: f64,

    /// Mean turnaround time, rounded to 4 decimal places.
    pub average_turnaround_time: f64,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== {} =====", self.policy)?;
        writeln!(f, "PID\tAT\tBT\tPR\tSTART\tEND\tTAT\tWT")?;
        let mut processes = self.processes.iter().collect::<Vec<&Process>>();
        processes.sort_by_key(|process| process.pid());
        for process in processes {
            let start = match process.start_time() {
                Some(start) => start.to_string(),
                None => String::from("-"),
            };
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                process.pid(),
                process.arrival_time(),
                process.burst_time(),
                process.priority(),
                start,
                process.completion_time(),
                process.turnaround_time(),
                process.waiting_time()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "===== Timeline =====")?;
        for slice in &self.timeline {
            writeln!(f, "{}", slice)?;
        }
        writeln!(f)?;
        writeln!(f, "===== Averages =====")?;
        writeln!(f, "Waiting time: {:.4}", self.average_waiting_time)?;
        writeln!(f, "Turnaround time: {:.4}", self.average_turnaround_time)
    }
}

/// The simulation driver.
pub struct Processor {
    scheduler: Box<dyn Scheduler>,
}

impl Processor {
    pub fn new(scheduler: Box<dyn Scheduler>) -> Processor {
        Processor { scheduler }
    }

    pub fn policy(&self) -> Policy {
        self.scheduler.policy()
    }

    /// Run the scheduler over a copy of `processes`.
    ///
    /// The records passed in are never touched; the scheduler gets fresh
    /// copies, so the same workload can be run any number of times.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use std::num::NonZeroUsize;
    /// use processor::Processor;
    /// use scheduler::{Pid, Process};
    ///
    /// let burst = |units| NonZeroUsize::new(units).unwrap();
    /// let processor = Processor::new(Box::new(scheduler::fcfs()));
    /// let outcome = processor.run(&[
    ///     Process::new(Pid::new(1), 0, burst(5), 0),
    ///     Process::new(Pid::new(2), 1, burst(3), 0),
    /// ]);
    ///
    /// assert_eq!(outcome.average_waiting_time, 2.0);
    /// println!("{}", processor::format_report(&outcome));
    /// ```
    pub fn run(&self, processes: &[Process]) -> Outcome {
        let policy = self.scheduler.policy();
        debug!("running {} over {} processes", policy, processes.len());

        let workload = processes.iter().map(Process::fresh).collect();
        let schedule = self.scheduler.schedule(workload);
        for slice in &schedule.timeline {
            trace!("{}", slice);
        }

        let count = schedule.processes.len();
        let (waiting, turnaround) = schedule
            .processes
            .iter()
            .fold((0u64, 0u64), |(waiting, turnaround), process| {
                (
                    waiting + process.waiting_time() as u64,
                    turnaround + process.turnaround_time() as u64,
                )
            });

        if let Some(last) = schedule.timeline.last() {
            debug!("{} finished at {}", policy, last.end);
        }

        Outcome {
            policy,
            processes: schedule.processes,
            timeline: schedule.timeline,
            average_waiting_time: average(waiting, count),
            average_turnaround_time: average(turnaround, count),
        }
    }
}

fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round4(total as f64 / count as f64)
    }
}

/// Round to 4 decimal places, halves away from zero.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Format an [`Outcome`] as a text report.
///
/// * `outcome` - the outcome returned by the [`Processor`].
pub fn format_report(outcome: &Outcome) -> String {
    outcome.to_string()
}
