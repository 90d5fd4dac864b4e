//! The scheduling policies
//!
//! Each policy lives in its own file and is exported here.
//!
mod fcfs;
pub use fcfs::Fcfs;

mod srtf;
pub use srtf::Srtf;

mod round_robin;
pub use round_robin::RoundRobin;

mod priority;
pub use priority::Priority;

use crate::Process;

/// The earliest arrival after `time` among the processes that still have work.
fn next_arrival(processes: &[Process], time: usize) -> Option<usize> {
    processes
        .iter()
        .filter(|process| !process.is_finished() && process.arrival_time() > time)
        .map(Process::arrival_time)
        .min()
}

#[cfg(test)]
pub(crate) mod testing {
    use std::num::NonZeroUsize;

    use crate::{Pid, Process, Schedule};

    /// Burst times in tests are literals above zero.
    pub fn units(burst: usize) -> NonZeroUsize {
        NonZeroUsize::new(burst).unwrap()
    }

    /// Builds a workload from `(arrival, burst, priority)` triples, PIDs start from 1.
    pub fn workload(specs: &[(usize, usize, i32)]) -> Vec<Process> {
        specs
            .iter()
            .enumerate()
            .map(|(index, &(arrival, burst, priority))| {
                Process::new(Pid::new(index + 1), arrival, units(burst), priority)
            })
            .collect()
    }

    /// Returns the process with `pid`.
    pub fn by_pid(schedule: &Schedule, pid: usize) -> &Process {
        schedule
            .processes
            .iter()
            .find(|process| process.pid() == pid)
            .unwrap()
    }

    /// Checks the timing relations every policy has to respect.
    pub fn assert_consistent(schedule: &Schedule) {
        let busy: usize = schedule.timeline.iter().map(|slice| slice.len()).sum();
        let total: usize = schedule.processes.iter().map(Process::burst_time).sum();
        assert_eq!(busy, total);

        for pair in schedule.timeline.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{} overlaps {}", pair[0], pair[1]);
        }

        for process in &schedule.processes {
            assert!(process.is_finished());
            assert_eq!(
                process.waiting_time() + process.burst_time(),
                process.turnaround_time()
            );
            assert_eq!(
                process.turnaround_time(),
                process.completion_time() - process.arrival_time()
            );
            assert!(process.completion_time() >= process.arrival_time() + process.burst_time());
            assert!(process.start_time().unwrap() >= process.arrival_time());
        }
    }
}
