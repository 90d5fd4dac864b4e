use log::trace;

use crate::{Policy, Process, Schedule, Scheduler, Slice};

/// Runs processes to completion in order of arrival.
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn schedule(&self, mut processes: Vec<Process>) -> Schedule {
        processes.sort_by_key(Process::arrival_time);

        let mut timeline = Vec::with_capacity(processes.len());
        let mut time = 0;
        for process in processes.iter_mut() {
            if time < process.arrival_time() {
                trace!("idle from {} to {}", time, process.arrival_time());
                time = process.arrival_time();
            }
            process.dispatch(time);
            let start = time;
            let burst = process.remaining_time();
            time += process.run_for(burst);
            process.finish(time);
            timeline.push(Slice::new(process.pid(), start, time));
        }

        Schedule {
            processes,
            timeline,
        }
    }
}
