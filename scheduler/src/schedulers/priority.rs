use log::trace;

use crate::schedulers::next_arrival;
use crate::{Policy, Process, Schedule, Scheduler, Slice};

/// Non-preemptive priority scheduling.
///
/// Whenever the cpu is free the arrived process with the lowest priority
/// value runs to completion. Ties go to the earlier arrival, then to the
/// lower PID.
pub struct Priority;

impl Scheduler for Priority {
    fn policy(&self) -> Policy {
        Policy::Priority
    }

    fn schedule(&self, mut processes: Vec<Process>) -> Schedule {
        processes.sort_by_key(Process::arrival_time);

        let mut timeline = Vec::with_capacity(processes.len());
        let total = processes.len();
        let mut completed = 0;
        let mut time = processes.first().map_or(0, Process::arrival_time);

        while completed < total {
            let next = processes
                .iter()
                .enumerate()
                .filter(|(_, process)| !process.is_finished() && process.arrival_time() <= time)
                .min_by_key(|(_, process)| (process.priority(), process.arrival_time(), process.pid()))
                .map(|(index, _)| index);

            let Some(index) = next else {
                match next_arrival(&processes, time) {
                    Some(arrival) => {
                        trace!("idle from {} to {}", time, arrival);
                        time = arrival;
                        continue;
                    }
                    None => break,
                }
            };

            let process = &mut processes[index];
            trace!("dispatch {} (priority {}) at {}", process.pid(), process.priority(), time);
            process.dispatch(time);
            let start = time;
            let burst = process.remaining_time();
            time += process.run_for(burst);
            process.finish(time);
            completed += 1;
            timeline.push(Slice::new(process.pid(), start, time));
        }

        Schedule {
            processes,
            timeline,
        }
    }
}
