use std::collections::VecDeque;
use std::num::NonZeroUsize;

use log::trace;

use crate::{Policy, Process, Schedule, Scheduler, Slice};

pub struct RoundRobin {
    quantum: NonZeroUsize,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroUsize) -> Self {
        RoundRobin { quantum }
    }
}

/// Moves every process that has arrived by `time` into the ready queue.
///
/// `next` is the index of the first process, in arrival order, that was
/// never queued.
fn admit(processes: &[Process], ready_queue: &mut VecDeque<usize>, next: &mut usize, time: usize) {
    while let Some(process) = processes.get(*next) {
        if process.arrival_time() > time {
            break;
        }
        ready_queue.push_back(*next);
        *next += 1;
    }
}

impl Scheduler for RoundRobin {
    fn policy(&self) -> Policy {
        Policy::RoundRobin {
            quantum: self.quantum,
        }
    }

    fn schedule(&self, mut processes: Vec<Process>) -> Schedule {
        processes.sort_by_key(Process::arrival_time);

        let mut ready_queue = VecDeque::new();
        let mut timeline = Vec::new();
        let mut next = 0;
        let mut time = 0;

        while next < processes.len() || !ready_queue.is_empty() {
            admit(&processes, &mut ready_queue, &mut next, time);

            let Some(current) = ready_queue.pop_front() else {
                if let Some(process) = processes.get(next) {
                    trace!("idle from {} to {}", time, process.arrival_time());
                    time = process.arrival_time();
                    ready_queue.push_back(next);
                    next += 1;
                }
                continue;
            };

            let process = &mut processes[current];
            process.dispatch(time);
            let start = time;
            time += process.run_for(self.quantum.get());
            timeline.push(Slice::new(process.pid(), start, time));

            let finished = process.is_finished();
            if finished {
                process.finish(time);
            }

            // arrivals during the slice queue up ahead of the preempted process
            admit(&processes, &mut ready_queue, &mut next, time);
            if !finished {
                ready_queue.push_back(current);
            }
        }

        Schedule {
            processes,
            timeline,
        }
    }
}
