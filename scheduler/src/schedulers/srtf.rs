use log::trace;

use crate::schedulers::next_arrival;
use crate::{Policy, Process, Schedule, Scheduler, Slice};

/// Preemptive shortest-remaining-time-first.
///
/// The clock advances one unit at a time. At every unit the arrived
/// process with the least remaining work runs; on a tie the process that
/// comes first in arrival order wins.
pub struct Srtf;

impl Scheduler for Srtf {
    fn policy(&self) -> Policy {
        Policy::Srtf
    }

    fn schedule(&self, mut processes: Vec<Process>) -> Schedule {
        processes.sort_by_key(Process::arrival_time);

        let mut timeline: Vec<Slice> = Vec::new();
        let mut last = None;
        let total = processes.len();
        let mut completed = 0;
        let mut time = processes.first().map_or(0, Process::arrival_time);

        while completed < total {
            let next = processes
                .iter()
                .enumerate()
                .filter(|(_, process)| !process.is_finished() && process.arrival_time() <= time)
                .min_by_key(|(_, process)| process.remaining_time())
                .map(|(index, _)| index);

            let Some(index) = next else {
                let arrival = next_arrival(&processes, time).unwrap_or(time + 1);
                trace!("idle from {} to {}", time, arrival);
                time = arrival;
                last = None;
                continue;
            };

            let process = &mut processes[index];
            process.dispatch(time);
            process.run_for(1);

            // consecutive units of the same process form one slice
            if let Some(slice) = timeline.last_mut().filter(|_| last == Some(index)) {
                slice.end += 1;
            } else {
                trace!("dispatch {} at {}", process.pid(), time);
                timeline.push(Slice::new(process.pid(), time, time + 1));
            }
            last = Some(index);
            time += 1;

            if process.is_finished() {
                process.finish(time);
                completed += 1;
            }
        }

        Schedule {
            processes,
            timeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedulers::testing::{assert_consistent, by_pid, workload};
    use crate::Pid;

    #[test]
    fn shorter_arrival_preempts() {
        let schedule = Srtf.schedule(workload(&[(0, 8, 0), (1, 4, 0)]));
        assert_consistent(&schedule);

        assert_eq!(by_pid(&schedule, 2).completion_time(), 5);
        assert_eq!(by_pid(&schedule, 2).start_time(), Some(1));
        assert_eq!(by_pid(&schedule, 1).completion_time(), 12);
        assert_eq!(by_pid(&schedule, 1).start_time(), Some(0));
        assert_eq!(
            schedule.timeline,
            vec![
                Slice::new(Pid::new(1), 0, 1),
                Slice::new(Pid::new(2), 1, 5),
                Slice::new(Pid::new(1), 5, 12),
            ]
        );
    }

    #[test]
    fn ties_go_to_earlier_arrival() {
        let schedule = Srtf.schedule(workload(&[(0, 3, 0), (1, 2, 0), (2, 1, 0), (3, 4, 0)]));
        assert_consistent(&schedule);

        // at time 1 both remaining times are 2, the first process keeps the cpu
        assert_eq!(by_pid(&schedule, 1).completion_time(), 3);
        assert_eq!(by_pid(&schedule, 3).start_time(), Some(3));
        assert_eq!(by_pid(&schedule, 2).start_time(), Some(4));
        assert_eq!(by_pid(&schedule, 4).completion_time(), 10);
    }

    #[test]
    fn starts_at_first_arrival_and_skips_gaps() {
        let schedule = Srtf.schedule(workload(&[(5, 2, 0), (20, 3, 0)]));
        assert_consistent(&schedule);

        assert_eq!(by_pid(&schedule, 1).start_time(), Some(5));
        assert_eq!(by_pid(&schedule, 1).waiting_time(), 0);
        assert_eq!(by_pid(&schedule, 2).start_time(), Some(20));
        assert_eq!(by_pid(&schedule, 2).completion_time(), 23);
    }

    #[test]
    fn preempted_process_keeps_first_start() {
        let schedule = Srtf.schedule(workload(&[(0, 6, 0), (2, 1, 0), (4, 1, 0)]));
        assert_consistent(&schedule);

        let long = by_pid(&schedule, 1);
        assert_eq!(long.start_time(), Some(0));
        assert_eq!(long.completion_time(), 8);
        assert_eq!(long.waiting_time(), 2);
        assert_eq!(schedule.timeline.len(), 5);
    }

    #[test]
    fn empty_workload() {
        let schedule = Srtf.schedule(Vec::new());
        assert!(schedule.processes.is_empty());
    }
}
