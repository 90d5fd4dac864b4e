#[cfg(feature = "fcfs")]
use scheduler::fcfs;
#[cfg(feature = "priority")]
use scheduler::priority;
#[cfg(not(any(feature = "fcfs", feature = "srtf", feature = "priority")))]
use scheduler::round_robin;
#[cfg(feature = "srtf")]
use scheduler::srtf;
use scheduler::{Pid, Process};

use std::env;
use std::fs;

use processor::format_report;
use processor::Processor;
use std::num::NonZeroUsize;

mod simple;

fn write_outcome(folder: &str, name: &str, report: &str) {
    let quantum = arguments();
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"),
        report,
    )
    .unwrap();
}

fn read_outcome(folder: &str, name: &str) -> String {
    let quantum = arguments();
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"
    ))
    .unwrap()
}

/// Runs `processes` through the selected policy and compares the report
/// with the stored one. `WRITE_OUTPUT` stores the report instead.
fn run(folder: &str, name: &str, processes: &[Process]) {
    let outcome = processor().run(processes);
    let output = format_report(&outcome);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_outcome(folder, name, &output);
    } else {
        let reference = read_outcome(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

/// Builds a workload from `(arrival, burst, priority)` triples, PIDs start from 1.
fn workload(specs: &[(usize, usize, i32)]) -> Vec<Process> {
    specs
        .iter()
        .enumerate()
        .map(|(index, &(arrival, burst, priority))| {
            Process::new(
                Pid::new(index + 1),
                arrival,
                NonZeroUsize::new(burst).unwrap(),
                priority,
            )
        })
        .collect()
}

fn arguments() -> usize {
    env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<usize>()
        .unwrap()
}

#[cfg(feature = "fcfs")]
static SCHEDULER: &str = "fcfs";
#[cfg(feature = "fcfs")]
fn processor() -> Processor {
    Processor::new(Box::new(fcfs()))
}

#[cfg(feature = "srtf")]
static SCHEDULER: &str = "srtf";
#[cfg(feature = "srtf")]
fn processor() -> Processor {
    Processor::new(Box::new(srtf()))
}

#[cfg(feature = "priority")]
static SCHEDULER: &str = "priority";
#[cfg(feature = "priority")]
fn processor() -> Processor {
    Processor::new(Box::new(priority()))
}

#[cfg(not(any(feature = "fcfs", feature = "srtf", feature = "priority")))]
static SCHEDULER: &str = "round-robin";
#[cfg(not(any(feature = "fcfs", feature = "srtf", feature = "priority")))]
fn processor() -> Processor {
    let quantum = arguments();

    println!("Quantum {quantum}");
    Processor::new(Box::new(round_robin(NonZeroUsize::new(quantum).unwrap())))
}
