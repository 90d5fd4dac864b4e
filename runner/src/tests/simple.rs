use core::module_path;
use function_name::named;

use super::{run, workload};

#[test]
#[named]
pub fn single_process() {
    let processes = workload(&[(0, 5, 0)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &processes,
    );
}

#[test]
#[named]
pub fn two_processes() {
    let processes = workload(&[(0, 5, 0), (1, 3, 0)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &processes,
    );
}

#[test]
#[named]
pub fn idle_gap() {
    let processes = workload(&[(2, 3, 1), (10, 2, 0)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &processes,
    );
}
