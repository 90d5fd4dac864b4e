//! The JSON boundary of the simulator.
//!
//! A request names a policy and carries the workload; the response carries
//! the timings and the averages. Every field is validated before the
//! simulation starts.

use std::error::Error;
use std::fmt::{self, Display};
use std::num::NonZeroUsize;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use scheduler::{Pid, Process, SchedulerError, DEFAULT_PRIORITY};

use crate::{Outcome, Processor};

/// Reasons a request is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The body is not a valid request document.
    Malformed(String),

    /// The request has no `processes` array.
    MissingProcesses,

    /// A required field is absent.
    MissingField(&'static str),

    /// A field holds something other than an integer or a numeric string.
    NotNumeric(&'static str),

    /// A field does not fit the range it is stored in.
    OutOfRange(&'static str),

    /// A field that must be positive is zero or negative.
    NotPositive(&'static str),

    /// A field that must not be negative is negative.
    Negative(&'static str),

    /// The policy or its quantum were rejected.
    Scheduler(SchedulerError),
}

impl Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Malformed(reason) => write!(f, "Malformed request: {}", reason),
            RequestError::MissingProcesses => write!(f, "Processes array is required"),
            RequestError::MissingField(field) => write!(f, "Missing required field '{}'", field),
            RequestError::NotNumeric(field) => write!(f, "Expected numeric value for '{}'", field),
            RequestError::OutOfRange(field) => write!(f, "Field '{}' is out of range", field),
            RequestError::NotPositive(field) => {
                write!(f, "Field '{}' must be greater than zero", field)
            }
            RequestError::Negative(field) => write!(f, "Field '{}' must not be negative", field),
            RequestError::Scheduler(err) => write!(f, "{}", err),
        }
    }
}

impl Error for RequestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RequestError::Scheduler(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchedulerError> for RequestError {
    fn from(err: SchedulerError) -> Self {
        RequestError::Scheduler(err)
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Malformed(err.to_string())
    }
}

/// One process as submitted by the caller.
///
/// Numeric fields accept JSON numbers and numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    pub pid: Option<Value>,
    pub arrival_time: Option<Value>,
    pub burst_time: Option<Value>,
    pub priority: Option<Value>,
}

impl ProcessSpec {
    /// Validate the spec and build the process.
    ///
    /// * `position` - the 0-based position in the request, used for the default PID.
    pub fn to_process(&self, position: usize) -> Result<Process, RequestError> {
        let pid = match integer(self.pid.as_ref(), "pid")? {
            Some(pid) => non_negative(pid, "pid")?,
            None => position + 1,
        };
        let arrival_time = integer(self.arrival_time.as_ref(), "arrivalTime")?
            .ok_or(RequestError::MissingField("arrivalTime"))?;
        let arrival_time = non_negative(arrival_time, "arrivalTime")?;
        let burst_time = integer(self.burst_time.as_ref(), "burstTime")?
            .ok_or(RequestError::MissingField("burstTime"))?;
        if burst_time <= 0 {
            return Err(RequestError::NotPositive("burstTime"));
        }
        let burst_time = NonZeroUsize::new(non_negative(burst_time, "burstTime")?)
            .ok_or(RequestError::NotPositive("burstTime"))?;
        let priority = match integer(self.priority.as_ref(), "priority")? {
            Some(priority) => {
                i32::try_from(priority).map_err(|_| RequestError::OutOfRange("priority"))?
            }
            None => DEFAULT_PRIORITY,
        };

        Ok(Process::new(Pid::new(pid), arrival_time, burst_time, priority))
    }
}

/// Reads an optional integer field. `null` counts as absent.
fn integer(value: Option<&Value>, field: &'static str) -> Result<Option<i64>, RequestError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_i64()
            .map(Some)
            .ok_or(RequestError::NotNumeric(field)),
        Some(Value::String(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RequestError::NotNumeric(field)),
        Some(_) => Err(RequestError::NotNumeric(field)),
    }
}

fn non_negative(value: i64, field: &'static str) -> Result<usize, RequestError> {
    if value < 0 {
        return Err(RequestError::Negative(field));
    }
    usize::try_from(value).map_err(|_| RequestError::OutOfRange(field))
}

/// A scheduling request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// One of `FCFS`, `SRTF`, `RR` or `NPP`, in any case. Values that are
    /// not strings are matched by their JSON text.
    pub algorithm: Option<Value>,

    /// The Round-Robin quantum, ignored by the other policies.
    pub time_quantum: Option<Value>,

    pub processes: Option<Vec<ProcessSpec>>,
}

impl Request {
    pub fn parse(body: &str) -> Result<Request, RequestError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate every process and build the workload.
    pub fn workload(&self) -> Result<Vec<Process>, RequestError> {
        self.processes
            .as_ref()
            .ok_or(RequestError::MissingProcesses)?
            .iter()
            .enumerate()
            .map(|(position, spec)| spec.to_process(position))
            .collect()
    }

    /// Validate the policy and quantum and build the driver.
    pub fn processor(&self) -> Result<Processor, RequestError> {
        let quantum = integer(self.time_quantum.as_ref(), "timeQuantum")?;
        let algorithm = match &self.algorithm {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(other) => Some(other.to_string()),
        };
        let scheduler = scheduler::select(algorithm.as_deref(), quantum)?;
        Ok(Processor::new(scheduler))
    }

    /// Validate the request and run the simulation.
    pub fn run(&self) -> Result<Outcome, RequestError> {
        // a bad quantum is reported before bad processes
        integer(self.time_quantum.as_ref(), "timeQuantum")?;
        let workload = self.workload()?;
        Ok(self.processor()?.run(&workload))
    }
}

/// One process in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTimings {
    pub pid: usize,
    pub arrival_time: usize,
    pub burst_time: usize,
    pub priority: i32,
    pub waiting_time: usize,
    pub turnaround_time: usize,
    /// `-1` when the process never ran.
    pub start_time: i64,
    pub completion_time: usize,
}

impl From<&Process> for ProcessTimings {
    fn from(process: &Process) -> Self {
        ProcessTimings {
            pid: process.pid().get(),
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            priority: process.priority(),
            waiting_time: process.waiting_time(),
            turnaround_time: process.turnaround_time(),
            start_time: process
                .start_time()
                .and_then(|start| i64::try_from(start).ok())
                .unwrap_or(-1),
            completion_time: process.completion_time(),
        }
    }
}

/// A scheduling response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub processes: Vec<ProcessTimings>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

impl From<&Outcome> for Response {
    fn from(outcome: &Outcome) -> Self {
        Response {
            processes: outcome.processes.iter().map(ProcessTimings::from).collect(),
            average_waiting_time: outcome.average_waiting_time,
            average_turnaround_time: outcome.average_turnaround_time,
        }
    }
}

/// Parse, validate and run a request body.
pub fn handle(body: &str) -> Result<Response, RequestError> {
    let outcome = Request::parse(body)?.run()?;
    Ok(Response::from(&outcome))
}

/// Handle a request body and return the status code and JSON body a
/// transport should send back.
///
/// Rejected requests get `400` and `{"error": "..."}`.
pub fn respond(body: &str) -> (u16, String) {
    match handle(body) {
        Ok(response) => match serde_json::to_string(&response) {
            Ok(json) => (200, json),
            Err(err) => {
                debug!("cannot serialize response: {}", err);
                (500, error_body("Unexpected server error"))
            }
        },
        Err(err) => {
            debug!("rejected request: {}", err);
            (400, error_body(&err.to_string()))
        }
    }
}

fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
