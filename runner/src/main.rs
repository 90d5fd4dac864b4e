use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::info;
use serde_json::Value;

use processor::format_report;
use processor::request::{Request, Response};

fn cli() -> Command {
    Command::new("runner")
        .about("CPU scheduling simulator")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("JSON request to run, `-` or nothing reads stdin"),
        )
        .arg(
            Arg::new("algorithm")
                .short('a')
                .long("algorithm")
                .value_name("ID")
                .help("FCFS, SRTF, RR or NPP, overrides the request"),
        )
        .arg(
            Arg::new("quantum")
                .short('q')
                .long("quantum")
                .value_name("UNITS")
                .env("SCHEDULER_QUANTUM")
                .value_parser(value_parser!(i64))
                .help("Round-Robin quantum, overrides the request"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the JSON response instead of the report"),
        )
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("cannot read the request from stdin")?;
            Ok(body)
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("cannot read the request from {path}"))
        }
    }
}

/// Runs a request body with the overrides in `matches` and returns what
/// should be printed.
fn render(body: &str, matches: &ArgMatches) -> Result<String> {
    let mut request = Request::parse(body)?;
    if let Some(algorithm) = matches.get_one::<String>("algorithm") {
        request.algorithm = Some(Value::from(algorithm.as_str()));
    }
    if let Some(quantum) = matches.get_one::<i64>("quantum") {
        request.time_quantum = Some(Value::from(*quantum));
    }

    let outcome = request.run()?;
    info!(
        "{} scheduled {} processes",
        outcome.policy,
        outcome.processes.len()
    );

    if matches.get_flag("json") {
        let response = Response::from(&outcome);
        Ok(format!("{}\n", serde_json::to_string_pretty(&response)?))
    } else {
        Ok(format_report(&outcome))
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let body = read_input(matches.get_one::<String>("input").map(String::as_str))?;
    print!("{}", render(&body, matches)?);
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = cli().get_matches();
    process::exit(exit_code(run(&matches)));
}

/// Prints the error of a failed run and maps the result to the exit status.
fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

#[cfg(test)]
mod tests;
