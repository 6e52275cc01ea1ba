//! Simple command that prints one or '-n count' identifiers of a '-k kind', or checks the given
//! values with 'check [-t threshold] value...'

use dtuuid::{threshold_from_str, DateTimeUuid, DateUuid, Uuid};
use std::{env, io, io::Write, process::ExitCode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Random,
    Date,
    DateTime,
}

impl Kind {
    fn generate(self) -> String {
        match self {
            Kind::Random => Uuid::generate(),
            Kind::Date => DateUuid::generate(),
            Kind::DateTime => DateTimeUuid::generate(),
        }
    }
}

enum Command {
    Generate { kind: Kind, count: usize },
    Check {
        values: Vec<String>,
        threshold: Option<u64>,
    },
}

fn main() -> io::Result<ExitCode> {
    let command = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {0} [-k random|date|datetime] [-n count]\n       {0} check [-t threshold] value...",
                    program.as_deref().unwrap_or("dtuuid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    match command {
        Command::Generate { kind, count } => {
            for _ in 0..count {
                writeln!(buf, "{}", kind.generate())?;
            }
        }
        Command::Check { values, threshold } => {
            let mut all_valid = true;
            for value in values {
                let date = DateUuid::parse(&value, threshold);
                let date_time = DateTimeUuid::parse(&value, threshold);
                let verdict = match (date, date_time) {
                    (_, Some(e)) if DateTimeUuid::validate(&value, true, threshold) => {
                        format!("date-time {}T{}Z", e.date.join("-"), e.time.join(":"))
                    }
                    (Some(e), _) if DateUuid::validate(&value, true, threshold) => {
                        format!("date {}", e.join("-"))
                    }
                    _ if Uuid::validate(&value, true) => "random".to_owned(),
                    _ if Uuid::validate(&value, false) => "loose".to_owned(),
                    _ => {
                        all_valid = false;
                        "invalid".to_owned()
                    }
                };
                writeln!(buf, "{}\t{}", value, verdict)?;
            }
            if !all_valid {
                buf.flush()?;
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut kind = None;
    let mut count = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "check" if kind.is_none() && count.is_none() => {
                let mut values: Vec<String> = args.collect();
                let mut threshold = None;
                if values.first().map(String::as_str) == Some("-t") {
                    let Some(t_arg) = values.get(1) else {
                        return Err("argument to option 't' missing".to_owned());
                    };
                    threshold = threshold_from_str(t_arg)
                        .map_err(|e| format!("invalid argument to option 't': {}", e))?;
                    values.drain(..2);
                }
                if values.is_empty() {
                    return Err("no values to check".to_owned());
                }
                return Ok(Command::Check { values, threshold });
            }
            "-n" => {
                if count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                count.replace(c);
            }
            "-k" => {
                if kind.is_some() {
                    return Err("option 'k' given more than once".to_owned());
                }
                let Some(k_arg) = args.next() else {
                    return Err("argument to option 'k' missing".to_owned());
                };
                kind.replace(match k_arg.as_str() {
                    "random" => Kind::Random,
                    "date" => Kind::Date,
                    "datetime" => Kind::DateTime,
                    _ => return Err(format!("invalid argument to option 'k': '{}'", k_arg)),
                });
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(Command::Generate {
        kind: kind.unwrap_or(Kind::DateTime),
        count: count.unwrap_or(1),
    })
}
