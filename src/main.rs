use std::path::{Path, PathBuf};
use std::process::ExitCode;

use coordkit::logging::setup_logging;
use coordkit::{batch, coordinate, CoordinateSystem, Result};

const HELP: &str = "\
coordkit - parse and convert geographic coordinates

USAGE:
  coordkit [OPTIONS] TEXT...
  coordkit --csv FILE [--system NAME]

OPTIONS:
  -s, --system NAME   Output notation: WGS84, DMS, MGRS or GARS (default: all)
      --json          Print the result as JSON
      --csv FILE      Convert every row of a CSV file with a `text` column
  -v, --verbose       Log parser decisions to stderr
  -h, --help          Print this help
";

struct Flags {
    system: Option<CoordinateSystem>,
    json: bool,
    csv: Option<PathBuf>,
    text: String,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let verbose = args.contains(["-v", "--verbose"]);
    if let Err(e) = setup_logging(if verbose { "debug" } else { "warn" }) {
        eprintln!("{}", e);
    }

    let flags = Flags {
        system: args.opt_value_from_str(["-s", "--system"])?,
        json: args.contains("--json"),
        csv: args.opt_value_from_str("--csv")?,
        text: args
            .finish()
            .into_iter()
            .filter_map(|arg| arg.into_string().ok())
            .collect::<Vec<_>>()
            .join(" "),
    };

    Ok(Some(flags))
}

fn run_csv(path: &Path, system: CoordinateSystem) -> Result<()> {
    let report = batch::convert_csv_file(path, system)?;
    print!("{}", report.to_csv()?);
    Ok(())
}

fn run_text(flags: &Flags) -> Result<()> {
    let coordinate = coordinate::parse_any(&flags.text)?;
    let systems = match flags.system {
        Some(system) => vec![system],
        None => CoordinateSystem::ALL.to_vec(),
    };

    if flags.json {
        let formatted = systems
            .iter()
            .map(|system| Ok((system.name().to_string(), system.format(&coordinate)?.into())))
            .collect::<Result<serde_json::Map<String, serde_json::Value>>>()?;

        let output = serde_json::json!({
            "input": flags.text,
            "coordinate": coordinate,
            "formatted": formatted,
        });
        println!("{:#}", output);
    } else {
        for system in systems {
            println!("{:<6} {}", system.name(), system.format(&coordinate)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{}", HELP);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, HELP);
            return ExitCode::from(2);
        }
    };

    let result = match &flags.csv {
        Some(path) => run_csv(path, flags.system.unwrap_or_default()),
        None if flags.text.trim().is_empty() => {
            eprint!("{}", HELP);
            return ExitCode::from(2);
        }
        None => run_text(&flags),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
