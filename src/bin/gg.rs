//! gg: Geographic to grid, and back
use clap::Parser;
use geogrid::prelude::*;
use geogrid::Operation;
use log::{debug, trace, warn};
use std::io::BufRead;

/// Convert coordinate pairs between geographic and grid coordinates.
///
/// Reads whitespace separated pairs, one per line, from the files given,
/// or from stdin if none are. Latitude and longitude in decimal degrees
/// in the forward direction, easting and northing in meters in the inverse.
/// Anything following the first two numbers on a line is passed through.
#[derive(Parser, Debug)]
#[clap(name = "gg")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The operation, e.g. "utm zone=32", "osgb datum=WGS84",
    /// or "lcc lat_1=33 lat_2=45 lon_0=10"
    operation: String,

    /// Inverse operation
    #[clap(long = "inv")]
    inverse: bool,

    /// Number of decimals in the output
    #[clap(short = 'd', long)]
    decimals: Option<usize>,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on
    args: Vec<String>,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is gg");
    debug!("{:#?}", options);

    let op = Operation::new(&options.operation)?;
    let direction = if options.inverse { Inv } else { Fwd };

    // Geographic output in degrees gets more decimals than grid output in meters
    let decimals = options.decimals.unwrap_or(match direction {
        Fwd => 4,
        Inv => 10,
    });

    if options.args.is_empty() {
        let stdin = std::io::stdin();
        process(&op, direction, decimals, "stdin", stdin.lock())?;
    }
    for arg in &options.args {
        let file = std::fs::File::open(arg)?;
        process(&op, direction, decimals, arg, std::io::BufReader::new(file))?;
    }
    Ok(())
}

// Apply `op` to every line of `reader`. Lines that fail to parse or to
// convert are reported on stderr, and skipped.
fn process(
    op: &Operation,
    direction: Direction,
    decimals: usize,
    source: &str,
    reader: impl BufRead,
) -> Result<(), anyhow::Error> {
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        // Blank lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let pair = (
            fields.next().map(str::parse::<f64>),
            fields.next().map(str::parse::<f64>),
        );
        let (Some(Ok(a)), Some(Ok(b))) = pair else {
            warn!("{source}:{}: cannot parse '{line}'", index + 1);
            eprintln!("{source}:{}: expected two numbers, got '{line}'", index + 1);
            continue;
        };
        let rest: Vec<&str> = fields.collect();

        match op.apply(direction, a, b) {
            Ok((x, y)) => {
                if rest.is_empty() {
                    println!("{x:.decimals$} {y:.decimals$}");
                } else {
                    println!("{x:.decimals$} {y:.decimals$} {}", rest.join(" "));
                }
            }
            Err(e) => eprintln!("{source}:{}: {e}", index + 1),
        }
    }
    Ok(())
}
