//! Main lfsr binary - LFSR simulation and stream recovery utility
//!
//! Forward mode generates a keystream from a known register; inverse mode
//! recovers candidate registers from an observed stream and scores them
//! against it.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use lfsrs::{
    analysis, BitStream, DegreeSearch, Gf2Solver, IterValidator, LfsrEngine, RegisterConfig,
    RunRequest, Seed, Validator,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = Command::new("lfsr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("LFSR simulation and stream recovery utility")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .visible_alias("g")
                .about("Generate a bit stream from a register configuration")
                .arg(
                    Arg::new("degree")
                        .short('d')
                        .long("degree")
                        .help("Register width in bits")
                        .value_name("N")
                        .required(true),
                )
                .arg(
                    Arg::new("taps")
                        .short('t')
                        .long("taps")
                        .help("Comma-separated tap positions, e.g. 1,3")
                        .value_name("POSITIONS")
                        .required(true),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .help("Initial register contents (decimal, or binary with 0b prefix)")
                        .value_name("SEED")
                        .required(true),
                )
                .arg(
                    Arg::new("iterations")
                        .short('n')
                        .long("iterations")
                        .help("Number of clocks to run")
                        .value_name("COUNT")
                        .required(true),
                )
                .arg(
                    Arg::new("log")
                        .short('l')
                        .long("log")
                        .help("Print the state log alongside the stream")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("stats")
                        .long("stats")
                        .help("Print bit-frequency statistics for the stream")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Recover tap positions from a stream at one degree")
                .arg(
                    Arg::new("stream")
                        .help("Observed bit stream ('0'/'1' characters)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("degree")
                        .short('d')
                        .long("degree")
                        .help("Candidate register width")
                        .value_name("N")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("search")
                .visible_alias("s")
                .about("Scan every candidate degree for a stream")
                .arg(
                    Arg::new("stream")
                        .help("Observed bit stream ('0'/'1' characters)")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("validate")
                .visible_alias("v")
                .about("Score a tap configuration against an observed stream")
                .arg(
                    Arg::new("stream")
                        .help("Observed bit stream ('0'/'1' characters)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("degree")
                        .short('d')
                        .long("degree")
                        .help("Register width of the candidate")
                        .value_name("N")
                        .required(true),
                )
                .arg(
                    Arg::new("taps")
                        .short('t')
                        .long("taps")
                        .help("Comma-separated tap positions, e.g. 1,3")
                        .value_name("POSITIONS")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("recover")
                .visible_alias("r")
                .about("Recover and score every candidate degree end-to-end")
                .arg(
                    Arg::new("stream")
                        .help("Observed bit stream ('0'/'1' characters)")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("generate", sub_matches)) => handle_generate(sub_matches),
        Some(("solve", sub_matches)) => handle_solve(sub_matches),
        Some(("search", sub_matches)) => handle_search(sub_matches),
        Some(("validate", sub_matches)) => handle_validate(sub_matches),
        Some(("recover", sub_matches)) => handle_recover(sub_matches),
        _ => {
            eprintln!("Error: No command specified");
            eprintln!("\nUse 'lfsr --help' for usage information");
            std::process::exit(1);
        }
    }
}

fn parse_degree(matches: &ArgMatches) -> Result<usize> {
    matches
        .get_one::<String>("degree")
        .expect("degree is required")
        .parse::<usize>()
        .context("degree must be a non-negative integer")
}

fn parse_taps(matches: &ArgMatches) -> Result<Vec<i64>> {
    let raw = matches.get_one::<String>("taps").expect("taps is required");
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .with_context(|| format!("invalid tap position: {:?}", part.trim()))
        })
        .collect()
}

fn parse_seed(raw: &str) -> Result<Seed> {
    let value = if let Some(binary) = raw.strip_prefix("0b") {
        u128::from_str_radix(binary, 2).with_context(|| format!("invalid binary seed: {}", raw))?
    } else {
        raw.parse::<u128>()
            .with_context(|| format!("invalid seed: {}", raw))?
    };
    Ok(Seed::from_value(value))
}

fn parse_stream(matches: &ArgMatches) -> Result<BitStream> {
    matches
        .get_one::<String>("stream")
        .expect("stream is required")
        .parse::<BitStream>()
        .context("stream must consist of '0' and '1' characters")
}

fn handle_generate(matches: &ArgMatches) -> Result<()> {
    let degree = parse_degree(matches)?;
    let taps = parse_taps(matches)?;
    let seed = parse_seed(matches.get_one::<String>("seed").expect("seed is required"))?;
    let iterations = matches
        .get_one::<String>("iterations")
        .expect("iterations is required")
        .parse::<usize>()
        .context("iterations must be a non-negative integer")?;

    let engine = LfsrEngine::with_taps(degree, &taps).context("invalid register configuration")?;
    let run = engine
        .generate(&RunRequest::new(seed, iterations))
        .context("generation failed")?;

    println!("Feedback polynomial: {}", engine.config().feedback_polynomial());
    println!("Bitstream: {}", run.stream);
    println!("Period: {}", run.period);

    if matches.get_flag("log") {
        for (clock, state) in run.log.iter().enumerate() {
            println!("State {}:\t{}", clock, state);
        }
    }

    if matches.get_flag("stats") {
        let report = analysis::randomness(&run.stream)?;
        for bit in [0u8, 1u8] {
            println!(
                "Probability (bit = {}) = {:.4} %",
                bit,
                100.0 * report.frequency(bit)
            );
            println!(
                "Laplace succession (bit = {}) = {:.4} %",
                bit,
                100.0 * report.laplace_succession(bit)
            );
        }
    }

    Ok(())
}

fn handle_solve(matches: &ArgMatches) -> Result<()> {
    let stream = parse_stream(matches)?;
    let degree = parse_degree(matches)?;

    let solution = Gf2Solver::solve(&stream, degree)?;
    println!("Degree: {}", solution.degree());
    println!("Tap positions: {:?}", solution.tap_positions());
    println!(
        "Feedback polynomial: {}",
        solution.config().feedback_polynomial()
    );
    Ok(())
}

fn handle_search(matches: &ArgMatches) -> Result<()> {
    let stream = parse_stream(matches)?;

    let outcome = DegreeSearch::search(&stream)?;
    for (degree, solution) in outcome.solutions() {
        match solution {
            Some(solution) => {
                println!(
                    "For degree {} found: tap_positions = {:?}",
                    degree,
                    solution.tap_positions()
                );
            }
            None => println!("For degree {} found: no solution", degree),
        }
    }

    if !outcome.has_hits() {
        eprintln!("\nNo consistent configuration at any degree.");
        std::process::exit(1);
    }
    Ok(())
}

fn handle_validate(matches: &ArgMatches) -> Result<()> {
    let stream = parse_stream(matches)?;
    let degree = parse_degree(matches)?;
    let taps = parse_taps(matches)?;

    let config = RegisterConfig::new(degree, &taps).context("invalid register configuration")?;
    let result = Validator::validate(&stream, &config)?;
    println!(
        "For degree {}, Hamming distance is {} with accuracy {:.2} %",
        degree,
        result.hamming_distance,
        100.0 * result.accuracy
    );
    Ok(())
}

fn handle_recover(matches: &ArgMatches) -> Result<()> {
    let stream = parse_stream(matches)?;

    let results = IterValidator::validate(&stream)?;
    if results.is_empty() {
        eprintln!("No consistent configuration at any degree.");
        std::process::exit(1);
    }
    for (degree, result) in &results {
        println!(
            "For degree {}, Hamming distance is {} with accuracy {:.2} %",
            degree,
            result.hamming_distance,
            100.0 * result.accuracy
        );
    }
    Ok(())
}
