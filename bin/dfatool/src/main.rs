use std::path::PathBuf;

use dfakit::{
    prelude::*,
    transition_system::dot::{render_dot_to_file, ImageFormat, RenderError},
};
use owo_colors::OwoColorize;

use tracing::{debug, error, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Dfa(#[from] DfaError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn file_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("file containing a DFA script")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_parser(clap::value_parser!(PathBuf))
        .help("write the resulting script to this file instead of stdout")
}

fn group_arg() -> Arg {
    Arg::new("group")
        .long("group")
        .action(ArgAction::SetTrue)
        .help("merge transitions between the same pair of states")
}

fn cli() -> clap::Command {
    Command::new("dfatool")
    .about("Inspect, run and transform deterministic finite automata")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("show")
        .about("prints the automaton together with some of its properties")
        .arg(file_arg("file"))
    )
    .subcommand(
        Command::new("run")
        .about("runs the given words and reports whether they are accepted")
        .arg(file_arg("file"))
        .arg(Arg::new("words").num_args(1..).required(true))
        .arg(
            Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help("print the configurations of each run")
        )
    )
    .subcommand(
        Command::new("complete")
        .about("adds a sink state that receives all missing transitions")
        .arg(file_arg("file"))
        .arg(output_arg())
    )
    .subcommand(
        Command::new("negate")
        .about("complements a complete automaton")
        .arg(file_arg("file"))
        .arg(output_arg())
    )
    .subcommand(
        Command::new("minimize")
        .about("computes the minimal automaton with Moore's algorithm")
        .arg(file_arg("file"))
        .arg(output_arg())
    )
    .subcommand(
        Command::new("product")
        .about("computes the product automaton, which accepts the intersection")
        .arg(file_arg("left"))
        .arg(file_arg("right"))
        .arg(output_arg())
    )
    .subcommand(
        Command::new("dot")
        .about("prints the DOT representation")
        .arg(file_arg("file"))
        .arg(group_arg())
        .arg(Arg::new("name").long("name").default_value("Graph01"))
    )
    .subcommand(
        Command::new("render")
        .about("renders the automaton into an image using graphviz")
        .arg(file_arg("file"))
        .arg(
            Arg::new("out")
            .required(true)
            .value_parser(clap::value_parser!(PathBuf))
        )
        .arg(
            Arg::new("format")
            .long("format")
            .value_parser(["png", "pdf", "svg"])
            .help("image format, guessed from the file extension if omitted")
        )
        .arg(group_arg())
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn load(matches: &ArgMatches, name: &str) -> Result<DFA, CliError> {
    let path = matches
        .get_one::<PathBuf>(name)
        .ok_or_else(|| std::io::Error::other(format!("missing argument {name}")))?;
    debug!("reading automaton from {}", path.display());
    Ok(DFA::load(path)?)
}

fn emit(matches: &ArgMatches, dfa: &DFA) -> Result<(), CliError> {
    match matches.get_one::<PathBuf>("output") {
        Some(path) => dfa.save(path)?,
        None => print!("{}", dfa.script()),
    }
    Ok(())
}

fn show(dfa: &DFA) {
    println!("{dfa}");
    let flag = |value: bool| {
        if value {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        }
    };
    println!("complete     : {}", flag(dfa.is_complete()));
    println!("accessible   : {}", flag(dfa.is_accessible()));
    println!("coaccessible : {}", flag(dfa.is_coaccessible()));
    println!("trim         : {}", flag(dfa.is_trim()));
}

fn run_words(matches: &ArgMatches, dfa: &DFA) -> Result<(), CliError> {
    let print_trace = matches.get_flag("trace");
    for word in matches.get_many::<String>("words").into_iter().flatten() {
        let run = dfa.run(word)?;
        if print_trace {
            for (state, suffix) in run.configurations() {
                println!("  ({state}, {suffix:?})");
            }
        }
        match run.outcome() {
            RunOutcome::Accepted => println!("{word:?} {}", "accepted".green()),
            RunOutcome::Rejected => println!("{word:?} {}", "rejected".red()),
            RunOutcome::UnknownSymbol { position, symbol } => println!(
                "{word:?} {} ('{symbol}' at position {position} is not in the alphabet)",
                "rejected".red()
            ),
            RunOutcome::MissingTransition {
                position,
                state,
                symbol,
            } => println!(
                "{word:?} {} (no transition from {} on '{symbol}' at position {position})",
                "rejected".red(),
                dfa.state_name(state).unwrap_or_default()
            ),
        }
    }
    Ok(())
}

fn dot_options(matches: &ArgMatches) -> DotOptions {
    let options = match matches.try_get_one::<String>("name").ok().flatten() {
        Some(name) => DotOptions::named(name.as_str()),
        None => DotOptions::default(),
    };
    options.grouped(matches.get_flag("group"))
}

fn render(matches: &ArgMatches, dfa: &DFA) -> Result<(), CliError> {
    let out = matches
        .get_one::<PathBuf>("out")
        .ok_or_else(|| std::io::Error::other("missing output file"))?;
    let format = match matches.get_one::<String>("format") {
        Some(format) => format.parse::<ImageFormat>()?,
        None => ImageFormat::from_path(out).unwrap_or_default(),
    };
    debug!("rendering as {format} into {}", out.display());
    render_dot_to_file(&dfa.dot_with_options(&dot_options(matches)), out, format)?;
    Ok(())
}

fn execute(matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some(("show", sub)) => show(&load(sub, "file")?),
        Some(("run", sub)) => run_words(sub, &load(sub, "file")?)?,
        Some(("complete", sub)) => emit(sub, &load(sub, "file")?.complete())?,
        Some(("negate", sub)) => emit(sub, &load(sub, "file")?.negate()?)?,
        Some(("minimize", sub)) => emit(sub, &load(sub, "file")?.minimize()?)?,
        Some(("product", sub)) => {
            let left = load(sub, "left")?;
            let right = load(sub, "right")?;
            emit(sub, &left.product(&right)?)?
        }
        Some(("dot", sub)) => print!("{}", load(sub, "file")?.dot_with_options(&dot_options(sub))),
        Some(("render", sub)) => render(sub, &load(sub, "file")?)?,
        _ => unreachable!(),
    }
    Ok(())
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    if let Err(e) = execute(&matches) {
        error!("{e}");
        eprintln!("{} {e}", "error:".red());
        std::process::exit(1);
    }
}
