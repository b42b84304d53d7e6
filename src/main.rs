use std::fmt;
use std::fs;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use color_eyre::eyre::{eyre, Result};

use bzregex::highlight::{merge_intervals, render};
use bzregex::{compile, fullmatch, search};

/// Match or search text against a Brzozowski-derivative regular expression.
#[derive(ClapParser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The pattern to compile.
    pattern: String,

    /// Literal text to match, or omitted if `--file` is given.
    text: Option<String>,

    /// Read the text to search from a file instead of the command line.
    #[arg(short, long)]
    file: Option<String>,

    /// Report every non-overlapping match instead of only the first.
    #[arg(long)]
    all: bool,

    /// Use shortest-prefix (lazy) matching instead of the greedy default.
    #[arg(long = "no-greedy")]
    no_greedy: bool,
}

/// The CLI's own error taxonomy, distinct from `bzregex::Error`: it carries
/// the process exit code the contract in §6 assigns to each failure kind
/// (1 for a bad pattern, 2 for everything else) alongside a message,
/// rendered through `color_eyre` at the top level.
#[derive(Debug)]
struct CliFailure {
    code: u8,
    message: String,
}

impl fmt::Display for CliFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliFailure {}

fn parse_failure(e: bzregex::Error) -> color_eyre::Report {
    eyre!(CliFailure { code: 1, message: e.to_string() })
}

fn usage_failure(message: impl Into<String>) -> color_eyre::Report {
    eyre!(CliFailure { code: 2, message: message.into() })
}

fn io_failure(path: &str, e: std::io::Error) -> color_eyre::Report {
    eyre!(CliFailure { code: 2, message: format!("reading {path}: {e}") })
}

/// Runs the CLI and reports whether at least one match was found. A file
/// path in `--file` is searched with `search(..., all)` and rendered with
/// matched regions highlighted; a literal `text` argument runs `fullmatch`
/// and prints the resulting capture groups.
fn run(args: Args) -> Result<bool> {
    let pattern = compile(args.pattern.as_str()).map_err(parse_failure)?;
    let greedy = !args.no_greedy;

    if let Some(path) = &args.file {
        if args.text.is_some() {
            return Err(usage_failure("provide TEXT or --file, not both"));
        }
        let contents = fs::read_to_string(path).map_err(|e| io_failure(path, e))?;
        let matches = search(&pattern, &contents, greedy, args.all);
        log::debug!("file search over {path}: {} match(es)", matches.len());
        let spans: Vec<(usize, usize)> =
            matches.iter().flat_map(|m| m.groups.values().flatten().copied()).collect();
        let merged = merge_intervals(spans);
        print!("{}", render(&contents, &merged));
        Ok(!matches.is_empty())
    } else {
        let text = args.text.ok_or_else(|| usage_failure("provide either TEXT or --file"))?;
        match fullmatch(&pattern, &text) {
            Some(m) => {
                println!("match {}..{}: {:?}", m.start, m.end, text);
                let mut gids: Vec<_> = m.groups.keys().copied().collect();
                gids.sort_unstable();
                for gid in gids {
                    if gid == 0 {
                        continue;
                    }
                    for &(s, e) in &m.groups[&gid] {
                        println!("  group {gid}: {}..{}: {:?}", s, e, &text[s..e]);
                    }
                }
                Ok(true)
            }
            None => {
                println!("no match");
                Ok(false)
            }
        }
    }
}

fn main() -> ExitCode {
    color_eyre::install().expect("failed to install color_eyre panic/error hooks");
    env_logger::init();

    match run(Args::parse()) {
        Ok(_) => ExitCode::from(0),
        Err(report) => {
            let code = report.downcast_ref::<CliFailure>().map(|f| f.code).unwrap_or(2);
            eprintln!("{report:?}");
            ExitCode::from(code)
        }
    }
}
