use std::io::{self, Write};

use serde::Serialize;

use guitarbuddy_core::config::{Config, OutputFormat};
use guitarbuddy_core::{compute_scale, Scale, ScaleType, ValidationError};
use guitarbuddy_types::pitch::to_unicode;
use guitarbuddy_types::resolve_intervals;

const USAGE: &str = "\
usage: guitarbuddy [ROOT] [SCALE] [--json|--text] [--unicode] [-v|--verbose]
       guitarbuddy --list
       guitarbuddy --intervals ROOT";

/// Exit status for rejected input, the CLI's counterpart of HTTP 400.
const EXIT_INVALID: i32 = 2;

fn init_logging(verbose: bool) {
    use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    if TermLogger::init(
        log_level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("guitarbuddy: logger already initialized");
    }

    log::debug!("guitarbuddy starting (log level: {:?})", log_level);
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Scale { root: Option<String>, scale: Option<String> },
    List,
    Intervals(String),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    command: Command,
    format: Option<OutputFormat>,
    unicode: bool,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut positional = Vec::new();
    let mut format = None;
    let mut unicode = false;
    let mut verbose = false;
    let mut list = false;
    let mut help = false;
    let mut intervals = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => format = Some(OutputFormat::Json),
            "--text" => format = Some(OutputFormat::Text),
            "--unicode" => unicode = true,
            "-v" | "--verbose" => verbose = true,
            "--list" => list = true,
            "-h" | "--help" => help = true,
            "--intervals" => {
                let root = iter.next().ok_or("--intervals needs a root")?;
                intervals = Some(root.clone());
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            value => positional.push(value.to_string()),
        }
    }

    if positional.len() > 2 {
        return Err(format!("unexpected argument {}", positional[2]));
    }

    let command = if help {
        Command::Help
    } else if list {
        Command::List
    } else if let Some(root) = intervals {
        Command::Intervals(root)
    } else {
        let mut positional = positional.into_iter();
        Command::Scale {
            root: positional.next(),
            scale: positional.next(),
        }
    };

    Ok(Invocation { command, format, unicode, verbose })
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

fn to_json<T: Serialize>(value: &T) -> io::Result<String> {
    serde_json::to_string(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn render_scale(scale: &Scale, format: OutputFormat, unicode: bool) -> io::Result<String> {
    match format {
        OutputFormat::Json => to_json(scale),
        OutputFormat::Text if unicode => {
            let notes: Vec<String> = scale.notes.iter().map(|n| to_unicode(n)).collect();
            Ok(format!("{} {}: {}", to_unicode(&scale.root), scale.name, notes.join(" ")))
        }
        OutputFormat::Text => Ok(scale.to_string()),
    }
}

fn render_error(err: &ValidationError, format: OutputFormat) -> io::Result<String> {
    match format {
        OutputFormat::Json => to_json(&ErrorBody {
            error: err.kind(),
            message: err.to_string(),
        }),
        OutputFormat::Text => Ok(format!("error: {}", err)),
    }
}

fn render_list() -> String {
    ScaleType::ALL
        .iter()
        .map(|t| format!("{:<18}{:<18}{}", t.id(), t.name(), t.formula_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_intervals(root: &str, unicode: bool) -> Result<String, ValidationError> {
    let spelling = guitarbuddy_core::normalize_root(root)
        .ok_or_else(|| ValidationError::UnrecognizedRoot(root.trim().to_string()))?;
    let map = resolve_intervals(&spelling)
        .ok_or_else(|| ValidationError::UnrecognizedRoot(spelling.clone()))?;
    let lines: Vec<String> = map
        .iter()
        .map(|(interval, note)| {
            let note = if unicode { to_unicode(note) } else { note.to_string() };
            let marker = if map.is_gap(interval) { "  (fallback)" } else { "" };
            format!("{:<5}{}{}", interval.label(), note, marker)
        })
        .collect();
    Ok(lines.join("\n"))
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(msg) => {
            eprintln!("guitarbuddy: {}\n{}", msg, USAGE);
            std::process::exit(EXIT_INVALID);
        }
    };
    init_logging(invocation.verbose);

    let config = Config::load();
    let format = invocation.format.unwrap_or_else(|| config.output_format());
    let unicode = invocation.unicode || config.unicode_accidentals();

    let mut stdout = io::stdout().lock();
    match invocation.command {
        Command::Help => writeln!(stdout, "{}", USAGE)?,
        Command::List => writeln!(stdout, "{}", render_list())?,
        Command::Intervals(root) => match render_intervals(&root, unicode) {
            Ok(table) => writeln!(stdout, "{}", table)?,
            Err(e) => {
                eprintln!("{}", render_error(&e, OutputFormat::Text)?);
                std::process::exit(EXIT_INVALID);
            }
        },
        Command::Scale { root, scale } => {
            let root = root.unwrap_or_else(|| config.default_root());
            let scale = scale.unwrap_or_else(|| config.default_scale().id().to_string());
            match compute_scale(&root, &scale) {
                Ok(result) => writeln!(stdout, "{}", render_scale(&result, format, unicode)?)?,
                Err(e) => {
                    log::debug!("rejected {:?} {:?}: {}", root, scale, e);
                    match format {
                        OutputFormat::Json => writeln!(stdout, "{}", render_error(&e, format)?)?,
                        OutputFormat::Text => eprintln!("{}", render_error(&e, format)?),
                    }
                    stdout.flush()?;
                    std::process::exit(EXIT_INVALID);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_root_and_scale() {
        let inv = parse_args(&args(&["G", "major", "--json"])).unwrap();
        assert_eq!(
            inv.command,
            Command::Scale { root: Some("G".into()), scale: Some("major".into()) }
        );
        assert_eq!(inv.format, Some(OutputFormat::Json));
        assert!(!inv.verbose);
    }

    #[test]
    fn parse_defaults_when_missing() {
        let inv = parse_args(&args(&["-v"])).unwrap();
        assert_eq!(inv.command, Command::Scale { root: None, scale: None });
        assert!(inv.verbose);
        assert_eq!(inv.format, None);
    }

    #[test]
    fn parse_intervals_and_list() {
        let inv = parse_args(&args(&["--intervals", "Eb", "--unicode"])).unwrap();
        assert_eq!(inv.command, Command::Intervals("Eb".into()));
        assert!(inv.unicode);
        assert_eq!(parse_args(&args(&["--list"])).unwrap().command, Command::List);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(parse_args(&args(&["--intervals"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["C", "major", "extra"])).is_err());
    }

    #[test]
    fn renders_text_and_json() {
        let scale = compute_scale("A", "major").unwrap();
        assert_eq!(
            render_scale(&scale, OutputFormat::Text, false).unwrap(),
            "A Major: A B C# D E F# G#"
        );
        assert_eq!(
            render_scale(&scale, OutputFormat::Text, true).unwrap(),
            "A Major: A B C♯ D E F♯ G♯"
        );
        assert_eq!(
            render_scale(&scale, OutputFormat::Json, false).unwrap(),
            r#"{"root":"A","name":"Major","notes":["A","B","C#","D","E","F#","G#"]}"#
        );
    }

    #[test]
    fn renders_errors() {
        let err = compute_scale("C", "lydian").unwrap_err();
        assert_eq!(
            render_error(&err, OutputFormat::Json).unwrap(),
            r#"{"error":"unsupported_scale_type","message":"Unsupported scale type 'lydian'."}"#
        );
        assert_eq!(
            render_error(&err, OutputFormat::Text).unwrap(),
            "error: Unsupported scale type 'lydian'."
        );
    }

    #[test]
    fn json_rendering_returns_result() {
        let scale = compute_scale("Bb", "minor").unwrap();
        let json = render_scale(&scale, OutputFormat::Json, true).unwrap();
        let parsed: Scale = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scale);
        let err = compute_scale("Fbb", "major").unwrap_err();
        let body: serde_json::Value =
            serde_json::from_str(&render_error(&err, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(body["error"], "unrecognized_root");
    }

    #[test]
    fn list_has_every_scale_type() {
        let list = render_list();
        assert_eq!(list.lines().count(), ScaleType::ALL.len());
        assert!(list.contains("1,b3,4,5,b7"));
    }

    #[test]
    fn interval_table_for_root() {
        let table = render_intervals("c", false).unwrap();
        assert!(table.lines().any(|l| l == "b3   Eb"));
        assert!(table.lines().any(|l| l == "#4   F#"));
        assert!(render_intervals("H", false).is_err());
    }

    #[test]
    fn interval_table_marks_fallbacks() {
        let table = render_intervals("B#", false).unwrap();
        assert!(table.lines().any(|l| l == "#9   D#  (fallback)"));
        assert!(table.lines().any(|l| l == "b3   D#"));
        assert!(render_intervals("Dbb", false).is_err());
    }
}
