use chart_literal::telemetry::init_default_tracing;
use chart_literal::{
    LiteralError, LiteralResult, OptionValue, Parser, ParserConfig, Serializer, SerializerConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: js_literal_tool <parse|serialize> --input <path> [--output <path>] [--echo] [--compact] [--indent <n>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    /// Hand-written object literal in, serialized literal out.
    Parse,
    /// Plain JSON in (code leaves as sentinel strings), serialized literal out.
    Serialize,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    input: PathBuf,
    output: Option<PathBuf>,
    parser: ParserConfig,
    serializer: SerializerConfig,
}

fn main() {
    let tracing_ready = init_default_tracing();
    if let Err(err) = run(tracing_ready) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(tracing_ready: bool) -> Result<(), String> {
    let args = parse_args()?;
    let raw = read_input(&args.input).map_err(|err| err.to_string())?;

    let value = match args.command {
        CommandKind::Parse => {
            let parser = Parser::with_config(args.parser);
            // Without a subscriber the echo event goes nowhere.
            if args.parser.echo && !tracing_ready {
                eprintln!("{}", parser.reassemble(&raw));
            }
            parser.parse(&raw).map_err(|err| err.to_string())?
        }
        CommandKind::Serialize => {
            serde_json::from_str::<OptionValue>(&raw).map_err(|err| format!("invalid json: {err}"))?
        }
    };

    let text = Serializer::with_config(args.serializer)
        .and_then(|serializer| serializer.serialize(&value))
        .map_err(|err| err.to_string())?;

    match &args.output {
        Some(path) => write_output(path, &text).map_err(|err| err.to_string()),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> LiteralResult<String> {
    fs::read_to_string(path).map_err(|source| LiteralError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, text: &str) -> LiteralResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LiteralError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, format!("{text}\n")).map_err(|source| LiteralError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("parse") => CommandKind::Parse,
        Some("serialize") => CommandKind::Serialize,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut parser = ParserConfig::default();
    let mut serializer = SerializerConfig::default();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--indent" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --indent".to_owned())?;
                let indent = value
                    .parse::<usize>()
                    .map_err(|err| format!("invalid --indent `{value}`: {err}"))?;
                serializer = serializer.with_indent(indent);
            }
            "--compact" => serializer.indent = None,
            "--echo" => parser = parser.with_echo(true),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    let input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    Ok(CliArgs {
        command,
        input,
        output,
        parser,
        serializer,
    })
}
