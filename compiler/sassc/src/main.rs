//! `sassc`: a thin CLI over [`sass_compiler`].
//!
//! Hand-rolled argument parsing, matching the host's own manual
//! `match args[1].as_str()` dispatch rather than pulling in `clap`.

use std::path::{Path, PathBuf};

use sass_compiler::{CompileOptions, Context};
use sass_diagnostic::SassError;
use sass_emit::OutputStyle;

fn main() {
    sass_compiler::tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "compile" => {
            if args.len() < 3 {
                eprintln!("Usage: sassc compile <file.scss> [-o out.css] [--style nested|expanded|compact|compressed] [--source-map]");
                std::process::exit(1);
            }
            compile_command(&args[2..]);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: sassc check <file.scss>");
                std::process::exit(1);
            }
            check_command(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" => println!("sassc {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

struct CompileArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    style: OutputStyle,
    source_map: bool,
}

fn parse_compile_args(args: &[String]) -> Result<CompileArgs, String> {
    let mut input = None;
    let mut output = None;
    let mut style = OutputStyle::Nested;
    let mut source_map = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                let value = args.get(i).ok_or("-o requires a value")?;
                output = Some(PathBuf::from(value));
            }
            "--style" => {
                i += 1;
                let value = args.get(i).ok_or("--style requires a value")?;
                style = parse_style(value)?;
            }
            "--source-map" => source_map = true,
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other => return Err(format!("unexpected argument: {other}")),
        }
        i += 1;
    }

    let input = input.ok_or("missing input file")?;
    Ok(CompileArgs { input, output, style, source_map })
}

fn parse_style(value: &str) -> Result<OutputStyle, String> {
    match value {
        "nested" => Ok(OutputStyle::Nested),
        "expanded" => Ok(OutputStyle::Expanded),
        "compact" => Ok(OutputStyle::Compact),
        "compressed" => Ok(OutputStyle::Compressed),
        other => Err(format!("unknown output style: {other}")),
    }
}

fn compile_command(args: &[String]) {
    let parsed = match parse_compile_args(args) {
        Ok(p) => p,
        Err(message) => {
            eprintln!("sassc: {message}");
            std::process::exit(1);
        }
    };

    let mut options = CompileOptions::new().with_output_style(parsed.style);
    if parsed.source_map {
        let map_path = parsed
            .output
            .as_ref()
            .map(|p| p.with_extension("css.map"))
            .unwrap_or_else(|| PathBuf::from("stdout.css.map"));
        options.source_map_file = Some(map_path);
    }

    let working_dir = current_dir();
    let mut ctx = Context::new(options, working_dir);

    match sass_compiler::compile_file(&mut ctx, &parsed.input) {
        Ok(result) => write_result(&parsed, &result),
        Err(err) => report_error(&err, &parsed.input),
    }
}

fn write_result(parsed: &CompileArgs, result: &sass_compiler::CompileResult) {
    match &parsed.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &result.css) {
                eprintln!("sassc: could not write {}: {e}", path.display());
                std::process::exit(1);
            }
        }
        None => print!("{}", result.css),
    }

    if let Some(map) = &result.source_map {
        if let Some(output) = &parsed.output {
            let map_path = output.with_extension("css.map");
            if let Err(e) = std::fs::write(&map_path, map) {
                eprintln!("sassc: could not write {}: {e}", map_path.display());
                std::process::exit(1);
            }
        } else {
            eprintln!("{map}");
        }
    }
}

fn check_command(input: &str) {
    let options = CompileOptions::new();
    let working_dir = current_dir();
    let mut ctx = Context::new(options, working_dir);

    match sass_compiler::compile_file(&mut ctx, Path::new(input)) {
        Ok(_) => println!("{input}: OK"),
        Err(err) => report_error(&err, Path::new(input)),
    }
}

fn report_error(err: &SassError, input: &Path) {
    eprintln!("sassc: error compiling {}: {err}", input.display());
    for (depth, span) in err.trace.iter().enumerate() {
        eprintln!("  [{depth}] via {span:?}");
    }
    std::process::exit(1);
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn print_usage() {
    println!("sassc (Sass to CSS compiler)");
    println!();
    println!("Usage: sassc <command> [options]");
    println!();
    println!("Commands:");
    println!("  compile <file.scss>   Compile a Sass/SCSS file to CSS");
    println!("  check <file.scss>     Parse and resolve a file without printing CSS");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Compile options:");
    println!("  -o, --output <file>   Write CSS to <file> instead of stdout");
    println!("  --style <name>        nested (default), expanded, compact, compressed");
    println!("  --source-map          Emit a source map alongside the output");
    println!();
    println!("Examples:");
    println!("  sassc compile style.scss -o style.css");
    println!("  sassc compile style.scss --style compressed");
    println!("  sassc check style.scss");
}
