//! AtomSpace - inference engine CLI

use atomspace::backend::*;
use atomspace::config::EngineConfig;
use atomspace::sexpr::*;
use atomspace::{repl, session};
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    eprintln!("AtomSpace v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    atomspace [OPTIONS] <INPUT>");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help            Print this help message");
    eprintln!("    -v, --version         Print version information");
    eprintln!("    -o, --output <FILE>   Write output to FILE (default: stdout)");
    eprintln!("    -c, --config <FILE>   Read settings from a TOML file");
    eprintln!("    --sexpr               Print parsed atoms instead of evaluating");
    eprintln!("    --repl                Start interactive REPL");
    eprintln!();
    eprintln!("ARGUMENTS:");
    eprintln!("    <INPUT>               Input file (use '-' for stdin)");
    eprintln!();
    eprintln!("INPUT FORMAT:");
    eprintln!("    (Human Socrates)                    added to the space");
    eprintln!("    !(Mortal $x)                        evaluated; prints [results]");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    atomspace facts.metta");
    eprintln!("    atomspace --repl -c atomspace.toml");
    eprintln!("    cat facts.metta | atomspace -");
}

fn print_version() {
    println!("AtomSpace {}", VERSION);
}

struct Options {
    input: Option<String>,
    output: Option<String>,
    config: Option<String>,
    show_sexpr: bool,
    repl_mode: bool,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut output = None;
    let mut config = None;
    let mut show_sexpr = false;
    let mut repl_mode = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing output file after -o".to_string());
                }
                output = Some(args[i].clone());
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing config file after -c".to_string());
                }
                config = Some(args[i].clone());
            }
            "--sexpr" => {
                show_sexpr = true;
            }
            "--repl" => {
                repl_mode = true;
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if input.is_some() {
                    return Err("Multiple input files specified".to_string());
                }
                input = Some(arg.to_string());
            }
        }
        i += 1;
    }

    Ok(Options {
        input,
        output,
        config,
        show_sexpr,
        repl_mode,
    })
}

/// `RUST_LOG` wins over the configured filter
fn init_logging(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &str) -> Result<String, String> {
    if input == "-" {
        // Read from stdin
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        // Read from file
        let path = Path::new(input);
        if !path.exists() {
            return Err(format!("Input file not found: {}", input));
        }
        fs::read_to_string(path).map_err(|e| format!("Failed to read file '{}': {}", input, e))
    }
}

fn write_output(output: Option<&str>, content: &str) -> Result<(), String> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .map_err(|e| format!("Failed to create output file '{}': {}", path, e))?;
            file.write_all(content.as_bytes())
                .map_err(|e| format!("Failed to write to output file '{}': {}", path, e))?;
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

fn eval_program(
    input: &str,
    interpreter: &Interpreter,
    config: &EngineConfig,
    options: &Options,
) -> Result<String, String> {
    if options.show_sexpr {
        let atoms = parse_multiple(input).map_err(|e| format!("Parse error: {}", e))?;
        let mut output = String::new();
        for atom in atoms {
            output.push_str(&format!("{}\n", to_sexpr(&atom)));
        }
        return Ok(output);
    }

    let lines = session::run_text(interpreter, input, &config.engine)
        .map_err(|e| format!("Parse error: {}", e))?;
    let mut output = String::new();
    for line in lines {
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}

fn main() {
    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let config = match &options.config {
        Some(path) => match EngineConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    init_logging(&config);

    let interpreter = Interpreter::new(Arc::new(AtomSpace::new()));
    if let Err(e) = session::load_prelude(&interpreter, &config.engine) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // REPL mode
    if options.repl_mode {
        if let Err(e) = repl::run(&interpreter, &config) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    // No input file and not REPL mode - show usage
    let Some(input) = options.input.as_deref() else {
        eprintln!("Error: Missing input file");
        eprintln!();
        print_usage();
        process::exit(1);
    };

    // File evaluation mode
    let input_content = match read_input(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let output = match eval_program(&input_content, &interpreter, &config, &options) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_output(options.output.as_deref(), &output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
