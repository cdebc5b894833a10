use std::{env, fs::read_to_string, path::Path, process::ExitCode, time::Instant};

use descent::{
    ast::printer::{dump, unparse},
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
};
use tracing::{error, info, Level};

const USAGE: &str = "usage: descent <file> [--tokens] [--unparse] [--verbose]";

#[derive(Debug, Default)]
struct Options {
    file: String,
    tokens: bool,
    unparse: bool,
    verbose: bool,
}

impl Options {
    fn from_args(args: impl Iterator<Item = String>) -> Option<Options> {
        let mut options = Options::default();
        let mut file = None;

        for arg in args {
            match arg.as_str() {
                "--tokens" => options.tokens = true,
                "--unparse" => options.unparse = true,
                "--verbose" => options.verbose = true,
                flag if flag.starts_with("--") => return None,
                _ if file.is_some() => return None,
                _ => file = Some(arg),
            }
        }

        options.file = file?;
        Some(options)
    }
}

fn main() -> ExitCode {
    let Some(options) = Options::from_args(env::args().skip(1)) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if options.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let file_name = Path::new(&options.file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| options.file.clone());

    let source = match read_to_string(&options.file) {
        Ok(source) => source,
        Err(err) => {
            error!(file = %options.file, "failed to read file: {}", err);
            return ExitCode::from(2);
        }
    };

    let start = Instant::now();
    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            display_error(&err, &source, &file_name);
            return ExitCode::from(1);
        }
    };
    info!(tokens = tokens.len(), "tokenized in {:?}", start.elapsed());

    if options.tokens {
        for token in &tokens {
            println!("{} {:?} @ {}", token.kind, token.text, token.location);
        }
        return ExitCode::SUCCESS;
    }

    let parse_start = Instant::now();
    let ast = match parse(tokens) {
        Ok(ast) => ast,
        Err(err) => {
            display_error(&err, &source, &file_name);
            return ExitCode::from(1);
        }
    };
    info!(nodes = ast.len(), "parsed in {:?}", parse_start.elapsed());

    if options.unparse {
        println!("{}", unparse(&ast));
    } else {
        print!("{}", dump(&ast));
    }

    ExitCode::SUCCESS
}
