use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser as _, ValueEnum};
use css_parser::SyntaxError;
use css_tokenizer::Tokenizer;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(name = "css_dump")]
#[command(about = "Tokenizes or parses a CSS file and dumps the result")]
struct Args {
    /// What to read the file as
    #[arg(long, value_enum, default_value_t = Mode::Stylesheet)]
    mode: Mode,

    /// Path to the CSS file
    path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Tokens,
    Stylesheet,
    Rules,
    Declarations,
    Values,
    CommaValues,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CSS_SYNTAX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let css = match std::fs::read_to_string(&args.path) {
        Ok(css) => css,
        Err(error) => {
            eprintln!("Could not read '{}': {}", args.path.display(), error);
            std::process::exit(1);
        }
    };

    eprintln!("Started parsing '{}'", args.path.display());
    let before = Instant::now();
    let result = dump(args.mode, &css);
    eprintln!("Finished parsing! Took {:?}!", before.elapsed());

    if let Err(error) = result {
        eprintln!("Syntax error: {}", error);
        std::process::exit(1);
    }
}

fn dump(mode: Mode, css: &str) -> Result<(), SyntaxError> {
    match mode {
        Mode::Tokens => {
            for token in Tokenizer::new(css) {
                println!("{:<40} {}", format!("{:?}", token), token);
            }
        }
        Mode::Stylesheet => println!("{:#?}", css_parser::parse_stylesheet(css)?),
        Mode::Rules => println!("{:#?}", css_parser::parse_list_of_rules(css)?),
        Mode::Declarations => println!("{:#?}", css_parser::parse_list_of_declarations(css)?),
        Mode::Values => println!("{:#?}", css_parser::parse_list_of_component_values(css)?),
        Mode::CommaValues => println!(
            "{:#?}",
            css_parser::parse_comma_separated_list_of_component_values(css)?
        ),
    }
    tracing::debug!(?mode, "dump finished");
    Ok(())
}
