use std::env;
use std::io::{self, BufRead};
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use treegrain::chart::Token;
use treegrain::grammar::Grammar;
use treegrain::Err;

fn usage(prog_name: &str) -> String {
  format!(
    r"Usage: {} GRAMMAR

Reads tagged tokens (`word tag`, one per line) from stdin and prints, for
every chart span, the derivable symbols with their best probabilities.

Options:
  -h, --help    Print this message",
    prog_name
  )
}

struct Args {
  filename: String,
}

impl Args {
  fn make_error_message(msg: &str, prog_name: impl AsRef<str>) -> String {
    format!("argument error: {}.\n\n{}", msg, usage(prog_name.as_ref()))
  }

  fn parse(v: Vec<String>) -> Result<Self, String> {
    if v.is_empty() {
      return Err(Self::make_error_message("bad argument vector", "parse"));
    }

    let mut iter = v.into_iter();
    let prog_name = iter.next().unwrap();

    let mut filename: Option<String> = None;
    for o in iter {
      if o == "-h" || o == "--help" {
        println!("{}", usage(&prog_name));
        process::exit(0);
      } else if filename.is_none() {
        filename = Some(o);
      } else {
        return Err(Self::make_error_message("invalid arguments", prog_name));
      }
    }

    if let Some(filename) = filename {
      Ok(Self { filename })
    } else {
      Err(Self::make_error_message("missing grammar file", prog_name))
    }
  }
}

fn main() -> Result<(), Err> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let opts = match Args::parse(env::args().collect()) {
    Ok(opts) => opts,
    Err(msg) => {
      eprintln!("{}", msg);
      process::exit(255);
    }
  };

  let grammar = Grammar::read_from_file(&opts.filename)?;
  info!("read {} rules from {}", grammar.len(), opts.filename);

  let mut tokens: Vec<Token> = Vec::new();
  for line in io::stdin().lock().lines() {
    let line = line?;
    if line.is_empty() {
      continue;
    }
    tokens.push(line.parse()?);
  }
  info!("read {} tokens", tokens.len());

  let chart = grammar.parse_chart(&tokens);
  print!("{}", chart);

  Ok(())
}
