use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use treegrain::binarize::binarize;
use treegrain::induce::RuleCounts;
use treegrain::normalize::simplify;
use treegrain::read::{ReadError, TreeReader};
use treegrain::Err;

fn usage(prog_name: &str) -> String {
  format!(
    r"Usage: {} [FILE] [options]

Reads bracketed trees from FILE (or stdin), normalizes and binarizes them,
and prints the counted grammar rules with maximum-likelihood probabilities.

Options:
  -h, --help         Print this message
  -p, --print-trees  Echo each binarized tree to stderr",
    prog_name
  )
}

struct Args {
  filename: Option<String>,
  print_trees: bool,
}

impl Args {
  fn make_error_message(msg: &str, prog_name: impl AsRef<str>) -> String {
    format!("argument error: {}.\n\n{}", msg, usage(prog_name.as_ref()))
  }

  fn parse(v: Vec<String>) -> Result<Self, String> {
    if v.is_empty() {
      return Err(Self::make_error_message("bad argument vector", "induce"));
    }

    let mut iter = v.into_iter();
    let prog_name = iter.next().unwrap();

    let mut filename: Option<String> = None;
    let mut print_trees = false;

    for o in iter {
      if o == "-h" || o == "--help" {
        println!("{}", usage(&prog_name));
        process::exit(0);
      } else if o == "-p" || o == "--print-trees" {
        print_trees = true;
      } else if filename.is_none() {
        filename = Some(o);
      } else {
        return Err(Self::make_error_message("invalid arguments", prog_name));
      }
    }

    Ok(Self {
      filename,
      print_trees,
    })
  }
}

/// Drain the tree stream, counting rules. A malformed tree halts the loop
/// with a diagnostic; trees read before it still count.
fn induce(input: impl BufRead, print_trees: bool) -> RuleCounts {
  let mut counts = RuleCounts::new();
  let mut trees_read = 0;

  let mut reader = TreeReader::new(input);
  loop {
    let mut tree = match reader.read_tree() {
      Ok(tree) => tree,
      Err(ReadError::EndOfInput) => break,
      Err(err) => {
        eprintln!("{}", err);
        break;
      }
    };
    trees_read += 1;

    simplify(&mut tree);
    let tree = binarize(&tree);
    if print_trees {
      eprintln!("{}", tree);
    }
    counts.count_tree(&tree);
  }

  info!("{} trees read", trees_read);
  counts
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

  let counts = match opts.filename {
    Some(filename) => induce(BufReader::new(File::open(filename)?), opts.print_trees),
    None => induce(io::stdin().lock(), opts.print_trees),
  };

  print!("{}", counts);
  Ok(())
}
