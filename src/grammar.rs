use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

pub type Probability = f64;

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryRule {
  pub lhs: String,
  pub rhs: (String, String),
  pub prob: Probability,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryRule {
  pub lhs: String,
  pub rhs: String,
  pub prob: Probability,
}

#[derive(Debug, Error)]
pub enum GrammarError {
  #[error("malformed grammar line {line}: {reason}")]
  MalformedLine { line: usize, reason: &'static str },
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// A loaded PCFG: binary and unary rewrite rules with probabilities.
///
/// The textual format is one rule per line, `LHS RHS1 [RHS2] TAB prob`; a
/// second RHS symbol before the tab makes the rule binary. Probabilities are
/// estimated per LHS and are not globally normalized across rule types.
#[derive(Debug, Default)]
pub struct Grammar {
  pub binary_rules: Vec<BinaryRule>,
  pub unary_rules: Vec<UnaryRule>,
}

impl Grammar {
  pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
    fs::read_to_string(path)?.parse()
  }

  pub fn len(&self) -> usize {
    self.binary_rules.len() + self.unary_rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn parse_line(&mut self, line: &str, lineno: usize) -> Result<(), GrammarError> {
    let malformed = |reason| GrammarError::MalformedLine { line: lineno, reason };

    let (rule, prob) = line
      .split_once('\t')
      .ok_or_else(|| malformed("missing tab before probability"))?;
    let prob: Probability = prob
      .trim()
      .parse()
      .map_err(|_| malformed("probability is not a number"))?;

    let mut symbols = rule.split_whitespace();
    let lhs = symbols.next().ok_or_else(|| malformed("missing left-hand side"))?;
    let rhs1 = symbols.next().ok_or_else(|| malformed("missing right-hand side"))?;

    match (symbols.next(), symbols.next()) {
      (None, _) => self.unary_rules.push(UnaryRule {
        lhs: lhs.to_string(),
        rhs: rhs1.to_string(),
        prob,
      }),
      (Some(rhs2), None) => self.binary_rules.push(BinaryRule {
        lhs: lhs.to_string(),
        rhs: (rhs1.to_string(), rhs2.to_string()),
        prob,
      }),
      (Some(_), Some(_)) => return Err(malformed("more than two right-hand symbols")),
    }

    Ok(())
  }
}

impl FromStr for Grammar {
  type Err = GrammarError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut grammar = Self::default();
    for (idx, line) in s.lines().enumerate() {
      if line.trim().is_empty() {
        continue;
      }
      grammar.parse_line(line, idx + 1)?;
    }
    Ok(grammar)
  }
}

impl fmt::Display for Grammar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for rule in self.binary_rules.iter() {
      writeln!(f, "{} {} {}\t{}", rule.lhs, rule.rhs.0, rule.rhs.1, rule.prob)?;
    }
    for rule in self.unary_rules.iter() {
      writeln!(f, "{} {}\t{}", rule.lhs, rule.rhs, rule.prob)?;
    }
    Ok(())
  }
}
