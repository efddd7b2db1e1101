use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::grammar::{Grammar, Probability, UnaryRule};

/// A grammar symbol paired with the best derivation probability seen for it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSymbol {
  pub symbol: String,
  pub prob: Probability,
}

impl WeightedSymbol {
  pub fn new(symbol: impl Into<String>, prob: Probability) -> Self {
    Self {
      symbol: symbol.into(),
      prob,
    }
  }
}

/// A tagged input token, one per line as `word SP tag`. Only the tag drives
/// chart computation; the word is kept for bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub word: String,
  pub tag: String,
}

#[derive(Debug, Error)]
#[error("malformed token line (expected `word tag`): {0:?}")]
pub struct MalformedToken(pub String);

impl FromStr for Token {
  type Err = MalformedToken;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (word, tag) = s.split_once(' ').ok_or_else(|| MalformedToken(s.to_string()))?;
    Ok(Self {
      word: word.to_string(),
      tag: tag.to_string(),
    })
  }
}

pub type Cell = Vec<WeightedSymbol>;

/// Triangular CYK chart. Cell `(start, length)` holds the symbols derivable
/// over `length` tokens beginning at `start`, at most one entry per symbol
/// name (the highest probability seen wins).
#[derive(Debug)]
pub struct Chart {
  // cells[start][length - 1]; row `start` has n - start cells
  cells: Vec<Vec<Cell>>,
}

impl Chart {
  pub fn new(n: usize) -> Self {
    Self {
      cells: (0..n).map(|start| vec![Vec::new(); n - start]).collect(),
    }
  }

  /// Number of tokens the chart spans.
  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn cell(&self, start: usize, length: usize) -> &Cell {
    assert!(length >= 1, "spans have length >= 1");
    &self.cells[start][length - 1]
  }

  pub fn symbol(&self, start: usize, length: usize, symbol: &str) -> Option<&WeightedSymbol> {
    self.cell(start, length).iter().find(|ws| ws.symbol == symbol)
  }

  pub fn contains(&self, start: usize, length: usize, symbol: &str) -> bool {
    self.symbol(start, length, symbol).is_some()
  }

  /// Merge `ws` into the cell, keeping the higher probability if its symbol
  /// is already present.
  pub fn update(&mut self, start: usize, length: usize, ws: WeightedSymbol) {
    assert!(length >= 1, "spans have length >= 1");
    let cell = &mut self.cells[start][length - 1];
    match cell.iter_mut().find(|have| have.symbol == ws.symbol) {
      None => cell.push(ws),
      Some(have) if have.prob < ws.prob => *have = ws,
      Some(_) => {}
    }
  }
}

/// One line per retained entry, `(start,end) TAB symbol TAB probability`
/// with a zero-based inclusive span, grouped by increasing length then
/// increasing start.
impl fmt::Display for Chart {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for length in 1..=self.len() {
      for start in 0..=(self.len() - length) {
        for ws in self.cell(start, length) {
          writeln!(f, "({},{})\t{}\t{}", start, start + length - 1, ws.symbol, ws.prob)?;
        }
      }
    }
    Ok(())
  }
}

/// Every symbol transitively derivable from `seed` by unary rewriting, each
/// with the probability multiplied through its chain of rules.
///
/// Breadth-first over the rule list; a symbol already reached, or already
/// waiting in the queue, is never re-expanded, so cyclic unary rule sets
/// terminate. When several unary paths reach the same symbol, the one this
/// traversal order discovers first keeps its probability, which is not
/// necessarily the best path. Cell merging keeps the max across calls, but
/// within one call this order-dependence is retained deliberately.
pub fn reachable_unary_symbols(
  seed: &WeightedSymbol,
  unary_rules: &[UnaryRule],
) -> Vec<WeightedSymbol> {
  let mut reachable: Vec<WeightedSymbol> = Vec::new();
  let mut queue: VecDeque<WeightedSymbol> = VecDeque::new();
  queue.push_back(seed.clone());

  while let Some(front) = queue.front().cloned() {
    for rule in unary_rules {
      if rule.rhs == front.symbol
        && !reachable.iter().any(|ws| ws.symbol == rule.lhs)
        && !queue.iter().any(|ws| ws.symbol == rule.lhs)
      {
        let ws = WeightedSymbol::new(rule.lhs.clone(), rule.prob * front.prob);
        reachable.push(ws.clone());
        queue.push_back(ws);
      }
    }
    queue.pop_front();
  }

  reachable
}

/// Fill a CYK chart over `tokens` with `grammar`'s rules.
///
/// Span-1 cells are seeded with each token's tag at probability 1.0 plus its
/// unary closure. Longer spans combine binary rules over every split point,
/// strictly by increasing span length, closing over unary rules after every
/// successful combination.
pub fn parse_chart(grammar: &Grammar, tokens: &[Token]) -> Chart {
  let mut chart = Chart::new(tokens.len());

  for (start, token) in tokens.iter().enumerate() {
    let seed = WeightedSymbol::new(token.tag.clone(), 1.0);
    chart.update(start, 1, seed.clone());
    for ws in reachable_unary_symbols(&seed, &grammar.unary_rules) {
      chart.update(start, 1, ws);
    }
  }
  debug!(tokens = tokens.len(), "initialized chart");

  for length in 2..=tokens.len() {
    for start in 0..=(tokens.len() - length) {
      for split in 1..length {
        for rule in grammar.binary_rules.iter() {
          let (Some(left), Some(right)) = (
            chart.symbol(start, split, &rule.rhs.0),
            chart.symbol(start + split, length - split, &rule.rhs.1),
          ) else {
            continue;
          };

          let prob = rule.prob * left.prob * right.prob;
          let ws = WeightedSymbol::new(rule.lhs.clone(), prob);
          let reached = reachable_unary_symbols(&ws, &grammar.unary_rules);

          chart.update(start, length, ws);
          for s in reached {
            chart.update(start, length, s);
          }
        }
      }
    }
    debug!(length, "filled spans");
  }

  chart
}
