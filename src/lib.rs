#[macro_use]
extern crate lazy_static;

pub mod binarize;
pub mod chart;
pub mod grammar;
pub mod induce;
pub mod normalize;
pub mod read;
pub mod tree;

pub use crate::binarize::binarize;
pub use crate::chart::{parse_chart, Chart, Token, WeightedSymbol};
pub use crate::grammar::{BinaryRule, Grammar, Probability, UnaryRule};
pub use crate::induce::RuleCounts;
pub use crate::normalize::simplify;
pub use crate::read::{ReadError, TreeReader};
pub use crate::tree::Tree;

/// Boxed static error type
pub type Err = Box<dyn std::error::Error + 'static>;

impl Grammar {
  /// Fill a CYK chart over `tokens` with this grammar's rules.
  pub fn parse_chart(&self, tokens: &[Token]) -> Chart {
    parse_chart(self, tokens)
  }
}

#[test]
fn test_induce_then_parse() {
  let corpus = "\
    (S (NP-SBJ (DT the) (NN dog)) (VP (VBD chased) (NP (DT the) (NN cat))))\n\
    (S (NP (DT the) (NN cat)) (VP (VBD ran)))\n\
    (S (NP (DT the) (NN cat)) (VP (VBD ran) (ADVP (RB away)) (PP (IN at) (NP (NN once)))))\n";

  let mut counts = RuleCounts::new();
  for tree in TreeReader::new(corpus.as_bytes()) {
    let mut tree = tree.unwrap();
    simplify(&mut tree);
    counts.count_tree(&binarize(&tree));
  }

  // re-load the induced rules through the grammar-file line format
  let grammar: Grammar = counts
    .rules()
    .into_iter()
    .map(|(lhs, rhs, prob)| format!("{} {}\t{}\n", lhs, rhs, prob))
    .collect::<String>()
    .parse()
    .unwrap();

  let tokens = ["the DT", "dog NN", "ran VBD"]
    .iter()
    .map(|l| l.parse::<Token>().unwrap())
    .collect::<Vec<_>>();
  let chart = grammar.parse_chart(&tokens);

  // p(NP -> DT NN) = 4/5, p(VP -> VBD) = 1/3, p(S -> NP VP) = 1
  let s = chart.symbol(0, 3, "S").unwrap();
  assert!((s.prob - 0.8 / 3.0).abs() < 1e-9);
}
