use std::collections::HashMap;
use std::fmt;

use crate::grammar::Probability;
use crate::tree::Tree;

/// Production counts accumulated over a corpus of binarized trees, keyed by
/// LHS label and then by the space-joined child labels.
///
/// The `Display` impl emits one `LHS TAB -> TAB RHS TAB probability` line per
/// distinct rule with its maximum-likelihood estimate. LHS iteration order is
/// unspecified; consumers must treat the emitted rules as a set.
#[derive(Debug, Default)]
pub struct RuleCounts {
  counts: HashMap<String, HashMap<String, usize>>,
}

impl RuleCounts {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  /// Count every production in `tree`. Pre-terminals emit words rather than
  /// grammar productions and are not counted.
  pub fn count_tree(&mut self, tree: &Tree) {
    if tree.is_leaf() || tree.is_preterminal() {
      return;
    }

    let rhs = tree
      .children
      .iter()
      .map(|c| c.label.as_str())
      .collect::<Vec<_>>()
      .join(" ");
    *self
      .counts
      .entry(tree.label.clone())
      .or_default()
      .entry(rhs)
      .or_insert(0) += 1;

    for child in tree.children.iter() {
      self.count_tree(child);
    }
  }

  /// All counted rules with their MLE probabilities,
  /// `count / Σ counts for the same LHS`, in unspecified order.
  pub fn rules(&self) -> Vec<(String, String, Probability)> {
    let mut rules = Vec::new();
    for (lhs, by_rhs) in self.counts.iter() {
      let total: usize = by_rhs.values().sum();
      for (rhs, count) in by_rhs.iter() {
        let prob = *count as Probability / total as Probability;
        rules.push((lhs.clone(), rhs.clone(), prob));
      }
    }
    rules
  }
}

impl fmt::Display for RuleCounts {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (lhs, rhs, prob) in self.rules() {
      writeln!(f, "{}\t->\t{}\t{}", lhs, rhs, prob)?;
    }
    Ok(())
  }
}
