use std::fmt;

/// A labeled syntax tree. Leaves are label-only nodes; a pre-terminal is a
/// node whose single child is a leaf (the word it emits).
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
  pub label: String,
  pub children: Vec<Tree>,
}

impl Tree {
  pub fn new(label: impl Into<String>, children: Vec<Tree>) -> Self {
    Self {
      label: label.into(),
      children,
    }
  }

  pub fn leaf(label: impl Into<String>) -> Self {
    Self::new(label, Vec::new())
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  pub fn is_preterminal(&self) -> bool {
    self.children.len() == 1 && self.children[0].is_leaf()
  }

  /// The leaf labels of this tree, left to right.
  pub fn leaves(&self) -> Vec<&str> {
    let mut out = Vec::new();
    self.collect_leaves(&mut out);
    out
  }

  fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
    if self.is_leaf() {
      out.push(&self.label);
    } else {
      for child in self.children.iter() {
        child.collect_leaves(out);
      }
    }
  }
}

impl fmt::Display for Tree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_leaf() {
      write!(f, "{}", self.label)
    } else if self.is_preterminal() {
      write!(f, "({} {})", self.label, self.children[0].label)
    } else {
      write!(f, "({}", self.label)?;
      for child in self.children.iter() {
        // TODO: is there a nice way to do this that doesn't allocate a String?
        let fmt = format!("{}", child);
        for line in fmt.lines() {
          write!(f, "\n  {}", line)?;
        }
      }
      write!(f, ")")
    }
  }
}
