use crate::tree::Tree;

/// Rebuild `tree` so that every node has at most two children.
///
/// Nodes with three or more children are folded into a right-branching
/// chain: the original label stays on the outermost node, and each synthetic
/// node is labeled with the `|`-joined labels of the children it still covers,
/// so the original child sequence can be reconstructed from the labels.
///
/// ```text
/// (A b c d e)  =>  (A b (c|d|e c (d|e d e)))
/// ```
pub fn binarize(tree: &Tree) -> Tree {
  let children: Vec<Tree> = tree.children.iter().map(binarize).collect();
  if children.len() <= 2 {
    Tree::new(tree.label.clone(), children)
  } else {
    let mut rest = children;
    let first = rest.remove(0);
    Tree::new(tree.label.clone(), vec![first, chain(rest)])
  }
}

/// Fold the not-yet-attached children into the right-branching chain. The
/// chain node covering them is labeled with all of their labels.
fn chain(mut remaining: Vec<Tree>) -> Tree {
  let label = remaining
    .iter()
    .map(|c| c.label.as_str())
    .collect::<Vec<_>>()
    .join("|");

  if remaining.len() == 2 {
    Tree::new(label, remaining)
  } else {
    let head = remaining.remove(0);
    let tail = chain(remaining);
    Tree::new(label, vec![head, tail])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::read::TreeReader;

  fn read(s: &str) -> Tree {
    TreeReader::new(s.as_bytes()).read_tree().unwrap()
  }

  fn max_arity(tree: &Tree) -> usize {
    tree
      .children
      .iter()
      .map(max_arity)
      .max()
      .unwrap_or(0)
      .max(tree.children.len())
  }

  fn count_nodes(tree: &Tree) -> usize {
    1 + tree.children.iter().map(count_nodes).sum::<usize>()
  }

  #[test]
  fn binary_trees_are_unchanged() {
    let t = read("(S (NP (DT the) (NN dog)) (VP (VBD ran)))");
    assert_eq!(binarize(&t), t);
  }

  #[test]
  fn folds_wide_nodes_right_branching() {
    let t = binarize(&read("(A (B b) (C c) (D d) (E e))"));

    assert_eq!(t.label, "A");
    assert_eq!(t.children.len(), 2);
    assert_eq!(t.children[0].label, "B");

    let cde = &t.children[1];
    assert_eq!(cde.label, "C|D|E");
    assert_eq!(cde.children[0].label, "C");

    let de = &cde.children[1];
    assert_eq!(de.label, "D|E");
    assert_eq!(de.children[0].label, "D");
    assert_eq!(de.children[1].label, "E");
  }

  #[test]
  fn every_node_has_at_most_two_children() {
    let t = binarize(&read("(S (A a) (B b) (C c) (D d) (E e) (F f))"));
    assert!(max_arity(&t) <= 2);
  }

  #[test]
  fn preserves_the_leaf_sequence() {
    let wide = read("(S (A a) (B b) (C c) (D d) (E e))");
    assert_eq!(binarize(&wide).leaves(), wide.leaves());
  }

  #[test]
  fn a_k_ary_node_gains_k_minus_2_synthetic_nodes() {
    // 5 children: the node plus 3 synthetic chain nodes cover them
    let wide = read("(S (A a) (B b) (C c) (D d) (E e))");
    assert_eq!(count_nodes(&binarize(&wide)), count_nodes(&wide) + 3);
  }

  #[test]
  fn binarization_is_idempotent() {
    let once = binarize(&read("(A (B b) (C c) (D d) (E e))"));
    assert_eq!(binarize(&once), once);
  }
}
