use crate::tree::Tree;

/// Label marking an elided/empty element in the treebank annotation.
pub const NONE_LABEL: &str = "-NONE-";

/// Normalize a tree in place: prune `-NONE-` subtrees and strip label
/// annotations.
///
/// Pre-terminals are left untouched. Every other internal node is simplified
/// bottom-up: children that ended up labeled `-NONE-` are dropped, and a node
/// left with no children is itself relabeled `-NONE-` so its parent drops it
/// in turn. Surviving labels are truncated at the first `-` (functional tag),
/// then `=` (coreference index), then `|` (ambiguous tag), in that order on
/// the progressively truncated label.
pub fn simplify(tree: &mut Tree) {
  if tree.is_leaf() || tree.is_preterminal() {
    return;
  }

  for child in tree.children.iter_mut() {
    if !child.is_leaf() {
      simplify(child);
    }
  }

  tree.children.retain(|child| child.label != NONE_LABEL);

  if tree.children.is_empty() {
    tree.label = NONE_LABEL.to_string();
  } else {
    strip_annotations(&mut tree.label);
  }
}

fn strip_annotations(label: &mut String) {
  for sep in ['-', '=', '|'] {
    if let Some(idx) = label.find(sep) {
      label.truncate(idx);
    }
  }
}
