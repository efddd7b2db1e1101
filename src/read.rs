use std::collections::VecDeque;
use std::io::BufRead;

use regex::Regex;
use thiserror::Error;

use crate::tree::Tree;

/// Grammar of the bracketed tree notation:
///
/// ```text
/// texpr := "(" label label ")" | "(" label texpr* ")"
/// label := [^\s()]+
/// ```
///
/// A label may contain any character other than whitespace or parentheses,
/// so `(NP` lexes as an open paren followed by the label `NP`.
#[derive(Debug, Error)]
pub enum ReadError {
  /// The stream held no further tree expressions. Expected termination for
  /// a read loop, not a failure.
  #[error("end of input")]
  EndOfInput,
  #[error("malformed tree: {0}")]
  MalformedTree(&'static str),
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

#[derive(Debug, PartialEq)]
enum Token {
  Open,
  Close,
  Label(String),
}

/// What the previous token was, which decides where a label attaches.
enum Last {
  None,
  Open,
  Label,
  Close,
}

/// Streams tree expressions out of a reader. Call [`TreeReader::read_tree`]
/// repeatedly to drain a stream of consecutive trees, or use the `Iterator`
/// impl, which ends on `EndOfInput`.
pub struct TreeReader<R> {
  input: R,
  pending: VecDeque<Token>,
}

impl<R: BufRead> TreeReader<R> {
  pub fn new(input: R) -> Self {
    Self {
      input,
      pending: VecDeque::new(),
    }
  }

  fn next_token(&mut self) -> Result<Option<Token>, ReadError> {
    lazy_static! {
      static ref TOKEN: Regex = Regex::new(r"[()]|[^\s()]+").unwrap();
    }

    while self.pending.is_empty() {
      let mut line = String::new();
      if self.input.read_line(&mut line)? == 0 {
        return Ok(None);
      }
      for m in TOKEN.find_iter(&line) {
        self.pending.push_back(match m.as_str() {
          "(" => Token::Open,
          ")" => Token::Close,
          label => Token::Label(label.to_string()),
        });
      }
    }

    Ok(self.pending.pop_front())
  }

  /// Read the next tree expression.
  ///
  /// If the completed top-level node is an unlabeled wrapper around a single
  /// child (the `( (S ...) )` convention), the wrapper is discarded and the
  /// child returned instead.
  pub fn read_tree(&mut self) -> Result<Tree, ReadError> {
    let mut stack: Vec<Tree> = Vec::new();
    let mut last = Last::None;

    while let Some(token) = self.next_token()? {
      match token {
        Token::Open => {
          stack.push(Tree::new("", Vec::new()));
          last = Last::Open;
        }
        Token::Label(label) => {
          let top = match stack.last_mut() {
            Some(top) => top,
            None => return Err(ReadError::MalformedTree("text outside tree")),
          };
          match last {
            // the node just opened hasn't been labeled yet
            Last::Open => top.label = label,
            // a second label inside a node is a childless leaf
            Last::Label => top.children.push(Tree::leaf(label)),
            _ => return Err(ReadError::MalformedTree("text after close paren")),
          }
          last = Last::Label;
        }
        Token::Close => {
          last = Last::Close;
          let done = match stack.pop() {
            Some(done) => done,
            None => return Err(ReadError::MalformedTree("unmatched close paren")),
          };
          match stack.last_mut() {
            Some(parent) => parent.children.push(done),
            None => {
              if done.label.is_empty() && done.children.len() == 1 {
                return Ok(done.children.into_iter().next().unwrap());
              }
              return Ok(done);
            }
          }
        }
      }
    }

    // ran out of tokens; anything still on the stack was never closed
    if stack.is_empty() {
      Err(ReadError::EndOfInput)
    } else {
      Err(ReadError::MalformedTree("mismatched parentheses at end of input"))
    }
  }
}

impl<R: BufRead> Iterator for TreeReader<R> {
  type Item = Result<Tree, ReadError>;

  fn next(&mut self) -> Option<Self::Item> {
    match self.read_tree() {
      Err(ReadError::EndOfInput) => None,
      result => Some(result),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn read_one(s: &str) -> Result<Tree, ReadError> {
    TreeReader::new(s.as_bytes()).read_tree()
  }

  #[test]
  fn reads_nested_tree() {
    let t = read_one("(S (NP (DT the) (NN dog)) (VP (VBD ran)))").unwrap();
    assert_eq!(t.label, "S");
    assert_eq!(t.children.len(), 2);
    assert_eq!(t.children[0].label, "NP");
    assert_eq!(t.children[1].children[0], Tree::new("VBD", vec![Tree::leaf("ran")]));
    assert_eq!(t.leaves(), vec!["the", "dog", "ran"]);
  }

  #[test]
  fn labels_need_no_surrounding_whitespace() {
    let packed = read_one("(S(NP(DT the)(NN dog))(VP(VBD ran)))").unwrap();
    let spaced = read_one("( S ( NP ( DT the ) ( NN dog ) ) ( VP ( VBD ran ) ) )").unwrap();
    assert_eq!(packed, spaced);
  }

  #[test]
  fn drains_consecutive_trees() {
    let mut reader = TreeReader::new("(A a) (B b)\n(C c)".as_bytes());
    let labels = ["A", "B", "C"];
    for label in labels {
      assert_eq!(reader.read_tree().unwrap().label, label);
    }
    assert!(matches!(reader.read_tree(), Err(ReadError::EndOfInput)));
  }

  #[test]
  fn unwraps_unlabeled_top_wrapper() {
    let t = read_one("( (S (NP foo) (VP bar)) )").unwrap();
    assert_eq!(t.label, "S");
  }

  #[test]
  fn keeps_unlabeled_wrapper_with_two_children() {
    let t = read_one("( (NP foo) (VP bar) )").unwrap();
    assert_eq!(t.label, "");
    assert_eq!(t.children.len(), 2);
  }

  #[test]
  fn text_outside_tree_is_malformed() {
    assert!(matches!(
      read_one("foo (S bar)"),
      Err(ReadError::MalformedTree("text outside tree"))
    ));
  }

  #[test]
  fn label_after_close_paren_is_malformed() {
    assert!(matches!(
      read_one("(A (B c) d)"),
      Err(ReadError::MalformedTree("text after close paren"))
    ));
  }

  #[test]
  fn unclosed_tree_is_malformed() {
    let mut reader = TreeReader::new("(NP foo".as_bytes());
    assert!(matches!(reader.read_tree(), Err(ReadError::MalformedTree(_))));
  }

  #[test]
  fn iterator_stops_at_end_of_input() {
    let trees = TreeReader::new("(A a) (B b)".as_bytes())
      .collect::<Result<Vec<_>, _>>()
      .unwrap();
    assert_eq!(trees.len(), 2);
  }

  #[test]
  fn printed_trees_reparse_identically() {
    let t = read_one("(S (NP (NP (DT the) (NN dog)) (PP (IN of) (NP (NNP rex)))) (VP (VBD ran)))")
      .unwrap();
    assert_eq!(read_one(&format!("{}", t)).unwrap(), t);
  }
}
