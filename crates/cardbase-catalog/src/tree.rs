//! Character trie used for the autocomplete artifacts.
//!
//! Serialized as nested objects keyed by character; a `"$": {}` entry marks
//! the end of a word:
//!
//! ```text
//! ["at", "ax"] → {"a": {"t": {"$": {}}, "x": {"$": {}}}}
//! ```

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

const TERMINAL_KEY: &str = "$";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
  children: BTreeMap<char, Node>,
  terminal: bool,
}

impl Node {
  fn descend(&self, prefix: &str) -> Option<&Node> {
    prefix
      .chars()
      .try_fold(self, |node, ch| node.children.get(&ch))
  }

  fn collect(&self, prefix: &mut String, out: &mut Vec<String>) {
    if self.terminal {
      out.push(prefix.clone());
    }
    for (ch, child) in &self.children {
      prefix.push(*ch);
      child.collect(prefix, out);
      prefix.pop();
    }
  }
}

impl Serialize for Node {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let len = self.children.len() + usize::from(self.terminal);
    let mut map = serializer.serialize_map(Some(len))?;
    if self.terminal {
      map.serialize_entry(TERMINAL_KEY, &BTreeMap::<String, ()>::new())?;
    }
    for (ch, child) in &self.children {
      map.serialize_entry(ch, child)?;
    }
    map.end()
  }
}

/// A set of words sharing prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PrefixTree {
  root: Node,
}

impl PrefixTree {
  pub fn new() -> Self { Self::default() }

  pub fn from_words<I, S>(words: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut tree = Self::new();
    for word in words {
      tree.insert(word.as_ref());
    }
    tree
  }

  /// Empty words are ignored.
  pub fn insert(&mut self, word: &str) {
    if word.is_empty() {
      return;
    }
    let node = word
      .chars()
      .fold(&mut self.root, |node, ch| node.children.entry(ch).or_default());
    node.terminal = true;
  }

  pub fn contains(&self, word: &str) -> bool {
    self.root.descend(word).is_some_and(|n| n.terminal)
  }

  /// Every stored word starting with `prefix`, in character order.
  pub fn completions(&self, prefix: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(node) = self.root.descend(prefix) {
      node.collect(&mut prefix.to_owned(), &mut out);
    }
    out
  }
}
