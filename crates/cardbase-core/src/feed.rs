//! Feed input: the `CardSource` trait and a lazy reader for top-level JSON
//! arrays.
//!
//! Bulk feeds are far too large to buffer as a single value, so every input
//! is pulled one element at a time:
//!
//!   byte source (BufRead)
//!     └─ JsonArrayStream::next() → skip `[` / `,` → deserialize one element
//!          └─ Iterator<Item = Result<T>>

use std::{io::BufRead, marker::PhantomData};

use serde::{Deserialize, de::DeserializeOwned};

use crate::{
  Error, Result,
  raw::{History, Rating, RawPrinting},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over where the four inputs of a catalog build come from.
///
/// Every method starts a fresh pass over its input; the builder calls each
/// at most once per run.
pub trait CardSource {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Feed A: the English-only default snapshot.
  fn english_printings(
    &self,
  ) -> Result<impl Iterator<Item = Result<RawPrinting, Self::Error>> + '_, Self::Error>;

  /// Feed B: every printing in every language.
  fn all_printings(
    &self,
  ) -> Result<impl Iterator<Item = Result<RawPrinting, Self::Error>> + '_, Self::Error>;

  fn ratings(
    &self,
  ) -> Result<impl Iterator<Item = Result<Rating, Self::Error>> + '_, Self::Error>;

  fn histories(
    &self,
  ) -> Result<impl Iterator<Item = Result<History, Self::Error>> + '_, Self::Error>;
}

// ─── JSON array stream ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  /// Before the opening `[`.
  Start,
  /// After `[`, before the first element or `]`.
  First,
  /// After an element, expecting `,` or `]`.
  Rest,
  Done,
}

/// Iterates the elements of a top-level JSON array without reading the whole
/// array into memory.
///
/// Elements must be objects, arrays or strings; a scalar element is
/// reported as [`Error::MalformedFeed`]. After the first error the stream is
/// exhausted.
pub struct JsonArrayStream<R, T> {
  reader:  R,
  state:   State,
  _marker: PhantomData<fn() -> T>,
}

impl<R, T> JsonArrayStream<R, T>
where
  R: BufRead,
  T: DeserializeOwned,
{
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      state: State::Start,
      _marker: PhantomData,
    }
  }

  /// Peek the next non-whitespace byte without consuming it.
  fn peek_significant(&mut self) -> Result<Option<u8>> {
    loop {
      let next = match self.reader.fill_buf()?.first() {
        Some(&b) => b,
        None => return Ok(None),
      };
      if next.is_ascii_whitespace() {
        self.reader.consume(1);
      } else {
        return Ok(Some(next));
      }
    }
  }

  /// Elements must be objects, arrays or strings. A bare number or literal
  /// is only terminated by the byte after it, which the per-element
  /// deserializer would swallow.
  fn read_element(&mut self) -> Result<T> {
    match self.peek_significant()? {
      Some(b'{' | b'[' | b'"') => {}
      Some(other) => {
        return Err(Error::MalformedFeed(format!(
          "unsupported scalar element starting with {:?}",
          other as char
        )));
      }
      None => return Err(Error::MalformedFeed("unterminated array".into())),
    }
    let mut de = serde_json::Deserializer::from_reader(&mut self.reader);
    Ok(<T as Deserialize>::deserialize(&mut de)?)
  }

  fn advance(&mut self) -> Result<Option<T>> {
    loop {
      match self.state {
        State::Done => return Ok(None),
        State::Start => match self.peek_significant()? {
          Some(b'[') => {
            self.reader.consume(1);
            self.state = State::First;
          }
          Some(other) => {
            return Err(Error::MalformedFeed(format!(
              "expected '[' at start of feed, found {:?}",
              other as char
            )));
          }
          None => return Err(Error::MalformedFeed("empty feed".into())),
        },
        State::First => match self.peek_significant()? {
          Some(b']') => {
            self.reader.consume(1);
            self.state = State::Done;
          }
          Some(_) => {
            let element = self.read_element()?;
            self.state = State::Rest;
            return Ok(Some(element));
          }
          None => return Err(Error::MalformedFeed("unterminated array".into())),
        },
        State::Rest => match self.peek_significant()? {
          Some(b',') => {
            self.reader.consume(1);
            let element = self.read_element()?;
            return Ok(Some(element));
          }
          Some(b']') => {
            self.reader.consume(1);
            self.state = State::Done;
          }
          Some(other) => {
            return Err(Error::MalformedFeed(format!(
              "expected ',' or ']' between elements, found {:?}",
              other as char
            )));
          }
          None => return Err(Error::MalformedFeed("unterminated array".into())),
        },
      }
    }
  }
}

impl<R, T> Iterator for JsonArrayStream<R, T>
where
  R: BufRead,
  T: DeserializeOwned,
{
  type Item = Result<T>;

  fn next(&mut self) -> Option<Self::Item> {
    match self.advance() {
      Ok(element) => element.map(Ok),
      Err(e) => {
        self.state = State::Done;
        Some(Err(e))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;

  #[derive(Debug, PartialEq, Deserialize)]
  struct Item {
    n: u32,
  }

  fn collect(input: &str) -> Vec<Result<Item>> {
    JsonArrayStream::new(Cursor::new(input.as_bytes().to_vec())).collect()
  }

  #[test]
  fn yields_each_element_in_order() {
    let items: Vec<Item> = collect("[\n {\"n\": 1},\n {\"n\": 2} , {\"n\":3}\n]\n")
      .into_iter()
      .map(|r| r.unwrap())
      .collect();
    assert_eq!(items, vec![Item { n: 1 }, Item { n: 2 }, Item { n: 3 }]);
  }

  #[test]
  fn empty_array_yields_nothing() {
    assert!(collect("  [ ] ").is_empty());
  }

  #[test]
  fn missing_bracket_is_malformed() {
    let results = collect("{\"n\": 1}");
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(Error::MalformedFeed(_))));
  }

  #[test]
  fn stops_after_a_bad_element() {
    let results = collect("[{\"n\": 1}, {\"n\": \"x\"}, {\"n\": 3}]");
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::Json(_))));
  }

  #[test]
  fn nested_arrays_and_strings_are_elements() {
    let arrays: Vec<Vec<u32>> = JsonArrayStream::new(Cursor::new(b"[[1,2], [3]]".to_vec()))
      .collect::<Result<_>>()
      .unwrap();
    assert_eq!(arrays, vec![vec![1, 2], vec![3]]);

    let strings: Vec<String> = JsonArrayStream::new(Cursor::new(br#"["a","b"]"#.to_vec()))
      .collect::<Result<_>>()
      .unwrap();
    assert_eq!(strings, ["a", "b"]);
  }

  #[test]
  fn scalar_elements_are_rejected() {
    let results: Vec<Result<u32>> =
      JsonArrayStream::new(Cursor::new(b"[1,2]".to_vec())).collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(Error::MalformedFeed(_))));
  }

  #[test]
  fn truncated_array_is_malformed() {
    let results = collect("[{\"n\": 1}");
    assert_eq!(results.len(), 2);
    assert!(matches!(results[1], Err(Error::MalformedFeed(_))));
  }
}
