use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::error::Error;

static QUOTES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources/quotes");

/// Punctuation that counts as a typing mistake when pressed at the wrong place
const ALLOWED_PUNCTUATION: &str = "`~!@#$%^&*()-_=+[]{}\\|;:'\",.<>/?";

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

/// Returns true for keys that are recorded as errors on a mismatch.
/// Anything else is dropped without touching the counters.
pub fn is_allowed_key(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || ALLOWED_PUNCTUATION.contains(c)
}

/// Uniformly random quote, None only for an empty slice
pub fn pick_random<'a, R: Rng + ?Sized>(quotes: &'a [Quote], rng: &mut R) -> Option<&'a Quote> {
    quotes.choose(rng)
}

/// A non-empty list of quotes to draw tests from
#[derive(Deserialize, Clone, Debug)]
pub struct QuoteBook {
    pub name: String,
    quotes: Vec<Quote>,
}

impl QuoteBook {
    /// The quote list compiled into the binary
    pub fn embedded() -> Result<Self, Box<dyn Error>> {
        let file = QUOTES_DIR
            .get_file("english.json")
            .ok_or("quote list not found")?;
        let contents = file
            .contents_utf8()
            .ok_or("quote list is not valid utf-8")?;
        Self::from_json(contents)
    }

    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let book: QuoteBook = serde_json::from_str(json)?;
        if book.quotes.is_empty() {
            return Err(format!("quote list '{}' is empty", book.name).into());
        }
        Ok(book)
    }

    /// A book holding a single quote, used for `--quote`
    pub fn single(quote: Quote) -> Self {
        Self {
            name: "custom".to_string(),
            quotes: vec![quote],
        }
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Random quote; every constructor rejects an empty list
    pub fn pick(&self) -> Quote {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Quote {
        pick_random(&self.quotes, rng)
            .cloned()
            .expect("quote book is never empty")
    }
}
