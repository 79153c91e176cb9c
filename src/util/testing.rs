// src/util/testing.rs

use anyhow::Result;
use std::collections::HashMap;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::CardRepository;
use crate::domain::{CardRecord, DomainError};

enum DeckBehavior {
    Cards(Vec<CardRecord>),
    StoreError(String),
}

/// Shared mock repository for testing use cases that depend on CardRepository
///
/// Decks not configured on the builder behave like the real store when the
/// deck does not exist: an empty result, not an error.
///
/// # Examples
///
/// ```
/// use ankiorg::util::testing::MockCardRepository;
/// use ankiorg::domain::CardRecord;
///
/// let mock = MockCardRepository::builder()
///     .with_deck_cards("Articles", vec![CardRecord {
///         id: 123,
///         front: "Question".to_string(),
///         back: "Answer".to_string(),
///         tags: vec![],
///         modified: 1_700_000_000,
///     }])
///     .build();
/// ```
pub struct MockCardRepository {
    decks: HashMap<String, DeckBehavior>,
    last_edited_filter: Option<u32>,
}

impl MockCardRepository {
    pub fn builder() -> MockCardRepositoryBuilder {
        MockCardRepositoryBuilder::new()
    }

    /// The `edited_within_days` value of the most recent `deck_cards` call
    pub fn last_edited_filter(&self) -> Option<u32> {
        self.last_edited_filter
    }
}

impl CardRepository for MockCardRepository {
    fn deck_cards(
        &mut self,
        deck: &str,
        edited_within_days: Option<u32>,
    ) -> Result<Vec<CardRecord>, DomainError> {
        self.last_edited_filter = edited_within_days;

        match self.decks.get(deck) {
            Some(DeckBehavior::Cards(cards)) => Ok(cards.clone()),
            Some(DeckBehavior::StoreError(message)) => {
                Err(DomainError::DataStore(message.clone()))
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Builder for MockCardRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockCardRepositoryBuilder {
    decks: HashMap<String, DeckBehavior>,
}

impl MockCardRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            decks: HashMap::new(),
        }
    }

    /// Configure the cards returned for a deck
    pub fn with_deck_cards(mut self, deck: &str, cards: Vec<CardRecord>) -> Self {
        self.decks.insert(deck.to_string(), DeckBehavior::Cards(cards));
        self
    }

    /// Configure deck_cards to fail with a store error for a deck
    pub fn with_store_error(mut self, deck: &str, message: &str) -> Self {
        self.decks
            .insert(deck.to_string(), DeckBehavior::StoreError(message.to_string()));
        self
    }

    pub fn build(self) -> MockCardRepository {
        MockCardRepository {
            decks: self.decks,
            last_edited_filter: None,
        }
    }
}

impl Default for MockCardRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
