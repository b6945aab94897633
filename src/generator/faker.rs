//! Fake data generation helpers.
//!
//! Wraps the `fake` crate behind a single seeded RNG so that a run is fully
//! reproducible, and tracks the values of columns that must be unique.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// How many candidates are drawn before a unique column gives up
pub const MAX_UNIQUE_ATTEMPTS: usize = 1000;

/// Fake data generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
    emails: HashSet<String>,
    national_ids: HashSet<String>,
    account_numbers: HashSet<String>,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            emails: HashSet::new(),
            national_ids: HashSet::new(),
            account_numbers: HashSet::new(),
        }
    }

    /// 128-bit random identifier (version 4 layout)
    pub fn uuid(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.random()).into_uuid()
    }

    pub fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    pub fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    pub fn full_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    pub fn phone(&mut self) -> String {
        PhoneNumber().fake_with_rng(&mut self.rng)
    }

    pub fn city(&mut self) -> String {
        CityName().fake_with_rng(&mut self.rng)
    }

    pub fn state_abbr(&mut self) -> String {
        StateAbbr().fake_with_rng(&mut self.rng)
    }

    pub fn zip_code(&mut self) -> String {
        ZipCode().fake_with_rng(&mut self.rng)
    }

    /// Building number and street, e.g. "4821 Maple Street"
    pub fn street_address(&mut self) -> String {
        let number: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        format!("{} {}", number, street)
    }

    /// Single-line postal address
    pub fn full_address(&mut self) -> String {
        let street = self.street_address();
        let city = self.city();
        let state = self.state_abbr();
        let zip = self.zip_code();
        format!("{}, {}, {} {}", street, city, state, zip)
    }

    /// Email address unique across the whole run
    pub fn unique_email(&mut self) -> anyhow::Result<String> {
        let rng = &mut self.rng;
        unique_value(&mut self.emails, "email", || SafeEmail().fake_with_rng(rng))
    }

    /// SSN-style national identifier (`NNN-NN-NNNN`), unique across the run
    pub fn unique_national_id(&mut self) -> anyhow::Result<String> {
        let rng = &mut self.rng;
        unique_value(&mut self.national_ids, "national_id", || {
            format!(
                "{:03}-{:02}-{:04}",
                rng.random_range(1..900),
                rng.random_range(1..100),
                rng.random_range(1..10000)
            )
        })
    }

    /// BBAN-style account number: four bank-code letters then 14 digits
    pub fn unique_account_number(&mut self) -> anyhow::Result<String> {
        let rng = &mut self.rng;
        unique_value(&mut self.account_numbers, "account_number", || {
            let bank: String = (0..4)
                .map(|_| rng.random_range(b'A'..=b'Z') as char)
                .collect();
            let digits: String = (0..14)
                .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
                .collect();
            format!("{}{}", bank, digits)
        })
    }

    /// Uniform value in `[min, max]` rounded to `places` decimals
    pub fn decimal(&mut self, min: f64, max: f64, places: u8) -> f64 {
        round_to(self.rng.random_range(min..=max), places)
    }

    /// Generate a boolean with given probability of true
    pub fn bool_with_probability(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    /// Datetime in `[start, end]`, whole seconds
    pub fn datetime_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
        let span = (end - start).num_seconds().max(0);
        start + TimeDelta::seconds(self.rng.random_range(0..=span))
    }

    /// Date in `[start, end]`
    pub fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days().max(0);
        start + TimeDelta::days(self.rng.random_range(0..=span))
    }

    /// Pick a random element; fails when there is nothing to pick for `field`.
    pub fn pick<'a, T>(&mut self, field: &str, items: &'a [T]) -> anyhow::Result<&'a T> {
        if items.is_empty() {
            anyhow::bail!("cannot pick a {}: no candidates generated", field);
        }
        Ok(&items[self.rng.random_range(0..items.len())])
    }

    pub fn pick_copied<T: Copy>(&mut self, field: &str, items: &[T]) -> anyhow::Result<T> {
        self.pick(field, items).copied()
    }
}

/// Draw candidates until one has not been seen before.
fn unique_value(
    seen: &mut HashSet<String>,
    field: &'static str,
    mut next: impl FnMut() -> String,
) -> anyhow::Result<String> {
    for _ in 0..MAX_UNIQUE_ATTEMPTS {
        let candidate = next();
        if seen.insert(candidate.clone()) {
            return Ok(candidate);
        }
    }
    anyhow::bail!(
        "could not generate a unique {} after {} attempts",
        field,
        MAX_UNIQUE_ATTEMPTS
    )
}

/// Round half away from zero to a fixed number of decimal places.
pub fn round_to(value: f64, places: u8) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
