// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::date::Date;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

pub mod due;
pub mod edit;
pub mod export;
pub mod history;
pub mod init;
pub mod note;
pub mod open;
pub mod read;
pub mod remove;
pub mod review;
pub mod scan;
pub mod status;
pub mod tags;

/// The end of the current local day.
pub fn today_cutoff(now: Timestamp) -> Timestamp {
    now.local_date().end_of_day()
}

/// The end of the local day a week from now.
pub fn week_cutoff(now: Timestamp) -> Timestamp {
    let today: Date = now.local_date();
    today.plus_days(7).end_of_day()
}

/// Use the rating given on the command line, or ask for one.
pub fn rating_or_prompt(rating: Option<u8>, question: &str, choices: &[&str]) -> Fallible<Rating> {
    match rating {
        Some(n) => Rating::try_from(n),
        None => prompt_rating(question, choices),
    }
}

fn prompt_rating(question: &str, choices: &[&str]) -> Fallible<Rating> {
    println!("{question}");
    for (i, choice) in choices.iter().enumerate() {
        println!("  {}) {choice}", i + 1);
    }
    print!("\nRating [1-4]: ");
    stdout().flush()?;
    let mut input = String::new();
    stdin().read_line(&mut input)?;
    parse_rating(&input)
}

pub fn parse_rating(input: &str) -> Fallible<Rating> {
    let input = input.trim();
    match input.parse::<u8>() {
        Ok(n) => Rating::try_from(n),
        Err(_) => fail(format!("invalid rating: {input}")),
    }
}
