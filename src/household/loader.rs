//! Load a household profile snapshot from JSON
//!
//! Ages may be given directly or as birth dates, which resolve against the
//! profile's `as_of` date (today when absent).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::{Child, Household, Person};
use crate::assumptions::EligibilityRules;
use crate::error::{PlannerError, Result};

/// Default path to the sample profile
pub const DEFAULT_PROFILE_PATH: &str = "data/profiles/sample_household.json";

/// Raw person entry as entered in the planner form
#[derive(Debug, Deserialize)]
struct PersonRow {
    #[serde(default)]
    age: Option<i64>,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    avg_monthly_remuneration: f64,
    #[serde(default)]
    enrolled_months: i64,
    #[serde(default)]
    deemed_300: bool,
    #[serde(default = "default_claim_age")]
    claim_age: i64,
    #[serde(default)]
    annual_work_income: f64,
}

fn default_claim_age() -> i64 {
    65
}

/// A child is either a bare age or an object with a birth date
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChildRow {
    Age(i64),
    Born { birth_date: String },
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    as_of: Option<String>,
    #[serde(default)]
    husband: Option<PersonRow>,
    #[serde(default)]
    wife: Option<PersonRow>,
    #[serde(default)]
    single: Option<PersonRow>,
    #[serde(default)]
    children: Vec<ChildRow>,
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| PlannerError::InvalidDate(raw.to_string()))
}

/// Completed years between `birth` and `as_of`
pub fn age_on(birth: NaiveDate, as_of: NaiveDate) -> i64 {
    let mut age = (as_of.year() - birth.year()) as i64;
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

impl PersonRow {
    fn to_person(&self, as_of: NaiveDate, rules: &EligibilityRules) -> Result<Person> {
        let age = match (self.age, &self.birth_date) {
            (Some(age), _) => age,
            (None, Some(birth)) => age_on(parse_date(birth)?, as_of),
            (None, None) => return Err(PlannerError::MissingAge),
        };
        Ok(Person::clamped(
            age,
            self.avg_monthly_remuneration,
            self.enrolled_months,
            self.deemed_300,
            self.claim_age,
            rules,
        )
        .with_work_income(self.annual_work_income))
    }
}

impl ProfileRow {
    fn to_household(self, rules: &EligibilityRules) -> Result<Household> {
        let as_of = match &self.as_of {
            Some(raw) => parse_date(raw)?,
            None => chrono::Local::now().date_naive(),
        };

        let mut ages = Vec::with_capacity(self.children.len());
        for child in &self.children {
            ages.push(match child {
                ChildRow::Age(age) => *age,
                ChildRow::Born { birth_date } => age_on(parse_date(birth_date)?, as_of),
            });
        }
        let children: Vec<Child> = Household::children_from_ages(&ages, rules);

        let husband = self.husband.as_ref().map(|p| p.to_person(as_of, rules)).transpose()?;
        let wife = self.wife.as_ref().map(|p| p.to_person(as_of, rules)).transpose()?;
        let single = self.single.as_ref().map(|p| p.to_person(as_of, rules)).transpose()?;

        match (husband, wife, single) {
            (Some(husband), Some(wife), _) => Ok(Household::couple(husband, wife, children)),
            (Some(person), None, _) | (None, Some(person), _) | (None, None, Some(person)) => {
                Ok(Household::single(person, children))
            }
            (None, None, None) => Err(PlannerError::EmptyHousehold),
        }
    }
}

/// Parse a household profile from a JSON string
pub fn parse_household(json: &str, rules: &EligibilityRules) -> Result<Household> {
    let row: ProfileRow = serde_json::from_str(json)?;
    row.to_household(rules)
}

/// Load a household profile from a JSON file
pub fn load_household(path: &Path, rules: &EligibilityRules) -> Result<Household> {
    let file = File::open(path).map_err(|source| PlannerError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let row: ProfileRow = serde_json::from_reader(BufReader::new(file))?;
    row.to_household(rules)
}

/// Load the bundled sample profile
pub fn load_default_household() -> Result<Household> {
    load_household(Path::new(DEFAULT_PROFILE_PATH), &EligibilityRules::default())
}
