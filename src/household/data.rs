//! Household data structures matching the planner's profile snapshot

use serde::{Deserialize, Serialize};

use crate::assumptions::EligibilityRules;

/// Default old-age claim age when the profile gives none
fn default_claim_age() -> u32 {
    65
}

/// An adult insured under the employee pension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Current age in whole years
    pub age: u32,

    /// Average standard monthly remuneration (yen)
    pub avg_monthly_remuneration: f64,

    /// Months enrolled in the employee pension
    pub enrolled_months: u32,

    /// Apply the 300-month floor in survivor and disability formulas
    pub deemed_300: bool,

    /// Age at which this person claims their own old-age pension (60-75)
    #[serde(default = "default_claim_age")]
    pub claim_age: u32,

    /// Annual work income that continues after the insured event (yen)
    #[serde(default)]
    pub annual_work_income: f64,
}

impl Person {
    /// Create a person with the standard claim age and no work income
    pub fn new(age: u32, avg_monthly_remuneration: f64, enrolled_months: u32, deemed_300: bool) -> Self {
        Self {
            age,
            avg_monthly_remuneration: avg_monthly_remuneration.max(0.0),
            enrolled_months,
            deemed_300,
            claim_age: default_claim_age(),
            annual_work_income: 0.0,
        }
    }

    /// Build from partially entered form data, clamping anything out of range
    pub fn clamped(
        age: i64,
        avg_monthly_remuneration: f64,
        enrolled_months: i64,
        deemed_300: bool,
        claim_age: i64,
        rules: &EligibilityRules,
    ) -> Self {
        if age < 0 || enrolled_months < 0 || avg_monthly_remuneration < 0.0 {
            log::warn!(
                "clamping negative profile input (age={}, months={}, remuneration={})",
                age,
                enrolled_months,
                avg_monthly_remuneration
            );
        }
        if age > i64::from(rules.terminal_age) {
            log::warn!("clamping age {} to terminal age {}", age, rules.terminal_age);
        }
        let claim = clamp_to_u32(claim_age);
        let clamped_claim = rules.clamp_claim_age(claim);
        if clamped_claim != claim {
            log::warn!("claim age {} outside permitted window, using {}", claim_age, clamped_claim);
        }
        Self {
            age: clamp_age(age, rules),
            avg_monthly_remuneration: if avg_monthly_remuneration.is_finite() {
                avg_monthly_remuneration.max(0.0)
            } else {
                0.0
            },
            enrolled_months: clamp_to_u32(enrolled_months),
            deemed_300,
            claim_age: clamped_claim,
            annual_work_income: 0.0,
        }
    }

    /// Set the old-age claim age
    pub fn with_claim_age(mut self, claim_age: u32) -> Self {
        self.claim_age = claim_age;
        self
    }

    /// Set the annual work income
    pub fn with_work_income(mut self, annual_work_income: f64) -> Self {
        self.annual_work_income = annual_work_income.max(0.0);
        self
    }

    /// Age after `years` have elapsed
    pub fn age_after(&self, years: u32) -> u32 {
        self.age.saturating_add(years)
    }
}

fn clamp_to_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

/// Ages past the terminal age carry no entitlement; clamp them there
fn clamp_age(age: i64, rules: &EligibilityRules) -> u32 {
    clamp_to_u32(age).min(rules.terminal_age)
}

/// A dependent child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Current age in whole years
    pub age: u32,
}

impl Child {
    pub fn new(age: u32) -> Self {
        Self { age }
    }
}

/// Which adult slot a person occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Husband,
    Wife,
}

/// The adults of a household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Adults {
    Couple { husband: Person, wife: Person },
    Single(Person),
}

/// Household snapshot: one or two adults plus children in birth order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub adults: Adults,
    pub children: Vec<Child>,
}

impl Household {
    /// Married couple with children
    pub fn couple(husband: Person, wife: Person, children: Vec<Child>) -> Self {
        Self {
            adults: Adults::Couple { husband, wife },
            children,
        }
    }

    /// Single adult with children
    pub fn single(person: Person, children: Vec<Child>) -> Self {
        Self {
            adults: Adults::Single(person),
            children,
        }
    }

    /// Build the child list from raw ages, clamped to `[0, terminal_age]`
    pub fn children_from_ages(ages: &[i64], rules: &EligibilityRules) -> Vec<Child> {
        ages.iter()
            .map(|&age| Child::new(clamp_age(age, rules)))
            .collect()
    }

    pub fn husband(&self) -> Option<&Person> {
        match &self.adults {
            Adults::Couple { husband, .. } => Some(husband),
            Adults::Single(_) => None,
        }
    }

    pub fn wife(&self) -> Option<&Person> {
        match &self.adults {
            Adults::Couple { wife, .. } => Some(wife),
            Adults::Single(_) => None,
        }
    }

    /// The adult in a role, and their spouse
    pub fn by_role(&self, role: Role) -> Option<(&Person, &Person)> {
        match (&self.adults, role) {
            (Adults::Couple { husband, wife }, Role::Husband) => Some((husband, wife)),
            (Adults::Couple { husband, wife }, Role::Wife) => Some((wife, husband)),
            (Adults::Single(_), _) => None,
        }
    }

    /// The only adult of a single-adult household
    pub fn single_adult(&self) -> Option<&Person> {
        match &self.adults {
            Adults::Single(person) => Some(person),
            Adults::Couple { .. } => None,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self.adults, Adults::Single(_))
    }

    /// Number of children still eligible `years` from now
    pub fn eligible_children_after(&self, years: u32, rules: &EligibilityRules) -> u32 {
        self.children
            .iter()
            .filter(|child| rules.child_eligible(child.age.saturating_add(years)))
            .count() as u32
    }

    /// Years from now at which each still-eligible child ages out
    pub fn child_age_out_offsets(&self, rules: &EligibilityRules) -> Vec<u32> {
        self.children
            .iter()
            .filter(|child| rules.child_eligible(child.age))
            .map(|child| rules.child_cutoff_age - child.age)
            .collect()
    }

    /// Years from now until the last eligible child ages out (0 if none)
    pub fn years_until_children_age_out(&self, rules: &EligibilityRules) -> u32 {
        self.child_age_out_offsets(rules).into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_household() -> Household {
        Household::couple(
            Person::new(38, 450_000.0, 300, true),
            Person::new(35, 250_000.0, 120, false),
            vec![Child::new(3), Child::new(7), Child::new(19)],
        )
    }

    #[test]
    fn test_eligible_children_after() {
        let rules = EligibilityRules::default();
        let household = sample_household();

        assert_eq!(household.eligible_children_after(0, &rules), 2);
        assert_eq!(household.eligible_children_after(10, &rules), 1);
        assert_eq!(household.eligible_children_after(15, &rules), 0);
    }

    #[test]
    fn test_child_age_out_offsets() {
        let rules = EligibilityRules::default();
        let household = sample_household();

        assert_eq!(household.child_age_out_offsets(&rules), vec![15, 11]);
        assert_eq!(household.years_until_children_age_out(&rules), 15);
    }

    #[test]
    fn test_by_role() {
        let household = sample_household();
        let (wife, husband) = household.by_role(Role::Wife).unwrap();
        assert_eq!(wife.age, 35);
        assert_eq!(husband.age, 38);
        assert!(Household::single(Person::new(40, 0.0, 0, false), vec![]).by_role(Role::Husband).is_none());
    }

    #[test]
    fn test_clamped_person() {
        let rules = EligibilityRules::default();
        let person = Person::clamped(-3, -10.0, -12, true, 90, &rules);
        assert_eq!(person.age, 0);
        assert_eq!(person.enrolled_months, 0);
        assert_eq!(person.avg_monthly_remuneration, 0.0);
        assert_eq!(person.claim_age, 75);
    }

    #[test]
    fn test_children_from_ages_clamps() {
        let rules = EligibilityRules::default();
        let children = Household::children_from_ages(&[-1, 4, 9_999_999_999], &rules);
        assert_eq!(children, vec![Child::new(0), Child::new(4), Child::new(100)]);
    }

    #[test]
    fn test_clamped_person_age_bounded_by_terminal() {
        let rules = EligibilityRules::default();
        let person = Person::clamped(9_999_999_999, 300_000.0, 9_999_999_999, false, 65, &rules);
        assert_eq!(person.age, 100);
        assert_eq!(person.enrolled_months, u32::MAX);
    }

    #[test]
    fn test_projection_saturates_on_extreme_ages() {
        let rules = EligibilityRules::default();
        let household = Household::single(Person::new(u32::MAX, 0.0, 0, false), vec![Child::new(u32::MAX)]);

        assert_eq!(household.single_adult().map(|p| p.age_after(10)), Some(u32::MAX));
        assert_eq!(household.eligible_children_after(10, &rules), 0);
    }
}
