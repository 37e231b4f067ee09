//! Eligibility rule evaluator
//!
//! Resolves a `Scenario` into the person whose ages drive the timeline (the
//! subject) and answers two questions: which benefit combination applies at a
//! given subject age, and at which ages that combination can change. The
//! widow/widower asymmetry and the policy mode are parameters of a single code
//! path rather than separate branches per household member.

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::benefits::{BenefitComponents, BenefitResult, DisabilityLevel, Formulas};
use crate::household::{Adults, Person, Role};
use crate::timeline::breakpoints::{self, Breakpoint, BreakpointReason};
use super::scenario::{Event, PolicyMode, Scenario};

/// How the subject's own old-age pension is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OldAgePlan {
    /// Claimed at the subject's elected claim age, with the crossover rule from then on
    Elected,
    /// Undeferred crossover from the standard age, fully deferred own pension from `switch_age`
    DeferralSwitch { switch_age: u32 },
}

/// Labelled state of the entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    SurvivorWithChildren,
    SurvivorEmployee,
    FixedTermSurvivor,
    SurvivorSuspended,
    SurvivorDisqualified,
    FixedTermExpired,
    Orphans,
    Disability,
    OldAge { claim_age: u32 },
    DeferredOldAge { claim_age: u32 },
    NoEntitlement,
}

impl Phase {
    pub fn label(&self) -> String {
        match self {
            Phase::SurvivorWithChildren => "survivor pension with children".to_string(),
            Phase::SurvivorEmployee => "survivor employee pension".to_string(),
            Phase::FixedTermSurvivor => "survivor employee pension (fixed term)".to_string(),
            Phase::SurvivorSuspended => "survivor employee pension suspended".to_string(),
            Phase::SurvivorDisqualified => "no survivor entitlement".to_string(),
            Phase::FixedTermExpired => "fixed-term survivor pension ended".to_string(),
            Phase::Orphans => "survivor pension paid to children".to_string(),
            Phase::Disability => "disability pension".to_string(),
            Phase::OldAge { claim_age } => format!("old-age pension (claimed at {})", claim_age),
            Phase::DeferredOldAge { claim_age } => format!("deferred old-age pension (claimed at {})", claim_age),
            Phase::NoEntitlement => "no entitlement".to_string(),
        }
    }
}

/// Source of the flat-rate tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasicTier {
    None,
    Survivor { children: u32 },
    Orphan { children: u32 },
    Disability { level: DisabilityLevel, children: u32 },
    OldAge { claim_age: u32 },
}

/// Source of the derived (survivor or disability) earnings-proportional tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeTier {
    None,
    Survivor,
    Disability { level: DisabilityLevel, spousal_addition: bool },
}

/// Everything needed to price one age; equal selectors mean equal amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaSelector {
    pub phase: Phase,
    pub basic: BasicTier,
    pub employee: EmployeeTier,
    /// When set, the employee tier is `max(derived, own old-age employee at this claim age)`
    pub own_old_age_claim: Option<u32>,
    pub midlife_widow: bool,
}

impl FormulaSelector {
    fn nothing(phase: Phase) -> Self {
        Self {
            phase,
            basic: BasicTier::None,
            employee: EmployeeTier::None,
            own_old_age_claim: None,
            midlife_widow: false,
        }
    }

    pub fn label(&self) -> String {
        self.phase.label()
    }
}

/// Payment status of a survivor employee pension at one age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SurvivorStatus {
    Paid,
    FixedTerm,
    Suspended,
    Disqualified,
    Expired,
}

impl SurvivorStatus {
    fn is_paid(&self) -> bool {
        matches!(self, SurvivorStatus::Paid | SurvivorStatus::FixedTerm)
    }
}

/// Undeferred old-age amounts at one age, used by the deferral search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OldAgeParts {
    /// Survivor or disability employee tier still payable
    pub derived_employee: f64,
    /// Own old-age basic pension at the standard age
    pub own_basic: f64,
    /// Own old-age employee pension at the standard age
    pub own_employee: f64,
}

/// The scenario resolved to concrete people
#[derive(Debug, Clone, Copy)]
enum Case<'a> {
    Widowhood {
        survivor: &'a Person,
        deceased: &'a Person,
        survivor_role: Role,
    },
    Orphans {
        deceased: &'a Person,
    },
    Disabled {
        claimant: &'a Person,
        spouse: Option<&'a Person>,
        level: DisabilityLevel,
    },
    Unresolved {
        age: u32,
    },
}

/// Evaluator for one scenario
pub struct EligibilityEvaluator<'a> {
    assumptions: &'a Assumptions,
    scenario: &'a Scenario,
    case: Case<'a>,
}

impl<'a> EligibilityEvaluator<'a> {
    pub fn new(assumptions: &'a Assumptions, scenario: &'a Scenario) -> Self {
        let case = resolve_case(scenario);
        if let Case::Unresolved { .. } = case {
            log::warn!(
                "event {} does not match the household, evaluating as no entitlement",
                scenario.event.tag()
            );
        }
        Self {
            assumptions,
            scenario,
            case,
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.assumptions
    }

    pub fn scenario(&self) -> &Scenario {
        self.scenario
    }

    /// Subject's age today: the survivor, the disabled claimant, or the deceased for orphans
    pub fn current_age(&self) -> u32 {
        match self.case {
            Case::Widowhood { survivor, .. } => survivor.age,
            Case::Orphans { deceased } => deceased.age,
            Case::Disabled { claimant, .. } => claimant.age,
            Case::Unresolved { age } => age,
        }
    }

    pub fn terminal_age(&self) -> u32 {
        self.assumptions.rules.terminal_age
    }

    /// The subject's own old-age pensioner, if the scenario has one
    pub fn own_person(&self) -> Option<&'a Person> {
        match self.case {
            Case::Widowhood { survivor, .. } => Some(survivor),
            Case::Disabled { claimant, .. } => Some(claimant),
            Case::Orphans { .. } | Case::Unresolved { .. } => None,
        }
    }

    /// Adult whose work income continues after the event
    pub fn continuing_earner(&self) -> Option<&'a Person> {
        match self.case {
            Case::Widowhood { survivor, .. } => Some(survivor),
            Case::Disabled { spouse, .. } => spouse,
            Case::Orphans { .. } | Case::Unresolved { .. } => None,
        }
    }

    /// Elected old-age claim age, clamped into the permitted window
    pub fn claim_age(&self) -> Option<u32> {
        self.own_person()
            .map(|person| self.assumptions.rules.clamp_claim_age(person.claim_age))
    }

    /// Whether the standard-age tail can be handed to the deferral search
    pub fn claims_at_standard_age(&self) -> bool {
        self.claim_age() == Some(self.assumptions.rules.standard_claim_age)
    }

    // ========================================================================
    // SELECTORS
    // ========================================================================

    /// Benefit combination in force at `age` (ages before today evaluate as today)
    pub fn selector_at(&self, age: u32, plan: OldAgePlan) -> FormulaSelector {
        let age = age.max(self.current_age());
        let rules = &self.assumptions.rules;

        match self.case {
            Case::Unresolved { .. } => FormulaSelector::nothing(Phase::NoEntitlement),
            Case::Orphans { .. } => {
                let children = self.eligible_children(age);
                if children == 0 {
                    return FormulaSelector::nothing(Phase::NoEntitlement);
                }
                FormulaSelector {
                    phase: Phase::Orphans,
                    basic: BasicTier::Orphan { children },
                    employee: EmployeeTier::Survivor,
                    own_old_age_claim: None,
                    midlife_widow: false,
                }
            }
            Case::Widowhood { survivor_role, .. } => {
                let status = self.survivor_status(survivor_role, age);
                let employee = if status.is_paid() {
                    EmployeeTier::Survivor
                } else {
                    EmployeeTier::None
                };
                if let Some(selector) = self.old_age_selector(age, plan, employee) {
                    return selector;
                }

                let children = self.eligible_children(age);
                let basic = if children > 0 {
                    BasicTier::Survivor { children }
                } else {
                    BasicTier::None
                };
                // Revised mode keeps the current-mode gate, so the addition
                // ends with the fixed term.
                let midlife_widow = survivor_role == Role::Wife
                    && children == 0
                    && status.is_paid()
                    && age >= rules.midlife_start_age
                    && age < rules.midlife_end_age;
                let phase = if children > 0 {
                    Phase::SurvivorWithChildren
                } else {
                    match status {
                        SurvivorStatus::Paid => Phase::SurvivorEmployee,
                        SurvivorStatus::FixedTerm => Phase::FixedTermSurvivor,
                        SurvivorStatus::Suspended => Phase::SurvivorSuspended,
                        SurvivorStatus::Disqualified => Phase::SurvivorDisqualified,
                        SurvivorStatus::Expired => Phase::FixedTermExpired,
                    }
                };
                FormulaSelector {
                    phase,
                    basic,
                    employee,
                    own_old_age_claim: None,
                    midlife_widow,
                }
            }
            Case::Disabled { level, .. } => {
                let employee = EmployeeTier::Disability {
                    level,
                    spousal_addition: self.spousal_addition_payable(level, age),
                };
                if let Some(selector) = self.old_age_selector(age, plan, employee) {
                    return selector;
                }
                let children = if level.has_basic_tier() {
                    self.eligible_children(age)
                } else {
                    0
                };
                FormulaSelector {
                    phase: Phase::Disability,
                    basic: BasicTier::Disability { level, children },
                    employee,
                    own_old_age_claim: None,
                    midlife_widow: false,
                }
            }
        }
    }

    /// Old-age crossover selector, or None while still before the claim
    fn old_age_selector(&self, age: u32, plan: OldAgePlan, derived: EmployeeTier) -> Option<FormulaSelector> {
        let claim_age = self.claim_age()?;
        let standard = self.assumptions.rules.standard_claim_age;

        let crossover = |claim_age: u32| FormulaSelector {
            phase: Phase::OldAge { claim_age },
            basic: BasicTier::OldAge { claim_age },
            employee: derived,
            own_old_age_claim: Some(claim_age),
            midlife_widow: false,
        };

        match plan {
            OldAgePlan::Elected => (age >= claim_age).then(|| crossover(claim_age)),
            OldAgePlan::DeferralSwitch { switch_age } => {
                if age >= switch_age {
                    Some(FormulaSelector {
                        phase: Phase::DeferredOldAge { claim_age: switch_age },
                        basic: BasicTier::OldAge { claim_age: switch_age },
                        employee: EmployeeTier::None,
                        own_old_age_claim: Some(switch_age),
                        midlife_widow: false,
                    })
                } else if age >= standard {
                    Some(crossover(standard))
                } else {
                    None
                }
            }
        }
    }

    // ========================================================================
    // AMOUNTS
    // ========================================================================

    /// Price a selector
    pub fn amount(&self, selector: &FormulaSelector) -> BenefitResult {
        let f = Formulas::new(self.assumptions);

        let mut components = match selector.basic {
            BasicTier::None => BenefitComponents::default(),
            BasicTier::Survivor { children } => f.survivor_basic_components(children),
            BasicTier::Orphan { children } => f.orphan_basic_components(children),
            BasicTier::Disability { level, children } => f.disability_basic_components(level, children),
            BasicTier::OldAge { claim_age } => BenefitComponents {
                basic: f.deferral_adjust(f.old_age_basic(), claim_age),
                ..Default::default()
            },
        };

        let derived = self.derived_employee_components(selector.employee);
        let employee = match selector.own_old_age_claim {
            Some(claim_age) => {
                let own = self.own_old_age_employee(claim_age);
                if own > derived.total() {
                    BenefitComponents {
                        employee_proportional: own,
                        ..Default::default()
                    }
                } else {
                    derived
                }
            }
            None => derived,
        };
        components.employee_proportional = employee.employee_proportional;
        components.spousal_addition = employee.spousal_addition;

        if selector.midlife_widow {
            components.midlife_widow_addition = f.midlife_widow_addition();
        }

        BenefitResult::from_components(components)
    }

    /// Entitlement at `age` under `plan`
    pub fn evaluate(&self, age: u32, plan: OldAgePlan) -> BenefitResult {
        self.amount(&self.selector_at(age, plan))
    }

    /// Undeferred old-age amounts at `age`, or None when there is no own pensioner
    pub fn old_age_parts(&self, age: u32) -> Option<OldAgeParts> {
        let person = self.own_person()?;
        let f = Formulas::new(self.assumptions);
        let derived = match self.case {
            Case::Widowhood { survivor_role, .. } => {
                if self.survivor_status(survivor_role, age).is_paid() {
                    EmployeeTier::Survivor
                } else {
                    EmployeeTier::None
                }
            }
            Case::Disabled { level, .. } => EmployeeTier::Disability {
                level,
                spousal_addition: self.spousal_addition_payable(level, age),
            },
            Case::Orphans { .. } | Case::Unresolved { .. } => EmployeeTier::None,
        };
        Some(OldAgeParts {
            derived_employee: self.derived_employee_components(derived).total(),
            own_basic: f.old_age_basic(),
            own_employee: f.old_age_employee(person.avg_monthly_remuneration, person.enrolled_months as f64),
        })
    }

    fn derived_employee_components(&self, tier: EmployeeTier) -> BenefitComponents {
        let f = Formulas::new(self.assumptions);
        match (tier, self.case) {
            (EmployeeTier::Survivor, Case::Widowhood { deceased, .. })
            | (EmployeeTier::Survivor, Case::Orphans { deceased }) => BenefitComponents {
                employee_proportional: f.survivor_employee_proportional(
                    deceased.avg_monthly_remuneration,
                    deceased.enrolled_months as f64,
                    deceased.deemed_300,
                ),
                ..Default::default()
            },
            (EmployeeTier::Disability { level, spousal_addition }, Case::Disabled { claimant, .. }) => {
                let spousal = if spousal_addition { f.spousal_addition() } else { 0.0 };
                f.disability_employee_components(
                    level,
                    spousal,
                    claimant.avg_monthly_remuneration,
                    claimant.enrolled_months as f64,
                    claimant.deemed_300,
                )
            }
            _ => BenefitComponents::default(),
        }
    }

    fn own_old_age_employee(&self, claim_age: u32) -> f64 {
        let f = Formulas::new(self.assumptions);
        self.own_person()
            .map(|person| {
                f.deferral_adjust(
                    f.old_age_employee(person.avg_monthly_remuneration, person.enrolled_months as f64),
                    claim_age,
                )
            })
            .unwrap_or(0.0)
    }

    // ========================================================================
    // RULES
    // ========================================================================

    fn years_from_now(&self, age: u32) -> u32 {
        age.saturating_sub(self.current_age())
    }

    fn eligible_children(&self, age: u32) -> u32 {
        self.scenario
            .household
            .eligible_children_after(self.years_from_now(age), &self.assumptions.rules)
    }

    /// Subject age at which the last eligible child ages out (today if none)
    fn child_free_from(&self) -> u32 {
        self.current_age().saturating_add(
            self.scenario
                .household
                .years_until_children_age_out(&self.assumptions.rules),
        )
    }

    /// End of a fixed-term survivor employee pension, if one applies
    fn fixed_term_end(&self, survivor_role: Role) -> Option<u32> {
        let rules = &self.assumptions.rules;
        let start = self.child_free_from();
        let cutoff = match (self.scenario.policy, survivor_role) {
            (PolicyMode::Revised, _) => rules.revised_fixed_term_age,
            (PolicyMode::Current, Role::Wife) => rules.widow_fixed_term_age,
            (PolicyMode::Current, Role::Husband) => return None,
        };
        (start < cutoff).then(|| start.saturating_add(rules.fixed_term_years))
    }

    fn survivor_status(&self, survivor_role: Role, age: u32) -> SurvivorStatus {
        let rules = &self.assumptions.rules;
        if let Some(end) = self.fixed_term_end(survivor_role) {
            return if age < end {
                SurvivorStatus::FixedTerm
            } else {
                SurvivorStatus::Expired
            };
        }
        match (self.scenario.policy, survivor_role) {
            (PolicyMode::Current, Role::Husband) => {
                if self.current_age() < rules.widower_disqualification_age {
                    SurvivorStatus::Disqualified
                } else if age < rules.widower_resume_age {
                    SurvivorStatus::Suspended
                } else {
                    SurvivorStatus::Paid
                }
            }
            _ => SurvivorStatus::Paid,
        }
    }

    fn spousal_addition_payable(&self, level: DisabilityLevel, age: u32) -> bool {
        let Case::Disabled { spouse: Some(spouse), .. } = self.case else {
            return false;
        };
        level.has_basic_tier()
            && spouse.age_after(self.years_from_now(age)) < self.assumptions.rules.spousal_addition_end_age
    }

    // ========================================================================
    // BREAKPOINTS
    // ========================================================================

    /// Independent candidate breakpoint streams, before clipping and deduplication
    pub fn candidate_breakpoints(&self, plan: OldAgePlan) -> Vec<Breakpoint> {
        let rules = &self.assumptions.rules;
        let current = self.current_age();
        let mut out = vec![Breakpoint::new(current, BreakpointReason::CurrentAge)];

        for (index, child) in self.scenario.household.children.iter().enumerate() {
            if rules.child_eligible(child.age) {
                out.push(Breakpoint::new(
                    current.saturating_add(rules.child_cutoff_age - child.age),
                    BreakpointReason::ChildAgesOut(index),
                ));
            }
        }

        match self.case {
            Case::Widowhood { survivor_role, .. } => {
                for threshold in [
                    rules.midlife_start_age,
                    rules.widower_resume_age,
                    rules.midlife_end_age,
                    rules.latest_claim_age,
                ] {
                    out.push(Breakpoint::new(threshold, BreakpointReason::SelfThreshold(threshold)));
                }
                if let Some(end) = self.fixed_term_end(survivor_role) {
                    out.push(Breakpoint::new(end, BreakpointReason::FixedTermEnds));
                }
            }
            Case::Disabled { spouse: Some(spouse), .. } => {
                let end = rules.spousal_addition_end_age;
                if spouse.age < end {
                    out.push(Breakpoint::new(
                        current.saturating_add(end - spouse.age),
                        BreakpointReason::SpouseThreshold(end),
                    ));
                }
                let spouse_claim = rules.clamp_claim_age(spouse.claim_age);
                if spouse.age < spouse_claim {
                    out.push(Breakpoint::new(
                        current.saturating_add(spouse_claim - spouse.age),
                        BreakpointReason::SpouseClaim,
                    ));
                }
            }
            Case::Disabled { spouse: None, .. } | Case::Orphans { .. } | Case::Unresolved { .. } => {}
        }

        if let Some(claim_age) = self.claim_age() {
            match plan {
                OldAgePlan::Elected => {
                    out.push(Breakpoint::new(claim_age, BreakpointReason::OldAgeClaim));
                }
                OldAgePlan::DeferralSwitch { switch_age } => {
                    out.push(Breakpoint::new(rules.standard_claim_age, BreakpointReason::OldAgeClaim));
                    out.push(Breakpoint::new(switch_age, BreakpointReason::DeferralSwitch));
                }
            }
        }

        out.push(Breakpoint::new(rules.terminal_age, BreakpointReason::Terminal));
        out
    }

    /// Candidates after capping and clipping, for reporting
    pub fn breakpoints(&self, plan: OldAgePlan) -> Vec<Breakpoint> {
        breakpoints::clip(
            &self.candidate_breakpoints(plan),
            self.current_age(),
            self.claim_age(),
            self.terminal_age(),
        )
    }

    /// Ordered `(segment start age, selector)` pairs covering `[current age, terminal)`
    pub fn schedule(&self, plan: OldAgePlan) -> Vec<(u32, FormulaSelector)> {
        let candidates = self.candidate_breakpoints(plan);
        let starts = breakpoints::resolve(&candidates, self.current_age(), self.claim_age(), self.terminal_age());
        log::debug!("{} breakpoints for {}: {:?}", starts.len(), self.scenario.event.tag(), starts);

        starts
            .into_iter()
            .map(|age| (age, self.selector_at(age, plan)))
            .collect()
    }
}

fn resolve_case(scenario: &Scenario) -> Case<'_> {
    let household = &scenario.household;
    let resolved = match scenario.event {
        Event::SurvivorHusbandDies => household.by_role(Role::Wife).map(|(wife, husband)| Case::Widowhood {
            survivor: wife,
            deceased: husband,
            survivor_role: Role::Wife,
        }),
        Event::SurvivorWifeDies => household.by_role(Role::Husband).map(|(husband, wife)| Case::Widowhood {
            survivor: husband,
            deceased: wife,
            survivor_role: Role::Husband,
        }),
        Event::SurvivorSingle => household.single_adult().map(|deceased| Case::Orphans { deceased }),
        Event::DisabilityHusband(level) => household.by_role(Role::Husband).map(|(claimant, spouse)| Case::Disabled {
            claimant,
            spouse: Some(spouse),
            level,
        }),
        Event::DisabilityWife(level) => household.by_role(Role::Wife).map(|(claimant, spouse)| Case::Disabled {
            claimant,
            spouse: Some(spouse),
            level,
        }),
        Event::DisabilitySingle(level) => household.single_adult().map(|claimant| Case::Disabled {
            claimant,
            spouse: None,
            level,
        }),
    };

    resolved.unwrap_or_else(|| {
        let age = match &household.adults {
            Adults::Couple { husband, .. } => husband.age,
            Adults::Single(person) => person.age,
        };
        Case::Unresolved { age }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{Child, Household};
    use approx::assert_relative_eq;

    fn widow_scenario(wife_age: u32, children: Vec<Child>) -> Scenario {
        let husband = Person::new(wife_age + 3, 450_000.0, 300, true);
        let wife = Person::new(wife_age, 200_000.0, 60, false);
        Scenario::new(Event::SurvivorHusbandDies, Household::couple(husband, wife, children))
    }

    fn widower_scenario(husband_age: u32, children: Vec<Child>) -> Scenario {
        let husband = Person::new(husband_age, 350_000.0, 240, false);
        let wife = Person::new(husband_age - 2, 300_000.0, 200, true);
        Scenario::new(Event::SurvivorWifeDies, Household::couple(husband, wife, children))
    }

    #[test]
    fn test_revised_midlife_addition_ends_with_fixed_term() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = widow_scenario(50, vec![]).with_policy(PolicyMode::Revised);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        let during = evaluator.evaluate(54, OldAgePlan::Elected);
        assert_eq!(during.components.midlife_widow_addition, 623_800.0);
        assert!(during.components.employee_proportional > 0.0);

        let after = evaluator.evaluate(55, OldAgePlan::Elected);
        assert_eq!(after.total, 0.0);
    }

    #[test]
    fn test_widow_with_child_gets_basic_and_employee() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = widow_scenario(35, vec![Child::new(3)]);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);
        let f = Formulas::new(&assumptions);

        let result = evaluator.evaluate(35, OldAgePlan::Elected);
        let expected = f.survivor_basic(1) + f.survivor_employee_proportional(450_000.0, 300.0, true);
        assert_relative_eq!(result.total, expected, epsilon = 1e-6);
        assert_eq!(result.components.midlife_widow_addition, 0.0);
    }

    #[test]
    fn test_widow_after_children_gets_midlife_addition() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = widow_scenario(35, vec![Child::new(3)]);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        let selector = evaluator.selector_at(50, OldAgePlan::Elected);
        assert_eq!(selector.phase, Phase::SurvivorEmployee);
        assert!(selector.midlife_widow);
        assert_eq!(selector.basic, BasicTier::None);

        // The addition stops at the claim age
        assert!(!evaluator.selector_at(65, OldAgePlan::Elected).midlife_widow);
    }

    #[test]
    fn test_young_widow_fixed_term() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = widow_scenario(25, vec![]);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        assert_eq!(evaluator.selector_at(29, OldAgePlan::Elected).phase, Phase::FixedTermSurvivor);
        let ended = evaluator.selector_at(30, OldAgePlan::Elected);
        assert_eq!(ended.phase, Phase::FixedTermExpired);
        assert!(evaluator.amount(&ended).components.is_empty());
    }

    #[test]
    fn test_young_widow_whose_children_age_out_after_30_is_indefinite() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = widow_scenario(25, vec![Child::new(10)]);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        // Child ages out when the widow is 33
        assert_eq!(evaluator.selector_at(40, OldAgePlan::Elected).phase, Phase::SurvivorEmployee);
    }

    #[test]
    fn test_young_widower_disqualified() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = widower_scenario(40, vec![]);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        let result = evaluator.evaluate(40, OldAgePlan::Elected);
        assert_eq!(result.total, 0.0);
        assert!(result.components.is_empty());
        assert_eq!(evaluator.selector_at(62, OldAgePlan::Elected).phase, Phase::SurvivorDisqualified);
    }

    #[test]
    fn test_older_widower_suspended_until_60() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = widower_scenario(56, vec![]);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        assert_eq!(evaluator.selector_at(56, OldAgePlan::Elected).phase, Phase::SurvivorSuspended);
        assert_eq!(evaluator.evaluate(59, OldAgePlan::Elected).total, 0.0);
        let resumed = evaluator.evaluate(60, OldAgePlan::Elected);
        assert!(resumed.components.employee_proportional > 0.0);
        assert_eq!(resumed.components.midlife_widow_addition, 0.0);
    }

    #[test]
    fn test_revised_mode_fixed_term_for_both_sexes() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = widower_scenario(40, vec![]).with_policy(PolicyMode::Revised);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        assert_eq!(evaluator.selector_at(44, OldAgePlan::Elected).phase, Phase::FixedTermSurvivor);
        assert_eq!(evaluator.selector_at(45, OldAgePlan::Elected).phase, Phase::FixedTermExpired);

        let scenario = widow_scenario(50, vec![]).with_policy(PolicyMode::Revised);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);
        let during = evaluator.selector_at(52, OldAgePlan::Elected);
        assert!(during.midlife_widow);
        let after = evaluator.selector_at(55, OldAgePlan::Elected);
        assert_eq!(after.phase, Phase::FixedTermExpired);
        assert!(!after.midlife_widow);
    }

    #[test]
    fn test_disability_spousal_addition_until_spouse_65() {
        let assumptions = Assumptions::fiscal_2025();
        let husband = Person::new(50, 400_000.0, 300, true);
        let wife = Person::new(60, 150_000.0, 60, false);
        let scenario = Scenario::new(
            Event::DisabilityHusband(DisabilityLevel::Two),
            Household::couple(husband, wife, vec![]),
        );
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        assert_relative_eq!(evaluator.evaluate(54, OldAgePlan::Elected).components.spousal_addition, 239_300.0);
        assert_eq!(evaluator.evaluate(55, OldAgePlan::Elected).components.spousal_addition, 0.0);
        assert!(evaluator
            .candidate_breakpoints(OldAgePlan::Elected)
            .contains(&Breakpoint::new(55, BreakpointReason::SpouseThreshold(65))));
    }

    #[test]
    fn test_disability_level3_single() {
        let assumptions = Assumptions::fiscal_2025();
        let person = Person::new(45, 400_000.0, 200, false);
        let scenario = Scenario::new(
            Event::DisabilitySingle(DisabilityLevel::Three),
            Household::single(person, vec![Child::new(4)]),
        );
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        let result = evaluator.evaluate(45, OldAgePlan::Elected);
        assert_eq!(result.components.basic, 0.0);
        assert_eq!(result.components.child_addition, 0.0);
        let computed = 400_000.0 * 200.0 * 0.005481;
        assert_relative_eq!(result.components.employee_proportional, f64::max(computed, 623_800.0));
    }

    #[test]
    fn test_old_age_crossover_takes_larger_employee_tier() {
        let assumptions = Assumptions::fiscal_2025();
        let f = Formulas::new(&assumptions);
        let scenario = widow_scenario(35, vec![Child::new(3)]);
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        let result = evaluator.evaluate(70, OldAgePlan::Elected);
        let survivor = f.survivor_employee_proportional(450_000.0, 300.0, true);
        let own = f.old_age_employee(200_000.0, 60.0);
        assert!(survivor > own);
        assert_relative_eq!(result.components.employee_proportional, survivor, epsilon = 1e-6);
        assert_relative_eq!(result.components.basic, 831_700.0);
        assert_eq!(result.components.child_addition, 0.0);
    }

    #[test]
    fn test_early_claim_caps_pre_old_age_breakpoints() {
        let assumptions = Assumptions::fiscal_2025();
        let husband = Person::new(58, 450_000.0, 300, true);
        let wife = Person::new(55, 200_000.0, 60, false).with_claim_age(60);
        let scenario = Scenario::new(
            Event::SurvivorHusbandDies,
            Household::couple(husband, wife, vec![]),
        );
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        let starts: Vec<u32> = evaluator.schedule(OldAgePlan::Elected).iter().map(|(age, _)| *age).collect();
        assert_eq!(starts, vec![55, 60]);
        let old_age = evaluator.evaluate(60, OldAgePlan::Elected);
        assert_relative_eq!(old_age.components.basic, 831_700.0 * 0.76, epsilon = 1e-6);
    }

    #[test]
    fn test_orphans_paid_until_children_age_out() {
        let assumptions = Assumptions::fiscal_2025();
        let parent = Person::new(42, 380_000.0, 180, true);
        let scenario = Scenario::new(
            Event::SurvivorSingle,
            Household::single(parent, vec![Child::new(12), Child::new(15)]),
        );
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);
        let f = Formulas::new(&assumptions);

        assert_relative_eq!(evaluator.evaluate(42, OldAgePlan::Elected).components.basic, 831_700.0);
        assert_relative_eq!(evaluator.evaluate(42, OldAgePlan::Elected).components.child_addition, 239_300.0);
        assert_relative_eq!(
            evaluator.evaluate(45, OldAgePlan::Elected).total,
            f.orphan_basic(1) + f.survivor_employee_proportional(380_000.0, 180.0, true),
            epsilon = 1e-6
        );
        assert_eq!(evaluator.evaluate(48, OldAgePlan::Elected).total, 0.0);
        assert_eq!(evaluator.claim_age(), None);
    }

    #[test]
    fn test_mismatched_event_is_zero() {
        let assumptions = Assumptions::fiscal_2025();
        let scenario = Scenario::new(
            Event::SurvivorHusbandDies,
            Household::single(Person::new(40, 300_000.0, 200, false), vec![Child::new(2)]),
        );
        let evaluator = EligibilityEvaluator::new(&assumptions, &scenario);

        assert_eq!(evaluator.current_age(), 40);
        assert_eq!(evaluator.evaluate(50, OldAgePlan::Elected), BenefitResult::zero());
    }
}
