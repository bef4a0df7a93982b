use crate::core::similarity::intersects;
use crate::models::{
    Acceptance, Category, FilterCheck, FilterPolicy, LocationGranularity, Profile, Rejection,
};

/// Checks in evaluation order
pub const ALL_CHECKS: [FilterCheck; 6] = [
    FilterCheck::Orientation,
    FilterCheck::Age,
    FilterCheck::Location,
    FilterCheck::MaritalStatus,
    FilterCheck::Children,
    FilterCheck::Dealbreaker,
];

/// Result of running every hard-filter check over a pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    rejections: Vec<Rejection>,
}

impl FilterOutcome {
    pub fn passed(&self) -> bool {
        self.rejections.is_empty()
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    pub fn into_rejections(self) -> Vec<Rejection> {
        self.rejections
    }

    pub fn failed(&self, check: FilterCheck) -> bool {
        self.rejections.iter().any(|r| r.check == check)
    }
}

/// Hard-filter gate under the default policy
///
/// Returns `false` if any categorical check fails in either direction.
/// Unknown or missing fields fail their check.
pub fn hard_filter_pass(a: &Profile, b: &Profile) -> bool {
    hard_filter_pass_with(a, b, &FilterPolicy::default())
}

/// Hard-filter gate under an explicit policy; stops at the first failing check
#[inline]
pub fn hard_filter_pass_with(a: &Profile, b: &Profile, policy: &FilterPolicy) -> bool {
    ALL_CHECKS
        .iter()
        .all(|check| run_check(*check, a, b, policy).is_none())
}

/// Run every check and collect the reasons for each failure
pub fn evaluate_hard_filter(a: &Profile, b: &Profile, policy: &FilterPolicy) -> FilterOutcome {
    let rejections = ALL_CHECKS
        .iter()
        .filter_map(|check| {
            run_check(*check, a, b, policy).map(|reason| Rejection {
                check: *check,
                reason,
            })
        })
        .collect();

    FilterOutcome { rejections }
}

/// `None` when the check passes, otherwise the rejection reason
fn run_check(
    check: FilterCheck,
    a: &Profile,
    b: &Profile,
    policy: &FilterPolicy,
) -> Option<String> {
    match check {
        FilterCheck::Orientation => check_acceptance(
            "orientation",
            (a, &a.orientation, &a.desired_partner_orientation),
            (b, &b.orientation, &b.desired_partner_orientation),
        ),
        FilterCheck::Age => check_age(a, b, policy.reference_year),
        FilterCheck::Location => check_location(a, b, policy.location_granularity),
        FilterCheck::MaritalStatus => check_acceptance(
            "marital status",
            (a, &a.marital_status, &a.desired_partner_marital_status),
            (b, &b.marital_status, &b.desired_partner_marital_status),
        ),
        FilterCheck::Children => check_acceptance(
            "children status",
            (a, &a.has_children, &a.desired_partner_children_status),
            (b, &b.has_children, &b.desired_partner_children_status),
        ),
        FilterCheck::Dealbreaker => check_dealbreakers(a, b),
    }
}

fn describe(category: &Category) -> &str {
    match category {
        Category::Any => "any",
        Category::Known(label) => label,
        Category::Unknown => "unknown",
    }
}

/// Each side's own value must be accepted by the other side
fn check_acceptance(
    field: &str,
    (a, a_value, a_wants): (&Profile, &Category, &Acceptance),
    (b, b_value, b_wants): (&Profile, &Category, &Acceptance),
) -> Option<String> {
    if !b_wants.accepts(a_value) {
        return Some(format!(
            "{} of {} ({}) not accepted by {}",
            field,
            a.user_id,
            describe(a_value),
            b.user_id
        ));
    }
    if !a_wants.accepts(b_value) {
        return Some(format!(
            "{} of {} ({}) not accepted by {}",
            field,
            b.user_id,
            describe(b_value),
            a.user_id
        ));
    }
    None
}

fn check_age(a: &Profile, b: &Profile, reference_year: i32) -> Option<String> {
    age_within(a, b, reference_year).or_else(|| age_within(b, a, reference_year))
}

/// Whether `subject`'s age falls in `chooser`'s desired range
fn age_within(subject: &Profile, chooser: &Profile, reference_year: i32) -> Option<String> {
    let Some(age) = subject.age_at(reference_year) else {
        return Some(format!("age of {} unknown", subject.user_id));
    };
    let Some(range) = chooser.desired_partner_age_range else {
        return Some(format!("desired age range of {} unknown", chooser.user_id));
    };

    if range.contains(age) {
        None
    } else {
        Some(format!(
            "age {} of {} outside {}-{} wanted by {}",
            age, subject.user_id, range.min, range.max, chooser.user_id
        ))
    }
}

/// Missing location data never counts as the same place
fn same_location(a: &Profile, b: &Profile, granularity: LocationGranularity) -> bool {
    let same_province = matches!(
        (&a.province, &b.province),
        (Some(pa), Some(pb)) if pa == pb
    );

    match granularity {
        LocationGranularity::Province => same_province,
        LocationGranularity::City => {
            let same_city = matches!((&a.city, &b.city), (Some(ca), Some(cb)) if ca == cb);
            let provinces_conflict = matches!(
                (&a.province, &b.province),
                (Some(pa), Some(pb)) if pa != pb
            );
            same_city && !provinces_conflict
        }
    }
}

fn check_location(a: &Profile, b: &Profile, granularity: LocationGranularity) -> Option<String> {
    if same_location(a, b, granularity) {
        return None;
    }

    let refusing: Vec<&str> = [a, b]
        .into_iter()
        .filter(|p| !p.accepts_long_distance)
        .map(|p| p.user_id.as_str())
        .collect();

    if refusing.is_empty() {
        None
    } else {
        Some(format!(
            "different locations and long distance refused by {}",
            refusing.join(", ")
        ))
    }
}

fn check_dealbreakers(a: &Profile, b: &Profile) -> Option<String> {
    for (chooser, other) in [(a, b), (b, a)] {
        if intersects(&chooser.dealbreaker_tags, &other.personal_traits) {
            let hits: Vec<&str> = chooser
                .dealbreaker_tags
                .intersection(&other.personal_traits)
                .map(String::as_str)
                .collect();
            return Some(format!(
                "{} has dealbreaker traits of {}: {}",
                other.user_id,
                chooser.user_id,
                hits.join(", ")
            ));
        }
    }
    None
}
