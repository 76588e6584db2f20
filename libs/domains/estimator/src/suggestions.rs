//! Rule-based optimization suggestions.
//!
//! Suggestions come from a fixed table evaluated top to bottom. Every row
//! whose condition holds contributes its message; it is not a first-match
//! switch. New advice is a new row in [`RULES`].

use crate::models::{BillingCadence, Profile};
use crate::projector::monthly_hours;

/// Region whose rates every other region is compared against.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Usage above which committing to reserved capacity pays off.
pub const RESERVED_CAPACITY_HOURS: f64 = 500.0;

/// When a row applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Service matches and usage is strictly above the threshold
    ServiceAbove { service: &'static str, hours: f64 },
    /// Service matches and usage is at or below the threshold
    ServiceAtMost { service: &'static str, hours: f64 },
    /// Service matches regardless of usage
    Service(&'static str),
    /// No service row matched for this service
    UnrecognizedService,
    /// Request targets a region other than [`DEFAULT_REGION`]
    OutsideDefaultRegion,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub when: Condition,
    pub message: &'static str,
}

pub static RULES: &[Rule] = &[
    Rule {
        when: Condition::ServiceAbove {
            service: "EC2",
            hours: RESERVED_CAPACITY_HOURS,
        },
        message: "Consider Reserved Instances or Savings Plans to reduce EC2 cost.",
    },
    Rule {
        when: Condition::ServiceAtMost {
            service: "EC2",
            hours: RESERVED_CAPACITY_HOURS,
        },
        message: "Use Spot Instances for short workloads.",
    },
    Rule {
        when: Condition::Service("S3"),
        message: "Enable S3 Intelligent-Tiering for infrequent access data.",
    },
    Rule {
        when: Condition::Service("Lambda"),
        message: "Optimize function memory size for best cost-performance ratio.",
    },
    Rule {
        when: Condition::Service("RDS"),
        message: "Use Aurora Serverless if your DB workload is variable.",
    },
    Rule {
        when: Condition::UnrecognizedService,
        message: "Enable Cost Explorer to analyze detailed usage patterns.",
    },
    Rule {
        when: Condition::OutsideDefaultRegion,
        message: "Consider deploying in us-east-1 region for lower base rates.",
    },
];

/// What the advice is about.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// A single service with its usage hours
    Service { name: &'a str, usage_hours: f64 },
    /// Every distinct service of a profile
    Profile(&'a Profile),
}

/// Returns the ordered suggestions for `subject` deployed in `region`.
///
/// For a profile, service rows are evaluated once per distinct service in
/// order of first appearance, with the usage hours of all its hourly
/// components summed (monthly-billed components count as zero hours). The
/// region row is evaluated once, last. Duplicate messages are dropped.
pub fn suggest(subject: Subject<'_>, region: &str) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    match subject {
        Subject::Service { name, usage_hours } => {
            service_suggestions(name, usage_hours, &mut suggestions);
        }
        Subject::Profile(profile) => {
            for (service, hours) in usage_by_service(profile) {
                service_suggestions(service, hours, &mut suggestions);
            }
        }
    }

    for rule in RULES {
        if matches!(rule.when, Condition::OutsideDefaultRegion) && region != DEFAULT_REGION {
            push_unique(&mut suggestions, rule.message);
        }
    }

    suggestions
}

fn service_suggestions(service: &str, usage_hours: f64, out: &mut Vec<String>) {
    let mut matched = false;

    for rule in RULES {
        let applies = match rule.when {
            Condition::ServiceAbove { service: s, hours } => s == service && usage_hours > hours,
            Condition::ServiceAtMost { service: s, hours } => s == service && usage_hours <= hours,
            Condition::Service(s) => s == service,
            Condition::UnrecognizedService => !matched,
            Condition::OutsideDefaultRegion => false,
        };

        if applies {
            if !matches!(rule.when, Condition::UnrecognizedService) {
                matched = true;
            }
            push_unique(out, rule.message);
        }
    }
}

fn usage_by_service(profile: &Profile) -> Vec<(&str, f64)> {
    let mut usage: Vec<(&str, f64)> = Vec::new();

    for component in &profile.components {
        let hours = match component.billing_cadence {
            BillingCadence::Hourly => monthly_hours(component.units),
            BillingCadence::Monthly => 0.0,
        };

        match usage.iter_mut().find(|(service, _)| *service == component.service) {
            Some((_, total)) => *total += hours,
            None => usage.push((component.service.as_str(), hours)),
        }
    }

    usage
}

fn push_unique(out: &mut Vec<String>, message: &str) {
    if !out.iter().any(|existing| existing == message) {
        out.push(message.to_string());
    }
}
