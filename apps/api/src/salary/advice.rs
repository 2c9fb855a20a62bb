//! Verdict text for a salary comparison: headline, summary, next step and
//! experience-specific recommendations.

use serde::{Deserialize, Serialize};

use crate::salary::estimator::{ComparisonResult, PercentileBucket};
use crate::salary::experience::ExperienceLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub headline: String,
    pub message: String,
    pub next_step: String,
    pub recommendations: Vec<String>,
}

struct Tips {
    underpaid: [&'static str; 5],
    fair: [&'static str; 5],
}

const ENTRY_TIPS: Tips = Tips {
    underpaid: [
        "Focus on building core skills and gaining certifications",
        "Document your learning progress and early achievements",
        "Consider switching companies for better entry-level opportunities",
        "Network with professionals in your field for mentorship",
        "Look for companies known for investing in junior talent",
    ],
    fair: [
        "Continue building your skill foundation",
        "Seek out stretch assignments and new responsibilities",
        "Find a mentor to guide your career development",
        "Start building your professional network",
        "Focus on learning rather than just earning in early career",
    ],
};

const MID_TIPS: Tips = Tips {
    underpaid: [
        "Research market rates for your role and experience level",
        "Document your achievements and quantifiable impact",
        "Consider asking for a salary review with your manager",
        "Explore opportunities at other companies",
        "Invest in specialized skills to increase your value",
    ],
    fair: [
        "Continue developing your skills for future growth",
        "Consider total compensation beyond base salary",
        "Explore leadership or specialized roles",
        "Build expertise in high-demand areas",
        "Start considering your next career level",
    ],
};

const SENIOR_TIPS: Tips = Tips {
    underpaid: [
        "Leverage your experience to negotiate better compensation",
        "Highlight your leadership and mentoring contributions",
        "Consider senior roles at companies that value experience",
        "Explore consulting or contract opportunities",
        "Document your strategic impact on business outcomes",
    ],
    fair: [
        "Focus on strategic leadership and business impact",
        "Consider executive education or advanced certifications",
        "Explore opportunities to lead larger teams or projects",
        "Build relationships with executive leadership",
        "Consider transitioning to management or specialized expert roles",
    ],
};

const EXPERT_TIPS: Tips = Tips {
    underpaid: [
        "Your expertise should command premium compensation",
        "Consider executive or principal-level roles",
        "Explore opportunities at companies that value senior talent",
        "Consider consulting, advisory, or board positions",
        "Negotiate for equity, bonuses, and comprehensive benefits",
    ],
    fair: [
        "Focus on strategic vision and organizational impact",
        "Consider C-level or VP opportunities",
        "Explore board positions or advisory roles",
        "Mentor the next generation of leaders",
        "Consider starting your own venture or consulting practice",
    ],
};

fn tips_for(level: ExperienceLevel) -> &'static Tips {
    match level {
        ExperienceLevel::Entry => &ENTRY_TIPS,
        ExperienceLevel::Mid => &MID_TIPS,
        ExperienceLevel::Senior => &SENIOR_TIPS,
        ExperienceLevel::Expert => &EXPERT_TIPS,
    }
}

/// Five recommendations for the level and outcome.
pub fn recommendations(level: ExperienceLevel, is_underpaid: bool) -> Vec<String> {
    let tips = tips_for(level);
    let list = if is_underpaid { &tips.underpaid } else { &tips.fair };
    list.iter().map(|tip| tip.to_string()).collect()
}

pub fn next_step(result: &ComparisonResult) -> &'static str {
    match (result.is_underpaid, result.percentile_bucket) {
        (true, bucket) if bucket <= PercentileBucket::P10 => {
            "Your salary is significantly below market rate. Consider immediate action to address this gap."
        }
        (true, _) => {
            "Schedule a conversation with your manager about salary adjustment opportunities."
        }
        (false, bucket) if bucket >= PercentileBucket::P75 => {
            "You're earning well above average. Focus on career growth and skill development."
        }
        (false, _) => {
            "You're earning fairly. Consider opportunities for advancement or skill enhancement."
        }
    }
}

/// Builds the full verdict. Unrecognised experience levels read as mid-level.
pub fn build_verdict(result: &ComparisonResult, experience_level: &str) -> Verdict {
    let level = ExperienceLevel::parse(experience_level).unwrap_or_default();
    let percentile = result.percentile_bucket.value();

    let (headline, message) = if result.is_underpaid {
        (
            "Yes, you may be underpaid",
            format!(
                "Based on government salary data for {} professionals, you earn less than 75% of people in similar roles in your area. Your salary is in the {percentile}th percentile.",
                level.label()
            ),
        )
    } else {
        (
            "No, you are making average or above-average salary",
            format!(
                "Based on government salary data for {} professionals, you are earning at or above the average salary for your position and location. Your salary is in the {percentile}th percentile.",
                level.label()
            ),
        )
    };

    Verdict {
        headline: headline.to_string(),
        message,
        next_step: next_step(result).to_string(),
        recommendations: recommendations(level, result.is_underpaid),
    }
}
