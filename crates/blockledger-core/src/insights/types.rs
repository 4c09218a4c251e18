//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every advisory the oracle can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Net worth is zero
    StartJourney,
    /// Chests exist but no quests
    FirstQuest,
    /// Too few log entries to read patterns
    BuildLog,
    /// Recent income deposits
    IncomeStreak,
    /// At least one quest complete
    QuestMaster,
    /// Sizable net worth with nothing invested
    InvestmentOpportunity,
    /// Nothing else to say
    AllSystemsGreen,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::StartJourney => "start_journey",
            InsightType::FirstQuest => "first_quest",
            InsightType::BuildLog => "build_log",
            InsightType::IncomeStreak => "income_streak",
            InsightType::QuestMaster => "quest_master",
            InsightType::InvestmentOpportunity => "investment_opportunity",
            InsightType::AllSystemsGreen => "all_systems_green",
        }
    }

    /// Title shown for this advisory
    pub fn title(&self) -> &'static str {
        match self {
            InsightType::StartJourney => "Start Your Journey",
            InsightType::FirstQuest => "Set Your First Quest",
            InsightType::BuildLog => "Build Your Adventure Log",
            InsightType::IncomeStreak => "Income Streak",
            InsightType::QuestMaster => "Quest Master",
            InsightType::InvestmentOpportunity => "Investment Opportunity",
            InsightType::AllSystemsGreen => "All Systems Green",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start_journey" => Ok(InsightType::StartJourney),
            "first_quest" => Ok(InsightType::FirstQuest),
            "build_log" => Ok(InsightType::BuildLog),
            "income_streak" => Ok(InsightType::IncomeStreak),
            "quest_master" => Ok(InsightType::QuestMaster),
            "investment_opportunity" => Ok(InsightType::InvestmentOpportunity),
            "all_systems_green" => Ok(InsightType::AllSystemsGreen),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// An advisory record produced by the oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule that produced this finding
    pub insight_type: InsightType,
    /// Short title (e.g., "Income Streak")
    pub title: String,
    /// One or two sentences of advice
    pub text: String,
    /// Rule-specific structured data (counts, amounts)
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}

impl Finding {
    /// Create a finding titled after its insight type
    pub fn new(insight_type: InsightType, text: impl Into<String>) -> Self {
        Self {
            insight_type,
            title: insight_type.title().to_string(),
            text: text.into(),
            data: serde_json::Value::Null,
        }
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
