//! Policy-linked records: claims and renewals.

use crate::dates::deserialize_calendar_date;
use crate::model::validation::{require_non_negative, require_text, ModelValidationError};
use crate::model::Kes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type ClaimId = String;
pub type RenewalId = String;

/// Line of business a policy belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyType {
    Auto,
    Home,
    Health,
    Life,
    #[serde(rename = "WIBA")]
    Wiba,
    #[serde(rename = "Bid Bond")]
    BidBond,
    Fire,
    Burglary,
}

impl PolicyType {
    pub const ALL: [PolicyType; 8] = [
        PolicyType::Auto,
        PolicyType::Home,
        PolicyType::Health,
        PolicyType::Life,
        PolicyType::Wiba,
        PolicyType::BidBond,
        PolicyType::Fire,
        PolicyType::Burglary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Home => "Home",
            Self::Health => "Health",
            Self::Life => "Life",
            Self::Wiba => "WIBA",
            Self::BidBond => "Bid Bond",
            Self::Fire => "Fire",
            Self::Burglary => "Burglary",
        }
    }
}

impl Display for PolicyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PolicyType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown policy type `{needle}`"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::Paid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Paid => "PAID",
        }
    }

    /// Claims still being worked on.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

impl Display for ClaimStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown claim status `{needle}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: ClaimId,
    pub policy_holder: String,
    pub policy_number: String,
    pub amount: Kes,
    pub status: ClaimStatus,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
}

impl Claim {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("claim.id", &self.id)?;
        require_text("claim.policyNumber", &self.policy_number)?;
        require_non_negative("claim.amount", self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenewalStatus {
    Upcoming,
    Processing,
    AwaitingPayment,
    Paid,
    Overdue,
}

impl RenewalStatus {
    pub const ALL: [RenewalStatus; 5] = [
        RenewalStatus::Upcoming,
        RenewalStatus::Processing,
        RenewalStatus::AwaitingPayment,
        RenewalStatus::Paid,
        RenewalStatus::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "UPCOMING",
            Self::Processing => "PROCESSING",
            Self::AwaitingPayment => "AWAITING_PAYMENT",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
        }
    }

    /// Human label, e.g. `AWAITING PAYMENT`.
    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Renewals that still need the client to renew.
    pub fn is_due(self) -> bool {
        matches!(self, Self::Upcoming | Self::Overdue)
    }
}

impl Display for RenewalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenewalStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&needle))
            .ok_or_else(|| format!("unknown renewal status `{}`", value.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renewal {
    pub id: RenewalId,
    pub client_name: String,
    pub policy_number: String,
    pub premium: Kes,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub due_date: NaiveDate,
    pub status: RenewalStatus,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
}

impl Renewal {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("renewal.id", &self.id)?;
        require_text("renewal.policyNumber", &self.policy_number)?;
        require_non_negative("renewal.premium", self.premium)
    }
}
