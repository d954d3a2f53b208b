//! Shared domain enums for visit records
//!
//! The backing table stores these as their display labels; the enums exist to
//! validate submitted values and to bind status predicates without repeating
//! string literals.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// VisitStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a visit record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VisitStatus {
    Pending,
    CheckedIn,
    CheckedOut,
}

impl VisitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Pending => "Pending",
            VisitStatus::CheckedIn => "CheckedIn",
            VisitStatus::CheckedOut => "CheckedOut",
        }
    }
}

impl FromStr for VisitStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(VisitStatus::Pending),
            "CheckedIn" => Ok(VisitStatus::CheckedIn),
            "CheckedOut" => Ok(VisitStatus::CheckedOut),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VisitorType
// ---------------------------------------------------------------------------

/// Category of visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VisitorType {
    Contractor,
    Family,
    #[serde(rename = "Food Delivery")]
    FoodDelivery,
    Meeting,
    Vendor,
}

impl VisitorType {
    pub const ALL: [VisitorType; 5] = [
        VisitorType::Contractor,
        VisitorType::Family,
        VisitorType::FoodDelivery,
        VisitorType::Meeting,
        VisitorType::Vendor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorType::Contractor => "Contractor",
            VisitorType::Family => "Family",
            VisitorType::FoodDelivery => "Food Delivery",
            VisitorType::Meeting => "Meeting",
            VisitorType::Vendor => "Vendor",
        }
    }
}

impl FromStr for VisitorType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for VisitorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// Physical branch location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Branch {
    #[serde(rename = "Kiln Creek")]
    KilnCreek,
    #[serde(rename = "1A University")]
    UniversityOneA,
}

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::KilnCreek, Branch::UniversityOneA];

    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::KilnCreek => "Kiln Creek",
            Branch::UniversityOneA => "1A University",
        }
    }
}

impl FromStr for Branch {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// Department being visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Department {
    #[serde(rename = "1AU")]
    OneAU,
    #[serde(rename = "Advantage Financial")]
    AdvantageFinancial,
    #[serde(rename = "Business Development")]
    BusinessDevelopment,
    #[serde(rename = "Business Services")]
    BusinessServices,
    Compliance,
    #[serde(rename = "Consumer Lending")]
    ConsumerLending,
    #[serde(rename = "Debt Resolution")]
    DebtResolution,
    #[serde(rename = "Deposit Operations")]
    DepositOperations,
    #[serde(rename = "E-Branch")]
    EBranch,
    Executives,
    Facilities,
    #[serde(rename = "Financial Accounting")]
    FinancialAccounting,
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "Internal Audit")]
    InternalAudit,
    Marketing,
    Mortgages,
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "Project Management")]
    ProjectManagement,
    Retail,
    Technology,
    Training,
}

impl Department {
    pub const ALL: [Department; 21] = [
        Department::OneAU,
        Department::AdvantageFinancial,
        Department::BusinessDevelopment,
        Department::BusinessServices,
        Department::Compliance,
        Department::ConsumerLending,
        Department::DebtResolution,
        Department::DepositOperations,
        Department::EBranch,
        Department::Executives,
        Department::Facilities,
        Department::FinancialAccounting,
        Department::HumanResources,
        Department::InternalAudit,
        Department::Marketing,
        Department::Mortgages,
        Department::NotApplicable,
        Department::ProjectManagement,
        Department::Retail,
        Department::Technology,
        Department::Training,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::OneAU => "1AU",
            Department::AdvantageFinancial => "Advantage Financial",
            Department::BusinessDevelopment => "Business Development",
            Department::BusinessServices => "Business Services",
            Department::Compliance => "Compliance",
            Department::ConsumerLending => "Consumer Lending",
            Department::DebtResolution => "Debt Resolution",
            Department::DepositOperations => "Deposit Operations",
            Department::EBranch => "E-Branch",
            Department::Executives => "Executives",
            Department::Facilities => "Facilities",
            Department::FinancialAccounting => "Financial Accounting",
            Department::HumanResources => "Human Resources",
            Department::InternalAudit => "Internal Audit",
            Department::Marketing => "Marketing",
            Department::Mortgages => "Mortgages",
            Department::NotApplicable => "N/A",
            Department::ProjectManagement => "Project Management",
            Department::Retail => "Retail",
            Department::Technology => "Technology",
            Department::Training => "Training",
        }
    }
}

impl FromStr for Department {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [VisitStatus::Pending, VisitStatus::CheckedIn, VisitStatus::CheckedOut] {
            assert_eq!(status.as_str().parse::<VisitStatus>(), Ok(status));
        }
        assert!("Checked In".parse::<VisitStatus>().is_err());
    }

    #[test]
    fn test_visitor_type_labels() {
        assert_eq!("Food Delivery".parse::<VisitorType>(), Ok(VisitorType::FoodDelivery));
        assert_eq!(VisitorType::FoodDelivery.to_string(), "Food Delivery");
        assert!("Delivery".parse::<VisitorType>().is_err());
    }

    #[test]
    fn test_branch_labels() {
        assert_eq!("1A University".parse::<Branch>(), Ok(Branch::UniversityOneA));
        assert_eq!(Branch::KilnCreek.to_string(), "Kiln Creek");
    }

    #[test]
    fn test_department_labels() {
        assert_eq!(Department::ALL.len(), 21);
        assert_eq!("E-Branch".parse::<Department>(), Ok(Department::EBranch));
        assert_eq!("N/A".parse::<Department>(), Ok(Department::NotApplicable));
        assert!("Engineering".parse::<Department>().is_err());
    }
}
