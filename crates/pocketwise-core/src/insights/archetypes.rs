//! Category archetypes and the budget recommendation table
//!
//! Declaration order is significant: classification is first-match, so an
//! ambiguous label (say, "car insurance") resolves to whichever archetype is
//! declared first. Do not reorder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recommended spending band, in percent of income
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether a percentage sits inside the band (inclusive on both ends)
    pub fn contains(&self, percentage: f64) -> bool {
        percentage >= self.min && percentage <= self.max
    }
}

/// Fixed set of spending archetypes a category label can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryArchetype {
    Housing,
    Groceries,
    EatingOut,
    Transportation,
    Utilities,
    PhoneInternet,
    Shopping,
    Entertainment,
    Coffee,
    Subscriptions,
    HealthMedical,
    Education,
    Insurance,
    DebtPayments,
    HouseholdSupplies,
    Pets,
    GiftsDonations,
    Travel,
    PersonalCare,
    RepairsMaintenance,
    Saving,
}

impl CategoryArchetype {
    /// All archetypes in declaration (matching) order
    pub const ALL: [CategoryArchetype; 21] = [
        Self::Housing,
        Self::Groceries,
        Self::EatingOut,
        Self::Transportation,
        Self::Utilities,
        Self::PhoneInternet,
        Self::Shopping,
        Self::Entertainment,
        Self::Coffee,
        Self::Subscriptions,
        Self::HealthMedical,
        Self::Education,
        Self::Insurance,
        Self::DebtPayments,
        Self::HouseholdSupplies,
        Self::Pets,
        Self::GiftsDonations,
        Self::Travel,
        Self::PersonalCare,
        Self::RepairsMaintenance,
        Self::Saving,
    ];

    pub fn all() -> &'static [CategoryArchetype] {
        &Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Groceries => "groceries",
            Self::EatingOut => "eating_out",
            Self::Transportation => "transportation",
            Self::Utilities => "utilities",
            Self::PhoneInternet => "phone_internet",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Coffee => "coffee",
            Self::Subscriptions => "subscriptions",
            Self::HealthMedical => "health_medical",
            Self::Education => "education",
            Self::Insurance => "insurance",
            Self::DebtPayments => "debt_payments",
            Self::HouseholdSupplies => "household_supplies",
            Self::Pets => "pets",
            Self::GiftsDonations => "gifts_donations",
            Self::Travel => "travel",
            Self::PersonalCare => "personal_care",
            Self::RepairsMaintenance => "repairs_maintenance",
            Self::Saving => "saving",
        }
    }

    /// Human-readable name used in insight titles and messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Housing => "Housing / Rent / Mortgage",
            Self::Groceries => "Groceries / Food",
            Self::EatingOut => "Eating Out",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities / Bills",
            Self::PhoneInternet => "Phone & Internet",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Coffee => "Coffee",
            Self::Subscriptions => "Subscriptions",
            Self::HealthMedical => "Health/Medical",
            Self::Education => "Education",
            Self::Insurance => "Insurance",
            Self::DebtPayments => "Debt Payments",
            Self::HouseholdSupplies => "Household Supplies",
            Self::Pets => "Pets",
            Self::GiftsDonations => "Gifts/Donations",
            Self::Travel => "Travel",
            Self::PersonalCare => "Personal Care",
            Self::RepairsMaintenance => "Repairs/Maintenance",
            Self::Saving => "Savings/Investments",
        }
    }

    /// Recommended share of income for this archetype
    pub fn band(&self) -> Band {
        match self {
            Self::Housing => Band::new(25.0, 30.0),
            Self::Groceries => Band::new(10.0, 15.0),
            Self::EatingOut => Band::new(5.0, 10.0),
            Self::Transportation => Band::new(5.0, 10.0),
            Self::Utilities => Band::new(5.0, 10.0),
            Self::PhoneInternet => Band::new(2.0, 5.0),
            Self::Shopping => Band::new(5.0, 10.0),
            Self::Entertainment => Band::new(5.0, 8.0),
            Self::Coffee => Band::new(1.0, 3.0),
            Self::Subscriptions => Band::new(1.0, 3.0),
            Self::HealthMedical => Band::new(2.0, 5.0),
            Self::Education => Band::new(2.0, 5.0),
            Self::Insurance => Band::new(5.0, 10.0),
            Self::DebtPayments => Band::new(5.0, 15.0),
            Self::HouseholdSupplies => Band::new(2.0, 5.0),
            Self::Pets => Band::new(1.0, 3.0),
            Self::GiftsDonations => Band::new(1.0, 5.0),
            Self::Travel => Band::new(5.0, 10.0),
            Self::PersonalCare => Band::new(2.0, 5.0),
            Self::RepairsMaintenance => Band::new(1.0, 3.0),
            Self::Saving => Band::new(20.0, 30.0),
        }
    }

    /// Lowercase substrings that identify this archetype in a category label
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Housing => &[
                "housing", "rent", "mortgage", "home", "apartment", "lease", "property",
                "housing", "residence",
            ],
            Self::Groceries => &[
                "grocery", "supermarket", "food", "groceries", "grocery store", "market",
            ],
            Self::EatingOut => &[
                "eating out", "restaurant", "dining", "food delivery", "takeout", "fast food",
                "dine out", "eating",
            ],
            Self::Transportation => &[
                "transport", "gas", "fuel", "petrol", "diesel", "uber", "taxi", "lyft",
                "public transport", "car", "vehicle", "parking", "tolls", "auto", "automotive",
                "commute", "bus", "train", "subway", "metro", "transportation",
            ],
            Self::Utilities => &[
                "utilities", "bills", "electricity", "water", "utility", "electric", "power",
                "gas bill", "water bill",
            ],
            Self::PhoneInternet => &[
                "phone", "internet", "mobile", "cellular", "telephone", "wifi", "broadband",
                "data plan", "phone bill", "internet bill",
            ],
            Self::Shopping => &[
                "shopping", "clothes", "fashion", "retail", "misc", "miscellaneous", "store",
                "purchase",
            ],
            Self::Entertainment => &[
                "entertainment", "movies", "games", "streaming", "netflix", "spotify", "hulu",
                "disney", "theater", "cinema", "concert", "show",
            ],
            Self::Coffee => &[
                "coffee", "cafe", "coffee shop", "espresso", "latte", "cappuccino", "starbucks",
                "tim hortons",
            ],
            Self::Subscriptions => &[
                "subscription", "subscriptions", "membership", "memberships",
                "monthly subscription", "annual subscription", "recurring",
            ],
            Self::HealthMedical => &[
                "health", "medical", "doctor", "hospital", "pharmacy", "medicine", "medication",
                "dental", "healthcare", "medical bill",
            ],
            Self::Education => &[
                "education", "school", "tuition", "course", "training", "learning", "university",
                "college", "student",
            ],
            Self::Insurance => &[
                "insurance", "health insurance", "car insurance", "life insurance",
                "home insurance", "auto insurance", "premium",
            ],
            Self::DebtPayments => &[
                "debt", "loan", "credit card", "payment", "repayment", "installment",
                "debt payment", "loan payment",
            ],
            Self::HouseholdSupplies => &[
                "household", "supplies", "cleaning", "detergent", "toilet paper",
                "paper towels", "household items",
            ],
            Self::Pets => &[
                "pet", "pets", "dog", "cat", "veterinary", "vet", "pet food", "pet care",
                "animal",
            ],
            Self::GiftsDonations => &[
                "gift", "gifts", "donation", "donations", "charity", "charitable", "giving",
                "present",
            ],
            Self::Travel => &[
                "travel", "trip", "vacation", "hotel", "flight", "airline", "tourism",
                "traveling", "holiday",
            ],
            Self::PersonalCare => &[
                "personal care", "personal", "haircut", "salon", "spa", "beauty", "cosmetics",
                "toiletries", "hygiene",
            ],
            Self::RepairsMaintenance => &[
                "repair", "repairs", "maintenance", "fix", "fixing", "upkeep", "service",
                "servicing",
            ],
            Self::Saving => &[
                "saving", "savings", "save", "investment", "invest", "deposit", "emergency fund",
                "retirement", "investments",
            ],
        }
    }
}

impl fmt::Display for CategoryArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryArchetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("Unknown category archetype: {}", s))
    }
}
