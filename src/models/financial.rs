use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "financial_entry_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "financial_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Education,
    Salary,
    Freelance,
    Business,
    Investment,
    Gift,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub value: Category,
    pub label: &'static str,
    pub color: &'static str,
}

const fn cat(value: Category, label: &'static str, color: &'static str) -> CategoryDescriptor {
    CategoryDescriptor {
        value,
        label,
        color,
    }
}

pub const EXPENSE_CATEGORIES: [CategoryDescriptor; 8] = [
    cat(Category::Food, "Food & Dining", "orange-500"),
    cat(Category::Transport, "Transportation", "blue-500"),
    cat(Category::Shopping, "Shopping", "pink-500"),
    cat(Category::Entertainment, "Entertainment", "purple-500"),
    cat(Category::Bills, "Bills & Utilities", "red-500"),
    cat(Category::Health, "Healthcare", "green-500"),
    cat(Category::Education, "Education", "indigo-500"),
    cat(Category::Other, "Other", "gray-500"),
];

pub const INCOME_CATEGORIES: [CategoryDescriptor; 6] = [
    cat(Category::Salary, "Salary", "green-600"),
    cat(Category::Freelance, "Freelance", "blue-600"),
    cat(Category::Business, "Business", "purple-600"),
    cat(Category::Investment, "Investment", "indigo-600"),
    cat(Category::Gift, "Gift", "pink-600"),
    cat(Category::Other, "Other", "gray-600"),
];

impl EntryType {
    pub fn categories(self) -> &'static [CategoryDescriptor] {
        match self {
            EntryType::Income => &INCOME_CATEGORIES,
            EntryType::Expense => &EXPENSE_CATEGORIES,
        }
    }

    pub fn allows(self, category: Category) -> bool {
        self.categories().iter().any(|c| c.value == category)
    }
}

impl Category {
    /// Label and color under the given entry type. `other` differs by type.
    pub fn descriptor(self, entry_type: EntryType) -> Option<CategoryDescriptor> {
        entry_type
            .categories()
            .iter()
            .find(|c| c.value == self)
            .copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FinancialEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFinancialEntry {
    pub user_id: Uuid,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFinancialEntryRequest {
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    pub amount: Decimal,

    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,

    pub category: Category,

    /// Effective date. Default: the caller's local today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
}
