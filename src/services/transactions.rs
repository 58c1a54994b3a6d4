use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use validator::Validate;

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::models::financial::{CreateFinancialEntryRequest, FinancialEntry, NewFinancialEntry};
use crate::repo::EntryStore;

/// NUMERIC(12,2) upper bound.
const MAX_AMOUNT: Decimal = dec!(9999999999.99);

pub fn validate_transaction(
    req: CreateFinancialEntryRequest,
    ctx: &RequestContext,
) -> AppResult<NewFinancialEntry> {
    req.validate()?;

    if req.amount <= Decimal::ZERO {
        return Err(AppError::Validation("Amount must be greater than zero".into()));
    }
    if req.amount.round_dp(2) != req.amount {
        return Err(AppError::Validation(
            "Amount can have at most two decimal places".into(),
        ));
    }
    if req.amount > MAX_AMOUNT {
        return Err(AppError::Validation("Amount is too large".into()));
    }

    let description = req.description.trim().to_string();
    if description.is_empty() {
        return Err(AppError::Validation("Description is required".into()));
    }

    if !req.entry_type.allows(req.category) {
        return Err(AppError::Validation(format!(
            "Category '{:?}' is not valid for {:?} entries",
            req.category, req.entry_type
        )
        .to_lowercase()));
    }

    Ok(NewFinancialEntry {
        user_id: ctx.user_id,
        entry_type: req.entry_type,
        amount: req.amount,
        description,
        category: req.category,
        date: req.date.unwrap_or_else(|| ctx.today()),
    })
}

pub async fn record_transaction(
    store: &dyn EntryStore,
    ctx: &RequestContext,
    req: CreateFinancialEntryRequest,
) -> AppResult<FinancialEntry> {
    let entry = validate_transaction(req, ctx)?;
    let saved = store.insert_financial_entry(entry).await?;

    tracing::info!(
        user_id = %ctx.user_id,
        entry_id = %saved.id,
        entry_type = ?saved.entry_type,
        "Financial entry submitted"
    );

    Ok(saved)
}
