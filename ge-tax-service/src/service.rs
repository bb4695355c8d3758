//! Income Application Service
//!
//! Validates textual requests and orchestrates conversions through the
//! converter port. Holds no rate logic of its own.

use chrono::NaiveDate;
use futures::future::try_join_all;
use rust_decimal::Decimal;
use tracing::info;

use ge_tax_types::domain::calendar::{date_from_parts, parse_day, parse_month, parse_year};
use ge_tax_types::{AppError, CancellationToken, Money, MoneyConverter, currencies};

use crate::dto::{ConvertRequest, ConvertResponse, IncomeBatch, IncomeSummary};

/// Application service for income conversions.
///
/// Generic over `V: MoneyConverter`, injected at compile time.
pub struct IncomeService<V: MoneyConverter> {
    converter: V,
}

impl<V: MoneyConverter> IncomeService<V> {
    pub fn new(converter: V) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &V {
        &self.converter
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Single conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Parses and validates a textual request, then converts it.
    pub async fn convert(
        &self,
        cancel: &CancellationToken,
        req: ConvertRequest,
    ) -> Result<ConvertResponse, AppError> {
        let year = parse_year(&req.year)?;
        let month = parse_month(&req.month)?;
        let day = parse_day(&req.day)?;
        let date = date_from_parts(year, month, day)?;

        let money = Money::parse(&req.amount, req.currency_from.trim().to_ascii_uppercase())?;

        self.convert_money(cancel, money, &req.currency_to, date)
            .await
    }

    async fn convert_money(
        &self,
        cancel: &CancellationToken,
        money: Money,
        to: &str,
        date: NaiveDate,
    ) -> Result<ConvertResponse, AppError> {
        let conversion = self.converter.convert(cancel, &money, to, date).await?;

        Ok(ConvertResponse {
            date,
            amount: money,
            converted: conversion.money,
            rate: conversion.rate,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Income batches
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts every income to the local currency, sums the results and
    /// adds the sum to the prior year income.
    ///
    /// Conversions run concurrently; the first failure aborts the batch.
    pub async fn convert_incomes(
        &self,
        cancel: &CancellationToken,
        batch: IncomeBatch,
    ) -> Result<IncomeSummary, AppError> {
        let prior = match batch.year_income.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                Money::parse(raw, currencies::LOCAL_CURRENCY)?.amount
            }
            _ => Decimal::ZERO,
        };
        let count = batch.incomes.len();

        let converted = try_join_all(batch.incomes.into_iter().map(|income| {
            self.convert_money(cancel, income.money, currencies::LOCAL_CURRENCY, income.date)
        }))
        .await?;

        let total = converted
            .iter()
            .try_fold(Decimal::ZERO, |sum, income| {
                sum.checked_add(income.converted.amount)
            })
            .ok_or_else(|| AppError::Internal("income total overflows".into()))?;
        let year_income = prior
            .checked_add(total)
            .ok_or_else(|| AppError::Internal("year income overflows".into()))?;

        info!(count, %total, %year_income, "Converted incomes");

        Ok(IncomeSummary {
            incomes: converted,
            total: Money::new(total, currencies::LOCAL_CURRENCY),
            year_income: Money::new(year_income, currencies::LOCAL_CURRENCY),
        })
    }
}
