#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use platform_db::MemoryStore;
use products_crm::{CrmService, ValidationContext};

/// Seeded store with no latency or failures.
pub fn service() -> CrmService {
    CrmService::new(Arc::new(MemoryStore::instant()))
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn ctx() -> ValidationContext {
    ValidationContext::on(day(2024, 5, 20))
}
