//! The list pipeline every entity view runs: filter, then sort, then
//! paginate. Nothing here touches the store; callers hand in a snapshot.

pub mod campaigns;
pub mod clients;
pub mod interactions;
pub mod tasks;
pub mod users;

use std::{cmp::Ordering, fmt::Debug};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::references::References;

pub const PAGE_SIZE: usize = 10;

/// Single-select filter value. `All` admits every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }

    /// A null reference only passes the `All` sentinel.
    pub fn admits_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Choice::All, _) => true,
            (Choice::Only(wanted), Some(value)) => wanted == value,
            (Choice::Only(_), None) => false,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Choice::All, Choice::Only)
    }
}

/// Case-insensitive substring search. An empty query matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextSearch(String);

impl TextSearch {
    pub fn new(query: &str) -> Self {
        Self(query.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, text: &str) -> bool {
        self.is_empty() || text.to_lowercase().contains(&self.0)
    }

    /// True when any present field contains the query.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
        self.is_empty()
            || fields
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&self.0))
    }
}

/// Inclusive date bound. Without a `from` the range is inactive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.from, self.to) {
            (None, _) => true,
            (Some(from), None) => date >= from,
            (Some(from), Some(to)) => date >= from && date <= to,
        }
    }

    /// A span passes when it starts on or after `from` and, with a full
    /// range, also ends on or before `to`.
    pub fn contains_span(&self, start: NaiveDate, end: NaiveDate) -> bool {
        match (self.from, self.to) {
            (None, _) => true,
            (Some(from), None) => start >= from,
            (Some(from), Some(to)) => start >= from && end <= to,
        }
    }
}

/// Predicate set for one record type. Individual predicates combine with AND.
pub trait Filter<R> {
    fn matches(&self, record: &R, refs: &References) -> bool;
}

impl<R, F: Filter<R>> Filter<R> for &F {
    fn matches(&self, record: &R, refs: &References) -> bool {
        (**self).matches(record, refs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub direction: Direction,
}

impl<K> Sort<K> {
    pub fn asc(key: K) -> Self {
        Self {
            key,
            direction: Direction::Asc,
        }
    }

    pub fn desc(key: K) -> Self {
        Self {
            key,
            direction: Direction::Desc,
        }
    }
}

/// One comparable field value. Values of different variants compare equal.
#[derive(Clone, Debug, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Instant(DateTime<Utc>),
    Flag(bool),
    Rank(u8),
}

impl SortValue {
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }

    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => compare_text(a, b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Instant(a), SortValue::Instant(b)) => a.cmp(b),
            (SortValue::Flag(a), SortValue::Flag(b)) => a.cmp(b),
            (SortValue::Rank(a), SortValue::Rank(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Nulls go last in both directions.
fn compare_nullable(a: Option<&SortValue>, b: Option<&SortValue>, direction: Direction) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            Direction::Asc => a.compare(b),
            Direction::Desc => b.compare(a),
        },
    }
}

/// A record type with named sort keys.
pub trait Sortable {
    type Key: Copy + Eq + Debug + Send + Sync + 'static;

    fn sort_value(&self, key: Self::Key, refs: &References) -> Option<SortValue>;
}

/// Filter, sort and page settings for one list request.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery<F, K> {
    pub filter: F,
    pub sort: Option<Sort<K>>,
    pub page: usize,
    pub page_size: usize,
}

impl<F: Default, K> Default for ListQuery<F, K> {
    fn default() -> Self {
        Self {
            filter: F::default(),
            sort: None,
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl<F, K> ListQuery<F, K> {
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            sort: None,
            page: 1,
            page_size: PAGE_SIZE,
        }
    }

    pub fn sorted(mut self, sort: Sort<K>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// The visible slice of a list plus the numbers a pager needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage<R> {
    pub items: Vec<R>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<R> ListPage<R> {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(R) -> U) -> ListPage<U> {
        ListPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page into `[1, total_pages]`; an empty list sits on page 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn filter_records<R, F>(records: Vec<R>, filter: &F, refs: &References) -> Vec<R>
where
    F: Filter<R>,
{
    records
        .into_iter()
        .filter(|record| filter.matches(record, refs))
        .collect()
}

/// Stable sort on one key.
pub fn sort_records<R: Sortable>(records: Vec<R>, sort: Sort<R::Key>, refs: &References) -> Vec<R> {
    let mut keyed: Vec<(Option<SortValue>, R)> = records
        .into_iter()
        .map(|record| (record.sort_value(sort.key, refs), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_nullable(a.as_ref(), b.as_ref(), sort.direction));
    keyed.into_iter().map(|(_, record)| record).collect()
}

pub fn paginate<R>(records: Vec<R>, page: usize, page_size: usize) -> ListPage<R> {
    let page_size = page_size.max(1);
    let total = records.len();
    let total_pages = total_pages(total, page_size);
    let page = clamp_page(page, total_pages);
    let items = records
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    ListPage {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}

/// Run the whole pipeline for one list request.
pub fn transform<R, F>(records: Vec<R>, query: &ListQuery<F, R::Key>, refs: &References) -> ListPage<R>
where
    R: Sortable,
    F: Filter<R>,
{
    let available = records.len();
    let filtered = filter_records(records, &query.filter, refs);
    let matched = filtered.len();
    let ordered = match query.sort {
        Some(sort) => sort_records(filtered, sort, refs),
        None => filtered,
    };
    let page = paginate(ordered, query.page, query.page_size);
    debug!(
        available,
        matched,
        page = page.page,
        total_pages = page.total_pages,
        "list transformed"
    );
    page
}
