use crate::{
    listing::{Direction, Filter, ListPage, ListQuery, PAGE_SIZE, Sort, Sortable, transform},
    references::References,
};

/// Filter, sort and page state of one entity screen.
///
/// Any filter change sends the view back to page 1. Selecting the active sort
/// key again flips its direction; a different key starts ascending.
#[derive(Clone, Debug)]
pub struct ListView<R: Sortable, F> {
    filter: F,
    sort: Option<Sort<R::Key>>,
    page: usize,
    page_size: usize,
}

impl<R: Sortable, F: Default> Default for ListView<R, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Sortable, F: Default> ListView<R, F> {
    pub fn new() -> Self {
        Self {
            filter: F::default(),
            sort: None,
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl<R: Sortable, F> ListView<R, F> {
    pub fn with_sort(mut self, sort: Sort<R::Key>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn update_filter(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.filter);
        self.page = 1;
    }

    pub fn sort(&self) -> Option<Sort<R::Key>> {
        self.sort
    }

    pub fn toggle_sort(&mut self, key: R::Key) {
        self.sort = Some(match self.sort {
            Some(current) if current.key == key => Sort {
                key,
                direction: current.direction.flipped(),
            },
            _ => Sort {
                key,
                direction: Direction::Asc,
            },
        });
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Out-of-range pages are clamped when the view is next rendered.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn query(&self) -> ListQuery<F, R::Key>
    where
        F: Clone,
    {
        ListQuery {
            filter: self.filter.clone(),
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Adopt the clamped page number a list request came back with.
    pub fn sync<T>(&mut self, page: &ListPage<T>) {
        self.page = page.page;
    }

    /// Recompute the visible page from a snapshot of the records.
    pub fn render(&mut self, records: Vec<R>, refs: &References) -> ListPage<R>
    where
        F: Filter<R>,
    {
        let query = ListQuery {
            filter: &self.filter,
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
        };
        let page = transform(records, &query, refs);
        self.page = page.page;
        page
    }
}

#[cfg(test)]
mod tests {
    use entity::{
        RecordId,
        clients::{Client, Status},
    };

    use super::*;
    use crate::listing::{
        Choice,
        clients::{ClientFilter, ClientSortKey},
    };

    fn client(n: usize) -> Client {
        Client {
            id: RecordId::new(format!("client{}", n)),
            name: format!("Client {:02}", n),
            email: format!("c{}@example.com", n),
            company: format!("Company {}", n),
            status: if n % 2 == 0 {
                Status::Active
            } else {
                Status::Lead
            },
            last_interaction: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            assigned_manager_id: None,
            phone: None,
            notes: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let mut view: ListView<Client, ClientFilter> = ListView::new();
        view.go_to_page(3);
        view.update_filter(|filter| filter.status = Choice::Only(Status::Lead));
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn reselecting_a_key_flips_direction() {
        let mut view: ListView<Client, ClientFilter> = ListView::new();
        view.toggle_sort(ClientSortKey::Name);
        assert_eq!(view.sort(), Some(Sort::asc(ClientSortKey::Name)));
        view.toggle_sort(ClientSortKey::Name);
        assert_eq!(view.sort(), Some(Sort::desc(ClientSortKey::Name)));
        view.toggle_sort(ClientSortKey::Company);
        assert_eq!(view.sort(), Some(Sort::asc(ClientSortKey::Company)));
    }

    #[test]
    fn render_clamps_and_remembers_page() {
        let records: Vec<Client> = (1..=23).map(client).collect();
        let mut view: ListView<Client, ClientFilter> =
            ListView::new().with_sort(Sort::asc(ClientSortKey::Name));
        view.go_to_page(5);
        let page = view.render(records, &References::new());
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(view.page(), 3);
        view.previous_page();
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn previous_page_stops_at_one() {
        let mut view: ListView<Client, ClientFilter> = ListView::new();
        view.previous_page();
        assert_eq!(view.page(), 1);
    }
}
