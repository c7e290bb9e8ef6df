use entity::users::{Role, Status, User};

use super::{Choice, Filter, SortValue, Sortable, TextSearch};
use crate::references::References;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilter {
    pub role: Choice<Role>,
    pub status: Choice<Status>,
    pub search: TextSearch,
}

impl Filter<User> for UserFilter {
    fn matches(&self, user: &User, _refs: &References) -> bool {
        self.role.admits(&user.role)
            && self.status.admits(&user.status)
            && self
                .search
                .matches_any([Some(user.name.as_str()), Some(user.email.as_str())])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserSortKey {
    Name,
    Email,
    Role,
    Status,
}

impl Sortable for User {
    type Key = UserSortKey;

    fn sort_value(&self, key: UserSortKey, _refs: &References) -> Option<SortValue> {
        let value = match key {
            UserSortKey::Name => SortValue::text(&self.name),
            UserSortKey::Email => SortValue::text(&self.email),
            UserSortKey::Role => SortValue::text(self.role.as_str()),
            UserSortKey::Status => SortValue::text(self.status.as_str()),
        };
        Some(value)
    }
}
