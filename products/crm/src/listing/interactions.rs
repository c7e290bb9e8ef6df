use entity::{
    RecordId,
    interactions::{Interaction, Kind},
};

use super::{Choice, DateRange, Filter, SortValue, Sortable, TextSearch};
use crate::references::References;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionFilter {
    pub client: Choice<RecordId>,
    pub kind: Choice<Kind>,
    pub dates: DateRange,
    pub search: TextSearch,
}

impl InteractionFilter {
    pub fn for_client(id: RecordId) -> Self {
        Self {
            client: Choice::Only(id),
            ..Self::default()
        }
    }
}

impl Filter<Interaction> for InteractionFilter {
    fn matches(&self, interaction: &Interaction, _refs: &References) -> bool {
        self.client.admits(&interaction.client_id)
            && self.kind.admits(&interaction.kind)
            && self.dates.contains(interaction.date)
            && self.search.matches(&interaction.notes)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionSortKey {
    Date,
    Kind,
}

impl Sortable for Interaction {
    type Key = InteractionSortKey;

    fn sort_value(&self, key: InteractionSortKey, _refs: &References) -> Option<SortValue> {
        match key {
            InteractionSortKey::Date => Some(SortValue::Date(self.date)),
            InteractionSortKey::Kind => Some(SortValue::text(self.kind.as_str())),
        }
    }
}
