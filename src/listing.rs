//! Filter and sort pipeline shared by the goal and task lists.
//!
//! Filtering is a conjunction of the active predicates. Sorting uses
//! `slice::sort_by`, which is a stable merge sort, so entities with equal
//! keys keep their input order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use std::cmp::Ordering;
use std::str::FromStr;

use crate::data::{Choice, Priority};
use crate::internal_error::ValidationError;

pub trait Listable: Clone {
    type Status: Copy + PartialEq;

    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn subject(&self) -> &str;
    fn priority(&self) -> Priority;
    fn status(&self) -> Self::Status;
    fn due_date(&self) -> NaiveDate;
    fn created_at(&self) -> DateTime<Utc>;

    fn tags(&self) -> &[String] {
        &[]
    }

    fn progress(&self) -> Option<u8> {
        None
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    DueDate,
    Priority,
    Progress,
    Created,
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dueDate" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "progress" => Ok(SortKey::Progress),
            "created" => Ok(SortKey::Created),
            other => Err(ValidationError::Invalid {
                field: "sort",
                reason: format!("unknown sort key '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<S> {
    Subject(String),
    Priority(Priority),
    Status(S),
    Search(String),
}

impl<S: Copy + PartialEq> Predicate<S> {
    pub fn matches<T: Listable<Status = S>>(&self, item: &T) -> bool {
        match self {
            Predicate::Subject(subject) => item.subject() == subject,
            Predicate::Priority(priority) => item.priority() == *priority,
            Predicate::Status(status) => item.status() == *status,
            Predicate::Search(query) => matches_search(item, query),
        }
    }
}

/// Case-insensitive substring match against title, description and tags.
pub fn matches_search<T: Listable>(item: &T, query: &str) -> bool {
    let query = query.to_lowercase();

    item.title().to_lowercase().contains(&query)
        || item.description().to_lowercase().contains(&query)
        || item
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query))
}

#[derive(Debug, Clone)]
pub struct ListQuery<S> {
    pub subject: Choice<String>,
    pub priority: Choice<Priority>,
    pub status: Choice<S>,
    pub search: Option<String>,
    pub sort: SortKey,
}

impl<S> Default for ListQuery<S> {
    fn default() -> Self {
        ListQuery {
            subject: Choice::All,
            priority: Choice::All,
            status: Choice::All,
            search: None,
            sort: SortKey::default(),
        }
    }
}

impl<S: Copy + PartialEq + FromStr<Err = ValidationError>> ListQuery<S> {
    pub fn from_params(
        status: Option<&str>,
        subject: Option<&str>,
        priority: Option<&str>,
        search: Option<&str>,
        sort: Option<&str>,
    ) -> Result<ListQuery<S>, ValidationError> {
        let subject = match subject {
            None | Some("") | Some("all") => Choice::All,
            Some(subject) => Choice::Only(subject.to_string()),
        };

        Ok(ListQuery {
            subject,
            priority: Choice::parse(priority)?,
            status: Choice::parse(status)?,
            search: search.map(str::to_string),
            sort: match sort {
                None | Some("") => SortKey::default(),
                Some(key) => key.parse()?,
            },
        })
    }
}

impl<S: Copy + PartialEq> ListQuery<S> {
    /// Only the predicates that are switched on.
    pub fn predicates(&self) -> Vec<Predicate<S>> {
        let mut predicates = vec![];

        if let Choice::Only(subject) = &self.subject {
            predicates.push(Predicate::Subject(subject.clone()));
        }
        if let Choice::Only(priority) = self.priority {
            predicates.push(Predicate::Priority(priority));
        }
        if let Choice::Only(status) = self.status {
            predicates.push(Predicate::Status(status));
        }
        match &self.search {
            Some(query) if !query.is_empty() => predicates.push(Predicate::Search(query.clone())),
            _ => {}
        }

        predicates
    }
}

pub fn filter<T: Listable>(items: &[T], predicates: &[Predicate<T::Status>]) -> Vec<T> {
    items
        .iter()
        .filter(|item| predicates.iter().all(|p| p.matches(*item)))
        .cloned()
        .collect()
}

pub fn compare<T: Listable>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::DueDate => a.due_date().cmp(&b.due_date()),
        SortKey::Priority => b.priority().severity().cmp(&a.priority().severity()),
        SortKey::Progress => b.progress().cmp(&a.progress()),
        SortKey::Created => b.created_at().cmp(&a.created_at()),
    }
}

pub fn sort<T: Listable>(items: &[T], key: SortKey) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

/// Narrows then orders; the input slice is left as it was.
pub fn apply<T: Listable>(items: &[T], query: &ListQuery<T::Status>) -> Vec<T> {
    sort(&filter(items, &query.predicates()), query.sort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: usize,
        title: String,
        description: String,
        subject: String,
        priority: Priority,
        done: bool,
        due: NaiveDate,
        created: DateTime<Utc>,
        tags: Vec<String>,
        progress: u8,
    }

    impl Listable for Item {
        type Status = bool;

        fn title(&self) -> &str {
            &self.title
        }
        fn description(&self) -> &str {
            &self.description
        }
        fn subject(&self) -> &str {
            &self.subject
        }
        fn priority(&self) -> Priority {
            self.priority
        }
        fn status(&self) -> bool {
            self.done
        }
        fn due_date(&self) -> NaiveDate {
            self.due
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created
        }
        fn tags(&self) -> &[String] {
            &self.tags
        }
        fn progress(&self) -> Option<u8> {
            Some(self.progress)
        }
    }

    fn item(id: usize, priority: Priority, day: u32) -> Item {
        Item {
            id,
            title: format!("Item {}", id),
            description: String::new(),
            subject: if id % 2 == 0 { "Mathematics" } else { "History" }.to_string(),
            priority,
            done: id % 3 == 0,
            due: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            created: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            tags: vec![],
            progress: (id * 10 % 101) as u8,
        }
    }

    fn priority_strategy() -> impl Strategy<Value = Priority> {
        prop_oneof![
            Just(Priority::Low),
            Just(Priority::Medium),
            Just(Priority::High)
        ]
    }

    fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec((priority_strategy(), 1u32..28), 0..24).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(id, (priority, day))| item(id, priority, day))
                .collect()
        })
    }

    #[test]
    fn search_matches_title_description_and_tags() {
        let mut a = item(1, Priority::Low, 3);
        a.title = "Calculus Review".into();
        let mut b = item(2, Priority::Low, 3);
        b.description = "Integration by PARTS".into();
        let mut c = item(3, Priority::Low, 3);
        c.tags = vec!["Shakespeare".into()];

        assert!(matches_search(&a, "calc"));
        assert!(matches_search(&b, "parts"));
        assert!(matches_search(&c, "SHAKE"));
        assert!(!matches_search(&a, "physics"));
    }

    #[test]
    fn empty_search_is_inactive() {
        let query = ListQuery::<bool> {
            search: Some(String::new()),
            ..ListQuery::default()
        };
        assert!(query.predicates().is_empty());
    }

    #[test]
    fn sort_keys_order() {
        let items = vec![
            item(1, Priority::Low, 20),
            item(2, Priority::High, 5),
            item(3, Priority::Medium, 12),
        ];

        let by_due: Vec<usize> = sort(&items, SortKey::DueDate).iter().map(|i| i.id).collect();
        assert_eq!(by_due, vec![2, 3, 1]);

        let by_priority: Vec<usize> = sort(&items, SortKey::Priority).iter().map(|i| i.id).collect();
        assert_eq!(by_priority, vec![2, 3, 1]);

        let by_created: Vec<usize> = sort(&items, SortKey::Created).iter().map(|i| i.id).collect();
        assert_eq!(by_created, vec![1, 3, 2]);

        let by_progress: Vec<usize> = sort(&items, SortKey::Progress).iter().map(|i| i.id).collect();
        assert_eq!(by_progress, vec![3, 2, 1]);
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let items = vec![item(1, Priority::Low, 20), item(2, Priority::High, 5)];
        let before = items.clone();
        let query = ListQuery::<bool> {
            sort: SortKey::Priority,
            ..ListQuery::default()
        };

        let out = apply(&items, &query);
        assert_eq!(items, before);
        assert_eq!(out[0].id, 2);
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let query = ListQuery::<crate::goals::data::GoalStatus>::from_params(
            None,
            None,
            None,
            None,
            Some("alphabetical"),
        );
        assert!(query.is_err());
    }

    #[test]
    fn blank_params_fall_back_to_defaults() {
        let query = ListQuery::<crate::goals::data::GoalStatus>::from_params(
            Some(""),
            Some(""),
            Some(""),
            None,
            Some(""),
        )
        .unwrap();
        assert_eq!(query.sort, SortKey::DueDate);
        assert!(query.predicates().is_empty());
    }

    proptest! {
        #[test]
        fn priority_sort_is_stable(items in items_strategy()) {
            let sorted = sort(&items, SortKey::Priority);
            for window in sorted.windows(2) {
                let (a, b) = (&window[0], &window[1]);
                prop_assert!(a.priority.severity() >= b.priority.severity());
                if a.priority == b.priority {
                    prop_assert!(a.id < b.id);
                }
            }
        }

        #[test]
        fn filtering_narrows_associatively(
            items in items_strategy(),
            priority in priority_strategy(),
            done in any::<bool>(),
        ) {
            let predicates = vec![
                Predicate::Subject("Mathematics".to_string()),
                Predicate::Priority(priority),
                Predicate::Status(done),
            ];

            let all_at_once = filter(&items, &predicates);

            let mut reversed = items.clone();
            for predicate in predicates.iter().rev() {
                reversed = filter(&reversed, std::slice::from_ref(predicate));
            }
            prop_assert_eq!(&all_at_once, &reversed);

            let stepwise = filter(&filter(&items, &predicates[..2]), &predicates[2..]);
            prop_assert_eq!(&all_at_once, &stepwise);
        }
    }
}
