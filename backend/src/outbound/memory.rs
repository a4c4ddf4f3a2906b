//! In-memory adapter implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. All three collections share one lock so that a student delete and
//! the removal of their orders happen atomically.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{
    NewWasherman, OrderFilter, OrderRepository, OrderRepositoryError, StudentRepository,
    StudentRepositoryError, WashermanRepository, WashermanRepositoryError,
};
use crate::domain::{
    BagNumber, ClothesCount, NewOrder, Order, OrderCounts, OrderId, OrderStatus, Student,
    StudentOrder, StudentPatch, StudentProfile, StudentUniqueKeys, Username, Washerman,
    WashermanId, WashermanPatch, WashermanProfile,
};

#[derive(Debug, Default)]
struct State {
    students: BTreeMap<BagNumber, Student>,
    washermen: BTreeMap<i32, Washerman>,
    orders: BTreeMap<i32, Order>,
    last_washerman_id: i32,
    last_order_id: i32,
}

impl State {
    fn student_name(&self, bag_no: &BagNumber) -> Option<String> {
        self.students
            .get(bag_no)
            .map(|student| student.profile.name.clone())
    }
}

/// Shared in-memory store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i32)) {
    items.sort_by_key(|item| Reverse(key(item)));
}

fn next_id(counter: &mut i32) -> Option<i32> {
    *counter = counter.checked_add(1)?;
    Some(*counter)
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn exists(&self, bag_no: &BagNumber) -> Result<bool, StudentRepositoryError> {
        Ok(self.state.read().await.students.contains_key(bag_no))
    }

    async fn find_by_bag_no(
        &self,
        bag_no: &BagNumber,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.state.read().await.students.get(bag_no).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .students
            .values()
            .find(|student| student.profile.email.as_str() == email)
            .cloned())
    }

    async fn find_conflicts(
        &self,
        keys: &StudentUniqueKeys,
    ) -> Result<Vec<StudentProfile>, StudentRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .students
            .values()
            .map(|student| &student.profile)
            .filter(|profile| {
                keys.email.as_ref() == Some(&profile.email)
                    || keys.enrollment_no.as_ref() == Some(&profile.enrollment_no)
                    || keys.bag_no.as_ref() == Some(&profile.bag_no)
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, student: &Student) -> Result<StudentProfile, StudentRepositoryError> {
        let mut state = self.state.write().await;
        let bag_no = student.profile.bag_no.clone();
        if state.students.contains_key(&bag_no) {
            return Err(StudentRepositoryError::query(format!(
                "duplicate bag number {bag_no}"
            )));
        }
        state.students.insert(bag_no, student.clone());
        Ok(student.profile.clone())
    }

    async fn list(&self) -> Result<Vec<StudentProfile>, StudentRepositoryError> {
        let state = self.state.read().await;
        let mut profiles: Vec<StudentProfile> = state
            .students
            .values()
            .map(|student| student.profile.clone())
            .collect();
        // Map iteration is already bag order; a stable sort keeps it within ties.
        profiles.sort_by_key(|profile| Reverse(profile.created_at));
        Ok(profiles)
    }

    async fn update(
        &self,
        bag_no: &BagNumber,
        patch: &StudentPatch,
    ) -> Result<Option<StudentProfile>, StudentRepositoryError> {
        let mut state = self.state.write().await;
        let Some(student) = state.students.get_mut(bag_no) else {
            return Ok(None);
        };
        let profile = &mut student.profile;
        if let Some(name) = &patch.name {
            profile.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            profile.email = email.clone();
        }
        if let Some(enrollment_no) = &patch.enrollment_no {
            profile.enrollment_no.clone_from(enrollment_no);
        }
        if let Some(phone_no) = &patch.phone_no {
            profile.phone_no.clone_from(phone_no);
        }
        if let Some(residency_no) = &patch.residency_no {
            profile.residency_no.clone_from(residency_no);
        }
        if let Some(hash) = &patch.password_hash {
            student.password_hash = hash.clone();
        }
        student.profile.updated_at = patch.updated_at;
        Ok(Some(student.profile.clone()))
    }

    async fn delete_with_orders(&self, bag_no: &BagNumber) -> Result<bool, StudentRepositoryError> {
        let mut state = self.state.write().await;
        if state.students.remove(bag_no).is_none() {
            return Ok(false);
        }
        state.orders.retain(|_, order| &order.bag_no != bag_no);
        Ok(true)
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn insert(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError> {
        let mut state = self.state.write().await;
        if !state.students.contains_key(&order.bag_no) {
            return Err(OrderRepositoryError::query(format!(
                "no student owns bag {}",
                order.bag_no
            )));
        }
        let id = next_id(&mut state.last_order_id)
            .ok_or_else(|| OrderRepositoryError::query("order identifiers exhausted"))?;
        let stored = Order {
            id: OrderId::new(id),
            bag_no: order.bag_no.clone(),
            number_of_clothes: order.number_of_clothes,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.created_at,
        };
        state.orders.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(self.state.read().await.orders.get(&id.get()).cloned())
    }

    async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut state = self.state.write().await;
        Ok(state
            .orders
            .get_mut(&id.get())
            .filter(|order| order.status == from)
            .map(|order| {
                order.status = to;
                order.updated_at = updated_at;
                order.clone()
            }))
    }

    async fn update_count(
        &self,
        id: OrderId,
        count: ClothesCount,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.orders.get_mut(&id.get()).map(|order| {
            order.number_of_clothes = count;
            order.updated_at = updated_at;
            order.clone()
        }))
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<StudentOrder>, OrderRepositoryError> {
        let state = self.state.read().await;
        let mut matching: Vec<&Order> = state
            .orders
            .values()
            .filter(|order| filter.bag_no.as_ref().is_none_or(|bag| &order.bag_no == bag))
            .filter(|order| filter.status.is_none_or(|status| order.status == status))
            .collect();
        newest_first(&mut matching, |order| (order.created_at, order.id.get()));
        if let Some(limit) = filter.limit {
            matching.truncate(limit);
        }

        matching
            .into_iter()
            .map(|order| {
                let student_name = state.student_name(&order.bag_no).ok_or_else(|| {
                    OrderRepositoryError::query(format!("order {} has no owner", order.id))
                })?;
                Ok(StudentOrder {
                    order: order.clone(),
                    student_name,
                })
            })
            .collect()
    }

    async fn count_by_status(
        &self,
        bag_no: Option<BagNumber>,
    ) -> Result<OrderCounts, OrderRepositoryError> {
        let state = self.state.read().await;
        Ok(OrderCounts::tally(
            state
                .orders
                .values()
                .filter(|order| bag_no.as_ref().is_none_or(|bag| &order.bag_no == bag))
                .map(|order| order.status),
        ))
    }
}

#[async_trait]
impl WashermanRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: WashermanId,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .washermen
            .get(&id.get())
            .map(|washerman| washerman.profile.clone()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Washerman>, WashermanRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .washermen
            .values()
            .find(|washerman| &washerman.profile.username == username)
            .cloned())
    }

    async fn find_by_username_excluding(
        &self,
        username: &Username,
        id: WashermanId,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .washermen
            .values()
            .map(|washerman| &washerman.profile)
            .find(|profile| &profile.username == username && profile.id != id)
            .cloned())
    }

    async fn insert(
        &self,
        washerman: &NewWasherman,
    ) -> Result<WashermanProfile, WashermanRepositoryError> {
        let mut state = self.state.write().await;
        if state
            .washermen
            .values()
            .any(|existing| existing.profile.username == washerman.username)
        {
            return Err(WashermanRepositoryError::query(format!(
                "duplicate username {}",
                washerman.username
            )));
        }
        let id = next_id(&mut state.last_washerman_id)
            .ok_or_else(|| WashermanRepositoryError::query("washerman identifiers exhausted"))?;
        let profile = WashermanProfile {
            id: WashermanId::new(id),
            username: washerman.username.clone(),
            created_at: washerman.created_at,
            updated_at: washerman.created_at,
        };
        state.washermen.insert(
            id,
            Washerman {
                profile: profile.clone(),
                password_hash: washerman.password_hash.clone(),
            },
        );
        Ok(profile)
    }

    async fn list(&self) -> Result<Vec<WashermanProfile>, WashermanRepositoryError> {
        let state = self.state.read().await;
        let mut profiles: Vec<WashermanProfile> = state
            .washermen
            .values()
            .map(|washerman| washerman.profile.clone())
            .collect();
        newest_first(&mut profiles, |profile| (profile.created_at, profile.id.get()));
        Ok(profiles)
    }

    async fn update(
        &self,
        id: WashermanId,
        patch: &WashermanPatch,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError> {
        let mut state = self.state.write().await;
        let Some(washerman) = state.washermen.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(username) = &patch.username {
            washerman.profile.username = username.clone();
        }
        if let Some(hash) = &patch.password_hash {
            washerman.password_hash = hash.clone();
        }
        washerman.profile.updated_at = patch.updated_at;
        Ok(Some(washerman.profile.clone()))
    }

    async fn delete(&self, id: WashermanId) -> Result<bool, WashermanRepositoryError> {
        Ok(self.state.write().await.washermen.remove(&id.get()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, PasswordHash};
    use crate::test_support::{bag, fixture_timestamp, student};
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn count(raw: i64) -> ClothesCount {
        ClothesCount::new(raw).expect("valid count")
    }

    async fn place(store: &InMemoryStore, bag_no: &str, minutes: i64) -> Order {
        let at = fixture_timestamp() + Duration::minutes(minutes);
        OrderRepository::insert(store, &NewOrder::pending(bag(bag_no), count(3), at))
            .await
            .expect("order stored")
    }

    #[rstest]
    #[tokio::test]
    async fn listings_are_newest_first_with_student_names(store: InMemoryStore) {
        StudentRepository::insert(&store, &student("B-1", "a@rishihood.edu.in", "E1"))
            .await
            .expect("student stored");
        let older = place(&store, "B-1", 0).await;
        let newer = place(&store, "B-1", 5).await;

        let listed = OrderRepository::list(&store, &OrderFilter::default())
            .await
            .expect("listing");

        let ids: Vec<_> = listed.iter().map(|entry| entry.order.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert!(listed.iter().all(|entry| !entry.student_name.is_empty()));
    }

    #[rstest]
    #[tokio::test]
    async fn filters_by_status_and_limit(store: InMemoryStore) {
        StudentRepository::insert(&store, &student("B-1", "a@rishihood.edu.in", "E1"))
            .await
            .expect("student stored");
        for minute in 0..4 {
            place(&store, "B-1", minute).await;
        }
        OrderRepository::update_status(
            &store,
            OrderId::new(1),
            OrderStatus::Pending,
            OrderStatus::InProgress,
            fixture_timestamp(),
        )
        .await
        .expect("update");

        let pending = OrderRepository::list(&store, &OrderFilter::with_status(OrderStatus::Pending))
            .await
            .expect("listing");
        assert_eq!(pending.len(), 3);

        let limited =
            OrderRepository::list(&store, &OrderFilter::for_student(bag("B-1")).limited(2))
                .await
                .expect("listing");
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].order.id, OrderId::new(4));
    }

    #[rstest]
    #[tokio::test]
    async fn status_update_is_skipped_when_the_stored_status_moved_on(store: InMemoryStore) {
        StudentRepository::insert(&store, &student("B-1", "a@rishihood.edu.in", "E1"))
            .await
            .expect("student stored");
        let placed = place(&store, "B-1", 0).await;
        for (from, to) in [
            (OrderStatus::Pending, OrderStatus::InProgress),
            (OrderStatus::InProgress, OrderStatus::Complete),
        ] {
            OrderRepository::update_status(&store, placed.id, from, to, fixture_timestamp())
                .await
                .expect("update")
                .expect("row matched");
        }

        let stale = OrderRepository::update_status(
            &store,
            placed.id,
            OrderStatus::Pending,
            OrderStatus::InProgress,
            fixture_timestamp(),
        )
        .await
        .expect("update");

        assert!(stale.is_none());
        let stored = OrderRepository::find_by_id(&store, placed.id)
            .await
            .expect("lookup")
            .expect("order kept");
        assert_eq!(stored.status, OrderStatus::Complete);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_student_removes_their_orders(store: InMemoryStore) {
        StudentRepository::insert(&store, &student("B-1", "a@rishihood.edu.in", "E1"))
            .await
            .expect("student stored");
        StudentRepository::insert(&store, &student("G-2", "b@rishihood.edu.in", "E2"))
            .await
            .expect("student stored");
        place(&store, "B-1", 0).await;
        place(&store, "G-2", 1).await;

        assert!(store.delete_with_orders(&bag("B-1")).await.expect("delete"));
        assert!(!store.delete_with_orders(&bag("B-1")).await.expect("delete"));

        let counts = store.count_by_status(None).await.expect("counts");
        assert_eq!(counts.total_orders, 1);
        let gone = OrderRepository::find_by_id(&store, OrderId::new(1))
            .await
            .expect("lookup");
        assert!(gone.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn orders_require_an_existing_student(store: InMemoryStore) {
        let new_order = NewOrder::pending(bag("B-9"), count(2), fixture_timestamp());
        assert!(OrderRepository::insert(&store, &new_order).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn conflicts_match_any_unique_key(store: InMemoryStore) {
        StudentRepository::insert(&store, &student("B-1", "a@rishihood.edu.in", "E1"))
            .await
            .expect("student stored");
        let keys = StudentUniqueKeys {
            email: None,
            enrollment_no: Some("E1".into()),
            bag_no: Some(bag("G-5")),
        };

        let conflicts = store.find_conflicts(&keys).await.expect("lookup");
        assert_eq!(conflicts.len(), 1);

        let email = EmailAddress::parse_shape("z@rishihood.edu.in").expect("valid email");
        let keys = StudentUniqueKeys {
            email: Some(email),
            ..StudentUniqueKeys::default()
        };
        assert!(store.find_conflicts(&keys).await.expect("lookup").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn washerman_ids_increase_and_usernames_stay_unique(store: InMemoryStore) {
        let new = |name: &str| NewWasherman {
            username: Username::new(name).expect("valid username"),
            password_hash: PasswordHash::new("hashed:secret1"),
            created_at: fixture_timestamp(),
        };
        let first = WashermanRepository::insert(&store, &new("ravi")).await.expect("stored");
        let second = WashermanRepository::insert(&store, &new("sita")).await.expect("stored");
        assert_eq!(first.id, WashermanId::new(1));
        assert_eq!(second.id, WashermanId::new(2));
        assert!(WashermanRepository::insert(&store, &new("ravi")).await.is_err());

        let clash = store
            .find_by_username_excluding(&first.username, second.id)
            .await
            .expect("lookup");
        assert_eq!(clash.map(|profile| profile.id), Some(first.id));
        assert!(
            store
                .find_by_username_excluding(&first.username, first.id)
                .await
                .expect("lookup")
                .is_none()
        );
    }
}
