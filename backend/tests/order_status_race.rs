//! Concurrent status updates must never move a finished order backwards.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use laundry_backend::domain::ports::{
    CreateOrderRequest, OrderFilter, OrderLifecycle, OrderQuery, OrderRepository,
    OrderRepositoryError, StudentAccounts, UpdateOrderStatusRequest,
};
use laundry_backend::domain::{
    BagNumber, ClothesCount, EmailPolicy, ErrorCode, NewOrder, Order, OrderCounts, OrderId,
    OrderService, OrderStatus, StudentOrder, StudentService, StudentSignup,
};
use laundry_backend::outbound::memory::InMemoryStore;
use laundry_backend::outbound::security::Argon2PasswordHasher;
use mockable::DefaultClock;
use tokio::sync::oneshot;

type Gate = (oneshot::Sender<()>, oneshot::Receiver<()>);

/// Order store whose next lookup parks after reading until released.
struct ParkedReadOrders {
    inner: Arc<InMemoryStore>,
    gate: Mutex<Option<Gate>>,
}

impl ParkedReadOrders {
    fn new(inner: Arc<InMemoryStore>) -> Self {
        Self {
            inner,
            gate: Mutex::new(None),
        }
    }

    /// Returns a receiver fired once the parked read happened and a sender
    /// that lets it continue.
    fn park_next_read(&self) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (read_tx, read_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        *self.gate.lock().expect("gate lock") = Some((read_tx, release_rx));
        (read_rx, release_tx)
    }
}

#[async_trait]
impl OrderRepository for ParkedReadOrders {
    async fn insert(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError> {
        OrderRepository::insert(self.inner.as_ref(), order).await
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        let found = OrderRepository::find_by_id(self.inner.as_ref(), id).await?;
        let gate = self.gate.lock().expect("gate lock").take();
        if let Some((read, release)) = gate {
            read.send(()).expect("test waits for the read");
            release.await.expect("test releases the read");
        }
        Ok(found)
    }

    async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        OrderRepository::update_status(self.inner.as_ref(), id, from, to, updated_at).await
    }

    async fn update_count(
        &self,
        id: OrderId,
        count: ClothesCount,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        OrderRepository::update_count(self.inner.as_ref(), id, count, updated_at).await
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<StudentOrder>, OrderRepositoryError> {
        OrderRepository::list(self.inner.as_ref(), filter).await
    }

    async fn count_by_status(
        &self,
        bag_no: Option<BagNumber>,
    ) -> Result<OrderCounts, OrderRepositoryError> {
        OrderRepository::count_by_status(self.inner.as_ref(), bag_no).await
    }
}

fn status_request(order_id: OrderId, status: &str) -> UpdateOrderStatusRequest {
    UpdateOrderStatusRequest {
        order_id,
        status: status.to_owned(),
    }
}

#[tokio::test]
async fn stale_status_update_cannot_reopen_a_completed_order() {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let students = StudentService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher),
        EmailPolicy::default(),
        clock.clone(),
    );
    students
        .sign_up(StudentSignup {
            bag_no: "B-12".to_owned(),
            name: "Asha Verma".to_owned(),
            email: "a@rishihood.edu.in".to_owned(),
            enrollment_no: "2023CS101".to_owned(),
            password: "secret1".to_owned(),
            phone_no: "9876543210".to_owned(),
            residency_no: "H-204".to_owned(),
        })
        .await
        .expect("student signup should succeed");

    let orders = Arc::new(ParkedReadOrders::new(store.clone()));
    let service = Arc::new(OrderService::new(store, orders.clone(), clock));
    let placed = service
        .create_order(CreateOrderRequest {
            bag_no: "B-12".to_owned(),
            number_of_clothes: 4,
        })
        .await
        .expect("order placed");
    let order_id = placed.id;

    let (read_done, release) = orders.park_next_read();
    let stale = tokio::spawn({
        let service = service.clone();
        async move {
            service
                .update_status(status_request(order_id, "inprogress"))
                .await
        }
    });
    read_done.await.expect("first update read the order");

    service
        .update_status(status_request(order_id, "inprogress"))
        .await
        .expect("second update starts the order");
    service
        .update_status(status_request(order_id, "complete"))
        .await
        .expect("third update completes the order");

    release.send(()).expect("first update still parked");
    let err = stale
        .await
        .expect("task joins")
        .expect_err("stale update must be rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Invalid status transition");
    let stored = service.order_by_id(order_id).await.expect("order kept");
    assert_eq!(stored.status, OrderStatus::Complete);
}
