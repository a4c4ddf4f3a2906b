//! Behavioural tests for the order status lifecycle over the in-memory store.

use std::sync::Arc;

use laundry_backend::domain::ports::{
    CreateOrderRequest, OrderLifecycle, OrderQuery, StudentAccounts, UpdateOrderStatusRequest,
};
use laundry_backend::domain::{
    BagNumber, EmailPolicy, Error, ErrorCode, Order, OrderService, StudentService, StudentSignup,
};
use laundry_backend::outbound::memory::InMemoryStore;
use laundry_backend::outbound::security::Argon2PasswordHasher;
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

type Orders = OrderService<InMemoryStore, InMemoryStore>;
type Students = StudentService<InMemoryStore, Argon2PasswordHasher>;

struct LifecycleWorld {
    runtime: Runtime,
    orders: Orders,
    students: Students,
    bag_no: Option<String>,
    order: Option<Order>,
    last_error: Option<Error>,
}

impl LifecycleWorld {
    fn order(&self) -> &Order {
        self.order.as_ref().expect("an order should have been placed")
    }

    fn place(&mut self, bag_no: String, number_of_clothes: i64) {
        let result = self.runtime.block_on(self.orders.create_order(CreateOrderRequest {
            bag_no,
            number_of_clothes,
        }));
        match result {
            Ok(order) => self.order = Some(order),
            Err(err) => self.last_error = Some(err),
        }
    }

    fn take_error(&mut self) -> Error {
        self.last_error
            .take()
            .expect("the last operation should have failed")
    }
}

#[fixture]
fn world() -> LifecycleWorld {
    let runtime = Runtime::new().expect("tokio runtime should initialize");
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    LifecycleWorld {
        runtime,
        orders: OrderService::new(store.clone(), store.clone(), clock.clone()),
        students: StudentService::new(
            store,
            Arc::new(Argon2PasswordHasher),
            EmailPolicy::default(),
            clock,
        ),
        bag_no: None,
        order: None,
        last_error: None,
    }
}

#[given("a registered student with bag \"{bag}\" and email \"{email}\"")]
fn a_registered_student(world: &mut LifecycleWorld, bag: String, email: String) {
    let signup = StudentSignup {
        bag_no: bag.clone(),
        name: "Asha Verma".to_owned(),
        email,
        enrollment_no: "2023CS101".to_owned(),
        password: "secret1".to_owned(),
        phone_no: "9876543210".to_owned(),
        residency_no: "H-204".to_owned(),
    };
    world
        .runtime
        .block_on(world.students.sign_up(signup))
        .expect("student signup should succeed");
    world.bag_no = Some(bag);
}

#[when("the student places an order with {count} clothes")]
fn the_student_places_an_order(world: &mut LifecycleWorld, count: i64) {
    let bag_no = world.bag_no.clone().expect("student should be registered");
    world.place(bag_no, count);
    assert!(world.last_error.is_none(), "order placement should succeed");
}

#[when("an order is placed for bag \"{bag}\" with {count} clothes")]
fn an_order_is_placed_for_bag(world: &mut LifecycleWorld, bag: String, count: i64) {
    world.place(bag, count);
}

#[when("the washerman sets the status to \"{status}\"")]
fn the_washerman_sets_the_status(world: &mut LifecycleWorld, status: String) {
    let request = UpdateOrderStatusRequest {
        order_id: world.order().id,
        status,
    };
    match world.runtime.block_on(world.orders.update_status(request)) {
        Ok(order) => world.order = Some(order),
        Err(err) => world.last_error = Some(err),
    }
}

#[when("the student account is deleted")]
fn the_student_account_is_deleted(world: &mut LifecycleWorld) {
    let raw = world.bag_no.clone().expect("student should be registered");
    let bag_no = BagNumber::parse(&raw).expect("valid bag number");
    world
        .runtime
        .block_on(world.students.delete_student(&bag_no))
        .expect("delete should succeed");
}

#[then("the order status is \"{status}\"")]
fn the_order_status_is(world: &mut LifecycleWorld, status: String) {
    let id = world.order().id;
    let stored = world
        .runtime
        .block_on(world.orders.order_by_id(id))
        .expect("order should exist");
    assert_eq!(stored.status.to_string(), status);
}

#[then("the update is rejected as an invalid transition")]
fn the_update_is_rejected(world: &mut LifecycleWorld) {
    let err = world.take_error();
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Invalid status transition");
}

#[then("the order is rejected as not found")]
fn the_order_is_rejected_as_not_found(world: &mut LifecycleWorld) {
    assert!(world.order.is_none());
    assert_eq!(world.take_error().code(), ErrorCode::NotFound);
}

#[then("looking up the order reports not found")]
fn looking_up_the_order_reports_not_found(world: &mut LifecycleWorld) {
    let id = world.order().id;
    let err = world
        .runtime
        .block_on(world.orders.order_by_id(id))
        .expect_err("order should be gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[scenario(
    path = "tests/features/order_lifecycle.feature",
    name = "An order moves from pending to complete"
)]
fn an_order_moves_from_pending_to_complete(world: LifecycleWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/order_lifecycle.feature",
    name = "Skipping the in-progress step is rejected"
)]
fn skipping_the_in_progress_step_is_rejected(world: LifecycleWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/order_lifecycle.feature",
    name = "Orders for unknown bags are not created"
)]
fn orders_for_unknown_bags_are_not_created(world: LifecycleWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/order_lifecycle.feature",
    name = "Deleting a student removes their orders"
)]
fn deleting_a_student_removes_their_orders(world: LifecycleWorld) {
    drop(world);
}
