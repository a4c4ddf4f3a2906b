//! Shared test doubles and record builders for unit tests in `src/`.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    BagNumber, ClothesCount, EmailAddress, Order, OrderId, OrderStatus, PasswordHash, Student,
    StudentOrder, StudentProfile, Username, Washerman, WashermanId, WashermanProfile,
};

/// Fixed starting instant shared by fixtures.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

pub fn fixture_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixture_timestamp()))
}

pub fn bag(raw: &str) -> BagNumber {
    BagNumber::parse(raw).expect("fixture bag number")
}

pub fn student_profile(bag_no: &str, email: &str, enrollment_no: &str) -> StudentProfile {
    StudentProfile {
        bag_no: bag(bag_no),
        name: format!("Student {bag_no}"),
        email: EmailAddress::parse_shape(email).expect("fixture email"),
        enrollment_no: enrollment_no.to_owned(),
        phone_no: "9000000000".to_owned(),
        residency_no: "H-101".to_owned(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub fn student(bag_no: &str, email: &str, enrollment_no: &str) -> Student {
    Student {
        profile: student_profile(bag_no, email, enrollment_no),
        password_hash: PasswordHash::new("hashed:secret1"),
    }
}

pub fn order(id: i32, bag_no: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        bag_no: bag(bag_no),
        number_of_clothes: ClothesCount::new(3).expect("fixture count"),
        status,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub fn student_order(id: i32, bag_no: &str, status: OrderStatus) -> StudentOrder {
    StudentOrder {
        order: order(id, bag_no, status),
        student_name: format!("Student {bag_no}"),
    }
}

pub fn washerman_profile(id: i32, username: &str) -> WashermanProfile {
    WashermanProfile {
        id: WashermanId::new(id),
        username: Username::new(username).expect("fixture username"),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub fn washerman(id: i32, username: &str) -> Washerman {
    Washerman {
        profile: washerman_profile(id, username),
        password_hash: PasswordHash::new("hashed:secret1"),
    }
}
