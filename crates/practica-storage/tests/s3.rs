//! Integration tests against a real S3 bucket.
//!
//! These require valid AWS credentials in the environment and a scratch
//! bucket named by `PRACTICA_TEST_BUCKET`.
//!
//! Run with: `cargo test -p practica-storage --test s3 -- --ignored`

use jiff::civil::date;

use practica_core::models::professional::Professional;
use practica_core::models::shift::{Shift, ShiftStatus};
use practica_core::models::time_slot::TimeSlot;
use practica_storage::client::build_client;
use practica_storage::s3::S3Store;
use practica_storage::store::RosterStore;

async fn build_store() -> S3Store {
    let bucket = std::env::var("PRACTICA_TEST_BUCKET").expect("PRACTICA_TEST_BUCKET must be set");
    let client = build_client(None).await;
    S3Store::new(client, bucket)
}

#[tokio::test]
#[ignore]
async fn shift_round_trips_through_bucket() {
    let store = build_store().await;
    let professional = Professional::new("Prueba S3", "Medicina General");
    let slot = TimeSlot::new("08:00".parse().unwrap(), "12:00".parse().unwrap()).unwrap();
    let shift = Shift::assigned(
        &professional,
        date(2024, 1, 19),
        vec![slot],
        jiff::Timestamp::now(),
    );

    store.insert_shift(&shift).await.expect("insert should succeed");
    let fetched = store.get_shift(shift.id).await.expect("get should succeed");
    assert_eq!(fetched, shift);
}

#[tokio::test]
#[ignore]
async fn concurrent_writers_conflict() {
    let store = build_store().await;
    let professional = Professional::new("Prueba S3", "Medicina General");
    let slot = TimeSlot::new("14:00".parse().unwrap(), "18:00".parse().unwrap()).unwrap();
    let shift = Shift::assigned(
        &professional,
        date(2024, 1, 19),
        vec![slot],
        jiff::Timestamp::now(),
    );
    store.insert_shift(&shift).await.unwrap();

    let mut first = shift.clone();
    first.status = ShiftStatus::SickLeave;
    store.update_shift(&first).await.expect("first writer wins");

    let mut second = shift.clone();
    second.status = ShiftStatus::Vacation;
    let err = store.update_shift(&second).await.unwrap_err();
    assert!(err.is_conflict(), "expected a conflict, got: {err}");
}
