use std::sync::atomic::{AtomicUsize, Ordering};

use jiff::civil::{Date, date};
use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::{Shift, ShiftStatus};
use practica_core::models::time_slot::TimeSlot;
use practica_roster::{RosterError, ShiftService};
use practica_storage::error::StorageError;
use practica_storage::memory::MemoryStore;
use practica_storage::store::RosterStore;

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
}

async fn service_with(professional: &Professional) -> ShiftService<MemoryStore> {
    let service = ShiftService::new(MemoryStore::new());
    service.store().put_professional(professional).await.unwrap();
    service
}

#[tokio::test]
async fn assign_creates_one_shift_per_date() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;

    let dates = [date(2024, 1, 19), date(2024, 1, 22)];
    let slots = [slot("14:00", "18:00"), slot("08:00", "12:00")];
    let created = service.assign_shifts(ana.id, &dates, &slots).await.unwrap();

    assert_eq!(created.len(), 2);
    for shift in &created {
        assert_eq!(shift.status, ShiftStatus::Assigned);
        assert_eq!(shift.professional_name, "Ana");
        assert_eq!(shift.total_minutes(), 480);
        assert_eq!(shift.time_slots[0].start_time.to_string(), "08:00");
        assert!(!shift.has_lineage());
    }
    assert_eq!(service.get_all_shifts().await.unwrap().len(), 2);
}

#[tokio::test]
async fn each_shift_gets_its_own_slot_ids() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;

    let template = [slot("08:00", "12:00")];
    let created = service
        .assign_shifts(ana.id, &[date(2024, 1, 19), date(2024, 1, 20)], &template)
        .await
        .unwrap();

    assert_ne!(created[0].time_slots[0].id, created[1].time_slots[0].id);
    assert_ne!(created[0].time_slots[0].id, template[0].id);
}

#[tokio::test]
async fn duplicate_dates_are_assigned_once() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;

    let day = date(2024, 1, 19);
    let created = service
        .assign_shifts(ana.id, &[day, day], &[slot("08:00", "12:00")])
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
}

#[tokio::test]
async fn overlapping_slots_write_nothing() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;

    let err = service
        .assign_shifts(
            ana.id,
            &[date(2024, 1, 19)],
            &[slot("08:00", "12:00"), slot("11:00", "13:00")],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RosterError::Validation(_)));
    assert!(service.get_all_shifts().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_input_is_rejected() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;

    let err = service
        .assign_shifts(ana.id, &[], &[slot("08:00", "12:00")])
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));

    let err = service
        .assign_shifts(ana.id, &[date(2024, 1, 19)], &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));
}

#[tokio::test]
async fn unknown_professional_is_not_found() {
    let service = ShiftService::new(MemoryStore::new());
    let err = service
        .assign_shifts(Uuid::new_v4(), &[date(2024, 1, 19)], &[slot("08:00", "12:00")])
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::NotFound { kind: "professional", .. }));
}

#[tokio::test]
async fn inactive_professional_cannot_take_shifts() {
    let mut ana = Professional::new("Ana", "Pediatría");
    ana.is_active = false;
    let service = service_with(&ana).await;

    let err = service
        .assign_shifts(ana.id, &[date(2024, 1, 19)], &[slot("08:00", "12:00")])
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));
}

#[tokio::test]
async fn weekday_generation_covers_january_2024() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;

    let created = service
        .generate_monthly_shifts(
            ana.id,
            0,
            2024,
            &[1, 2, 3, 4, 5],
            &[slot("08:00", "12:00"), slot("14:00", "18:00")],
        )
        .await
        .unwrap();

    assert_eq!(created.len(), 23);
    for shift in &created {
        assert_eq!(shift.date.year(), 2024);
        assert_eq!(shift.date.month(), 1);
        let weekday = shift.date.weekday().to_sunday_zero_offset();
        assert!((1..=5).contains(&weekday), "{} is a weekend", shift.date);
    }
}

#[tokio::test]
async fn weekend_generation_in_february_2024() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;

    // Month index 1 is February.
    let created = service
        .generate_monthly_shifts(ana.id, 1, 2024, &[0, 6], &[slot("09:00", "13:00")])
        .await
        .unwrap();
    assert_eq!(created.len(), 8);
    assert!(created.iter().all(|s| s.date.month() == 2));
}

#[tokio::test]
async fn no_work_days_creates_nothing() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;

    let created = service
        .generate_monthly_shifts(ana.id, 0, 2024, &[], &[slot("08:00", "12:00")])
        .await
        .unwrap();
    assert!(created.is_empty());
}

#[tokio::test]
async fn generation_rejects_bad_month_and_weekday() {
    let ana = Professional::new("Ana", "Pediatría");
    let service = service_with(&ana).await;
    let slots = [slot("08:00", "12:00")];

    let err = service
        .generate_monthly_shifts(ana.id, 12, 2024, &[1], &slots)
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));

    let err = service
        .generate_monthly_shifts(ana.id, 0, 2024, &[7], &slots)
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));
    assert!(service.get_all_shifts().await.unwrap().is_empty());
}

/// Accepts a fixed number of shift inserts, then fails.
struct FailingStore {
    inner: MemoryStore,
    inserts_left: AtomicUsize,
}

impl RosterStore for FailingStore {
    async fn list_professionals(&self) -> Result<Vec<Professional>, StorageError> {
        self.inner.list_professionals().await
    }

    async fn get_professional(&self, id: Uuid) -> Result<Professional, StorageError> {
        self.inner.get_professional(id).await
    }

    async fn put_professional(&self, professional: &Professional) -> Result<(), StorageError> {
        self.inner.put_professional(professional).await
    }

    async fn list_shifts(&self) -> Result<Vec<Shift>, StorageError> {
        self.inner.list_shifts().await
    }

    async fn get_shift(&self, id: Uuid) -> Result<Shift, StorageError> {
        self.inner.get_shift(id).await
    }

    async fn insert_shift(&self, shift: &Shift) -> Result<(), StorageError> {
        let left = self.inserts_left.load(Ordering::SeqCst);
        if left == 0 {
            return Err(StorageError::Io(std::io::Error::other("disk full")));
        }
        self.inserts_left.store(left - 1, Ordering::SeqCst);
        self.inner.insert_shift(shift).await
    }

    async fn update_shift(&self, shift: &Shift) -> Result<Shift, StorageError> {
        self.inner.update_shift(shift).await
    }

    async fn append_reassignment(&self, record: &ReassignmentRecord) -> Result<(), StorageError> {
        self.inner.append_reassignment(record).await
    }

    async fn list_reassignments(&self) -> Result<Vec<ReassignmentRecord>, StorageError> {
        self.inner.list_reassignments().await
    }
}

#[tokio::test]
async fn interrupted_assignment_reports_stored_dates() {
    let ana = Professional::new("Ana", "Pediatría");
    let store = FailingStore {
        inner: MemoryStore::new(),
        inserts_left: AtomicUsize::new(2),
    };
    store.put_professional(&ana).await.unwrap();
    let service = ShiftService::new(store);

    let dates: Vec<Date> = (15..=19).map(|d| date(2024, 1, d)).collect();
    let err = service
        .assign_shifts(ana.id, &dates, &[slot("08:00", "12:00")])
        .await
        .unwrap_err();

    match err {
        RosterError::PartialAssignment { persisted, .. } => {
            assert_eq!(persisted, vec![date(2024, 1, 15), date(2024, 1, 16)]);
        }
        other => panic!("expected PartialAssignment, got {other:?}"),
    }
    assert_eq!(service.get_all_shifts().await.unwrap().len(), 2);
}

#[tokio::test]
async fn failure_before_any_write_is_plain_persistence() {
    let ana = Professional::new("Ana", "Pediatría");
    let store = FailingStore {
        inner: MemoryStore::new(),
        inserts_left: AtomicUsize::new(0),
    };
    store.put_professional(&ana).await.unwrap();
    let service = ShiftService::new(store);

    let err = service
        .assign_shifts(ana.id, &[date(2024, 1, 19)], &[slot("08:00", "12:00")])
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::Persistence(_)));
}
