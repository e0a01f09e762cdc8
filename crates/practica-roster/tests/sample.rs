use std::collections::HashMap;

use practica_core::models::professional::Professional;
use practica_roster::ShiftService;
use practica_roster::sample::{SampleMode, sample_professionals};
use practica_storage::memory::MemoryStore;
use practica_storage::store::RosterStore;

#[tokio::test]
async fn seeding_only_fills_an_empty_store() {
    let service = ShiftService::new(MemoryStore::new());
    let added = service.seed_sample_professionals().await.unwrap();
    assert_eq!(added, sample_professionals().len());

    assert_eq!(service.seed_sample_professionals().await.unwrap(), 0);
    assert_eq!(service.get_all_professionals().await.unwrap().len(), added);
}

#[tokio::test]
async fn samples_cover_weekdays_for_each_active_professional() {
    let service = ShiftService::new(MemoryStore::new());
    service.seed_sample_professionals().await.unwrap();
    let mut retired = Professional::new("Zoe", "Odontología");
    retired.is_active = false;
    service.store().put_professional(&retired).await.unwrap();

    let created = service
        .generate_sample_shifts(0, 2024, SampleMode::Append)
        .await
        .unwrap();

    let active = sample_professionals().len();
    assert_eq!(created.len(), active * 23);
    assert!(created.iter().all(|s| s.professional_id != retired.id));

    let mut per_professional: HashMap<_, usize> = HashMap::new();
    for shift in &created {
        let weekday = shift.date.weekday().to_monday_zero_offset();
        assert!(weekday < 5);
        assert_eq!(shift.time_slots.len(), 2);
        *per_professional.entry(shift.professional_id).or_default() += 1;
    }
    assert_eq!(per_professional.len(), active);
}

#[tokio::test]
async fn skip_existing_does_not_duplicate() {
    let service = ShiftService::new(MemoryStore::new());
    service.seed_sample_professionals().await.unwrap();

    let first = service
        .generate_sample_shifts(5, 2024, SampleMode::SkipExisting)
        .await
        .unwrap();
    assert!(!first.is_empty());

    let second = service
        .generate_sample_shifts(5, 2024, SampleMode::SkipExisting)
        .await
        .unwrap();
    assert!(second.is_empty());

    let appended = service
        .generate_sample_shifts(5, 2024, SampleMode::Append)
        .await
        .unwrap();
    assert_eq!(appended.len(), first.len());
}

#[tokio::test]
async fn no_professionals_means_no_samples() {
    let service = ShiftService::new(MemoryStore::new());
    let created = service
        .generate_sample_shifts(0, 2024, SampleMode::Append)
        .await
        .unwrap();
    assert!(created.is_empty());
}
