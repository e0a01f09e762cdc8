use practica_core::models::clock_time::ClockTime;
use practica_core::models::time_slot::{TimeSlot, normalize_slots, total_minutes};

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
}

#[test]
fn duration_is_derived_from_endpoints() {
    let s = slot("08:00", "12:30");
    assert_eq!(s.duration, 270);
    assert!(s.validate().is_ok());
}

#[test]
fn rejects_empty_or_inverted_intervals() {
    let eight = ClockTime::new(8, 0).unwrap();
    let noon = ClockTime::new(12, 0).unwrap();
    assert!(TimeSlot::new(eight, eight).is_err());
    assert!(TimeSlot::new(noon, eight).is_err());
}

#[test]
fn validate_catches_tampered_duration() {
    let mut s = slot("08:00", "12:00");
    s.duration = 60;
    assert!(s.validate().is_err());
}

#[test]
fn duration_sum_matches_independent_total() {
    let slots = vec![
        slot("07:00", "09:15"),
        slot("10:00", "12:00"),
        slot("14:00", "18:00"),
        slot("19:30", "23:59"),
    ];

    let summed: u32 = slots.iter().map(|s| u32::from(s.duration)).sum();
    let independent: u32 = slots
        .iter()
        .map(|s| {
            let start = u32::from(s.start_time.hour()) * 60 + u32::from(s.start_time.minute());
            let end = u32::from(s.end_time.hour()) * 60 + u32::from(s.end_time.minute());
            end - start
        })
        .sum();

    assert_eq!(summed, independent);
    assert_eq!(total_minutes(&slots), independent);
}

#[test]
fn normalize_sorts_by_start() {
    let afternoon = slot("14:00", "18:00");
    let morning = slot("08:00", "12:00");

    let sorted = normalize_slots(&[afternoon.clone(), morning.clone()]).unwrap();
    assert_eq!(sorted, vec![morning, afternoon]);
}

#[test]
fn normalize_rejects_overlap_but_allows_touching() {
    assert!(normalize_slots(&[slot("08:00", "12:00"), slot("11:00", "13:00")]).is_err());
    assert!(normalize_slots(&[slot("08:00", "12:00"), slot("12:00", "13:00")]).is_ok());
}
