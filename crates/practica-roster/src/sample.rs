//! Demo data.
//!
//! Fills a month with plausible shifts so the calendar has something to show
//! when no real roster exists yet.

use std::collections::HashSet;

use jiff::civil::Weekday;
use uuid::Uuid;

use practica_core::models::calendar::CalendarMonth;
use practica_core::models::clock_time::ClockTime;
use practica_core::models::professional::Professional;
use practica_core::models::shift::Shift;
use practica_core::models::time_slot::TimeSlot;
use practica_storage::store::RosterStore;

use crate::error::RosterError;
use crate::service::ShiftService;

/// How sample generation treats professionals that already have shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    /// Always add shifts. Running twice duplicates them.
    #[default]
    Append,
    /// Skip professionals that already have a shift in the month.
    SkipExisting,
}

/// Morning and afternoon slot pairs, `(hour, minute)`, rotated across
/// professionals.
const SLOT_PATTERNS: [[((u8, u8), (u8, u8)); 2]; 3] = [
    [((8, 0), (12, 0)), ((14, 0), (18, 0))],
    [((7, 0), (13, 0)), ((15, 0), (19, 0))],
    [((9, 0), (13, 0)), ((16, 0), (20, 0))],
];

const SAMPLE_WEEKDAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

/// A small demo staff.
pub fn sample_professionals() -> Vec<Professional> {
    [
        ("Dra. Ana Martínez", "Medicina General"),
        ("Dr. Carlos Gómez", "Pediatría"),
        ("Lic. Laura Rodríguez", "Enfermería"),
        ("Dr. Andrés López", "Fisioterapia"),
    ]
    .into_iter()
    .map(|(name, specialty)| Professional::new(name, specialty))
    .collect()
}

fn pattern_slots(index: usize) -> Result<Vec<TimeSlot>, RosterError> {
    SLOT_PATTERNS[index % SLOT_PATTERNS.len()]
        .iter()
        .map(|&((sh, sm), (eh, em))| -> Result<TimeSlot, RosterError> {
            Ok(TimeSlot::new(ClockTime::new(sh, sm)?, ClockTime::new(eh, em)?)?)
        })
        .collect()
}

impl<S: RosterStore> ShiftService<S> {
    /// Store the demo staff if there are no professionals yet. Returns how
    /// many were added.
    pub async fn seed_sample_professionals(&self) -> Result<usize, RosterError> {
        if !self.store().list_professionals().await?.is_empty() {
            return Ok(0);
        }

        let professionals = sample_professionals();
        for professional in &professionals {
            self.store().put_professional(professional).await?;
        }
        tracing::info!(count = professionals.len(), "sample professionals seeded");
        Ok(professionals.len())
    }

    /// Generate Monday-Friday shifts for every active professional in the
    /// given month (zero-based).
    pub async fn generate_sample_shifts(
        &self,
        month: i8,
        year: i16,
        mode: SampleMode,
    ) -> Result<Vec<Shift>, RosterError> {
        let month = CalendarMonth::from_zero_based(month, year)?;

        let already_rostered: HashSet<Uuid> = match mode {
            SampleMode::Append => HashSet::new(),
            SampleMode::SkipExisting => self
                .shifts_in_month(month)
                .await?
                .into_iter()
                .map(|s| s.professional_id)
                .collect(),
        };

        let dates: Vec<_> = month
            .days()
            .filter(|d| SAMPLE_WEEKDAYS.contains(&d.weekday()))
            .collect();

        let professionals: Vec<Professional> = self
            .get_all_professionals()
            .await?
            .into_iter()
            .filter(|p| p.is_active)
            .collect();

        let mut created = Vec::new();
        for (index, professional) in professionals.iter().enumerate() {
            if already_rostered.contains(&professional.id) {
                tracing::debug!(professional_id = %professional.id, "already rostered, skipping");
                continue;
            }
            let slots = pattern_slots(index)?;
            created.extend(self.assign_shifts(professional.id, &dates, &slots).await?);
        }

        tracing::info!(
            year = month.year(),
            month = month.month(),
            count = created.len(),
            "sample shifts generated"
        );
        Ok(created)
    }
}
