use std::collections::BTreeSet;

use jiff::civil::{Date, Weekday};
use uuid::Uuid;

use practica_core::calendar::build_monthly_view;
use practica_core::error::CoreError;
use practica_core::models::calendar::{CalendarMonth, MonthlyShiftView};
use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::{Shift, ShiftStatus};
use practica_core::models::time_slot::{TimeSlot, normalize_slots};
use practica_storage::store::RosterStore;

use crate::error::RosterError;

/// The shift store: every rostering operation, over an injected
/// [`RosterStore`].
pub struct ShiftService<S> {
    store: S,
}

impl<S: RosterStore> ShiftService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All professionals, sorted by name.
    pub async fn get_all_professionals(&self) -> Result<Vec<Professional>, RosterError> {
        let mut professionals = self.store.list_professionals().await?;
        professionals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(professionals)
    }

    pub async fn get_professional(&self, id: Uuid) -> Result<Professional, RosterError> {
        self.store
            .get_professional(id)
            .await
            .map_err(RosterError::lookup("professional", id))
    }

    /// Look up a professional that may receive new shifts.
    pub(crate) async fn active_professional(&self, id: Uuid) -> Result<Professional, RosterError> {
        let professional = self.get_professional(id).await?;
        if !professional.is_active {
            return Err(RosterError::validation(format!(
                "professional {} ({id}) is inactive",
                professional.name
            )));
        }
        Ok(professional)
    }

    /// Insert or replace a professional.
    ///
    /// A name change rewrites the `professional_name` snapshot on every shift
    /// the professional currently owns.
    pub async fn upsert_professional(
        &self,
        mut professional: Professional,
    ) -> Result<Professional, RosterError> {
        let name = professional.name.trim();
        if name.is_empty() {
            return Err(RosterError::validation("professional name is required"));
        }
        professional.name = name.to_string();

        let previous = match self.store.get_professional(professional.id).await {
            Ok(p) => Some(p),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        };

        self.store.put_professional(&professional).await?;

        if let Some(previous) = previous
            && previous.name != professional.name
        {
            let refreshed = self.refresh_name_snapshots(&professional).await?;
            tracing::info!(
                professional_id = %professional.id,
                refreshed,
                "professional renamed"
            );
        }

        Ok(professional)
    }

    pub async fn rename_professional(
        &self,
        id: Uuid,
        name: &str,
    ) -> Result<Professional, RosterError> {
        let mut professional = self.get_professional(id).await?;
        professional.name = name.to_string();
        self.upsert_professional(professional).await
    }

    async fn refresh_name_snapshots(
        &self,
        professional: &Professional,
    ) -> Result<usize, RosterError> {
        let stale: Vec<Shift> = self
            .store
            .list_shifts()
            .await?
            .into_iter()
            .filter(|s| {
                s.professional_id == professional.id && s.professional_name != professional.name
            })
            .collect();

        let count = stale.len();
        let now = jiff::Timestamp::now();
        for mut shift in stale {
            shift.professional_name = professional.name.clone();
            shift.updated_at = now;
            self.store.update_shift(&shift).await?;
        }
        Ok(count)
    }

    /// Every shift, by date then start time.
    pub async fn get_all_shifts(&self) -> Result<Vec<Shift>, RosterError> {
        let mut shifts = self.store.list_shifts().await?;
        sort_shifts(&mut shifts);
        Ok(shifts)
    }

    pub async fn get_shift(&self, id: Uuid) -> Result<Shift, RosterError> {
        self.store
            .get_shift(id)
            .await
            .map_err(RosterError::lookup("shift", id))
    }

    /// Shifts dated within a month. `month` is zero-based (0 = January).
    pub async fn get_shifts_by_month(
        &self,
        month: i8,
        year: i16,
    ) -> Result<Vec<Shift>, RosterError> {
        let month = CalendarMonth::from_zero_based(month, year)?;
        self.shifts_in_month(month).await
    }

    pub(crate) async fn shifts_in_month(
        &self,
        month: CalendarMonth,
    ) -> Result<Vec<Shift>, RosterError> {
        let mut shifts: Vec<Shift> = self
            .store
            .list_shifts()
            .await?
            .into_iter()
            .filter(|s| s.is_in_month(month))
            .collect();
        sort_shifts(&mut shifts);
        Ok(shifts)
    }

    pub async fn get_shifts_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<Shift>, RosterError> {
        self.get_professional(professional_id).await?;

        let mut shifts: Vec<Shift> = self
            .store
            .list_shifts()
            .await?
            .into_iter()
            .filter(|s| s.professional_id == professional_id)
            .collect();
        sort_shifts(&mut shifts);
        Ok(shifts)
    }

    /// The week/day calendar grid for a month. `month` is zero-based.
    pub async fn create_monthly_shift_view(
        &self,
        month: i8,
        year: i16,
    ) -> Result<MonthlyShiftView, RosterError> {
        let month = CalendarMonth::from_zero_based(month, year)?;
        let shifts = self.shifts_in_month(month).await?;
        Ok(build_monthly_view(month, &shifts))
    }

    /// Reassignment audit records, newest first. With `shift_id`, only the
    /// records that touch that shift.
    pub async fn get_reassignment_history(
        &self,
        shift_id: Option<Uuid>,
    ) -> Result<Vec<ReassignmentRecord>, RosterError> {
        let mut records: Vec<ReassignmentRecord> = self
            .store
            .list_reassignments()
            .await?
            .into_iter()
            .filter(|r| shift_id.is_none_or(|id| r.involves(id)))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Create one `Asignado` shift per date with the given slots.
    ///
    /// Input is validated before anything is written. Dates are then stored one
    /// at a time; if the store fails part way, the shifts already stored stay
    /// and the error lists their dates.
    pub async fn assign_shifts(
        &self,
        professional_id: Uuid,
        dates: &[Date],
        time_slots: &[TimeSlot],
    ) -> Result<Vec<Shift>, RosterError> {
        let professional = self.active_professional(professional_id).await?;
        if dates.is_empty() {
            return Err(RosterError::validation("at least one date is required"));
        }
        let template = slot_template(time_slots)?;
        let dates: BTreeSet<Date> = dates.iter().copied().collect();

        self.persist_assignments(&professional, dates, &template).await
    }

    /// Assign a shift on every date of the month whose weekday is listed in
    /// `work_days` (0 = Sunday .. 6 = Saturday). `month` is zero-based.
    pub async fn generate_monthly_shifts(
        &self,
        professional_id: Uuid,
        month: i8,
        year: i16,
        work_days: &[i8],
        time_slots: &[TimeSlot],
    ) -> Result<Vec<Shift>, RosterError> {
        let month = CalendarMonth::from_zero_based(month, year)?;
        let professional = self.active_professional(professional_id).await?;
        let weekdays = parse_work_days(work_days)?;
        let template = slot_template(time_slots)?;

        let dates: BTreeSet<Date> = month
            .days()
            .filter(|d| weekdays.contains(&d.weekday()))
            .collect();
        if dates.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(
            professional_id = %professional.id,
            year = month.year(),
            month = month.month(),
            dates = dates.len(),
            "generating monthly shifts"
        );
        self.persist_assignments(&professional, dates, &template).await
    }

    async fn persist_assignments(
        &self,
        professional: &Professional,
        dates: BTreeSet<Date>,
        template: &[TimeSlot],
    ) -> Result<Vec<Shift>, RosterError> {
        let now = jiff::Timestamp::now();
        let mut created: Vec<Shift> = Vec::with_capacity(dates.len());

        for date in dates {
            let slots = template
                .iter()
                .map(|s| TimeSlot::new(s.start_time, s.end_time))
                .collect::<Result<Vec<_>, _>>()?;
            let shift = Shift::assigned(professional, date, slots, now);

            if let Err(source) = self.store.insert_shift(&shift).await {
                tracing::error!(
                    professional_id = %professional.id,
                    %date,
                    persisted = created.len(),
                    error = %source,
                    "shift assignment interrupted"
                );
                if created.is_empty() {
                    return Err(source.into());
                }
                return Err(RosterError::PartialAssignment {
                    persisted: created.iter().map(|s| s.date).collect(),
                    source,
                });
            }
            created.push(shift);
        }

        tracing::info!(
            professional_id = %professional.id,
            count = created.len(),
            "shifts assigned"
        );
        Ok(created)
    }

    /// Change a shift's status, optionally replacing its notes. Empty notes
    /// clear them. `Reasignado` can only be reached through reassignment.
    pub async fn update_shift_status(
        &self,
        id: Uuid,
        status: ShiftStatus,
        notes: Option<String>,
    ) -> Result<Shift, RosterError> {
        if status == ShiftStatus::Reassigned {
            return Err(RosterError::validation(
                "status Reasignado is set only by reassigning the shift",
            ));
        }

        let mut shift = self.get_shift(id).await?;
        let previous = shift.status;
        shift.status = status;
        if let Some(notes) = notes {
            let notes = notes.trim();
            shift.notes = (!notes.is_empty()).then(|| notes.to_string());
        }
        shift.updated_at = jiff::Timestamp::now();

        let stored = self.store.update_shift(&shift).await?;
        tracing::info!(
            shift_id = %id,
            from = previous.label(),
            to = status.label(),
            "shift status updated"
        );
        Ok(stored)
    }
}

fn sort_shifts(shifts: &mut [Shift]) {
    shifts.sort_by(|a, b| {
        (a.date, a.first_start(), a.created_at).cmp(&(b.date, b.first_start(), b.created_at))
    });
}

fn slot_template(time_slots: &[TimeSlot]) -> Result<Vec<TimeSlot>, RosterError> {
    if time_slots.is_empty() {
        return Err(RosterError::validation("at least one time slot is required"));
    }
    Ok(normalize_slots(time_slots)?)
}

fn parse_work_days(work_days: &[i8]) -> Result<Vec<Weekday>, RosterError> {
    work_days
        .iter()
        .map(|&d| {
            Weekday::from_sunday_zero_offset(d)
                .map_err(|_| RosterError::from(CoreError::InvalidWeekday(d)))
        })
        .collect()
}
