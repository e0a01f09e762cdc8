//! Reassignment engine.
//!
//! Moves a shift, or a subset of its time slots, to a different professional.
//! A full reassignment rewrites the shift in place; a partial one detaches the
//! selected slots into a new shift for the new professional. Every
//! reassignment appends a [`ReassignmentRecord`] to the audit log.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::{Shift, ShiftStatus};
use practica_core::models::time_slot::TimeSlot;
use practica_storage::store::RosterStore;

use crate::error::RosterError;
use crate::service::ShiftService;

/// The writes a reassignment needs, computed without touching storage.
#[derive(Debug, Clone)]
pub struct ReassignmentPlan {
    /// The source shift after the change.
    pub updated: Shift,
    /// The shift holding the moved slots (partial reassignments only).
    pub created: Option<Shift>,
    pub record: ReassignmentRecord,
}

/// What a reassignment stored.
#[derive(Debug, Clone, Serialize)]
pub struct ReassignmentOutcome {
    pub shift: Shift,
    pub new_shift: Option<Shift>,
    pub record: ReassignmentRecord,
}

fn validate_reason(reason: &str) -> Result<&str, RosterError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(RosterError::validation("a reassignment reason is required"));
    }
    Ok(reason)
}

/// Work out a reassignment of `shift` to `new_professional`.
///
/// With `is_partial`, `slot_ids` must name a non-empty strict subset of the
/// shift's slots; selecting every slot is a full reassignment and is rejected
/// here. Without `is_partial`, `slot_ids` is ignored.
pub fn plan_reassignment(
    shift: &Shift,
    new_professional: &Professional,
    reason: &str,
    is_partial: bool,
    slot_ids: &[Uuid],
    now: jiff::Timestamp,
) -> Result<ReassignmentPlan, RosterError> {
    let reason = validate_reason(reason)?;

    if new_professional.id == shift.professional_id {
        return Err(RosterError::validation(format!(
            "shift {} already belongs to {}",
            shift.id, shift.professional_name
        )));
    }

    let mut record = ReassignmentRecord {
        id: Uuid::new_v4(),
        shift_id: shift.id,
        new_shift_id: None,
        from_professional_id: shift.professional_id,
        to_professional_id: new_professional.id,
        reason: reason.to_string(),
        is_partial,
        slot_ids: Vec::new(),
        date: shift.date,
        created_at: now,
    };

    if !is_partial {
        let mut updated = shift.clone();
        updated.professional_id = new_professional.id;
        updated.professional_name = new_professional.name.clone();
        updated.status = ShiftStatus::Reassigned;
        updated.reassigned_from = Some(shift.professional_id);
        updated.reassigned_to = Some(new_professional.id);
        updated.is_partial_reassignment = false;
        updated.original_shift_id = Some(shift.id);
        updated.updated_at = now;

        record.slot_ids = shift.slot_ids().collect();
        return Ok(ReassignmentPlan {
            updated,
            created: None,
            record,
        });
    }

    let selected: BTreeSet<Uuid> = slot_ids.iter().copied().collect();
    if selected.is_empty() {
        return Err(RosterError::validation(
            "a partial reassignment needs at least one slot id",
        ));
    }

    let unknown: Vec<String> = selected
        .iter()
        .filter(|id| !shift.time_slots.iter().any(|s| s.id == **id))
        .map(Uuid::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(RosterError::validation(format!(
            "slot(s) not in shift {}: {}",
            shift.id,
            unknown.join(", ")
        )));
    }

    if selected.len() == shift.time_slots.len() {
        return Err(RosterError::validation(
            "selecting every slot is a full reassignment, not a partial one",
        ));
    }

    let (moved, kept): (Vec<TimeSlot>, Vec<TimeSlot>) = shift
        .time_slots
        .iter()
        .cloned()
        .partition(|s| selected.contains(&s.id));

    let mut updated = shift.clone();
    updated.time_slots = kept;
    updated.updated_at = now;

    let created = Shift {
        id: Uuid::new_v4(),
        professional_id: new_professional.id,
        professional_name: new_professional.name.clone(),
        date: shift.date,
        time_slots: moved,
        status: ShiftStatus::Reassigned,
        notes: None,
        created_at: now,
        updated_at: now,
        reassigned_from: Some(shift.professional_id),
        reassigned_to: Some(new_professional.id),
        is_partial_reassignment: true,
        original_shift_id: Some(shift.id),
        version: 0,
    };

    record.new_shift_id = Some(created.id);
    record.slot_ids = created.slot_ids().collect();

    Ok(ReassignmentPlan {
        updated,
        created: Some(created),
        record,
    })
}

impl<S: RosterStore> ShiftService<S> {
    /// Reassign a shift, fully or partially, to another professional.
    ///
    /// The source shift is updated first, under its version check, so a
    /// session holding a stale copy fails before anything else is written.
    /// For a partial move the new shift is stored next; if that fails, the
    /// source gets its slots back. The audit record is appended last.
    pub async fn reassign_shift(
        &self,
        shift_id: Uuid,
        new_professional_id: Uuid,
        reason: &str,
        is_partial: bool,
        slot_ids: &[Uuid],
    ) -> Result<ReassignmentOutcome, RosterError> {
        validate_reason(reason)?;
        let shift = self.get_shift(shift_id).await?;
        let new_professional = self.active_professional(new_professional_id).await?;

        let plan = plan_reassignment(
            &shift,
            &new_professional,
            reason,
            is_partial,
            slot_ids,
            jiff::Timestamp::now(),
        )?;

        let updated = self.store().update_shift(&plan.updated).await?;

        if let Some(created) = &plan.created
            && let Err(e) = self.store().insert_shift(created).await
        {
            tracing::warn!(
                shift_id = %shift_id,
                new_shift_id = %created.id,
                error = %e,
                "new shift could not be stored, restoring source slots"
            );
            self.restore_source(&shift, &updated).await;
            return Err(e.into());
        }

        if let Err(e) = self.store().append_reassignment(&plan.record).await {
            tracing::error!(
                shift_id = %shift_id,
                new_shift_id = ?plan.created.as_ref().map(|s| s.id),
                record_id = %plan.record.id,
                error = %e,
                "shift reassigned but the audit record was not stored"
            );
            return Err(e.into());
        }

        tracing::info!(
            shift_id = %shift_id,
            from = %shift.professional_id,
            to = %new_professional.id,
            partial = is_partial,
            slots = plan.record.slot_ids.len(),
            "shift reassigned"
        );

        Ok(ReassignmentOutcome {
            shift: updated,
            new_shift: plan.created,
            record: plan.record,
        })
    }

    /// Put `original`'s slots back on the source after a failed partial move.
    /// `updated` is the source as stored by the first write.
    async fn restore_source(&self, original: &Shift, updated: &Shift) {
        let mut restored = original.clone();
        restored.version = updated.version;
        restored.updated_at = jiff::Timestamp::now();

        if let Err(e) = self.store().update_shift(&restored).await {
            tracing::error!(
                shift_id = %original.id,
                error = %e,
                "source shift could not be restored; moved slots are missing"
            );
        }
    }
}
