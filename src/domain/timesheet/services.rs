use crate::domain::directory::{AssignedCompanyParams, AssignmentPort};
use crate::domain::timesheet::week::WeekGroup;
use crate::domain::timesheet::{
    ApproveAllError, ApproveAllParams, ApproveAllResult, BulkUpdateDBParams,
    ConditionalUpdateDBParams, CountEntriesDBParams, CreateEntryError, CreateEntryParams,
    CreateEntryResult, EntryChange, EntryPatch, EntryStatus, EntryStore, FindEntryDBParams,
    InsertEntryDBParams, ListEntriesDBParams, ListEntriesError, ListEntriesParams,
    ListEntriesResult, ReviewDecision, Role, SubmitToDeanError, SubmitToDeanParams,
    SubmitToDeanResult, SubmitWeekError, SubmitWeekParams, SubmitWeekResult, TimesheetService,
    UpdateEntryError, UpdateEntryParams, UpdateEntryResult, WeekViewError, WeekViewParams,
    WeekViewResult,
};
use crate::domain::timesheet::{hours, permissions, transitions, week};
use async_trait::async_trait;
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone)]
pub struct Service<DB, DIR>
where
    DB: EntryStore,
    DIR: AssignmentPort,
{
    db: DB,
    directory: DIR,
}

impl<DB, DIR> Service<DB, DIR>
where
    DB: EntryStore,
    DIR: AssignmentPort,
{
    pub fn new(db: DB, directory: DIR) -> Self {
        Self { db, directory }
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[async_trait]
impl<DB, DIR> TimesheetService for Service<DB, DIR>
where
    DB: EntryStore,
    DIR: AssignmentPort,
{
    async fn create_entry(
        &self,
        params: CreateEntryParams,
    ) -> Result<CreateEntryResult, CreateEntryError> {
        if params.actor.role != Role::Student {
            return Err(CreateEntryError::NotAStudent);
        }
        if params.break_minutes < 0 {
            return Err(CreateEntryError::NegativeBreak);
        }
        if params.entry_date > today() {
            return Err(CreateEntryError::FutureDate);
        }

        let time_in = hours::parse_clock(&params.time_in)?;
        let time_out = hours::parse_clock(&params.time_out)?;

        let company_id = self
            .directory
            .assigned_company(AssignedCompanyParams {
                student_id: params.actor.id,
            })
            .await?
            .ok_or(CreateEntryError::NoAssignedCompany)?;

        let start = week::week_start(params.entry_date);
        let count = self
            .db
            .count_entries_in_range(CountEntriesDBParams {
                student_id: params.actor.id,
                from: start,
                to: week::week_end(params.entry_date),
            })
            .await?;
        if count >= 7 {
            return Err(CreateEntryError::WeekFull(start));
        }

        let result = self
            .db
            .insert_entry_if_absent(InsertEntryDBParams {
                student_id: params.actor.id,
                company_id,
                entry_date: params.entry_date,
                time_in,
                time_out,
                break_minutes: params.break_minutes,
                total_hours: hours::total_hours(time_in, time_out, params.break_minutes),
            })
            .await;

        match result {
            Ok(entry) => Ok(CreateEntryResult { entry }),
            Err(crate::outbound::db::error::Error::OnConflict) => {
                Err(CreateEntryError::DuplicateDay(params.entry_date))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_entry(
        &self,
        params: UpdateEntryParams,
    ) -> Result<UpdateEntryResult, UpdateEntryError> {
        let entry = self
            .db
            .find_entry_by_id(FindEntryDBParams {
                entry_id: params.entry_id,
            })
            .await?
            .ok_or(UpdateEntryError::NotFound)?;

        match params.actor.role {
            Role::Student if entry.student_id != params.actor.id => {
                return Err(UpdateEntryError::WrongActor);
            }
            Role::Company if entry.company_id != params.actor.id => {
                return Err(UpdateEntryError::WrongActor);
            }
            _ => {}
        }

        if entry.status != params.expected_status {
            return Err(UpdateEntryError::StaleStatus {
                expected: params.expected_status,
                current: entry.status,
            });
        }

        let patch = match params.change {
            EntryChange::Times {
                time_in,
                time_out,
                break_minutes,
            } => {
                permissions::can_edit_times(
                    params.actor.role,
                    entry.status,
                    entry.entry_date,
                    today(),
                )?;
                if break_minutes < 0 {
                    return Err(UpdateEntryError::NegativeBreak);
                }
                let time_in = hours::parse_clock(&time_in)?;
                let time_out = hours::parse_clock(&time_out)?;

                // A student reworking a declined entry sends it back through
                // review; a company edit flags the change to the student.
                let status = match (params.actor.role, entry.status) {
                    (Role::Student, EntryStatus::CompanyDeclined) => Some(EntryStatus::Pending),
                    (Role::Company, EntryStatus::SubmittedToCompany) => {
                        Some(EntryStatus::EditedByCompany)
                    }
                    _ => None,
                };

                EntryPatch {
                    time_in: Some(time_in),
                    time_out: Some(time_out),
                    break_minutes: Some(break_minutes),
                    total_hours: Some(hours::total_hours(time_in, time_out, break_minutes)),
                    status,
                    ..Default::default()
                }
            }
            EntryChange::Submit => {
                permissions::can_transition(
                    params.actor.role,
                    entry.status,
                    EntryStatus::SubmittedToCompany,
                )?;

                EntryPatch {
                    status: Some(EntryStatus::SubmittedToCompany),
                    ..Default::default()
                }
            }
            EntryChange::Review { decision, notes } => {
                let target = decision.target();
                permissions::can_transition(params.actor.role, entry.status, target)?;

                let (company_notes, dean_notes) = match decision {
                    ReviewDecision::CompanyApprove | ReviewDecision::CompanyDecline => (notes, None),
                    ReviewDecision::DeanApprove | ReviewDecision::DeanDecline => (None, notes),
                };

                EntryPatch {
                    status: Some(target),
                    company_notes,
                    dean_notes,
                    ..Default::default()
                }
            }
        };

        let updated = self
            .db
            .update_entry_conditional(ConditionalUpdateDBParams {
                entry_id: params.entry_id,
                expected_status: params.expected_status,
                patch,
            })
            .await?;

        match updated {
            Some(entry) => Ok(UpdateEntryResult { entry }),
            None => {
                // Lost the race between our read and the conditional write;
                // report where the record actually is now.
                let current = self
                    .db
                    .find_entry_by_id(FindEntryDBParams {
                        entry_id: params.entry_id,
                    })
                    .await?
                    .ok_or(UpdateEntryError::NotFound)?;

                Err(UpdateEntryError::StaleStatus {
                    expected: params.expected_status,
                    current: current.status,
                })
            }
        }
    }

    async fn list_entries(
        &self,
        params: ListEntriesParams,
    ) -> Result<ListEntriesResult, ListEntriesError> {
        let (student_id, company_id) = match params.actor.role {
            Role::Student => {
                if params.student_id.is_some_and(|id| id != params.actor.id) {
                    return Err(ListEntriesError::WrongActor);
                }
                (Some(params.actor.id), None)
            }
            Role::Company => (params.student_id, Some(params.actor.id)),
            Role::Administrator => (params.student_id, None),
        };

        let entries = self
            .db
            .list_entries(ListEntriesDBParams {
                student_id,
                company_id,
                from: params.from,
                to: params.to,
            })
            .await?;

        Ok(ListEntriesResult { entries })
    }

    async fn week_view(&self, params: WeekViewParams) -> Result<WeekViewResult, WeekViewError> {
        match params.actor.role {
            Role::Student => {
                if params.student_id != params.actor.id {
                    return Err(WeekViewError::WrongActor);
                }
            }
            Role::Company => {
                let assigned = self
                    .directory
                    .assigned_company(AssignedCompanyParams {
                        student_id: params.student_id,
                    })
                    .await?;
                if assigned != Some(params.actor.id) {
                    return Err(WeekViewError::WrongActor);
                }
            }
            Role::Administrator => {}
        }

        let entries = self
            .db
            .list_entries(ListEntriesDBParams {
                student_id: Some(params.student_id),
                company_id: None,
                from: Some(week::week_start(params.week_of)),
                to: Some(week::week_end(params.week_of)),
            })
            .await?;

        Ok(WeekViewResult {
            week: WeekGroup::build(params.student_id, params.week_of, entries),
        })
    }

    async fn submit_week(
        &self,
        params: SubmitWeekParams,
    ) -> Result<SubmitWeekResult, SubmitWeekError> {
        if params.actor.role != Role::Student {
            return Err(SubmitWeekError::NotAStudent);
        }
        if params.from > params.to {
            return Err(SubmitWeekError::InvalidRange);
        }

        transitions::validate_transition(
            Role::Student,
            EntryStatus::Pending,
            EntryStatus::SubmittedToCompany,
        )?;

        let affected = self
            .db
            .update_entries_where(BulkUpdateDBParams {
                student_id: params.actor.id,
                company_id: None,
                from: Some(params.from),
                to: Some(params.to),
                from_status: EntryStatus::Pending,
                to_status: EntryStatus::SubmittedToCompany,
            })
            .await?;

        Ok(SubmitWeekResult { affected })
    }

    async fn approve_all(
        &self,
        params: ApproveAllParams,
    ) -> Result<ApproveAllResult, ApproveAllError> {
        if params.actor.role != Role::Company {
            return Err(ApproveAllError::NotACompany);
        }

        let assigned = self
            .directory
            .assigned_company(AssignedCompanyParams {
                student_id: params.student_id,
            })
            .await?;
        if assigned != Some(params.actor.id) {
            return Err(ApproveAllError::NotAssigned);
        }

        transitions::validate_transition(
            Role::Company,
            EntryStatus::SubmittedToCompany,
            EntryStatus::CompanyApproved,
        )?;

        let affected = self
            .db
            .update_entries_where(BulkUpdateDBParams {
                student_id: params.student_id,
                company_id: Some(params.actor.id),
                from: None,
                to: None,
                from_status: EntryStatus::SubmittedToCompany,
                to_status: EntryStatus::CompanyApproved,
            })
            .await?;

        Ok(ApproveAllResult { affected })
    }

    async fn submit_to_dean(
        &self,
        params: SubmitToDeanParams,
    ) -> Result<SubmitToDeanResult, SubmitToDeanError> {
        match params.actor.role {
            Role::Student if params.student_id == params.actor.id => {}
            Role::Administrator => {}
            _ => return Err(SubmitToDeanError::WrongActor),
        }

        transitions::validate_transition(
            Role::Student,
            EntryStatus::CompanyApproved,
            EntryStatus::SubmittedToDean,
        )?;

        let affected = self
            .db
            .update_entries_where(BulkUpdateDBParams {
                student_id: params.student_id,
                company_id: None,
                from: None,
                to: None,
                from_status: EntryStatus::CompanyApproved,
                to_status: EntryStatus::SubmittedToDean,
            })
            .await?;

        if affected == 0 {
            return Err(SubmitToDeanError::NothingEligible);
        }

        Ok(SubmitToDeanResult { affected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::MockAssignmentPort;
    use crate::domain::timesheet::permissions::PermissionError;
    use crate::domain::timesheet::transitions::TransitionError;
    use crate::domain::timesheet::week::WeekStatus;
    use crate::domain::timesheet::{Actor, MockEntryStore, TimesheetEntry};
    use crate::outbound::db::error::Error as DatabaseError;
    use std::future;
    use time::Duration;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    fn student() -> Actor {
        Actor {
            id: Uuid::now_v7(),
            role: Role::Student,
        }
    }

    fn company() -> Actor {
        Actor {
            id: Uuid::now_v7(),
            role: Role::Company,
        }
    }

    fn administrator() -> Actor {
        Actor {
            id: Uuid::now_v7(),
            role: Role::Administrator,
        }
    }

    fn entry_for(student_id: Uuid, company_id: Uuid, status: EntryStatus) -> TimesheetEntry {
        TimesheetEntry {
            id: Uuid::now_v7(),
            student_id,
            company_id,
            entry_date: date!(2024 - 01 - 10),
            time_in: 540,
            time_out: 1020,
            break_minutes: 60,
            total_hours: 7.0,
            status,
            company_notes: None,
            dean_notes: None,
            created_at: datetime!(2024-01-10 08:00),
            updated_at: datetime!(2024-01-10 08:00),
        }
    }

    fn service(
        db: MockEntryStore,
        directory: MockAssignmentPort,
    ) -> Service<MockEntryStore, MockAssignmentPort> {
        Service::new(db, directory)
    }

    #[tokio::test]
    async fn test_create_entry() {
        let actor = student();
        let company_id = Uuid::now_v7();
        let created = entry_for(actor.id, company_id, EntryStatus::Pending);

        let mut directory = MockAssignmentPort::new();
        directory
            .expect_assigned_company()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(company_id)))));

        let mut db = MockEntryStore::new();
        db.expect_count_entries_in_range()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(3))));
        db.expect_insert_entry_if_absent()
            .withf(move |p| {
                p.company_id == company_id
                    && p.time_in == 540
                    && p.time_out == 1020
                    && p.break_minutes == 60
                    && p.total_hours == 7.0
            })
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(created))));

        let result = service(db, directory)
            .create_entry(CreateEntryParams {
                actor,
                entry_date: date!(2024 - 01 - 10),
                time_in: "09:00".to_string(),
                time_out: "17:00".to_string(),
                break_minutes: 60,
            })
            .await
            .unwrap();

        assert_eq!(EntryStatus::Pending, result.entry.status);
        assert_eq!(7.0, result.entry.total_hours);
    }

    #[tokio::test]
    async fn test_create_entry_duplicate_day() {
        let actor = student();
        let company_id = Uuid::now_v7();

        let mut directory = MockAssignmentPort::new();
        directory
            .expect_assigned_company()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(company_id)))));

        let mut db = MockEntryStore::new();
        db.expect_count_entries_in_range()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(1))));
        db.expect_insert_entry_if_absent()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Err(DatabaseError::OnConflict))));

        let result = service(db, directory)
            .create_entry(CreateEntryParams {
                actor,
                entry_date: date!(2024 - 01 - 10),
                time_in: "09:00".to_string(),
                time_out: "17:00".to_string(),
                break_minutes: 60,
            })
            .await;

        assert!(matches!(
            result,
            Err(CreateEntryError::DuplicateDay(d)) if d == date!(2024 - 01 - 10)
        ));
    }

    #[tokio::test]
    async fn test_create_entry_week_full() {
        let actor = student();
        let company_id = Uuid::now_v7();

        let mut directory = MockAssignmentPort::new();
        directory
            .expect_assigned_company()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(company_id)))));

        let mut db = MockEntryStore::new();
        db.expect_count_entries_in_range()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(7))));

        let result = service(db, directory)
            .create_entry(CreateEntryParams {
                actor,
                entry_date: date!(2024 - 01 - 10),
                time_in: "09:00".to_string(),
                time_out: "17:00".to_string(),
                break_minutes: 60,
            })
            .await;

        // 2024-01-10 is a Wednesday; its week starts Monday the 8th.
        assert!(matches!(
            result,
            Err(CreateEntryError::WeekFull(d)) if d == date!(2024 - 01 - 08)
        ));
    }

    #[tokio::test]
    async fn test_create_entry_no_assigned_company() {
        let actor = student();

        let mut directory = MockAssignmentPort::new();
        directory
            .expect_assigned_company()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(None))));

        let db = MockEntryStore::new();

        let result = service(db, directory)
            .create_entry(CreateEntryParams {
                actor,
                entry_date: date!(2024 - 01 - 10),
                time_in: "09:00".to_string(),
                time_out: "17:00".to_string(),
                break_minutes: 0,
            })
            .await;

        assert!(matches!(result, Err(CreateEntryError::NoAssignedCompany)));
    }

    #[tokio::test]
    async fn test_create_entry_requires_student() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .create_entry(CreateEntryParams {
                actor: company(),
                entry_date: date!(2024 - 01 - 10),
                time_in: "09:00".to_string(),
                time_out: "17:00".to_string(),
                break_minutes: 0,
            })
            .await;

        assert!(matches!(result, Err(CreateEntryError::NotAStudent)));
    }

    #[tokio::test]
    async fn test_create_entry_rejects_malformed_clock() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .create_entry(CreateEntryParams {
                actor: student(),
                entry_date: date!(2024 - 01 - 10),
                time_in: "nine".to_string(),
                time_out: "17:00".to_string(),
                break_minutes: 0,
            })
            .await;

        assert!(matches!(result, Err(CreateEntryError::InvalidClock(_))));
    }

    #[tokio::test]
    async fn test_create_entry_rejects_negative_break() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .create_entry(CreateEntryParams {
                actor: student(),
                entry_date: date!(2024 - 01 - 10),
                time_in: "09:00".to_string(),
                time_out: "17:00".to_string(),
                break_minutes: -15,
            })
            .await;

        assert!(matches!(result, Err(CreateEntryError::NegativeBreak)));
    }

    #[tokio::test]
    async fn test_create_entry_rejects_future_date() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .create_entry(CreateEntryParams {
                actor: student(),
                entry_date: today() + Duration::days(1),
                time_in: "09:00".to_string(),
                time_out: "17:00".to_string(),
                break_minutes: 0,
            })
            .await;

        assert!(matches!(result, Err(CreateEntryError::FutureDate)));
    }

    #[tokio::test]
    async fn test_update_entry_student_edit_recomputes_hours() {
        let actor = student();
        let entry = entry_for(actor.id, Uuid::now_v7(), EntryStatus::Pending);
        let entry_id = entry.id;
        let updated = TimesheetEntry {
            time_in: 1320,
            time_out: 360,
            break_minutes: 30,
            total_hours: 7.5,
            ..entry.clone()
        };

        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(entry)))));
        db.expect_update_entry_conditional()
            .withf(move |p| {
                p.entry_id == entry_id
                    && p.expected_status == EntryStatus::Pending
                    && p.patch.total_hours == Some(7.5)
                    && p.patch.status.is_none()
            })
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(updated)))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::Pending,
                change: EntryChange::Times {
                    time_in: "22:00".to_string(),
                    time_out: "06:00".to_string(),
                    break_minutes: 30,
                },
            })
            .await
            .unwrap();

        assert_eq!(7.5, result.entry.total_hours);
    }

    #[tokio::test]
    async fn test_update_entry_declined_edit_reverts_to_pending() {
        let actor = student();
        let entry = entry_for(actor.id, Uuid::now_v7(), EntryStatus::CompanyDeclined);
        let entry_id = entry.id;
        let updated = TimesheetEntry {
            status: EntryStatus::Pending,
            ..entry.clone()
        };

        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(entry)))));
        db.expect_update_entry_conditional()
            .withf(|p| p.patch.status == Some(EntryStatus::Pending))
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(updated)))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::CompanyDeclined,
                change: EntryChange::Times {
                    time_in: "08:00".to_string(),
                    time_out: "16:00".to_string(),
                    break_minutes: 30,
                },
            })
            .await
            .unwrap();

        assert_eq!(EntryStatus::Pending, result.entry.status);
    }

    #[tokio::test]
    async fn test_update_entry_company_edit_marks_edited() {
        let actor = company();
        let entry = entry_for(Uuid::now_v7(), actor.id, EntryStatus::SubmittedToCompany);
        let entry_id = entry.id;
        let updated = TimesheetEntry {
            status: EntryStatus::EditedByCompany,
            ..entry.clone()
        };

        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(entry)))));
        db.expect_update_entry_conditional()
            .withf(|p| p.patch.status == Some(EntryStatus::EditedByCompany))
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(updated)))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::SubmittedToCompany,
                change: EntryChange::Times {
                    time_in: "09:00".to_string(),
                    time_out: "18:00".to_string(),
                    break_minutes: 45,
                },
            })
            .await
            .unwrap();

        assert_eq!(EntryStatus::EditedByCompany, result.entry.status);
    }

    #[tokio::test]
    async fn test_update_entry_submit_single() {
        let actor = student();
        let entry = entry_for(actor.id, Uuid::now_v7(), EntryStatus::Pending);
        let entry_id = entry.id;
        let updated = TimesheetEntry {
            status: EntryStatus::SubmittedToCompany,
            ..entry.clone()
        };

        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(entry)))));
        db.expect_update_entry_conditional()
            .withf(|p| p.patch.status == Some(EntryStatus::SubmittedToCompany))
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(updated)))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::Pending,
                change: EntryChange::Submit,
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_entry_company_decline_with_notes() {
        let actor = company();
        let entry = entry_for(Uuid::now_v7(), actor.id, EntryStatus::SubmittedToCompany);
        let entry_id = entry.id;
        let updated = TimesheetEntry {
            status: EntryStatus::CompanyDeclined,
            company_notes: Some("break missing".to_string()),
            ..entry.clone()
        };

        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(entry)))));
        db.expect_update_entry_conditional()
            .withf(|p| {
                p.patch.status == Some(EntryStatus::CompanyDeclined)
                    && p.patch.company_notes.as_deref() == Some("break missing")
                    && p.patch.dean_notes.is_none()
            })
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(updated)))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::SubmittedToCompany,
                change: EntryChange::Review {
                    decision: ReviewDecision::CompanyDecline,
                    notes: Some("break missing".to_string()),
                },
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_entry_dean_approve_pending_is_state_error() {
        let actor = administrator();
        let entry = entry_for(Uuid::now_v7(), Uuid::now_v7(), EntryStatus::Pending);
        let entry_id = entry.id;

        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(entry)))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::Pending,
                change: EntryChange::Review {
                    decision: ReviewDecision::DeanApprove,
                    notes: None,
                },
            })
            .await;

        assert!(matches!(
            result,
            Err(UpdateEntryError::NotPermitted(PermissionError::Transition(
                TransitionError {
                    from: EntryStatus::Pending,
                    to: EntryStatus::DeanApproved,
                    ..
                }
            )))
        ));
    }

    #[tokio::test]
    async fn test_update_entry_stale_expected_status() {
        let actor = student();
        let entry = entry_for(actor.id, Uuid::now_v7(), EntryStatus::SubmittedToCompany);
        let entry_id = entry.id;

        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(entry)))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::Pending,
                change: EntryChange::Submit,
            })
            .await;

        assert!(matches!(
            result,
            Err(UpdateEntryError::StaleStatus {
                expected: EntryStatus::Pending,
                current: EntryStatus::SubmittedToCompany,
            })
        ));
    }

    #[tokio::test]
    async fn test_update_entry_conditional_write_missed() {
        let actor = company();
        let entry = entry_for(Uuid::now_v7(), actor.id, EntryStatus::SubmittedToCompany);
        let entry_id = entry.id;
        let raced = TimesheetEntry {
            status: EntryStatus::CompanyApproved,
            ..entry.clone()
        };

        let mut db = MockEntryStore::new();
        let mut found = vec![Some(raced), Some(entry)];
        db.expect_find_entry_by_id()
            .times(2)
            .returning(move |_| Box::pin(future::ready(Ok(found.pop().unwrap()))));
        db.expect_update_entry_conditional()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(None))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::SubmittedToCompany,
                change: EntryChange::Review {
                    decision: ReviewDecision::CompanyApprove,
                    notes: None,
                },
            })
            .await;

        assert!(matches!(
            result,
            Err(UpdateEntryError::StaleStatus {
                current: EntryStatus::CompanyApproved,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_update_entry_wrong_student() {
        let actor = student();
        let entry = entry_for(Uuid::now_v7(), Uuid::now_v7(), EntryStatus::Pending);
        let entry_id = entry.id;

        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(entry)))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor,
                entry_id,
                expected_status: EntryStatus::Pending,
                change: EntryChange::Submit,
            })
            .await;

        assert!(matches!(result, Err(UpdateEntryError::WrongActor)));
    }

    #[tokio::test]
    async fn test_update_entry_not_found() {
        let mut db = MockEntryStore::new();
        db.expect_find_entry_by_id()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(None))));

        let result = service(db, MockAssignmentPort::new())
            .update_entry(UpdateEntryParams {
                actor: student(),
                entry_id: Uuid::now_v7(),
                expected_status: EntryStatus::Pending,
                change: EntryChange::Submit,
            })
            .await;

        assert!(matches!(result, Err(UpdateEntryError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_entries_student_scoped_to_self() {
        let actor = student();
        let actor_id = actor.id;

        let mut db = MockEntryStore::new();
        db.expect_list_entries()
            .withf(move |p| p.student_id == Some(actor_id) && p.company_id.is_none())
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(vec![]))));

        let result = service(db, MockAssignmentPort::new())
            .list_entries(ListEntriesParams {
                actor,
                student_id: None,
                from: None,
                to: None,
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_list_entries_student_cannot_read_others() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .list_entries(ListEntriesParams {
                actor: student(),
                student_id: Some(Uuid::now_v7()),
                from: None,
                to: None,
            })
            .await;

        assert!(matches!(result, Err(ListEntriesError::WrongActor)));
    }

    #[tokio::test]
    async fn test_list_entries_company_scoped_to_own_students() {
        let actor = company();
        let actor_id = actor.id;

        let mut db = MockEntryStore::new();
        db.expect_list_entries()
            .withf(move |p| p.company_id == Some(actor_id))
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(vec![]))));

        let result = service(db, MockAssignmentPort::new())
            .list_entries(ListEntriesParams {
                actor,
                student_id: None,
                from: None,
                to: None,
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_week_view_student_own_week() {
        let actor = student();
        let entries = vec![
            entry_for(actor.id, Uuid::now_v7(), EntryStatus::CompanyApproved),
            entry_for(actor.id, Uuid::now_v7(), EntryStatus::CompanyDeclined),
        ];

        let mut db = MockEntryStore::new();
        db.expect_list_entries()
            .withf(|p| {
                p.from == Some(date!(2024 - 01 - 08)) && p.to == Some(date!(2024 - 01 - 14))
            })
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(entries))));

        let result = service(db, MockAssignmentPort::new())
            .week_view(WeekViewParams {
                actor,
                student_id: actor.id,
                week_of: date!(2024 - 01 - 10),
            })
            .await
            .unwrap();

        // The decline outranks everything else in the week.
        assert_eq!(WeekStatus::NeedsStudent, result.week.status);
        assert_eq!(date!(2024 - 01 - 08), result.week.week_start);
    }

    #[tokio::test]
    async fn test_week_view_company_not_assigned() {
        let actor = company();

        let mut directory = MockAssignmentPort::new();
        directory
            .expect_assigned_company()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(Some(Uuid::now_v7())))));

        let result = service(MockEntryStore::new(), directory)
            .week_view(WeekViewParams {
                actor,
                student_id: Uuid::now_v7(),
                week_of: date!(2024 - 01 - 10),
            })
            .await;

        assert!(matches!(result, Err(WeekViewError::WrongActor)));
    }

    #[tokio::test]
    async fn test_submit_week_then_resubmit_is_idempotent() {
        let actor = student();
        let actor_id = actor.id;

        let mut db = MockEntryStore::new();
        // The second call finds nothing left in pending.
        let mut affected = vec![0u64, 3u64];
        db.expect_update_entries_where()
            .withf(move |p| {
                p.student_id == actor_id
                    && p.from_status == EntryStatus::Pending
                    && p.to_status == EntryStatus::SubmittedToCompany
                    && p.from == Some(date!(2024 - 01 - 08))
                    && p.to == Some(date!(2024 - 01 - 14))
            })
            .times(2)
            .returning(move |_| Box::pin(future::ready(Ok(affected.pop().unwrap()))));

        let service = service(db, MockAssignmentPort::new());
        let params = || SubmitWeekParams {
            actor,
            from: date!(2024 - 01 - 08),
            to: date!(2024 - 01 - 14),
        };

        let first = service.submit_week(params()).await.unwrap();
        let second = service.submit_week(params()).await.unwrap();

        assert_eq!(3, first.affected);
        assert_eq!(0, second.affected);
    }

    #[tokio::test]
    async fn test_submit_week_requires_student() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .submit_week(SubmitWeekParams {
                actor: administrator(),
                from: date!(2024 - 01 - 08),
                to: date!(2024 - 01 - 14),
            })
            .await;

        assert!(matches!(result, Err(SubmitWeekError::NotAStudent)));
    }

    #[tokio::test]
    async fn test_submit_week_inverted_range() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .submit_week(SubmitWeekParams {
                actor: student(),
                from: date!(2024 - 01 - 14),
                to: date!(2024 - 01 - 08),
            })
            .await;

        assert!(matches!(result, Err(SubmitWeekError::InvalidRange)));
    }

    #[tokio::test]
    async fn test_approve_all() {
        let actor = company();
        let actor_id = actor.id;
        let student_id = Uuid::now_v7();

        let mut directory = MockAssignmentPort::new();
        directory
            .expect_assigned_company()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(actor_id)))));

        let mut db = MockEntryStore::new();
        db.expect_update_entries_where()
            .withf(move |p| {
                p.student_id == student_id
                    && p.company_id == Some(actor_id)
                    && p.from_status == EntryStatus::SubmittedToCompany
                    && p.to_status == EntryStatus::CompanyApproved
            })
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(2))));

        let result = service(db, directory)
            .approve_all(ApproveAllParams { actor, student_id })
            .await
            .unwrap();

        assert_eq!(2, result.affected);
    }

    #[tokio::test]
    async fn test_approve_all_not_assigned() {
        let mut directory = MockAssignmentPort::new();
        directory
            .expect_assigned_company()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(Some(Uuid::now_v7())))));

        let result = service(MockEntryStore::new(), directory)
            .approve_all(ApproveAllParams {
                actor: company(),
                student_id: Uuid::now_v7(),
            })
            .await;

        assert!(matches!(result, Err(ApproveAllError::NotAssigned)));
    }

    #[tokio::test]
    async fn test_approve_all_requires_company() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .approve_all(ApproveAllParams {
                actor: student(),
                student_id: Uuid::now_v7(),
            })
            .await;

        assert!(matches!(result, Err(ApproveAllError::NotACompany)));
    }

    #[tokio::test]
    async fn test_submit_to_dean() {
        let actor = student();

        let mut db = MockEntryStore::new();
        db.expect_update_entries_where()
            .withf(|p| {
                p.from_status == EntryStatus::CompanyApproved
                    && p.to_status == EntryStatus::SubmittedToDean
            })
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(5))));

        let result = service(db, MockAssignmentPort::new())
            .submit_to_dean(SubmitToDeanParams {
                actor,
                student_id: actor.id,
            })
            .await
            .unwrap();

        assert_eq!(5, result.affected);
    }

    #[tokio::test]
    async fn test_submit_to_dean_nothing_eligible() {
        let actor = student();

        let mut db = MockEntryStore::new();
        db.expect_update_entries_where()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(0))));

        let result = service(db, MockAssignmentPort::new())
            .submit_to_dean(SubmitToDeanParams {
                actor,
                student_id: actor.id,
            })
            .await;

        assert!(matches!(result, Err(SubmitToDeanError::NothingEligible)));
    }

    #[tokio::test]
    async fn test_submit_to_dean_company_forbidden() {
        let result = service(MockEntryStore::new(), MockAssignmentPort::new())
            .submit_to_dean(SubmitToDeanParams {
                actor: company(),
                student_id: Uuid::now_v7(),
            })
            .await;

        assert!(matches!(result, Err(SubmitToDeanError::WrongActor)));
    }

    #[tokio::test]
    async fn test_submit_to_dean_administrator_allowed() {
        let mut db = MockEntryStore::new();
        db.expect_update_entries_where()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(1))));

        let result = service(db, MockAssignmentPort::new())
            .submit_to_dean(SubmitToDeanParams {
                actor: administrator(),
                student_id: Uuid::now_v7(),
            })
            .await;

        assert!(result.is_ok());
    }
}
