use crate::core::config::Config;
use crate::domain::logbook::LogbookService;
use crate::domain::timesheet::TimesheetService;
use std::sync::Arc;

pub trait ApplicationServices: Clone + Send + Sync {
    type TIMESHEET: TimesheetService + Send;
    type LOGBOOK: LogbookService + Send;

    fn config(&self) -> Config;

    fn timesheet_service(&self) -> Arc<Self::TIMESHEET>;

    fn logbook_service(&self) -> Arc<Self::LOGBOOK>;
}

pub struct Application<TIMESHEET, LOGBOOK>
where
    TIMESHEET: TimesheetService + Send + Sync + 'static,
    LOGBOOK: LogbookService + Send + Sync + 'static,
{
    config: Config,
    timesheet_service: Arc<TIMESHEET>,
    logbook_service: Arc<LOGBOOK>,
}

impl<TIMESHEET, LOGBOOK> Application<TIMESHEET, LOGBOOK>
where
    TIMESHEET: TimesheetService + Send + Sync + 'static,
    LOGBOOK: LogbookService + Send + Sync + 'static,
{
    pub fn new(config: Config, timesheet_service: TIMESHEET, logbook_service: LOGBOOK) -> Self {
        Self {
            config,
            timesheet_service: Arc::new(timesheet_service),
            logbook_service: Arc::new(logbook_service),
        }
    }
}

impl<TIMESHEET, LOGBOOK> Clone for Application<TIMESHEET, LOGBOOK>
where
    TIMESHEET: TimesheetService + Send + Sync + 'static,
    LOGBOOK: LogbookService + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            timesheet_service: self.timesheet_service.clone(),
            logbook_service: self.logbook_service.clone(),
        }
    }
}

impl<TIMESHEET, LOGBOOK> ApplicationServices for Application<TIMESHEET, LOGBOOK>
where
    TIMESHEET: TimesheetService + Send + Sync + 'static,
    LOGBOOK: LogbookService + Send + Sync + 'static,
{
    type TIMESHEET = TIMESHEET;
    type LOGBOOK = LOGBOOK;

    fn config(&self) -> Config {
        self.config.clone()
    }

    fn timesheet_service(&self) -> Arc<Self::TIMESHEET> {
        self.timesheet_service.clone()
    }

    fn logbook_service(&self) -> Arc<Self::LOGBOOK> {
        self.logbook_service.clone()
    }
}
