//! Backend resource endpoints

use std::fmt;

/// A resource collection exposed by the timesheet backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    /// Timesheets of the signed-in user.
    Timesheets,
    /// Aggregated worked hours per day.
    TimesheetMetrics,
    /// User accounts.
    Users,
    /// Roles assignable to users.
    Roles,
    /// Task templates used to pre-fill timesheets.
    PresetTaskItems,
}

impl ApiEndpoint {
    /// Returns the path of this endpoint relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            ApiEndpoint::Timesheets => "/timesheets",
            ApiEndpoint::TimesheetMetrics => "/timesheets/metrics",
            ApiEndpoint::Users => "/users",
            ApiEndpoint::Roles => "/roles",
            ApiEndpoint::PresetTaskItems => "/preset-task-items",
        }
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
