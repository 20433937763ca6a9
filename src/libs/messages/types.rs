#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigReadError(String),
    ConfigParseError(String),
    NoActiveUser,

    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskCompleted(String),
    TaskReopened(String),
    TaskDeleted(String),
    TaskNotFound(String),
    NoTasks,

    // === SESSION MESSAGES ===
    SessionStarted(String, i64),  // subject, planned minutes
    SessionStopped(String, i64),  // subject, recorded minutes
    SessionCompleted(String, i64), // subject, nominal minutes
    SessionConflict,
    NoOpenSession,

    // === ANALYTICS MESSAGES ===
    AnalyticsHeader(String), // range label
    DailyHeader,
    SubjectsHeader,
    RecentHeader,

    // === EXPORT MESSAGES ===
    ExportingRows(usize),
    ExportCompleted(String), // path

    // === NOTIFICATION MESSAGES ===
    NotificationDelivered(String, String), // title, body
    NotificationScheduled(String),         // id
    NotificationCancelled(String),         // id
    NotificationsCancelledForUser(String), // user
    DeadlineAlertSkipped(String),          // task title
    BreakReminderScheduled(i64),           // minutes
    PendingNotifications(usize),
    QueueEmpty,
    TestNotificationSent,
    TestNotificationDenied,
}
