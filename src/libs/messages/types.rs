#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleMonitor,
    ConfigModuleHealth,
    ConfigModuleOllama,
    PromptSelectModules,
    PromptSampleInterval,
    PromptIdleThreshold,
    PromptBreakThreshold,
    PromptPostureThreshold,
    PromptEyeCareThreshold,
    PromptHydrationThreshold,
    PromptOllamaApiUrl,
    PromptOllamaModel,

    // === DAEMON MESSAGES ===
    DaemonAlreadyRunning(u32),
    DaemonStarted(u32),
    DaemonStopped(u32),
    DaemonNotRunning,
    DaemonStalePidRemoved(u32),
    DaemonFailedToStop(u32),
    DaemonReceivedSigterm,
    DaemonReceivedSigint,
    DaemonReceivedCtrlC,
    DaemonCtrlCListenFailed(String),
    DaemonSignalHandlingNotSupported,
    DaemonShuttingDown,
    DaemonTickError(String),
    DaemonStatus { state: String, idle_seconds: u64 },
    DaemonModeNotSupported,
    ProcessTerminationNotSupported,
    InvalidPidFileContent,
    FailedToGetCurrentExecutable,
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
    FailedToOpenProcess(u32),
    FailedToTerminateProcess(u32),

    // === MONITOR MESSAGES ===
    MonitorStarted { sample_interval: u64, idle_threshold: u64 },
    MonitorStopped,
    InputHookDegraded(String),
    SampleWriteFailed(String),
    StaleSessionClosed,

    // === HEALTH MESSAGES ===
    ReminderBreak(u64),
    ReminderPosture,
    ReminderEyeCare,
    ReminderHydration,
    NotificationFailed(String),
    HealthEventWriteFailed(String),
    BreakLogged(u64),
    HealthSummaryHeader,
    HealthRecentEventsHeader,
    NoHealthEventsToday,

    // === STATUS MESSAGES ===
    StatusHeader,
    ScreenTimeToday(String),
    DaemonRunningWithPid(u32),
    DaemonDown,
    RecentActivityHeader,
    NoActivityRecorded,
    PendingTasksCount(usize),
    LastBreakMinutesAgo(i64),
    NoBreaksToday,

    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskCompleted(i64),
    TaskNotFoundWithId(i64),
    TasksNotFound,

    // === SUGGESTION MESSAGES ===
    OllamaUnreachable(String),
    SuggestHealthHeader,
    SuggestTasksHeader,
    SuggestNotEnoughActivity,

    // === EXPORT MESSAGES ===
    ExportCompleted(String),
    UnsupportedExportFormat(String),
}
