//! Daemon lifecycle management.
//!
//! Owns the process-wide pieces of the background service: the
//! single-instance PID guard, signal-driven cooperative shutdown, the main
//! sampling loop that drives the activity monitor and health scheduler, and
//! the fixed teardown order (monitor → scheduler → PID file) that runs on
//! every exit path.

use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::health::HealthScheduler;
use crate::libs::messages::Message;
use crate::libs::monitor::Monitor;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{Pid, ProcessesToUpdate, System};

const PID_FILE: &str = "vigil.pid";

/// Ticks between periodic status lines (5 minutes at the default interval).
const STATUS_EVERY_TICKS: u64 = 30;

/// Runs the daemon in the current process with signal-driven shutdown.
///
/// Fails fast with a non-zero exit when another live instance owns the PID
/// file; that instance's file is left untouched. A PID file pointing at a
/// dead process is stale and removed.
pub async fn run() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;

    if pid_path.exists() {
        let pid_str = fs::read_to_string(&pid_path)?;
        match pid_str.trim().parse::<u32>() {
            // The spawning parent writes our PID before this check runs
            Ok(pid) if pid == std::process::id() => {}
            Ok(pid) if is_process_alive(pid) => {
                msg_bail_anyhow!(Message::DaemonAlreadyRunning(pid));
            }
            Ok(pid) => {
                fs::remove_file(&pid_path)?;
                msg_info!(Message::DaemonStalePidRemoved(pid));
            }
            Err(_) => {
                fs::remove_file(&pid_path)?;
                msg_warning!(Message::InvalidPidFileContent);
            }
        }
    }
    fs::write(&pid_path, std::process::id().to_string())?;

    // Shutdown is cooperative: signal delivery only ever flips this flag,
    // and the loop observes it at the top of every iteration
    let running = Arc::new(AtomicBool::new(true));

    #[cfg(unix)]
    {
        let running = running.clone();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate()).expect(&Message::FailedToCreateSigtermHandler.to_string());
            let mut sigint = signal(SignalKind::interrupt()).expect(&Message::FailedToCreateSigintHandler.to_string());

            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::DaemonReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::DaemonReceivedSigint);
                }
            }

            running.store(false, Ordering::SeqCst);
        });
    }

    #[cfg(windows)]
    {
        let running = running.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::DaemonReceivedCtrlC);
                }
                Err(e) => {
                    msg_warning!(Message::DaemonCtrlCListenFailed(e.to_string()));
                }
            }

            running.store(false, Ordering::SeqCst);
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_warning!(Message::DaemonSignalHandlingNotSupported);
    }

    let result = run_loop(running).await;

    // PID file removal runs on every exit path
    if pid_path.exists() {
        let _ = fs::remove_file(&pid_path);
    }

    result
}

/// The main sampling loop: one monitor tick, one scheduler evaluation, then
/// sleep until the next interval boundary.
async fn run_loop(running: Arc<AtomicBool>) -> Result<()> {
    let config = Config::read()?;
    let monitor_config = config.monitor.unwrap_or_default();
    let health_config = config.health.unwrap_or_default();

    let mut monitor = Monitor::new(monitor_config.clone())?;
    let mut scheduler = HealthScheduler::new(&health_config)?;
    monitor.start()?;
    scheduler.start()?;
    msg_info!(Message::MonitorStarted {
        sample_interval: monitor_config.sample_interval,
        idle_threshold: monitor_config.idle_threshold,
    });

    let interval = monitor_config.sample_interval.max(1);
    let mut ticks: u64 = 0;
    while running.load(Ordering::SeqCst) {
        // A single bad tick must not kill the daemon: log and back off
        if let Err(e) = tick(&mut monitor, &mut scheduler, interval) {
            msg_warning!(Message::DaemonTickError(e.to_string()));
            tokio::time::sleep(Duration::from_secs(interval)).await;
            continue;
        }

        ticks += 1;
        if ticks % STATUS_EVERY_TICKS == 0 {
            msg_info!(Message::DaemonStatus {
                state: if monitor.is_user_active() { "ACTIVE" } else { "IDLE" }.to_string(),
                idle_seconds: monitor.current_idle_time().num_seconds().max(0) as u64,
            });
        }

        tokio::time::sleep(Duration::from_secs(interval)).await;
    }

    // Teardown order is fixed: monitor first (flushes the open session),
    // then the scheduler; both run even if one of them fails
    msg_info!(Message::DaemonShuttingDown);
    let stop_result = monitor.stop();
    scheduler.stop();
    if let Err(e) = stop_result {
        msg_warning!(Message::DaemonTickError(e.to_string()));
    }
    msg_info!(Message::MonitorStopped);

    Ok(())
}

fn tick(monitor: &mut Monitor, scheduler: &mut HealthScheduler, interval: u64) -> Result<()> {
    monitor.sample_tick()?;
    scheduler.tick(monitor.is_user_active(), interval)
}

/// Spawns the daemon as a detached background process.
///
/// Unlike a plain `run()` in the current terminal, the spawned process
/// survives the shell session. A live instance makes this a hard error.
pub fn spawn() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;

    if pid_path.exists() {
        if let Ok(pid_str) = fs::read_to_string(&pid_path) {
            if let Ok(pid) = pid_str.trim().parse::<u32>() {
                if is_process_alive(pid) {
                    msg_bail_anyhow!(Message::DaemonAlreadyRunning(pid));
                }
                msg_info!(Message::DaemonStalePidRemoved(pid));
            }
        }
        let _ = fs::remove_file(&pid_path);
    }

    let current_exe = std::env::current_exe().map_err(|_| msg_error_anyhow!(Message::FailedToGetCurrentExecutable))?;

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let mut command = std::process::Command::new(current_exe);
        command.arg("start").arg("--foreground");
        unsafe {
            command.pre_exec(|| {
                // Detach from the current session to become a daemon
                nix::unistd::setsid().map_err(std::io::Error::from)?;
                Ok(())
            });
        }
        let child = command.spawn()?;
        let pid = child.id();
        fs::write(pid_path, pid.to_string())?;
        msg_success!(Message::DaemonStarted(pid));
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        let child = std::process::Command::new(current_exe)
            .arg("start")
            .arg("--foreground")
            .creation_flags(CREATE_NO_WINDOW)
            .spawn()?;
        let pid = child.id();
        fs::write(pid_path, pid.to_string())?;
        msg_success!(Message::DaemonStarted(pid));
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_bail_anyhow!(Message::DaemonModeNotSupported);
    }

    Ok(())
}

/// Finds and stops the running daemon process.
pub fn stop() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !pid_path.exists() {
        msg_info!(Message::DaemonNotRunning);
        return Ok(());
    }

    let pid_str = fs::read_to_string(&pid_path)?;
    let pid: u32 = pid_str.trim().parse().map_err(|_| msg_error_anyhow!(Message::InvalidPidFileContent))?;

    let killed = kill_process(pid)?;

    // Clean up the PID file regardless of whether the process was found
    fs::remove_file(pid_path)?;

    if killed {
        msg_success!(Message::DaemonStopped(pid));
    } else {
        msg_info!(Message::DaemonNotRunning);
    }
    Ok(())
}

/// PID of the live daemon instance, if one is running.
pub fn running_pid() -> Option<u32> {
    let pid_path = DataStorage::new().get_path(PID_FILE).ok()?;
    let pid = fs::read_to_string(pid_path).ok()?.trim().parse::<u32>().ok()?;
    if is_process_alive(pid) {
        Some(pid)
    } else {
        None
    }
}

/// Checks whether a process with the given PID is currently alive.
pub fn is_process_alive(pid: u32) -> bool {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]), true);
    system.process(Pid::from_u32(pid)).is_some()
}

/// Cross-platform process termination
#[cfg(unix)]
fn kill_process(pid: u32) -> Result<bool> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid as NixPid;

    if !is_process_alive(pid) {
        return Ok(false);
    }

    let target = NixPid::from_raw(pid as i32);

    // SIGTERM first for a graceful, cooperative shutdown
    let _ = kill(target, Signal::SIGTERM);
    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(100));
        if !is_process_alive(pid) {
            return Ok(true);
        }
    }

    // The process did not exit within the grace period
    let _ = kill(target, Signal::SIGKILL);
    std::thread::sleep(Duration::from_millis(100));
    Ok(true)
}

#[cfg(windows)]
fn kill_process(pid: u32) -> Result<bool> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            let error = GetLastError();
            if error == 87 {
                // ERROR_INVALID_PARAMETER - process doesn't exist
                return Ok(false);
            }
            msg_bail_anyhow!(Message::FailedToOpenProcess(error));
        }

        let result = TerminateProcess(handle, 0);
        CloseHandle(handle);

        if result == 0 {
            let error = GetLastError();
            msg_bail_anyhow!(Message::FailedToTerminateProcess(error));
        } else {
            // Give the process time to actually terminate
            std::thread::sleep(Duration::from_millis(100));
            Ok(true)
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn kill_process(_pid: u32) -> Result<bool> {
    msg_bail_anyhow!(Message::ProcessTerminationNotSupported);
}
