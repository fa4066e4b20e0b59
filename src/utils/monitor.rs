use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// 單一階段 (collect / export) 結束時的量測結果
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_elapsed: Duration,
    pub total_elapsed: Duration,
    pub memory_mb: Option<u64>,
    pub cpu_usage: Option<f32>,
}

pub struct RunMonitor {
    enabled: bool,
    started: Instant,
    phase_started: Instant,
    peak_memory_mb: u64,
    #[cfg(feature = "cli")]
    probe: Option<(System, Pid)>,
}

impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: now,
            phase_started: now,
            peak_memory_mb: 0,
            #[cfg(feature = "cli")]
            probe: if enabled {
                sysinfo::get_current_pid()
                    .ok()
                    .map(|pid| (System::new(), pid))
            } else {
                None
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn peak_memory_mb(&self) -> u64 {
        self.peak_memory_mb
    }

    #[cfg(feature = "cli")]
    fn sample_process(&mut self) -> (Option<u64>, Option<f32>) {
        let Some((system, pid)) = self.probe.as_mut() else {
            return (None, None);
        };
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[*pid]),
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        match system.process(*pid) {
            Some(process) => (Some(process.memory() / 1024 / 1024), Some(process.cpu_usage())),
            None => (None, None),
        }
    }

    #[cfg(not(feature = "cli"))]
    fn sample_process(&mut self) -> (Option<u64>, Option<f32>) {
        (None, None)
    }

    /// 結束一個階段並記錄；未啟用時回傳 None
    pub fn finish_phase(&mut self, phase: &str) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let (memory_mb, cpu_usage) = self.sample_process();
        if let Some(mb) = memory_mb {
            self.peak_memory_mb = self.peak_memory_mb.max(mb);
        }

        let stats = PhaseStats {
            phase: phase.to_string(),
            phase_elapsed: self.phase_started.elapsed(),
            total_elapsed: self.started.elapsed(),
            memory_mb,
            cpu_usage,
        };
        self.phase_started = Instant::now();

        tracing::info!(
            phase = %stats.phase,
            phase_elapsed = ?stats.phase_elapsed,
            memory_mb = ?stats.memory_mb,
            cpu = ?stats.cpu_usage,
            "📊 phase finished"
        );
        Some(stats)
    }

    pub fn log_final_stats(&self) {
        if self.enabled {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.started.elapsed(),
                self.peak_memory_mb
            );
        }
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
