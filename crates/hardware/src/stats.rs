//! Simulation statistics collection and reporting.
//!
//! This module tracks what the workload did to the timing engine. It provides:
//! 1. **Traffic:** Requests submitted and completed, split by reads and writes.
//! 2. **Admission:** How often the engine pushed back.
//! 3. **NMP pipeline:** Compute firings, dispatches, trace batches, queue high-water mark.

use std::time::Instant;

use serde::Serialize;

use crate::workload::nmp::CycleReport;

/// Simulation statistics structure.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,

    /// Reads the engine accepted.
    pub reads_submitted: u64,
    /// Writes the engine accepted.
    pub writes_submitted: u64,
    /// Admission queries the engine answered with "not now".
    pub admission_rejections: u64,

    /// Reads reported complete.
    pub reads_completed: u64,
    /// Writes reported complete ("embedding-sum operations" for NMP).
    pub writes_completed: u64,

    /// NMP compute outputs synthesized.
    pub compute_ops: u64,
    /// NMP writes moved from the output buffer to the queue.
    pub dispatches: u64,
    /// NMP trace batches issued.
    pub trace_batches: u64,
    /// Largest NMP transaction-queue length observed at end of cycle.
    pub peak_queue_len: u64,

    /// Cycles spent attempting vector-add elements.
    pub vector_add_cycles: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            reads_submitted: 0,
            writes_submitted: 0,
            admission_rejections: 0,
            reads_completed: 0,
            writes_completed: 0,
            compute_ops: 0,
            dispatches: 0,
            trace_batches: 0,
            peak_queue_len: 0,
            vector_add_cycles: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"traffic"`, `"nmp"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "traffic", "nmp"];

impl SimStats {
    /// Folds one NMP cycle report into the counters.
    pub fn record_nmp(&mut self, report: &CycleReport, queue_len: usize) {
        if let Some(done) = report.harvested {
            self.record_completion(done.kind.is_write());
        }
        self.reads_submitted += report.admission.admitted_reads as u64;
        self.writes_submitted += report.admission.admitted_writes as u64;
        self.admission_rejections += report.admission.rejected as u64;
        self.compute_ops += report.computed as u64;
        self.dispatches += u64::from(report.dispatched.is_some());
        self.trace_batches += u64::from(report.batch_dst.is_some());
        self.peak_queue_len = self.peak_queue_len.max(queue_len as u64);
    }

    /// Counts one accepted submission.
    #[inline]
    pub const fn record_submit(&mut self, is_write: bool) {
        if is_write {
            self.writes_submitted += 1;
        } else {
            self.reads_submitted += 1;
        }
    }

    /// Counts one completion.
    #[inline]
    pub const fn record_completion(&mut self, is_write: bool) {
        if is_write {
            self.writes_completed += 1;
        } else {
            self.reads_completed += 1;
        }
    }

    /// Total requests accepted by the engine.
    pub const fn total_submitted(&self) -> u64 {
        self.reads_submitted + self.writes_submitted
    }

    /// Total completions harvested.
    pub const fn total_completed(&self) -> u64 {
        self.reads_completed + self.writes_completed
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"traffic"`, or `"nmp"`.
    /// Pass an empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;

        println!("\n==========================================================");
        println!("MEMORY WORKLOAD SIMULATION STATISTICS");
        println!("==========================================================");
        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {khz:.2} kHz");
            println!(
                "requests_per_cycle       {:.4}",
                self.total_submitted() as f64 / cyc
            );
            println!("----------------------------------------------------------");
        }
        if want("traffic") {
            let offered = self.total_submitted() + self.admission_rejections;
            let reject_rate = if offered > 0 {
                100.0 * (self.admission_rejections as f64 / offered as f64)
            } else {
                0.0
            };
            println!("TRAFFIC");
            println!("  reads.submitted        {}", self.reads_submitted);
            println!("  writes.submitted       {}", self.writes_submitted);
            println!("  reads.completed        {}", self.reads_completed);
            println!("  writes.completed       {}", self.writes_completed);
            println!(
                "  admission.rejections   {} ({reject_rate:.2}%)",
                self.admission_rejections
            );
            println!("----------------------------------------------------------");
        }
        if want("nmp") {
            println!("NMP PIPELINE");
            println!("  compute.ops            {}", self.compute_ops);
            println!("  embedding_sum.ops      {}", self.writes_completed);
            println!("  dispatches             {}", self.dispatches);
            println!("  trace.batches          {}", self.trace_batches);
            println!("  queue.peak             {}", self.peak_queue_len);
            println!("  vector_add.cycles      {}", self.vector_add_cycles);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
