/// Thread pool setup for batch extraction.
/// Each source gets its own traversal; the pool only spreads sources over cores.

use anyhow::Result;
use log::info;

/// Initialize the global rayon thread pool.
/// Defaults to half the cores, minimum 1 worker.
pub fn init_thread_pool(jobs: Option<usize>) -> Result<usize> {
    let cores = num_cpus::get();
    let workers = jobs.unwrap_or(cores / 2).max(1);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()?;

    info!(
        "Initialized thread pool: {} workers (system has {} cores)",
        workers, cores
    );

    Ok(workers)
}
