//! Batch scanning of many documents in parallel.

use std::time::Instant;

use rayon::prelude::*;

use crate::error::BatchError;
use crate::events::ScanEvent;
use crate::scanner::Scanner;

/// Input for batch processing - a single document to scan.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Markdown source content.
    pub source: String,
}

/// Options for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone)]
pub struct BatchResult<'r> {
    /// Document identifier matching the input.
    pub id: String,
    /// Every event of the document's scan, in order.
    pub events: Vec<ScanEvent<'r>>,
}

impl BatchResult<'_> {
    /// Number of `DirectiveFound` events.
    pub fn directive_count(&self) -> usize {
        self.events.iter().filter_map(ScanEvent::finding).count()
    }

    /// Number of findings without a matching definition.
    pub fn unknown_count(&self) -> usize {
        self.events
            .iter()
            .filter_map(ScanEvent::finding)
            .filter(|finding| !finding.is_known())
            .count()
    }
}

/// Statistics for batch processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    /// Total number of documents scanned.
    pub total: usize,
    /// Total number of findings across all documents.
    pub directives: usize,
    /// Findings that did not resolve to a known directive.
    pub unknown: usize,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Result of batch processing containing all results and statistics.
#[derive(Debug, Clone)]
pub struct BatchOutput<'r> {
    /// Individual results, in input order.
    pub results: Vec<BatchResult<'r>>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Scan every input with `scanner`, in parallel.
pub fn scan_batch<'s>(
    scanner: &'s Scanner,
    inputs: Vec<BatchInput>,
    options: &BatchOptions,
) -> Result<BatchOutput<'s>, BatchError> {
    let start = Instant::now();
    let total = inputs.len();

    let pool = options
        .max_threads
        .map(|threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
        })
        .transpose()?;

    let process_input = |input: BatchInput| BatchResult {
        events: scanner.scan_events(&input.source),
        id: input.id,
    };

    let results: Vec<BatchResult<'s>> = if let Some(pool) = pool {
        pool.install(|| inputs.into_par_iter().map(process_input).collect())
    } else {
        inputs.into_par_iter().map(process_input).collect()
    };

    let directives = results.iter().map(BatchResult::directive_count).sum();
    let unknown = results.iter().map(BatchResult::unknown_count).sum();
    let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    log::debug!("batch scanned {total} document(s) in {processing_time_ms:.2}ms");

    Ok(BatchOutput {
        results,
        stats: BatchStats {
            total,
            directives,
            unknown,
            processing_time_ms,
        },
    })
}
