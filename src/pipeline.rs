// src/pipeline.rs

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::Error;
use crate::source::UniversitySource;
use crate::table::DataTable;
use crate::UniversityId;

/// Column stamped onto every output row once the state is known.
pub const STATE_COLUMN: &str = "Location";
/// Display-name and profile-slug columns in graduation responses.
pub const NAME_COLUMN: &str = "University";
pub const SLUG_COLUMN: &str = "Slug University";

/// Pause before each identifier; keeps the run under the API's informal
/// rate limit. Pacing, not concurrency control.
pub const PACING: Duration = Duration::from_millis(500);

/// Output filenames, written once per run in the working directory.
pub const ENROLLMENT_FILE: &str = "enrollment_data.csv";
pub const GRADUATION_FILE: &str = "graduation_data.csv";

/// What happened to a single university during the run.
#[derive(Debug)]
pub enum UniversityOutcome {
    /// Rows contributed to both combined tables.
    Processed {
        graduation_rows: usize,
        enrollment_rows: usize,
    },
    /// Graduation query returned nothing, so there is no representative row
    /// to take the slug and name from.
    NoGraduationData,
    /// A fetch or the state resolution failed; the university's whole
    /// contribution is dropped for this run.
    Failed(Error),
}

/// Per-identifier ledger for one run. Failures are recorded with their
/// reasons instead of disappearing behind a log line.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<(UniversityId, UniversityOutcome)>,
}

impl RunReport {
    fn record(&mut self, id: UniversityId, outcome: UniversityOutcome) {
        self.outcomes.push((id, outcome));
    }

    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, UniversityOutcome::Processed { .. }))
    }

    pub fn empty(&self) -> usize {
        self.count(|o| matches!(o, UniversityOutcome::NoGraduationData))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, UniversityOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&UniversityOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Combined run output: one append-only table per record type, plus the
/// per-identifier ledger.
#[derive(Debug, Default)]
pub struct RunOutput {
    pub graduation: DataTable,
    pub enrollment: DataTable,
    pub report: RunReport,
}

/// Process every id in order: graduation records, state resolution,
/// enrollment records, accumulate. Failures are contained at this loop
/// boundary, so the run itself never aborts; whether the accumulated result
/// is usable is judged at write time.
pub async fn run<S: UniversitySource>(
    source: &mut S,
    ids: impl IntoIterator<Item = UniversityId>,
    pacing: Duration,
) -> RunOutput {
    let mut output = RunOutput::default();

    for id in ids {
        sleep(pacing).await;
        match process_university(source, id).await {
            Ok(Some((graduation, enrollment))) => {
                info!(id, rows = graduation.len(), "processed university");
                let outcome = UniversityOutcome::Processed {
                    graduation_rows: graduation.len(),
                    enrollment_rows: enrollment.len(),
                };
                output.graduation.append(graduation);
                output.enrollment.append(enrollment);
                output.report.record(id, outcome);
            }
            Ok(None) => {
                info!(id, "no graduation data; skipping");
                output.report.record(id, UniversityOutcome::NoGraduationData);
            }
            Err(err) => {
                warn!(id, %err, "skipping university");
                output.report.record(id, UniversityOutcome::Failed(err));
            }
        }
    }

    info!(
        processed = output.report.processed(),
        empty = output.report.empty(),
        failed = output.report.failed(),
        "run complete"
    );
    output
}

/// One university's contribution: graduation and enrollment tables, both
/// stamped with the resolved state. `None` when the graduation set is
/// empty. The first graduation row supplies the slug and display name for
/// the whole university.
async fn process_university<S: UniversitySource>(
    source: &mut S,
    id: UniversityId,
) -> Result<Option<(DataTable, DataTable)>, Error> {
    let mut graduation = source.graduation_records(id).await?;
    if graduation.is_empty() {
        return Ok(None);
    }

    let slug = graduation.get(0, SLUG_COLUMN).unwrap_or_default().to_string();
    let name = graduation.get(0, NAME_COLUMN).unwrap_or_default().to_string();

    let state = source.resolve_state(&slug).await?;
    graduation.stamp_column(STATE_COLUMN, &state);

    let mut enrollment = source
        .enrollment_records(id)
        .await?
        .filter_eq(NAME_COLUMN, &name);
    enrollment.stamp_column(STATE_COLUMN, &state);

    Ok(Some((graduation, enrollment)))
}

/// Write both combined tables. A table nobody contributed to is an error;
/// partial coverage is not.
pub fn write_outputs(output: &RunOutput) -> Result<(), Error> {
    output.enrollment.write_csv(ENROLLMENT_FILE)?;
    output.graduation.write_csv(GRADUATION_FILE)?;
    info!(
        graduation_rows = output.graduation.len(),
        enrollment_rows = output.enrollment.len(),
        "wrote {} and {}",
        GRADUATION_FILE,
        ENROLLMENT_FILE
    );
    Ok(())
}
