use std::fmt::Display;

/// Progress events emitted by the batch workflow.
///
/// A batch opens a phase, starts a task sized to the number of structures,
/// emits one [`Progress::StructureFinished`] per structure (from whichever
/// worker converted it), then closes the task and the phase. The closing
/// events are sent even when the batch aborts early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    /// One structure is done; `error` holds the failure message if it failed.
    StructureFinished { name: String, error: Option<String> },
    TaskFinish,
}

impl Progress {
    pub fn is_failure(&self) -> bool {
        matches!(self, Progress::StructureFinished { error: Some(_), .. })
    }
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// The callback may be invoked concurrently from rayon workers.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Reports the outcome of converting the structure called `name`.
    pub fn structure_finished<T, E: Display>(&self, name: &str, result: &Result<T, E>) {
        if self.callback.is_none() {
            return;
        }
        self.report(Progress::StructureFinished {
            name: name.to_string(),
            error: result.as_ref().err().map(ToString::to_string),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::TaskFinish);
        reporter.structure_finished::<(), String>("water", &Err("bad".into()));
    }

    #[test]
    fn structure_outcomes_become_typed_events() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(event);
        }));

        reporter.structure_finished::<usize, String>("dmpc", &Ok(120));
        reporter.structure_finished::<usize, String>("popc", &Err("missing psf".into()));
        drop(reporter);

        let seen = seen.into_inner().unwrap();
        assert_eq!(
            seen,
            vec![
                Progress::StructureFinished {
                    name: "dmpc".into(),
                    error: None,
                },
                Progress::StructureFinished {
                    name: "popc".into(),
                    error: Some("missing psf".into()),
                },
            ]
        );
        assert!(!seen[0].is_failure());
        assert!(seen[1].is_failure());
    }
}
