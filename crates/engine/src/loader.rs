//! The scheduler: drives sources over the dependency graph until every
//! claimed field is populated.

use confweave_core::{ConvertError, LoadError, Record, Slot, Source};

use crate::graph::Graph;
use crate::tag;

/// An ordered set of sources that can populate records.
///
/// Registration order matters: when several sources carry a non-empty
/// annotation on the same field, the first registered one claims it and
/// the rest are ignored.
///
/// ```no_run
/// # use confweave::Loader;
/// # use confweave_sources::EnvSource;
/// confweave::record! {
///     #[derive(Debug, Default)]
///     struct Conn {
///         host: String => { env: "DB_HOST=localhost" },
///         port: u16 => { env: "DB_PORT=5432" },
///         url: String => { env: "@host||\":\"||@port" },
///     }
/// }
///
/// # async fn demo() -> Result<(), confweave::LoadError> {
/// let conn: Conn = Loader::new().with(EnvSource::from_process()).load().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Loader {
    sources: Vec<Box<dyn Source>>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source. Order of registration is the claim order.
    pub fn with(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Populate a fresh `R` from the registered sources, or fail with the
    /// first error encountered. No partial record is ever returned.
    ///
    /// Fields are populated strictly pass-by-pass in dependency order, one
    /// source call at a time; within a pass the order over ready fields is
    /// declaration order, which no source may rely on beyond "dependencies
    /// before dependents".
    pub async fn load<R: Record + Send>(&self) -> Result<R, LoadError> {
        let mut record = R::default();
        let mut graph = Graph::build(R::FIELDS, &self.sources);
        graph.check_cycles()?;

        tracing::debug!(fields = graph.nodes.len(), "loading record");

        while graph.nodes.iter().any(|n| !n.resolved) {
            let mut progress = false;

            for i in 0..graph.nodes.len() {
                if graph.nodes[i].resolved || !graph.is_ready(i) {
                    continue;
                }
                progress = true;

                let field = graph.nodes[i].field;
                let directive = tag::resolve(&graph.nodes[i].tag, |name| record.get(name))?;
                let source = &self.sources[graph.nodes[i].source_index];
                tracing::debug!(field, source = source.name(), "populating field");

                let mut slot = RecordSlot {
                    record: &mut record,
                    field,
                };
                source
                    .apply(&mut slot, &directive)
                    .await
                    .map_err(|e| LoadError::Source {
                        field: field.to_owned(),
                        source: e,
                    })?;

                graph.nodes[i].resolved = true;
            }

            // Unreachable once check_cycles has passed; guards against a
            // bug in the readiness check.
            if !progress {
                return Err(LoadError::Stalled {
                    pending: graph.pending(),
                });
            }
        }

        Ok(record)
    }
}

/// [`Slot`] over one field of the record being loaded.
struct RecordSlot<'a, R: Record> {
    record: &'a mut R,
    field: &'static str,
}

impl<R: Record + Send> Slot for RecordSlot<'_, R> {
    fn name(&self) -> &str {
        self.field
    }

    fn set_text(&mut self, value: &str) -> Result<(), ConvertError> {
        self.record.set(self.field, value)
    }
}
