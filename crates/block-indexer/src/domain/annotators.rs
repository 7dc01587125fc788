//! # Annotator Registry
//!
//! An explicit, ordered collection of pluggable transaction-annotation
//! functions. Constructed at startup, registered into before indexing
//! begins, and immutable once the indexer is running — registration is
//! not safe to mutate concurrently with active indexing, which the
//! ownership model enforces: the indexer takes the registry by value.
//!
//! Each annotator owns a distinct namespace; fragments merge under
//! their namespaces in registration order, so no annotator can clobber
//! another's output.

use crate::domain::errors::IndexError;
use shared_types::{AnnotationError, AnnotationFragment, Annotations, Transaction};
use tracing::debug;

type AnnotatorFn = dyn Fn(&Transaction) -> Result<AnnotationFragment, AnnotationError> + Send + Sync;

struct Annotator {
    namespace: String,
    func: Box<AnnotatorFn>,
}

/// Ordered, namespace-unique collection of annotators.
#[derive(Default)]
pub struct AnnotatorRegistry {
    annotators: Vec<Annotator>,
}

/// Result of applying every annotator to one transaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationOutcome {
    /// Merged fragments, keyed by namespace.
    pub annotations: Annotations,
    /// Per-annotator failures. Non-fatal: the remaining fragments are
    /// kept and the block still commits.
    pub failures: Vec<AnnotationError>,
}

impl AnnotatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an annotator under its namespace.
    ///
    /// Fails with [`IndexError::DuplicateNamespace`] if the namespace is
    /// already taken — a configuration error caught at setup time, not
    /// at runtime.
    pub fn register<F>(&mut self, namespace: impl Into<String>, func: F) -> Result<(), IndexError>
    where
        F: Fn(&Transaction) -> Result<AnnotationFragment, AnnotationError> + Send + Sync + 'static,
    {
        let namespace = namespace.into();
        if self.annotators.iter().any(|a| a.namespace == namespace) {
            return Err(IndexError::DuplicateNamespace(namespace));
        }
        debug!("[block-indexer] Registered annotator namespace {namespace:?}");
        self.annotators.push(Annotator {
            namespace,
            func: Box::new(func),
        });
        Ok(())
    }

    /// Apply every annotator in registration order and merge their
    /// fragments. Failures are collected, never propagated: a malformed
    /// reference in one namespace must not block the others.
    pub fn apply(&self, tx: &Transaction) -> AnnotationOutcome {
        let mut outcome = AnnotationOutcome::default();
        for annotator in &self.annotators {
            match (annotator.func)(tx) {
                Ok(fragment) => {
                    outcome
                        .annotations
                        .insert(annotator.namespace.clone(), fragment);
                }
                Err(err) => outcome.failures.push(err),
            }
        }
        outcome
    }

    pub fn len(&self) -> usize {
        self.annotators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotators.is_empty()
    }
}
