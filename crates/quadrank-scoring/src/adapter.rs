//! Boundary to the external relevance classifier.
//!
//! Resolves document ids to text, calls the model once per instance, and
//! attaches the scores to the instance. Padding slots are passed as `None`
//! and come back unscored.

use quadrank_core::constants::QUADRUPLE_WIDTH;
use quadrank_core::errors::{InputError, QuadrankResult, ScoringError};
use quadrank_core::models::{Instance, ScoredInstance};
use quadrank_core::traits::{IClassifierTrainer, IDocumentStore, IRelevanceClassifier};
use tracing::debug;

/// Pairs a classifier with the document store it reads candidate text from.
pub struct ClassifierAdapter<'a> {
    classifier: &'a dyn IRelevanceClassifier,
    documents: &'a dyn IDocumentStore,
}

impl<'a> ClassifierAdapter<'a> {
    pub fn new(classifier: &'a dyn IRelevanceClassifier, documents: &'a dyn IDocumentStore) -> Self {
        Self {
            classifier,
            documents,
        }
    }

    fn texts(&self, instance: &Instance) -> QuadrankResult<[Option<&'a str>; QUADRUPLE_WIDTH]> {
        resolve_texts(self.documents, instance)
    }

    /// Score one instance.
    pub fn score_instance(&self, query_text: &str, instance: &Instance) -> QuadrankResult<ScoredInstance> {
        let texts = self.texts(instance)?;
        let raw = self
            .classifier
            .score(query_text, texts)
            .map_err(|e| ScoringError::Classifier {
                query_id: instance.query_id.clone(),
                reason: e.to_string(),
            })?;

        let mut scores = [None; QUADRUPLE_WIDTH];
        for (i, (slot, value)) in instance.slots.iter().zip(raw).enumerate() {
            let Some(doc) = slot else { continue };
            if !value.is_finite() {
                return Err(ScoringError::NonFiniteScore {
                    query_id: instance.query_id.clone(),
                    doc_id: doc.clone(),
                    value,
                }
                .into());
            }
            scores[i] = Some(value);
        }
        Ok(ScoredInstance {
            instance: instance.clone(),
            scores,
        })
    }

    /// Score every instance of one query.
    pub fn score_instances(
        &self,
        query_text: &str,
        instances: &[Instance],
    ) -> QuadrankResult<Vec<ScoredInstance>> {
        debug!(
            classifier = self.classifier.name(),
            instances = instances.len(),
            "scoring instances"
        );
        instances
            .iter()
            .map(|inst| self.score_instance(query_text, inst))
            .collect()
    }
}

fn resolve_texts<'a>(
    documents: &'a dyn IDocumentStore,
    instance: &Instance,
) -> QuadrankResult<[Option<&'a str>; QUADRUPLE_WIDTH]> {
    let mut texts = [None; QUADRUPLE_WIDTH];
    for (text, slot) in texts.iter_mut().zip(&instance.slots) {
        if let Some(doc) = slot {
            let resolved = documents.text(doc).ok_or_else(|| InputError::MissingDocument {
                query_id: instance.query_id.clone(),
                doc_id: doc.clone(),
            })?;
            *text = Some(resolved);
        }
    }
    Ok(texts)
}

/// Feed training instances of one query to a trainer with their gold index.
/// Instances without gold or with padding are skipped.
pub fn feed_training(
    trainer: &mut dyn IClassifierTrainer,
    documents: &dyn IDocumentStore,
    query_text: &str,
    instances: &[Instance],
) -> QuadrankResult<usize> {
    let mut fed = 0;
    for inst in instances {
        let Some(gold) = inst.gold else { continue };
        let [Some(a), Some(b), Some(c), Some(d)] = resolve_texts(documents, inst)? else {
            continue;
        };
        trainer.train(query_text, [a, b, c, d], gold)?;
        fed += 1;
    }
    Ok(fed)
}
