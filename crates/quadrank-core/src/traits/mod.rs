pub mod classifier;
pub mod document_store;

pub use classifier::{IClassifierTrainer, IRelevanceClassifier};
pub use document_store::IDocumentStore;
