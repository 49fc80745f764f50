//! # quadrank-io
//!
//! Readers and writers for the pipeline's boundary files. Every table is
//! comma-separated with a fixed column set; list-valued columns hold
//! whitespace-separated values. A header row matching the column names is
//! optional on input and always written on output. Blank lines and lines
//! starting with `#` are ignored.
//!
//! | Table | Columns |
//! |-------|---------|
//! | candidate pools | `query_id,doc_ids,priors` |
//! | judgments | `query_id,doc_ids` |
//! | queries / documents | `id,text` |
//! | instances | `query_id,doc_ids,label` |
//! | classifier scores | `query_id,doc_ids,scores` |
//! | rankings | `query_id,ranked_doc_ids` |

pub mod instances;
pub mod judgments;
pub mod pools;
pub mod rankings;
pub mod report;
pub mod table;
pub mod texts;

pub use instances::{read_scored_instances, write_instances};
pub use judgments::read_judgments;
pub use pools::read_candidate_pools;
pub use rankings::{read_rankings, write_rankings};
pub use report::{read_json, write_json};
pub use texts::{read_documents, read_queries};
