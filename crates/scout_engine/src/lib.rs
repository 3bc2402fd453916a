//! Scout engine: remote search, durable storage and effect execution.
mod controller;
mod convert;
mod engine;
mod kv;
mod persist;
mod saved;
mod search;
mod types;
mod wire;

pub use controller::PaginationController;
pub use convert::{render_description, Converter, Html2MdConverter};
pub use engine::{execute, EngineHandle};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StoreError};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use saved::{SavedJobsStore, SAVED_JOBS_KEY};
pub use search::{JSearchClient, JobSearchProvider, SearchSettings, DEFAULT_API_HOST};
pub use types::EngineEvent;
