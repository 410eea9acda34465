pub mod access;
pub mod aggregation;
pub mod clock;
pub mod config;
pub mod error;
pub mod integrity;
pub mod store;

pub use access::{AccessGate, AccessMode, CallerScope, Decision, DenyReason, SubtreeRoot};
pub use aggregation::{AggregationEngine, MunicipalityStats, Overview, StatisticsContext, SystemStats};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CoreError;
pub use integrity::{DeleteCheck, IntegrityGuard};
pub use store::{Entity, EntityKind, HierarchySnapshot, HierarchyStore, StoreError};
