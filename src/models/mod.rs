pub mod plan;
pub mod record;
pub mod summary;
pub mod tokens;

pub use plan::{PlanQuota, PlanTier};
pub use record::UsageRecord;
pub use summary::UsageSummary;
pub use tokens::TokenCounts;
