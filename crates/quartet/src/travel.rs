//! Travel Planner: a coordinator hands each request to destination, booking
//! and explore agents in turn, backed by a static travel catalog.
pub mod booking;
pub mod catalog;
pub mod coordinator;
pub mod destination;
pub mod explore;
pub mod models;

use chrono::Local;

pub use booking::BookingAgent;
pub use catalog::{Catalog, StaticCatalog};
pub use coordinator::{HandoffData, HandoffRequest, TravelCoordinator};
pub use destination::DestinationAgent;
pub use explore::ExploreAgent;
pub use models::{AgentResponse, BudgetLevel, TravelMood, TravelPlan, TravelRequest};

/// `prefix` followed by the local time in `format`. Ids already `taken`
/// get a `_2`, `_3`, ... suffix.
pub(crate) fn timestamp_id(prefix: &str, format: &str, taken: impl Fn(&str) -> bool) -> String {
    let base = format!("{}{}", prefix, Local::now().format(format));
    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let id = format!("{}_{}", base, n);
        if !taken(&id) {
            return id;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_timestamp_id_uses_prefix_and_format() {
        let id = timestamp_id("BK", "%Y", |_| false);
        assert_eq!(id, format!("BK{}", Local::now().format("%Y")));
    }

    #[test]
    fn test_timestamp_id_skips_taken_ids() {
        let base = format!("session_{}", Local::now().format("%Y"));
        let taken: HashSet<String> = [base.clone(), format!("{}_2", base)].into();

        let id = timestamp_id("session_", "%Y", |id| taken.contains(id));
        assert_eq!(id, format!("{}_3", base));
    }
}
