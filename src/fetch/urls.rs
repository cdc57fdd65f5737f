// src/fetch/urls.rs

use crate::UniversityId;

/// Statistics API root. Every query is a plain GET against this endpoint.
pub const API_BASE: &str = "https://preview.datausa.io/api/data";

/// Profile pages render client-side, so they are only reachable through the
/// browser session, never via a plain GET.
pub const PROFILE_BASE: &str = "https://datausa.io/profile/university";

/// Completions aggregate used for id discovery. The feed repeats each
/// university once per sector, hence the dedup on the consumer side.
pub fn completions_query() -> String {
    format!("{API_BASE}?measures=Completions&drilldowns=University,Sector")
}

/// Graduation outcomes for one university, broken down by gender and race,
/// restricted to cells with at least 5 finishers.
pub fn graduation_query(id: UniversityId) -> String {
    format!(
        "{API_BASE}?University={id}\
         &measures=Graduation%20Rate,Number%20Of%20Finishers\
         &drilldowns=Gender,IPEDS%20Race\
         &Number%20Of%20Finishers%3E=5"
    )
}

/// Enrollment for one university and its parent aggregates, by race. The
/// aggregate rows come back interleaved and are filtered out downstream by
/// exact university name.
pub fn enrollment_query(id: UniversityId) -> String {
    format!("{API_BASE}?University={id},{id}:parents&measures=Enrollment&drilldowns=IPEDS%20Race")
}

pub fn profile_url(slug: &str) -> String {
    format!("{PROFILE_BASE}/{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_scope_to_the_id() {
        assert!(graduation_query(221768).contains("University=221768&"));
        assert!(enrollment_query(221768).contains("University=221768,221768:parents"));
        assert_eq!(
            profile_url("example-university"),
            "https://datausa.io/profile/university/example-university"
        );
    }
}
