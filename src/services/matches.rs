use crate::error::ApiError;
use crate::models::matches::{DiscoverFilters, DiscoverPage, MatchAction, MatchActionResult, MatchCandidate, MatchList};
use crate::repositories::dashboard::MembreBlock;
use crate::repositories::matches::DiscoverRequest;
use crate::repositories::MatchRepository;
use crate::upstream::{LooseField, UpstreamClient};

use super::dashboard::{to_member_summary, total_pages};
use super::{ensure_connected, rejection};

pub(crate) fn to_match_candidate(member: &MembreBlock) -> Option<MatchCandidate> {
    let summary = to_member_summary(member)?;
    Some(MatchCandidate {
        id: summary.id,
        username: summary.username,
        age: summary.age,
        gender: summary.gender,
        location: summary.location,
        photo_url: summary.photo_url,
    })
}

pub struct MatchService<'a> {
    repository: MatchRepository<'a>,
}

impl<'a> MatchService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self {
            repository: MatchRepository::new(client),
        }
    }

    pub async fn discover(&self, session_id: &str, filters: &DiscoverFilters) -> Result<DiscoverPage, ApiError> {
        let page = filters.page.unwrap_or(1);
        let request = DiscoverRequest {
            page,
            gender: filters.gender,
            age_min: filters.age_from,
            age_max: filters.age_to,
        };

        let payload = self.repository.discover(session_id, &request).await?;
        ensure_connected(&payload.connected)?;

        let items: Vec<_> = payload.result.iter().filter_map(to_match_candidate).collect();
        tracing::info!(items_count = items.len(), page, "discover deck normalized");

        Ok(DiscoverPage {
            items,
            page,
            total_pages: total_pages(&payload.nb_pages),
        })
    }

    pub async fn matches(&self, session_id: &str) -> Result<MatchList, ApiError> {
        let payload = self.repository.matches(session_id).await?;
        ensure_connected(&payload.connected)?;

        Ok(MatchList {
            items: payload.result.iter().filter_map(to_match_candidate).collect(),
        })
    }

    pub async fn act(&self, session_id: &str, user_id: i64, action: MatchAction) -> Result<MatchActionResult, ApiError> {
        let payload = self.repository.vote(session_id, user_id, action).await?;
        if !payload.accepted.flag() {
            return Err(rejection(&payload.error, "Match action rejected"));
        }

        let is_match = action == MatchAction::Like && payload.is_match.flag();
        tracing::info!(user_id, ?action, is_match, "match action recorded");

        Ok(MatchActionResult { is_match })
    }
}
