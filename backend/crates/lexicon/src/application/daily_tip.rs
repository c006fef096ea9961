//! Daily Tip Use Case

use crate::domain::entities::DailyTip;
use crate::domain::repository::DailyTipRepository;
use crate::domain::services::tip_for_day;
use crate::error::LexiconResult;
use chrono::NaiveDate;
use std::sync::Arc;

/// Daily Tip Use Case
pub struct DailyTipUseCase<T>
where
    T: DailyTipRepository,
{
    tip_repo: Arc<T>,
}

impl<T> DailyTipUseCase<T>
where
    T: DailyTipRepository,
{
    pub fn new(tip_repo: Arc<T>) -> Self {
        Self { tip_repo }
    }

    /// Tip of `day`, `None` when no tip is active
    pub async fn execute(&self, day: NaiveDate) -> LexiconResult<Option<DailyTip>> {
        let tips = self.tip_repo.active_tips().await?;
        Ok(tip_for_day(&tips, day).cloned())
    }
}
