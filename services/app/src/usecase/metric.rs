use serde_json::Value;

use crate::domain::repository::MetricRepository;
use crate::domain::types::{Metric, NewMetric};
use crate::error::AppServiceError;

pub struct RecordMetricInput {
    pub name: String,
    pub value: i32,
    pub tags: Option<Value>,
}

pub struct RecordMetricUseCase<R: MetricRepository> {
    pub repo: R,
}

impl<R: MetricRepository> RecordMetricUseCase<R> {
    /// Record a data point. `user_id` is optional: anonymous metrics and
    /// metrics of deleted users carry no owner.
    pub async fn execute(
        &self,
        user_id: Option<&str>,
        input: RecordMetricInput,
    ) -> Result<Metric, AppServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppServiceError::MissingData);
        }
        self.repo
            .record(NewMetric {
                name: name.to_owned(),
                value: input.value,
                tags: input.tags,
                user_id: user_id.map(str::to_owned),
            })
            .await
            .map_err(|e| AppServiceError::on_missing_reference(e, AppServiceError::UserNotFound))
    }
}
