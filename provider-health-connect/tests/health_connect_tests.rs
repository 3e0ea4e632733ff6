//! Integration tests for the Health Connect provider behind the repository
//!
//! Uses a scripted in-memory Health Connect instead of mocks so paging and
//! grant changes behave like a device would.

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result};
use bridge_traits::health_connect::{
    HealthConnectClient, HealthConnectHost, HealthPermission, HeartRateRecord, HeartRateSample,
    ReadRecordsRequest, ReadRecordsResponse, SdkStatus, StepsRecord,
};
use chrono::{DateTime, TimeZone, Utc};
use core_health::{HealthDataRepository, HealthResult};
use provider_health_connect::HealthConnectProvider;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// In-memory Health Connect store serving records in fixed-size pages.
struct ScriptedHealthConnect {
    granted: Mutex<HashSet<HealthPermission>>,
    steps: Vec<StepsRecord>,
    heart_rate: Vec<HeartRateRecord>,
    page_size: usize,
    requests: Mutex<Vec<ReadRecordsRequest>>,
}

impl ScriptedHealthConnect {
    fn new(page_size: usize) -> Self {
        Self {
            granted: Mutex::new(HashSet::new()),
            steps: Vec::new(),
            heart_rate: Vec::new(),
            page_size,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn grant(&self, permission: HealthPermission) {
        self.granted.lock().unwrap().insert(permission);
    }

    fn page<R: Clone>(&self, records: &[R], request: ReadRecordsRequest) -> ReadRecordsResponse<R> {
        let offset: usize = request
            .page_token
            .as_deref()
            .and_then(|token| token.parse().ok())
            .unwrap_or(0);
        self.requests.lock().unwrap().push(request);

        let end = (offset + self.page_size).min(records.len());
        let response = ReadRecordsResponse::new(records[offset.min(end)..end].to_vec());
        if end < records.len() {
            response.with_page_token(end.to_string())
        } else {
            response
        }
    }

    fn require(&self, permission: HealthPermission) -> Result<()> {
        if self.granted.lock().unwrap().contains(&permission) {
            Ok(())
        } else {
            Err(BridgeError::Security(format!("{} not granted", permission)))
        }
    }
}

#[async_trait]
impl HealthConnectClient for ScriptedHealthConnect {
    async fn granted_permissions(&self) -> Result<HashSet<HealthPermission>> {
        Ok(self.granted.lock().unwrap().clone())
    }

    async fn read_steps(
        &self,
        request: ReadRecordsRequest,
    ) -> Result<ReadRecordsResponse<StepsRecord>> {
        self.require(HealthPermission::ReadSteps)?;
        Ok(self.page(&self.steps, request))
    }

    async fn read_heart_rate(
        &self,
        request: ReadRecordsRequest,
    ) -> Result<ReadRecordsResponse<HeartRateRecord>> {
        self.require(HealthPermission::ReadHeartRate)?;
        Ok(self.page(&self.heart_rate, request))
    }
}

struct Host(Arc<ScriptedHealthConnect>);

impl HealthConnectHost for Host {
    fn sdk_status(&self) -> SdkStatus {
        SdkStatus::Available
    }

    fn client(&self) -> Result<Arc<dyn HealthConnectClient>> {
        let client: Arc<dyn HealthConnectClient> = self.0.clone();
        Ok(client)
    }
}

fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

fn repository(store: Arc<ScriptedHealthConnect>) -> HealthDataRepository {
    HealthDataRepository::new(Arc::new(HealthConnectProvider::new(Arc::new(Host(store)))))
}

#[tokio::test]
async fn test_authorization_follows_grant_state() {
    let store = Arc::new(ScriptedHealthConnect::new(10));
    let repository = repository(store.clone());

    assert_eq!(repository.request_permissions().await.error_code(), Some("PERMISSION_DENIED"));

    store.grant(HealthPermission::ReadSteps);
    assert_eq!(repository.request_permissions().await.error_code(), Some("PERMISSION_DENIED"));

    store.grant(HealthPermission::ReadHeartRate);
    assert_eq!(repository.request_permissions().await, HealthResult::Success(true));
}

#[tokio::test]
async fn test_step_count_across_many_pages() {
    let mut store = ScriptedHealthConnect::new(3);
    store.steps = (1..=10)
        .map(|i| StepsRecord {
            count: i * 100,
            start_time: at(i * 1_000),
            end_time: at(i * 1_000 + 500),
        })
        .collect();
    let store = Arc::new(store);
    store.grant(HealthPermission::ReadSteps);

    let result = repository(store.clone()).get_step_count(0, 60_000).await;

    assert_eq!(result.data().map(|m| m.value), Some(5_500.0));
    assert_eq!(store.requests.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn test_step_count_without_grant_is_permission_denied() {
    let store = Arc::new(ScriptedHealthConnect::new(10));

    let result = repository(store.clone()).get_step_count(0, 60_000).await;

    assert!(matches!(result, HealthResult::PermissionDenied { .. }));
}

#[tokio::test]
async fn test_heart_rate_end_to_end() {
    let mut store = ScriptedHealthConnect::new(1);
    store.heart_rate = vec![
        HeartRateRecord {
            start_time: at(1_000),
            end_time: at(1_000),
            samples: vec![HeartRateSample {
                time: at(1_000),
                beats_per_minute: 72,
            }],
        },
        HeartRateRecord {
            start_time: at(2_000),
            end_time: at(2_000),
            samples: vec![HeartRateSample {
                time: at(2_000),
                beats_per_minute: 75,
            }],
        },
    ];
    let store = Arc::new(store);
    store.grant(HealthPermission::ReadHeartRate);

    let measurements = repository(store)
        .get_heart_rate(0, 3_000)
        .await
        .into_data()
        .expect("success");

    let bpm: Vec<f64> = measurements.iter().map(|m| m.beats_per_minute).collect();
    assert_eq!(bpm, vec![72.0, 75.0]);
}

#[tokio::test]
async fn test_invalid_window_never_reaches_health_connect() {
    let store = Arc::new(ScriptedHealthConnect::new(10));
    store.grant(HealthPermission::ReadSteps);

    let result = repository(store.clone()).get_step_count(5_000, 1_000).await;

    assert_eq!(result.error_code(), Some("UNKNOWN_ERROR"));
    assert!(store.requests.lock().unwrap().is_empty());
}
