//! Integration tests for HealthKit callback bridging
//!
//! These tests verify:
//! - Dropping an in-flight fetch stops the native query
//! - Completions delivered from another thread resume the caller
//! - A store that never calls its completion yields UnknownError

use bridge_traits::healthkit::{
    AuthorizationCompletion, HealthKitStore, QuantitySample, QuantityType, QuantityTypeIdentifier,
    QueryHandle, Sample, SampleCompletion, SampleQuery, Statistics, StatisticsCompletion,
    StatisticsQuery,
};
use chrono::{TimeZone, Utc};
use core_health::{HealthDataProvider, HealthDataRepository, HealthResult};
use futures::FutureExt;
use provider_healthkit::HealthKitProvider;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// How the store answers a query.
#[derive(Clone, Copy)]
enum Delivery {
    /// Keep the completion until the test fires or drops it.
    Hold,
    /// Call the completion from a separate thread after a short delay.
    Background,
    /// Release the completion without calling it.
    Drop,
}

struct ScriptedStore {
    delivery: Delivery,
    next_handle: AtomicU64,
    stopped: Mutex<Vec<QueryHandle>>,
    held_statistics: Mutex<Vec<StatisticsCompletion>>,
    held_samples: Mutex<Vec<SampleCompletion>>,
}

impl ScriptedStore {
    fn new(delivery: Delivery) -> Arc<Self> {
        Arc::new(Self {
            delivery,
            next_handle: AtomicU64::new(1),
            stopped: Mutex::new(Vec::new()),
            held_statistics: Mutex::new(Vec::new()),
            held_samples: Mutex::new(Vec::new()),
        })
    }

    fn handle(&self) -> QueryHandle {
        QueryHandle(self.next_handle.fetch_add(1, Ordering::SeqCst))
    }

    fn stopped(&self) -> Vec<QueryHandle> {
        self.stopped.lock().unwrap().clone()
    }
}

impl HealthKitStore for ScriptedStore {
    fn is_health_data_available(&self) -> bool {
        true
    }

    fn quantity_type(&self, identifier: QuantityTypeIdentifier) -> Option<QuantityType> {
        Some(QuantityType::new(identifier))
    }

    fn request_authorization(
        &self,
        _read_types: Vec<QuantityType>,
        completion: AuthorizationCompletion,
    ) {
        match self.delivery {
            Delivery::Drop => drop(completion),
            _ => {
                thread::spawn(move || completion(Ok(true)));
            }
        }
    }

    fn execute_statistics_query(
        &self,
        _query: StatisticsQuery,
        completion: StatisticsCompletion,
    ) -> QueryHandle {
        match self.delivery {
            Delivery::Hold => self.held_statistics.lock().unwrap().push(completion),
            Delivery::Background => {
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(20));
                    completion(Ok(Some(Statistics {
                        sum_count: Some(8_421.0),
                    })));
                });
            }
            Delivery::Drop => drop(completion),
        }
        self.handle()
    }

    fn execute_sample_query(
        &self,
        _query: SampleQuery,
        completion: SampleCompletion,
    ) -> QueryHandle {
        match self.delivery {
            Delivery::Hold => self.held_samples.lock().unwrap().push(completion),
            Delivery::Background => {
                thread::spawn(move || {
                    let at = Utc.timestamp_millis_opt(1_500).unwrap();
                    completion(Ok(Some(vec![Sample::Quantity(QuantitySample {
                        value_per_minute: 64.0,
                        start_date: at,
                        end_date: at,
                    })])));
                });
            }
            Delivery::Drop => drop(completion),
        }
        self.handle()
    }

    fn stop_query(&self, handle: QueryHandle) {
        self.stopped.lock().unwrap().push(handle);
    }
}

#[tokio::test]
async fn test_dropping_step_count_future_stops_query() {
    let store = ScriptedStore::new(Delivery::Hold);
    let provider = HealthKitProvider::new(store.clone());

    assert!(provider.fetch_step_count(0, 1_000).now_or_never().is_none());

    assert_eq!(store.stopped(), vec![QueryHandle(1)]);
}

#[tokio::test]
async fn test_dropping_heart_rate_future_stops_query() {
    let store = ScriptedStore::new(Delivery::Hold);
    let repository = HealthDataRepository::new(Arc::new(HealthKitProvider::new(store.clone())));

    assert!(repository.get_heart_rate(0, 1_000).now_or_never().is_none());

    assert_eq!(store.stopped(), vec![QueryHandle(1)]);
}

#[tokio::test]
async fn test_late_completion_after_cancellation_is_ignored() {
    let store = ScriptedStore::new(Delivery::Hold);
    let provider = HealthKitProvider::new(store.clone());

    assert!(provider.fetch_step_count(0, 1_000).now_or_never().is_none());

    let completion = store.held_statistics.lock().unwrap().pop().unwrap();
    completion(Ok(None));

    assert_eq!(store.stopped().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_background_completion_resumes_caller() {
    let store = ScriptedStore::new(Delivery::Background);
    let repository = HealthDataRepository::new(Arc::new(HealthKitProvider::new(store.clone())));

    let steps = repository.get_step_count(0, 86_400_000).await;
    assert_eq!(steps.data().map(|m| m.value), Some(8_421.0));

    let heart_rate = repository.get_heart_rate(0, 86_400_000).await;
    assert_eq!(
        heart_rate.data().map(|samples| samples[0].beats_per_minute),
        Some(64.0)
    );

    let authorization = repository.request_permissions().await;
    assert_eq!(authorization, HealthResult::Success(true));

    assert!(store.stopped().is_empty());
}

#[tokio::test]
async fn test_dropped_completion_is_unknown_error() {
    let store = ScriptedStore::new(Delivery::Drop);
    let provider = HealthKitProvider::new(store.clone());

    let steps = provider.fetch_step_count(0, 1_000).await;
    assert_eq!(steps.error_code(), Some("UNKNOWN_ERROR"));

    let heart_rate = provider.fetch_heart_rate(0, 1_000).await;
    assert_eq!(heart_rate.error_code(), Some("UNKNOWN_ERROR"));

    let authorization = provider.request_authorization().await;
    assert_eq!(authorization.error_code(), Some("UNKNOWN_ERROR"));

    assert!(store.stopped().is_empty());
}
