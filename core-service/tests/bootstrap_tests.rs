//! Bootstrap tests for the platform feature flags
//!
//! Run with `--features health-connect,healthkit`.

#![cfg(any(feature = "health-connect", feature = "healthkit"))]

use core_service::{HealthResult, WellnessConfig};
use std::sync::Arc;

#[cfg(feature = "health-connect")]
mod health_connect {
    use super::*;
    use bridge_traits::error::{BridgeError, Result};
    use bridge_traits::health_connect::{HealthConnectClient, HealthConnectHost, SdkStatus};
    use core_service::bootstrap_health_connect;

    /// Device without the Health Connect app.
    struct MissingHost;

    impl HealthConnectHost for MissingHost {
        fn sdk_status(&self) -> SdkStatus {
            SdkStatus::Unavailable
        }

        fn client(&self) -> Result<Arc<dyn HealthConnectClient>> {
            Err(BridgeError::NotAvailable("Health Connect".to_string()))
        }
    }

    #[tokio::test]
    async fn test_bootstrap_wires_health_connect_provider() {
        let service =
            bootstrap_health_connect(Arc::new(MissingHost), WellnessConfig::builder()).unwrap();

        assert_eq!(service.platform(), "android");

        let steps = service.get_step_count(0, 1_000).await;
        assert_eq!(
            steps,
            HealthResult::data_not_available("Health Connect is not installed on this device")
        );
    }

    #[test]
    fn test_bootstrap_rejects_invalid_settings() {
        let result = bootstrap_health_connect(
            Arc::new(MissingHost),
            WellnessConfig::builder().utc_offset_minutes(24 * 60),
        );

        assert!(matches!(result, Err(core_service::CoreError::Runtime(_))));
    }
}

#[cfg(feature = "healthkit")]
mod healthkit {
    use super::*;
    use bridge_traits::healthkit::{
        AuthorizationCompletion, HealthKitStore, QuantityType, QuantityTypeIdentifier,
        QueryHandle, SampleCompletion, SampleQuery, StatisticsCompletion, StatisticsQuery,
    };
    use core_service::bootstrap_healthkit;

    /// Device where HealthKit reports no health data (iPad).
    struct UnavailableStore;

    impl HealthKitStore for UnavailableStore {
        fn is_health_data_available(&self) -> bool {
            false
        }

        fn quantity_type(&self, identifier: QuantityTypeIdentifier) -> Option<QuantityType> {
            Some(QuantityType::new(identifier))
        }

        fn request_authorization(
            &self,
            _read_types: Vec<QuantityType>,
            _completion: AuthorizationCompletion,
        ) {
            panic!("authorization requested on an unavailable store");
        }

        fn execute_statistics_query(
            &self,
            _query: StatisticsQuery,
            _completion: StatisticsCompletion,
        ) -> QueryHandle {
            panic!("statistics query on an unavailable store");
        }

        fn execute_sample_query(
            &self,
            _query: SampleQuery,
            _completion: SampleCompletion,
        ) -> QueryHandle {
            panic!("sample query on an unavailable store");
        }

        fn stop_query(&self, _handle: QueryHandle) {}
    }

    #[tokio::test]
    async fn test_bootstrap_wires_healthkit_provider() {
        let service =
            bootstrap_healthkit(Arc::new(UnavailableStore), WellnessConfig::builder()).unwrap();

        assert_eq!(service.platform(), "ios");

        let authorization = service.request_permissions().await;
        assert_eq!(authorization.error_code(), Some("DATA_NOT_AVAILABLE"));

        let heart_rate = service.get_recent_heart_rate().await;
        assert_eq!(heart_rate.error_code(), Some("DATA_NOT_AVAILABLE"));
    }
}
