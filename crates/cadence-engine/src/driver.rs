//! Start-up sequence: module load, surface bootstrap, loop start.

use crate::core::ModuleLoader;
use crate::device::{GraphicsApi, SurfaceBootstrapper, SurfaceProvider};
use crate::error::{BootstrapError, DriverError};
use crate::host::{Host, Notifier};
use crate::scheduler::{FrameScheduler, SchedulerConfig};
use crate::time::DEFAULT_TARGET_FPS;
use crate::viewport::DEFAULT_VIEWPORT_SCALE;

/// Driver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Identifier of the drawing surface to bootstrap.
    pub surface_id: String,

    /// Graphics API the drawing context must support.
    pub api: GraphicsApi,

    /// Upper bound on executed frames per second.
    pub target_fps: f64,

    /// Fraction of the host window the surface occupies.
    pub viewport_scale: f64,
}

impl DriverConfig {
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            target_fps: self.target_fps,
            viewport_scale: self.viewport_scale,
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            surface_id: "canvas".to_string(),
            api: GraphicsApi::WebGl2,
            target_fps: DEFAULT_TARGET_FPS,
            viewport_scale: DEFAULT_VIEWPORT_SCALE,
        }
    }
}

/// Loads the engine module, bootstraps the configured surface and starts the
/// frame loop.
///
/// Nothing is retried. A load failure never reaches the surface provider; an
/// unsupported graphics API is reported to the user once through `host`.
pub async fn launch<L, P, H>(
    config: &DriverConfig,
    loader: &L,
    provider: &mut P,
    host: &mut H,
) -> Result<FrameScheduler<P::Surface, P::Context>, DriverError>
where
    P: SurfaceProvider,
    L: ModuleLoader<P::Context>,
    H: Host + Notifier + ?Sized,
{
    let module = loader.load().await.inspect_err(|e| log::error!("{e}"))?;

    let booted = match SurfaceBootstrapper::new(provider, config.api)
        .bootstrap(&config.surface_id, &*module)
    {
        Ok(booted) => booted,
        Err(err) => {
            if let BootstrapError::ContextUnavailable { api } = &err {
                host.alert(&format!("Failed to initialize {api}"));
            }
            log::error!("{err}");
            return Err(err.into());
        }
    };

    Ok(FrameScheduler::start(booted, config.scheduler(), host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::HostSize;
    use crate::error::LoadError;
    use crate::testing::{CallLog, FakeHost, FakeLoader, FakeProvider};

    fn host() -> FakeHost {
        FakeHost::new(HostSize::new(800.0, 1000.0))
    }

    #[test]
    fn default_config_matches_browser_page() {
        let config = DriverConfig::default();
        assert_eq!(config.surface_id, "canvas");
        assert_eq!(config.api, GraphicsApi::WebGl2);
        assert_eq!(config.scheduler(), SchedulerConfig::default());
    }

    #[test]
    fn launch_starts_scheduled_loop() {
        let log = CallLog::default();
        let mut provider = FakeProvider::new("canvas");
        let mut host = host();

        let mut scheduler = pollster::block_on(launch(
            &DriverConfig::default(),
            &FakeLoader::resolving(log.clone()),
            &mut provider,
            &mut host,
        ))
        .unwrap();

        assert!(scheduler.is_scheduled());
        assert_eq!(log.instances(), 1);
        assert!(host.alerts.is_empty());

        assert!(host.fire());
        scheduler.tick(&mut host).unwrap();
        assert_eq!(log.updates(), vec![(0.0, 720.0, 900.0)]);
        assert_eq!(log.renders(), 1);
    }

    #[test]
    fn load_failure_never_bootstraps() {
        let mut provider = FakeProvider::new("canvas");
        let mut host = host();

        let err = pollster::block_on(launch(
            &DriverConfig::default(),
            &FakeLoader::rejecting(),
            &mut provider,
            &mut host,
        ))
        .err()
        .unwrap();

        assert!(matches!(err, DriverError::Load(LoadError::Rejected(_))));
        assert_eq!(provider.surface_lookups, 0);
        assert!(provider.context_requests.is_empty());
        assert_eq!(host.requests, 0);
        assert!(host.alerts.is_empty());
    }

    #[test]
    fn context_failure_alerts_once_and_never_runs_engine() {
        let log = CallLog::default();
        let mut provider = FakeProvider::new("canvas").unsupported();
        let mut host = host();

        let err = pollster::block_on(launch(
            &DriverConfig::default(),
            &FakeLoader::resolving(log.clone()),
            &mut provider,
            &mut host,
        ))
        .err()
        .unwrap();

        assert!(matches!(
            err,
            DriverError::Bootstrap(BootstrapError::ContextUnavailable { .. })
        ));
        assert_eq!(host.alerts, vec!["Failed to initialize WebGL2".to_string()]);
        assert_eq!(host.requests, 0);
        assert_eq!(log.instances(), 0);
        assert!(log.calls().is_empty());
    }

    #[test]
    fn missing_surface_is_not_user_alerted() {
        let mut provider = FakeProvider::new("canvas");
        let mut host = host();
        let config = DriverConfig {
            surface_id: "stage".to_string(),
            ..DriverConfig::default()
        };

        let err = pollster::block_on(launch(
            &config,
            &FakeLoader::resolving(CallLog::default()),
            &mut provider,
            &mut host,
        ))
        .err()
        .unwrap();

        assert!(matches!(
            err,
            DriverError::Bootstrap(BootstrapError::SurfaceNotFound { .. })
        ));
        assert!(host.alerts.is_empty());
    }

    #[test]
    fn configured_rate_and_scale_reach_scheduler() {
        let mut provider = FakeProvider::new("canvas");
        let mut host = host();
        let config = DriverConfig {
            target_fps: 10.0,
            viewport_scale: 0.5,
            ..DriverConfig::default()
        };

        let scheduler = pollster::block_on(launch(
            &config,
            &FakeLoader::resolving(CallLog::default()),
            &mut provider,
            &mut host,
        ))
        .unwrap();

        assert_eq!(scheduler.state().target_interval_ms(), 100.0);
        assert_eq!(scheduler.monitor().scale(), 0.5);
    }
}
