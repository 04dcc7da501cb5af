use std::fmt;

use crate::coords::{ViewportDimensions, ViewportRect};
use crate::core::{EngineClient, EngineModule};
use crate::error::BootstrapError;

/// Graphics API a drawing context must support.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum GraphicsApi {
    /// WebGL 2 (or a GL backend restricted to WebGL 2 capabilities).
    #[default]
    WebGl2,
    /// Any backend wgpu can drive on this host.
    Wgpu,
}

impl fmt::Display for GraphicsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GraphicsApi::WebGl2 => "WebGL2",
            GraphicsApi::Wgpu => "wgpu",
        })
    }
}

/// The on-screen drawing target.
pub trait Surface {
    /// Backing pixel dimensions as last recorded.
    fn dimensions(&self) -> ViewportDimensions;

    /// Sets backing pixel dimensions and presentation-size hints.
    fn resize(&mut self, dimensions: ViewportDimensions);
}

/// Capability object bound to a surface.
pub trait DrawingContext {
    fn set_viewport(&mut self, rect: ViewportRect);
}

/// Host surface lookup and context acquisition.
pub trait SurfaceProvider {
    type Surface: Surface;
    type Context: DrawingContext;

    fn find_surface(&mut self, id: &str) -> Option<Self::Surface>;

    /// Returns `None` when the host does not support `api`.
    fn acquire_context(&mut self, surface: &mut Self::Surface, api: GraphicsApi)
    -> Option<Self::Context>;
}

/// Product of a successful bootstrap. Lives for the rest of the session.
pub struct Bootstrapped<S, C> {
    pub surface: S,
    pub context: C,
    pub client: Box<dyn EngineClient>,
}

/// Acquires a drawing context from a named surface and constructs one engine
/// client against it.
pub struct SurfaceBootstrapper<'p, P> {
    provider: &'p mut P,
    api: GraphicsApi,
}

impl<'p, P: SurfaceProvider> SurfaceBootstrapper<'p, P> {
    pub fn new(provider: &'p mut P, api: GraphicsApi) -> Self {
        Self { provider, api }
    }

    pub fn bootstrap(
        self,
        surface_id: &str,
        module: &dyn EngineModule<P::Context>,
    ) -> Result<Bootstrapped<P::Surface, P::Context>, BootstrapError> {
        let mut surface = self
            .provider
            .find_surface(surface_id)
            .ok_or_else(|| BootstrapError::SurfaceNotFound { id: surface_id.to_string() })?;

        let context = self
            .provider
            .acquire_context(&mut surface, self.api)
            .ok_or(BootstrapError::ContextUnavailable { api: self.api })?;

        let client = module
            .instantiate(&context)
            .map_err(BootstrapError::ClientConstruction)?;

        log::debug!("bootstrapped surface `{surface_id}` with {}", self.api);

        Ok(Bootstrapped { surface, context, client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallLog, FakeContext, FakeProvider, scripted_module};

    #[test]
    fn resolves_surface_and_builds_one_client() {
        let log = CallLog::default();
        let mut provider = FakeProvider::new("canvas");
        let module = scripted_module(log.clone());

        let booted = SurfaceBootstrapper::new(&mut provider, GraphicsApi::WebGl2)
            .bootstrap("canvas", &module)
            .unwrap();

        assert_eq!(provider.context_requests, vec![GraphicsApi::WebGl2]);
        assert_eq!(booted.surface.dimensions(), ViewportDimensions::default());
        assert_eq!(log.instances(), 1);
        assert!(log.calls().is_empty());
    }

    #[test]
    fn unknown_surface_is_reported_by_name() {
        let mut provider = FakeProvider::new("canvas");
        let module = scripted_module(CallLog::default());

        let err = SurfaceBootstrapper::new(&mut provider, GraphicsApi::WebGl2)
            .bootstrap("missing", &module)
            .err()
            .unwrap();

        assert!(matches!(err, BootstrapError::SurfaceNotFound { ref id } if id == "missing"));
        assert!(provider.context_requests.is_empty());
    }

    #[test]
    fn unsupported_api_skips_client_construction() {
        let log = CallLog::default();
        let mut provider = FakeProvider::new("canvas").unsupported();
        let module = scripted_module(log.clone());

        let err = SurfaceBootstrapper::new(&mut provider, GraphicsApi::WebGl2)
            .bootstrap("canvas", &module)
            .err()
            .unwrap();

        assert!(matches!(err, BootstrapError::ContextUnavailable { api: GraphicsApi::WebGl2 }));
        assert_eq!(err.to_string(), "failed to initialize WebGL2");
        assert_eq!(log.instances(), 0);
    }

    #[test]
    fn factory_failure_is_wrapped() {
        let mut provider = FakeProvider::new("canvas");
        let module = crate::core::FactoryModule::new(|_: &FakeContext| {
            Err::<Box<dyn EngineClient>, _>(anyhow::anyhow!("shader compile failed"))
        });

        let err = SurfaceBootstrapper::new(&mut provider, GraphicsApi::Wgpu)
            .bootstrap("canvas", &module)
            .err()
            .unwrap();

        assert!(matches!(err, BootstrapError::ClientConstruction(_)));
    }
}
