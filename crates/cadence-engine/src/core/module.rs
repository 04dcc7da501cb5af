use std::future::{self, Future};

use crate::error::LoadError;

use super::EngineClient;

/// A loaded engine module: a factory for engine clients.
///
/// `C` is the drawing context type of the host the module is bound to. The
/// factory may keep its own handle to the context; it is never given ownership.
pub trait EngineModule<C> {
    fn instantiate(&self, context: &C) -> anyhow::Result<Box<dyn EngineClient>>;
}

/// Asynchronous source of an engine module.
///
/// Suspends the caller without blocking the host. A `LoadError` means the
/// caller must not proceed to bootstrap.
pub trait ModuleLoader<C> {
    fn load(&self) -> impl Future<Output = Result<Box<dyn EngineModule<C>>, LoadError>>;
}

/// Engine module backed by a plain constructor function.
pub struct FactoryModule<F> {
    factory: F,
}

impl<F> FactoryModule<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<C, F> EngineModule<C> for FactoryModule<F>
where
    F: Fn(&C) -> anyhow::Result<Box<dyn EngineClient>>,
{
    fn instantiate(&self, context: &C) -> anyhow::Result<Box<dyn EngineClient>> {
        (self.factory)(context)
    }
}

/// Loader for an engine linked into the host binary.
///
/// Resolves immediately; the module is always available.
#[derive(Clone)]
pub struct StaticLoader<F> {
    factory: F,
}

impl<F> StaticLoader<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<C, F> ModuleLoader<C> for StaticLoader<F>
where
    F: Fn(&C) -> anyhow::Result<Box<dyn EngineClient>> + Clone + 'static,
{
    fn load(&self) -> impl Future<Output = Result<Box<dyn EngineModule<C>>, LoadError>> {
        let module: Box<dyn EngineModule<C>> = Box::new(FactoryModule::new(self.factory.clone()));
        future::ready(Ok(module))
    }
}
