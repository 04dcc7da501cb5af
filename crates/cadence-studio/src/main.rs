mod pulse;

use cadence_engine::DriverConfig;
use cadence_engine::core::{EngineClient, StaticLoader};
use cadence_engine::device::{GpuContext, GraphicsApi, SwapchainOptions};
use cadence_engine::logging::{LoggingConfig, init_logging};
use cadence_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use pulse::PulseClient;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let window = RuntimeConfig {
        title: "Cadence Studio".to_string(),
        initial_size: LogicalSize::new(960.0, 640.0),
    };

    let driver = DriverConfig {
        api: GraphicsApi::Wgpu,
        ..DriverConfig::default()
    };

    let loader = StaticLoader::new(|gpu: &GpuContext| {
        Ok(Box::new(PulseClient::new(gpu)) as Box<dyn EngineClient>)
    });

    Runtime::run(window, driver, SwapchainOptions::default(), loader)
}
