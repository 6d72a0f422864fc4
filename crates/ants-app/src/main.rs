mod settings;

use anyhow::Context;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use ants_engine::core::{App, AppControl, FrameCtx};
use ants_engine::device::{Gpu, GpuInit};
use ants_engine::logging::{LoggingConfig, init_logging};
use ants_engine::sim::{
    FrameDriver, PatternTexture, SimConfig, SimError, SimPipelines, WgpuBackend,
};
use ants_engine::window::{Runtime, RuntimeConfig};

/// Pipelines plus the driver; created once the GPU exists.
struct Simulation {
    pipelines: SimPipelines,
    driver: FrameDriver<PatternTexture>,
}

struct AntsApp {
    config: SimConfig,
    sim: Option<Simulation>,
}

impl AntsApp {
    fn new(config: SimConfig) -> Self {
        Self { config, sim: None }
    }
}

impl App for AntsApp {
    fn on_init(&mut self, gpu: &mut Gpu<'_>) -> anyhow::Result<()> {
        let pipelines = SimPipelines::new(gpu).context("failed to build simulation pipelines")?;
        let surface = gpu.size().into();

        let driver = {
            let mut backend = WgpuBackend::new(gpu, &pipelines);
            FrameDriver::new(&mut backend, self.config.clone(), surface)
        };

        log::info!(
            "simulation ready: {} fps, {} transfer",
            self.config.target_fps,
            self.config.transfer
        );
        self.sim = Some(Simulation { pipelines, driver });
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(sim) = self.sim.as_mut() {
            sim.driver.request_resize(size.into());
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(sim) = self.sim.as_mut() else {
            return AppControl::Continue;
        };

        let surface = ctx.surface_extent();
        let mut backend = WgpuBackend::new(ctx.gpu, &sim.pipelines).with_window(ctx.window);

        match sim.driver.tick(&mut backend, surface) {
            Ok(_) => AppControl::Continue,
            Err(err @ SimError::DeviceFatal(_)) => {
                let stats = sim.driver.stats();
                log::error!(
                    "{err}; stopping after {} presented and {} skipped ticks",
                    stats.presented,
                    stats.skipped()
                );
                AppControl::Exit
            }
            Err(err) => {
                log::error!("unrecoverable tick error: {err}");
                AppControl::Exit
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = settings::from_env();
    let runtime = RuntimeConfig {
        title: "Ants".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
        target_fps: config.target_fps,
    };

    Runtime::run(runtime, GpuInit::default(), AntsApp::new(config))
}
