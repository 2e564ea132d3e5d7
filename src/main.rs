//! specscope - live spectrum and waveform of an audio input
//!
//! Left arrow shows the spectrum, right arrow the waveform, Esc quits.

use std::collections::VecDeque;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use specscope::analysis::{Analyzer, FrameConsumer};
use specscope::audio::{self, CaptureHost};
use specscope::cli::Args;
use specscope::display::{DisplayMode, ModeEvent, PointProjector};
use specscope::error::RenderError;
use specscope::params::{AnalysisConfig, RenderConfig};
use specscope::rendering::RenderSystem;

/// Rolling frame-time statistics, logged once per second
struct FrameStats {
    frame_times: VecDeque<Duration>,
    last_frame: Instant,
    last_report: Instant,
}

impl FrameStats {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_times: VecDeque::new(),
            last_frame: now,
            last_report: now,
        }
    }

    fn record_frame(&mut self, sequence: u64) {
        let now = Instant::now();
        self.frame_times.push_back(now - self.last_frame);
        self.last_frame = now;
        if self.frame_times.len() > 60 {
            self.frame_times.pop_front();
        }

        if now - self.last_report > Duration::from_secs(1) {
            debug!("FPS: {:.1}, analysis frame #{}", self.current_fps(), sequence);
            self.last_report = now;
        }
    }

    fn current_fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total.as_secs_f32() / self.frame_times.len() as f32;

        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }
}

/// Main application state
///
/// Fields are populated in startup order (window, render system, analyzer,
/// capture) and torn down in reverse by `shutdown`.
struct App {
    args: Args,
    render_config: RenderConfig,
    analysis_config: AnalysisConfig,

    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    frames: Option<FrameConsumer>,
    capture: Option<Box<dyn CaptureHost>>,

    projector: PointProjector,
    mode: DisplayMode,
    stats: FrameStats,

    /// Set when initialization failed; the process exits with status 1
    failed: bool,
}

impl App {
    fn new(args: Args) -> Self {
        let render_config = RenderConfig::default();
        let analysis_config = AnalysisConfig::with_display_height(render_config.window_height);
        let projector =
            PointProjector::new(render_config.window_height, analysis_config.window_size);

        Self {
            args,
            render_config,
            analysis_config,
            window: None,
            render_system: None,
            frames: None,
            capture: None,
            projector,
            mode: DisplayMode::default(),
            stats: FrameStats::new(),
            failed: false,
        }
    }

    /// Window -> render system -> analyzer -> capture host
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title.clone())
            .with_resizable(false)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(RenderError::from)?,
        );
        self.window = Some(Arc::clone(&window));

        let render_system = pollster::block_on(RenderSystem::new(
            window,
            &self.render_config,
            self.analysis_config.window_size,
        ))
        .context("display initialization failed")?;
        self.render_system = Some(render_system);

        let (analyzer, frames) =
            Analyzer::new(&self.analysis_config).context("analysis initialization failed")?;
        self.frames = Some(frames);

        let capture = audio::start(
            self.args.backend,
            &self.args.client_name,
            self.args.device.as_deref(),
            analyzer,
        )
        .context("audio capture initialization failed")?;
        info!(
            "Capturing as '{}' at {}Hz",
            capture.client_name(),
            capture.sample_rate()
        );
        self.capture = Some(capture);

        Ok(())
    }

    /// Capture host -> display -> analysis buffers
    fn shutdown(&mut self) {
        if let Some(capture) = self.capture.take() {
            capture.close();
        }
        self.render_system.take();
        self.window.take();
        self.frames.take();
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(render_system), Some(frames)) =
            (self.render_system.as_mut(), self.frames.as_mut())
        else {
            return;
        };

        let frame = frames.latest();
        let sequence = frame.sequence;
        let points = self.projector.project(self.mode, frame);

        match render_system.render(points) {
            Ok(()) => self.stats.record_frame(sequence),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }

    fn switch_mode(&mut self, event: ModeEvent) {
        let mode = self.mode.apply(event);
        if mode != self.mode {
            info!("Display mode: {:?}", mode);
            self.mode = mode;
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failed {
            return; // Already initialized
        }

        if let Err(e) = self.initialize(event_loop) {
            error!("{:#}", e);
            self.failed = true;
            event_loop.exit();
            return;
        }

        info!("specscope is running: Left = spectrum, Right = waveform, Esc = quit");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                } else if let Some(mode_event) = ModeEvent::from_key(code) {
                    self.switch_mode(mode_event);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
        info!("Shutdown complete");
    }
}

fn run(args: Args) -> anyhow::Result<bool> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(args);
    event_loop.run_app(&mut app)?;
    // In case the loop ended without an `exiting` callback
    app.shutdown();
    Ok(!app.failed)
}

fn main() -> ExitCode {
    // Usage errors exit here with status 2
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("specscope=info,warn"),
    )
    .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
