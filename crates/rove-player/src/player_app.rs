//! Player application implementing winit ApplicationHandler
//!
//! Runs the locomotion loop against a window: keyboard and raw mouse motion
//! are queued as they arrive and drained once per redraw, which runs exactly
//! one tick. Drawing the frame is left to the attached `FrameSink`; the
//! window title shows the current animation state.

use crate::config::PlayerConfig;
use crate::frame::FrameSink;
use crate::locomotion::LocomotionSystem;
use crate::map::GameMap;
use rove_animation::AnimationState;
use rove_core::{RoveError, Vec3};
use rove_physics::PhysicsWorld;
use rove_runtime::{GameClock, InputEvent, InputQueue, InputState};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowId};

const WINDOW_TITLE: &str = "Rove";

/// Holds the cursor grab for as long as it lives
pub struct CursorGrab {
    window: Arc<Window>,
}

impl CursorGrab {
    pub fn acquire(window: Arc<Window>) -> Self {
        // Confined is not supported everywhere; fall back to locked
        if let Err(e) = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        {
            warn!("cursor grab unavailable: {}", e);
        }
        window.set_cursor_visible(false);
        Self { window }
    }
}

impl Drop for CursorGrab {
    fn drop(&mut self) {
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.window.set_cursor_visible(true);
    }
}

pub struct PlayerApp {
    config: PlayerConfig,
    map: GameMap,

    // Systems
    clock: GameClock,
    input: InputState,
    queue: InputQueue,
    world: PhysicsWorld,
    player: Option<LocomotionSystem>,
    sink: Option<Box<dyn FrameSink>>,

    // Window
    window: Option<Arc<Window>>,
    cursor_grab: Option<CursorGrab>,
    fullscreen: bool,
    shown_state: Option<AnimationState>,

    error: Option<RoveError>,
}

impl PlayerApp {
    pub fn new(config: PlayerConfig, map: GameMap, fullscreen: bool) -> Self {
        let world = PhysicsWorld::with_gravity(Vec3::from_array(config.tuning.physics.gravity));
        let input = InputState::with_bindings(config.bindings.clone());

        Self {
            config,
            map,
            clock: GameClock::new(),
            input,
            queue: InputQueue::new(),
            world,
            player: None,
            sink: None,
            window: None,
            cursor_grab: None,
            fullscreen,
            shown_state: None,
            error: None,
        }
    }

    /// Send every frame to `sink`
    pub fn with_sink(mut self, sink: Box<dyn FrameSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The error that stopped the loop, if any
    pub fn take_error(&mut self) -> Option<RoveError> {
        self.error.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, RoveError::OutputError(format!("window: {}", e)));
                return;
            }
        };

        if self.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        self.window = Some(window);

        let colliders = self.map.build(&mut self.world);
        info!(colliders, "built static world");
        self.player = Some(LocomotionSystem::spawn(&self.config.tuning, &mut self.world));

        self.capture_cursor();
    }

    fn capture_cursor(&mut self) {
        if let Some(window) = &self.window {
            self.cursor_grab = Some(CursorGrab::acquire(window.clone()));
            self.queue.push(InputEvent::CaptureChanged(true));
        }
    }

    fn release_cursor(&mut self) {
        if self.cursor_grab.take().is_some() {
            self.queue.push(InputEvent::CaptureChanged(false));
        }
    }

    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let Some(player) = &mut self.player else {
            return;
        };

        let dt = self.clock.tick() as f32;
        self.queue.drain_into(&mut self.input);

        let frame = match player.tick(&mut self.input, &mut self.world, dt) {
            Ok(frame) => frame,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        if let Some(sink) = &mut self.sink {
            if let Err(e) = sink.submit(&frame) {
                self.fail(event_loop, e);
                return;
            }
        }

        if self.shown_state != Some(frame.state) {
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {}", WINDOW_TITLE, frame.state.name()));
            }
            self.shown_state = Some(frame.state);
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: RoveError) {
        error!("{}", e);
        self.error = Some(e);
        event_loop.exit();
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.initialize(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                self.release_cursor();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key_code) = event.physical_key else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => {
                        if event.repeat {
                            return;
                        }
                        match key_code {
                            KeyCode::Escape => {
                                if self.cursor_grab.is_some() {
                                    self.release_cursor();
                                } else {
                                    event_loop.exit();
                                }
                            }
                            KeyCode::F11 => self.toggle_fullscreen(),
                            _ => {
                                self.queue.push(InputEvent::KeyDown(key_code));
                            }
                        }
                    }
                    ElementState::Released => {
                        self.queue.push(InputEvent::KeyUp(key_code));
                    }
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if self.cursor_grab.is_none() {
                    self.capture_cursor();
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick(event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if self.cursor_grab.is_none() {
            return;
        }

        if let DeviceEvent::MouseMotion { delta } = event {
            self.queue.push(InputEvent::PointerMotion {
                dx: delta.0,
                dy: delta.1,
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.cursor_grab = None;
        if let Some(player) = self.player.take() {
            player.despawn();
        }
        let released = self.world.flush_released();
        debug!(released, dropped_input = self.queue.dropped(), "player app exiting");
    }
}
