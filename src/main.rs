//! Boxshot - minimal first-person shooter demo
//!
//! Walk around a small arena, look with the mouse and shoot at physics boxes.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use boxshot::config::AppConfig;
use boxshot::input::{InputAction, InputMapper};
use boxshot::scene::SceneBuilder;
use boxshot::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use boxshot_core::{Scene, Weapon, World};
use boxshot_input::PlayerController;
use boxshot_render::{Camera, RenderableInstances};

/// Main application state
struct App {
    config: AppConfig,
    scene: Scene,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    world: World,
    /// Cached GPU instances (rebuilt when entities move)
    instances: RenderableInstances,
    camera: Camera,
    controller: PlayerController,
    weapon: Weapon,
    simulation: SimulationSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let scene = Scene::load_or_default(&config.scene.path);
        let step = config.physics.to_step_config();

        let builder = SceneBuilder::from_scene(&scene, step);
        let player_start = builder.player_start().unwrap_or(scene.player.position);
        let world = builder.build();
        let instances = RenderableInstances::from_world(&world);

        log::info!(
            "Loaded scene '{}' with {} entities ({:?} stepping)",
            scene.name,
            world.entity_count(),
            config.physics.profile
        );

        let mut camera = Camera::new()
            .with_projection(config.camera.fov, config.camera.near, config.camera.far)
            .with_pitch_limit(config.camera.pitch_limit);
        camera.position = player_start + boxshot_math::Vec3::Z * config.camera.eye_height;

        let controller = PlayerController::new().with_mouse_sensitivity(config.input.mouse_sensitivity);
        let weapon = Weapon::new(scene.player.weapon());
        log::info!(
            "Weapon: {} round clip, {}s reload",
            weapon.config().ammo_per_reload,
            weapon.config().reload_time
        );
        let simulation = SimulationSystem::new()
            .with_forces(config.player.move_force, config.player.jump_force)
            .with_eye_height(config.camera.eye_height);

        Self {
            config,
            scene,
            window: None,
            render: None,
            world,
            instances,
            camera,
            controller,
            weapon,
            simulation,
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::ToggleCursor => {
                if let Some(window) = &mut self.window {
                    if window.is_cursor_captured() {
                        window.release_cursor();
                        self.controller.release_all();
                    } else {
                        window.capture_cursor();
                    }
                }
            }
            InputAction::Exit => event_loop.exit(),
            InputAction::Fire => {
                self.simulation.fire(&self.world, &self.camera, &mut self.weapon);
            }
            InputAction::Reload => {
                self.simulation.reload(&mut self.weapon);
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let cursor_captured = self.window.as_ref().is_some_and(|w| w.is_cursor_captured());

        let result = self.simulation.update(
            &mut self.world,
            &mut self.camera,
            &mut self.controller,
            &mut self.weapon,
            cursor_captured,
        );

        if result.geometry_dirty {
            self.instances.rebuild(&self.world);
            if let Some(render) = &mut self.render {
                render.upload_instances(&self.instances);
            }
            self.world.clear_all_dirty();
        }

        if let Some(window) = &self.window {
            window.recenter_cursor();
            window.update_title(
                self.camera.position,
                self.weapon.clip(),
                self.weapon.reserve(),
                self.weapon.is_reloading(),
            );
        }

        if let Some(render) = &mut self.render {
            match render.render_frame(&self.camera) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            self.scene.lighting,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        render.upload_instances(&self.instances);
        window.request_redraw();

        self.window = Some(window);
        self.render = Some(render);
        self.simulation.reset_clock();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::Focused(false) => {
                // Key releases are not delivered while unfocused
                self.controller.release_all();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let captured = self.window.as_ref().is_some_and(|w| w.is_cursor_captured());
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, captured) {
                        self.handle_action(action, event_loop);
                    } else {
                        self.controller.process_keyboard(key, event.state);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let captured = self.window.as_ref().is_some_and(|w| w.is_cursor_captured());
                if let Some(action) = InputMapper::map_mouse_button(button, state, captured) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting Boxshot");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
