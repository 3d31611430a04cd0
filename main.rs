//! main.rs - Desktop simulator for the particle emitter
//! Handles rendering, timing, and user interface

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use std::thread;
use std::time::{Duration, Instant};

use particles_fx::{
    Canvas, ColorF, EmitterConfig, ParticleEmitter, PixelCache, PixelSource, RangedAttribute,
    Rgba, Tint,
};

const SCREEN_WIDTH: u32 = 320;
const SCREEN_HEIGHT: u32 = 170;
const SCREEN_PIXELS: usize = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;
const MAX_PARTICLES: usize = 2000;
const SPRITE_SIZE: f32 = 4.0;

/// Simulator display the pixel cache can read back from.
struct Screen(SimulatorDisplay<Rgb888>);

impl PixelSource for Screen {
    fn width(&self) -> u32 {
        self.0.size().width
    }

    fn height(&self) -> u32 {
        self.0.size().height
    }

    fn read_pixels(&self, out: &mut [Rgba]) {
        let width = self.width() as usize;
        for (i, px) in out.iter_mut().enumerate() {
            let point = Point::new((i % width) as i32, (i / width) as i32);
            let c = self.0.get_pixel(point);
            *px = Rgba::new(c.r(), c.g(), c.b(), 255);
        }
    }
}

// User adjustable parameters, kept apart from the emitter itself
struct UiState {
    interval: f32,
    fade: f32,
    tinted: bool,
    info_message: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            interval: 0.005,
            fade: 120.0,
            tinted: false,
            info_message: String::new(),
        }
    }
}

/// Interval cycle for the I key; infinity turns auto-emission off.
fn next_interval(interval: f32) -> f32 {
    match interval {
        i if i.is_infinite() => 0.001,
        i if i >= 0.1 => f32::INFINITY,
        i if i >= 0.02 => 0.1,
        i if i >= 0.005 => 0.02,
        _ => 0.005,
    }
}

fn render(
    screen: &mut Screen,
    emitter: &ParticleEmitter<MAX_PARTICLES>,
    ui: &UiState,
) {
    let display = &mut screen.0;
    let text_color = Rgb888::new(0, 200, 255);

    display.clear(Rgb888::BLACK).unwrap();

    {
        let mut canvas = Canvas::new(display, SPRITE_SIZE);
        if ui.tinted {
            emitter.draw_with(&mut canvas, &Tint(ColorF::new(1.0, 0.4, 0.1, 1.0)));
        } else {
            emitter.draw(&mut canvas);
        }
    }

    let style = MonoTextStyle::new(&FONT_6X10, text_color);

    let status = format!(
        "Particles: {} / {}  Interval: {:.3}s",
        emitter.count(),
        emitter.max_particles(),
        ui.interval
    );
    Text::with_baseline(&status, Point::new(5, 5), style, Baseline::Top)
        .draw(display)
        .unwrap();

    if !ui.info_message.is_empty() {
        Text::with_baseline(
            &ui.info_message,
            Point::new(5, SCREEN_HEIGHT as i32 - 30),
            style,
            Baseline::Top,
        )
        .draw(display)
        .unwrap();
    }

    let instructions_style = MonoTextStyle::new(&FONT_6X10, Rgb888::new(0, 120, 160));
    Text::with_baseline(
        "Space: Burst | I: Interval | F: Fade | T: Tint | P: Probe | Q: Quit",
        Point::new(5, SCREEN_HEIGHT as i32 - 15),
        instructions_style,
        Baseline::Top,
    )
    .draw(display)
    .unwrap();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut ui = UiState::default();

    let config = EmitterConfig {
        interval: RangedAttribute::fixed(ui.interval),
        speed: RangedAttribute::new(20.0, 60.0),
        angular_velocity: RangedAttribute::new(-1.0, 1.0),
        fade: RangedAttribute::fixed(ui.fade),
        friction: RangedAttribute::new(0.0, 10.0),
        time_to_live: RangedAttribute::new(1.0, 3.0),
        zoom: RangedAttribute::new(-0.2, 0.2),
        color: Rgba::new(120, 220, 255, 255),
        max_particles: MAX_PARTICLES,
        ..Default::default()
    };
    let mut emitter: ParticleEmitter<MAX_PARTICLES> = ParticleEmitter::with_config(
        SCREEN_WIDTH as f32 / 2.0,
        SCREEN_HEIGHT as f32 / 2.0,
        0.0,
        config,
    )?;
    emitter.set_image_size(Some((SPRITE_SIZE, SPRITE_SIZE)));

    let display = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let mut cache: PixelCache<Screen, SCREEN_PIXELS> = PixelCache::new(Screen(display))?;

    let output_settings = OutputSettingsBuilder::new().scale(3).build();
    let mut window = Window::new("Particles - Emitter", &output_settings);

    let mut last_update = Instant::now();
    let target_fps = 60;
    let frame_duration = Duration::from_secs_f32(1.0 / target_fps as f32);

    println!("=== Particles - Emitter ===");
    println!("Controls:");
    println!("  Space: Emit a burst of 100 particles");
    println!("  I: Cycle emission interval");
    println!("  F: Cycle fade rate");
    println!("  T: Toggle tint shader");
    println!("  P: Probe the pixel under the emitter");
    println!("  Q: Quit");

    'main_loop: loop {
        let now = Instant::now();
        let dt = now.duration_since(last_update).as_secs_f32();
        last_update = now;

        emitter.update(dt)?;

        render(cache.owner_mut(), &emitter, &ui);
        window.update(&cache.owner().0);

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'main_loop,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    let key = format!("{:?}", keycode).to_lowercase();
                    match key.as_str() {
                        "space" => {
                            for _ in 0..100 {
                                emitter.emit();
                            }
                            ui.info_message = format!("Burst! {} live", emitter.count());
                        }
                        "i" => {
                            ui.interval = next_interval(ui.interval);
                            emitter.set_interval(ui.interval);
                            ui.info_message = format!("Interval: {:.3}s", ui.interval);
                        }
                        "f" => {
                            ui.fade = if ui.fade >= 480.0 { 0.0 } else { ui.fade + 120.0 };
                            emitter.set_fade(ui.fade);
                            ui.info_message = format!("Fade: {:.0}/s", ui.fade);
                        }
                        "t" => {
                            ui.tinted = !ui.tinted;
                            ui.info_message =
                                format!("Tint: {}", if ui.tinted { "ON" } else { "OFF" });
                        }
                        "p" => {
                            let [r, g, b, a] =
                                cache.rgba(emitter.x() as i32, emitter.y() as i32);
                            ui.info_message = format!("Pixel: {r} {g} {b} {a}");
                        }
                        "q" => break 'main_loop,
                        _ => {}
                    }
                    println!("{}", ui.info_message);
                }
                _ => {}
            }
        }

        let elapsed = now.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }

    println!("Thanks for playing with particles!");
    Ok(())
}
