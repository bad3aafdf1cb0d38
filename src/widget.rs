use crate::animation::FixedStep;
use crate::config::AnimationSettings;
use crate::input::{apply, command_for_key, Flow};
use crate::pipeline::Pipeline;
use crate::scene::Scene;
use crate::state::AppState;
use druid::text::FontFamily;
use druid::widget::prelude::*;
use druid::{
    commands,
    piet::{ImageFormat, InterpolationMode, Text, TextLayoutBuilder},
    Color, RenderContext, TimerToken, Widget,
};
use std::time::{Duration, Instant};

/// Hydrant cabinet widget
pub struct HydrantWidget {
    scene: Scene,
    pipeline: Pipeline,
    clock: FixedStep,
    initial_delay: Duration,
    animation_timer: TimerToken,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl HydrantWidget {
    pub fn new(animation: &AnimationSettings) -> Self {
        HydrantWidget {
            scene: Scene::new(),
            pipeline: Pipeline::new(0, 0),
            clock: FixedStep::new(animation.period(), animation.max_catch_up),
            initial_delay: animation.initial_delay(),
            animation_timer: TimerToken::INVALID,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    fn update_fps(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
            log::trace!("{:.1} frames per second", self.fps);
        }
    }

    /// Advances the door by every tick due at `now` and returns how many ran
    fn run_due_ticks(&mut self, now: Instant, data: &mut AppState) -> u32 {
        let ticks = self.clock.advance(now);
        for _ in 0..ticks {
            data.door.tick();
        }
        ticks
    }

    /// Draws the frame's text labels over the uploaded image
    fn paint_labels(&self, ctx: &mut PaintCtx) {
        for label in self.pipeline.labels() {
            let color = Color::rgb(label.color.x, label.color.y, label.color.z);
            let layout = ctx
                .text()
                .new_text_layout(label.text.clone())
                .font(FontFamily::SANS_SERIF, 18.0)
                .text_color(color)
                .build();
            match layout {
                // The anchor marks the baseline start, the layout origin is its top-left
                Ok(layout) => ctx.draw_text(&layout, (label.x, label.y - 18.0)),
                Err(err) => log::warn!("failed to lay out label {:?}: {err}", label.text),
            }
        }
    }

    fn paint_debug(&self, ctx: &mut PaintCtx, data: &AppState) {
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!(
                "Angle X: {:.0}, Y: {:.0}, Z: {:.0}",
                data.orientation.x, data.orientation.y, data.orientation.z
            ),
            format!("Camera distance: {:.1}", data.camera_distance),
            format!("Door: {:.1} ({:?})", data.door.angle(), data.door.phase()),
            format!("Lighting: {}", if data.lighting { "on" } else { "off" }),
            format!("FPS: {:.2}", self.fps),
        ];
        for (row, text) in lines.into_iter().enumerate() {
            let layout = ctx
                .text()
                .new_text_layout(text)
                .font(FontFamily::SYSTEM_UI, 12.0)
                .text_color(Color::BLACK)
                .build();
            match layout {
                Ok(layout) => ctx.draw_text(&layout, (10.0, 10.0 + 20.0 * row as f64)),
                Err(err) => log::warn!("failed to lay out debug text: {err}"),
            }
        }
    }
}

impl Widget<AppState> for HydrantWidget {
    /// Handle events for the hydrant widget
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::WindowConnected => {
                self.animation_timer = ctx.request_timer(self.initial_delay);
                // Request focus to receive keyboard events
                ctx.request_focus();
            }
            Event::Timer(token) if *token == self.animation_timer => {
                self.run_due_ticks(Instant::now(), data);
                ctx.request_paint();
                self.animation_timer = ctx.request_timer(self.clock.period());
            }
            Event::KeyDown(key_event) => {
                if let Some(command) = command_for_key(&key_event.key) {
                    if apply(command, data, &mut self.pipeline) == Flow::Quit {
                        log::info!("quit requested");
                        ctx.submit_command(commands::QUIT_APP);
                    }
                    ctx.request_paint();
                }
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        _ctx: &mut LifeCycleCtx,
        event: &LifeCycle,
        _data: &AppState,
        _env: &Env,
    ) {
        if let LifeCycle::Size(size) = event {
            self.pipeline.resize(size.width as usize, size.height as usize);
        }
    }

    fn update(&mut self, _ctx: &mut UpdateCtx, _old_data: &AppState, _data: &AppState, _env: &Env) {
    }

    /// Determines the layout constraints for the hydrant widget
    fn layout(
        &mut self,
        _layout_ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &AppState,
        _env: &Env,
    ) -> Size {
        bc.max()
    }

    /// Paint the hydrant widget
    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        self.update_fps();

        let size = ctx.size();
        self.pipeline.resize(size.width as usize, size.height as usize);
        if self.pipeline.front().width() == 0 || self.pipeline.front().height() == 0 {
            return;
        }

        self.scene.compose(data, &mut self.pipeline);

        // Create and draw the image
        let frame = self.pipeline.front();
        match ctx.make_image(
            frame.width(),
            frame.height(),
            frame.pixels(),
            ImageFormat::RgbaSeparate,
        ) {
            Ok(image) => {
                ctx.draw_image(&image, size.to_rect(), InterpolationMode::NearestNeighbor)
            }
            Err(err) => {
                log::error!("failed to upload frame: {err}");
                return;
            }
        }

        self.paint_labels(ctx);

        // Add debug info if debug mode is enabled
        if data.debug {
            self.paint_debug(ctx, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn opening_door() -> (HydrantWidget, AppState) {
        let settings = Settings::default();
        let mut state = AppState::new(&settings);
        state.door.open();
        (HydrantWidget::new(&settings.animation), state)
    }

    #[test]
    fn late_timer_callback_runs_every_missed_tick() {
        let (mut widget, mut state) = opening_door();
        let start = Instant::now();
        assert_eq!(widget.run_due_ticks(start, &mut state), 1);
        assert_eq!(state.door.angle(), 2.0);

        assert_eq!(widget.run_due_ticks(start + Duration::from_millis(48), &mut state), 3);
        assert_eq!(state.door.angle(), 8.0);
    }

    #[test]
    fn early_timer_callback_leaves_door_in_place() {
        let (mut widget, mut state) = opening_door();
        let start = Instant::now();
        widget.run_due_ticks(start, &mut state);
        assert_eq!(widget.run_due_ticks(start + Duration::from_millis(10), &mut state), 0);
        assert_eq!(state.door.angle(), 2.0);
    }

    #[test]
    fn stalled_timer_catches_up_at_most_the_cap() {
        let (mut widget, mut state) = opening_door();
        let start = Instant::now();
        widget.run_due_ticks(start, &mut state);
        assert_eq!(widget.run_due_ticks(start + Duration::from_secs(2), &mut state), 8);
        assert_eq!(state.door.angle(), 18.0);
    }
}
