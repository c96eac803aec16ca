use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use prism_engine::coords::Viewport;
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::paint::Color;
use prism_engine::render::{
    create_renderer, FrameState, RenderCtx, RenderTarget, Renderer, SampleKind, SampleOptions,
    Spin,
};

/// What a key press asks the demo to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    NextSample,
    Quit,
}

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Tab | KeyCode::Space => Some(Action::NextSample),
        KeyCode::Escape => Some(Action::Quit),
        _ => None,
    }
}

pub fn window_title(base: &str, kind: SampleKind, ready: bool) -> String {
    if ready {
        format!("{base} - {kind}")
    } else {
        format!("{base} - {kind} (failed)")
    }
}

/// Drives one sample renderer at a time.
///
/// The renderer is built whenever a GPU context appears and released before
/// the context goes away. Switching samples releases the old renderer first.
pub struct DemoApp {
    kind: SampleKind,
    options: SampleOptions,
    clear: Color,
    spin: Spin,
    title: String,

    renderer: Option<Box<dyn Renderer>>,
    viewport: Viewport,
    switch_requested: bool,
    title_dirty: bool,
}

impl DemoApp {
    pub fn new(
        kind: SampleKind,
        options: SampleOptions,
        clear: Color,
        spin: Spin,
        title: String,
    ) -> Self {
        Self {
            kind,
            options,
            clear,
            spin,
            title,
            renderer: None,
            viewport: Viewport::default(),
            switch_requested: false,
            title_dirty: true,
        }
    }

    fn build(&mut self, ctx: &RenderCtx<'_>) {
        self.viewport = ctx.viewport;
        self.title_dirty = true;
        self.renderer = match create_renderer(self.kind, ctx, &self.options) {
            Ok(r) => Some(r),
            Err(e) => {
                log::error!("{} unavailable: {e}", self.kind);
                None
            }
        };
    }

    fn release(&mut self, ctx: &RenderCtx<'_>) {
        if let Some(mut renderer) = self.renderer.take() {
            let destroyed = renderer.release(Some(ctx.context));
            log::info!(
                "{}: {} released ({})",
                ctx.context,
                renderer.name(),
                if destroyed { "destroyed" } else { "skipped" }
            );
        }
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &FrameState) {
        if self.switch_requested {
            self.switch_requested = false;
            self.release(ctx);
            self.kind = self.kind.next();
            self.build(ctx);
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        if ctx.viewport != self.viewport {
            if let Err(e) = renderer.resize(ctx) {
                log::warn!("{}: resize skipped: {e}", renderer.name());
            }
            self.viewport = ctx.viewport;
        }

        renderer.draw(ctx, target, frame);
    }
}

impl App for DemoApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed || event.repeat {
            return AppControl::Continue;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return AppControl::Continue;
        };

        match action_for_key(code) {
            Some(Action::Quit) => AppControl::Exit,
            Some(Action::NextSample) => {
                self.switch_requested = true;
                AppControl::Continue
            }
            None => AppControl::Continue,
        }
    }

    fn on_context_created(&mut self, ctx: &RenderCtx<'_>) {
        self.build(ctx);
    }

    fn on_context_lost(&mut self, ctx: &RenderCtx<'_>) {
        self.release(ctx);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let frame = FrameState {
            angle_deg: self.spin.advance(ctx.time.dt),
            time: ctx.time,
        };

        let clear = self.clear;
        let control = ctx.render(clear, |rctx, target| self.draw(rctx, target, &frame));

        if self.title_dirty {
            self.title_dirty = false;
            ctx.runtime
                .set_title(window_title(&self.title, self.kind, self.renderer.is_some()));
        }

        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for_key(KeyCode::Escape), Some(Action::Quit));
        assert_eq!(action_for_key(KeyCode::Tab), Some(Action::NextSample));
        assert_eq!(action_for_key(KeyCode::Space), Some(Action::NextSample));
        assert_eq!(action_for_key(KeyCode::KeyA), None);
    }

    #[test]
    fn title_reflects_sample_state() {
        assert_eq!(
            window_title("prism", SampleKind::TexturedQuad, true),
            "prism - textured-quad"
        );
        assert_eq!(
            window_title("prism", SampleKind::TexturedQuad, false),
            "prism - textured-quad (failed)"
        );
    }
}
