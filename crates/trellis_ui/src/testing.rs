//! Headless fixtures shared by the unit tests.

use std::sync::Arc;

use trellis_render::{
    CommandLog, MonospaceGlyphs, NinePatch, Rect, RecordingBackend, Renderer, Texture, TextureId,
    Viewport,
};

use crate::config::TuiConfig;
use crate::style::{regions, Style};
use crate::tui::Tui;
use crate::widget::{WidgetContext, WidgetId};

/// Every region name the built-in widgets use.
const ALL_REGIONS: [&str; 21] = [
    regions::PANEL,
    regions::BUTTON_NORMAL,
    regions::BUTTON_HOVER,
    regions::BUTTON_CLICK,
    regions::BUTTON_DISABLED,
    regions::CHECKBOX_NORMAL,
    regions::CHECKBOX_DISABLED,
    regions::CHECKBOX_MARK_NORMAL,
    regions::CHECKBOX_MARK_DISABLED,
    regions::SLIDER_TRACK_NORMAL,
    regions::SLIDER_TRACK_DISABLED,
    regions::SLIDER_THUMB_NORMAL,
    regions::SLIDER_THUMB_HOVER,
    regions::SLIDER_THUMB_CLICK,
    regions::SLIDER_THUMB_DISABLED,
    regions::TEXTBOX_NORMAL,
    regions::TEXTBOX_HOVER,
    regions::TEXTBOX_CLICK,
    regions::TEXTBOX_DISABLED,
    regions::TEXTBOX_SELECT,
    regions::DOT,
];

/// Context for a top-level, enabled, unfocused widget at `(x, y, w, h)`
/// with no style and a 1:1 scale.
pub(crate) fn context(config: &TuiConfig, x: f32, y: f32, w: f32, h: f32) -> WidgetContext<'_> {
    let bounds = Rect::new(x, y, w, h);
    WidgetContext {
        id: WidgetId(1),
        style: None,
        config,
        scale: (1.0, 1.0),
        bounds,
        draw_bounds: bounds,
        enabled: true,
        focused: false,
    }
}

/// Renderer whose output matches the default virtual size.
pub(crate) fn renderer() -> Renderer {
    let (backend, _log) = RecordingBackend::create();
    let mut renderer =
        Renderer::new(Box::new(backend), Box::new(MonospaceGlyphs::new())).expect("renderer");
    renderer.set_target(1280, 720);
    renderer.set_virtual_width(1280.0);
    renderer
}

/// A style defining every region on a 64x64 atlas.
pub(crate) fn style() -> Style {
    let atlas = Texture {
        id: TextureId(7),
        width: 64,
        height: 64,
    };
    ALL_REGIONS.iter().fold(Style::new(), |style, name| {
        style.with_region(*name, NinePatch::new(atlas, [0.0, 0.0, 0.25, 0.25], 2.0, 2.0, 2.0, 2.0))
    })
}

/// A 1280x720 UI on the recording backend; text draws land in the log too.
pub(crate) fn tui() -> (Tui, CommandLog) {
    let (backend, log) = RecordingBackend::create();
    let glyphs = MonospaceGlyphs::new().with_log(log.clone());
    let renderer = Renderer::new(Box::new(backend), Box::new(glyphs)).expect("renderer");
    let ui = Tui::new(
        TuiConfig::default(),
        renderer,
        Box::new(Viewport::new(1280, 720)),
        Arc::new(style()),
    );
    (ui, log)
}
