//! Built-in application table
//!
//! Hook bodies here are deliberately thin: they mutate session or
//! settings state and push simple text to the display. Draw failures
//! are swallowed; a missed frame is repainted on the next tick anyway.

use core::fmt::Write as _;

use heapless::String;

use super::{AppDescriptor, AppHooks, AppId, AppRegistry};
use crate::config::Theme;
use crate::context::WatchContext;
use crate::input::{GestureEvent, GestureKind};
use crate::nav::Screen;

fn watchface_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);

    let mut line: String<32> = String::new();
    let _ = write!(line, "{}", ctx.stats.steps);
    let _ = ctx.display.text(120, 300, &line, colors.accent);
    let _ = ctx.display.present();
}

fn quests_init(ctx: &mut WatchContext) {
    ctx.session.quest_index = 0;
}

fn quests_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);
    let _ = ctx.display.text(40, 60, "Quests", colors.text);
    let _ = ctx.display.present();
}

fn music_init(ctx: &mut WatchContext) {
    ctx.session.music_playing = true;
}

fn music_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);
    let label = if ctx.session.music_playing { "Playing" } else { "Paused" };
    let _ = ctx.display.text(40, 60, label, colors.text);
    let _ = ctx.display.present();
}

fn music_touch(ctx: &mut WatchContext, event: &GestureEvent) {
    match event.kind {
        GestureKind::Tap => {
            ctx.session.music_playing = !ctx.session.music_playing;
        }
        GestureKind::SwipeLeft => {
            ctx.session.track_index = ctx.session.track_index.wrapping_add(1);
        }
        GestureKind::SwipeRight => {
            ctx.session.track_index = ctx.session.track_index.saturating_sub(1);
        }
        _ => {}
    }
}

fn music_cleanup(ctx: &mut WatchContext) {
    ctx.session.music_playing = false;
}

fn games_init(ctx: &mut WatchContext) {
    ctx.session.game_index = 0;
}

fn games_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);
    let _ = ctx.display.text(40, 60, "Games", colors.text);
    let _ = ctx.display.present();
}

fn notes_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);
    let _ = ctx.display.text(40, 60, "Notes", colors.text);
    let _ = ctx.display.present();
}

fn files_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);
    let _ = ctx.display.text(40, 60, "Files", colors.text);
    let _ = ctx.display.present();
}

fn pdf_init(ctx: &mut WatchContext) {
    ctx.session.pdf_page = 0;
}

fn pdf_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);
    let _ = ctx.display.text(40, 60, "Reader", colors.text);
    let _ = ctx.display.present();
}

fn pdf_touch(ctx: &mut WatchContext, event: &GestureEvent) {
    match event.kind {
        GestureKind::SwipeUp => {
            ctx.session.pdf_page = ctx.session.pdf_page.saturating_add(1);
        }
        GestureKind::SwipeDown => {
            ctx.session.pdf_page = ctx.session.pdf_page.saturating_sub(1);
        }
        _ => {}
    }
}

fn settings_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);
    let _ = ctx.display.text(40, 60, "Settings", colors.text);
    let _ = ctx.display.present();
}

/// Tap zones stacked vertically: brightness, step goal, theme
fn settings_touch(ctx: &mut WatchContext, event: &GestureEvent) {
    if event.kind != GestureKind::Tap {
        return;
    }
    match event.y {
        100..=159 => {
            ctx.settings.brightness = match ctx.settings.brightness {
                0..=24 => 50,
                25..=49 => 80,
                50..=80 => 100,
                _ => 20,
            };
        }
        160..=219 => {
            ctx.settings.step_goal = match ctx.settings.step_goal {
                0..=5_999 => 8_000,
                6_000..=7_999 => 10_000,
                8_000..=9_999 => 12_000,
                _ => 6_000,
            };
        }
        220..=279 => {
            ctx.settings.theme = match ctx.settings.theme {
                Theme::Ivory => Theme::Violet,
                Theme::Violet => Theme::Teal,
                Theme::Teal => Theme::Ivory,
            };
        }
        _ => {}
    }
}

fn weather_draw(ctx: &mut WatchContext) {
    let colors = ctx.settings.theme.colors();
    let _ = ctx.display.clear(colors.background);
    let _ = ctx.display.text(40, 60, "Weather", colors.text);
    let _ = ctx.display.present();
}

/// The full built-in table, in launcher order
pub fn descriptors() -> [AppDescriptor; 9] {
    [
        AppDescriptor {
            id: AppId::Watchface,
            label: "Watch",
            home_screen: Screen::Watchface,
            hooks: AppHooks { draw: Some(watchface_draw), ..AppHooks::default() },
        },
        AppDescriptor {
            id: AppId::Quests,
            label: "Quests",
            home_screen: Screen::Quests,
            hooks: AppHooks {
                init: Some(quests_init),
                draw: Some(quests_draw),
                ..AppHooks::default()
            },
        },
        AppDescriptor {
            id: AppId::Music,
            label: "Music",
            home_screen: Screen::Music,
            hooks: AppHooks {
                init: Some(music_init),
                draw: Some(music_draw),
                touch: Some(music_touch),
                cleanup: Some(music_cleanup),
            },
        },
        AppDescriptor {
            id: AppId::Games,
            label: "Games",
            home_screen: Screen::Games,
            hooks: AppHooks {
                init: Some(games_init),
                draw: Some(games_draw),
                ..AppHooks::default()
            },
        },
        AppDescriptor {
            id: AppId::Notes,
            label: "Notes",
            home_screen: Screen::Notes,
            hooks: AppHooks { draw: Some(notes_draw), ..AppHooks::default() },
        },
        AppDescriptor {
            id: AppId::Files,
            label: "Files",
            home_screen: Screen::Files,
            hooks: AppHooks { draw: Some(files_draw), ..AppHooks::default() },
        },
        AppDescriptor {
            id: AppId::PdfReader,
            label: "Reader",
            home_screen: Screen::PdfReader,
            hooks: AppHooks {
                init: Some(pdf_init),
                draw: Some(pdf_draw),
                touch: Some(pdf_touch),
                ..AppHooks::default()
            },
        },
        AppDescriptor {
            id: AppId::Settings,
            label: "Settings",
            home_screen: Screen::Settings,
            hooks: AppHooks {
                draw: Some(settings_draw),
                touch: Some(settings_touch),
                ..AppHooks::default()
            },
        },
        AppDescriptor {
            id: AppId::Weather,
            label: "Weather",
            home_screen: Screen::Weather,
            hooks: AppHooks { draw: Some(weather_draw), ..AppHooks::default() },
        },
    ]
}

/// Registry preloaded with every built-in app
///
/// The table is static and duplicate-free, so construction cannot fail.
pub fn default_registry() -> AppRegistry {
    AppRegistry::from_descriptors(&descriptors()).unwrap_or_default()
}
