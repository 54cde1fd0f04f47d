//! Screen navigation and the per-tick update loop
//!
//! The controller owns the gesture classifier, the step detector, the
//! app registry, and the current screen. The firmware shell calls
//! `tick` once per UI interval with the current time and the hardware
//! sources; everything else is driven from there.

pub mod transition;

pub use transition::{SlideDirection, Transition, TRANSITION_MS};

use crate::apps::{grid, AppDescriptor, AppId, AppRegistry};
use crate::config::{Settings, SLEEP_TIMEOUT_MS};
use crate::context::{Session, WatchContext};
use crate::input::{GestureClassifier, GestureEvent, GestureKind};
use crate::motion::{ActivityStats, StepDetector, StepEvent};
use crate::traits::{AccelSampleSource, Display, TouchSampleSource};

/// Everything the panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Splash,
    Watchface,
    AppGrid,
    Quests,
    Music,
    Games,
    Notes,
    Files,
    PdfReader,
    Settings,
    Weather,
    Sleep,
    Charging,
}

/// The (screen, app) pair owned by the controller
///
/// Snapshot for observers; only the controller mutates the underlying
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationState {
    pub screen: Screen,
    pub app: Option<AppId>,
}

/// Navigation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavError {
    /// Launch target is not registered
    UnknownApp(AppId),
    /// Boot requires a registered watchface
    NoHomeApp,
}

/// What one tick produced, for observers outside the controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    pub gesture: Option<GestureEvent>,
    pub step: Option<StepEvent>,
}

/// Edge of the tap zone that exits the frontmost app
const BACK_ZONE: i32 = 40;

pub struct NavigationController {
    registry: AppRegistry,
    screen: Screen,
    active_app: Option<AppId>,
    classifier: GestureClassifier,
    detector: StepDetector,
    transition: Option<Transition>,
    stats: ActivityStats,
    settings: Settings,
    session: Session,
    last_input_ms: u64,
    /// Screen to restore after sleep or charging
    resume_screen: Screen,
    /// Set on wake; the rest of the waking contact session is dropped
    wake_swallow: bool,
    charging: bool,
}

impl NavigationController {
    pub fn new(registry: AppRegistry) -> Self {
        Self {
            registry,
            screen: Screen::Splash,
            active_app: None,
            classifier: GestureClassifier::default(),
            detector: StepDetector::default(),
            transition: None,
            stats: ActivityStats::new(),
            settings: Settings::default(),
            session: Session::default(),
            last_input_ms: 0,
            resume_screen: Screen::Watchface,
            wake_swallow: false,
            charging: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn active_app(&self) -> Option<AppId> {
        self.active_app
    }

    pub fn state(&self) -> NavigationState {
        NavigationState { screen: self.screen, app: self.active_app }
    }

    pub fn stats(&self) -> &ActivityStats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a screen slide is currently animating
    pub fn transition_active(&self) -> bool {
        self.transition.map(|t| t.is_active()).unwrap_or(false)
    }

    /// Horizontal offset the display layer should apply this frame
    pub fn transition_offset(&self, now_ms: u64) -> i32 {
        self.transition.map(|t| t.offset_px(now_ms)).unwrap_or(0)
    }

    /// Leave the splash screen and bring up the watchface
    pub fn boot(&mut self, display: &mut dyn Display, now_ms: u64) -> Result<(), NavError> {
        let desc = *self.registry.get(AppId::Watchface).ok_or(NavError::NoHomeApp)?;
        self.run_init(&desc, display, now_ms);
        self.active_app = Some(desc.id);
        self.screen = desc.home_screen;
        self.last_input_ms = now_ms;
        Ok(())
    }

    /// Bring an app to the front
    ///
    /// Runs the target's init hook and starts the slide. The outgoing
    /// app's cleanup hook is NOT run here; teardown happens only
    /// through `exit`, so hopping between apps from the grid leaves the
    /// previous app's session state in place.
    pub fn launch(
        &mut self,
        id: AppId,
        display: &mut dyn Display,
        now_ms: u64,
    ) -> Result<(), NavError> {
        let desc = *self.registry.get(id).ok_or(NavError::UnknownApp(id))?;
        self.run_init(&desc, display, now_ms);
        self.active_app = Some(desc.id);
        self.screen = desc.home_screen;
        self.transition = Some(Transition::start(SlideDirection::Left, now_ms));
        Ok(())
    }

    /// Close the frontmost app and return to the watchface
    ///
    /// The outgoing app's cleanup hook runs exactly once, then the home
    /// app comes back up through its init hook like any launch. Falls
    /// back to the grid if no watchface is registered.
    pub fn exit(&mut self, display: &mut dyn Display, now_ms: u64) {
        if let Some(id) = self.active_app.take() {
            if let Some(desc) = self.registry.get(id) {
                let desc = *desc;
                self.run_cleanup(&desc, display, now_ms);
            }
        }
        match self.registry.get(AppId::Watchface).copied() {
            Some(home) => {
                self.run_init(&home, display, now_ms);
                self.active_app = Some(home.id);
                self.screen = home.home_screen;
            }
            None => self.screen = Screen::AppGrid,
        }
        self.transition = Some(Transition::start(SlideDirection::Right, now_ms));
    }

    pub fn set_charging(&mut self, charging: bool, now_ms: u64) {
        if charging == self.charging {
            return;
        }
        self.charging = charging;
        if charging {
            if self.screen != Screen::Sleep {
                self.resume_screen = self.screen;
            }
            self.screen = Screen::Charging;
        } else {
            self.screen = self.resume_screen;
            self.last_input_ms = now_ms;
        }
    }

    /// One UI-interval update
    pub fn tick(
        &mut self,
        display: &mut dyn Display,
        touch: &mut dyn TouchSampleSource,
        accel: &mut dyn AccelSampleSource,
        now_ms: u64,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if let Some(t) = self.transition.as_mut() {
            if !t.advance(now_ms) {
                self.transition = None;
            }
        }

        // Steps keep counting regardless of screen or charge state
        if let Some(sample) = accel.poll(now_ms) {
            if let Some(step) = self.detector.update(sample) {
                self.stats.record_step(step.timestamp_ms);
                outcome.step = Some(step);
            }
        }

        if let Some(sample) = touch.poll(now_ms) {
            if sample.contact {
                self.last_input_ms = now_ms;
            }
            if let Some(event) = self.classifier.update(sample) {
                outcome.gesture = Some(event);
                self.dispatch(event, display, now_ms);
            }
        }

        if !self.charging
            && self.screen != Screen::Sleep
            && now_ms.saturating_sub(self.last_input_ms) > SLEEP_TIMEOUT_MS
        {
            self.enter_sleep();
        }

        self.render(display, now_ms);
        outcome
    }

    fn enter_sleep(&mut self) {
        self.resume_screen = self.screen;
        self.screen = Screen::Sleep;
        self.classifier.reset();
    }

    fn wake(&mut self, now_ms: u64) {
        self.screen = self.resume_screen;
        self.last_input_ms = now_ms;
        self.wake_swallow = true;
    }

    fn dispatch(&mut self, event: GestureEvent, display: &mut dyn Display, now_ms: u64) {
        if self.wake_swallow {
            if event.kind.is_terminal() {
                self.wake_swallow = false;
            }
            return;
        }
        match self.screen {
            // Charging absorbs everything
            Screen::Charging | Screen::Splash => {}
            // The wake gesture is consumed, never forwarded
            Screen::Sleep => self.wake(now_ms),
            Screen::Watchface => {
                if event.kind == GestureKind::SwipeUp {
                    self.screen = Screen::AppGrid;
                    self.transition = Some(Transition::start(SlideDirection::Left, now_ms));
                } else {
                    self.forward_to_app(event, display, now_ms);
                }
            }
            Screen::AppGrid => {
                if event.kind == GestureKind::Tap {
                    if let Some(index) = grid::hit_test(&self.registry, event.x, event.y) {
                        if let Some(desc) = self.registry.by_index(index) {
                            let id = desc.id;
                            // Ignore the impossible miss; the index
                            // came from the registry itself.
                            let _ = self.launch(id, display, now_ms);
                        }
                    }
                } else if event.kind == GestureKind::SwipeDown {
                    // Without a registered watchface there is nowhere
                    // to return to; stay on the grid.
                    if self.registry.get(AppId::Watchface).is_some() {
                        self.screen = Screen::Watchface;
                        self.active_app = Some(AppId::Watchface);
                        self.transition =
                            Some(Transition::start(SlideDirection::Right, now_ms));
                    }
                }
            }
            _ => {
                // Frontmost app screen
                if event.kind == GestureKind::Tap && event.x < BACK_ZONE && event.y < BACK_ZONE {
                    self.exit(display, now_ms);
                } else {
                    self.forward_to_app(event, display, now_ms);
                }
            }
        }
    }

    fn forward_to_app(&mut self, event: GestureEvent, display: &mut dyn Display, now_ms: u64) {
        let Some(id) = self.active_app else { return };
        let Some(desc) = self.registry.get(id) else { return };
        let Some(touch) = desc.hooks.touch else { return };
        let mut ctx = WatchContext {
            display,
            settings: &mut self.settings,
            stats: &self.stats,
            session: &mut self.session,
            now_ms,
        };
        touch(&mut ctx, &event);
    }

    fn run_init(&mut self, desc: &AppDescriptor, display: &mut dyn Display, now_ms: u64) {
        if let Some(init) = desc.hooks.init {
            let mut ctx = WatchContext {
                display,
                settings: &mut self.settings,
                stats: &self.stats,
                session: &mut self.session,
                now_ms,
            };
            init(&mut ctx);
        }
    }

    fn run_cleanup(&mut self, desc: &AppDescriptor, display: &mut dyn Display, now_ms: u64) {
        if let Some(cleanup) = desc.hooks.cleanup {
            let mut ctx = WatchContext {
                display,
                settings: &mut self.settings,
                stats: &self.stats,
                session: &mut self.session,
                now_ms,
            };
            cleanup(&mut ctx);
        }
    }

    fn render(&mut self, display: &mut dyn Display, now_ms: u64) {
        let colors = self.settings.theme.colors();
        match self.screen {
            Screen::Sleep => {
                let _ = display.clear(0);
                let _ = display.present();
            }
            Screen::Splash => {
                let _ = display.clear(colors.background);
                let _ = display.present();
            }
            Screen::Charging => {
                let _ = display.clear(colors.background);
                let _ = display.text(140, 210, "Charging", colors.accent);
                let _ = display.present();
            }
            Screen::AppGrid => {
                let offset = self.transition_offset(now_ms);
                let _ = display.clear(colors.background);
                for (index, desc) in self.registry.iter().enumerate().take(grid::GRID_MAX_APPS) {
                    let (x, y) = grid::cell_origin(index);
                    let _ = display.fill_rect(
                        x + offset,
                        y,
                        grid::GRID_CELL,
                        grid::GRID_CELL,
                        colors.secondary,
                    );
                    let _ = display.text(x + offset + 6, y + 22, desc.label, colors.text);
                }
                let _ = display.present();
            }
            _ => {
                let Some(id) = self.active_app else { return };
                let Some(desc) = self.registry.get(id) else { return };
                let Some(draw) = desc.hooks.draw else { return };
                let mut ctx = WatchContext {
                    display,
                    settings: &mut self.settings,
                    stats: &self.stats,
                    session: &mut self.session,
                    now_ms,
                };
                draw(&mut ctx);
            }
        }
    }
}
