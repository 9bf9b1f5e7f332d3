//! Mock hardware adapter for integration tests.
//!
//! Records every fan command and display frame so tests can assert on the
//! full output history without touching real GPIO/PWM registers.  Button
//! levels are set directly by the test.

use fanctl::app::events::AppEvent;
use fanctl::app::output::{DisplayFrame, FanCommand};
use fanctl::app::ports::{ButtonInputPort, DisplayPort, EventSink, FanOutputPort, TachometerPort};
use fanctl::app::service::FanController;
use fanctl::config::SystemConfig;
use fanctl::input::{ButtonId, ButtonLevels, Gesture, LogicalEvent};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub levels: ButtonLevels,
    pub rpm: Option<u32>,
    pub commands: Vec<FanCommand>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            levels: ButtonLevels::released(),
            rpm: None,
            commands: Vec::new(),
        }
    }

    pub fn last_command(&self) -> Option<FanCommand> {
        self.commands.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonInputPort for MockHardware {
    fn read_levels(&mut self) -> ButtonLevels {
        self.levels
    }
}

impl FanOutputPort for MockHardware {
    fn apply(&mut self, command: FanCommand) {
        self.commands.push(command);
    }
}

impl TachometerPort for MockHardware {
    fn rpm(&mut self) -> Option<u32> {
        self.rpm
    }
}

// ── Display + event recorders ─────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<DisplayFrame>,
}

impl DisplayPort for MockDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        self.frames.push(*frame);
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    /// Every resolved gesture, in order.
    pub fn inputs(&self) -> Vec<LogicalEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Input(ev) => Some(*ev),
                _ => None,
            })
            .collect()
    }

    pub fn count_gestures(&self, gesture: Gesture) -> usize {
        self.inputs().iter().filter(|e| e.gesture == gesture).count()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Test rig ──────────────────────────────────────────────────

/// Controller plus mocks, driven at 1 ms per tick.
pub struct Rig {
    pub app: FanController,
    pub hw: MockHardware,
    pub display: MockDisplay,
    pub sink: RecordingSink,
    pub now_ms: u32,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        Self::starting_at(config, 0)
    }

    pub fn starting_at(config: SystemConfig, now_ms: u32) -> Self {
        let mut app = FanController::new(config);
        let mut sink = RecordingSink::default();
        app.start(&mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            display: MockDisplay::default(),
            sink,
            now_ms,
        }
    }

    /// Tick once per millisecond for `ms` with the current levels.
    pub fn run(&mut self, ms: u32) {
        for _ in 0..ms {
            self.app.tick(self.now_ms, &mut self.hw, &mut self.display, &mut self.sink);
            self.now_ms = self.now_ms.wrapping_add(1);
        }
    }

    /// Hold `levels` for `ms`.
    pub fn drive(&mut self, levels: ButtonLevels, ms: u32) {
        self.hw.levels = levels;
        self.run(ms);
    }

    /// Press `id` for `press_ms`, then release and let the line settle.
    pub fn press(&mut self, id: ButtonId, press_ms: u32) {
        self.drive(ButtonLevels::only(id), press_ms);
        self.drive(ButtonLevels::released(), 100);
    }

    /// A clean short press.
    pub fn click(&mut self, id: ButtonId) {
        self.press(id, 100);
    }

    /// A press well past the hold threshold.
    pub fn long_press(&mut self, id: ButtonId) {
        self.press(id, 1200);
    }
}
