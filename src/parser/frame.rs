//! Frame reassembly from decoded text lines
//!
//! The device prints one field per line and closes every fix with a line of
//! dashes. `FrameAssembler` collects lines until that sentinel shows up and
//! then hands back the whole block, sentinel included.

use tracing::debug;

/// Run of dashes the device prints after each fix
pub const FRAME_SENTINEL: &str = "---------------------------";

/// Text lines of one fix, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    pub lines: Vec<String>,
}

impl RawFrame {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Assembly state between sentinels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    AwaitingFrame,
    FrameComplete,
}

/// Line-driven state machine that cuts the stream into frames
#[derive(Debug)]
pub struct FrameAssembler {
    buffer: Vec<String>,
    state: AssemblerState,
    frames_completed: u64,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: AssemblerState::AwaitingFrame,
            frames_completed: 0,
        }
    }

    /// Feed one line. Surrounding whitespace is trimmed and blank lines are
    /// ignored. Returns the finished frame when `line` carries the sentinel.
    pub fn push_line(&mut self, line: &str) -> Option<RawFrame> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        self.state = AssemblerState::AwaitingFrame;
        self.buffer.push(line.to_string());

        if line.contains(FRAME_SENTINEL) {
            self.state = AssemblerState::FrameComplete;
            self.frames_completed += 1;
            let frame = RawFrame::new(std::mem::take(&mut self.buffer));
            debug!(
                lines = frame.lines.len(),
                frame = self.frames_completed,
                "frame complete"
            );
            return Some(frame);
        }

        None
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    /// Lines buffered toward the next frame
    pub fn pending_lines(&self) -> usize {
        self.buffer.len()
    }

    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    /// Drop any partial frame, returning how many lines were discarded
    pub fn reset(&mut self) -> usize {
        let dropped = self.buffer.len();
        self.buffer.clear();
        self.state = AssemblerState::AwaitingFrame;
        dropped
    }
}
