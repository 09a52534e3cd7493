//! Reports and cues - everything the session tells the outside world.
//!
//! The session never renders anything. It appends [`Report`]s (log messages
//! and pop-up notifications) and [`Cue`]s (animation hints) to a
//! [`ReportLog`], and adapters drain them.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of messages kept for the on-screen log.
pub const MESSAGE_HISTORY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Info,
    Success,
    Warning,
    Danger,
}

/// Log line versus pop-up notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Message,
    Notification,
}

/// What a report is about. Lets adapters filter without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Lifecycle,
    Growth,
    Feeding,
    Water,
    Handling,
    Bath,
    Cleaning,
    Play,
    Petting,
    Movement,
    Sleep,
    Hunger,
    Hydration,
    Health,
    Environment,
    Death,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Session clock when emitted.
    pub at_ms: u64,
    pub level: ReportLevel,
    pub kind: ReportKind,
    pub topic: Topic,
    pub text: String,
}

/// Animation hints. No effect on the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    Eating,
    HeadBob { count: u8 },
    ArmWave,
    BeardPuff,
    LookAround,
    TailFlick,
    TongueFlick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub at_ms: u64,
    pub kind: CueKind,
}

/// Consumer of reports, for adapters that push rather than poll.
pub trait ReportSink {
    fn report(&mut self, report: &Report);
}

impl ReportSink for Vec<Report> {
    fn report(&mut self, report: &Report) {
        self.push(report.clone());
    }
}

/// Pending reports and cues plus a bounded message history.
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    pending: Vec<Report>,
    cues: Vec<Cue>,
    history: VecDeque<Report>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&mut self, at_ms: u64, level: ReportLevel, topic: Topic, text: impl Into<String>) {
        self.push(Report {
            at_ms,
            level,
            kind: ReportKind::Message,
            topic,
            text: text.into(),
        });
    }

    pub fn notify(&mut self, at_ms: u64, level: ReportLevel, topic: Topic, text: impl Into<String>) {
        self.push(Report {
            at_ms,
            level,
            kind: ReportKind::Notification,
            topic,
            text: text.into(),
        });
    }

    pub fn cue(&mut self, at_ms: u64, kind: CueKind) {
        self.cues.push(Cue { at_ms, kind });
    }

    fn push(&mut self, report: Report) {
        if report.kind == ReportKind::Message {
            if self.history.len() == MESSAGE_HISTORY {
                self.history.pop_front();
            }
            self.history.push_back(report.clone());
        }
        self.pending.push(report);
    }

    /// Take every report emitted since the last drain, oldest first.
    pub fn drain_reports(&mut self) -> Vec<Report> {
        std::mem::take(&mut self.pending)
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Hand pending reports to a sink, oldest first.
    pub fn flush_to(&mut self, sink: &mut dyn ReportSink) {
        for report in self.pending.drain(..) {
            sink.report(&report);
        }
    }

    /// Latest messages, oldest first. Draining does not affect history.
    pub fn recent_messages(&self) -> impl Iterator<Item = &Report> {
        self.history.iter()
    }

    /// Undrained reports, oldest first.
    pub fn pending(&self) -> &[Report] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.cues.clear();
        self.history.clear();
    }
}
