use secsim_types::AttackKind;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// How long an attack stays "in progress" after launch.
pub const DEFAULT_ATTACK_WINDOW: Duration = Duration::seconds(5);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("attack simulation already in progress: {active}")]
    InProgress { active: AttackKind },
}

/// Handle for one launched attack window.
///
/// Only the ticket carrying the monitor's current generation can end the
/// window; older tickets are inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackTicket {
    pub attack: AttackKind,
    pub generation: u64,
    pub expires_at: OffsetDateTime,
}

/// Tracks the `none -> attack -> none` cycle.
#[derive(Clone, Debug)]
pub struct AttackMonitor {
    window: Duration,
    generation: u64,
    active: Option<AttackTicket>,
}

impl Default for AttackMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_ATTACK_WINDOW)
    }
}

impl AttackMonitor {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            active: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// The attack currently in progress, ignoring deadlines. Call
    /// [`AttackMonitor::poll`] first to apply elapsed windows.
    pub fn active(&self) -> Option<AttackKind> {
        self.active.map(|t| t.attack)
    }

    /// Start a window for `kind`. An elapsed window is closed first; a live
    /// one rejects the launch.
    pub fn launch(
        &mut self,
        kind: AttackKind,
        now: OffsetDateTime,
    ) -> Result<AttackTicket, AttackError> {
        self.poll(now);
        if let Some(active) = self.active {
            return Err(AttackError::InProgress {
                active: active.attack,
            });
        }

        self.generation += 1;
        let ticket = AttackTicket {
            attack: kind,
            generation: self.generation,
            expires_at: now
                .checked_add(self.window)
                .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc()),
        };
        self.active = Some(ticket);
        Ok(ticket)
    }

    /// Close the window named by `ticket`. Returns `false` for a stale ticket
    /// or when nothing is active.
    pub fn expire(&mut self, ticket: &AttackTicket) -> bool {
        match self.active {
            Some(active) if active.generation == ticket.generation => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Close the window if its deadline has passed. Returns the attack that ended.
    pub fn poll(&mut self, now: OffsetDateTime) -> Option<AttackKind> {
        let active = self.active?;
        if now >= active.expires_at {
            self.active = None;
            Some(active.attack)
        } else {
            None
        }
    }
}
