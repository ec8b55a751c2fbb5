//! Ammo and reload state machine
//!
//! The weapon holds a clip and a reserve. Firing drains the clip; an empty
//! clip triggers a reload automatically. A reload takes `reload_time`
//! seconds of game time and refills the clip from the reserve.
//!
//! Time is passed in by the caller (seconds of game time) so the state
//! machine has no clock of its own.

use serde::{Serialize, Deserialize};

/// Ammo capacity and reload timing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Rounds in the reserve at start
    pub max_ammo: u32,
    /// Clip capacity
    pub ammo_per_reload: u32,
    /// Seconds from reload start to refill
    pub reload_time: f64,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            max_ammo: 1000,
            ammo_per_reload: 20,
            reload_time: 2.0,
        }
    }
}

/// Result of a reload request
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReloadOutcome {
    /// Reload started; the clip refills at `ready_at`
    Started { ready_at: f64 },
    /// A reload was already in progress; nothing changed
    AlreadyReloading,
    /// The reserve is empty; nothing changed
    NoAmmo,
}

/// Result of a fire request
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FireOutcome {
    /// A round was consumed
    Fired {
        /// Rounds left in the clip
        clip: u32,
        /// Set when this shot emptied the clip and a reload was requested
        auto_reload: Option<ReloadOutcome>,
    },
    /// The clip is empty; reload first
    EmptyClip,
    /// A reload is in progress
    Reloading,
}

impl FireOutcome {
    /// Whether a round was consumed
    pub fn fired(&self) -> bool {
        matches!(self, FireOutcome::Fired { .. })
    }
}

/// A finished reload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReloadComplete {
    /// Rounds moved from the reserve into the clip
    pub refilled: u32,
    /// Clip after refilling
    pub clip: u32,
    /// Reserve after refilling
    pub reserve: u32,
}

/// Clip/reserve state with a timestamped reload
#[derive(Clone, Debug)]
pub struct Weapon {
    config: WeaponConfig,
    reserve: u32,
    clip: u32,
    /// Game time at which the current reload started
    reload_started: Option<f64>,
}

impl Weapon {
    /// Create a weapon with a full reserve and an empty clip
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            reserve: config.max_ammo,
            clip: 0,
            reload_started: None,
        }
    }

    /// Create a weapon with explicit clip and reserve counts
    ///
    /// The clip is clamped to the clip capacity.
    pub fn with_ammo(config: WeaponConfig, clip: u32, reserve: u32) -> Self {
        Self {
            config,
            reserve,
            clip: clip.min(config.ammo_per_reload),
            reload_started: None,
        }
    }

    /// Capacity and reload settings
    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    /// Rounds in the clip
    pub fn clip(&self) -> u32 {
        self.clip
    }

    /// Rounds in the reserve
    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    /// Whether a reload is in progress
    pub fn is_reloading(&self) -> bool {
        self.reload_started.is_some()
    }

    /// Game time at which the current reload completes
    pub fn reload_ready_at(&self) -> Option<f64> {
        self.reload_started.map(|start| start + self.config.reload_time)
    }

    /// Whether a shot would consume a round right now
    pub fn can_fire(&self) -> bool {
        !self.is_reloading() && self.clip > 0
    }

    /// Try to fire one round
    pub fn fire(&mut self, now: f64) -> FireOutcome {
        if self.is_reloading() {
            log::info!("Reloading... Please wait.");
            return FireOutcome::Reloading;
        }
        if self.clip == 0 {
            log::info!("No ammo in clip! Reload first.");
            return FireOutcome::EmptyClip;
        }

        self.clip -= 1;
        log::info!("Ammo left: {}", self.clip);

        let auto_reload = if self.clip == 0 {
            log::info!("Clip empty! Reloading...");
            Some(self.reload(now))
        } else {
            None
        };

        FireOutcome::Fired {
            clip: self.clip,
            auto_reload,
        }
    }

    /// Start a reload
    pub fn reload(&mut self, now: f64) -> ReloadOutcome {
        if self.is_reloading() {
            log::info!("Already reloading...");
            return ReloadOutcome::AlreadyReloading;
        }
        if self.reserve == 0 {
            log::info!("No more ammo available to reload.");
            return ReloadOutcome::NoAmmo;
        }

        self.reload_started = Some(now);
        log::info!("Reloading... Please wait {} seconds.", self.config.reload_time);
        ReloadOutcome::Started {
            ready_at: now + self.config.reload_time,
        }
    }

    /// Complete a due reload
    ///
    /// Call once per frame with the current game time. Returns the refill
    /// on the frame the reload completes.
    pub fn update(&mut self, now: f64) -> Option<ReloadComplete> {
        let ready_at = self.reload_ready_at()?;
        if now < ready_at {
            return None;
        }

        let needed = self.config.ammo_per_reload.saturating_sub(self.clip);
        let refilled = needed.min(self.reserve);
        self.clip += refilled;
        self.reserve -= refilled;
        self.reload_started = None;

        log::info!(
            "Reload complete! Ammo in clip: {}, Total ammo remaining: {}",
            self.clip,
            self.reserve
        );

        Some(ReloadComplete {
            refilled,
            clip: self.clip,
            reserve: self.reserve,
        })
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WeaponConfig::default())
    }
}
