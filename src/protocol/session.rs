//! Client session: the receive -> update -> render -> transmit loop
//!
//! The session starts unconfigured. A config message activates it; after
//! that every state message updates the world, repaints, and sends exactly
//! one input message back. There is no timer: if snapshots stop arriving,
//! so do frames and input.

use glam::Vec2;

use super::Transport;
use super::wire::{Inbound, Outbound};
use crate::error::{DecodeError, TransportError};
use crate::field::FieldConfig;
use crate::input::{InputSampler, LocalInputState};
use crate::renderer::{FrameSink, build_scene};
use crate::transform::{Transform, Viewport};
use crate::world::{Reconciliation, WorldModel};

/// Why a message did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// State arrived before any config
    NotConfigured,
    /// Envelope type this client does not handle
    UnknownType(String),
}

/// What one state message caused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub reconciliation: Reconciliation,
    /// False when no valid transform exists yet or the backend failed
    pub rendered: bool,
    pub sent: bool,
}

/// Result of feeding one inbound text frame to the session
#[derive(Debug)]
pub enum Outcome {
    Configured,
    /// A further config message reset the session
    Reconfigured,
    Frame(FrameReport),
    Ignored(IgnoreReason),
    Rejected(DecodeError),
}

#[derive(Debug)]
enum Phase {
    Unconfigured,
    Active {
        config: FieldConfig,
        world: WorldModel,
    },
}

/// Owns all mutable client state
pub struct Session<S, T> {
    phase: Phase,
    viewport: Viewport,
    sampler: InputSampler,
    sink: S,
    transport: T,
}

impl<S: FrameSink, T: Transport> Session<S, T> {
    pub fn new(sink: S, transport: T) -> Self {
        Self {
            phase: Phase::Unconfigured,
            viewport: Viewport::new(),
            sampler: InputSampler::new(),
            sink,
            transport,
        }
    }

    /// Handle one inbound text frame
    pub fn on_message(&mut self, text: &str) -> Outcome {
        let inbound = match Inbound::decode(text) {
            Ok(inbound) => inbound,
            Err(e) => {
                log::warn!("Discarding inbound message: {}", e);
                return Outcome::Rejected(e);
            }
        };

        match inbound {
            Inbound::Config(config) => self.configure(config),
            Inbound::State(snapshot) => {
                let Phase::Active { config, world } = &mut self.phase else {
                    log::debug!("State message before config, ignoring");
                    return Outcome::Ignored(IgnoreReason::NotConfigured);
                };

                let reconciliation = world.apply(snapshot);
                let rendered = match self.viewport.transform() {
                    Some(transform) => {
                        present(&mut self.sink, world, config, transform)
                    }
                    None => {
                        log::debug!("No viewport yet, skipping render");
                        false
                    }
                };
                let sent = match self.transmit() {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("Failed to send input: {}", e);
                        false
                    }
                };

                Outcome::Frame(FrameReport {
                    reconciliation,
                    rendered,
                    sent,
                })
            }
            Inbound::Unknown(kind) => {
                log::debug!("Ignoring message type {:?}", kind);
                Outcome::Ignored(IgnoreReason::UnknownType(kind))
            }
        }
    }

    /// Pointer moved to `(x, y)` logical pixels relative to the surface
    pub fn on_pointer(&mut self, x: f32, y: f32) {
        if let (Phase::Active { config, .. }, Some(transform)) =
            (&self.phase, self.viewport.transform())
        {
            self.sampler.sample(Vec2::new(x, y), transform, config);
        }
    }

    /// Surface resized to `width x height` logical pixels
    ///
    /// The transform is replaced before this returns, and the last world is
    /// repainted with it.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        let config = match &self.phase {
            Phase::Active { config, .. } => Some(config),
            Phase::Unconfigured => None,
        };
        if !self.viewport.resize(config, width, height) {
            return;
        }
        log::debug!("Viewport resized to {}x{}", width, height);

        if let (Phase::Active { config, world }, Some(transform)) =
            (&self.phase, self.viewport.transform())
        {
            if world.has_snapshot() {
                present(&mut self.sink, world, config, transform);
            }
        }
    }

    fn configure(&mut self, config: FieldConfig) -> Outcome {
        let outcome = match self.phase {
            Phase::Unconfigured => {
                log::info!(
                    "Configured as player {} on a {}x{} field",
                    config.id,
                    config.field_width,
                    config.field_height
                );
                Outcome::Configured
            }
            Phase::Active { .. } => {
                log::info!("New config received, resetting session as player {}", config.id);
                Outcome::Reconfigured
            }
        };

        self.viewport.reconfigure(&config);
        self.sampler.reset();
        self.phase = Phase::Active {
            config,
            world: WorldModel::new(),
        };
        outcome
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        let text = Outbound::from_input(self.sampler.state()).encode()?;
        self.transport.send_text(&text)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    pub fn config(&self) -> Option<&FieldConfig> {
        match &self.phase {
            Phase::Active { config, .. } => Some(config),
            Phase::Unconfigured => None,
        }
    }

    pub fn world(&self) -> Option<&WorldModel> {
        match &self.phase {
            Phase::Active { world, .. } => Some(world),
            Phase::Unconfigured => None,
        }
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.viewport.transform()
    }

    pub fn input(&self) -> LocalInputState {
        self.sampler.state()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn present<S: FrameSink>(
    sink: &mut S,
    world: &WorldModel,
    config: &FieldConfig,
    transform: &Transform,
) -> bool {
    let scene = build_scene(world, config);
    match sink.present(&scene, transform) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Render failed: {}", e);
            false
        }
    }
}
