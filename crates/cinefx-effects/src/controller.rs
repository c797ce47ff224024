//! The effects controller: owns the document, the randomness and the
//! scheduler, and wires the four effects together.

use std::collections::BTreeSet;

use cinefx_core::{EffectsConfig, ElementId, Point, TiltTransform};
use tracing::{debug, trace};

use crate::document::Document;
use crate::effects::{
    particles::ParticleEmitter,
    shooting_star::ShootingStarEmitter,
    spotlight::{Spotlight, SpotlightPosition},
    tilt::TiltHandler,
};
use crate::random::RandomSource;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    RetireParticle(ElementId),
    ShootingStarTick,
    RemoveStar(ElementId),
}

/// Running totals since mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectStats {
    pub particles_spawned: u64,
    pub particles_retired: u64,
    pub stars_spawned: u64,
    pub stars_removed: u64,
}

/// Drives every effect on one document.
///
/// Setup happens in two phases: [`mount`](Self::mount) creates the spotlight
/// and particle container and selects the cards, [`start`](Self::start) seeds
/// the particles and the shooting-star interval. Time only passes through
/// [`advance`](Self::advance).
#[derive(Debug)]
pub struct EffectsController<D, R> {
    document: D,
    random: R,
    config: EffectsConfig,
    scheduler: Scheduler<Task>,
    spotlight: Option<Spotlight>,
    particles: ParticleEmitter,
    stars: ShootingStarEmitter,
    tilt: TiltHandler,
    live_particles: BTreeSet<ElementId>,
    live_stars: BTreeSet<ElementId>,
    running: bool,
    stats: EffectStats,
}

impl<D: Document, R: RandomSource> EffectsController<D, R> {
    /// Create every element the effects need and select the cards.
    ///
    /// Nothing is scheduled until [`start`](Self::start).
    pub fn mount(mut document: D, random: R, config: EffectsConfig) -> Self {
        let spotlight = config
            .spotlight
            .enabled
            .then(|| Spotlight::mount(&mut document));
        let particles = ParticleEmitter::mount(&mut document);
        let tilt = TiltHandler::mount(&document);

        debug!(
            spotlight = spotlight.is_some(),
            cards = tilt.cards().len(),
            "mounted effects"
        );

        Self {
            document,
            random,
            config,
            scheduler: Scheduler::new(),
            spotlight,
            particles,
            stars: ShootingStarEmitter,
            tilt,
            live_particles: BTreeSet::new(),
            live_stars: BTreeSet::new(),
            running: false,
            stats: EffectStats::default(),
        }
    }

    /// Seed the particle population and start the shooting-star interval.
    /// Does nothing if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;

        for _ in 0..self.config.particles.count {
            self.spawn_particle();
        }
        self.scheduler
            .schedule_in(self.star_interval_ms(), Task::ShootingStarTick);

        debug!(
            now_ms = self.now_ms(),
            particles = self.live_particles.len(),
            "effects started"
        );
    }

    /// Cancel every pending task and remove the particles and stars.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.scheduler.clear();

        for element in std::mem::take(&mut self.live_particles) {
            self.particles.retire(&mut self.document, element);
        }
        for element in std::mem::take(&mut self.live_stars) {
            self.stars.remove(&mut self.document, element);
        }

        debug!(now_ms = self.now_ms(), "effects stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Move the clock forward, running every task that falls due.
    pub fn advance(&mut self, delta_ms: u64) {
        let target = self.now_ms().saturating_add(delta_ms);
        while let Some(task) = self.scheduler.pop_due(target) {
            self.run(task);
        }
        self.scheduler.advance_clock_to(target);
    }

    /// Pointer moved anywhere over the document.
    pub fn pointer_moved(&mut self, pointer: Point) -> Option<SpotlightPosition> {
        let spotlight = self.spotlight?;
        Some(spotlight.track(&mut self.document, pointer))
    }

    /// Pointer moved over a card.
    pub fn card_pointer_moved(&mut self, card: ElementId, pointer: Point) -> Option<TiltTransform> {
        self.tilt
            .pointer_moved(&mut self.document, card, pointer, &self.config.tilt)
    }

    /// Pointer left a card.
    pub fn card_pointer_left(&mut self, card: ElementId) {
        self.tilt.pointer_left(&mut self.document, card);
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::RetireParticle(element) => {
                self.particles.retire(&mut self.document, element);
                self.live_particles.remove(&element);
                self.stats.particles_retired += 1;
                trace!(%element, now_ms = self.now_ms(), "particle retired");
                self.spawn_particle();
            }
            Task::ShootingStarTick => {
                let settings = &self.config.shooting_stars;
                let star = self
                    .stars
                    .spawn(&mut self.document, &mut self.random, settings);
                self.live_stars.insert(star.element);
                self.stats.stars_spawned += 1;
                self.scheduler
                    .schedule_in(settings.lifetime_ms, Task::RemoveStar(star.element));
                self.scheduler
                    .schedule_in(settings.interval_ms.max(1), Task::ShootingStarTick);
                trace!(
                    element = %star.element,
                    left_vw = star.left_vw,
                    top_vh = star.top_vh,
                    now_ms = self.now_ms(),
                    "shooting star spawned"
                );
            }
            Task::RemoveStar(element) => {
                self.stars.remove(&mut self.document, element);
                self.live_stars.remove(&element);
                self.stats.stars_removed += 1;
                trace!(%element, now_ms = self.now_ms(), "shooting star removed");
            }
        }
    }

    /// A zero interval would refire within the same tick forever.
    fn star_interval_ms(&self) -> u64 {
        self.config.shooting_stars.interval_ms.max(1)
    }

    fn spawn_particle(&mut self) {
        let particle = self.particles.emit(
            &mut self.document,
            &mut self.random,
            &self.config.particles,
        );
        let lifetime_ms = particle.spec.lifetime_ms();
        self.live_particles.insert(particle.element);
        self.stats.particles_spawned += 1;
        self.scheduler
            .schedule_in(lifetime_ms, Task::RetireParticle(particle.element));
        trace!(
            element = %particle.element,
            lifetime_ms,
            now_ms = self.now_ms(),
            "particle spawned"
        );
    }
}

impl<D, R> EffectsController<D, R> {
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn stats(&self) -> EffectStats {
        self.stats
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    pub fn particle_count(&self) -> usize {
        self.live_particles.len()
    }

    pub fn star_count(&self) -> usize {
        self.live_stars.len()
    }

    /// Number of tasks waiting on the clock.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn cards(&self) -> &[ElementId] {
        self.tilt.cards()
    }

    pub fn spotlight(&self) -> Option<ElementId> {
        self.spotlight.map(|s| s.element())
    }

    pub fn particle_container(&self) -> ElementId {
        self.particles.container()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access for host-side changes such as resizing or moving cards.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }
}
