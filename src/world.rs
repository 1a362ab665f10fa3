use glam::Vec2;
use log::{debug, warn};

use crate::{
    collision::{contact::Manifold, narrowphase::NarrowPhase},
    config::{SimulationBounds, WorldSettings, DEFAULT_TIME_STEP},
    core::{body::Body, shape::ShapeKind},
    dynamics::{integrator::Integrator, solver::Resolver},
    error::PhysicsError,
    utils::{
        allocator::{Arena, BodyId},
        logging::{warn_if_time_dropped, ScopedTimer},
    },
};

/// Counters gathered over the most recent [`PhysicsWorld::update`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub ticks: u32,
    pub pairs_tested: usize,
    pub contacts: usize,
    pub culled: usize,
}

/// Owns every body and advances them with a fixed-step accumulator.
///
/// Pairs are visited in insertion order, each contact resolved the moment it
/// is found, so identical input sequences replay identically.
pub struct PhysicsWorld {
    bodies: Arena<Body>,
    order: Vec<BodyId>,
    pub gravity: Vec2,
    pub integrator: Integrator,
    pub resolver: Resolver,
    pub bounds: Option<SimulationBounds>,
    time_step: f32,
    time_accumulated: f32,
    max_accumulated_time: f32,
    last_stats: StepStats,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

impl PhysicsWorld {
    /// World with default settings; a non-positive step falls back to the default.
    pub fn new(time_step: f32) -> Self {
        let ts = if time_step > 0.0 && time_step.is_finite() {
            time_step
        } else {
            DEFAULT_TIME_STEP
        };
        let settings = WorldSettings::default();

        Self {
            bodies: Arena::new(),
            order: Vec::new(),
            gravity: settings.gravity,
            integrator: Integrator::default(),
            resolver: Resolver::new(settings.resolver),
            bounds: settings.bounds,
            time_step: ts,
            time_accumulated: 0.0,
            max_accumulated_time: settings.max_accumulated_time.max(ts),
            last_stats: StepStats::default(),
        }
    }

    pub fn with_settings(settings: WorldSettings) -> Result<Self, PhysicsError> {
        settings.validate()?;
        let mut world = Self::new(settings.time_step);
        world.gravity = settings.gravity;
        world.resolver = Resolver::new(settings.resolver);
        world.bounds = settings.bounds;
        world.max_accumulated_time = settings.max_accumulated_time;
        Ok(world)
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Frame time banked but not yet simulated.
    pub fn accumulated_time(&self) -> f32 {
        self.time_accumulated
    }

    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn add_actor(&mut self, body: Body) -> BodyId {
        let id = self.bodies.insert(body);
        if let Some(stored) = self.bodies.get_mut(id) {
            stored.id = id;
            stored.refresh_derived();
            debug!("added {} as {:?}", stored, id);
        }
        self.order.push(id);
        id
    }

    /// Removes a body; its id is stale afterwards.
    pub fn remove_actor(&mut self, id: BodyId) -> Result<Body, PhysicsError> {
        let body = self.bodies.remove(id).ok_or(PhysicsError::UnknownBody(id))?;
        self.order.retain(|&other| other != id);
        debug!("removed {:?}", id);
        Ok(body)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains(id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    /// Bodies in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.order.iter().filter_map(|&id| self.bodies.get(id))
    }

    pub fn ids(&self) -> &[BodyId] {
        &self.order
    }

    pub fn apply_force(&mut self, id: BodyId, force: Vec2) -> Result<(), PhysicsError> {
        let body = self.bodies.get_mut(id).ok_or(PhysicsError::UnknownBody(id))?;
        body.apply_force(force);
        Ok(())
    }

    pub fn set_kinematic(&mut self, id: BodyId, kinematic: bool) -> Result<(), PhysicsError> {
        let body = self.bodies.get_mut(id).ok_or(PhysicsError::UnknownBody(id))?;
        body.set_kinematic(kinematic);
        Ok(())
    }

    /// Banks `frame_delta` and runs as many fixed ticks as it covers.
    pub fn update(&mut self, frame_delta: f32) {
        self.last_stats = StepStats::default();
        if !frame_delta.is_finite() || frame_delta < 0.0 {
            warn!("ignoring invalid frame delta {frame_delta}");
            return;
        }

        self.time_accumulated += frame_delta;
        if self.time_accumulated > self.max_accumulated_time {
            warn_if_time_dropped(
                self.time_accumulated - self.max_accumulated_time,
                self.max_accumulated_time,
            );
            self.time_accumulated = self.max_accumulated_time;
        }

        while self.time_accumulated >= self.time_step {
            self.tick();
            self.time_accumulated -= self.time_step;
        }
    }

    fn tick(&mut self) {
        self.last_stats.ticks += 1;
        self.last_stats.culled += self.cull_escaped();

        {
            let _timer = ScopedTimer::new("integrator");
            let (gravity, dt) = (self.gravity, self.time_step);
            for &id in &self.order {
                if let Some(body) = self.bodies.get_mut(id) {
                    self.integrator.fixed_update(body, gravity, dt);
                }
            }
        }

        let _timer = ScopedTimer::new("collisions");
        self.check_for_collisions();
    }

    /// Tests every unordered pair once, resolving contacts as they are found.
    /// Returns the number of contacts.
    pub fn check_for_collisions(&mut self) -> usize {
        let mut contacts = 0;
        for i in 0..self.order.len() {
            for j in (i + 1)..self.order.len() {
                let (id_a, id_b) = (self.order[i], self.order[j]);
                let Some((body_a, body_b)) = self.bodies.get2_mut(id_a, id_b) else {
                    continue;
                };

                self.last_stats.pairs_tested += 1;
                let mut manifold = Manifold::new(id_a, id_b);
                if NarrowPhase::collide(body_a, body_b, &mut manifold, &self.resolver) {
                    contacts += 1;
                }
            }
        }
        self.last_stats.contacts += contacts;
        contacts
    }

    /// Drops dynamic bodies that left the simulation window.
    fn cull_escaped(&mut self) -> usize {
        let Some(bounds) = self.bounds else {
            return 0;
        };

        let escaped: Vec<BodyId> = self
            .bodies()
            .filter(|body| {
                !body.is_kinematic() && body.kind() != ShapeKind::Plane && body.is_outside(&bounds)
            })
            .map(|body| body.id)
            .collect();

        for &id in &escaped {
            if let Ok(body) = self.remove_actor(id) {
                debug!("culled {} outside the simulation window", body);
            }
        }
        escaped.len()
    }
}
