//! The cast execution pipeline.
//!
//! [`CastEngine`] walks a package from its cursor, routing flow between
//! node kinds: mediums turn trajectories into targets, splits fork the
//! chain into independent branches, plain modifiers fall through after
//! adjusting power, and effects terminate a branch. A medium with an
//! intermediary parks the remaining chain as a [`SuspendedCast`]; the
//! `resume` entry point is the only way such a continuation re-enters the
//! walk.
//!
//! The engine recovers every failure locally. Unknown data, contract
//! mismatches, and lost actors all surface as fewer (possibly zero) effect
//! applications, never as an `Err`.

mod outcome;

pub use outcome::{CastOutcome, CastRejection, EffectApplication, SuspendedCast};

use crate::env::{CastEnv, EntityId};
use crate::math::Trajectory;
use crate::node::{EffectContext, Hit, MediumFlow, Node, NodeBody};
use crate::package::{CastId, Package};

/// Drives casts against a world env and allocates cast identifiers.
#[derive(Debug, Default)]
pub struct CastEngine {
    next_cast_id: u64,
}

impl CastEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> CastId {
        self.next_cast_id += 1;
        CastId(self.next_cast_id)
    }

    /// Cast-Start: begins a cast from a living actor's aim.
    ///
    /// The template is copied, never consumed; concurrent casts of the
    /// same authored chain each get their own cursor. The cast is rejected
    /// (not failed) for an empty chain, a non-medium lead, or a caster the
    /// world cannot resolve.
    pub fn begin_cast(
        &mut self,
        env: &CastEnv<'_>,
        caster: EntityId,
        template: &Package,
    ) -> CastOutcome {
        if template.is_empty() {
            return CastOutcome::rejected(CastRejection::EmptyChain);
        }
        let leads_with_medium =
            matches!(template.node(0).map(Node::body), Some(NodeBody::Medium(_)));
        if !leads_with_medium {
            return CastOutcome::rejected(CastRejection::MalformedLead);
        }
        let Some(pose) = env.pose_of(caster) else {
            return CastOutcome::rejected(CastRejection::CasterUnresolved { caster });
        };

        let mut package = template.runtime_copy(self.allocate_id());
        package.set_caster(caster);

        // Effects get their one cast-start notification before any flow.
        for node in package.nodes() {
            if let NodeBody::Effect(effect) = node.body() {
                effect.on_cast(caster);
            }
        }

        let mut outcome = CastOutcome::default();
        self.run_medium(env, package, pose.aim(), &mut outcome);
        outcome
    }

    /// Re-entry point for a suspended continuation.
    ///
    /// `flow` carries whatever the carrier resolved (targets, a terminal
    /// trajectory, or both). The package is the one captured at suspension
    /// time, cursor at the start of the remaining chain.
    pub fn resume(&self, env: &CastEnv<'_>, package: Package, flow: Vec<Hit>) -> CastOutcome {
        let mut outcome = CastOutcome::default();
        self.run_chain(env, package, flow, &mut outcome);
        outcome
    }

    /// Runs the medium at the package cursor against one trajectory.
    fn run_medium(
        &self,
        env: &CastEnv<'_>,
        package: Package,
        trajectory: Trajectory,
        out: &mut CastOutcome,
    ) {
        let Some(node) = package.current().cloned() else {
            return;
        };
        let NodeBody::Medium(medium) = node.body() else {
            // Trajectory flow reached a non-medium; contract mismatch,
            // branch ends inertly.
            return;
        };
        match medium.resolve(&trajectory, node.settings(), env) {
            MediumFlow::Halted => {}
            MediumFlow::Deferred => {
                // A projectile with no payload carries nothing worth
                // resuming.
                if let Some(rest) = package.remaining_from_current() {
                    out.suspended.push(SuspendedCast { package: rest, origin: trajectory });
                }
            }
            MediumFlow::Resolved { hits } => {
                if let Some(rest) = package.remaining_from_current() {
                    self.run_chain(env, rest, hits, out);
                }
            }
        }
    }

    /// Propagate: walks the chain from the package cursor, feeding `flow`
    /// into whatever node comes next.
    fn run_chain(
        &self,
        env: &CastEnv<'_>,
        mut package: Package,
        flow: Vec<Hit>,
        out: &mut CastOutcome,
    ) {
        loop {
            let Some(node) = package.current().cloned() else {
                return;
            };
            match node.body() {
                NodeBody::Modifier(modifier) => {
                    if !modifier.execute(node.settings(), package.power_multiplier_mut()) {
                        return;
                    }
                    package.advance();
                }
                NodeBody::Effect(effect) => {
                    let caster = package.caster().filter(|c| env.contains_actor(*c));
                    for hit in &flow {
                        let Some(target) = hit.target else {
                            continue;
                        };
                        let index = out.applications.len();
                        let ctx = EffectContext {
                            env: *env,
                            caster,
                            power: package.power_multiplier(),
                            index,
                        };
                        effect.apply(&target, hit.trajectory.as_ref(), node.settings(), &ctx);
                        out.applications.push(EffectApplication {
                            key: node.key().clone(),
                            target,
                            trajectory: hit.trajectory,
                            power: ctx.power,
                            index,
                        });
                    }
                    return;
                }
                NodeBody::Medium(_) => {
                    for hit in &flow {
                        let Some(trajectory) = hit.trajectory else {
                            continue;
                        };
                        self.run_medium(env, package.clone(), trajectory, out);
                    }
                    return;
                }
                NodeBody::Split(split) => {
                    let count = split.split_count(node.settings());
                    let primary =
                        flow.iter().find(|h| h.target.is_some() || h.trajectory.is_some());
                    let fanned: Vec<Option<Trajectory>> =
                        match primary.and_then(|h| h.trajectory) {
                            Some(trajectory) => trajectory
                                .fan(count, split.split_angle_degrees())
                                .into_iter()
                                .map(Some)
                                .collect(),
                            None => vec![None; count as usize],
                        };
                    let inherited = primary.and_then(|h| h.target);
                    for fan in fanned {
                        let Some(child) = package.remaining_from_current() else {
                            return;
                        };
                        let child_flow = match (inherited, fan) {
                            (None, None) => Vec::new(),
                            (target, trajectory) => vec![Hit { target, trajectory }],
                        };
                        self.run_chain(env, child, child_flow, out);
                    }
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::env::{Pose, Target, WorldOracle};
    use crate::math::Vec3;
    use crate::node::{
        EffectBehavior, MediumBehavior, ModifierBehavior, SPLIT_COUNT_SETTING,
    };
    use crate::setting::{NodeSetting, Settings};

    // ------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------

    struct TestWorld {
        actors: HashMap<EntityId, Pose>,
    }

    impl TestWorld {
        fn with_actor(id: EntityId) -> Self {
            let mut actors = HashMap::new();
            actors.insert(id, Pose::new(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, 0.0, 1.0)));
            Self { actors }
        }
    }

    impl WorldOracle for TestWorld {
        fn pose_of(&self, actor: EntityId) -> Option<Pose> {
            self.actors.get(&actor).copied()
        }

        fn resolve(&self, trajectory: &Trajectory) -> Vec<Target> {
            vec![Target::point(trajectory.point_at(5.0))]
        }
    }

    /// Root medium resolving one target through the world oracle.
    #[derive(Debug)]
    struct TouchMedium;
    impl MediumBehavior for TouchMedium {
        fn resolve(
            &self,
            trajectory: &Trajectory,
            _: &Settings,
            env: &CastEnv<'_>,
        ) -> MediumFlow {
            let hits = env
                .resolve(trajectory)
                .into_iter()
                .map(|t| Hit::target(t, Some(*trajectory)))
                .collect();
            MediumFlow::Resolved { hits }
        }
    }

    /// Medium that forwards its target but strips the trajectory, for
    /// contract-mismatch tests.
    #[derive(Debug)]
    struct TrajectorylessMedium;
    impl MediumBehavior for TrajectorylessMedium {
        fn resolve(
            &self,
            trajectory: &Trajectory,
            _: &Settings,
            _: &CastEnv<'_>,
        ) -> MediumFlow {
            MediumFlow::hit(Hit::target(Target::point(trajectory.point_at(1.0)), None))
        }
    }

    /// Projectile-style medium: always defers to a carrier.
    #[derive(Debug)]
    struct BoltMedium;
    impl MediumBehavior for BoltMedium {
        fn has_intermediary(&self) -> bool {
            true
        }

        fn resolve(&self, _: &Trajectory, _: &Settings, _: &CastEnv<'_>) -> MediumFlow {
            MediumFlow::Deferred
        }
    }

    #[derive(Clone, Debug, Default)]
    struct EffectLog {
        calls: Arc<Mutex<Vec<(f32, usize, Option<EntityId>)>>>,
        casts: Arc<AtomicUsize>,
    }

    #[derive(Debug)]
    struct CountingEffect {
        log: EffectLog,
    }

    impl EffectBehavior for CountingEffect {
        fn apply(
            &self,
            _: &Target,
            _: Option<&Trajectory>,
            _: &Settings,
            ctx: &EffectContext<'_>,
        ) -> bool {
            self.log
                .calls
                .lock()
                .unwrap()
                .push((ctx.power, ctx.index, ctx.caster));
            true
        }

        fn damage_for_display(&self, power: f32) -> f32 {
            4.0 * power
        }

        fn on_cast(&self, _caster: EntityId) {
            self.log.casts.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Debug)]
    struct ScaleModifier {
        factor: f32,
    }
    impl ModifierBehavior for ScaleModifier {
        fn execute(&self, _: &Settings, power: &mut f32) -> bool {
            *power *= self.factor;
            true
        }
    }

    #[derive(Debug)]
    struct HaltModifier;
    impl ModifierBehavior for HaltModifier {
        fn execute(&self, _: &Settings, _: &mut f32) -> bool {
            false
        }
    }

    const CASTER: EntityId = EntityId(1);

    fn spark(log: &EffectLog) -> Node {
        Node::effect("effect.spark", Arc::new(CountingEffect { log: log.clone() }))
    }

    fn touch() -> Node {
        Node::root_medium("medium.touch", Arc::new(TouchMedium))
    }

    // ------------------------------------------------------------------
    // Cast-Start
    // ------------------------------------------------------------------

    #[test]
    fn empty_chain_is_a_noop_cast() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let outcome = engine.begin_cast(&env, CASTER, &Package::new());
        assert!(!outcome.started());
        assert_eq!(outcome.rejection, Some(CastRejection::EmptyChain));
        assert!(outcome.applications.is_empty());
    }

    #[test]
    fn non_medium_lead_aborts_quietly() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut package = Package::new();
        package.push(spark(&log));
        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert_eq!(outcome.rejection, Some(CastRejection::MalformedLead));
        assert!(log.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn unresolvable_caster_rejects() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let mut package = Package::new();
        package.push(touch());
        let stranger = EntityId(99);
        let outcome = engine.begin_cast(&env, stranger, &package);
        assert_eq!(
            outcome.rejection,
            Some(CastRejection::CasterUnresolved { caster: stranger })
        );
    }

    #[test]
    fn cast_ids_are_monotonic_per_cast() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let mut package = Package::new();
        package.push(Node::root_medium("medium.bolt", Arc::new(BoltMedium)));
        package.push(spark(&EffectLog::default()));

        let first = engine.begin_cast(&env, CASTER, &package);
        let second = engine.begin_cast(&env, CASTER, &package);
        let a = first.suspended[0].package.id();
        let b = second.suspended[0].package.id();
        assert!(b > a);
        assert_ne!(a, CastId::UNASSIGNED);
    }

    // ------------------------------------------------------------------
    // Scenario A: touch + spark
    // ------------------------------------------------------------------

    #[test]
    fn touch_spark_applies_once_at_base_power() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut package = Package::new();
        package.push(touch());
        package.push(spark(&log));
        assert_eq!(package.complexity(), 10);

        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert!(outcome.started());
        assert_eq!(outcome.applications.len(), 1);
        assert_eq!(outcome.applications[0].power, 1.0);
        assert_eq!(outcome.applications[0].index, 0);
        assert_eq!(outcome.applications[0].key.as_str(), "effect.spark");

        let calls = log.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(1.0, 0, Some(CASTER))]);
        assert_eq!(log.casts.load(Ordering::SeqCst), 1);
    }

    // ------------------------------------------------------------------
    // Scenario B / P4: fork fan-out
    // ------------------------------------------------------------------

    #[test]
    fn fork_of_three_fires_effect_three_times() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut package = Package::new();
        package.push(touch());
        package.push(
            Node::split("mod.fork", 2)
                .with_setting(SPLIT_COUNT_SETTING, NodeSetting::range(2, 6, 3)),
        );
        package.push(spark(&log));

        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert_eq!(outcome.applications.len(), 3);
        let mut indices: Vec<_> =
            outcome.applications.iter().map(|a| a.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2]);
        // Fork does not alter power in the base contract.
        assert!(outcome.applications.iter().all(|a| a.power == 1.0));
        assert_eq!(log.calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn fork_with_no_remaining_nodes_does_nothing() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let mut package = Package::new();
        package.push(touch());
        package.push(Node::split("mod.fork", 3));
        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert!(outcome.started());
        assert!(outcome.applications.is_empty());
        assert!(outcome.suspended.is_empty());
    }

    // ------------------------------------------------------------------
    // Modifiers
    // ------------------------------------------------------------------

    #[test]
    fn modifier_scales_power_seen_by_effect() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut package = Package::new();
        package.push(touch());
        package.push(Node::modifier("mod.amp", Arc::new(ScaleModifier { factor: 1.5 })));
        package.push(Node::modifier("mod.amp2", Arc::new(ScaleModifier { factor: 2.0 })));
        package.push(spark(&log));

        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert_eq!(outcome.applications.len(), 1);
        assert_eq!(outcome.applications[0].power, 3.0);
    }

    #[test]
    fn halting_modifier_ends_the_branch() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut package = Package::new();
        package.push(touch());
        package.push(Node::modifier("mod.halt", Arc::new(HaltModifier)));
        package.push(spark(&log));

        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert!(outcome.started());
        assert!(outcome.applications.is_empty());
        assert!(log.calls.lock().unwrap().is_empty());
    }

    // ------------------------------------------------------------------
    // P6: inert contract mismatch
    // ------------------------------------------------------------------

    #[test]
    fn mismatched_contracts_produce_no_applications() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        // A target-only medium feeding a medium that needs a trajectory:
        // nothing flows, nothing fires, nothing errors.
        let mut package = Package::new();
        package.push(Node::medium("medium.graze", Arc::new(TrajectorylessMedium)));
        package.push(Node::medium("medium.bounce", Arc::new(TouchMedium)));
        package.push(spark(&log));
        assert!(!package.contracts_satisfied());

        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert!(outcome.started());
        assert!(outcome.applications.is_empty());
    }

    // ------------------------------------------------------------------
    // Suspension
    // ------------------------------------------------------------------

    #[test]
    fn deferring_medium_parks_the_remaining_chain() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut package = Package::new();
        package.push(Node::root_medium("medium.bolt", Arc::new(BoltMedium)));
        package.push(Node::modifier("mod.amp", Arc::new(ScaleModifier { factor: 2.0 })));
        package.push(spark(&log));

        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert!(outcome.started());
        assert!(outcome.applications.is_empty());
        assert_eq!(outcome.suspended.len(), 1);
        let parked = &outcome.suspended[0];
        assert_eq!(parked.package.len(), 2);
        assert_eq!(parked.package.caster(), Some(CASTER));
        // on_cast already fired at cast start, not at resumption.
        assert_eq!(log.casts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn resume_runs_the_parked_chain() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut package = Package::new();
        package.push(Node::root_medium("medium.bolt", Arc::new(BoltMedium)));
        package.push(Node::modifier("mod.amp", Arc::new(ScaleModifier { factor: 2.0 })));
        package.push(spark(&log));

        let parked = engine
            .begin_cast(&env, CASTER, &package)
            .suspended
            .remove(0);

        // The carrier later collides with something.
        let impact = Target::point(Vec3::new(0.0, 0.0, 12.0));
        let outcome = engine.resume(
            &env,
            parked.package,
            vec![Hit::target(impact, Some(parked.origin))],
        );
        assert_eq!(outcome.applications.len(), 1);
        assert_eq!(outcome.applications[0].power, 2.0);
        assert_eq!(outcome.applications[0].target, impact);
    }

    #[test]
    fn bolt_without_payload_parks_nothing() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let mut package = Package::new();
        package.push(Node::root_medium("medium.bolt", Arc::new(BoltMedium)));
        let outcome = engine.begin_cast(&env, CASTER, &package);
        assert!(outcome.started());
        assert!(outcome.suspended.is_empty());
    }

    // ------------------------------------------------------------------
    // Lost caster
    // ------------------------------------------------------------------

    #[test]
    fn lost_caster_reads_back_as_none_at_application() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut package = Package::new();
        package.push(Node::root_medium("medium.bolt", Arc::new(BoltMedium)));
        package.push(spark(&log));
        let parked = engine
            .begin_cast(&env, CASTER, &package)
            .suspended
            .remove(0);

        // The caster leaves the world before the carrier lands.
        let emptied = TestWorld { actors: HashMap::new() };
        let env_later = CastEnv::new(&emptied);
        let outcome = engine.resume(
            &env_later,
            parked.package,
            vec![Hit::target(Target::point(Vec3::ZERO), None)],
        );
        // The application still happens; only caster-dependent work skips.
        assert_eq!(outcome.applications.len(), 1);
        assert_eq!(log.calls.lock().unwrap()[0].2, None);
    }

    // ------------------------------------------------------------------
    // Template immutability
    // ------------------------------------------------------------------

    #[test]
    fn casting_never_mutates_the_template() {
        let world = TestWorld::with_actor(CASTER);
        let env = CastEnv::new(&world);
        let mut engine = CastEngine::new();
        let log = EffectLog::default();
        let mut template = Package::new();
        template.push(touch());
        template.push(Node::modifier("mod.amp", Arc::new(ScaleModifier { factor: 4.0 })));
        template.push(spark(&log));

        engine.begin_cast(&env, CASTER, &template);
        assert_eq!(template.cursor(), 0);
        assert_eq!(template.power_multiplier(), 1.0);
        assert_eq!(template.id(), CastId::UNASSIGNED);
        assert_eq!(template.caster(), None);
    }
}
