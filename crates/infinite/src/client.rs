//! # Client Facade
//!
//! The object the host holds for the lifetime of a session. It owns the
//! registry, the kill-aura tick driver and the event bus, and exposes the
//! decision points the host's patched call sites consult.
//!
//! ## Threading
//!
//! Decision points take the registry read lock for the duration of one
//! call, so meshing threads can resolve faces concurrently. Mutations take
//! the write lock, release it, and only then publish events or touch the
//! tick driver. The tick driver lock is never held while waiting for the
//! registry write lock.

use infinite_combat::{CombatWorld, EntityRef, StepOutcome, TargetSelector};
use infinite_core::{
    FeatureRegistry, FeatureSnapshot, Profile, ProfileReport, RegistryHandle, RegistryResult, SettingDescriptor,
    SettingValue, ToggleOutcome,
};
use infinite_render::{
    skip_fluid_face, BlockView, BlockVisibilityQuery, FacePass, RenderLayer, VisibilityDecision, VisibilityResolver,
};
use infinite_shared::BlockPos;
use parking_lot::Mutex;

use crate::catalog::{self, KILL_AURA, XRAY};
use crate::config::ClientConfig;
use crate::events::{ClientEvent, EventBus, EventReceiver, EventSender};

/// Kill-aura state advanced once per client tick.
#[derive(Debug, Default)]
struct TickDriver {
    selector: TargetSelector,
    ticks: u64,
}

/// Enablement of every feature plus X-Ray's settings, taken around a
/// mutation to work out which events to publish.
struct StateProbe {
    enabled: Vec<(String, bool)>,
    xray: Option<(bool, Vec<SettingValue>)>,
}

impl StateProbe {
    fn take(registry: &FeatureRegistry) -> Self {
        Self {
            enabled: registry
                .features()
                .map(|f| (f.id().to_owned(), f.is_enabled()))
                .collect(),
            xray: registry.feature(XRAY).map(|f| {
                (
                    f.is_enabled(),
                    f.settings().iter().map(|s| s.value().clone()).collect(),
                )
            }),
        }
    }

    fn toggled<'a>(&'a self, after: &'a Self) -> impl Iterator<Item = (&'a str, bool)> {
        self.enabled
            .iter()
            .zip(&after.enabled)
            .filter(|((_, was), (_, now))| was != now)
            .map(|(_, (id, now))| (id.as_str(), *now))
    }

    /// Chunk meshes are stale once X-Ray flips, or its settings change while
    /// it is on.
    fn needs_reload(&self, after: &Self) -> bool {
        match (&self.xray, &after.xray) {
            (Some((was, before)), Some((now, settings))) => was != now || (*now && before != settings),
            _ => false,
        }
    }
}

/// Client core facade.
pub struct InfiniteClient {
    config: ClientConfig,
    registry: RegistryHandle,
    driver: Mutex<TickDriver>,
    bus: EventBus,
    sender: EventSender,
}

impl InfiniteClient {
    /// A client holding the built-in catalog, every feature disabled.
    ///
    /// # Errors
    ///
    /// Only if the built-in catalog is inconsistent.
    pub fn new(config: ClientConfig) -> RegistryResult<Self> {
        Ok(Self::with_registry(config, catalog::builtin_registry()?))
    }

    /// A client around an existing registry.
    #[must_use]
    pub fn with_registry(config: ClientConfig, registry: FeatureRegistry) -> Self {
        let bus = EventBus::new(config.event_capacity.max(1));
        let sender = bus.sender();
        tracing::info!(
            features = registry.len(),
            event_capacity = config.event_capacity,
            "client core ready"
        );
        Self {
            config,
            registry: RegistryHandle::new(registry),
            driver: Mutex::new(TickDriver::default()),
            bus,
            sender,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared registry handle.
    #[must_use]
    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    /// A receiver for host-side effects.
    #[must_use]
    pub fn events(&self) -> EventReceiver {
        self.bus.receiver()
    }

    /// Client ticks driven so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.driver.lock().ticks
    }

    // =========================================================================
    // Boundary reads
    // =========================================================================

    /// Whether `id` is enabled; unknown ids read as disabled.
    #[must_use]
    pub fn is_feature_enabled(&self, id: &str) -> bool {
        self.registry.read().is_enabled(id)
    }

    /// Boolean setting of an enabled feature; `false` otherwise.
    #[must_use]
    pub fn is_setting_enabled(&self, id: &str, setting: &str) -> bool {
        self.registry.read().is_setting_enabled(id, setting)
    }

    /// Numeric setting of an enabled feature; `default` otherwise.
    #[must_use]
    pub fn get_setting_float(&self, id: &str, setting: &str, default: f32) -> f32 {
        self.registry.read().get_float_setting(id, setting, default)
    }

    // =========================================================================
    // Tooling
    // =========================================================================

    /// Enables a feature and publishes every resulting change.
    ///
    /// # Errors
    ///
    /// Unknown feature.
    pub fn enable(&self, id: &str) -> RegistryResult<ToggleOutcome> {
        self.mutate(|registry| registry.enable(id))
    }

    /// Disables a feature and publishes every resulting change.
    ///
    /// # Errors
    ///
    /// Unknown feature.
    pub fn disable(&self, id: &str) -> RegistryResult<ToggleOutcome> {
        self.mutate(|registry| registry.disable(id))
    }

    /// Flips a feature.
    ///
    /// # Errors
    ///
    /// Unknown feature.
    pub fn toggle(&self, id: &str) -> RegistryResult<ToggleOutcome> {
        self.mutate(|registry| registry.toggle(id))
    }

    /// Validates and stores a setting value. Returns whether it changed.
    ///
    /// # Errors
    ///
    /// Unknown feature or setting, or a value the setting rejects.
    pub fn set_setting(&self, id: &str, setting: &str, value: SettingValue) -> RegistryResult<bool> {
        self.mutate(|registry| registry.set_setting(id, setting, value))
    }

    /// Setting descriptors of a feature.
    ///
    /// # Errors
    ///
    /// Unknown feature.
    pub fn descriptors(&self, id: &str) -> RegistryResult<Vec<SettingDescriptor>> {
        self.registry.read().descriptors(id)
    }

    /// Current enablement and settings of every feature.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FeatureSnapshot> {
        self.registry.read().snapshot()
    }

    /// Applies a profile and publishes every resulting change.
    pub fn apply_profile(&self, profile: &Profile) -> ProfileReport {
        self.mutate(|registry| registry.apply_profile(profile))
    }

    /// Restores every feature's defaults.
    pub fn reset_all(&self) {
        self.mutate(FeatureRegistry::reset_all);
    }

    fn mutate<R>(&self, change: impl FnOnce(&mut FeatureRegistry) -> R) -> R {
        let (result, before, after) = {
            let mut registry = self.registry.write();
            let before = StateProbe::take(&registry);
            let result = change(&mut *registry);
            let after = StateProbe::take(&registry);
            (result, before, after)
        };

        let mut kill_aura_stopped = false;
        for (id, enabled) in before.toggled(&after) {
            kill_aura_stopped |= id == KILL_AURA && !enabled;
            self.publish(ClientEvent::FeatureToggled {
                id: id.to_owned(),
                enabled,
            });
        }
        if before.needs_reload(&after) {
            self.publish(ClientEvent::ReloadWorldRenderer);
        }
        if kill_aura_stopped {
            self.driver.lock().selector.reset();
        }
        result
    }

    fn publish(&self, event: ClientEvent) {
        if !self.sender.send(event) {
            tracing::warn!(capacity = self.config.event_capacity, "event channel full, event dropped");
        }
    }

    // =========================================================================
    // Visibility decision points
    // =========================================================================

    /// Runs `f` with a resolver under a single read lock, for hosts that
    /// resolve a whole section at once.
    pub fn with_visibility<R>(&self, f: impl FnOnce(&VisibilityResolver<'_>) -> R) -> R {
        let registry = self.registry.read();
        f(&VisibilityResolver::new(&registry))
    }

    /// Decides one block face.
    #[must_use]
    pub fn resolve_face(&self, query: &BlockVisibilityQuery<'_>) -> VisibilityDecision {
        self.with_visibility(|resolver| resolver.resolve_side(query))
    }

    /// Decides one block face and carries the result to the colour site.
    #[must_use]
    pub fn face_pass(&self, query: &BlockVisibilityQuery<'_>) -> FacePass {
        self.with_visibility(|resolver| FacePass::begin(resolver, query))
    }

    /// Whether the fluid renderer should skip a side.
    #[must_use]
    pub fn skip_fluid_face(&self, query: &BlockVisibilityQuery<'_>, host_default: bool) -> bool {
        self.with_visibility(|resolver| skip_fluid_face(resolver, query, host_default))
    }

    /// Forced render layer for blocks and fluids, `None` to keep the host's.
    #[must_use]
    pub fn block_layer(&self) -> Option<RenderLayer> {
        self.with_visibility(|resolver| resolver.block_layer())
    }

    /// Decision for a block entity.
    #[must_use]
    pub fn block_entity_decision(&self, block_id: &str) -> VisibilityDecision {
        self.with_visibility(|resolver| resolver.block_entity_decision(block_id))
    }

    /// Whether a block is shown under X-Ray's exposed-block rule.
    #[must_use]
    pub fn is_exposed_visible(&self, block_id: &str, pos: BlockPos, world: &impl BlockView) -> bool {
        self.with_visibility(|resolver| resolver.is_exposed_visible(block_id, pos, world))
    }

    // =========================================================================
    // Combat tick
    // =========================================================================

    /// Advances kill-aura by one client tick and publishes its attacks.
    ///
    /// `world` is `None` while no world is loaded. A non-positive or
    /// non-finite eye height falls back to the configured one.
    pub fn tick<E: EntityRef>(&self, world: Option<&CombatWorld<'_, E>>) -> StepOutcome {
        let world = world.map(|world| {
            let mut attacker = world.attacker;
            if !(attacker.eye_height.is_finite() && attacker.eye_height > 0.0) {
                attacker.eye_height = self.config.eye_height;
            }
            CombatWorld {
                attacker,
                entities: world.entities,
                tick: world.tick,
            }
        });

        let outcome = {
            let mut driver = self.driver.lock();
            driver.ticks += 1;
            let registry = self.registry.read();
            driver.selector.step(&registry, world.as_ref())
        };

        let tick = world.as_ref().map_or(0, |world| world.tick);
        for command in &outcome.commands {
            self.publish(ClientEvent::AttackIssued {
                target: command.target,
                distance: command.distance,
                aim: command.aim,
                tick,
            });
        }
        outcome
    }
}
