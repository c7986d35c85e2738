//! Spell effects.
//!
//! - `Effect`: the polymorphic effect interface (checks, targeting, apply)
//! - `Mechanics`: casting context (mode, caster, power, duration)
//! - `Destination` / `Target` / `EffectTarget`: aim points and resolved targets
//! - `Heal`, `CloneEffect`, `Sacrifice`: the built-in effects
//! - `EffectRegistry`: named effects loaded from JSON
//!
//! ## Mutation
//!
//! Effects never change units directly. `apply` sends `ChangeBatch`es to a
//! `StateBoundary` and reports apply-stage inconsistencies through its
//! `complain` channel.

mod clone;
mod effect;
mod heal;
mod mechanics;
mod registry;
mod sacrifice;
mod targeting;
pub mod unit_effect;

pub use clone::CloneEffect;
pub use effect::Effect;
pub use heal::Heal;
pub use mechanics::{CastProblem, Mechanics, Mode, Positiveness, Problem, Severity};
pub use registry::{EffectConfig, EffectRegistry};
pub use sacrifice::{Eligibility, Sacrifice};
pub use targeting::{AimType, Destination, EffectTarget, Target};
pub use unit_effect::UnitEffect;
